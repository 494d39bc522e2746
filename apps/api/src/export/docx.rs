//! Word (.docx) encoder on `docx-rs`.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Run, SpecialIndentType, Start,
};

use crate::export::{Block, ExportError, LineKind, DOCUMENT_TITLE};

/// Shared id for the single bulleted-list definition.
const BULLET_LIST_ID: usize = 1;
const HEADER_COLOR: &str = "1F4E79";
// Run sizes are in half-points.
const TITLE_SIZE: usize = 36;
const HEADER_SIZE: usize = 28;
const BODY_SIZE: usize = 22;

pub fn render(blocks: &[Block]) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_LIST_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )
                .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
            ),
        )
        .add_numbering(Numbering::new(BULLET_LIST_ID, BULLET_LIST_ID))
        .add_paragraph(
            Paragraph::new()
                .add_run(
                    Run::new()
                        .add_text(DOCUMENT_TITLE)
                        .bold()
                        .size(TITLE_SIZE)
                        .color(HEADER_COLOR),
                )
                .align(AlignmentType::Center),
        );

    for block in blocks {
        docx = docx.add_paragraph(paragraph_for(block));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn paragraph_for(block: &Block) -> Paragraph {
    match block.kind {
        LineKind::Header => Paragraph::new().add_run(
            Run::new()
                .add_text(&block.text)
                .bold()
                .size(HEADER_SIZE)
                .color(HEADER_COLOR),
        ),
        LineKind::Bullet => Paragraph::new()
            .add_run(Run::new().add_text(&block.text).size(BODY_SIZE))
            .numbering(NumberingId::new(BULLET_LIST_ID), IndentLevel::new(0)),
        LineKind::Paragraph => {
            Paragraph::new().add_run(Run::new().add_text(&block.text).size(BODY_SIZE))
        }
        LineKind::Blank => Paragraph::new(),
    }
}
