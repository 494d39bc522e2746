//! PDF encoder on `printpdf` built-in Helvetica.
//!
//! Built-in fonts only cover a single-byte encoding, so blocks reaching this
//! encoder must already be sanitized to ASCII (see `sanitize::sanitize_ascii`).
//! Text is placed line by line from the top margin; a new A4 page starts
//! whenever the next line would cross the bottom margin.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

use crate::export::font_metrics::{metrics, Face};
use crate::export::{Block, ExportError, LineKind, DOCUMENT_TITLE};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const BULLET_INDENT_MM: f32 = 6.0;

const TITLE_SIZE_PT: f32 = 18.0;
const HEADER_SIZE_PT: f32 = 14.0;
const BODY_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_FACTOR: f32 = 1.4;
const BLANK_GAP_MM: f32 = 3.0;

const MM_PER_PT: f32 = 25.4 / 72.0;
const LAYER_NAME: &str = "Lesson";

/// Dark blue used for the title and section headers.
const HEADER_RGB: (f32, f32, f32) = (31.0 / 255.0, 78.0 / 255.0, 121.0 / 255.0);

pub fn render(blocks: &[Block]) -> Result<Vec<u8>, ExportError> {
    render_counting_pages(blocks).map(|(bytes, _)| bytes)
}

fn render_counting_pages(blocks: &[Block]) -> Result<(Vec<u8>, usize), ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut writer = PageWriter {
        doc: &doc,
        layer,
        cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        regular,
        bold,
        pages: 1,
    };

    writer.write_wrapped(DOCUMENT_TITLE, Face::Bold, TITLE_SIZE_PT, 0.0, true);
    writer.gap(BLANK_GAP_MM * 2.0);

    for block in blocks {
        match block.kind {
            LineKind::Header => {
                writer.gap(BLANK_GAP_MM / 2.0);
                writer.write_wrapped(&block.text, Face::Bold, HEADER_SIZE_PT, 0.0, true);
            }
            LineKind::Bullet => {
                writer.write_bullet(&block.text);
            }
            LineKind::Paragraph => {
                writer.write_wrapped(&block.text, Face::Regular, BODY_SIZE_PT, 0.0, false);
            }
            LineKind::Blank => writer.gap(BLANK_GAP_MM),
        }
    }

    let pages = writer.pages;
    drop(writer);

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok((bytes, pages))
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    /// Baseline position of the next line, measured from the page bottom.
    cursor_mm: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    pages: usize,
}

impl PageWriter<'_> {
    fn usable_width_mm(&self, indent_mm: f32) -> f32 {
        PAGE_WIDTH_MM - 2.0 * MARGIN_MM - indent_mm
    }

    fn write_wrapped(&mut self, text: &str, face: Face, size_pt: f32, indent_mm: f32, colored: bool) {
        let max_width_em = self.usable_width_mm(indent_mm) / (size_pt * MM_PER_PT);
        for line in metrics(face).wrap(text, max_width_em) {
            self.write_line(&line, face, size_pt, MARGIN_MM + indent_mm, colored);
        }
    }

    /// A hyphen marker in the margin column, wrapped text indented after it.
    fn write_bullet(&mut self, text: &str) {
        let max_width_em =
            self.usable_width_mm(BULLET_INDENT_MM) / (BODY_SIZE_PT * MM_PER_PT);
        let lines = metrics(Face::Regular).wrap(text, max_width_em);
        for (i, line) in lines.iter().enumerate() {
            self.ensure_room(BODY_SIZE_PT);
            if i == 0 {
                self.place("-", Face::Regular, BODY_SIZE_PT, MARGIN_MM + 1.5, false);
            }
            self.place(line, Face::Regular, BODY_SIZE_PT, MARGIN_MM + BULLET_INDENT_MM, false);
            self.advance(BODY_SIZE_PT);
        }
    }

    fn write_line(&mut self, line: &str, face: Face, size_pt: f32, x_mm: f32, colored: bool) {
        self.ensure_room(size_pt);
        self.place(line, face, size_pt, x_mm, colored);
        self.advance(size_pt);
    }

    fn place(&self, text: &str, face: Face, size_pt: f32, x_mm: f32, colored: bool) {
        let (r, g, b) = if colored { HEADER_RGB } else { (0.0, 0.0, 0.0) };
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
        let font = match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        };
        self.layer
            .use_text(text, size_pt, Mm(x_mm), Mm(self.cursor_mm - size_pt * MM_PER_PT), font);
    }

    fn advance(&mut self, size_pt: f32) {
        self.cursor_mm -= size_pt * LINE_HEIGHT_FACTOR * MM_PER_PT;
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }

    fn ensure_room(&mut self, size_pt: f32) {
        let needed = size_pt * LINE_HEIGHT_FACTOR * MM_PER_PT;
        if self.cursor_mm - needed < MARGIN_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
            self.pages += 1;
        }
    }
}
