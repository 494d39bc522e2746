//! Export Adapter — turns lesson text into a downloadable document.
//!
//! One classification pass (`layout`) is shared by every format; the
//! per-format differences live in `FormatSpec` and in the encoders.
//! Export never fails because of the text content: empty text yields a
//! document holding only the title, and characters the target cannot
//! represent are dropped.

pub mod docx;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod sanitize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sanitize::{sanitize_ascii, strip_control_chars};

/// Heading prepended to every exported document.
pub const DOCUMENT_TITLE: &str = "Tailored Lesson Plan";

/// Section labels recognized as header lines.
pub const HEADER_LABELS: [&str; 5] = [
    "Objective:",
    "Concept Breakdown:",
    "Activity:",
    "Inclusivity Considerations:",
    "Wrap Up:",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("DOCX encoding failed: {0}")]
    Docx(String),

    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn spec(self) -> FormatSpec {
        match self {
            ExportFormat::Docx => FormatSpec {
                header_labels: &HEADER_LABELS,
                bullet_marker: '-',
                charset: Charset::Unicode,
            },
            ExportFormat::Pdf => FormatSpec {
                header_labels: &HEADER_LABELS,
                bullet_marker: '-',
                charset: Charset::Ascii,
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Docx => "lesson.docx",
            ExportFormat::Pdf => "lesson.pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// Characters an encoder can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Unicode,
    /// Printable ASCII plus newline; everything else is mapped or dropped.
    Ascii,
}

/// Per-format parameters for the shared classification pass.
#[derive(Debug, Clone, Copy)]
pub struct FormatSpec {
    pub header_labels: &'static [&'static str],
    pub bullet_marker: char,
    pub charset: Charset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Bullet,
    Paragraph,
    Blank,
}

/// One styled unit of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: LineKind,
    pub text: String,
}

/// Classifies a single line. Header labels win over the bullet marker.
pub fn classify_line(line: &str, spec: &FormatSpec) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_rule(trimmed) {
        return LineKind::Blank;
    }
    if spec.header_labels.iter().any(|label| trimmed.contains(label)) {
        return LineKind::Header;
    }
    if trimmed.starts_with(spec.bullet_marker) {
        return LineKind::Bullet;
    }
    LineKind::Paragraph
}

/// Splits text into styled blocks. Runs of blank lines collapse to one
/// spacing block, and leading/trailing spacing is dropped.
pub fn layout(text: &str, spec: &FormatSpec) -> Vec<Block> {
    let text = match spec.charset {
        Charset::Unicode => strip_control_chars(text),
        Charset::Ascii => sanitize_ascii(text),
    };

    let mut blocks: Vec<Block> = Vec::new();
    for line in text.lines() {
        let kind = classify_line(line, spec);
        let block_text = match kind {
            LineKind::Blank => {
                if matches!(blocks.last(), None | Some(Block { kind: LineKind::Blank, .. })) {
                    continue;
                }
                String::new()
            }
            LineKind::Header => strip_markup(
                line.trim()
                    .trim_start_matches(spec.bullet_marker)
                    .trim_start()
                    .trim_start_matches('#'),
            ),
            LineKind::Bullet => strip_markup(
                line.trim()
                    .trim_start_matches(spec.bullet_marker)
                    .trim_start(),
            ),
            LineKind::Paragraph => strip_markup(line.trim()),
        };
        blocks.push(Block {
            kind,
            text: block_text,
        });
    }

    if matches!(blocks.last(), Some(Block { kind: LineKind::Blank, .. })) {
        blocks.pop();
    }
    blocks
}

/// Renders `text` as a complete document in the requested format.
pub fn export(text: &str, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let blocks = layout(text, &format.spec());
    match format {
        ExportFormat::Docx => docx::render(&blocks),
        ExportFormat::Pdf => pdf::render(&blocks),
    }
}

/// A markdown horizontal rule such as `---` or `***`.
fn is_rule(line: &str) -> bool {
    line.len() >= 3 && (line.chars().all(|c| c == '-') || line.chars().all(|c| c == '*'))
}

/// Removes markdown emphasis markers; the document styles carry the emphasis.
fn strip_markup(text: &str) -> String {
    text.replace("**", "").replace("__", "").trim().to_string()
}
