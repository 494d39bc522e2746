//! Static glyph-width tables for the PDF built-in Helvetica fonts.
//!
//! Widths are in em units (AFM widths / 1000). All tables cover ASCII
//! 0x20..=0x7E (95 printable characters); index = (char as usize) - 32.
//! The PDF encoder only ever sees sanitized ASCII, so the fallback width
//! exists for robustness rather than accuracy.

/// Which built-in face a run of text is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

/// Static character-width table for one face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
}

static HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp–/
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0–9
        278, 278, 584, 584, 584, 556, 1015, // :–@
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A–M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N–Z
        278, 278, 278, 469, 556, 333, // [–`
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a–m
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n–z
        334, 260, 334, 584, // {–~
    ],
    average_char_width: 0.52,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // sp–/
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0–9
        333, 333, 584, 584, 584, 611, 975, // :–@
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A–M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N–Z
        333, 278, 333, 584, 556, 333, // [–`
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a–m
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n–z
        389, 280, 389, 584, // {–~
    ],
    average_char_width: 0.57,
};

pub fn metrics(face: Face) -> &'static FontMetricTable {
    match face {
        Face::Regular => &HELVETICA,
        Face::Bold => &HELVETICA_BOLD,
    }
}

impl FontMetricTable {
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            f32::from(self.widths[code - 32]) / 1000.0
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Greedy word wrap to `max_width_em`. Words wider than a full line are
    /// split at character boundaries. Always returns at least one line.
    pub fn wrap(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate_width = if current.is_empty() {
                self.measure_str(word)
            } else {
                self.measure_str(&current) + self.char_width(' ') + self.measure_str(word)
            };

            if candidate_width <= max_width_em {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if self.measure_str(word) <= max_width_em {
                current.push_str(word);
            } else {
                let mut pieces = self.split_long_word(word, max_width_em);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn split_long_word(&self, word: &str, max_width_em: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = 0.0;
        for c in word.chars() {
            let w = self.char_width(c);
            if width + w > max_width_em && !piece.is_empty() {
                pieces.push(std::mem::take(&mut piece));
                width = 0.0;
            }
            piece.push(c);
            width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}
