//! Text clean-up before encoding.
//!
//! The ASCII pass is deliberately lossy: typography is mapped to plain
//! equivalents and whatever remains outside printable ASCII is dropped.

/// Smart typography and its plain-ASCII replacement.
const REPLACEMENTS: [(char, &str); 14] = [
    ('\u{2018}', "'"),   // left single quote
    ('\u{2019}', "'"),   // right single quote
    ('\u{201A}', "'"),   // low single quote
    ('\u{201C}', "\""),  // left double quote
    ('\u{201D}', "\""),  // right double quote
    ('\u{201E}', "\""),  // low double quote
    ('\u{2013}', "-"),   // en dash
    ('\u{2014}', "--"),  // em dash
    ('\u{2022}', "-"),   // bullet
    ('\u{25CF}', "-"),   // black circle
    ('\u{2026}', "..."), // ellipsis
    ('\u{00A0}', " "),   // no-break space
    ('\u{2212}', "-"),   // minus sign
    ('\t', "    "),
];

/// Maps smart typography to ASCII, then drops every character that is not
/// printable ASCII or a newline. Never fails.
pub fn sanitize_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some((_, replacement)) = REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            out.push_str(replacement);
        } else if c == '\n' || (' '..='~').contains(&c) {
            out.push(c);
        }
    }
    out
}

/// Keeps only characters allowed in XML 1.0 text, minus the byte-order
/// mark. Used for encoders that accept full Unicode.
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| is_xml_char(c) && c != '\u{FEFF}')
        .collect()
}

/// XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_quotes_and_dashes() {
        assert_eq!(
            sanitize_ascii("‘Hi’ “there” – a — b • c…"),
            "'Hi' \"there\" - a -- b - c..."
        );
    }

    #[test]
    fn test_drops_unrepresentable_characters() {
        assert_eq!(sanitize_ascii("café 🚀 naïve 日本"), "caf  nave ");
    }

    #[test]
    fn test_keeps_newlines_drops_carriage_returns() {
        assert_eq!(sanitize_ascii("a\r\nb\n"), "a\nb\n");
    }

    #[test]
    fn test_output_is_always_ascii() {
        let out = sanitize_ascii("Ωmega — “∑” \u{0000}\u{001B}[31m ✓");
        assert!(out.chars().all(|c| c == '\n' || (' '..='~').contains(&c)));
    }

    #[test]
    fn test_strip_control_chars_keeps_unicode() {
        assert_eq!(
            strip_control_chars("\u{FEFF}Ünïcode 🚀\u{0007}\tok\n"),
            "Ünïcode 🚀\tok\n"
        );
    }

    #[test]
    fn test_strip_control_chars_drops_xml_noncharacters() {
        assert_eq!(strip_control_chars("a\u{FFFE}b\u{FFFF}c"), "abc");
        assert_eq!(strip_control_chars("x\u{0000}\u{000B}\u{001F}y"), "xy");
    }

    #[test]
    fn test_strip_control_chars_keeps_xml_boundaries() {
        let kept = "\u{D7FF}\u{E000}\u{FFFD}\u{10000}\r";
        assert_eq!(strip_control_chars(kept), kept);
    }
}
