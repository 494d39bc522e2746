/// The bullet glyph models sometimes emit despite being told not to.
pub const DISALLOWED_BULLET: char = '•';
/// Canonical bullet marker in saved lesson text.
pub const CANONICAL_BULLET: char = '-';

/// Replaces every disallowed bullet glyph with a hyphen. Idempotent.
pub fn normalize_bullets(text: &str) -> String {
    text.replace(DISALLOWED_BULLET, &CANONICAL_BULLET.to_string())
}
