#![forbid(unsafe_code)]

//! Length and whitespace rules shared by every field, matching how a
//! browser measures and trims input values.
//!
//! - Length is the number of UTF-16 code units, so a character outside the
//!   Basic Multilingual Plane (most emoji) counts as two.
//! - Trimming strips the ECMAScript whitespace set: Unicode `White_Space`
//!   plus U+FEFF (byte order mark), minus U+0085 (next line).

/// Length of `value` in UTF-16 code units.
#[must_use]
pub fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Whether `c` is stripped by [`trim_input`].
#[must_use]
pub const fn is_input_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        _ => c.is_whitespace(),
    }
}

/// Strip leading and trailing input whitespace.
#[must_use]
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(is_input_whitespace)
}
