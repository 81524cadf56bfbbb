//! Word boundary detection for double-click selection and lookups
//!
//! A word is a run of ASCII alphanumerics and underscores. Multibyte
//! codepoints always terminate a word.

use crate::primitives::utf8;
use std::ops::Range;

#[inline]
pub fn is_word_byte(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

/// Bounds of the word touching `pos`.
///
/// Scans left from `pos` and right from `pos`; the result is empty
/// (`pos..pos`) when neither neighbor is a word character. `pos` is clamped
/// and aligned to a codepoint boundary first.
pub fn word_bounds_at(text: &[u8], pos: usize) -> Range<usize> {
    let pos = utf8::align_backward(text, pos.min(text.len()));

    let mut start = pos;
    while start > 0 {
        let prev = utf8::prev_boundary(text, start);
        if !is_word_byte(text[prev]) {
            break;
        }
        start = prev;
    }

    let mut end = pos;
    while end < text.len() && is_word_byte(text[end]) {
        end = utf8::next_boundary(text, end);
    }

    start..end
}
