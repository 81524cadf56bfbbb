//! UTF-8 boundary navigation over raw byte buffers
//!
//! The viewer keeps text as bytes and never assumes the content is valid
//! UTF-8. Every helper here is total: invalid sequences decode as
//! `U+FFFD` and advance exactly one byte, and positions past the end are
//! clamped to the buffer length.

/// Replacement character produced for malformed sequences
pub const REPLACEMENT: char = '\u{FFFD}';

/// True for bytes of the form `10xxxxxx`
#[inline]
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Expected sequence length announced by a lead byte, or `None` for a byte
/// that can never start a sequence.
#[inline]
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Decode the codepoint starting at `pos`.
///
/// Returns the character and the number of bytes it occupies. Malformed or
/// truncated sequences yield `(REPLACEMENT, 1)`. Returns `None` only when
/// `pos` is at or past the end of `text`.
pub fn decode_at(text: &[u8], pos: usize) -> Option<(char, usize)> {
    let lead = *text.get(pos)?;
    let Some(len) = sequence_len(lead) else {
        return Some((REPLACEMENT, 1));
    };
    if len == 1 {
        return Some((lead as char, 1));
    }
    let Some(bytes) = text.get(pos..pos + len) else {
        return Some((REPLACEMENT, 1));
    };
    // from_utf8 rejects overlongs, surrogates and bad continuation bytes
    match std::str::from_utf8(bytes) {
        Ok(s) => s.chars().next().map(|c| (c, len)),
        Err(_) => Some((REPLACEMENT, 1)),
    }
}

/// Byte offset of the codepoint after the one at `pos`.
///
/// Clamped to `text.len()`.
pub fn next_boundary(text: &[u8], pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    match decode_at(text, pos) {
        Some((_, len)) => pos + len,
        None => text.len(),
    }
}

/// Byte offset of the codepoint before `pos`.
///
/// Steps back over continuation bytes (at most three) to a lead byte.
/// Returns 0 at the start of the buffer.
pub fn prev_boundary(text: &[u8], pos: usize) -> usize {
    let pos = pos.min(text.len());
    if pos == 0 {
        return 0;
    }
    let mut start = pos - 1;
    let floor = pos.saturating_sub(4);
    while start > floor && is_continuation(text[start]) {
        start -= 1;
    }
    // A lead byte whose sequence does not reach back to `pos` means the
    // trailing bytes were stray continuations, each a codepoint of its own.
    match decode_at(text, start) {
        Some((_, len)) if start + len == pos => start,
        _ => pos - 1,
    }
}

/// Move `pos` backward until it sits on a codepoint boundary.
pub fn align_backward(text: &[u8], pos: usize) -> usize {
    let pos = pos.min(text.len());
    if pos == text.len() {
        return pos;
    }
    let mut start = pos;
    let floor = pos.saturating_sub(3);
    while start > floor && is_continuation(text[start]) {
        start -= 1;
    }
    if start == pos {
        return pos;
    }
    match decode_at(text, start) {
        Some((_, len)) if start + len > pos => start,
        // Stray continuation byte: it decodes as its own codepoint
        _ => pos,
    }
}

/// Move `pos` forward until it sits on a codepoint boundary.
pub fn align_forward(text: &[u8], pos: usize) -> usize {
    let aligned = align_backward(text, pos);
    if aligned == pos.min(text.len()) {
        aligned
    } else {
        next_boundary(text, aligned)
    }
}

/// Iterator over `(byte_offset, char, byte_len)` of a byte range.
#[derive(Debug, Clone)]
pub struct CodepointIter<'a> {
    text: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> CodepointIter<'a> {
    /// Iterate codepoints in `text[start..end]`, with offsets relative to
    /// the whole buffer.
    pub fn new(text: &'a [u8], start: usize, end: usize) -> Self {
        let end = end.min(text.len());
        Self {
            text,
            pos: start.min(end),
            end,
        }
    }
}

impl Iterator for CodepointIter<'_> {
    type Item = (usize, char, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let (ch, len) = decode_at(self.text, self.pos)?;
        let at = self.pos;
        self.pos = (self.pos + len).min(self.end);
        Some((at, ch, len))
    }
}
