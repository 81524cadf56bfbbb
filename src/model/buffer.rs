//! Read-only text buffer with its line index
//!
//! The bytes and the line starts are built together and replaced together,
//! so no caller can observe one without the other.
use crate::primitives::line_index::LineIndex;
use crate::primitives::utf8;
use std::ops::Range;

#[derive(Debug, Clone, Default)]
pub struct Buffer {
    text: Vec<u8>,
    lines: LineIndex,
}

impl Buffer {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_bytes(content: Vec<u8>) -> Self {
        let lines = LineIndex::build(&content);
        Self {
            text: content,
            lines,
        }
    }

    /// Replace the content wholesale.
    pub fn replace_content(&mut self, content: Vec<u8>) {
        self.lines = LineIndex::build(&content);
        self.text = content;
    }

    pub fn bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Bytes in `range`, clamped to the buffer
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        let end = range.end.min(self.text.len());
        let start = range.start.min(end);
        &self.text[start..end]
    }

    /// Clamp `pos` into the buffer and snap it back to a codepoint boundary
    pub fn clamp_position(&self, pos: usize) -> usize {
        utf8::align_backward(&self.text, pos.min(self.text.len()))
    }

    pub fn next_position(&self, pos: usize) -> usize {
        utf8::next_boundary(&self.text, pos)
    }

    pub fn prev_position(&self, pos: usize) -> usize {
        utf8::prev_boundary(&self.text, pos)
    }

    /// Lossy UTF-8 view of a range, for dumps and clipboard text
    pub fn text_lossy(&self, range: Range<usize>) -> String {
        String::from_utf8_lossy(self.slice(range)).into_owned()
    }
}
