//! Line-start index over a byte buffer
//!
//! `starts[0]` is always 0 and every `\n` at offset `p` opens a new line at
//! `p + 1`. A buffer ending in `\n` therefore has a final empty line, which
//! the viewer shows like any other.

use std::ops::Range;

/// Sorted line-start offsets for one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::build(&[])
    }
}

impl LineIndex {
    /// Scan `text` for newlines.
    pub fn build(text: &[u8]) -> Self {
        let mut starts = Vec::with_capacity(text.len() / 32 + 1);
        starts.push(0);
        starts.extend(
            text.iter()
                .enumerate()
                .filter(|(_, &b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines; never zero.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Length of the indexed buffer
    #[inline]
    pub fn text_len(&self) -> usize {
        self.len
    }

    /// Byte offset where `line` begins, clamped to the last line.
    pub fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.starts.len() - 1);
        self.starts[line]
    }

    /// Line containing `pos`. Positions past the end belong to the last line.
    pub fn line_of(&self, pos: usize) -> usize {
        let pos = pos.min(self.len);
        // First start greater than pos, minus one
        self.starts.partition_point(|&s| s <= pos).saturating_sub(1)
    }

    /// End of `line`'s displayed content: the offset of its newline, or the
    /// buffer length for the last line.
    pub fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.starts.len() - 1);
        match self.starts.get(line + 1) {
            Some(&next) => next - 1,
            None => self.len,
        }
    }

    /// Displayed byte range of `line`, newline excluded.
    pub fn line_range(&self, line: usize) -> Range<usize> {
        self.line_start(line)..self.line_end(line)
    }
}
