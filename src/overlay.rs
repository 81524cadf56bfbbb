//! Token overlay: the authoritative, non-overlapping list of colored spans
//!
//! Tokens arrive from the tokenizers and from callers that recolor parts of
//! the buffer afterwards (current-line markers, search hits, breakpoints).
//! Later tokens win: applying a token removes whatever it covers, trims
//! partial overlaps and splits a token it lands in the middle of.
//!
//! The list is a plain `Vec` kept sorted by start. Because tokens never
//! overlap, their ends are sorted too, so both boundaries of the affected
//! window are found with `partition_point` and replaced with one `splice`.

use crate::primitives::token::Token;
use std::ops::Range;

/// Merge `incoming` over `existing` for a buffer of `text_len` bytes.
///
/// `existing` must be sorted and non-overlapping. Incoming tokens are
/// clamped to the buffer, empty ones are dropped, and the rest are applied
/// in start order (stable, so among equal starts the later one wins).
pub fn merge_tokens(existing: &[Token], incoming: &[Token], text_len: usize) -> Vec<Token> {
    let mut list = TokenList {
        tokens: existing.to_vec(),
    };
    list.merge(incoming, text_len);
    list.tokens
}

/// Clamp a token to `[0, text_len)`; `None` if nothing is left.
fn clamp_token(token: &Token, text_len: usize) -> Option<Token> {
    let start = token.start.min(text_len);
    let end = token.start.saturating_add(token.len).min(text_len);
    (end > start).then(|| Token {
        start,
        len: end - start,
        ..*token
    })
}

/// Sorted, non-overlapping token list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from arbitrary tokens, resolving overlaps among them.
    pub fn from_tokens(tokens: &[Token], text_len: usize) -> Self {
        let mut list = Self::new();
        list.merge(tokens, text_len);
        list
    }

    /// Apply `incoming` as overrides.
    pub fn merge(&mut self, incoming: &[Token], text_len: usize) {
        let mut batch: Vec<Token> = incoming
            .iter()
            .filter_map(|t| clamp_token(t, text_len))
            .collect();
        batch.sort_by_key(|t| t.start);

        let before = self.tokens.len();
        for token in &batch {
            self.apply(*token);
        }
        tracing::trace!(
            incoming = incoming.len(),
            applied = batch.len(),
            before,
            after = self.tokens.len(),
            "merged tokens"
        );
    }

    /// Overwrite `[token.start, token.end())` with `token`.
    fn apply(&mut self, token: Token) {
        let (a, b) = (token.start, token.end());
        let first = self.tokens.partition_point(|t| t.end() <= a);
        let last = self.tokens.partition_point(|t| t.start < b);

        let mut replacement = Vec::with_capacity(3);
        if first < last {
            let head = self.tokens[first];
            if head.start < a {
                replacement.push(Token {
                    len: a - head.start,
                    ..head
                });
            }
        }
        replacement.push(token);
        if first < last {
            let tail = self.tokens[last - 1];
            if tail.end() > b {
                replacement.push(Token {
                    start: b,
                    len: tail.end() - b,
                    ..tail
                });
            }
        }
        self.tokens.splice(first..last, replacement);
    }

    /// Replace the whole list
    pub fn replace(&mut self, tokens: &[Token], text_len: usize) {
        self.tokens.clear();
        self.merge(tokens, text_len);
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of the first token whose end lies after `pos`.
    ///
    /// This is where painting a line starting at `pos` begins.
    pub fn first_ending_after(&self, pos: usize) -> usize {
        self.tokens.partition_point(|t| t.end() <= pos)
    }

    /// Tokens intersecting `range`
    pub fn in_range(&self, range: Range<usize>) -> &[Token] {
        let first = self.first_ending_after(range.start);
        let last = self.tokens.partition_point(|t| t.start < range.end);
        &self.tokens[first..last.max(first)]
    }
}
