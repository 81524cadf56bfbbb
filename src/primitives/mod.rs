//! Low-level primitives and utilities
//!
//! This module contains the tokenizers, UTF-8 and display-width helpers,
//! and the line index the layout engine is built on.

pub mod disasm_tokenizer;
pub mod display_width;
pub mod lexicon;
pub mod line_index;
pub mod source_tokenizer;
pub mod token;
pub mod utf8;
pub mod word_navigation;
