//! Tokenizer and layout core of a read-only source and disassembly viewer
//!
//! The crate turns a byte buffer into colored, non-overlapping tokens,
//! maps byte offsets to pixels and back for a monospace font, maps line
//! scroll positions onto a bounded scrollbar range, and keeps the caret
//! and selection state. [`state::ViewState`] ties these together into one
//! engine instance; [`view::paint`] describes what a renderer should draw.

// Core modules
pub mod config;
pub mod overlay;
pub mod state;

// Organized modules
pub mod input;
pub mod model;
pub mod primitives;
pub mod services;
pub mod view;

pub use config::Config;
pub use primitives::disasm_tokenizer::tokenize_disassembly;
pub use primitives::source_tokenizer::tokenize_source;
pub use primitives::token::{ColorClass, Token, TokenStyle};
pub use state::{ContentKind, ViewState};
