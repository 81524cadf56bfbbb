//! Core data model: the read-only buffer and the caret/selection state

pub mod buffer;
pub mod selection;
