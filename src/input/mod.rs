//! Input handling: key and modifier types and the key-bound actions

pub mod actions;
pub mod keys;
