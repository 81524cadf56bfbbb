//! Process-level services for the command-line viewer

#[cfg(feature = "runtime")]
pub mod tracing_setup;
