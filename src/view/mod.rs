//! View layer
//!
//! Pixel geometry, scrolling and the paint plan. Nothing here draws; the
//! rendering toolkit consumes the plan and feeds back sizes and metrics.

pub mod layout;
pub mod paint;
pub mod palette;
pub mod scroll;
pub mod viewport;
