//! Shared helpers
//!
//! - [`fs`] - atomic writes and file discovery
//! - [`text`] - word wrapping for change log entries

pub mod fs;
pub mod text;

pub use fs::{atomic_write, first_existing};
pub use text::wrap;
