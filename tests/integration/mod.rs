//! Integration test suite for the components tool.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **composer**: manifest generation from descriptors on disk
//! - **changelog**: change log maintenance in component directories
//! - **cli**: the `components` binary end to end

mod changelog;
mod cli;
mod composer;
