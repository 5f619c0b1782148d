//! Core types shared by every component operation
//!
//! - [`ComponentsError`] - enumerated failure modes
//! - [`ErrorContext`] - user-facing wrapper with details and suggestions
//! - [`Output`] - the status-message collaborator helpers report through
//!
//! # Error Handling Pattern
//!
//! ```rust,no_run
//! use components_cli::core::{ComponentsError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<()> {
//!     Err(ComponentsError::GitNotFound.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod error;
pub mod output;

pub use error::{ComponentsError, ErrorContext, user_friendly_error};
pub use output::{ConsoleOutput, Output, RecordingOutput};
