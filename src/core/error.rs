//! Error handling for components
//!
//! This module provides the error types and user-friendly error reporting for the
//! component tooling. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`ComponentsError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! # Error Categories
//!
//! - **Manifest translation**: [`ComponentsError::UnsupportedSubstitutionSource`],
//!   [`ComponentsError::InvalidCoordinate`]
//! - **Descriptor**: [`ComponentsError::IncompleteDescriptor`],
//!   [`ComponentsError::DescriptorNotFound`], [`ComponentsError::DescriptorParseError`]
//! - **Change logs**: [`ComponentsError::ChangelogVersionMissing`]
//! - **Git and network**: [`ComponentsError::GitCommandError`], [`ComponentsError::NetworkError`]
//!
//! Common library errors are converted automatically:
//! - [`serde_yaml::Error`] → [`ComponentsError::YamlError`] (change logs)
//! - [`serde_json::Error`] → [`ComponentsError::JsonError`] (manifest output)
//! - [`toml::de::Error`] → [`ComponentsError::TomlError`] (configuration)
//!
//! # Examples
//!
//! ```rust,no_run
//! use components_cli::core::{ComponentsError, ErrorContext, user_friendly_error};
//!
//! let error = ComponentsError::IncompleteDescriptor {
//!     missing: vec!["license".to_string()],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for component operations
///
/// Each variant carries the context needed to explain the failure to a user.
/// Variants that wrap library errors are produced by `?` through the `#[from]`
/// conversions.
#[derive(Error, Debug)]
pub enum ComponentsError {
    /// A substitution entry names a replacement source other than Packagist
    ///
    /// Only Packagist replacements can be expressed in the generated manifest.
    /// The build is aborted and no `composer.json` is written.
    #[error("Substitute for '{coordinate}' uses unsupported source '{source_kind}'")]
    UnsupportedSubstitutionSource {
        /// The legacy coordinate that was being routed
        coordinate: String,
        /// The configured replacement source kind
        source_kind: String,
    },

    /// Required scalar fields are missing from the component descriptor
    #[error("Component descriptor is incomplete, missing: {}", .missing.join(", "))]
    IncompleteDescriptor {
        /// Names of the missing fields
        missing: Vec<String>,
    },

    /// A legacy dependency key is not of the form `<host>/<package>`
    #[error("Invalid dependency coordinate '{coordinate}', expected '<channel>/<package>'")]
    InvalidCoordinate {
        /// The offending coordinate
        coordinate: String,
    },

    /// The `.horde.yml` descriptor does not exist
    #[error("Component descriptor not found: {path}")]
    DescriptorNotFound {
        /// Path that was searched
        path: String,
    },

    /// The descriptor exists but is not valid YAML for a component
    #[error("Invalid component descriptor in {file}")]
    DescriptorParseError {
        /// The descriptor file
        file: String,
        /// Parser message
        reason: String,
    },

    /// `changelog.yml` has no entry for the current release
    #[error("No entry for version {version} in {file}")]
    ChangelogVersionMissing {
        /// The release looked up
        version: String,
        /// The change log file
        file: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Git operation failed during execution
    #[error("Git operation failed: {operation}")]
    GitCommandError {
        /// The git operation that failed (e.g. "log")
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// Git executable not found in PATH
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// Download or other HTTP failure
    #[error("Network error: {operation}")]
    NetworkError {
        /// What was being attempted
        operation: String,
        /// Underlying reason
        reason: String,
    },

    /// An operation that needs a local checkout was called on a remote component
    #[error("{operation} is not possible with a remote component")]
    RemoteComponent {
        /// The refused operation
        operation: String,
    },

    /// YAML parsing or serialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Suggestions are shown in green, details in yellow, the error itself in
/// bold red.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ComponentsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ComponentsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions
///
/// Known [`ComponentsError`] variants get tailored suggestions; anything else
/// is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<ComponentsError>() {
        Ok(components_error) => return create_error_context(components_error),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ComponentsError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership and permissions in the component directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ComponentsError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ComponentsError::Other {
        message,
    })
}

fn create_error_context(error: ComponentsError) -> ErrorContext {
    match &error {
        ComponentsError::UnsupportedSubstitutionSource {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Set 'source = \"Packagist\"' for this entry in [composer.pear-substitutes]")
            .with_details("Only Packagist replacements are implemented; no composer.json was written"),
        ComponentsError::IncompleteDescriptor {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Add the missing fields to .horde.yml")
            .with_details("name, version.release and license.identifier are required"),
        ComponentsError::InvalidCoordinate {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Write pear dependencies as 'channel/Package', e.g. 'pear.horde.org/Horde_Util'"),
        ComponentsError::DescriptorNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run the command from a component directory or pass --path"),
        ComponentsError::DescriptorParseError {
            reason,
            ..
        } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_details(reason)
                .with_suggestion("Check the YAML syntax of .horde.yml")
        }
        ComponentsError::ChangelogVersionMissing {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Add a section for the current release to changelog.yml"),
        ComponentsError::GitNotFound => ErrorContext::new(error)
            .with_suggestion("Install git from https://git-scm.com/ or use your package manager"),
        ComponentsError::GitCommandError {
            stderr,
            ..
        } => {
            let stderr = stderr.clone();
            ErrorContext::new(error).with_details(stderr)
        }
        ComponentsError::NetworkError {
            reason,
            ..
        } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_details(reason)
                .with_suggestion("Check your network connection or raise [remote] timeout")
        }
        ComponentsError::YamlError(_) => ErrorContext::new(error)
            .with_suggestion("Check the YAML syntax of doc/changelog.yml"),
        ComponentsError::TomlError(_)
        | ComponentsError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the syntax of your components config.toml"),
        _ => ErrorContext::new(error),
    }
}
