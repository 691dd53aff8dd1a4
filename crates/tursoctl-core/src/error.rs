//! Unified error handling for tursoctl-core
//!
//! Every remote call is attempted exactly once; errors carry the operation and
//! target they came from so the CLI can report them without extra wrapping.
//!
//! # Example
//!
//! ```rust
//! use tursoctl_core::CoreError;
//!
//! let err = CoreError::RemoteRequestFailed {
//!     operation: "destroy database".to_string(),
//!     target: "app1".to_string(),
//!     status: 404,
//!     message: String::new(),
//! };
//! assert!(err.is_not_found());
//! assert_eq!(err.status(), Some(404));
//! ```

use crate::settings::SettingsError;
use thiserror::Error;

/// Core error type for region resolution and database workflows
#[derive(Error, Debug)]
pub enum CoreError {
    /// User-specified region is not in the region catalog
    #[error("region '{region}' is not a valid one")]
    InvalidRegion { region: String },

    /// Closest-region probe failed. Only ever reported as a fallback reason.
    #[error("could not determine the closest region: {0}")]
    ProbeFailed(String),

    /// Source database could not be looked up. Either it does not exist or
    /// the stored token is no longer accepted; the API does not tell us which.
    #[error("database '{name}' not found or your session has expired")]
    NotAuthenticatedOrNotFound { name: String },

    /// Database record was created but its first instance was not
    #[error("failed to create instance for database {database}: {source}")]
    InstanceCreationFailed {
        database: String,
        #[source]
        source: Box<CoreError>,
    },

    /// Response body did not match the expected schema
    #[error("malformed response to {operation}: {message}")]
    MalformedResponse { operation: String, message: String },

    /// Control plane answered with a non-2xx status
    #[error("{operation} '{target}' failed with HTTP {status}{}", fmt_message(.message))]
    RemoteRequestFailed {
        operation: String,
        target: String,
        status: u16,
        message: String,
    },

    /// Request never produced a response
    #[error("{operation} '{target}': {source}")]
    Transport {
        operation: String,
        target: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local settings could not be read
    #[error("could not read local settings: {0}")]
    LocalSettingsUnreadable(#[source] SettingsError),

    /// Local settings could not be written
    #[error("could not update local settings: {0}")]
    Settings(#[from] SettingsError),

    /// Replication needs the source's password, which only lives locally
    #[error("no local credentials for database '{name}'")]
    MissingLocalCredentials { name: String },

    /// Invalid input to a workflow
    #[error("Validation error: {0}")]
    Validation(String),
}

fn fmt_message(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {}", message)
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// HTTP status carried by the error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::RemoteRequestFailed { status, .. } => Some(*status),
            CoreError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            CoreError::InstanceCreationFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotAuthenticatedOrNotFound { .. }) || self.status() == Some(404)
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            CoreError::NotAuthenticatedOrNotFound { .. }
                | CoreError::Settings(SettingsError::NotLoggedIn)
                | CoreError::LocalSettingsUnreadable(SettingsError::NotLoggedIn)
        ) || matches!(self.status(), Some(401) | Some(403))
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Returns true if this is a bad request error (400) or local validation
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_) | CoreError::InvalidRegion { .. }
        ) || self.status() == Some(400)
    }
}
