//! Error types for the turso CLI
//!
//! Core errors are mapped onto user-facing variants, each printed as a
//! cargo-style diagnostic with tips on how to recover.

use colored::Colorize;
use thiserror::Error;
use tursoctl_core::{CoreError, SettingsError};

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: database 'app1' not found or your session has expired
///
///   tip: log in again:
///       turso auth login
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    /// Add a detail line below the error message.
    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    #[cfg(test)]
    fn render_plain(&self) -> String {
        let mut out = format!("error: {}\n", self.message);
        if let Some(detail) = &self.detail {
            out.push_str(&format!("  {}\n", detail));
        }
        for (description, commands) in &self.tips {
            out.push_str(&format!("\n  tip: {}\n", description));
            for cmd in commands {
                out.push_str(&format!("      {}\n", cmd));
            }
        }
        out
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the turso CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("You are not logged in")]
    NotLoggedIn,

    #[error("Could not read local settings: {message}")]
    SettingsUnreadable { message: String },

    #[error("Could not update local settings: {message}")]
    SettingsUnwritable { message: String },

    #[error("Database '{name}' not found")]
    DatabaseNotFound { name: String },

    #[error("Database '{name}' not found or your session has expired")]
    NotAuthenticatedOrNotFound { name: String },

    #[error("Region '{region}' is not a valid one")]
    InvalidRegion { region: String },

    #[error("Database '{database}' was created but its first instance was not: {message}")]
    InstanceCreationFailed { database: String, message: String },

    #[error("No local credentials for database '{name}'")]
    MissingLocalCredentials { name: String },

    #[error("API error: {message}")]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    fn diagnostic(&self) -> CliDiagnostic {
        let diag = CliDiagnostic::error(&self.to_string());
        match self {
            CliError::NotLoggedIn => diag
                .tip("log in first:", &["turso auth login"])
                .tip(
                    "or provide a token through the environment:",
                    &["export TURSO_API_TOKEN=<token>"],
                ),
            CliError::SettingsUnreadable { .. } | CliError::SettingsUnwritable { .. } => diag
                .tip("point to another settings file:", &["turso --settings-file <path> ..."]),
            CliError::DatabaseNotFound { .. } => {
                diag.tip("list the databases you own:", &["turso db list"])
            }
            CliError::NotAuthenticatedOrNotFound { .. } => diag
                .tip("log in again if your session expired:", &["turso auth login"])
                .tip("check the database name:", &["turso db list"]),
            CliError::InvalidRegion { .. } => {
                diag.tip("list the available regions:", &["turso db regions"])
            }
            CliError::InstanceCreationFailed { database, .. } => {
                let destroy = format!("turso db destroy {} --yes", database);
                diag.detail("The database record was kept.")
                    .tip("remove it before trying again:", &[destroy.as_str()])
            }
            CliError::MissingLocalCredentials { .. } => diag
                .detail("The password of a database is only known to the machine that created it.")
                .tip("replicate from the machine that created the database", &[]),
            CliError::ApiError {
                status: Some(status),
                ..
            } if *status >= 500 => diag.tip("the service may be unavailable; try again later", &[]),
            CliError::ConnectionError { .. } => diag
                .tip("check network connectivity", &[])
                .tip("verify the API endpoint (TURSO_API_BASEURL) is correct", &[]),
            _ => diag,
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        self.diagnostic().print();
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::NotLoggedIn => CliError::NotLoggedIn,
            SettingsError::LoadError { .. } | SettingsError::ParseError(_) => {
                CliError::SettingsUnreadable {
                    message: err.to_string(),
                }
            }
            _ => CliError::SettingsUnwritable {
                message: err.to_string(),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidRegion { region } => CliError::InvalidRegion { region },
            CoreError::NotAuthenticatedOrNotFound { name } => {
                CliError::NotAuthenticatedOrNotFound { name }
            }
            CoreError::InstanceCreationFailed { database, source } => {
                CliError::InstanceCreationFailed {
                    database,
                    message: source.to_string(),
                }
            }
            CoreError::MissingLocalCredentials { name } => {
                CliError::MissingLocalCredentials { name }
            }
            CoreError::LocalSettingsUnreadable(e) => CliError::SettingsUnreadable {
                message: e.to_string(),
            },
            CoreError::Settings(e) => CliError::from(e),
            CoreError::Validation(message) => CliError::InvalidInput { message },
            CoreError::Transport { .. } => CliError::ConnectionError {
                message: err.to_string(),
            },
            CoreError::RemoteRequestFailed { status, .. } => CliError::ApiError {
                message: err.to_string(),
                status: Some(status),
            },
            CoreError::MalformedResponse { .. } | CoreError::ProbeFailed(_) => {
                CliError::ApiError {
                    message: err.to_string(),
                    status: None,
                }
            }
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::OutputError {
            message: format!("{:#}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_or_expired_suggests_login() {
        let err = CliError::from(CoreError::NotAuthenticatedOrNotFound {
            name: "app1".to_string(),
        });
        let rendered = err.diagnostic().render_plain();

        assert!(
            rendered.starts_with("error: Database 'app1' not found or your session has expired")
        );
        assert!(rendered.contains("turso auth login"));
        assert!(rendered.contains("turso db list"));
    }

    #[test]
    fn test_instance_failure_suggests_cleanup() {
        let err = CliError::from(CoreError::InstanceCreationFailed {
            database: "app1".to_string(),
            source: Box::new(CoreError::Validation("boom".to_string())),
        });
        let rendered = err.diagnostic().render_plain();

        assert!(rendered.contains("The database record was kept."));
        assert!(rendered.contains("turso db destroy app1 --yes"));
    }

    #[test]
    fn test_remote_status_is_kept() {
        let err = CliError::from(CoreError::RemoteRequestFailed {
            operation: "create database".to_string(),
            target: "app1".to_string(),
            status: 503,
            message: String::new(),
        });
        assert!(matches!(err, CliError::ApiError { status: Some(503), .. }));
        assert!(err.to_string().contains("HTTP 503"));
        assert!(err.diagnostic().render_plain().contains("try again later"));
    }

    #[test]
    fn test_settings_errors() {
        assert!(matches!(
            CliError::from(SettingsError::NotLoggedIn),
            CliError::NotLoggedIn
        ));
        assert!(matches!(
            CliError::from(CoreError::Settings(SettingsError::SettingsDirError)),
            CliError::SettingsUnwritable { .. }
        ));
        assert!(matches!(
            CliError::from(CoreError::LocalSettingsUnreadable(SettingsError::SettingsDirError)),
            CliError::SettingsUnreadable { .. }
        ));
    }

    #[test]
    fn test_validation_is_invalid_input() {
        let err = CliError::from(CoreError::Validation("bad".to_string()));
        assert!(matches!(err, CliError::InvalidInput { ref message } if message == "bad"));
    }
}
