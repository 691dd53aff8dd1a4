//! Error types for settings operations

use thiserror::Error;

/// Errors that can occur while reading or writing local settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings file {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save settings file {path}: {source}")]
    SaveError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse settings file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("User not logged in")]
    NotLoggedIn,

    #[error("Could not resolve stored token: {0}")]
    CredentialError(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    KeyringError(String),

    #[error("No home directory found for the settings file")]
    SettingsDirError,
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
