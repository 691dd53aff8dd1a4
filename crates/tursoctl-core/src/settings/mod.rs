//! Local settings for the turso CLI
//!
// Allow nested settings module - this is intentional for the settings subsystem

#![allow(clippy::module_inception)]
//!
//! The settings file holds everything the CLI remembers between invocations:
//!
//! - The bearer token used against the control plane
//! - A cache of known primary database names (used by completion and name checks)
//! - Connection settings for every database or replica created from this machine
//!
//! Orchestration code never touches the file directly. It receives a
//! [`SettingsRepository`] and reads/writes through it.

pub mod credential;
pub mod error;
pub mod settings;

// Re-export main types for convenience
pub use credential::CredentialStore;
pub use error::{Result, SettingsError};
pub use settings::{DatabaseSettings, FileSettingsStore, Settings, SettingsRepository};
