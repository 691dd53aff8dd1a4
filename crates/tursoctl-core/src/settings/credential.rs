//! Token storage with optional keyring support
//!
//! The control-plane token can live in the settings file as:
//! - a plaintext value
//! - a `keyring:<key>` reference (requires the `secure-storage` feature)
//! - a `${VAR}` reference expanded from the environment
//!
//! `TURSO_API_TOKEN` always takes precedence over the stored value.

use super::error::{Result, SettingsError};
use std::env;
use tracing::debug;

/// Prefix that indicates a value should be retrieved from the keyring
const KEYRING_PREFIX: &str = "keyring:";

/// Environment variable overriding the stored token
pub const TOKEN_ENV_VAR: &str = "TURSO_API_TOKEN";

/// Service name for keyring entries
#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "turso";

/// Resolves the control-plane token from the environment or the settings file
#[derive(Debug, Clone, Default)]
pub struct CredentialStore;

impl CredentialStore {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the bearer token.
    ///
    /// Resolution order:
    /// 1. `TURSO_API_TOKEN` environment variable
    /// 2. `keyring:` reference in the stored value
    /// 3. `${VAR}` expansion of the stored value
    ///
    /// A missing or empty result is [`SettingsError::NotLoggedIn`].
    pub fn resolve_token(&self, stored: Option<&str>) -> Result<String> {
        if let Ok(token) = env::var(TOKEN_ENV_VAR)
            && !token.is_empty()
        {
            debug!("Using token from {}", TOKEN_ENV_VAR);
            return Ok(token);
        }

        let stored = stored.ok_or(SettingsError::NotLoggedIn)?;
        let token = self.get_credential(stored)?;
        if token.trim().is_empty() {
            return Err(SettingsError::NotLoggedIn);
        }
        Ok(token)
    }

    /// Resolve a single stored credential value
    pub fn get_credential(&self, value: &str) -> Result<String> {
        if let Some(key) = value.strip_prefix(KEYRING_PREFIX) {
            #[cfg(feature = "secure-storage")]
            {
                let entry = keyring::Entry::new(SERVICE_NAME, key)
                    .map_err(|e| SettingsError::KeyringError(e.to_string()))?;
                return entry.get_password().map_err(|e| {
                    SettingsError::KeyringError(format!(
                        "Failed to retrieve credential '{}' from keyring: {}",
                        key, e
                    ))
                });
            }
            #[cfg(not(feature = "secure-storage"))]
            {
                return Err(SettingsError::CredentialError(format!(
                    "Credential '{}' references keyring but secure-storage feature is not enabled",
                    key
                )));
            }
        }

        shellexpand::env(value)
            .map(|expanded| expanded.into_owned())
            .map_err(|e| SettingsError::CredentialError(e.to_string()))
    }
}
