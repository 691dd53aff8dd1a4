//! Settings and API client wiring for command handlers

use crate::error::Result as CliResult;
use std::path::Path;
use tracing::{debug, trace};
use tursoctl_core::{
    ApiClient, CoreError, CredentialStore, FileSettingsStore, SettingsRepository,
};

/// Owns the local settings store and hands out authenticated clients
pub struct ConnectionManager {
    store: FileSettingsStore,
    credentials: CredentialStore,
}

impl ConnectionManager {
    /// Open settings from `settings_file`, or the standard location when `None`
    pub fn open(settings_file: Option<&Path>) -> CliResult<Self> {
        let store = match settings_file {
            Some(path) => {
                debug!("Loading settings from explicit path: {:?}", path);
                FileSettingsStore::open(path)
            }
            None => {
                debug!("Loading settings from default location");
                FileSettingsStore::open_default()
            }
        }
        .map_err(CoreError::LocalSettingsUnreadable)?;

        Ok(Self {
            store,
            credentials: CredentialStore::new(),
        })
    }

    #[cfg(test)]
    fn from_store(store: FileSettingsStore) -> Self {
        Self {
            store,
            credentials: CredentialStore::new(),
        }
    }

    pub fn store(&self) -> &FileSettingsStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FileSettingsStore {
        &mut self.store
    }

    /// Build an API client with the resolved token.
    ///
    /// Fails with `NotLoggedIn` before any request is made when no token can
    /// be found.
    pub fn create_client(&self) -> CliResult<ApiClient> {
        let token = self.credentials.resolve_token(self.store.token())?;
        let base_url = ApiClient::base_url_from_env();
        trace!("API base URL: {}", base_url);
        Ok(ApiClient::new(base_url, token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_missing_token_is_not_logged_in() {
        unsafe {
            std::env::remove_var("TURSO_API_TOKEN");
        }
        let dir = TempDir::new().unwrap();
        let conn_mgr = ConnectionManager::open(Some(&dir.path().join("settings.toml"))).unwrap();

        assert!(matches!(
            conn_mgr.create_client(),
            Err(CliError::NotLoggedIn)
        ));
    }

    #[test]
    #[serial]
    fn test_stored_token_builds_client() {
        unsafe {
            std::env::remove_var("TURSO_API_TOKEN");
            std::env::remove_var("TURSO_API_BASEURL");
        }
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "token = \"tok\"\n").unwrap();

        let conn_mgr = ConnectionManager::from_store(FileSettingsStore::open(&path).unwrap());
        let client = conn_mgr.create_client().unwrap();
        assert_eq!(client.base_url(), "https://api.chiseledge.com");
    }

    #[test]
    fn test_corrupt_settings_are_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "token = [unclosed").unwrap();

        assert!(matches!(
            ConnectionManager::open(Some(&path)),
            Err(CliError::SettingsUnreadable { .. })
        ));
    }
}
