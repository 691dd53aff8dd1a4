//! Local cache of primary database names
//!
//! The cache only exists to avoid a listing call for shell completion and
//! quick name checks. It is either absent or a complete snapshot of the
//! primary names as of the last fetch. Workflows that change the remote set
//! of databases invalidate it; nothing correctness-sensitive reads it.

use crate::catalog::{DatabaseCatalog, primary_names};
use crate::settings::{Result, SettingsRepository};
use crate::types::Database;
use tracing::{debug, warn};

/// Name cache over an injected settings repository
pub struct NameCache<'s> {
    settings: &'s mut dyn SettingsRepository,
}

impl<'s> NameCache<'s> {
    pub fn new(settings: &'s mut dyn SettingsRepository) -> Self {
        Self { settings }
    }

    /// Cached snapshot, or `None` on a miss
    pub fn get(&self) -> Option<Vec<String>> {
        self.settings.db_names_cache()
    }

    /// Overwrite the snapshot
    pub fn set(&mut self, names: Vec<String>) -> Result<()> {
        self.settings.set_db_names_cache(names)
    }

    /// Clear the snapshot. Clearing an empty cache is a no-op.
    pub fn invalidate(&mut self) -> Result<()> {
        self.settings.invalidate_db_names_cache()
    }

    /// Store the primary names of a listing that was already fetched
    pub fn refresh_from(&mut self, databases: &[Database]) -> Result<()> {
        self.set(primary_names(databases))
    }

    /// Cached names, or a fresh listing of primary names on a miss.
    ///
    /// Never fails: a failed listing yields an empty list and leaves the
    /// cache cold, and a failed write is only logged. Meant for completion
    /// contexts where aborting is worse than an incomplete answer.
    pub async fn fetch_or_load(&mut self, catalog: &DatabaseCatalog<'_>) -> Vec<String> {
        if let Some(names) = self.get() {
            debug!("Name cache hit ({} names)", names.len());
            return names;
        }

        let databases = match catalog.list().await {
            Ok(databases) => databases,
            Err(e) => {
                debug!("Could not list databases for name cache: {}", e);
                return Vec::new();
            }
        };

        let names = primary_names(&databases);
        if let Err(e) = self.set(names.clone()) {
            warn!("Could not store database name cache: {}", e);
        }
        names
    }

    /// Existence check for a target name of any database type.
    ///
    /// A hit answers from the snapshot. The snapshot only holds primary
    /// names, so a miss is answered from one live listing that covers
    /// logical databases and replicas too; the snapshot is refreshed from
    /// that listing on the way. If the listing fails the check passes and
    /// the lookup that follows decides.
    pub async fn contains_or_refresh(&mut self, catalog: &DatabaseCatalog<'_>, name: &str) -> bool {
        if self.get().is_some_and(|names| names.iter().any(|n| n == name)) {
            return true;
        }

        let databases = match catalog.list().await {
            Ok(databases) => databases,
            Err(e) => {
                debug!("Could not list databases to check '{}': {}", name, e);
                return true;
            }
        };

        if let Err(e) = self.refresh_from(&databases) {
            warn!("Could not store database name cache: {}", e);
        }
        databases.iter().any(|db| db.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_set_get_invalidate() {
        let mut settings = Settings::default();
        let mut cache = NameCache::new(&mut settings);

        assert_eq!(cache.get(), None);
        cache.set(vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(cache.get(), Some(vec!["a".to_string(), "b".to_string()]));

        cache.invalidate().unwrap();
        assert_eq!(cache.get(), None);

        // Idempotent
        cache.invalidate().unwrap();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_empty_snapshot_is_still_a_hit() {
        let mut settings = Settings::default();
        let mut cache = NameCache::new(&mut settings);
        cache.set(vec![]).unwrap();
        assert_eq!(cache.get(), Some(vec![]));
    }
}
