//! Live database lookups

use crate::client::ApiClient;
use crate::error::{CoreError, Result};
use crate::types::Database;
use tracing::debug;

/// Remote database listing: the source of truth behind the name cache
#[derive(Debug, Clone, Copy)]
pub struct DatabaseCatalog<'a> {
    client: &'a ApiClient,
}

impl<'a> DatabaseCatalog<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Database>> {
        self.client.list_databases().await
    }

    /// Look a database up by name
    pub async fn find(&self, name: &str) -> Result<Option<Database>> {
        let databases = self.list().await?;
        Ok(databases.into_iter().find(|db| db.name == name))
    }

    /// Look a database up by name, failing with `NotAuthenticatedOrNotFound`.
    ///
    /// A failed listing and a missing name are reported the same way: with an
    /// expired token the API cannot distinguish them either.
    pub async fn get(&self, name: &str) -> Result<Database> {
        match self.find(name).await {
            Ok(Some(db)) => Ok(db),
            Ok(None) => Err(CoreError::NotAuthenticatedOrNotFound {
                name: name.to_string(),
            }),
            Err(e) => {
                debug!("Lookup of database '{}' failed: {}", name, e);
                Err(CoreError::NotAuthenticatedOrNotFound {
                    name: name.to_string(),
                })
            }
        }
    }
}

/// Names of the `primary` databases in a listing, in listing order
pub fn primary_names(databases: &[Database]) -> Vec<String> {
    databases
        .iter()
        .filter(|db| db.is_primary())
        .map(|db| db.name.clone())
        .collect()
}
