//! Destroying databases, regions, and instances
//!
//! Destruction leaves the name cache and local connection settings alone.
//! The next `db list` or cache miss picks up the change.

use crate::client::ApiClient;
use crate::error::{CoreError, Result};
use tracing::info;

use super::params::DestroyTarget;

/// Remove a database, one of its regions, or one of its instances
pub async fn destroy(client: &ApiClient, name: &str, target: &DestroyTarget) -> Result<()> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "a database name is required to destroy it".to_string(),
        ));
    }

    match target {
        DestroyTarget::Database { confirmed: false } => Err(CoreError::Validation(format!(
            "destroying database {} and all its replicas must be confirmed",
            name
        ))),
        DestroyTarget::Database { confirmed: true } => {
            client.delete_database(name).await?;
            info!("Destroyed database {}", name);
            Ok(())
        }
        DestroyTarget::Region(region) => {
            client.delete_region(name, region).await?;
            info!("Destroyed region {} of database {}", region, name);
            Ok(())
        }
        DestroyTarget::Instance(instance) => {
            client.delete_instance(name, instance).await?;
            info!("Destroyed instance {} of database {}", instance, name);
            Ok(())
        }
    }
}
