//! Replicating a database into another region
//!
//! The control plane has two database shapes and each one replicates
//! differently:
//!
//! | Source type | Endpoint                              | New settings key | Host            |
//! |-------------|---------------------------------------|------------------|-----------------|
//! | `logical`   | `POST /v2/databases/{name}/instances` | `instance.uuid`  | source hostname |
//! | other       | `POST /v1/databases`                  | `database.DbId`  | `database.Hostname` |
//!
//! The response schema is chosen from the source type before the request is
//! sent, so a body of the wrong shape fails to decode as `MalformedResponse`.

use std::time::Instant;

use crate::cache::NameCache;
use crate::catalog::DatabaseCatalog;
use crate::client::{ApiClient, instances_path};
use crate::error::{CoreError, Result};
use crate::progress::{ProgressCallback, ProgressEvent, emit};
use crate::regions::{is_valid_region, list_region_ids};
use crate::settings::{DatabaseSettings, SettingsRepository};
use crate::types::{
    CreateReplicaRequest, Database, DatabaseType, LogicalReplicaResponse, PhysicalReplicaResponse,
};
use tracing::{debug, info};

use super::params::ReplicateParams;

const OPERATION: &str = "replicate database";

/// How a replica of a given source database is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicaShape {
    /// New instance under the logical parent
    Logical,
    /// New top-level database record of type `replica`
    Physical,
}

impl ReplicaShape {
    pub fn of(db_type: &DatabaseType) -> Self {
        match db_type {
            DatabaseType::Logical => ReplicaShape::Logical,
            _ => ReplicaShape::Physical,
        }
    }

    /// API path the replica request goes to
    pub fn path(&self, source_name: &str) -> String {
        match self {
            ReplicaShape::Logical => instances_path(source_name),
            ReplicaShape::Physical => "/v1/databases".to_string(),
        }
    }
}

/// Remote identity of a freshly created replica
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReplicaIdentity {
    id: String,
    host: String,
    username: String,
    password: String,
}

/// Send the replica request with the schema matching `shape`
async fn request_replica(
    client: &ApiClient,
    source: &Database,
    shape: ReplicaShape,
    body: &CreateReplicaRequest<'_>,
) -> Result<ReplicaIdentity> {
    let path = shape.path(&source.name);
    debug!("Replicating {} ({:?}) via {}", source.name, shape, path);

    match shape {
        ReplicaShape::Logical => {
            let response: LogicalReplicaResponse = client
                .post_json(&path, body, OPERATION, &source.name)
                .await?;
            Ok(ReplicaIdentity {
                id: response.instance.uuid,
                host: source.hostname.clone(),
                username: response.username,
                password: response.password,
            })
        }
        ReplicaShape::Physical => {
            let response: PhysicalReplicaResponse = client
                .post_json(&path, body, OPERATION, &source.name)
                .await?;
            Ok(ReplicaIdentity {
                id: response.database.db_id,
                host: response.database.hostname,
                username: response.username,
                password: response.password,
            })
        }
    }
}

/// Create a replica of an existing database in `params.region`
///
/// The replica reuses the source's password, which is read from local
/// settings. On success the new connection settings are stored under the
/// replica's id, the name cache is invalidated, and the settings are returned.
pub async fn replicate_database(
    client: &ApiClient,
    settings: &mut dyn SettingsRepository,
    params: &ReplicateParams,
    on_progress: Option<ProgressCallback>,
) -> Result<DatabaseSettings> {
    if params.name.is_empty() {
        return Err(CoreError::Validation(
            "a database name is required to replicate it".to_string(),
        ));
    }
    if params.region.is_empty() {
        return Err(CoreError::Validation(
            "a region ID is required to replicate a database".to_string(),
        ));
    }

    let region_ids = list_region_ids(client).await;
    if !is_valid_region(&region_ids, &params.region) {
        return Err(CoreError::InvalidRegion {
            region: params.region.clone(),
        });
    }

    let source = DatabaseCatalog::new(client).get(&params.name).await?;
    let password = settings
        .database_settings(&source.id)
        .map(|s| s.password.clone())
        .ok_or_else(|| CoreError::MissingLocalCredentials {
            name: source.name.clone(),
        })?;

    let body = CreateReplicaRequest {
        name: &params.name,
        region: &params.region,
        image: params.image(),
        kind: "replica",
        password: &password,
    };

    emit(
        &on_progress,
        ProgressEvent::Replicating {
            name: params.name.clone(),
            region: params.region.clone(),
        },
    );
    let start = Instant::now();
    let shape = ReplicaShape::of(&source.db_type);
    let replica = request_replica(client, &source, shape, &body).await?;
    let elapsed = start.elapsed();

    let db_settings = DatabaseSettings {
        name: source.name.clone(),
        host: replica.host,
        username: replica.username,
        password: replica.password,
    };
    settings.add_database(&replica.id, db_settings.clone())?;
    NameCache::new(settings).invalidate()?;

    info!(
        "Replicated database {} to {} as {}",
        params.name, params.region, replica.id
    );
    emit(
        &on_progress,
        ProgressEvent::Completed {
            name: params.name.clone(),
            region: params.region.clone(),
            elapsed,
        },
    );

    Ok(db_settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_dispatch() {
        assert_eq!(ReplicaShape::of(&DatabaseType::Logical), ReplicaShape::Logical);
        assert_eq!(ReplicaShape::of(&DatabaseType::Primary), ReplicaShape::Physical);
        assert_eq!(ReplicaShape::of(&DatabaseType::Replica), ReplicaShape::Physical);
        assert_eq!(
            ReplicaShape::of(&DatabaseType::Other("edge".to_string())),
            ReplicaShape::Physical
        );
    }

    #[test]
    fn test_shape_paths() {
        assert_eq!(
            ReplicaShape::Logical.path("app1"),
            "/v2/databases/app1/instances"
        );
        assert_eq!(ReplicaShape::Physical.path("app1"), "/v1/databases");
    }
}
