//! Provisioning a new primary database

use std::time::{Duration, Instant};

use crate::cache::NameCache;
use crate::client::ApiClient;
use crate::error::{CoreError, Result};
use crate::names;
use crate::progress::{ProgressCallback, ProgressEvent, emit};
use crate::regions::{RegionResolver, ResolvedRegion};
use crate::settings::{DatabaseSettings, SettingsRepository};
use crate::types::Database;
use tracing::info;

use super::params::CreateDatabaseParams;

/// Result of a successful create
#[derive(Debug, Clone)]
pub struct CreatedDatabase {
    pub database: Database,
    pub settings: DatabaseSettings,
    pub region: ResolvedRegion,
    pub elapsed: Duration,
}

/// Create a database and its first instance
///
/// Steps, each aborting the rest on failure:
/// 1. Pick a name (random when none given) and resolve the region
/// 2. Create the database record
/// 3. Create the first instance with the returned password
/// 4. Persist connection settings keyed by the new database id
/// 5. Invalidate the name cache
///
/// An instance failure after step 2 is reported as `InstanceCreationFailed`.
/// The database record is left in place; cleanup is up to the caller.
///
/// # Example
///
/// ```rust,ignore
/// use tursoctl_core::workflows::{create_database, CreateDatabaseParams};
/// use tursoctl_core::RegionResolver;
///
/// let resolver = RegionResolver::new(&client);
/// let params = CreateDatabaseParams::new().with_name("app1");
/// let created = create_database(&client, &mut settings, &resolver, &params, None).await?;
/// println!("{}", created.settings.url());
/// ```
pub async fn create_database(
    client: &ApiClient,
    settings: &mut dyn SettingsRepository,
    resolver: &RegionResolver<'_>,
    params: &CreateDatabaseParams,
    on_progress: Option<ProgressCallback>,
) -> Result<CreatedDatabase> {
    let name = match params.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => names::generate(),
    };

    let region = resolver.resolve(params.region.as_deref()).await?;
    emit(
        &on_progress,
        ProgressEvent::RegionResolved {
            region: region.id.clone(),
            fallback_reason: region.fallback_reason().map(str::to_string),
        },
    );

    let image = params.image();
    let start = Instant::now();

    emit(
        &on_progress,
        ProgressEvent::CreatingDatabase {
            name: name.clone(),
            region: region.id.clone(),
        },
    );
    let created = client.create_database(&name, &region.id, image).await?;

    emit(
        &on_progress,
        ProgressEvent::CreatingInstance {
            name: name.clone(),
            region: region.id.clone(),
        },
    );
    client
        .create_instance(&name, &created.password, &region.id, image)
        .await
        .map_err(|e| CoreError::InstanceCreationFailed {
            database: name.clone(),
            source: Box::new(e),
        })?;

    let elapsed = start.elapsed();
    let db_settings = DatabaseSettings {
        name: created.database.name.clone(),
        host: created.database.hostname.clone(),
        username: created.username,
        password: created.password,
    };

    settings.add_database(&created.database.id, db_settings.clone())?;
    NameCache::new(settings).invalidate()?;

    info!(
        "Created database {} ({}) in {} with image {}",
        name, created.database.id, region.id, image
    );
    emit(
        &on_progress,
        ProgressEvent::Completed {
            name,
            region: region.id.clone(),
            elapsed,
        },
    );

    Ok(CreatedDatabase {
        database: created.database,
        settings: db_settings,
        region,
        elapsed,
    })
}
