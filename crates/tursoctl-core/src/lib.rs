//! # tursoctl-core
//!
//! Region-aware provisioning and replication logic behind the `turso` CLI.
//!
//! ## Layers
//!
//! - [`client`] - typed control-plane HTTP client
//! - [`regions`] - region catalog, closest-region probing, location names
//! - [`catalog`] / [`cache`] - live database lookups and the local name cache
//! - [`workflows`] - create, replicate, and destroy
//! - [`settings`] - the local settings file, injected as a [`SettingsRepository`]
//!
//! The CLI owns everything presentational: spinners, prompts, and tables are
//! driven from [`ProgressEvent`]s and returned values.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tursoctl_core::{ApiClient, FileSettingsStore, RegionResolver};
//! use tursoctl_core::workflows::{create_database, CreateDatabaseParams};
//!
//! let mut settings = FileSettingsStore::open_default()?;
//! let client = ApiClient::new(ApiClient::base_url_from_env(), token)?;
//! let resolver = RegionResolver::new(&client);
//!
//! let created = create_database(
//!     &client,
//!     &mut settings,
//!     &resolver,
//!     &CreateDatabaseParams::new(),
//!     None,
//! )
//! .await?;
//! ```

pub mod cache;
pub mod catalog;
pub mod client;
pub mod error;
pub mod names;
pub mod progress;
pub mod regions;
pub mod settings;
pub mod types;
pub mod workflows;

pub use cache::NameCache;
pub use catalog::DatabaseCatalog;
pub use client::ApiClient;
pub use error::{CoreError, Result};
pub use progress::{ProgressCallback, ProgressEvent};
pub use regions::{RegionResolver, RegionSource, ResolvedRegion, to_location};
pub use settings::{
    CredentialStore, DatabaseSettings, FileSettingsStore, Settings, SettingsError,
    SettingsRepository,
};
pub use types::{Database, DatabaseType, Image, Instance};
