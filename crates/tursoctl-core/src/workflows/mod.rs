//! Database workflows - multi-step operations
//!
//! These compose control-plane calls with region resolution, local settings
//! updates, and name cache maintenance.

pub mod create;
pub mod destroy;
pub mod params;
pub mod replicate;

pub use create::{CreatedDatabase, create_database};
pub use destroy::destroy;
pub use params::{CreateDatabaseParams, DestroyTarget, ReplicateParams};
pub use replicate::{ReplicaShape, replicate_database};
