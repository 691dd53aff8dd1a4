//! Parameter structs for database workflows
//!
//! CLI flags map onto these one to one; nothing in the core reads global
//! state to find out what the user asked for.

use crate::types::Image;

/// Parameters for creating a database
///
/// # Example
///
/// ```rust
/// use tursoctl_core::workflows::CreateDatabaseParams;
///
/// let params = CreateDatabaseParams::new()
///     .with_name("app1")
///     .with_region("fra")
///     .with_canary(true);
/// assert_eq!(params.image().as_str(), "canary");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreateDatabaseParams {
    /// Database name; a random one is generated when empty
    pub name: Option<String>,
    /// Region ID; the closest region is probed when empty
    pub region: Option<String>,
    /// Deploy the canary image instead of latest
    pub canary: bool,
}

impl CreateDatabaseParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_canary(mut self, canary: bool) -> Self {
        self.canary = canary;
        self
    }

    pub fn image(&self) -> Image {
        Image::from_canary_flag(self.canary)
    }
}

/// Parameters for replicating a database
#[derive(Debug, Clone)]
pub struct ReplicateParams {
    /// Source database name (required)
    pub name: String,
    /// Target region ID (required)
    pub region: String,
    /// Deploy the canary image instead of latest
    pub canary: bool,
}

impl ReplicateParams {
    #[must_use]
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            canary: false,
        }
    }

    #[must_use]
    pub fn with_canary(mut self, canary: bool) -> Self {
        self.canary = canary;
        self
    }

    pub fn image(&self) -> Image {
        Image::from_canary_flag(self.canary)
    }
}

/// What `destroy` removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyTarget {
    /// The whole database with every region and instance.
    /// Irreversible, so it must be explicitly confirmed.
    Database { confirmed: bool },
    /// Only the footprint in one region
    Region(String),
    /// A single named instance
    Instance(String),
}

impl DestroyTarget {
    /// Pick the target the way the CLI flags do: instance beats region beats
    /// whole database.
    pub fn from_flags(instance: Option<&str>, region: Option<&str>, confirmed: bool) -> Self {
        if let Some(instance) = instance.filter(|i| !i.is_empty()) {
            return DestroyTarget::Instance(instance.to_string());
        }
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            return DestroyTarget::Region(region.to_string());
        }
        DestroyTarget::Database { confirmed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_flag() {
        assert_eq!(CreateDatabaseParams::new().image(), Image::Latest);
        assert_eq!(
            ReplicateParams::new("a", "fra").with_canary(true).image(),
            Image::Canary
        );
    }

    #[test]
    fn test_destroy_target_precedence() {
        assert_eq!(
            DestroyTarget::from_flags(Some("i1"), Some("fra"), true),
            DestroyTarget::Instance("i1".to_string())
        );
        assert_eq!(
            DestroyTarget::from_flags(Some(""), Some("fra"), false),
            DestroyTarget::Region("fra".to_string())
        );
        assert_eq!(
            DestroyTarget::from_flags(None, None, false),
            DestroyTarget::Database { confirmed: false }
        );
    }
}
