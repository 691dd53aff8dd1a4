//! Region catalog, closest-region probing, and region display names
//!
//! Region listing and probing both degrade instead of failing:
//!
//! - [`list_region_ids`] returns an empty list when the catalog is unreachable,
//!   and an empty list means "every region is valid".
//! - [`RegionResolver::closest_region`] falls back to [`FALLBACK_REGION_ID`]
//!   whenever the probe cannot be used.

use crate::client::ApiClient;
use crate::error::{CoreError, Result};
use crate::types::ProbeResponse;
use tracing::{debug, warn};

/// The fallback region ID to use if we are unable to probe the closest region
pub const FALLBACK_REGION_ID: &str = "ams";

/// Default closest-region probe endpoint
pub const DEFAULT_PROBE_URL: &str = "https://chisel-region.fly.dev";

/// Environment variable overriding the probe endpoint
pub const PROBE_URL_ENV_VAR: &str = "TURSO_REGION_PROBE_URL";

/// Valid region identifiers, or an empty list if they cannot be fetched.
///
/// Callers must read an empty list as "no restriction", never as "no regions".
pub async fn list_region_ids(client: &ApiClient) -> Vec<String> {
    match client.list_regions().await {
        Ok(ids) => ids,
        Err(e) => {
            debug!("Region catalog unavailable, not restricting regions: {}", e);
            Vec::new()
        }
    }
}

/// Whether `region` is acceptable given a catalog snapshot
pub fn is_valid_region(region_ids: &[String], region: &str) -> bool {
    region_ids.is_empty() || region_ids.iter().any(|id| id == region)
}

/// How a region was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSource {
    /// Given explicitly and validated against the catalog
    Requested,
    /// Answered by the closest-region probe
    Probed,
    /// Probe unusable; the reason is the probe failure
    Fallback { reason: String },
}

/// Outcome of region resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRegion {
    pub id: String,
    pub source: RegionSource,
}

impl ResolvedRegion {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RegionSource::Fallback { .. })
    }

    /// Probe failure that led to the fallback, if any
    pub fn fallback_reason(&self) -> Option<&str> {
        match &self.source {
            RegionSource::Fallback { reason } => Some(reason),
            _ => None,
        }
    }

    fn fallback(reason: CoreError) -> Self {
        let reason = reason.to_string();
        warn!("{}; defaulting to region {}", reason, FALLBACK_REGION_ID);
        Self {
            id: FALLBACK_REGION_ID.to_string(),
            source: RegionSource::Fallback { reason },
        }
    }
}

/// Picks the region a new database or replica should go to
pub struct RegionResolver<'a> {
    client: &'a ApiClient,
    probe: reqwest::Client,
    probe_url: String,
}

impl<'a> RegionResolver<'a> {
    /// Resolver using the probe URL from `TURSO_REGION_PROBE_URL` or the default
    pub fn new(client: &'a ApiClient) -> Self {
        let probe_url = match std::env::var(PROBE_URL_ENV_VAR) {
            Ok(url) if !url.is_empty() => url,
            _ => DEFAULT_PROBE_URL.to_string(),
        };
        Self::with_probe_url(client, probe_url)
    }

    pub fn with_probe_url(client: &'a ApiClient, probe_url: impl Into<String>) -> Self {
        Self {
            client,
            probe: reqwest::Client::new(),
            probe_url: probe_url.into(),
        }
    }

    /// Validate `requested`, or probe for the closest region when it is empty.
    ///
    /// Only an explicitly requested region can fail (with `InvalidRegion`);
    /// probing always produces a region.
    pub async fn resolve(&self, requested: Option<&str>) -> Result<ResolvedRegion> {
        match requested.filter(|r| !r.is_empty()) {
            Some(region) => {
                self.validate(region).await?;
                Ok(ResolvedRegion {
                    id: region.to_string(),
                    source: RegionSource::Requested,
                })
            }
            None => Ok(self.closest_region().await),
        }
    }

    /// Fail with `InvalidRegion` unless the catalog accepts `region`
    pub async fn validate(&self, region: &str) -> Result<()> {
        let ids = list_region_ids(self.client).await;
        if is_valid_region(&ids, region) {
            Ok(())
        } else {
            Err(CoreError::InvalidRegion {
                region: region.to_string(),
            })
        }
    }

    /// Ask the probe for the closest region. Never fails.
    pub async fn closest_region(&self) -> ResolvedRegion {
        let probed = match self.probe_server().await {
            Ok(region) => region,
            Err(e) => return ResolvedRegion::fallback(e),
        };

        // The probe knows regions that are not available for provisioning
        let ids = list_region_ids(self.client).await;
        if !is_valid_region(&ids, &probed) {
            return ResolvedRegion::fallback(CoreError::ProbeFailed(format!(
                "probed region '{}' is not available",
                probed
            )));
        }

        debug!("Closest region is {}", probed);
        ResolvedRegion {
            id: probed,
            source: RegionSource::Probed,
        }
    }

    async fn probe_server(&self) -> Result<String> {
        let response = self
            .probe
            .get(&self.probe_url)
            .send()
            .await
            .map_err(|e| CoreError::ProbeFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::ProbeFailed(format!(
                "probe answered HTTP {}",
                response.status().as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CoreError::ProbeFailed(e.to_string()))?;
        let probe: ProbeResponse = serde_json::from_slice(&body)
            .map_err(|e| CoreError::ProbeFailed(format!("unexpected probe answer: {}", e)))?;
        Ok(probe.server)
    }
}

/// Human-readable location of a region. Unknown codes are shown as-is.
pub fn to_location(region_id: &str) -> String {
    let location = match region_id {
        "ams" => "Amsterdam, Netherlands",
        "cdg" => "Paris, France",
        "den" => "Denver, Colorado (US)",
        "dfw" => "Dallas, Texas (US)",
        "ewr" => "Secaucus, NJ (US)",
        "fra" => "Frankfurt, Germany",
        "gru" => "São Paulo, Brazil",
        "hkg" => "Hong Kong, Hong Kong",
        "iad" => "Ashburn, Virginia (US)",
        "jnb" => "Johannesburg, South Africa",
        "lax" => "Los Angeles, California (US)",
        "lhr" => "London, United Kingdom",
        "maa" => "Chennai (Madras), India",
        "mad" => "Madrid, Spain",
        "mia" => "Miami, Florida (US)",
        "nrt" => "Tokyo, Japan",
        "ord" => "Chicago, Illinois (US)",
        "otp" => "Bucharest, Romania",
        "scl" => "Santiago, Chile",
        "sea" => "Seattle, Washington (US)",
        "sin" => "Singapore",
        "sjc" => "Sunnyvale, California (US)",
        "syd" => "Sydney, Australia",
        "waw" => "Warsaw, Poland",
        "yul" => "Montreal, Canada",
        "yyz" => "Toronto, Canada",
        _ => return format!("Region ID: {}", region_id),
    };
    location.to_string()
}

/// `"<location> (<code>)"`, as shown in progress messages
pub fn region_text(region_id: &str) -> String {
    format!("{} ({})", to_location(region_id), region_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &[&str] = &[
        "ams", "cdg", "den", "dfw", "ewr", "fra", "gru", "hkg", "iad", "jnb", "lax", "lhr", "maa",
        "mad", "mia", "nrt", "ord", "otp", "scl", "sea", "sin", "sjc", "syd", "waw", "yul", "yyz",
    ];

    #[test]
    fn test_known_regions_have_locations() {
        for code in KNOWN {
            let location = to_location(code);
            assert!(!location.is_empty());
            assert!(!location.starts_with("Region ID"), "{code} missing");
            assert_eq!(location, to_location(code));
        }
        assert_eq!(to_location("gru"), "São Paulo, Brazil");
    }

    #[test]
    fn test_unknown_region_location() {
        assert_eq!(to_location("xyz"), "Region ID: xyz");
        assert_eq!(to_location(""), "Region ID: ");
    }

    #[test]
    fn test_region_text() {
        assert_eq!(region_text("fra"), "Frankfurt, Germany (fra)");
    }

    #[test]
    fn test_empty_catalog_accepts_anything() {
        assert!(is_valid_region(&[], "anything"));
    }

    #[test]
    fn test_catalog_membership() {
        let ids = vec!["ams".to_string(), "gru".to_string()];
        assert!(is_valid_region(&ids, "gru"));
        assert!(is_valid_region(&ids, "gru"));
        assert!(!is_valid_region(&ids, "fra"));
    }
}
