//! Remote records and wire schemas for the control plane

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend representation of a database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// Directly provisioned physical database
    Primary,
    /// Database composed of named instances
    Logical,
    /// Physical copy of a primary in another region
    Replica,
    /// Anything the client does not know about yet
    #[serde(untagged)]
    Other(String),
}

impl DatabaseType {
    pub fn as_str(&self) -> &str {
        match self {
            DatabaseType::Primary => "primary",
            DatabaseType::Logical => "logical",
            DatabaseType::Replica => "replica",
            DatabaseType::Other(other) => other,
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A database as listed by the control plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(rename = "DbId")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub db_type: DatabaseType,
    #[serde(rename = "Hostname", default)]
    pub hostname: String,
    #[serde(default)]
    pub regions: Vec<String>,
}

impl Database {
    pub fn is_primary(&self) -> bool {
        self.db_type == DatabaseType::Primary
    }

    pub fn is_logical(&self) -> bool {
        self.db_type == DatabaseType::Logical
    }

    /// Regions in display order
    pub fn sorted_regions(&self) -> Vec<String> {
        let mut regions = self.regions.clone();
        regions.sort();
        regions
    }
}

/// A regional deployment unit of a logical database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instance_type: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

/// Database server image to deploy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Image {
    #[default]
    Latest,
    Canary,
}

impl Image {
    pub fn from_canary_flag(canary: bool) -> Self {
        if canary { Image::Canary } else { Image::Latest }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Image::Latest => "latest",
            Image::Canary => "canary",
        }
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Image {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// --- request bodies ---

#[derive(Debug, Serialize)]
pub(crate) struct CreateDatabaseRequest<'a> {
    pub name: &'a str,
    pub region: &'a str,
    pub image: Image,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateInstanceRequest<'a> {
    pub password: &'a str,
    pub region: &'a str,
    pub image: Image,
}

/// Body for both replica endpoints
#[derive(Debug, Serialize)]
pub(crate) struct CreateReplicaRequest<'a> {
    pub name: &'a str,
    pub region: &'a str,
    pub image: Image,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub password: &'a str,
}

// --- response bodies ---

#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseList {
    pub databases: Vec<Database>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstanceList {
    pub instances: Vec<Instance>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegionList {
    pub ids: Vec<String>,
}

/// Response to creating a primary database
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDatabaseResponse {
    pub database: Database,
    pub username: String,
    pub password: String,
}

/// Response to creating an instance under a logical database
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInstanceResponse {
    pub instance: Instance,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogicalReplicaInstance {
    pub uuid: String,
}

/// Replica response when the source is a logical database
#[derive(Debug, Clone, Deserialize)]
pub struct LogicalReplicaResponse {
    pub instance: LogicalReplicaInstance,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhysicalReplicaDatabase {
    #[serde(rename = "DbId")]
    pub db_id: String,
    #[serde(rename = "Hostname")]
    pub hostname: String,
}

/// Replica response when the source is a physical database
#[derive(Debug, Clone, Deserialize)]
pub struct PhysicalReplicaResponse {
    pub database: PhysicalReplicaDatabase,
    pub username: String,
    pub password: String,
}

/// Closest-region probe answer
#[derive(Debug, Deserialize)]
pub(crate) struct ProbeResponse {
    #[serde(rename = "Server")]
    pub server: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_database_wire_names() {
        let db: Database = serde_json::from_value(json!({
            "DbId": "db-1",
            "Name": "app1",
            "Type": "logical",
            "Hostname": "app1-acme.turso.io",
            "regions": ["fra", "ams"]
        }))
        .unwrap();

        assert_eq!(db.id, "db-1");
        assert!(db.is_logical());
        assert_eq!(db.sorted_regions(), vec!["ams", "fra"]);
    }

    #[test]
    fn test_unknown_database_type_is_preserved() {
        let db: Database = serde_json::from_value(json!({
            "DbId": "db-2",
            "Name": "edge",
            "Type": "edge-cache"
        }))
        .unwrap();

        assert_eq!(db.db_type, DatabaseType::Other("edge-cache".to_string()));
        assert_eq!(db.db_type.to_string(), "edge-cache");
        assert!(db.regions.is_empty());
    }

    #[test]
    fn test_replica_request_body() {
        let body = CreateReplicaRequest {
            name: "app1",
            region: "fra",
            image: Image::from_canary_flag(true),
            kind: "replica",
            password: "pw",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "name": "app1",
                "region": "fra",
                "image": "canary",
                "type": "replica",
                "password": "pw"
            })
        );
    }

    #[test]
    fn test_physical_replica_response_requires_hostname() {
        let result: Result<PhysicalReplicaResponse, _> = serde_json::from_value(json!({
            "database": {"DbId": "db-9"},
            "username": "u",
            "password": "p"
        }));
        assert!(result.is_err());
    }
}
