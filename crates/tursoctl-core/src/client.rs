//! Control-plane HTTP client
//!
//! Thin typed wrapper over the REST endpoints the workflows need. Every call
//! is made exactly once: there is no retry or timeout layer beyond reqwest's
//! defaults.

use crate::error::{CoreError, Result};
use crate::types::{
    CreateDatabaseRequest, CreateDatabaseResponse, CreateInstanceRequest, CreateInstanceResponse,
    Database, DatabaseList, Image, Instance, InstanceList, RegionList,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

/// Default control-plane endpoint
pub const DEFAULT_API_URL: &str = "https://api.chiseledge.com";

/// Environment variable overriding the control-plane endpoint
pub const API_URL_ENV_VAR: &str = "TURSO_API_BASEURL";

/// User agent string for turso HTTP requests
const TURSO_USER_AGENT: &str = concat!("turso/", env!("CARGO_PKG_VERSION"));

/// Authenticated control-plane client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create a client for `base_url` authenticating with `token`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(TURSO_USER_AGENT)
            .build()
            .map_err(|e| CoreError::Transport {
                operation: "build client".to_string(),
                target: "control plane".to_string(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Base URL from `TURSO_API_BASEURL`, falling back to the public endpoint
    pub fn base_url_from_env() -> String {
        match std::env::var(API_URL_ENV_VAR) {
            Ok(url) if !url.is_empty() => url,
            _ => DEFAULT_API_URL.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        trace!("{} {}", method, url);
        self.http.request(method, url).bearer_auth(&self.token)
    }

    /// Send a request and fail on transport errors or non-2xx statuses
    async fn send(
        &self,
        builder: RequestBuilder,
        operation: &str,
        target: &str,
    ) -> Result<Response> {
        let response = builder.send().await.map_err(|e| CoreError::Transport {
            operation: operation.to_string(),
            target: target.to_string(),
            source: e,
        })?;

        let status = response.status();
        debug!("{} '{}' -> {}", operation, target, status);
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CoreError::RemoteRequestFailed {
                operation: operation.to_string(),
                target: target.to_string(),
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }
        Ok(response)
    }

    /// Decode a successful response body into `T`
    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
        operation: &str,
        target: &str,
    ) -> Result<T> {
        let body = response.bytes().await.map_err(|e| CoreError::Transport {
            operation: operation.to_string(),
            target: target.to_string(),
            source: e,
        })?;
        serde_json::from_slice(&body).map_err(|e| CoreError::MalformedResponse {
            operation: operation.to_string(),
            message: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &str,
        target: &str,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::GET, path), operation, target)
            .await?;
        self.decode(response, operation, target).await
    }

    /// POST a JSON body and decode the JSON answer
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        operation: &str,
        target: &str,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).json(body), operation, target)
            .await?;
        self.decode(response, operation, target).await
    }

    async fn delete(&self, path: &str, operation: &str, target: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path), operation, target)
            .await?;
        Ok(())
    }

    /// List every database visible to the token
    pub async fn list_databases(&self) -> Result<Vec<Database>> {
        let list: DatabaseList = self.get_json("/v1/databases", "list databases", "*").await?;
        Ok(list.databases)
    }

    /// Create a primary database record
    pub async fn create_database(
        &self,
        name: &str,
        region: &str,
        image: Image,
    ) -> Result<CreateDatabaseResponse> {
        let body = CreateDatabaseRequest {
            name,
            region,
            image,
        };
        self.post_json("/v1/databases", &body, "create database", name)
            .await
    }

    /// Create an instance under a database
    pub async fn create_instance(
        &self,
        database: &str,
        password: &str,
        region: &str,
        image: Image,
    ) -> Result<Instance> {
        let body = CreateInstanceRequest {
            password,
            region,
            image,
        };
        let response: CreateInstanceResponse = self
            .post_json(
                &instances_path(database),
                &body,
                "create instance for database",
                database,
            )
            .await?;
        Ok(response.instance)
    }

    /// List the instances of a logical database
    pub async fn list_instances(&self, database: &str) -> Result<Vec<Instance>> {
        let list: InstanceList = self
            .get_json(
                &instances_path(database),
                "list instances of database",
                database,
            )
            .await?;
        Ok(list.instances)
    }

    /// Valid region identifiers
    pub async fn list_regions(&self) -> Result<Vec<String>> {
        let list: RegionList = self.get_json("/v2/regions", "list regions", "*").await?;
        Ok(list.ids)
    }

    /// Delete a database with all its regions and instances
    pub async fn delete_database(&self, name: &str) -> Result<()> {
        let path = format!("/v1/databases/{}", urlencoding::encode(name));
        self.delete(&path, "destroy database", name).await
    }

    /// Delete a database's footprint in one region
    pub async fn delete_region(&self, name: &str, region: &str) -> Result<()> {
        let path = format!(
            "/v1/databases/{}/regions/{}",
            urlencoding::encode(name),
            urlencoding::encode(region)
        );
        self.delete(&path, "destroy region of database", name).await
    }

    /// Delete a single instance of a logical database
    pub async fn delete_instance(&self, name: &str, instance: &str) -> Result<()> {
        let path = format!("{}/{}", instances_path(name), urlencoding::encode(instance));
        self.delete(&path, "destroy instance of database", name).await
    }
}

/// Instance collection path of a database
pub(crate) fn instances_path(database: &str) -> String {
    format!("/v2/databases/{}/instances", urlencoding::encode(database))
}
