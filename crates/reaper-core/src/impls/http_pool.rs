//! HTTP client for the pool service.

use std::fs;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::config::{PoolConnection, format_duration};
use crate::domain::{ConfigError, ReapError, ReapResult, ResourceState, ResourceType};
use crate::ports::PoolClient;

/// Owner name this client identifies itself with.
pub const CLIENT_OWNER: &str = "reaper";

#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: String,
}

/// HttpPoolClient talks to the pool service over HTTP.
///
/// `reset` maps to `POST {url}/reset?type=..&state=..&expire=..&dest=..`.
/// No retries: a failed call is reported and the next sweep tries again.
#[derive(Debug, Clone)]
pub struct HttpPoolClient {
    base_url: String,
    credentials: Option<Credentials>,
    http: reqwest::Client,
}

impl HttpPoolClient {
    /// Build a client, reading the password file if a username is set.
    pub fn new(connection: &PoolConnection) -> Result<Self, ConfigError> {
        let base_url = connection.url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(connection.url.clone()));
        }

        let credentials = match connection.username.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(username) => {
                let path = connection
                    .password_file
                    .as_ref()
                    .ok_or_else(|| ConfigError::MissingPasswordFile(username.to_string()))?;
                let password = fs::read_to_string(path).map_err(|source| {
                    ConfigError::PasswordFile {
                        path: path.clone(),
                        source,
                    }
                })?;
                Some(Credentials {
                    username: username.to_string(),
                    password: password.trim_end().to_string(),
                })
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_OWNER));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;

        Ok(Self {
            base_url,
            credentials,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PoolClient for HttpPoolClient {
    async fn reset(
        &self,
        resource_type: &ResourceType,
        source_state: ResourceState,
        expiry: Duration,
        target_state: ResourceState,
    ) -> Result<ReapResult, ReapError> {
        let expire = format_duration(expiry);
        debug!(
            resource_type = %resource_type,
            source_state = %source_state,
            target_state = %target_state,
            expire = %expire,
            "sending reset"
        );

        let mut request = self
            .http
            .post(format!("{}/reset", self.base_url))
            .query(&[
                ("type", resource_type.as_str()),
                ("state", source_state.as_str()),
                ("expire", expire.as_str()),
                ("dest", target_state.as_str()),
            ]);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ReapError::ServiceUnavailable(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReapError::ServiceUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(ReapError::RequestRejected {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body = body.trim();
        if body.is_empty() || body == "null" {
            return Ok(ReapResult::new());
        }
        serde_json::from_str(body).map_err(|e| ReapError::MalformedResponse(e.to_string()))
    }
}
