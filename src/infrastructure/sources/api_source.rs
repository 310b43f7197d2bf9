use std::time::Duration;

use crate::domain::entities::node::NodeSnapshot;
use crate::domain::ports::source::{SnapshotSource, SourceError};

pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

const USER_AGENT: &str = concat!("nodewatch/", env!("CARGO_PKG_VERSION"));

/// Fetches node status records over HTTP (`GET {api_url}/nodes/{bls}`).
pub struct ApiSnapshotSource {
    client: reqwest::Client,
    api_url: String,
}

impl ApiSnapshotSource {
    /// Build a source for the given API base URL with a request timeout
    /// covering DNS resolution, connection, and response.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidConfig` for an empty URL or a timeout
    /// below [`MIN_REQUEST_TIMEOUT_SECS`], and `SourceError::Transport` when
    /// the HTTP client cannot be initialized.
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self, SourceError> {
        if api_url.trim().is_empty() {
            return Err(SourceError::InvalidConfig(
                "api url must not be empty".to_string(),
            ));
        }
        if timeout_secs < MIN_REQUEST_TIMEOUT_SECS {
            return Err(SourceError::InvalidConfig(format!(
                "request timeout must be at least {MIN_REQUEST_TIMEOUT_SECS}s, got {timeout_secs}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn node_url(&self, pub_key: &str) -> String {
        format!("{}/nodes/{}", self.api_url, pub_key)
    }
}

#[async_trait::async_trait]
impl SnapshotSource for ApiSnapshotSource {
    async fn fetch_node(&self, pub_key: &str) -> Result<NodeSnapshot, SourceError> {
        let response = self
            .client
            .get(self.node_url(pub_key))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response
            .json::<NodeSnapshot>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}
