use thiserror::Error;

use crate::domain::entities::node::NodeSnapshot;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request to node API failed: {0}")]
    Transport(String),
    #[error("node API returned status {0}")]
    Status(u16),
    #[error("failed to decode node payload: {0}")]
    Decode(String),
    #[error("invalid source configuration: {0}")]
    InvalidConfig(String),
}

/// Read side of the remote status API. Detection logic does not know the
/// transport behind this trait.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current status record for one node identifier.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on transport failure, a non-2xx response,
    /// or a payload that does not decode.
    async fn fetch_node(&self, pub_key: &str) -> Result<NodeSnapshot, SourceError>;
}
