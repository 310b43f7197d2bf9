use crate::domain::entities::notification::NotificationMessage;
use crate::domain::ports::source::SourceError;

/// A detector driven by the scheduler. One evaluation per client is in
/// flight at a time, enforced by the single tick-driven call site.
#[async_trait::async_trait]
pub trait EventClient: Send + Sync {
    /// Stable identifier used as the scheduler registry key.
    fn id(&self) -> &str;

    /// Run one detection cycle and classify it.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error unchanged; implementations must leave
    /// their state untouched when this fails.
    async fn evaluate(&self) -> Result<NotificationMessage, SourceError>;
}
