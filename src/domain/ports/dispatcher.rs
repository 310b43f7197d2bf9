use crate::domain::entities::notification::NotificationMessage;

/// Fan-out contract the scheduler hands critical events to.
///
/// `broadcast` is fire-and-forget: delivery happens on independent tasks
/// and the caller never waits for, or learns about, per-channel results.
pub trait Broadcaster: Send + Sync {
    fn broadcast(&self, msg: &NotificationMessage);
}
