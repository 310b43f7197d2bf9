pub mod client;
pub mod dispatcher;
pub mod notifier;
pub mod source;

pub use client::EventClient;
pub use dispatcher::Broadcaster;
pub use notifier::{NotificationError, Notifier};
pub use source::{SnapshotSource, SourceError};
