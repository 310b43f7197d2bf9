pub mod node;
pub mod notification;

pub use node::NodeSnapshot;
pub use notification::{EventLevel, NotificationMessage};
