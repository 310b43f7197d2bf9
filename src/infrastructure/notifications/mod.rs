pub mod email;
pub mod slack;

pub use email::EmailNotifier;
pub use slack::SlackNotifier;
