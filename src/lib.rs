//! nodewatch — polls a node-status API, detects rating drops against the
//! previously observed value, and fans alerts out to email / Slack channels.

pub mod application;
pub mod domain;
pub mod infrastructure;
