pub mod api_source;

pub use api_source::ApiSnapshotSource;
