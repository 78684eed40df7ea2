pub mod config;
pub mod ingest;
pub mod store;

pub use config::AggregatorConfig;
pub use ingest::Feed;
