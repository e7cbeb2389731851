//! Data models and structures for the DNS impact probe

pub mod config;
pub mod measurement;

// Re-export main model types
pub use config::Config;
pub use measurement::{round_ms, Measurement};
