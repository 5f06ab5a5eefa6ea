//! Data models for the wellx pipeline.

pub mod config;
pub mod record;

pub use config::WellxConfig;
pub use record::{Field, WellRecord};
