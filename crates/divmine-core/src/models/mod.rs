//! Data models: configuration, document profiles and extracted values.

pub mod config;
pub mod profile;
pub mod values;
