/// Database configuration and connection management
pub mod database;

/// Shop letterhead and estimate settings from estimate.toml
pub mod shop;
