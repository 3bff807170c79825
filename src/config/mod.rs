/// Database configuration and connection management
pub mod database;

/// Application settings and catalog seeds loaded from config.toml
pub mod settings;
