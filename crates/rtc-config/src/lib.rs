//! rtc-config: import configuration file format, migration and validation,
//! and its mapping onto converter options.

pub mod migrate;
pub mod options;
pub mod schema;
pub mod validate;

use std::path::Path;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ConfigResult<ImportConfig> {
    let content = std::fs::read_to_string(path)?;
    finish(serde_yaml::from_str(&content)?)
}

pub fn load_json(path: &Path) -> ConfigResult<ImportConfig> {
    let content = std::fs::read_to_string(path)?;
    finish(serde_json::from_str(&content)?)
}

/// Load by file extension: `.json` is JSON, anything else YAML.
pub fn load(path: &Path) -> ConfigResult<ImportConfig> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

fn finish(config: ImportConfig) -> ConfigResult<ImportConfig> {
    let config = migrate_to_latest(config)?;
    validate_config(&config)?;
    Ok(config)
}
