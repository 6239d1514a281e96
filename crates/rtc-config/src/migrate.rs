//! Config version migration.

use crate::ConfigError;
use crate::schema::{EmissionDef, ImportConfig};

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut config: ImportConfig) -> Result<ImportConfig, ConfigError> {
    while config.version < LATEST_VERSION {
        config = migrate_one_version(config)?;
    }
    Ok(config)
}

fn migrate_one_version(config: ImportConfig) -> Result<ImportConfig, ConfigError> {
    match config.version {
        0 => migrate_v0_to_v1(config),
        v => Err(ConfigError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 wrote lookup-table tags without brackets and switched folding
/// with `expressions.fold_nested`.
fn migrate_v0_to_v1(mut config: ImportConfig) -> Result<ImportConfig, ConfigError> {
    for table in &mut config.lookup_tables {
        let bare = table.tag.trim();
        if !bare.starts_with('[') {
            table.tag = format!("[{bare}]");
        }
    }

    if config.expressions.fold_nested.take() == Some(true) {
        config.expressions.emission = EmissionDef::RootsOnly;
    }

    config.version = 1;
    Ok(config)
}
