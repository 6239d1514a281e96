//! Import configuration validation.

use std::collections::HashSet;

use rtc_core::tag;

use crate::schema::ImportConfig;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate lookup-table tag: {tag}")]
    DuplicateTag { tag: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &ImportConfig) -> Result<(), ValidationError> {
    if config.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if config.expressions.fold_nested.is_some() {
        return Err(ValidationError::InvalidValue {
            field: "expressions.fold_nested".to_string(),
            value: format!("{:?}", config.expressions.fold_nested),
            reason: "replaced by expressions.emission since version 1".to_string(),
        });
    }

    if config.lookup_tables.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "lookup_tables".to_string(),
            value: "[]".to_string(),
            reason: "at least one lookup-table tag is required".to_string(),
        });
    }

    let mut tags = HashSet::new();
    for table in &config.lookup_tables {
        let is_tag = tag::tag_of(&table.tag) == Some(table.tag.as_str()) && table.tag.len() > 2;
        if !is_tag {
            return Err(ValidationError::InvalidValue {
                field: "lookup_tables.tag".to_string(),
                value: table.tag.clone(),
                reason: "expected a bracketed tag such as [HydraulicRule]".to_string(),
            });
        }
        if !tags.insert(&table.tag) {
            return Err(ValidationError::DuplicateTag {
                tag: table.tag.clone(),
            });
        }
    }

    Ok(())
}
