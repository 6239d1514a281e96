//! rtc-xml: reads RTC tools-config documents into typed element bindings.
//!
//! The reader is a thin layer over `quick-xml` events. It builds a generic
//! element tree, then decodes the `rules` and `triggers` sections into
//! [`RuleElement`] and [`TriggerElement`] values. Nothing here resolves
//! references between components.
//!
//! # Example
//!
//! ```
//! use rtc_xml::{read_tools_config, RuleElement};
//!
//! let xml = r#"<rtcToolsConfig><rules><rule>
//!     <timeAbsolute id="[TimeRule]group/A"><output><y>[Output]w/c</y></output></timeAbsolute>
//! </rule></rules></rtcToolsConfig>"#;
//! let config = read_tools_config(xml).unwrap();
//! assert!(matches!(config.rules[0], RuleElement::TimeAbsolute(_)));
//! ```

pub mod element;
pub mod error;
pub mod schema;

use std::path::Path;

pub use element::{XmlElement, parse_document};
pub use error::{XmlError, XmlResult};
pub use schema::*;

/// Parse a tools-config document held in memory.
pub fn read_tools_config(xml: &str) -> XmlResult<ToolsConfig> {
    let root = parse_document(xml)?;
    let config = ToolsConfig::decode(&root)?;
    tracing::debug!(
        rules = config.rules.len(),
        triggers = config.triggers.len(),
        "Read tools config"
    );
    Ok(config)
}

/// Read and parse a tools-config file.
pub fn read_tools_config_file(path: &Path) -> XmlResult<ToolsConfig> {
    let xml = std::fs::read_to_string(path).map_err(|source| XmlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_tools_config(&xml)
}
