//! rtc-convert: tools-config element bindings to component descriptors.
//!
//! Provides:
//! - Component parsing for rules, signals and conditions
//! - Expression tree building with shared sub-expressions
//! - Explicit conversion options (lookup-table registry, expression emission)
//!
//! # Example
//!
//! ```
//! use rtc_convert::{convert, ConverterOptions};
//! use rtc_xml::read_tools_config;
//!
//! let xml = r#"<rtcToolsConfig><rules><rule>
//!     <timeAbsolute id="[TimeRule]group1/A"><output><y>[Output]w/c</y></output></timeAbsolute>
//! </rule></rules></rtcToolsConfig>"#;
//! let config = read_tools_config(xml).unwrap();
//! let descriptors = convert(&config, &ConverterOptions::default()).unwrap();
//!
//! assert_eq!(descriptors.len(), 1);
//! assert_eq!(descriptors[0].control_group_name, "group1");
//! ```

mod conditions;
pub mod converter;
pub mod expressions;
pub mod options;
mod rules;

pub use converter::{convert, convert_elements};
pub use expressions::ExpressionTreeBuilder;
pub use options::{ConverterOptions, ExpressionEmission, LookupTableKind, LookupTableRegistry};
