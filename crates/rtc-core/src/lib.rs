//! rtc-core: stable foundation for the RTC tools-config graph assembler.
//!
//! Contains:
//! - ids (compact arena handles for assembled objects)
//! - tag (the `[Tag]` prefixes used by the naming convention)
//! - component_id (splitting `[Tag]Group/Name` identifiers)
//! - error (shared error types)

pub mod component_id;
pub mod error;
pub mod ids;
pub mod tag;

// Re-exports: nice ergonomics for downstream crates
pub use component_id::{ComponentId, control_group_name};
pub use error::{RtcError, RtcResult};
pub use ids::*;
