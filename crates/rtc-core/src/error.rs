use thiserror::Error;

pub type RtcResult<T> = Result<T, RtcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RtcError {
    /// An element, tag or operator the importer does not know how to convert.
    #[error("Unsupported {what} in '{id}': {found}")]
    Unsupported {
        what: &'static str,
        id: String,
        found: String,
    },

    #[error("Missing {what} in '{id}'")]
    MissingField { what: &'static str, id: String },

    #[error("Invalid {what} in '{id}': {value}")]
    InvalidValue {
        what: &'static str,
        id: String,
        value: String,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
