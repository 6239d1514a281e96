use std::path::PathBuf;

use thiserror::Error;

pub type XmlResult<T> = Result<T, XmlError>;

/// Errors raised while reading a tools-config document into element bindings.
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document has no root element")]
    EmptyDocument,

    #[error("Second root element <{element}>")]
    SecondRoot { element: String },

    #[error("Element <{element}> is not closed")]
    Unclosed { element: String },

    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("Missing <{child}> in <{element}> '{id}'")]
    MissingElement {
        element: String,
        child: &'static str,
        id: String,
    },

    #[error("Invalid number '{value}' for <{field}> in '{id}'")]
    InvalidNumber {
        field: String,
        value: String,
        id: String,
    },

    #[error("Invalid {field} '{value}' in '{id}'")]
    InvalidValue {
        field: &'static str,
        value: String,
        id: String,
    },
}
