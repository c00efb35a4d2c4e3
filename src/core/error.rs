use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Property lookup failed: {0}")]
    PropertyLookup(String),

    #[error("Malformed property {name}: {value:?}")]
    MalformedProperty { name: String, value: String },

    #[error("No test description: {0}")]
    NoDescription(String),

    #[error("Malformed event on line {line}: {source}")]
    EventParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ProgressError>;
