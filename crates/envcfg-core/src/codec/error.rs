//! Codec error types

use thiserror::Error;

/// Errors raised while encoding or decoding a document
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Top-level key '{0}' is not a table")]
    NotATable(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
