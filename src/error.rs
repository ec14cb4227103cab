use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum AosError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Custom error: {0}")]
    Custom(String),
    #[error("Invalid route: {0}")]
    InvalidRoute(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl AosError {
    /// Process exit code used by the CLI when this error aborts a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            AosError::Config(_) => 78,
            AosError::InvalidRoute(_) => 65,
            AosError::NotFound(_) => 66,
            AosError::PermissionDenied => 77,
            AosError::Serialization(_) => 65,
            AosError::Io(_) | AosError::Custom(_) => 74,
        }
    }
}

impl From<toml::de::Error> for AosError {
    fn from(src: toml::de::Error) -> AosError {
        AosError::Config(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for AosError {
    fn from(src: toml::ser::Error) -> AosError {
        AosError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for AosError {
    fn from(src: JsonError) -> AosError {
        AosError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<url::ParseError> for AosError {
    fn from(src: url::ParseError) -> AosError {
        AosError::InvalidRoute(format!("Invalid URL: {src}"))
    }
}

impl From<io::Error> for AosError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => AosError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => AosError::PermissionDenied,
            _ => AosError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err: AosError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AosError::NotFound(_)));
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn json_errors_are_serialization_errors() {
        let err: AosError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AosError::Serialization(_)));
    }
}
