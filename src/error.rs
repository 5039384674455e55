use crate::wire::WireType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Leading text of the [`Error::NonIntegerNumber`] message.
const NON_INTEGER_PREFIX: &str = "Expected an exact integer, got ";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot convert {wire_type} value into an IntOrString value")]
    Conversion { wire_type: WireType },

    #[error("Expected an exact integer, got {value}")]
    NonIntegerNumber { value: String },

    #[error("Integer {value} is out of range for a Kubernetes IntOrString")]
    IntegerOutOfRange { value: i64 },

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl Error {
    /// Wrap a serde_json error, recovering [`Error::NonIntegerNumber`] when a
    /// value raised it during serialization.
    pub(crate) fn from_serialization(err: serde_json::Error) -> Self {
        if err.is_data() && err.line() == 0 {
            if let Some(value) = err.to_string().strip_prefix(NON_INTEGER_PREFIX) {
                return Error::NonIntegerNumber {
                    value: value.to_string(),
                };
            }
        }
        Error::SerializationError(err)
    }
}
