use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Cannot request resource: blocking requests are not supported by this protocol")]
    BlockingUnsupported,

    #[error("Cannot request {address}: no {base} address configured")]
    MissingBaseAddress { base: String, address: String },

    #[error("Cannot request asset file {address}: only GET is allowed for this protocol")]
    MethodNotAllowed { method: String, address: String },

    #[error("Cannot send request: {method} is not a known http method")]
    UnknownMethod { method: String },

    #[error("Request timed out ({status}): {message} ({address})")]
    Timeout {
        status: u16,
        message: String,
        headers: BTreeMap<String, String>,
        address: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to decode response body: {reason}")]
    Decode { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: field {field} has invalid value '{value}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl ProtocolError {
    /// Normalized timeout error, shaped like a 408 Request Timeout response.
    pub fn timeout(
        message: impl Into<String>,
        headers: BTreeMap<String, String>,
        address: impl Into<String>,
    ) -> Self {
        ProtocolError::Timeout {
            status: 408,
            message: message.into(),
            headers,
            address: address.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
