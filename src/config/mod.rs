use crate::domain::model::ResponseType;
use crate::utils::error::Result;
use crate::utils::validation::{validate_base_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults applied to every request handled by the protocol. Set once at
/// application bootstrap; the protocol reads a snapshot taken at
/// construction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Defaults for protocol tag `remote`.
    pub server: ServerConfig,
    /// Defaults for protocol tag `assets`.
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base address for `remote` requests. Empty means unconfigured;
    /// `remote` requests fail until it is set.
    pub address: String,
    /// Default response type when a request carries none.
    pub response_type: ResponseType,
    /// Default content type. Empty means no Content-Type header is added.
    pub content_type: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            response_type: ResponseType::Json,
            content_type: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Base address for `assets` requests. Empty means unconfigured.
    pub address: String,
}

impl ProtocolConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ProtocolConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl Validate for ProtocolConfig {
    fn validate(&self) -> Result<()> {
        // Empty bases are legal; the matching protocol tag just cannot be
        // used until one is configured.
        if !self.server.address.is_empty() {
            validate_base_url("server.address", &self.server.address)?;
        }
        if !self.assets.address.is_empty() {
            validate_base_url("assets.address", &self.assets.address)?;
        }
        Ok(())
    }
}
