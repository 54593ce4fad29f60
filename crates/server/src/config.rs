//! Server configuration from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND: &str = "0.0.0.0:3001";
const DEFAULT_DATA_FILE: &str = "data/stylecrop.json";
const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid STYLECROP_BIND value '{value}': {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (`STYLECROP_BIND`)
    pub bind: SocketAddr,
    /// JSON snapshot of users, sessions and addresses (`STYLECROP_DATA_FILE`)
    pub data_file: PathBuf,
    /// Static storefront assets: decal images, shirt mesh, environment map (`STYLECROP_ASSETS_DIR`)
    pub assets_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_value = lookup("STYLECROP_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_value.clone(),
                source,
            })?;

        let data_file = lookup("STYLECROP_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let assets_dir = lookup("STYLECROP_ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));

        Ok(Self {
            bind,
            data_file,
            assets_dir,
        })
    }
}
