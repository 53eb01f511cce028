//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the client
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{RescisaoError, RescisaoResult};

use super::types::ClientConfig;

/// Loads and provides access to the client configuration.
///
/// # File Layout
///
/// ```text
/// endpoint: https://calculadora-rescisao.onrender.com/api/calcular
/// cache:
///   key_prefix: calculadora_rescisao_cache
///   ttl_seconds: 3600
///   store_path: .rescisao-cache.json
/// notices:
///   display_seconds: 5
/// ```
///
/// # Example
///
/// ```no_run
/// use rescisao_client::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/rescisao.yaml").unwrap();
/// println!("Endpoint: {}", loader.config().endpoint);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ClientConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns `ConfigNotFound` when the file cannot be read and
    /// `ConfigParseError` when it is not valid YAML or holds unusable values.
    pub fn load<P: AsRef<Path>>(path: P) -> RescisaoResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| RescisaoError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&path_str, &content)
    }

    /// Parses configuration from YAML text; `origin` names the source in errors.
    pub fn from_yaml(origin: &str, content: &str) -> RescisaoResult<Self> {
        // An empty document means "all defaults".
        let config: ClientConfig = if content.trim().is_empty() {
            ClientConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| RescisaoError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?
        };

        Self::check(origin, &config)?;
        Ok(Self { config })
    }

    fn check(origin: &str, config: &ClientConfig) -> RescisaoResult<()> {
        let invalid = |message: &str| RescisaoError::ConfigParseError {
            path: origin.to_string(),
            message: message.to_string(),
        };

        if config.endpoint.trim().is_empty() {
            return Err(invalid("endpoint must not be empty"));
        }
        if config.cache.ttl_seconds == 0 {
            return Err(invalid("cache.ttl_seconds must be greater than zero"));
        }
        if config.cache.key_prefix.is_empty() {
            return Err(invalid("cache.key_prefix must not be empty"));
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ClientConfig {
        self.config
    }
}
