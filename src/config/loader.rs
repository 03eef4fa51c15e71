//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{IncomeTaxConfig, SocialSecurityConfig, StatuteConfig, StatutoryConfig};

/// Loads and provides access to a statutory configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/clt-2025/
/// ├── statute.yaml          # Metadata, constants and policy flags
/// ├── social_security.yaml  # INSS progressive table
/// └── income_tax.yaml       # IRRF table and dependent deduction
/// ```
///
/// # Example
///
/// ```no_run
/// use severance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/clt-2025").unwrap();
/// println!("Loaded tables: {}", loader.metadata().code);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or malformed brackets (`ConfigParseError`)
    /// - The constants are inconsistent (`InvalidConfig`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use severance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/clt-2025")?;
    /// # Ok::<(), severance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let statute = Self::load_yaml::<StatuteConfig>(&path.join("statute.yaml"))?;
        let social_security =
            Self::load_yaml::<SocialSecurityConfig>(&path.join("social_security.yaml"))?;
        let income_tax = Self::load_yaml::<IncomeTaxConfig>(&path.join("income_tax.yaml"))?;

        let config = StatutoryConfig::new(statute, social_security, income_tax)?;
        debug!(
            code = %config.metadata().code,
            version = %config.metadata().version,
            "Loaded statutory configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the statute metadata.
    pub fn metadata(&self) -> &super::StatuteMetadata {
        self.config.metadata()
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> StatutoryConfig {
        self.config
    }
}
