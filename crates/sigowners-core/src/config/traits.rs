//! Configuration trait and the ownership configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::rule::SigDirRule;
use super::validation::ConfigValidator;
use crate::SigownersError;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "SIGOWNERS_";

/// Core trait for sigowners configuration types
pub trait SigownersConfig: Clone + Default + Send + Sync + 'static {
    /// Error type for configuration operations
    type Error: Into<SigownersError> + From<SigownersError>;

    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> Result<Self, Self::Error>;

    /// Merge with environment variables
    fn merge_with_env(&mut self) -> Result<(), Self::Error>;

    /// Merge with another configuration
    fn merge_with(&mut self, other: &Self) -> Result<(), Self::Error>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), Self::Error>;

    /// Set a configuration value from a string (for CLI parsing)
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Settings consumed by the ownership resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipConfig {
    /// Platform name used as the file-cache key
    pub platform: String,
    /// Regular expression a changed path must match to be governed
    pub sig_dir_pattern: String,
    /// Owners-variant filename
    pub owners_file: String,
    /// SigInfo-variant filename
    pub sig_info_file: String,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            platform: "gitee".to_string(),
            sig_dir_pattern: r"^sig/[^/]+/[^/]+$".to_string(),
            owners_file: "OWNERS".to_string(),
            sig_info_file: "sig-info.yaml".to_string(),
        }
    }
}

impl OwnershipConfig {
    /// Compile the governed-directory rule.
    pub fn compile(&self) -> crate::Result<SigDirRule> {
        SigDirRule::new(&self.sig_dir_pattern)
    }

    /// Apply `SIGOWNERS_*` overrides from an explicit variable list.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> crate::Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            if let Some(config_key) = key.as_ref().strip_prefix(ENV_PREFIX) {
                let config_key = config_key.to_ascii_lowercase();
                match config_key.as_str() {
                    "platform" | "sig_dir_pattern" | "owners_file" | "sig_info_file" => {
                        self.set_from_string(&config_key, value.as_ref())?;
                    }
                    _ => tracing::debug!(key = %key.as_ref(), "ignoring unknown override"),
                }
            }
        }
        Ok(())
    }
}

impl SigownersConfig for OwnershipConfig {
    type Error = SigownersError;

    fn load_from_file(path: &Path) -> Result<Self, Self::Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SigownersError::invalid(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(SigownersError::invalid("Unsupported file format")),
        };
        config.validate()?;
        Ok(config)
    }

    fn merge_with_env(&mut self) -> Result<(), Self::Error> {
        self.merge_with_vars(std::env::vars())?;
        self.validate()
    }

    fn merge_with(&mut self, other: &Self) -> Result<(), Self::Error> {
        // Merge non-default values from other config
        let defaults = Self::default();
        if other.platform != defaults.platform {
            self.platform.clone_from(&other.platform);
        }
        if other.sig_dir_pattern != defaults.sig_dir_pattern {
            self.sig_dir_pattern.clone_from(&other.sig_dir_pattern);
        }
        if other.owners_file != defaults.owners_file {
            self.owners_file.clone_from(&other.owners_file);
        }
        if other.sig_info_file != defaults.sig_info_file {
            self.sig_info_file.clone_from(&other.sig_info_file);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), Self::Error> {
        let mut validator = ConfigValidator::new();
        validator
            .non_empty("platform", &self.platform)
            .non_empty("sig_dir_pattern", &self.sig_dir_pattern)
            .regex("sig_dir_pattern", &self.sig_dir_pattern)
            .non_empty("owners_file", &self.owners_file)
            .bare_filename("owners_file", &self.owners_file)
            .non_empty("sig_info_file", &self.sig_info_file)
            .bare_filename("sig_info_file", &self.sig_info_file);
        validator.finish().map_err(Into::into)
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        match key {
            "platform" => self.platform = value.to_string(),
            "sig-dir-pattern" | "sig_dir_pattern" => self.sig_dir_pattern = value.to_string(),
            "owners-file" | "owners_file" => self.owners_file = value.to_string(),
            "sig-info-file" | "sig_info_file" => self.sig_info_file = value.to_string(),
            _ => {
                return Err(SigownersError::invalid(format!(
                    "Unknown configuration key: {key}"
                )))
            }
        }
        Ok(())
    }
}
