// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, TransformError};
use crate::logging::LoggingConfig;

pub mod delivery;
pub mod signing;

pub use delivery::DeliveryConfig;
pub use signing::SigningConfig;

/// Read-only settings consumed by the signer and the delivery path builder.
///
/// Nothing in this crate reads configuration implicitly; values are passed
/// to constructors such as [`crate::signing::Signer::from_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub signing: SigningConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| TransformError::Config(e.to_string()))?;

        // First, check that all referenced environment variables exist
        let mut values: HashMap<String, String> = HashMap::new();
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            let value = std::env::var(var_name).map_err(|_| {
                TransformError::Config(format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                ))
            })?;
            values.insert(var_name.to_string(), value);
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        });

        let config: Config = serde_yaml::from_str(&substituted)
            .map_err(|e| TransformError::Config(e.to_string()))?;

        tracing::debug!(
            substituted_vars = values.len(),
            signing_configured = config.signing.api_secret.is_some(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| TransformError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        self.signing.validate().map_err(TransformError::Config)?;
        self.delivery.validate().map_err(TransformError::Config)?;
        Ok(())
    }
}
