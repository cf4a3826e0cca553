//! Delivery path configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DELIVERY_TYPE, DEFAULT_RESOURCE_TYPE};

fn default_force_version() -> bool {
    true
}

fn default_resource_type() -> String {
    DEFAULT_RESOURCE_TYPE.to_string()
}

fn default_delivery_type() -> String {
    DEFAULT_DELIVERY_TYPE.to_string()
}

/// Delivery configuration (YAML format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Add `v1` to folder public ids that have no explicit version
    #[serde(default = "default_force_version")]
    pub force_version: bool,

    /// Cover the `vN` segment with the URL signature (default: false)
    #[serde(default)]
    pub sign_version: bool,

    /// Resource type used when a path does not name one (default: image)
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Delivery type used when a path does not name one (default: upload)
    #[serde(default = "default_delivery_type")]
    pub delivery_type: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            force_version: default_force_version(),
            sign_version: false,
            resource_type: default_resource_type(),
            delivery_type: default_delivery_type(),
        }
    }
}

impl DeliveryConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.resource_type.trim().is_empty() {
            return Err("delivery.resource_type cannot be empty".to_string());
        }
        if self.delivery_type.trim().is_empty() {
            return Err("delivery.delivery_type cannot be empty".to_string());
        }
        Ok(())
    }
}
