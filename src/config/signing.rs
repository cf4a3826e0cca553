//! Signing configuration.
//!
//! Defines the YAML `signing` section. The secret is usually injected with
//! `${VAR}` substitution rather than written into the file.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_NOTIFICATION_VALID_FOR_SECS;
use crate::signing::{DigestAlgorithm, NotificationScheme, SignatureVersion};

fn default_notification_valid_for_seconds() -> u64 {
    DEFAULT_NOTIFICATION_VALID_FOR_SECS
}

/// Signing configuration (YAML format)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// API secret; absent means signing is unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,

    /// Digest for parameter and URL signatures (default: sha1)
    #[serde(default)]
    pub signature_algorithm: DigestAlgorithm,

    /// Canonicalisation revision, 1 or 2 (default: 2)
    #[serde(default)]
    pub signature_version: SignatureVersion,

    /// Use 32-character SHA-256 URL signatures (default: false)
    #[serde(default)]
    pub long_url_signature: bool,

    /// How webhook signatures are computed (default: secret_suffix)
    #[serde(default)]
    pub notification_scheme: NotificationScheme,

    /// Maximum notification age in seconds (default: 7200)
    #[serde(default = "default_notification_valid_for_seconds")]
    pub notification_valid_for_seconds: u64,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            api_secret: None,
            signature_algorithm: DigestAlgorithm::default(),
            signature_version: SignatureVersion::default(),
            long_url_signature: false,
            notification_scheme: NotificationScheme::default(),
            notification_valid_for_seconds: default_notification_valid_for_seconds(),
        }
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("signature_algorithm", &self.signature_algorithm)
            .field("signature_version", &self.signature_version)
            .field("long_url_signature", &self.long_url_signature)
            .field("notification_scheme", &self.notification_scheme)
            .field(
                "notification_valid_for_seconds",
                &self.notification_valid_for_seconds,
            )
            .finish()
    }
}

impl SigningConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(secret) = &self.api_secret {
            if secret.trim().is_empty() {
                return Err("signing.api_secret is set but empty".to_string());
            }
        }
        if self.notification_valid_for_seconds == 0 {
            return Err("signing.notification_valid_for_seconds must be > 0".to_string());
        }
        Ok(())
    }
}
