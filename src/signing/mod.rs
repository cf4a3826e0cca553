//! Request signing
//!
//! Three distinct signatures are produced here and must not be confused:
//!
//! - parameter signatures: hex digest over canonicalised request parameters
//! - URL signatures: short base64url token embedded in a delivery path
//! - notification signatures: verification of webhook bodies with replay
//!   protection
//!
//! All of them are pure functions of their inputs. [`Signer`] bundles a
//! secret with the algorithm choices read from configuration.

pub mod algorithm;
pub mod notification;
pub mod params;
pub mod url;

use std::fmt;

pub use algorithm::{DigestAlgorithm, NotificationScheme, SignatureVersion};
pub use notification::{notification_signature, verify_notification_at, DEFAULT_VALID_FOR_SECONDS};
pub use params::{canonical_string, params, sign_request, ParamValue, Params, SIGNATURE_PARAM};
pub use url::url_signature;

use crate::config::SigningConfig;
use crate::error::{Result, TransformError};

/// A configured signing secret plus algorithm choices
#[derive(Clone, PartialEq, Eq)]
pub struct Signer {
    secret: String,
    algorithm: DigestAlgorithm,
    version: SignatureVersion,
    notification_scheme: NotificationScheme,
    long_url_signature: bool,
    notification_valid_for: u64,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("version", &self.version)
            .field("notification_scheme", &self.notification_scheme)
            .field("long_url_signature", &self.long_url_signature)
            .field("notification_valid_for", &self.notification_valid_for)
            .finish()
    }
}

impl Signer {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(TransformError::missing_secret(
                "a non-empty api secret is required",
            ));
        }
        Ok(Self {
            secret,
            algorithm: DigestAlgorithm::default(),
            version: SignatureVersion::default(),
            notification_scheme: NotificationScheme::default(),
            long_url_signature: false,
            notification_valid_for: DEFAULT_VALID_FOR_SECONDS,
        })
    }

    /// Build from the `signing` configuration section
    pub fn from_config(config: &SigningConfig) -> Result<Self> {
        let secret = config.api_secret.clone().unwrap_or_default();
        if secret.trim().is_empty() {
            return Err(TransformError::missing_secret(
                "set signing.api_secret in the configuration file",
            ));
        }
        let signer = Self::new(secret)?
            .with_algorithm(config.signature_algorithm)
            .with_version(config.signature_version)
            .with_notification_scheme(config.notification_scheme)
            .with_long_url_signature(config.long_url_signature)
            .with_notification_valid_for(config.notification_valid_for_seconds);

        tracing::debug!(
            algorithm = %signer.algorithm,
            version = u8::from(signer.version),
            long_url_signature = signer.long_url_signature,
            "Signer configured"
        );
        Ok(signer)
    }

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_version(mut self, version: SignatureVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_notification_scheme(mut self, scheme: NotificationScheme) -> Self {
        self.notification_scheme = scheme;
        self
    }

    pub fn with_long_url_signature(mut self, long: bool) -> Self {
        self.long_url_signature = long;
        self
    }

    pub fn with_notification_valid_for(mut self, seconds: u64) -> Self {
        self.notification_valid_for = seconds;
        self
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn version(&self) -> SignatureVersion {
        self.version
    }

    /// Sign every non-empty parameter
    pub fn sign(&self, params: &Params) -> Result<String> {
        tracing::trace!(params = params.len(), algorithm = %self.algorithm, "Signing parameters");
        sign_request(params, &self.secret, self.algorithm, self.version)
    }

    /// Sign upload parameters, skipping the ones that are never signed
    pub fn sign_upload_params(&self, params: &Params) -> Result<String> {
        sign_request(
            params::signable_upload_params(params),
            &self.secret,
            self.algorithm,
            self.version,
        )
    }

    /// Copy of `params` with the `signature` field added; the caller's map is
    /// left untouched
    pub fn signed_params(&self, params: &Params) -> Result<Params> {
        let signature = self.sign_upload_params(params)?;
        let mut signed = params.clone();
        signed.insert(SIGNATURE_PARAM.to_string(), ParamValue::Text(signature));
        Ok(signed)
    }

    /// `s--XXXXXXXX--` component for a delivery path
    pub fn sign_url(&self, to_sign: &str) -> Result<String> {
        url_signature(to_sign, &self.secret, self.algorithm, self.long_url_signature)
    }

    pub fn sign_notification(&self, body: &[u8], timestamp: i64) -> Result<String> {
        notification_signature(
            body,
            timestamp,
            &self.secret,
            self.algorithm,
            self.notification_scheme,
        )
    }

    /// Verify a webhook against the current clock and the configured window
    pub fn verify_notification(&self, body: &[u8], timestamp: &str, signature: &str) -> Result<bool> {
        self.verify_notification_at(
            body,
            timestamp,
            signature,
            self.notification_valid_for,
            chrono::Utc::now().timestamp(),
        )
    }

    pub fn verify_notification_at(
        &self,
        body: &[u8],
        timestamp: &str,
        signature: &str,
        valid_for_seconds: u64,
        now: i64,
    ) -> Result<bool> {
        verify_notification_at(
            body,
            timestamp,
            signature,
            &self.secret,
            self.algorithm,
            self.notification_scheme,
            valid_for_seconds,
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> Signer {
        Signer::new("abcd").unwrap()
    }

    #[test]
    fn test_new_rejects_blank_secret() {
        assert!(matches!(
            Signer::new("  "),
            Err(TransformError::MissingSecret { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", signer());
        assert!(!debug.contains("abcd"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_sign_is_order_independent() {
        let a = params([("a", "1"), ("b", "2")]);
        let b = params([("b", "2"), ("a", "1")]);
        assert_eq!(signer().sign(&a).unwrap(), signer().sign(&b).unwrap());
    }

    #[test]
    fn test_signed_params_adds_signature_to_copy() {
        let p = params([("public_id", "sample"), ("timestamp", "100"), ("file", "x")]);
        let signed = signer().signed_params(&p).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(signed.len(), 4);

        let expected = signer()
            .sign(&params([("public_id", "sample"), ("timestamp", "100")]))
            .unwrap();
        assert_eq!(signed.get(SIGNATURE_PARAM), Some(&ParamValue::Text(expected)));
    }

    #[test]
    fn test_notification_round_trip() {
        let s = signer();
        let sig = s.sign_notification(b"{}", 1000).unwrap();
        assert!(s.verify_notification_at(b"{}", "1000", &sig, 60, 1030).unwrap());
        assert!(!s.verify_notification_at(b"{ }", "1000", &sig, 60, 1030).unwrap());
        assert!(!s.verify_notification_at(b"{}", "1000", &sig, 60, 1061).unwrap());
    }

    #[test]
    fn test_verify_notification_uses_clock() {
        let s = signer();
        let now = chrono::Utc::now().timestamp();
        let sig = s.sign_notification(b"body", now).unwrap();
        assert!(s.verify_notification(b"body", &now.to_string(), &sig).unwrap());
    }

    #[test]
    fn test_sign_url_respects_long_option() {
        let short = signer().sign_url("v1/sample.jpg").unwrap();
        assert_eq!(short, "s--UAi3oDX0--");
        let long = signer()
            .with_long_url_signature(true)
            .sign_url("v1/sample.jpg")
            .unwrap();
        assert_eq!(long.len(), "s----".len() + 32);
    }
}
