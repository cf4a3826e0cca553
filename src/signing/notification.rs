//! Webhook notification signatures
//!
//! The delivery service signs each notification over the raw body followed
//! by the timestamp header value. Verification recomputes the signature,
//! compares it in constant time and rejects timestamps outside the validity
//! window.

use subtle::ConstantTimeEq;

use super::algorithm::{DigestAlgorithm, NotificationScheme};
use crate::error::{Result, TransformError};

/// Default validity window for notifications
pub const DEFAULT_VALID_FOR_SECONDS: u64 = crate::constants::DEFAULT_NOTIFICATION_VALID_FOR_SECS;

fn pre_image(body: &[u8], timestamp: i64) -> Vec<u8> {
    let timestamp = timestamp.to_string();
    let mut data = Vec::with_capacity(body.len() + timestamp.len());
    data.extend_from_slice(body);
    data.extend_from_slice(timestamp.as_bytes());
    data
}

/// Hex signature of `body` at `timestamp`
pub fn notification_signature(
    body: &[u8],
    timestamp: i64,
    secret: &str,
    algorithm: DigestAlgorithm,
    scheme: NotificationScheme,
) -> Result<String> {
    if secret.is_empty() {
        return Err(TransformError::missing_secret(
            "configure signing.api_secret before verifying notifications",
        ));
    }
    let data = pre_image(body, timestamp);
    match scheme {
        NotificationScheme::SecretSuffix => {
            let mut data = data;
            data.extend_from_slice(secret.as_bytes());
            Ok(algorithm.hex_digest(&data))
        }
        NotificationScheme::Hmac => Ok(hex::encode(algorithm.hmac(secret.as_bytes(), &data)?)),
    }
}

/// Parse a timestamp header value
pub fn parse_timestamp(timestamp: &str) -> Result<i64> {
    let trimmed = timestamp.trim();
    if trimmed.is_empty() {
        return Err(TransformError::invalid_input("timestamp", "timestamp is required"));
    }
    trimmed.parse::<i64>().map_err(|_| {
        TransformError::invalid_input(
            "timestamp",
            format!("'{}' is not an integer number of seconds", timestamp),
        )
    })
}

/// Verify a notification signature against an explicit clock.
///
/// Returns `Ok(false)` on any mismatch or an expired timestamp; errors only
/// when an input is missing or malformed.
#[allow(clippy::too_many_arguments)]
pub fn verify_notification_at(
    body: &[u8],
    timestamp: &str,
    signature: &str,
    secret: &str,
    algorithm: DigestAlgorithm,
    scheme: NotificationScheme,
    valid_for_seconds: u64,
    now: i64,
) -> Result<bool> {
    if signature.trim().is_empty() {
        return Err(TransformError::invalid_input("signature", "signature is required"));
    }
    let timestamp = parse_timestamp(timestamp)?;
    let expected = notification_signature(body, timestamp, secret, algorithm, scheme)?;

    let age = i128::from(now) - i128::from(timestamp);
    if age > i128::from(valid_for_seconds) {
        tracing::debug!(age_seconds = %age, "Notification timestamp outside validity window");
        return Ok(false);
    }

    let matches: bool = expected
        .as_bytes()
        .ct_eq(signature.trim().to_ascii_lowercase().as_bytes())
        .into();
    if !matches {
        tracing::debug!(
            algorithm = %algorithm,
            "Notification signature mismatch"
        );
    }
    Ok(matches)
}
