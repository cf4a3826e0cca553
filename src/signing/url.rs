//! Short signatures embedded in delivery URLs
//!
//! Unlike parameter signing, the pre-image is the path being delivered
//! (`transformation/vN/public_id`) with the secret appended, and the digest
//! is base64url-encoded and truncated instead of hex-encoded.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

use super::algorithm::DigestAlgorithm;
use crate::constants::{LONG_URL_SIGNATURE_LEN, SHORT_URL_SIGNATURE_LEN};
use crate::error::{Result, TransformError};

/// Compute the `s--XXXXXXXX--` path component for `to_sign`.
///
/// Long signatures always use SHA-256 regardless of `algorithm`.
pub fn url_signature(
    to_sign: &str,
    secret: &str,
    algorithm: DigestAlgorithm,
    long: bool,
) -> Result<String> {
    if secret.is_empty() {
        return Err(TransformError::missing_secret(
            "configure signing.api_secret before signing URLs",
        ));
    }

    let (algorithm, len) = if long {
        (DigestAlgorithm::Sha256, LONG_URL_SIGNATURE_LEN)
    } else {
        (algorithm, SHORT_URL_SIGNATURE_LEN)
    };

    let mut pre_image = String::with_capacity(to_sign.len() + secret.len());
    pre_image.push_str(to_sign);
    pre_image.push_str(secret);

    let encoded = URL_SAFE.encode(algorithm.digest(pre_image.as_bytes()));
    let truncated: String = encoded.chars().take(len).collect();
    Ok(format!("s--{}--", truncated))
}
