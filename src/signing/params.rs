//! Parameter canonicalisation and request signing
//!
//! The pre-image is built from the parameters alone: empty values are
//! dropped, keys are sorted by byte value, pairs are joined as `key=value`
//! with `&`, and the secret is appended with no separator. Callers never
//! need to pre-sort, and their map is never reordered.

use std::collections::{BTreeMap, HashMap};

use super::algorithm::{DigestAlgorithm, SignatureVersion};
use crate::error::{Result, TransformError};

/// Parameters that are sent with an upload but are never signed
pub const UNSIGNED_UPLOAD_PARAMS: &[&str] = &["file", "cloud_name", "resource_type", "api_key"];

/// Name of the field the signature is sent in
pub const SIGNATURE_PARAM: &str = "signature";

/// A request parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    /// Joined with `,` before signing
    List(Vec<String>),
    Null,
}

impl ParamValue {
    /// Value as it appears in the pre-image, or `None` when it is dropped
    pub fn canonical(&self, version: SignatureVersion) -> Option<String> {
        let joined = match self {
            ParamValue::Null => return None,
            ParamValue::Text(text) => text.clone(),
            ParamValue::List(items) => items.join(","),
        };
        if joined.is_empty() {
            return None;
        }
        Some(match version {
            SignatureVersion::V1 => joined,
            SignatureVersion::V2 => joined.replace('&', "%26"),
        })
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

/// Unordered request parameters as held by the caller
pub type Params = HashMap<String, ParamValue>;

/// Build a parameter map from `(key, value)` pairs
pub fn params<I, K, V>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// `key=value&key=value` over the non-empty parameters, keys byte-sorted
pub fn canonical_string<'a, I>(params: I, version: SignatureVersion) -> String
where
    I: IntoIterator<Item = (&'a String, &'a ParamValue)>,
{
    let sorted: BTreeMap<&str, String> = params
        .into_iter()
        .filter_map(|(key, value)| value.canonical(version).map(|v| (key.as_str(), v)))
        .collect();

    sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Hex digest of the canonical string followed by the secret
pub fn sign_request<'a, I>(
    params: I,
    secret: &str,
    algorithm: DigestAlgorithm,
    version: SignatureVersion,
) -> Result<String>
where
    I: IntoIterator<Item = (&'a String, &'a ParamValue)>,
{
    if secret.is_empty() {
        return Err(TransformError::missing_secret(
            "configure signing.api_secret before signing requests",
        ));
    }
    let mut pre_image = canonical_string(params, version);
    pre_image.push_str(secret);
    Ok(algorithm.hex_digest(pre_image.as_bytes()))
}

/// Parameters that take part in an upload signature
pub fn signable_upload_params(params: &Params) -> impl Iterator<Item = (&String, &ParamValue)> {
    params
        .iter()
        .filter(|(key, _)| !UNSIGNED_UPLOAD_PARAMS.contains(&key.as_str()))
}
