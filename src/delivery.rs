//! Delivery path assembly
//!
//! Builds `{resource_type}/{delivery_type}/[s--sig--/][transformation/][vN/]public_id[.format]`.
//! The compiled transformation string is embedded verbatim; nothing here
//! re-escapes it. Host names and transport are left to the caller.
//!
//! The URL signature covers `[transformation/]public_id[.format]`. The `vN`
//! segment is left out of the signed part unless `sign_version` is set.

use crate::config::DeliveryConfig;
use crate::constants::DEFAULT_FORCED_VERSION;
use crate::error::{Result, TransformError};
use crate::signing::Signer;
use crate::transformation::Transformation;

/// True when the id already starts with a `vNNN/` segment
fn has_version_segment(public_id: &str) -> bool {
    public_id
        .strip_prefix('v')
        .and_then(|rest| rest.split_once('/'))
        .is_some_and(|(digits, _)| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Path to one delivered asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPath {
    public_id: String,
    transformation: String,
    version: Option<u64>,
    format: Option<String>,
    force_version: bool,
    sign_version: bool,
    resource_type: String,
    delivery_type: String,
}

impl DeliveryPath {
    pub fn new(public_id: impl Into<String>) -> Self {
        Self::from_config(public_id, &DeliveryConfig::default())
    }

    pub fn from_config(public_id: impl Into<String>, config: &DeliveryConfig) -> Self {
        Self {
            public_id: public_id.into(),
            transformation: String::new(),
            version: None,
            format: None,
            force_version: config.force_version,
            sign_version: config.sign_version,
            resource_type: config.resource_type.clone(),
            delivery_type: config.delivery_type.clone(),
        }
    }

    /// Compile and embed a transformation
    pub fn transformation(mut self, transformation: &Transformation) -> Self {
        self.transformation = transformation.render();
        self
    }

    /// Embed an already compiled transformation string
    pub fn transformation_string(mut self, compiled: impl Into<String>) -> Self {
        self.transformation = compiled.into();
        self
    }

    pub fn version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn force_version(mut self, force: bool) -> Self {
        self.force_version = force;
        self
    }

    /// Include the `vN` segment in the signed part
    pub fn sign_version(mut self, sign: bool) -> Self {
        self.sign_version = sign;
        self
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn delivery_type(mut self, delivery_type: impl Into<String>) -> Self {
        self.delivery_type = delivery_type.into();
        self
    }

    fn effective_version(&self) -> Option<u64> {
        if self.version.is_some() {
            return self.version;
        }
        let is_url = self.public_id.starts_with("http://") || self.public_id.starts_with("https://");
        if self.force_version
            && self.public_id.contains('/')
            && !is_url
            && !has_version_segment(&self.public_id)
        {
            return Some(DEFAULT_FORCED_VERSION);
        }
        None
    }

    /// Part of the path covered by a URL signature
    pub fn signed_part(&self) -> Result<String> {
        self.path_tail(self.sign_version)
    }

    /// `[transformation/][vN/]public_id[.format]`
    fn path_tail(&self, with_version: bool) -> Result<String> {
        if self.public_id.is_empty() {
            return Err(TransformError::invalid_input(
                "public_id",
                "a public id is required",
            ));
        }

        let mut source = self.public_id.clone();
        if let Some(format) = self.format.as_deref().filter(|f| !f.is_empty()) {
            source.push('.');
            source.push_str(format);
        }

        let mut segments: Vec<String> = Vec::with_capacity(3);
        if !self.transformation.is_empty() {
            segments.push(self.transformation.clone());
        }
        if let Some(version) = self.effective_version().filter(|_| with_version) {
            segments.push(format!("v{}", version));
        }
        segments.push(source);
        Ok(segments.join("/"))
    }

    /// Full path; signed when a signer is given
    pub fn build(&self, signer: Option<&Signer>) -> Result<String> {
        let mut segments = vec![self.resource_type.clone(), self.delivery_type.clone()];
        if let Some(signer) = signer {
            segments.push(signer.sign_url(&self.signed_part()?)?);
        }
        segments.push(self.path_tail(true)?);

        let path = segments.join("/");
        tracing::trace!(path = %path, signed = signer.is_some(), "Built delivery path");
        Ok(path)
    }
}
