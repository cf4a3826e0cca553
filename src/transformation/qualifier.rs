//! Qualifiers: one named transformation parameter and its value
//!
//! The set of known qualifier keys is closed. Each key declares how its
//! value renders (bool policy, list delimiter, expression normalisation,
//! color rewriting) and which value shapes it accepts. Shape checks happen
//! when the qualifier is constructed, never at render time.

use std::fmt;
use std::str::FromStr;

use super::composite::Composite;
use super::value::{BoolPolicy, RenderRules, Scalar, Value};
use crate::error::{Result, TransformError};

/// Canonical qualifier keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualifierKey {
    Angle,
    AspectRatio,
    AudioCodec,
    Background,
    BitRate,
    Border,
    Color,
    ColorSpace,
    Crop,
    CustomFunction,
    DefaultImage,
    Delay,
    Density,
    Dpr,
    Duration,
    Effect,
    EndOffset,
    FetchFormat,
    Flags,
    Gravity,
    Height,
    If,
    NamedTransformation,
    Opacity,
    Overlay,
    Page,
    Prefix,
    Quality,
    Radius,
    StartOffset,
    Underlay,
    VideoCodec,
    Width,
    X,
    Y,
    Zoom,
    /// User-defined variable, stored with its leading `$`
    Variable(String),
}

/// (key, short name, long option name)
static KNOWN_KEYS: &[(QualifierKey, &str, &str)] = &[
    (QualifierKey::Angle, "a", "angle"),
    (QualifierKey::AspectRatio, "ar", "aspect_ratio"),
    (QualifierKey::AudioCodec, "ac", "audio_codec"),
    (QualifierKey::Background, "b", "background"),
    (QualifierKey::BitRate, "br", "bit_rate"),
    (QualifierKey::Border, "bo", "border"),
    (QualifierKey::Color, "co", "color"),
    (QualifierKey::ColorSpace, "cs", "color_space"),
    (QualifierKey::Crop, "c", "crop"),
    (QualifierKey::CustomFunction, "fn", "custom_function"),
    (QualifierKey::DefaultImage, "d", "default_image"),
    (QualifierKey::Delay, "dl", "delay"),
    (QualifierKey::Density, "dn", "density"),
    (QualifierKey::Dpr, "dpr", "dpr"),
    (QualifierKey::Duration, "du", "duration"),
    (QualifierKey::Effect, "e", "effect"),
    (QualifierKey::EndOffset, "eo", "end_offset"),
    (QualifierKey::FetchFormat, "f", "fetch_format"),
    (QualifierKey::Flags, "fl", "flags"),
    (QualifierKey::Gravity, "g", "gravity"),
    (QualifierKey::Height, "h", "height"),
    (QualifierKey::If, "if", "if"),
    (QualifierKey::NamedTransformation, "t", "transformation"),
    (QualifierKey::Opacity, "o", "opacity"),
    (QualifierKey::Overlay, "l", "overlay"),
    (QualifierKey::Page, "pg", "page"),
    (QualifierKey::Prefix, "p", "prefix"),
    (QualifierKey::Quality, "q", "quality"),
    (QualifierKey::Radius, "r", "radius"),
    (QualifierKey::StartOffset, "so", "start_offset"),
    (QualifierKey::Underlay, "u", "underlay"),
    (QualifierKey::VideoCodec, "vc", "video_codec"),
    (QualifierKey::Width, "w", "width"),
    (QualifierKey::X, "x", "x"),
    (QualifierKey::Y, "y", "y"),
    (QualifierKey::Zoom, "z", "zoom"),
];

impl QualifierKey {
    /// Create a variable key, validating `$` + alphanumeric name
    pub fn variable(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let valid = name
            .strip_prefix('$')
            .map(|rest| {
                let mut chars = rest.chars();
                chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                    && chars.all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or(false);
        if !valid {
            return Err(TransformError::invalid_input(
                "variable",
                format!("'{}' must be '$' followed by a letter and letters or digits", name),
            ));
        }
        Ok(QualifierKey::Variable(name))
    }

    /// Short key as it appears in the rendered string
    pub fn short(&self) -> &str {
        if let QualifierKey::Variable(name) = self {
            return name;
        }
        KNOWN_KEYS
            .iter()
            .find(|(key, _, _)| key == self)
            .map(|(_, short, _)| *short)
            .unwrap_or_default()
    }

    /// Long option name used in loosely typed option maps
    pub fn option_name(&self) -> Option<&'static str> {
        KNOWN_KEYS
            .iter()
            .find(|(key, _, _)| key == self)
            .map(|(_, _, long)| *long)
    }

    pub fn from_option_name(name: &str) -> Option<Self> {
        KNOWN_KEYS
            .iter()
            .find(|(_, _, long)| *long == name)
            .map(|(key, _, _)| key.clone())
    }

    pub fn bool_policy(&self) -> BoolPolicy {
        match self {
            QualifierKey::Variable(_) => BoolPolicy::Literal,
            _ => BoolPolicy::Numeric,
        }
    }

    pub fn list_delimiter(&self) -> char {
        match self {
            QualifierKey::Flags | QualifierKey::Angle | QualifierKey::NamedTransformation => '.',
            _ => ':',
        }
    }

    /// Keys whose text values may be written as readable expressions
    pub fn accepts_expressions(&self) -> bool {
        matches!(
            self,
            QualifierKey::Width
                | QualifierKey::Height
                | QualifierKey::X
                | QualifierKey::Y
                | QualifierKey::Angle
                | QualifierKey::AspectRatio
                | QualifierKey::Opacity
                | QualifierKey::Quality
                | QualifierKey::Radius
                | QualifierKey::Zoom
                | QualifierKey::Dpr
                | QualifierKey::StartOffset
                | QualifierKey::EndOffset
                | QualifierKey::Duration
                | QualifierKey::If
                | QualifierKey::Variable(_)
        )
    }

    /// Keys whose plain text values are colors
    pub fn rewrites_colors(&self) -> bool {
        matches!(self, QualifierKey::Background | QualifierKey::Color)
    }

    fn accepts_nested(&self) -> bool {
        matches!(self, QualifierKey::Overlay | QualifierKey::Underlay)
    }

    fn accepts_composite(&self, composite: &Composite) -> bool {
        match composite {
            Composite::Layer(_) => self.accepts_nested(),
            Composite::Effect(_) => *self == QualifierKey::Effect,
            Composite::AutoBackground(_) => *self == QualifierKey::Background,
            Composite::Color(_) | Composite::Points(_) | Composite::Border(_) => {
                *self != QualifierKey::If && !matches!(self, QualifierKey::Variable(_))
            }
        }
    }

    fn max_list_len(&self) -> Option<usize> {
        match self {
            QualifierKey::Radius => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for QualifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

impl FromStr for QualifierKey {
    type Err = TransformError;

    /// Parse a short key (`w`, `c`, `$name`)
    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with('$') {
            return QualifierKey::variable(s);
        }
        KNOWN_KEYS
            .iter()
            .find(|(_, short, _)| *short == s)
            .map(|(key, _, _)| key.clone())
            .ok_or_else(|| {
                TransformError::invalid_input("qualifier", format!("unknown key: {}", s))
            })
    }
}

/// A named parameter with a shape-checked value
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    key: QualifierKey,
    value: Value,
    bool_policy: BoolPolicy,
}

impl Qualifier {
    pub fn new(key: QualifierKey, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        validate_shape(&key, &value)?;
        Ok(Self::unchecked(key, value))
    }

    /// Construct without shape checks; only for values whose shape the
    /// caller guarantees by type
    pub(crate) fn unchecked(key: QualifierKey, value: Value) -> Self {
        let bool_policy = key.bool_policy();
        Self {
            key,
            value,
            bool_policy,
        }
    }

    /// A qualifier that renders as its bare key
    pub fn flag(key: QualifierKey) -> Self {
        Self {
            key,
            value: Value::Scalar(Scalar::Bool(true)),
            bool_policy: BoolPolicy::KeyOnly,
        }
    }

    pub fn with_bool_policy(mut self, policy: BoolPolicy) -> Self {
        self.bool_policy = policy;
        self
    }

    pub fn key(&self) -> &QualifierKey {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replace the value, re-running the shape checks
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        validate_shape(&self.key, &value)?;
        self.value = value;
        Ok(())
    }

    pub fn rules(&self) -> RenderRules {
        RenderRules {
            bool_policy: self.bool_policy,
            list_delimiter: self.key.list_delimiter(),
            normalize_expressions: self.key.accepts_expressions(),
            rewrite_colors: self.key.rewrites_colors(),
        }
    }

    /// Rendered value, or `None` when the qualifier is omitted.
    ///
    /// `Some("")` means the qualifier renders as its bare key.
    pub fn render(&self) -> Option<String> {
        self.value.render(&self.rules())
    }

    /// `key_value` token, or the bare key for an empty rendered value
    pub fn token(&self) -> Option<String> {
        self.render()
            .map(|value| super::compiler::token(self.key.short(), &value))
    }
}

fn validate_shape(key: &QualifierKey, value: &Value) -> Result<()> {
    let field = key.short().to_string();
    match value {
        Value::Scalar(scalar) => {
            if *key == QualifierKey::If && !matches!(scalar, Scalar::Text(_)) {
                return Err(TransformError::invalid_input(
                    field,
                    "condition must be an expression string",
                ));
            }
        }
        Value::List(list) => {
            if *key == QualifierKey::If {
                return Err(TransformError::invalid_input(
                    field,
                    "condition must be an expression string",
                ));
            }
            if value.contains_nested() {
                return Err(TransformError::invalid_input(
                    field,
                    "list items cannot be nested transformations",
                ));
            }
            if let Some(max) = key.max_list_len() {
                if list.is_empty() || list.len() > max {
                    return Err(TransformError::invalid_input(
                        field,
                        format!("expected 1 to {} values, got {}", max, list.len()),
                    ));
                }
            }
            for item in list.items() {
                if let Value::Composite(composite) = item {
                    if !key.accepts_composite(composite) {
                        return Err(TransformError::invalid_input(
                            field,
                            format!("{} value not accepted here", composite.kind()),
                        ));
                    }
                }
            }
        }
        Value::Composite(composite) => {
            if !key.accepts_composite(composite) {
                return Err(TransformError::invalid_input(
                    field,
                    format!("{} value not accepted here", composite.kind()),
                ));
            }
        }
        Value::Nested(_) => {
            if !key.accepts_nested() {
                return Err(TransformError::invalid_input(
                    field,
                    "nested transformations are only accepted by overlay and underlay",
                ));
            }
        }
    }
    Ok(())
}
