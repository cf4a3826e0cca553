//! Actions: one manipulation step, rendered as a single path segment
//!
//! An action holds at most one qualifier per key; setting a key again
//! replaces the earlier value. Rendering order never depends on the order
//! the setters were called in.

use std::collections::BTreeMap;

use super::compiler;
use super::composite::{AutoBackground, Border, Color, Effect, Layer};
use super::qualifier::{Qualifier, QualifierKey};
use super::value::{ListValue, Scalar, Value};
use crate::error::{Result, TransformError};

/// An unordered bag of qualifiers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Action {
    qualifiers: BTreeMap<QualifierKey, Qualifier>,
    custom: BTreeMap<String, String>,
    raw: Option<String>,
}

impl Action {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action holding only a condition, opening an `if` block
    pub fn condition(expression: impl Into<String>) -> Self {
        Self::new().if_condition(expression)
    }

    /// `if_else` marker between the branches of a conditional block
    pub fn if_else() -> Self {
        Self::new().custom("if", "else")
    }

    /// `if_end` marker closing a conditional block
    pub fn if_end() -> Self {
        Self::new().custom("if", "end")
    }

    /// Add a qualifier, replacing any earlier one with the same key
    pub fn qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifiers.insert(qualifier.key().clone(), qualifier);
        self
    }

    /// Set an arbitrary key/value, with shape checks
    pub fn set(self, key: QualifierKey, value: impl Into<Value>) -> Result<Self> {
        let qualifier = Qualifier::new(key, value)?;
        Ok(self.qualifier(qualifier))
    }

    fn scalar(self, key: QualifierKey, value: impl Into<Scalar>) -> Self {
        self.qualifier(Qualifier::unchecked(key, Value::Scalar(value.into())))
    }

    fn composite(self, key: QualifierKey, value: impl Into<Value>) -> Self {
        self.qualifier(Qualifier::unchecked(key, value.into()))
    }

    pub fn width(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Width, value)
    }

    pub fn height(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Height, value)
    }

    pub fn crop(self, mode: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Crop, mode)
    }

    pub fn gravity(self, gravity: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Gravity, gravity)
    }

    pub fn x(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::X, value)
    }

    pub fn y(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Y, value)
    }

    pub fn zoom(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Zoom, value)
    }

    pub fn angle(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Angle, value)
    }

    /// Several rotation modes applied together (`a_auto_right.hflip`)
    pub fn angle_modes<I, S>(self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let modes = ListValue::new(modes.into_iter().map(Into::into).collect::<Vec<String>>());
        self.composite(QualifierKey::Angle, modes)
    }

    pub fn aspect_ratio(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::AspectRatio, value)
    }

    /// Aspect ratio as `width:height`
    pub fn aspect_ratio_parts(self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TransformError::invalid_input(
                "aspect_ratio",
                format!("{}:{} has a zero component", width, height),
            ));
        }
        Ok(self.scalar(
            QualifierKey::AspectRatio,
            format!("{}:{}", width, height),
        ))
    }

    pub fn dpr(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Dpr, value)
    }

    pub fn opacity(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Opacity, value)
    }

    pub fn quality(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Quality, value)
    }

    pub fn radius(self, value: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Radius, value)
    }

    /// Per-corner radius; one to four values
    pub fn radius_corners<I, S>(self, corners: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        let corners: Vec<Value> = corners
            .into_iter()
            .map(|c| Value::Scalar(c.into()))
            .collect();
        self.set(QualifierKey::Radius, ListValue::new(corners))
    }

    pub fn background(self, color: impl Into<Color>) -> Self {
        let color: Color = color.into();
        self.composite(QualifierKey::Background, color)
    }

    pub fn auto_background(self, background: AutoBackground) -> Self {
        self.composite(QualifierKey::Background, background)
    }

    pub fn color(self, color: impl Into<Color>) -> Self {
        let color: Color = color.into();
        self.composite(QualifierKey::Color, color)
    }

    pub fn border(self, border: Border) -> Self {
        self.composite(QualifierKey::Border, border)
    }

    pub fn effect(self, effect: impl Into<Effect>) -> Self {
        let effect: Effect = effect.into();
        self.composite(QualifierKey::Effect, effect)
    }

    pub fn overlay(self, layer: impl Into<Layer>) -> Self {
        let layer: Layer = layer.into();
        self.composite(QualifierKey::Overlay, layer)
    }

    pub fn underlay(self, layer: impl Into<Layer>) -> Self {
        let layer: Layer = layer.into();
        self.composite(QualifierKey::Underlay, layer)
    }

    /// Replace all flags; duplicates keep their first position
    pub fn flags<I, S>(self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for flag in flags.into_iter().map(Into::into) {
            if !unique.contains(&flag) {
                unique.push(flag);
            }
        }
        self.composite(QualifierKey::Flags, ListValue::new(unique))
    }

    /// Append a single flag to the existing ones
    pub fn add_flag(self, flag: impl Into<String>) -> Self {
        let mut existing: Vec<String> = match self.get(&QualifierKey::Flags).map(Qualifier::value) {
            Some(Value::List(list)) => list
                .items()
                .iter()
                .filter_map(|item| match item {
                    Value::Scalar(Scalar::Text(text)) => Some(text.clone()),
                    _ => None,
                })
                .collect(),
            Some(Value::Scalar(Scalar::Text(text))) => vec![text.clone()],
            _ => Vec::new(),
        };
        existing.push(flag.into());
        self.flags(existing)
    }

    pub fn fetch_format(self, format: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::FetchFormat, format)
    }

    pub fn prefix(self, prefix: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Prefix, prefix)
    }

    pub fn page(self, page: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Page, page)
    }

    pub fn density(self, density: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Density, density)
    }

    pub fn delay(self, delay: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Delay, delay)
    }

    pub fn default_image(self, public_id: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::DefaultImage, public_id)
    }

    pub fn color_space(self, space: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::ColorSpace, space)
    }

    pub fn start_offset(self, offset: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::StartOffset, offset)
    }

    pub fn end_offset(self, offset: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::EndOffset, offset)
    }

    pub fn duration(self, duration: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::Duration, duration)
    }

    pub fn video_codec(self, codec: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::VideoCodec, codec)
    }

    pub fn audio_codec(self, codec: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::AudioCodec, codec)
    }

    pub fn bit_rate(self, rate: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::BitRate, rate)
    }

    pub fn custom_function(self, function: impl Into<Scalar>) -> Self {
        self.scalar(QualifierKey::CustomFunction, function)
    }

    /// Reference one or more named transformations (`t_a.b`)
    pub fn named_transformation<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.composite(QualifierKey::NamedTransformation, ListValue::new(names))
    }

    /// Condition guarding this action; always rendered first
    pub fn if_condition(self, expression: impl Into<String>) -> Self {
        self.scalar(QualifierKey::If, expression.into())
    }

    /// Define a user variable (`$name_value`)
    pub fn variable(self, name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let key = QualifierKey::variable(name)?;
        let value = value.into();
        if !matches!(value, Value::Scalar(_) | Value::List(_)) {
            return Err(TransformError::invalid_input(
                key.short(),
                "variable value must be a scalar or a list",
            ));
        }
        self.set(key, value)
    }

    /// Opaque key/value merged after the typed qualifiers.
    ///
    /// A custom key equal to a qualifier key overrides that qualifier's
    /// token; an empty value renders as the bare key.
    pub fn custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    /// Raw segment appended verbatim after the sorted tokens
    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    pub fn remove(mut self, key: &QualifierKey) -> Self {
        self.qualifiers.remove(key);
        self
    }

    pub fn get(&self, key: &QualifierKey) -> Option<&Qualifier> {
        self.qualifiers.get(key)
    }

    pub fn qualifiers(&self) -> impl Iterator<Item = &Qualifier> {
        self.qualifiers.values()
    }

    pub fn custom_attributes(&self) -> &BTreeMap<String, String> {
        &self.custom
    }

    pub fn raw_segment(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of typed qualifiers and custom attributes
    pub fn len(&self) -> usize {
        self.qualifiers.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualifiers.is_empty()
            && self.custom.is_empty()
            && self.raw.as_deref().map_or(true, str::is_empty)
    }

    /// Render to a single segment, or `None` when nothing would be emitted
    pub fn render(&self) -> Option<String> {
        compiler::render_action(self)
    }
}
