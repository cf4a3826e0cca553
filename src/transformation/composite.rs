//! Composite qualifier values
//!
//! Composites are multi-part values (colors, gradients, point lists, effects,
//! borders, layers) that render their sub-components in a fixed declared
//! order, skipping absent components and joining the rest with a
//! component-specific delimiter.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE, Engine};

use super::value::{BoolPolicy, Scalar};
use crate::error::{Result, TransformError};

/// Rewrite a leading `#` to the service's `rgb:` prefix.
///
/// Anything else, including values already in `rgb:` form and named colors,
/// passes through unchanged, so the rewrite happens at most once.
pub fn rewrite_color(raw: &str) -> String {
    match raw.strip_prefix('#') {
        Some(hex) => format!("rgb:{}", hex),
        None => raw.to_string(),
    }
}

/// A value with sub-components rendered in declared order
pub trait CompositeValue {
    /// Sub-components in declared order; `None` marks an absent component
    fn components(&self) -> Vec<Option<String>>;

    fn delimiter(&self) -> char {
        ':'
    }

    fn render(&self) -> Option<String> {
        let present: Vec<String> = self
            .components()
            .into_iter()
            .flatten()
            .filter(|c| !c.is_empty())
            .collect();
        if present.is_empty() {
            None
        } else {
            Some(present.join(&self.delimiter().to_string()))
        }
    }
}

/// A color as given by the caller (`#ff0000`, `rgb:ff0000`, `red`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn new(raw: impl Into<String>) -> Self {
        Color(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Color(value)
    }
}

impl CompositeValue for Color {
    fn components(&self) -> Vec<Option<String>> {
        vec![Some(rewrite_color(&self.0))]
    }
}

/// Which pixels an automatic background is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundSource {
    Border,
    Predominant,
}

impl BackgroundSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Border => "border",
            Self::Predominant => "predominant",
        }
    }
}

/// Direction of a gradient background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    Horizontal,
    Vertical,
    DiagonalDesc,
    DiagonalAsc,
}

impl GradientDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::DiagonalDesc => "diagonal_desc",
            Self::DiagonalAsc => "diagonal_asc",
        }
    }
}

impl FromStr for GradientDirection {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            "diagonal_desc" => Ok(Self::DiagonalDesc),
            "diagonal_asc" => Ok(Self::DiagonalAsc),
            _ => Err(TransformError::invalid_input(
                "gradient_direction",
                format!("unknown direction: {}", s),
            )),
        }
    }
}

/// Automatic (optionally gradient) background.
///
/// Renders as `auto:{mode}:{colors}:{direction}:palette_{c1}_{c2}` in that
/// order, regardless of the order the setters were called in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutoBackground {
    source: Option<BackgroundSource>,
    gradient: bool,
    contrast: bool,
    gradient_colors: Option<u8>,
    direction: Option<GradientDirection>,
    palette: Vec<Color>,
}

impl AutoBackground {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: BackgroundSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn contrast(mut self) -> Self {
        self.contrast = true;
        self
    }

    pub fn gradient(mut self) -> Self {
        self.gradient = true;
        self
    }

    /// Number of gradient colors; the service accepts 2 or 4
    pub fn gradient_colors(mut self, colors: u8) -> Result<Self> {
        if colors != 2 && colors != 4 {
            return Err(TransformError::invalid_input(
                "gradient_colors",
                format!("must be 2 or 4, got {}", colors),
            ));
        }
        self.gradient = true;
        self.gradient_colors = Some(colors);
        Ok(self)
    }

    pub fn direction(mut self, direction: GradientDirection) -> Self {
        self.gradient = true;
        self.direction = Some(direction);
        self
    }

    pub fn palette<I, C>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    fn mode(&self) -> Option<String> {
        let source = self.source?;
        let mut mode = source.as_str().to_string();
        if self.gradient {
            mode.push_str("_gradient");
        }
        if self.contrast {
            mode.push_str("_contrast");
        }
        Some(mode)
    }
}

impl CompositeValue for AutoBackground {
    fn components(&self) -> Vec<Option<String>> {
        let palette = if self.palette.is_empty() {
            None
        } else {
            let colors: Vec<String> = self
                .palette
                .iter()
                .map(|c| rewrite_color(c.raw()))
                .collect();
            Some(format!("palette_{}", colors.join("_")))
        };
        vec![
            Some("auto".to_string()),
            self.mode(),
            self.gradient_colors.map(|n| n.to_string()),
            self.direction.map(|d| d.as_str().to_string()),
            palette,
        ]
    }
}

/// A single coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(i64::from(x), i64::from(y))
    }
}

/// Ordered list of points, rendered as `x1:y1:x2:y2…`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointList(Vec<Point>);

impl PointList {
    pub fn new<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        PointList(points.into_iter().map(Into::into).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl CompositeValue for PointList {
    fn components(&self) -> Vec<Option<String>> {
        self.0
            .iter()
            .flat_map(|p| [Some(p.x.to_string()), Some(p.y.to_string())])
            .collect()
    }
}

/// One argument of an effect
#[derive(Debug, Clone, PartialEq)]
pub enum EffectArg {
    Scalar(Scalar),
    Points(PointList),
}

macro_rules! effect_arg_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for EffectArg {
                fn from(value: $ty) -> Self {
                    EffectArg::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

effect_arg_from_scalar!(&str, String, i32, u32, i64, bool);

impl From<Scalar> for EffectArg {
    fn from(value: Scalar) -> Self {
        EffectArg::Scalar(value)
    }
}

impl From<PointList> for EffectArg {
    fn from(value: PointList) -> Self {
        EffectArg::Points(value)
    }
}

/// A named effect with positional arguments (`sepia:50`,
/// `distort:40:25:280:60:260:155:35:165`)
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    name: String,
    args: Vec<EffectArg>,
}

impl Effect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<EffectArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Perspective distortion mapping the four image corners to `corners`
    pub fn distort(corners: PointList) -> Result<Self> {
        if corners.len() != 4 {
            return Err(TransformError::invalid_input(
                "distort",
                format!("expected 4 corner points, got {}", corners.len()),
            ));
        }
        Ok(Effect::new("distort").arg(EffectArg::Points(corners)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Effect {
    fn from(value: &str) -> Self {
        Effect::new(value)
    }
}

impl CompositeValue for Effect {
    fn components(&self) -> Vec<Option<String>> {
        if self.name.is_empty() {
            return Vec::new();
        }
        let mut parts = vec![Some(self.name.clone())];
        for arg in &self.args {
            parts.push(match arg {
                EffectArg::Scalar(scalar) => scalar.render(BoolPolicy::Numeric),
                EffectArg::Points(points) => points.render(),
            });
        }
        parts
    }

    /// Arguments are positional: an empty argument keeps its slot
    /// (`x::5`), only trailing empties are dropped.
    fn render(&self) -> Option<String> {
        let mut parts: Vec<String> = self
            .components()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(&self.delimiter().to_string()))
        }
    }
}

/// Border rendered as `{width}px_{style}_{color}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    width: Option<u32>,
    style: String,
    color: Option<Color>,
}

impl Border {
    pub fn new(width: u32, color: impl Into<Color>) -> Self {
        Self {
            width: Some(width),
            style: "solid".to_string(),
            color: Some(color.into()),
        }
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

impl CompositeValue for Border {
    fn components(&self) -> Vec<Option<String>> {
        if self.width.is_none() && self.color.is_none() {
            return Vec::new();
        }
        vec![
            self.width.map(|w| format!("{}px", w)),
            Some(self.style.clone()),
            self.color.as_ref().map(|c| rewrite_color(c.raw())),
        ]
    }

    fn delimiter(&self) -> char {
        '_'
    }
}

/// Font settings of a text layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    family: String,
    size: u32,
    weight: Option<String>,
    style: Option<String>,
    decoration: Option<String>,
    alignment: Option<String>,
    stroke: bool,
    letter_spacing: Option<i32>,
    line_spacing: Option<i32>,
}

impl TextStyle {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: None,
            style: None,
            decoration: None,
            alignment: None,
            stroke: false,
            letter_spacing: None,
            line_spacing: None,
        }
    }

    pub fn weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn bold(self) -> Self {
        self.weight("bold")
    }

    pub fn font_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn italic(self) -> Self {
        self.font_style("italic")
    }

    pub fn decoration(mut self, decoration: impl Into<String>) -> Self {
        self.decoration = Some(decoration.into());
        self
    }

    pub fn underline(self) -> Self {
        self.decoration("underline")
    }

    pub fn align(mut self, alignment: impl Into<String>) -> Self {
        self.alignment = Some(alignment.into());
        self
    }

    pub fn stroke(mut self) -> Self {
        self.stroke = true;
        self
    }

    pub fn letter_spacing(mut self, spacing: i32) -> Self {
        self.letter_spacing = Some(spacing);
        self
    }

    pub fn line_spacing(mut self, spacing: i32) -> Self {
        self.line_spacing = Some(spacing);
        self
    }
}

fn unless_normal(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| v != "normal")
}

impl CompositeValue for TextStyle {
    fn components(&self) -> Vec<Option<String>> {
        vec![
            Some(self.family.replace(' ', "%20")),
            Some(self.size.to_string()),
            unless_normal(&self.weight),
            unless_normal(&self.style),
            unless_normal(&self.decoration),
            self.alignment.clone(),
            self.stroke.then(|| "stroke".to_string()),
            self.letter_spacing.map(|n| format!("letter_spacing_{}", n)),
            self.line_spacing.map(|n| format!("line_spacing_{}", n)),
        ]
    }

    fn delimiter(&self) -> char {
        '_'
    }
}

/// Source of an overlay or underlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    /// Another asset by public id; folder separators become `:`
    Image { public_id: String },
    /// An asset of a non-image resource type (`video:`, `raw:`)
    Resource {
        resource_type: String,
        public_id: String,
    },
    /// A remote URL, base64url-encoded
    Fetch { url: String },
    /// Rendered text
    Text { style: TextStyle, text: String },
}

impl Layer {
    pub fn image(public_id: impl Into<String>) -> Self {
        Layer::Image {
            public_id: public_id.into(),
        }
    }

    pub fn resource(resource_type: impl Into<String>, public_id: impl Into<String>) -> Self {
        Layer::Resource {
            resource_type: resource_type.into(),
            public_id: public_id.into(),
        }
    }

    pub fn fetch(url: impl Into<String>) -> Self {
        Layer::Fetch { url: url.into() }
    }

    pub fn text(style: TextStyle, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(TransformError::invalid_input(
                "text",
                "text layer requires non-empty text",
            ));
        }
        Ok(Layer::Text { style, text })
    }
}

impl From<&str> for Layer {
    fn from(value: &str) -> Self {
        Layer::image(value)
    }
}

impl CompositeValue for Layer {
    fn components(&self) -> Vec<Option<String>> {
        match self {
            Layer::Image { public_id } => vec![Some(public_id.replace('/', ":"))],
            Layer::Resource {
                resource_type,
                public_id,
            } => vec![
                Some(resource_type.clone()),
                Some(public_id.replace('/', ":")),
            ],
            Layer::Fetch { url } => vec![
                Some("fetch".to_string()),
                Some(URL_SAFE.encode(url.as_bytes())),
            ],
            Layer::Text { style, text } => vec![
                Some("text".to_string()),
                style.render(),
                Some(urlencoding::encode(text).into_owned()),
            ],
        }
    }
}

/// Closed set of composite values a qualifier can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Composite {
    Color(Color),
    AutoBackground(AutoBackground),
    Points(PointList),
    Effect(Effect),
    Border(Border),
    Layer(Layer),
}

impl Composite {
    pub fn render(&self) -> Option<String> {
        match self {
            Composite::Color(c) => c.render(),
            Composite::AutoBackground(b) => b.render(),
            Composite::Points(p) => p.render(),
            Composite::Effect(e) => e.render(),
            Composite::Border(b) => b.render(),
            Composite::Layer(l) => l.render(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Composite::Color(_) => "color",
            Composite::AutoBackground(_) => "auto_background",
            Composite::Points(_) => "points",
            Composite::Effect(_) => "effect",
            Composite::Border(_) => "border",
            Composite::Layer(_) => "layer",
        }
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().unwrap_or_default())
    }
}
