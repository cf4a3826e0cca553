//! Qualifier values
//!
//! A qualifier value is a closed set of shapes: a scalar, an ordered list, a
//! composite with declared sub-components, or a nested transformation. Each
//! shape renders itself to an optional token string; `None` means the
//! qualifier is omitted entirely.

use std::fmt;

use super::chain::Transformation;
use super::composite::{
    rewrite_color, AutoBackground, Border, Color, Composite, Effect, Layer, PointList,
};
use super::expression::normalize_expression;
use crate::error::{Result, TransformError};

/// How a boolean scalar renders for a given qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolPolicy {
    /// `true` renders as `1`, `false` omits the qualifier
    #[default]
    Numeric,
    /// `true`/`false` render literally
    Literal,
    /// `true` emits the bare key, `false` omits the qualifier
    KeyOnly,
}

/// A finite floating point number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finite(f64);

impl Finite {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Finite(value))
        } else {
            Err(TransformError::invalid_input(
                "float",
                format!("{} is not a finite number", value),
            ))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Finite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_float(self.0))
    }
}

/// Format a float without locale separators, exponents or padding zeros.
///
/// Integral values keep a single fractional digit (`1.0`): the service reads
/// `w_1.0` as a relative width and `w_1` as one pixel.
pub fn format_float(value: f64) -> String {
    // collapse -0.0
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// A single scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(Finite),
    Bool(bool),
}

impl Scalar {
    pub fn float(value: f64) -> Result<Self> {
        Finite::new(value).map(Scalar::Float)
    }

    pub fn render(&self, policy: BoolPolicy) -> Option<String> {
        match self {
            Scalar::Text(text) if text.is_empty() => None,
            Scalar::Text(text) => Some(text.clone()),
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::Float(f) => Some(f.to_string()),
            Scalar::Bool(b) => match (policy, b) {
                (BoolPolicy::Numeric, true) => Some("1".to_string()),
                (BoolPolicy::Literal, true) => Some("true".to_string()),
                (BoolPolicy::Literal, false) => Some("false".to_string()),
                (BoolPolicy::KeyOnly, true) => Some(String::new()),
                (_, false) => None,
            },
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Text(value.clone())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<Finite> for Scalar {
    fn from(value: Finite) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// An ordered list of values joined by a delimiter.
///
/// When no delimiter is given, the owning qualifier's declared delimiter is
/// used.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue {
    items: Vec<Value>,
    delimiter: Option<char>,
}

impl ListValue {
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            delimiter: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    pub fn push(&mut self, item: impl Into<Value>) {
        self.items.push(item.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Rendering rules a qualifier key imposes on its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRules {
    pub bool_policy: BoolPolicy,
    pub list_delimiter: char,
    pub normalize_expressions: bool,
    pub rewrite_colors: bool,
}

impl Default for RenderRules {
    fn default() -> Self {
        Self {
            bool_policy: BoolPolicy::Numeric,
            list_delimiter: ':',
            normalize_expressions: false,
            rewrite_colors: false,
        }
    }
}

/// The value held by a qualifier
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    List(ListValue),
    Composite(Composite),
    Nested(Box<Transformation>),
}

impl Value {
    pub fn float(value: f64) -> Result<Self> {
        Scalar::float(value).map(Value::Scalar)
    }

    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(ListValue::new(items))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// True when this value, or any list item inside it, is a nested
    /// transformation
    pub fn contains_nested(&self) -> bool {
        match self {
            Value::Nested(_) => true,
            Value::List(list) => list.items.iter().any(Value::contains_nested),
            _ => false,
        }
    }

    pub fn render(&self, rules: &RenderRules) -> Option<String> {
        match self {
            Value::Scalar(scalar) => {
                let rendered = scalar.render(rules.bool_policy)?;
                let rendered = match scalar {
                    Scalar::Text(_) if rules.normalize_expressions => {
                        normalize_expression(&rendered)
                    }
                    Scalar::Text(_) if rules.rewrite_colors => rewrite_color(&rendered),
                    _ => rendered,
                };
                Some(rendered)
            }
            Value::List(list) => {
                let delimiter = list.delimiter.unwrap_or(rules.list_delimiter);
                let parts: Vec<String> = list
                    .items
                    .iter()
                    .filter_map(|item| item.render(rules))
                    .filter(|part| !part.is_empty())
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(&delimiter.to_string()))
                }
            }
            Value::Composite(composite) => composite.render(),
            Value::Nested(transformation) => {
                let rendered = transformation.render();
                if rendered.is_empty() {
                    None
                } else {
                    Some(rendered)
                }
            }
        }
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

value_from_scalar!(&str, String, &String, i32, u32, i64, Finite, bool);

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<ListValue> for Value {
    fn from(value: ListValue) -> Self {
        Value::List(value)
    }
}

impl From<Composite> for Value {
    fn from(value: Composite) -> Self {
        Value::Composite(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Value::Composite(Composite::Color(value))
    }
}

impl From<AutoBackground> for Value {
    fn from(value: AutoBackground) -> Self {
        Value::Composite(Composite::AutoBackground(value))
    }
}

impl From<PointList> for Value {
    fn from(value: PointList) -> Self {
        Value::Composite(Composite::Points(value))
    }
}

impl From<Effect> for Value {
    fn from(value: Effect) -> Self {
        Value::Composite(Composite::Effect(value))
    }
}

impl From<Border> for Value {
    fn from(value: Border) -> Self {
        Value::Composite(Composite::Border(value))
    }
}

impl From<Layer> for Value {
    fn from(value: Layer) -> Self {
        Value::Composite(Composite::Layer(value))
    }
}

impl From<Transformation> for Value {
    fn from(value: Transformation) -> Self {
        Value::Nested(Box::new(value))
    }
}
