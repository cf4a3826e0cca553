//! Loosely typed option maps
//!
//! Callers that hold transformation options as JSON-like maps (long option
//! names, as read from a request or a template) go through this module.
//! Known qualifier names are resolved once into typed qualifiers; every
//! other key is kept as an opaque passthrough attribute and never reaches
//! the compiler.

use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};

use super::action::Action;
use super::chain::Transformation;
use super::composite::Layer;
use super::qualifier::{Qualifier, QualifierKey};
use super::value::{ListValue, Scalar, Value};
use crate::error::{Result, TransformError};

/// Keys interpreted here rather than looked up as qualifiers
const TRANSFORMATION_KEY: &str = "transformation";
const VARIABLES_KEY: &str = "variables";
const RAW_KEY: &str = "raw_transformation";

/// Result of splitting an option map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedOptions {
    pub transformation: Transformation,
    /// Opaque passthrough attributes, stringified
    pub attributes: BTreeMap<String, String>,
}

impl ParsedOptions {
    pub fn render(&self) -> String {
        self.transformation.render()
    }
}

/// Parse an option object, or an array of option objects chained in order
pub fn from_options(options: &Json) -> Result<ParsedOptions> {
    let mut parsed = ParsedOptions::default();
    match options {
        Json::Object(map) => parse_object(map, &mut parsed)?,
        Json::Array(items) => {
            for item in items {
                match item {
                    Json::Object(map) => parse_object(map, &mut parsed)?,
                    Json::Null => {}
                    other => {
                        return Err(TransformError::invalid_input(
                            "options",
                            format!("expected an object in the chain, got {}", json_kind(other)),
                        ))
                    }
                }
            }
        }
        Json::Null => {}
        other => {
            return Err(TransformError::invalid_input(
                "options",
                format!("expected an object or array, got {}", json_kind(other)),
            ))
        }
    }

    tracing::debug!(
        actions = parsed.transformation.len(),
        attributes = parsed.attributes.len(),
        "Parsed transformation options"
    );
    Ok(parsed)
}

fn parse_object(map: &Map<String, Json>, parsed: &mut ParsedOptions) -> Result<()> {
    let mut action = Action::new();

    for (name, raw) in map {
        if raw.is_null() {
            continue;
        }
        match name.as_str() {
            TRANSFORMATION_KEY => {
                action = apply_transformation_option(action, raw, parsed)?;
            }
            VARIABLES_KEY => {
                action = apply_variables(action, raw)?;
            }
            RAW_KEY => {
                action = action.raw(expect_text(name, raw)?);
            }
            _ if name.starts_with('$') => {
                action = action.variable(name.as_str(), json_to_value(name, raw)?)?;
            }
            _ => match QualifierKey::from_option_name(name) {
                Some(key) => {
                    let value = match key {
                        QualifierKey::Overlay | QualifierKey::Underlay => match raw {
                            Json::String(public_id) => Value::from(Layer::image(public_id.as_str())),
                            other => json_to_value(name, other)?,
                        },
                        _ => json_to_value(name, raw)?,
                    };
                    action = action.qualifier(Qualifier::new(key, value)?);
                }
                None => {
                    parsed
                        .attributes
                        .insert(name.clone(), attribute_string(raw));
                }
            },
        }
    }

    parsed.transformation.push(action);
    Ok(())
}

/// `transformation` holds either named transformation references or nested
/// option objects, which are chained before the enclosing action
fn apply_transformation_option(
    action: Action,
    raw: &Json,
    parsed: &mut ParsedOptions,
) -> Result<Action> {
    match raw {
        Json::String(name) => Ok(action.named_transformation([name.as_str()])),
        Json::Object(map) => {
            parse_object(map, parsed)?;
            Ok(action)
        }
        Json::Array(items) if items.iter().all(Json::is_string) => {
            let names: Vec<&str> = items.iter().filter_map(Json::as_str).collect();
            Ok(action.named_transformation(names))
        }
        Json::Array(items) => {
            for item in items {
                match item {
                    Json::Object(map) => parse_object(map, parsed)?,
                    other => {
                        return Err(TransformError::invalid_input(
                            TRANSFORMATION_KEY,
                            format!("cannot mix names and objects, got {}", json_kind(other)),
                        ))
                    }
                }
            }
            Ok(action)
        }
        other => Err(TransformError::invalid_input(
            TRANSFORMATION_KEY,
            format!("expected a name, an object or an array, got {}", json_kind(other)),
        )),
    }
}

/// `variables` is either an object or an array of `[name, value]` pairs
fn apply_variables(mut action: Action, raw: &Json) -> Result<Action> {
    match raw {
        Json::Object(map) => {
            for (name, value) in map {
                action = action.variable(name.as_str(), json_to_value(name, value)?)?;
            }
            Ok(action)
        }
        Json::Array(pairs) => {
            for pair in pairs {
                match pair.as_array().map(Vec::as_slice) {
                    Some([Json::String(name), value]) => {
                        action = action.variable(name.as_str(), json_to_value(name, value)?)?;
                    }
                    _ => {
                        return Err(TransformError::invalid_input(
                            VARIABLES_KEY,
                            "expected [name, value] pairs",
                        ))
                    }
                }
            }
            Ok(action)
        }
        other => Err(TransformError::invalid_input(
            VARIABLES_KEY,
            format!("expected an object or an array, got {}", json_kind(other)),
        )),
    }
}

fn json_to_scalar(field: &str, raw: &Json) -> Result<Scalar> {
    match raw {
        Json::String(s) => Ok(Scalar::Text(s.clone())),
        Json::Bool(b) => Ok(Scalar::Bool(*b)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(Scalar::Int(i)),
            None => {
                let f = n.as_f64().ok_or_else(|| {
                    TransformError::invalid_input(field, format!("unrepresentable number {}", n))
                })?;
                Scalar::float(f)
            }
        },
        other => Err(TransformError::invalid_input(
            field,
            format!("expected a scalar, got {}", json_kind(other)),
        )),
    }
}

fn json_to_value(field: &str, raw: &Json) -> Result<Value> {
    match raw {
        Json::Array(items) => {
            let scalars = items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| json_to_scalar(field, item).map(Value::Scalar))
                .collect::<Result<Vec<Value>>>()?;
            Ok(Value::List(ListValue::new(scalars)))
        }
        other => json_to_scalar(field, other).map(Value::Scalar),
    }
}

fn expect_text(field: &str, raw: &Json) -> Result<String> {
    raw.as_str().map(str::to_string).ok_or_else(|| {
        TransformError::invalid_input(field, format!("expected a string, got {}", json_kind(raw)))
    })
}

fn attribute_string(raw: &Json) -> String {
    match raw {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(raw: &Json) -> &'static str {
    match raw {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
