//! Transformation model and compiler
//!
//! Application code describes media manipulations as a tree:
//!
//! - a [`Qualifier`] is one parameter (`w_100`, `c_fill`)
//! - an [`Action`] is an unordered set of qualifiers rendered as one path
//!   segment, tokens sorted by key
//! - a [`Transformation`] is an ordered chain of actions and nested chains,
//!   joined with `/`
//!
//! Rendering is a pure function of the tree. Shape errors are reported when
//! a qualifier is built, so rendering never fails and never emits a partial
//! string.
//!
//! # Example
//!
//! ```
//! use media_xform::transformation::{Action, Transformation};
//!
//! let t = Transformation::new()
//!     .chain(Action::new().crop("scale").width(100))
//!     .chain(Action::new().radius(10));
//! assert_eq!(t.render(), "c_scale,w_100/r_10");
//! ```

pub mod action;
pub mod chain;
pub mod compiler;
pub mod composite;
pub mod expression;
pub mod modes;
pub mod options;
pub mod qualifier;
pub mod responsive;
pub mod value;

pub use action::Action;
pub use chain::{Node, Transformation};
pub use compiler::compile;
pub use composite::{
    AutoBackground, BackgroundSource, Border, Color, Composite, CompositeValue, Effect, EffectArg,
    GradientDirection, Layer, Point, PointList, TextStyle,
};
pub use expression::normalize_expression;
pub use modes::{CropMode, DeliveryFormat, Gravity};
pub use options::{from_options, ParsedOptions};
pub use qualifier::{Qualifier, QualifierKey};
pub use responsive::{SrcSet, SrcSetEntry};
pub use value::{format_float, BoolPolicy, Finite, ListValue, RenderRules, Scalar, Value};
