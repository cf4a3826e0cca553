//! Canonical rendering of actions and transformations
//!
//! Within an action, tokens are sorted by short key in byte order, except
//! `if` which always comes first. Custom attributes are merged after the
//! typed qualifiers and win on key collisions. A raw segment, if any, is
//! appended after the sorted tokens. Actions are joined with `/`.

use std::collections::BTreeMap;

use super::action::Action;
use super::chain::{Node, Transformation};

const IF_KEY: &str = "if";

/// `key_value`, or the bare key when the value is empty
pub(crate) fn token(key: &str, value: &str) -> String {
    if value.is_empty() {
        key.to_string()
    } else {
        format!("{}_{}", key, value)
    }
}

pub(crate) fn render_action(action: &Action) -> Option<String> {
    let mut tokens: BTreeMap<String, String> = BTreeMap::new();

    for qualifier in action.qualifiers() {
        if let Some(rendered) = qualifier.token() {
            tokens.insert(qualifier.key().short().to_string(), rendered);
        }
    }

    for (key, value) in action.custom_attributes() {
        if key.is_empty() {
            continue;
        }
        tokens.insert(key.clone(), token(key, value));
    }

    let mut parts: Vec<String> = Vec::with_capacity(tokens.len() + 1);
    if let Some(condition) = tokens.remove(IF_KEY) {
        parts.push(condition);
    }
    parts.extend(tokens.into_values());

    if let Some(raw) = action.raw_segment().filter(|raw| !raw.is_empty()) {
        parts.push(raw.to_string());
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(","))
    }
}

pub(crate) fn render_transformation(transformation: &Transformation) -> String {
    transformation
        .nodes()
        .iter()
        .filter_map(|node| match node {
            Node::Action(action) => render_action(action),
            Node::Transformation(inner) => Some(render_transformation(inner)),
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Render a transformation chain to its canonical string.
///
/// An empty chain, or one whose actions all render to nothing, yields an
/// empty string.
pub fn compile(transformation: &Transformation) -> String {
    let rendered = render_transformation(transformation);
    tracing::trace!(
        actions = transformation.len(),
        rendered = %rendered,
        "Compiled transformation"
    );
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_bare_key_for_empty_value() {
        assert_eq!(token("w", "100"), "w_100");
        assert_eq!(token("fl", ""), "fl");
    }

    #[test]
    fn test_render_is_independent_of_insertion_order() {
        let a = Action::new().width(100).height(50).crop("fill").gravity("north");
        let b = Action::new().gravity("north").crop("fill").height(50).width(100);
        assert_eq!(render_action(&a), render_action(&b));
        assert_eq!(render_action(&a), Some("c_fill,g_north,h_50,w_100".to_string()));
    }

    #[test]
    fn test_short_keys_sort_bytewise() {
        // "dpr" < "du" < "e" and "f" < "fl" < "fn"
        let action = Action::new()
            .custom_function("wasm:f.wasm")
            .flags(["lossy"])
            .fetch_format("auto")
            .duration(5)
            .dpr(2)
            .effect("sepia");
        assert_eq!(
            render_action(&action),
            Some("dpr_2,du_5,e_sepia,f_auto,fl_lossy,fn_wasm:f.wasm".to_string())
        );
    }

    #[test]
    fn test_custom_condition_goes_first() {
        let action = Action::new().width(10).custom("if", "w_gt_5");
        assert_eq!(render_action(&action), Some("if_w_gt_5,w_10".to_string()));
    }

    #[test]
    fn test_empty_custom_key_is_ignored() {
        let action = Action::new().custom("", "x");
        assert_eq!(render_action(&action), None);
    }

    #[test]
    fn test_transformation_skips_empty_actions() {
        let t = Transformation::new()
            .chain(Action::new().width(100))
            .chain(Action::new())
            .chain(Action::new().crop(""))
            .chain(Action::new().angle(90));
        assert_eq!(compile(&t), "w_100/a_90");
    }

    #[test]
    fn test_nested_chain_is_flattened() {
        let inner = Transformation::new()
            .chain(Action::new().effect("grayscale"))
            .chain(Action::new().radius(10));
        let t = Transformation::new()
            .chain(Action::new().width(100))
            .chain(inner)
            .chain(Transformation::new());
        assert_eq!(compile(&t), "w_100/e_grayscale/r_10");
    }

    #[test]
    fn test_empty_transformation_compiles_to_empty_string() {
        assert_eq!(compile(&Transformation::new()), "");
    }
}
