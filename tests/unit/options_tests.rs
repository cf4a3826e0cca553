// Option map tests
// Loosely typed maps are split into typed qualifiers and passthrough
// attributes before anything reaches the compiler.

use serde_json::json;

use media_xform::transformation::from_options;
use media_xform::TransformError;

#[test]
fn test_same_output_as_builder() {
    use media_xform::transformation::{Action, Transformation};

    let parsed = from_options(&json!([
        {"crop": "scale", "width": 100},
        {"radius": 10}
    ]))
    .unwrap();
    let built = Transformation::new()
        .chain(Action::new().crop("scale").width(100))
        .chain(Action::new().radius(10));
    assert_eq!(parsed.transformation.render(), built.render());
}

#[test]
fn test_passthrough_attributes_never_render() {
    let parsed = from_options(&json!({
        "width": 200,
        "class": "hero",
        "alt": "Sunset",
        "responsive": true
    }))
    .unwrap();
    assert_eq!(parsed.render(), "w_200");
    assert_eq!(parsed.attributes.len(), 3);
    assert_eq!(parsed.attributes["responsive"], "true");
}

#[test]
fn test_radius_list_and_effect() {
    let parsed = from_options(&json!({
        "radius": [10, 20, 30, 40],
        "effect": "sepia:50"
    }))
    .unwrap();
    assert_eq!(parsed.render(), "e_sepia:50,r_10:20:30:40");
}

#[test]
fn test_radius_list_too_long() {
    let err = from_options(&json!({"radius": [1, 2, 3, 4, 5]})).unwrap_err();
    assert!(matches!(err, TransformError::InvalidInput { .. }));
}

#[test]
fn test_null_values_are_skipped() {
    let parsed = from_options(&json!({"width": null, "height": 10, "alt": null})).unwrap();
    assert_eq!(parsed.render(), "h_10");
    assert!(parsed.attributes.is_empty());
}

#[test]
fn test_nested_list_rejected() {
    let err = from_options(&json!({"flags": [["a"]]})).unwrap_err();
    assert!(matches!(err, TransformError::InvalidInput { .. }));
}
