// Transformation compiler scenario tests
// Exercises the public builder API end to end: qualifiers, actions, chains,
// nested layers and the rendering invariants they share.

use rstest::rstest;

use media_xform::transformation::{
    Action, AutoBackground, BackgroundSource, Border, Color, CropMode, Effect, GradientDirection,
    Gravity, Layer, PointList, Qualifier, QualifierKey, Scalar, TextStyle, Transformation, Value,
};
use media_xform::TransformError;

#[test]
fn test_crop_scale_width_renders_sorted() {
    let action = Action::new().crop("scale").width(100);
    assert_eq!(action.render().as_deref(), Some("c_scale,w_100"));
}

#[test]
fn test_chain_with_radius() {
    let t = Transformation::new()
        .chain(Action::new().crop("scale").width(100))
        .chain(Action::new().radius(10));
    assert_eq!(t.render(), "c_scale,w_100/r_10");
}

#[test]
fn test_render_is_deterministic() {
    let t = Transformation::new()
        .chain(
            Action::new()
                .width(Scalar::float(0.25).unwrap())
                .crop(CropMode::Fill)
                .gravity(Gravity::Auto)
                .background(Color::new("#abcdef")),
        )
        .chain(Action::new().effect(Effect::new("blur").arg(300)));
    let first = t.render();
    let second = t.render();
    assert_eq!(first, second);
    assert_eq!(first, "b_rgb:abcdef,c_fill,g_auto,w_0.25/e_blur:300");
}

#[rstest]
#[case(vec!["w", "h", "c", "g"])]
#[case(vec!["g", "c", "h", "w"])]
#[case(vec!["c", "w", "g", "h"])]
fn test_action_order_independent(#[case] order: Vec<&str>) {
    let mut action = Action::new();
    for key in order {
        action = match key {
            "w" => action.width(120),
            "h" => action.height(80),
            "c" => action.crop("fit"),
            "g" => action.gravity("west"),
            _ => unreachable!(),
        };
    }
    assert_eq!(action.render().as_deref(), Some("c_fit,g_west,h_80,w_120"));
}

#[test]
fn test_chain_order_is_significant() {
    let a = Action::new().width(100);
    let b = Action::new().angle(90);
    let ab = Transformation::new().chain(a.clone()).chain(b.clone());
    let ba = Transformation::new().chain(b).chain(a);
    assert_ne!(ab.render(), ba.render());
    assert_eq!(ab.render(), "w_100/a_90");
    assert_eq!(ba.render(), "a_90/w_100");
}

#[test]
fn test_empty_actions_leave_no_delimiters() {
    let t = Transformation::new()
        .chain(Action::new())
        .chain(Action::new().width(""))
        .chain(Transformation::new().chain(Action::new()))
        .chain(Action::new());
    assert_eq!(t.render(), "");

    let t = Transformation::new()
        .chain(Action::new())
        .chain(Action::new().width(10))
        .chain(Action::new());
    assert_eq!(t.render(), "w_10");
}

#[rstest]
#[case("#ff0000", "co_rgb:ff0000")]
#[case("rgb:ff0000", "co_rgb:ff0000")]
#[case("red", "co_red")]
#[case("#ff000080", "co_rgb:ff000080")]
fn test_color_rewrite(#[case] input: &str, #[case] expected: &str) {
    let action = Action::new().color(input);
    assert_eq!(action.render().as_deref(), Some(expected));
}

#[test]
fn test_auto_background_declared_order() {
    let background = AutoBackground::new()
        .palette(["#ff0000", "blue"])
        .direction(GradientDirection::Vertical)
        .gradient()
        .source(BackgroundSource::Predominant)
        .gradient_colors(2)
        .unwrap();
    let action = Action::new().auto_background(background).crop("pad").width(300);
    assert_eq!(
        action.render().as_deref(),
        Some("b_auto:predominant_gradient:2:vertical:palette_rgb:ff0000_blue,c_pad,w_300")
    );
}

#[test]
fn test_border_and_distort() {
    let corners = PointList::new([(5, 34), (70, 10), (70, 75), (5, 55)]);
    let action = Action::new()
        .border(Border::new(3, "#000000"))
        .effect(Effect::distort(corners).unwrap());
    assert_eq!(
        action.render().as_deref(),
        Some("bo_3px_solid_rgb:000000,e_distort:5:34:70:10:70:75:5:55")
    );
}

#[test]
fn test_distort_with_three_points_fails() {
    let err = Effect::distort(PointList::new([(0, 0), (1, 1), (2, 2)])).unwrap_err();
    assert!(matches!(err, TransformError::InvalidInput { .. }));
}

#[test]
fn test_layer_sandwich() {
    let t = Transformation::new()
        .chain(Action::new().width(500))
        .chain(
            Action::new()
                .overlay(Layer::image("brand/logo"))
                .gravity(Gravity::NorthEast)
                .x(10)
                .y(10)
                .opacity(60),
        )
        .chain(
            Action::new()
                .overlay(Layer::text(TextStyle::new("Roboto", 24).bold(), "50% off").unwrap())
                .color("#ffffff"),
        );
    assert_eq!(
        t.render(),
        "w_500/g_north_east,l_brand:logo,o_60,x_10,y_10/co_rgb:ffffff,l_text:Roboto_24_bold:50%25%20off"
    );
}

#[test]
fn test_nested_transformation_as_overlay_value() {
    let nested = Transformation::new()
        .chain(Action::new().width(50).crop("scale"))
        .chain(Action::new().effect("grayscale"));
    let action = Action::new()
        .set(QualifierKey::Overlay, nested)
        .unwrap()
        .gravity("center");
    assert_eq!(
        action.render().as_deref(),
        Some("g_center,l_c_scale,w_50/e_grayscale")
    );
}

#[test]
fn test_conditional_block() {
    let t = Transformation::new()
        .chain(Action::condition("initial_width > 1000 && aspect_ratio < 1"))
        .chain(Action::new().crop("scale").width(500))
        .chain(Action::if_else())
        .chain(Action::new().crop("fit").width(300))
        .chain(Action::if_end());
    assert_eq!(
        t.render(),
        "if_iw_gt_1000_and_ar_lt_1/c_scale,w_500/if_else/c_fit,w_300/if_end"
    );
}

#[test]
fn test_variables_render_before_other_keys() {
    let action = Action::new()
        .variable("$aspect", Value::float(1.5).unwrap())
        .unwrap()
        .variable("$debug", true)
        .unwrap()
        .width("$aspect * 100")
        .crop("fill");
    assert_eq!(
        action.render().as_deref(),
        Some("$aspect_1.5,$debug_true,c_fill,w_$aspect_mul_100")
    );
}

#[test]
fn test_flag_qualifier_renders_bare_key() {
    let key = QualifierKey::variable("$flag").unwrap();
    let action = Action::new().qualifier(Qualifier::flag(key)).width(10);
    assert_eq!(action.render().as_deref(), Some("$flag,w_10"));
}

#[test]
fn test_custom_attributes_override_and_raw_appends() {
    let action = Action::new()
        .width(100)
        .custom("w", "200")
        .custom("zz_extra", "1")
        .raw("fl_custom");
    assert_eq!(action.render().as_deref(), Some("w_200,zz_extra_1,fl_custom"));
}

#[test]
fn test_numeric_formatting() {
    let action = Action::new()
        .width(Scalar::float(1.0).unwrap())
        .height(Scalar::float(0.1).unwrap())
        .zoom(Scalar::float(1.25).unwrap())
        .x(-20);
    assert_eq!(
        action.render().as_deref(),
        Some("h_0.1,w_1.0,x_-20,z_1.25")
    );
}

#[test]
fn test_non_finite_float_rejected() {
    assert!(Scalar::float(f64::NAN).is_err());
    assert!(Value::float(f64::INFINITY).is_err());
}

#[rstest]
#[case(QualifierKey::Width, Value::from(Effect::new("sepia")))]
#[case(QualifierKey::If, Value::from(10))]
#[case(QualifierKey::Crop, Value::from(Transformation::new().chain(Action::new().width(1))))]
#[case(QualifierKey::Radius, Value::list([1, 2, 3, 4, 5]))]
fn test_shape_errors_are_raised_at_construction(#[case] key: QualifierKey, #[case] value: Value) {
    let err = Action::new().set(key, value).unwrap_err();
    assert!(matches!(err, TransformError::InvalidInput { .. }));
}
