// Request signing scenario tests
// Pinned digests were computed independently over the documented pre-image
// (sorted key=value pairs joined with '&', secret appended).

use rstest::rstest;

use media_xform::config::SigningConfig;
use media_xform::signing::{
    canonical_string, params, sign_request, DigestAlgorithm, NotificationScheme, ParamValue,
    SignatureVersion, Signer, SIGNATURE_PARAM,
};
use media_xform::TransformError;

const SECRET: &str = "abcd";

fn reference_params() -> media_xform::signing::Params {
    params([
        ("public_id", ParamValue::from("image.jpg")),
        ("version", ParamValue::from(1234)),
        ("crop", ParamValue::from("crop")),
        ("width", ParamValue::from(10)),
        ("height", ParamValue::from(20)),
    ])
}

#[rstest]
#[case(DigestAlgorithm::Sha1, "e4ae8d3dd86200cdf37d807620eb7ceba563afc1")]
#[case(
    DigestAlgorithm::Sha256,
    "af5d1130c9ac3fd29ebf585c4f5d1d62ae1f61fc8a51fd28c5f36fa5217e98d0"
)]
fn test_reference_digest(#[case] algorithm: DigestAlgorithm, #[case] expected: &str) {
    let signer = Signer::new(SECRET).unwrap().with_algorithm(algorithm);
    assert_eq!(signer.sign(&reference_params()).unwrap(), expected);
}

#[test]
fn test_insertion_order_does_not_matter() {
    let a = params([("a", "1"), ("b", "2")]);
    let mut b = params([("b", "2")]);
    b.insert("a".to_string(), ParamValue::from("1"));
    for algorithm in [DigestAlgorithm::Sha1, DigestAlgorithm::Sha256] {
        assert_eq!(
            sign_request(&a, SECRET, algorithm, SignatureVersion::V2).unwrap(),
            sign_request(&b, SECRET, algorithm, SignatureVersion::V2).unwrap()
        );
    }
}

#[test]
fn test_caller_map_is_not_reordered_or_mutated() {
    let original = reference_params();
    let snapshot = original.clone();
    let signed = Signer::new(SECRET).unwrap().signed_params(&original).unwrap();
    assert_eq!(original, snapshot);
    assert!(signed.contains_key(SIGNATURE_PARAM));
    assert!(!original.contains_key(SIGNATURE_PARAM));
}

#[test]
fn test_keys_sort_by_byte_value() {
    let p = params([("b", "1"), ("B", "2"), ("_a", "3"), ("a", "4")]);
    assert_eq!(
        canonical_string(&p, SignatureVersion::V2),
        "B=2&_a=3&a=4&b=1"
    );
}

#[test]
fn test_upload_signature_ignores_transport_params() {
    let signer = Signer::new(SECRET).unwrap();
    let mut with_transport = reference_params();
    with_transport.insert("file".to_string(), ParamValue::from("@/tmp/x.jpg"));
    with_transport.insert("api_key".to_string(), ParamValue::from("1234567"));
    with_transport.insert("cloud_name".to_string(), ParamValue::from("demo"));
    with_transport.insert("resource_type".to_string(), ParamValue::from("image"));

    assert_eq!(
        signer.sign_upload_params(&with_transport).unwrap(),
        "e4ae8d3dd86200cdf37d807620eb7ceba563afc1"
    );
    assert_ne!(
        signer.sign(&with_transport).unwrap(),
        "e4ae8d3dd86200cdf37d807620eb7ceba563afc1"
    );
}

#[test]
fn test_missing_secret_points_at_configuration() {
    let err = sign_request(&reference_params(), "", DigestAlgorithm::Sha1, SignatureVersion::V2)
        .unwrap_err();
    assert!(err.is_configuration_error());

    let err = Signer::from_config(&SigningConfig::default()).unwrap_err();
    assert!(matches!(err, TransformError::MissingSecret { .. }));
}

#[test]
fn test_signer_from_config() {
    let config = SigningConfig {
        api_secret: Some(SECRET.to_string()),
        signature_algorithm: DigestAlgorithm::Sha256,
        ..Default::default()
    };
    let signer = Signer::from_config(&config).unwrap();
    assert_eq!(signer.algorithm(), DigestAlgorithm::Sha256);
    assert_eq!(
        signer.sign(&reference_params()).unwrap(),
        "af5d1130c9ac3fd29ebf585c4f5d1d62ae1f61fc8a51fd28c5f36fa5217e98d0"
    );
}

#[rstest]
#[case(NotificationScheme::SecretSuffix, DigestAlgorithm::Sha1)]
#[case(NotificationScheme::SecretSuffix, DigestAlgorithm::Sha256)]
#[case(NotificationScheme::Hmac, DigestAlgorithm::Sha1)]
#[case(NotificationScheme::Hmac, DigestAlgorithm::Sha256)]
fn test_notification_round_trip(
    #[case] scheme: NotificationScheme,
    #[case] algorithm: DigestAlgorithm,
) {
    let signer = Signer::new(SECRET)
        .unwrap()
        .with_algorithm(algorithm)
        .with_notification_scheme(scheme);
    let body = br#"{"notification_type":"upload","public_id":"sample"}"#;
    let ts = 1_700_000_000i64;
    let signature = signer.sign_notification(body, ts).unwrap();

    // within the window
    assert!(signer
        .verify_notification_at(body, &ts.to_string(), &signature, 300, ts + 299)
        .unwrap());

    // one byte of the body changed
    let mut tampered = body.to_vec();
    tampered[3] ^= 0x01;
    assert!(!signer
        .verify_notification_at(&tampered, &ts.to_string(), &signature, 300, ts + 1)
        .unwrap());

    // outside the window
    assert!(!signer
        .verify_notification_at(body, &ts.to_string(), &signature, 300, ts + 301)
        .unwrap());

    // one character of the signature flipped
    let mut flipped: Vec<char> = signature.chars().collect();
    flipped[0] = if flipped[0] == '0' { '1' } else { '0' };
    let flipped: String = flipped.into_iter().collect();
    assert!(!signer
        .verify_notification_at(body, &ts.to_string(), &flipped, 300, ts + 1)
        .unwrap());
}

#[test]
fn test_notification_inputs_are_validated() {
    let signer = Signer::new(SECRET).unwrap();
    assert!(matches!(
        signer.verify_notification_at(b"{}", "", "abc", 60, 0),
        Err(TransformError::InvalidInput { .. })
    ));
    assert!(matches!(
        signer.verify_notification_at(b"{}", "12:00", "abc", 60, 0),
        Err(TransformError::InvalidInput { .. })
    ));
    assert!(matches!(
        signer.verify_notification_at(b"{}", "100", "", 60, 0),
        Err(TransformError::InvalidInput { .. })
    ));
}

#[test]
fn test_url_signature_differs_from_param_signature() {
    let signer = Signer::new(SECRET).unwrap();
    let url = signer.sign_url("v1/sample.jpg").unwrap();
    assert!(url.starts_with("s--") && url.ends_with("--"));
    assert_eq!(url.len(), 8 + 5);
    assert_eq!(url, "s--UAi3oDX0--");
}
