// Configuration module unit tests
// File loading, environment substitution and the hand-off to the signer.

use std::io::Write;

use tempfile::NamedTempFile;

use media_xform::config::Config;
use media_xform::logging::LogFormat;
use media_xform::signing::{DigestAlgorithm, NotificationScheme, SignatureVersion, Signer};
use media_xform::{DeliveryPath, TransformError};

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(yaml.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
fn test_can_load_full_config_from_file() {
    let file = write_config(
        r#"
signing:
  api_secret: "file-secret"
  signature_algorithm: sha256
  signature_version: 1
  long_url_signature: true
  notification_scheme: hmac
  notification_valid_for_seconds: 600
delivery:
  force_version: false
  resource_type: video
logging:
  format: json
  level: debug
"#,
    );

    let config = Config::from_file(file.path()).expect("Failed to load config");
    config.validate().expect("Config should be valid");

    assert_eq!(config.signing.api_secret.as_deref(), Some("file-secret"));
    assert_eq!(config.signing.signature_algorithm, DigestAlgorithm::Sha256);
    assert_eq!(config.signing.signature_version, SignatureVersion::V1);
    assert!(config.signing.long_url_signature);
    assert_eq!(config.signing.notification_scheme, NotificationScheme::Hmac);
    assert_eq!(config.signing.notification_valid_for_seconds, 600);
    assert!(!config.delivery.force_version);
    assert_eq!(config.delivery.resource_type, "video");
    assert_eq!(config.delivery.delivery_type, "upload");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_file_is_config_error() {
    let err = Config::from_file("/nonexistent/media-xform.yaml").unwrap_err();
    assert!(matches!(err, TransformError::Config(_)));
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_secret_from_environment_reaches_signer() {
    std::env::set_var("MEDIA_XFORM_CONFIG_TEST_SECRET", "abcd");
    let file = write_config(
        r#"
signing:
  api_secret: "${MEDIA_XFORM_CONFIG_TEST_SECRET}"
"#,
    );
    let config = Config::from_file(file.path()).unwrap();
    let signer = Signer::from_config(&config.signing).unwrap();
    assert_eq!(signer.sign_url("v1/sample.jpg").unwrap(), "s--UAi3oDX0--");
}

#[test]
fn test_unknown_algorithm_rejected() {
    let err = Config::from_yaml_with_env("signing:\n  signature_algorithm: md5\n").unwrap_err();
    assert!(matches!(err, TransformError::Config(_)));
}

#[test]
fn test_zero_validity_window_rejected() {
    let config =
        Config::from_yaml_with_env("signing:\n  notification_valid_for_seconds: 0\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_delivery_section_drives_paths() {
    let config = Config::from_yaml_with_env("delivery:\n  force_version: false\n").unwrap();
    let path = DeliveryPath::from_config("folder/sample", &config.delivery)
        .build(None)
        .unwrap();
    assert_eq!(path, "image/upload/folder/sample");
}
