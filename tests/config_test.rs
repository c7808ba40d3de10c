use resource_http::{ProtocolConfig, ProtocolError, ResponseType};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn loads_full_configuration_from_a_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[server]
address = "https://api.example.com"
response_type = "text"
content_type = "application/json"

[assets]
address = "https://cdn.example.com/assets"
"#
    )
    .unwrap();

    let config = ProtocolConfig::from_file(file.path()).unwrap();
    assert_eq!(config.server.address, "https://api.example.com");
    assert_eq!(config.server.response_type, ResponseType::Text);
    assert_eq!(config.server.content_type, "application/json");
    assert_eq!(config.assets.address, "https://cdn.example.com/assets");
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let config = ProtocolConfig::from_toml_str("").unwrap();
    assert!(config.server.address.is_empty());
    assert_eq!(config.server.response_type, ResponseType::Json);
    assert!(config.assets.address.is_empty());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = ProtocolConfig::from_toml_str("[server\naddress = ").unwrap_err();
    assert!(matches!(err, ProtocolError::ConfigParse(_)));
}

#[test]
fn invalid_base_scheme_is_rejected() {
    let err = ProtocolConfig::from_toml_str(
        r#"
[server]
address = "file:///etc/passwd"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ProtocolError::InvalidConfigValue { .. }));
}

#[test]
fn unreadable_file_is_an_io_error() {
    let err = ProtocolConfig::from_file("/nonexistent/resource-http.toml").unwrap_err();
    assert!(matches!(err, ProtocolError::Io(_)));
}
