mod common;

use common::temp_config;
use crudsync::config::{Config, ConfigError, ResourceConfig, TransportSettings};
use crudsync::resource::{CrudOperations, DEFAULT_RESET_KIND};
use crudsync::transport::ResponseKind;
use serde_json::json;

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();
    assert_eq!(config.transport.timeout_seconds, 30);
    assert_eq!(config.transport.connect_timeout_seconds, 5);
    assert!(config.resources.is_empty());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("crudsync/config.toml"));
}

#[test]
fn test_parse_minimal_resource_fills_defaults() {
    let (_dir, path) = temp_config(
        r#"
[[resources]]
name = "TODO"
url = "https://api.example.com/todos"
"#,
    );
    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.transport, TransportSettings::default());
    let todo = config.resource("TODO").unwrap();
    assert_eq!(todo.primary_key, "id");
    assert_eq!(todo.operations, CrudOperations::ALL);
    assert_eq!(todo.reset_kind, DEFAULT_RESET_KIND);
    assert_eq!(todo.response_kind, ResponseKind::Json);
    assert!(todo.plural.is_none());
    assert!(!todo.merge_on_write);
    assert!(!todo.json_body);
}

#[test]
fn test_parse_full_resource() {
    let (_dir, path) = temp_config(
        r#"
[transport]
timeout_seconds = 10
connect_timeout_seconds = 1

[[resources]]
name = "PERSON"
plural = "PEOPLE"
url = "https://api.example.com/people/"
primary_key = "uuid"
json_body = true
response_kind = "text"
operations = "cr"
merge_on_write = true
initial_data = [{ uuid = "a" }]

[resources.headers]
x-api-key = "secret"
"#,
    );
    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.transport.timeout_seconds, 10);
    let person = &config.resources[0];
    assert_eq!(person.plural.as_deref(), Some("PEOPLE"));
    assert_eq!(person.primary_key, "uuid");
    assert!(person.json_body);
    assert_eq!(person.response_kind, ResponseKind::Text);
    assert!(person.operations.create && person.operations.read);
    assert!(!person.operations.update && !person.operations.delete);
    assert_eq!(person.initial_data, Some(vec![json!({"uuid": "a"})]));
    assert_eq!(person.headers.get("x-api-key").map(String::as_str), Some("secret"));

    let types = person.action_types();
    assert_eq!(types.request, "REQUEST_PEOPLE");
    assert_eq!(types.request_one, "REQUEST_PERSON");
}

#[test]
fn test_parse_invalid_toml() {
    let (_dir, path) = temp_config("[[resources]\nname = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_invalid_operations_letter_is_parse_error() {
    let (_dir, path) = temp_config(
        r#"
[[resources]]
name = "TODO"
url = "https://api.example.com/todos"
operations = "CRX"
"#,
    );
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn test_load_from_validates() {
    let (_dir, path) = temp_config(&common::resources_toml(&[
        ("ITEM", "http://localhost/items"),
        ("ITEMS", "http://localhost/item-lists"),
    ]));
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("both produce signal"));
}

#[test]
fn test_explicit_plural_avoids_collision() {
    let mut items = ResourceConfig::new("ITEMS", "http://localhost/item-lists");
    items.plural = Some("ITEM_LISTS".into());
    let config = Config {
        resources: vec![ResourceConfig::new("ITEM", "http://localhost/items"), items],
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_roundtrip() {
    let mut todo = ResourceConfig::new("TODO", "https://api.example.com/todos");
    todo.operations = CrudOperations::READ_ONLY;
    todo.merge_on_write = true;
    let config = Config {
        resources: vec![todo],
        ..Config::default()
    };

    let serialized = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&serialized).unwrap();
    assert_eq!(parsed.resources, config.resources);
    assert_eq!(parsed.transport, config.transport);
}

#[test]
fn test_resource_names_in_file_order() {
    let (_dir, path) = temp_config(&common::resources_toml(&[
        ("TODO", "http://localhost/todos"),
        ("NOTE", "http://localhost/notes"),
    ]));
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.resource_names(), vec!["TODO", "NOTE"]);
    assert!(config.resource("USER").is_none());
}

#[test]
fn test_plural_equal_to_name_is_rejected() {
    let (_dir, path) = temp_config(
        r#"
[[resources]]
name = "SHEEP"
plural = "SHEEP"
url = "https://api.example.com/sheep"
"#,
    );
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("REQUEST_SHEEP"));
}
