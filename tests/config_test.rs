//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Note: These tests run without a global config (temp directories only),
//! so the local file is layered directly over compiled defaults.

use std::fs;

use tempfile::TempDir;

use selecttree::application::ApplicationError;
use selecttree::config::{Direction, Settings};
use selecttree::domain::{RecordKey, RelationshipKind};

// ============================================================
// Settings::load() local config tests
// ============================================================

#[test]
fn given_local_config_when_load_then_overrides_only_given_keys() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("selecttree.toml");
    let local = r#"
[field]
key_attribute = "uuid"
relationship = "belongs_to"
disabled_options = [3, 5]
root_limit = 10

[display]
searchable = false
direction = "top"
"#;
    fs::write(&path, local).unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert: overridden
    assert_eq!(settings.field.key_attribute, "uuid");
    assert_eq!(
        settings.field.relationship_kind().unwrap(),
        RelationshipKind::BelongsTo
    );
    assert_eq!(
        settings.field.disabled_options,
        vec![RecordKey::Int(3), RecordKey::Int(5)]
    );
    assert_eq!(settings.field.root_limit, Some(10));
    assert!(!settings.display.searchable);
    assert_eq!(settings.display.direction, Direction::Top);

    // Assert: inherited from defaults
    assert_eq!(settings.field.title_attribute, "name");
    assert_eq!(settings.field.parent_attribute, "parent_id");
    assert!(settings.display.clearable);
}

#[test]
fn given_string_sentinel_when_load_then_parent_null_value_is_string_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("selecttree.toml");
    fs::write(
        &path,
        r#"
[field]
parent_null_value = "root"
absent_parent_is_root = true
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(
        settings.field.parent_null_value,
        Some(RecordKey::Str("root".into()))
    );
    assert!(settings.field.absent_parent_is_root);
    let builder = settings.field.tree_builder();
    assert!(builder.sentinel().matches(None));
    assert!(builder.sentinel().matches(Some(&RecordKey::Str("root".into()))));
}

#[test]
fn given_missing_local_config_when_load_then_returns_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_unsupported_relationship_when_load_then_fails_before_use() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("selecttree.toml");
    fs::write(&path, "[field]\nrelationship = \"has_many\"\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(result.is_err());
}

#[test]
fn given_same_key_and_parent_attribute_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("selecttree.toml");
    fs::write(&path, "[field]\nparent_attribute = \"id\"\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_default_settings_when_rendering_toml_then_contains_sections() {
    let toml = Settings::default().to_toml().unwrap();

    assert!(toml.contains("[field]"));
    assert!(toml.contains("[display]"));
    assert!(toml.contains("relationship = \"belongs_to_many\""));
}
