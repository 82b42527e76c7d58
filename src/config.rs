//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/selecttree/selecttree.toml`
//! 3. Local config: file given with `--config`
//! 4. Environment variables: `SELECTTREE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{RecordKey, RelationshipKind, TreeBuilder};
use crate::infrastructure::json::RecordAttributes;

/// Where the dropdown opens relative to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Auto,
    Top,
    Bottom,
}

/// How records are read and turned into a tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FieldSettings {
    /// Record field holding the identity
    pub key_attribute: String,
    /// Record field holding the label
    pub title_attribute: String,
    /// Record field holding the parent identity
    pub parent_attribute: String,
    /// Parent value marking a root record (default: no value)
    pub parent_null_value: Option<RecordKey>,
    /// Also treat records without parent value as roots
    pub absent_parent_is_root: bool,
    /// Identities rendered as disabled
    pub disabled_options: Vec<RecordKey>,
    /// `belongs_to_many` or `belongs_to`
    pub relationship: String,
    /// Limit applied to the root-level query only
    pub root_limit: Option<usize>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        let attrs = RecordAttributes::default();
        Self {
            key_attribute: attrs.key,
            title_attribute: attrs.title,
            parent_attribute: attrs.parent,
            parent_null_value: None,
            absent_parent_is_root: false,
            disabled_options: vec![],
            relationship: RelationshipKind::BelongsToMany.to_string(),
            root_limit: None,
        }
    }
}

impl FieldSettings {
    pub fn relationship_kind(&self) -> Result<RelationshipKind, ApplicationError> {
        Ok(self.relationship.parse::<RelationshipKind>()?)
    }

    pub fn attributes(&self) -> RecordAttributes {
        RecordAttributes {
            key: self.key_attribute.clone(),
            title: self.title_attribute.clone(),
            parent: self.parent_attribute.clone(),
        }
    }

    /// Read numeric entries of `disabled_options` as integer keys.
    ///
    /// Environment lists are split into strings, so `3` arrives as `"3"`.
    fn normalize_keys(&mut self) {
        for key in &mut self.disabled_options {
            if let RecordKey::Str(s) = key {
                if let Ok(n) = s.parse::<i64>() {
                    *key = RecordKey::Int(n);
                }
            }
        }
    }

    pub fn tree_builder(&self) -> TreeBuilder<RecordKey> {
        TreeBuilder::new()
            .parent_null_value(self.parent_null_value.clone())
            .absent_parent_is_root(self.absent_parent_is_root)
            .disabled_options(self.disabled_options.iter().cloned())
    }
}

/// Flags passed through to the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    pub searchable: bool,
    pub with_count: bool,
    pub always_open: bool,
    pub empty_label: String,
    /// Selecting a parent does not select its children
    pub independent: bool,
    pub clearable: bool,
    pub expand_selected: bool,
    /// Branch nodes are selectable themselves
    pub enable_branch_node: bool,
    pub grouped: bool,
    pub default_open_level: u32,
    pub direction: Direction,
    pub placeholder: String,
    pub disabled: bool,
    pub rtl: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            searchable: true,
            with_count: false,
            always_open: false,
            empty_label: "No results found".into(),
            independent: true,
            clearable: true,
            expand_selected: true,
            enable_branch_node: false,
            grouped: true,
            default_open_level: 0,
            direction: Direction::Auto,
            placeholder: String::new(),
            disabled: false,
            rtl: false,
        }
    }
}

/// Unified configuration for selecttree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub display: DisplaySettings,
}

/// Get the XDG config directory for selecttree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "selecttree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("selecttree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file; it must exist when given
    ///
    /// # Errors
    /// Unreadable files, malformed values, and an unsupported relationship
    /// kind are reported here, before any tree is built.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Config::try_from(&Settings::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(local_path) = local {
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            builder = builder.add_source(File::from(local_path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SELECTTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("field.disabled_options"),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.field.normalize_keys();
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations that cannot drive a field.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.field.relationship_kind()?;
        if self.field.key_attribute == self.field.parent_attribute {
            return Err(ApplicationError::Config {
                message: format!(
                    "key_attribute and parent_attribute are both '{}'",
                    self.field.key_attribute
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# selecttree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/selecttree/selecttree.toml
#   Local:  file passed with --config
#   Env:    SELECTTREE_<SECTION>__<KEY>, e.g. SELECTTREE_FIELD__TITLE_ATTRIBUTE=title

[field]
# Record fields holding identity, label and parent identity
# key_attribute = "id"
# title_attribute = "name"
# parent_attribute = "parent_id"

# Parent value marking a root record; unset means "no parent value"
# parent_null_value = 0

# With parent_null_value set, also treat records without parent as roots
# absent_parent_is_root = false

# Identities shown but not selectable
# disabled_options = [3, "archived"]

# belongs_to_many (multi select) or belongs_to (single select)
# relationship = "belongs_to_many"

# Only show the first N root records; descendants are never limited
# root_limit = 10

[display]
# searchable = true
# with_count = false
# always_open = false
# empty_label = "No results found"
# independent = true
# clearable = true
# expand_selected = true
# enable_branch_node = false
# grouped = true
# default_open_level = 0
# direction = "auto"   # auto | top | bottom
# placeholder = ""
# disabled = false
# rtl = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
