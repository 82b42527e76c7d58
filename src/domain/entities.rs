//! Domain entities: core data structures

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Record identity as read from untyped sources (JSON files, config values).
///
/// Integers and strings never compare equal: `1` and `"1"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Int(i) => write!(f, "{}", i),
            RecordKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for RecordKey {
    type Err = Infallible;

    /// Numeric input becomes `Int`, everything else `Str`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(RecordKey::Int)
            .unwrap_or_else(|_| RecordKey::Str(s.to_string())))
    }
}

impl From<i64> for RecordKey {
    fn from(value: i64) -> Self {
        RecordKey::Int(value)
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        RecordKey::Str(value.to_string())
    }
}

/// Flat input row of a self-referencing relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<K> {
    /// Identity, unique within a record set
    pub id: K,
    /// Display label
    pub label: String,
    /// Parent identity, `None` when the source has no value
    pub parent: Option<K>,
}

impl<K> Record<K> {
    pub fn new(id: K, label: impl Into<String>, parent: Option<K>) -> Self {
        Self {
            id,
            label: label.into(),
            parent,
        }
    }

    /// Shorthand for a record without parent value.
    pub fn root(id: K, label: impl Into<String>) -> Self {
        Self::new(id, label, None)
    }

    /// Shorthand for a record with a parent value.
    pub fn child(id: K, label: impl Into<String>, parent: K) -> Self {
        Self::new(id, label, Some(parent))
    }
}

/// Marks which parent values identify a root record.
///
/// The sentinel is decided once at configuration time and compared by
/// equality. An absent parent only counts as root when the sentinel itself
/// is absent, or when `absent_is_root` is set explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSentinel<K> {
    pub value: Option<K>,
    pub absent_is_root: bool,
}

impl<K> Default for RootSentinel<K> {
    fn default() -> Self {
        Self {
            value: None,
            absent_is_root: false,
        }
    }
}

impl<K: PartialEq> RootSentinel<K> {
    pub fn new(value: Option<K>) -> Self {
        Self {
            value,
            absent_is_root: false,
        }
    }

    pub fn with_absent_as_root(mut self, absent_is_root: bool) -> Self {
        self.absent_is_root = absent_is_root;
        self
    }

    /// Whether a record with this parent value is a root.
    pub fn matches(&self, parent: Option<&K>) -> bool {
        match (parent, self.value.as_ref()) {
            (None, None) => true,
            (None, Some(_)) => self.absent_is_root,
            (Some(_), None) => false,
            (Some(p), Some(v)) => p == v,
        }
    }
}

/// Output tree element handed to the rendering layer.
///
/// `children` is `None` for leaves and is omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node<K> {
    pub name: String,
    pub value: K,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node<K>>>,
}

impl<K> Node<K> {
    pub fn leaf(name: impl Into<String>, value: K, disabled: bool) -> Self {
        Self {
            name: name.into(),
            value,
            disabled,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Node<K>>) -> Self {
        self.children = if children.is_empty() {
            None
        } else {
            Some(children)
        };
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> &[Node<K>] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children()
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

/// Kind of association the selected identities are persisted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Single-valued: the field stores one identity
    BelongsTo,
    /// Many-valued: the field stores a list of identities
    BelongsToMany,
}

impl RelationshipKind {
    pub fn is_multiple(self) -> bool {
        matches!(self, RelationshipKind::BelongsToMany)
    }
}

impl FromStr for RelationshipKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "belongs_to" => Ok(RelationshipKind::BelongsTo),
            "belongs_to_many" => Ok(RelationshipKind::BelongsToMany),
            other => Err(DomainError::UnsupportedRelationship(other.to_string())),
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::BelongsTo => write!(f, "belongs_to"),
            RelationshipKind::BelongsToMany => write!(f, "belongs_to_many"),
        }
    }
}
