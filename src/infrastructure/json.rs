//! JSON file-backed collaborators
//!
//! Records are read from a JSON array of objects; the fields holding
//! identity, label and parent are named by [`RecordAttributes`].

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::{Record, RecordKey, RecordQuery};
use crate::infrastructure::traits::{DataSource, FileSystem, ManyAssociation, SingleAssociation};

/// Field names resolved once at the data source boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAttributes {
    pub key: String,
    pub title: String,
    pub parent: String,
}

impl Default for RecordAttributes {
    fn default() -> Self {
        Self {
            key: "id".into(),
            title: "name".into(),
            parent: "parent_id".into(),
        }
    }
}

fn invalid_data(path: &Path, message: impl std::fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{}: {}", path.display(), message),
    )
}

fn key_from_value(value: &Value) -> Option<RecordKey> {
    match value {
        Value::Number(n) => n.as_i64().map(RecordKey::Int),
        Value::String(s) => Some(RecordKey::Str(s.clone())),
        _ => None,
    }
}

impl RecordAttributes {
    /// Map one JSON object into a record.
    ///
    /// A missing or `null` parent field is an absent parent.
    pub fn record_from_row(&self, row: &Value) -> Result<Record<RecordKey>, String> {
        let obj = row
            .as_object()
            .ok_or_else(|| format!("row is not an object: {}", row))?;

        let id = obj
            .get(&self.key)
            .and_then(key_from_value)
            .ok_or_else(|| format!("missing or invalid '{}' in {}", self.key, row))?;

        let label = match obj.get(&self.title) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let parent = match obj.get(&self.parent) {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                key_from_value(v)
                    .ok_or_else(|| format!("invalid '{}' in {}", self.parent, row))?,
            ),
        };

        Ok(Record { id, label, parent })
    }
}

/// Data source reading a JSON records file on every fetch.
pub struct JsonRecordSource {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    attributes: RecordAttributes,
}

impl JsonRecordSource {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>, attributes: RecordAttributes) -> Self {
        Self {
            fs,
            path: path.into(),
            attributes,
        }
    }

    /// Load every record in file order.
    pub fn load_all(&self) -> io::Result<Vec<Record<RecordKey>>> {
        let content = self.fs.read_to_string(&self.path)?;
        let rows: Vec<Value> =
            serde_json::from_str(&content).map_err(|e| invalid_data(&self.path, e))?;
        let records = rows
            .iter()
            .map(|row| self.attributes.record_from_row(row))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|msg| invalid_data(&self.path, msg))?;
        debug!("load_all: {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

impl DataSource<RecordKey> for JsonRecordSource {
    fn fetch(&self, query: &RecordQuery<RecordKey>) -> io::Result<Vec<Record<RecordKey>>> {
        Ok(query.apply(&self.load_all()?))
    }
}

/// Association persisted as a JSON file.
///
/// Many-valued: an array of identities. Single-valued: one identity or
/// `null`. A missing file is an empty association.
pub struct JsonFileAssociation {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonFileAssociation {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }
}

impl ManyAssociation<RecordKey> for JsonFileAssociation {
    fn related_ids(&self) -> io::Result<Vec<RecordKey>> {
        if !self.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let content = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| invalid_data(&self.path, e))
    }

    fn sync(&self, ids: &[RecordKey]) -> io::Result<()> {
        let content =
            serde_json::to_string_pretty(ids).map_err(|e| invalid_data(&self.path, e))?;
        self.fs.write(&self.path, &content)
    }
}

impl SingleAssociation<RecordKey> for JsonFileAssociation {
    fn get(&self) -> io::Result<Option<RecordKey>> {
        if !self.fs.exists(&self.path) {
            return Ok(None);
        }
        let content = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| invalid_data(&self.path, e))
    }
}
