//! Service container for dependency injection
//!
//! Wires up services with their file-backed collaborators.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::{Association, SelectionService, TreeFieldService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{RecordKey, RelationshipKind};
use crate::infrastructure::json::{JsonFileAssociation, JsonRecordSource};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and I/O dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Tree service over a JSON records file.
    pub fn tree_service(&self, records: &Path) -> TreeFieldService<RecordKey> {
        let field = &self.settings.field;
        let source = JsonRecordSource::new(self.fs.clone(), records, field.attributes());
        let service = TreeFieldService::new(Arc::new(source), field.tree_builder());
        match field.root_limit {
            Some(limit) => service.modify_query_using(move |q| q.limit(limit)),
            None => service,
        }
    }

    /// Selection service over a JSON association file.
    ///
    /// Fails when the configured relationship kind is not supported.
    pub fn selection_service(&self, association: &Path) -> ApplicationResult<SelectionService<RecordKey>> {
        let store = Arc::new(JsonFileAssociation::new(self.fs.clone(), association));
        let association = match self.settings.field.relationship_kind()? {
            RelationshipKind::BelongsToMany => Association::BelongsToMany(store),
            RelationshipKind::BelongsTo => Association::BelongsTo(store),
        };
        Ok(SelectionService::new(association))
    }
}
