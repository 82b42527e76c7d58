//! I/O boundary traits for testability
//!
//! These traits abstract the collaborators around the tree builder, allowing
//! services to be tested with in-memory implementations.

use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::domain::{Record, RecordQuery};

/// Filesystem abstraction for file-backed collaborators.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Supplies records of a self-referencing relation.
pub trait DataSource<K>: Send + Sync {
    /// Execute a query, returning matching records in source order.
    fn fetch(&self, query: &RecordQuery<K>) -> io::Result<Vec<Record<K>>>;
}

/// Many-valued association (many-to-many) holding selected identities.
pub trait ManyAssociation<K>: Send + Sync {
    /// Identities currently related.
    fn related_ids(&self) -> io::Result<Vec<K>>;

    /// Replace membership with exactly `ids`.
    fn sync(&self, ids: &[K]) -> io::Result<()>;
}

/// Single-valued association (belongs-to).
///
/// Read-only here: the owning record stores the value itself.
pub trait SingleAssociation<K>: Send + Sync {
    fn get(&self) -> io::Result<Option<K>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn poisoned() -> io::Error {
    io::Error::other("store lock poisoned")
}

/// Data source over a fixed record list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource<K> {
    records: Vec<Record<K>>,
}

impl<K> InMemoryDataSource<K> {
    pub fn new(records: Vec<Record<K>>) -> Self {
        Self { records }
    }
}

impl<K> DataSource<K> for InMemoryDataSource<K>
where
    K: Clone + PartialEq + Send + Sync,
{
    fn fetch(&self, query: &RecordQuery<K>) -> io::Result<Vec<Record<K>>> {
        Ok(query.apply(&self.records))
    }
}

/// Many-valued association kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryManyAssociation<K> {
    ids: Mutex<Vec<K>>,
}

impl<K> InMemoryManyAssociation<K> {
    pub fn new(ids: Vec<K>) -> Self {
        Self {
            ids: Mutex::new(ids),
        }
    }
}

impl<K: Clone + Send> ManyAssociation<K> for InMemoryManyAssociation<K> {
    fn related_ids(&self) -> io::Result<Vec<K>> {
        Ok(self.ids.lock().map_err(|_| poisoned())?.clone())
    }

    fn sync(&self, ids: &[K]) -> io::Result<()> {
        *self.ids.lock().map_err(|_| poisoned())? = ids.to_vec();
        Ok(())
    }
}

/// Single-valued association kept in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySingleAssociation<K> {
    id: Option<K>,
}

impl<K> InMemorySingleAssociation<K> {
    pub fn new(id: Option<K>) -> Self {
        Self { id }
    }
}

impl<K: Clone + Send + Sync> SingleAssociation<K> for InMemorySingleAssociation<K> {
    fn get(&self) -> io::Result<Option<K>> {
        Ok(self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RootSentinel;

    #[test]
    fn given_in_memory_source_when_fetching_roots_then_filters_by_sentinel() {
        let source = InMemoryDataSource::new(vec![
            Record::root(1, "a"),
            Record::child(2, "b", 1),
        ]);

        let roots = source
            .fetch(&RecordQuery::roots(RootSentinel::default()))
            .unwrap();

        assert_eq!(roots, vec![Record::root(1, "a")]);
    }

    #[test]
    fn given_many_association_when_syncing_then_replaces_members() {
        let assoc = InMemoryManyAssociation::new(vec![3, 4]);
        assoc.sync(&[5]).unwrap();
        assert_eq!(assoc.related_ids().unwrap(), vec![5]);
    }

    #[test]
    fn given_single_association_when_reading_then_returns_value() {
        assert_eq!(InMemorySingleAssociation::new(Some(7)).get().unwrap(), Some(7));
        assert_eq!(InMemorySingleAssociation::<i32>::new(None).get().unwrap(), None);
    }
}
