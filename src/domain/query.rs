//! Record queries issued against a data source.
//!
//! Root candidates and descendants are fetched by two separate queries so a
//! caller can narrow the root level without touching descendants.

use std::fmt;
use std::sync::Arc;

use crate::domain::entities::{Record, RootSentinel};

/// Predicate over a record, shared between query clones.
pub type RecordPredicate<K> = Arc<dyn Fn(&Record<K>) -> bool + Send + Sync>;

/// Which side of the root sentinel a query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentFilter<K> {
    /// Records whose parent matches the sentinel
    Root(RootSentinel<K>),
    /// Every other record
    NonRoot(RootSentinel<K>),
}

#[derive(Clone)]
pub struct RecordQuery<K> {
    pub parent: ParentFilter<K>,
    pub predicates: Vec<RecordPredicate<K>>,
    pub limit: Option<usize>,
}

impl<K: fmt::Debug> fmt::Debug for RecordQuery<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordQuery")
            .field("parent", &self.parent)
            .field("predicates", &self.predicates.len())
            .field("limit", &self.limit)
            .finish()
    }
}

impl<K: PartialEq> RecordQuery<K> {
    pub fn roots(sentinel: RootSentinel<K>) -> Self {
        Self {
            parent: ParentFilter::Root(sentinel),
            predicates: Vec::new(),
            limit: None,
        }
    }

    pub fn descendants(sentinel: RootSentinel<K>) -> Self {
        Self {
            parent: ParentFilter::NonRoot(sentinel),
            predicates: Vec::new(),
            limit: None,
        }
    }

    /// Add a predicate; all predicates must hold.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Record<K>) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, record: &Record<K>) -> bool {
        let parent_ok = match &self.parent {
            ParentFilter::Root(s) => s.matches(record.parent.as_ref()),
            ParentFilter::NonRoot(s) => !s.matches(record.parent.as_ref()),
        };
        parent_ok && self.predicates.iter().all(|p| p(record))
    }

    /// Run the query over an in-memory record sequence, keeping source order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<Record<K>>
    where
        I: IntoIterator<Item = &'a Record<K>>,
        K: Clone + 'a,
    {
        let matching = records.into_iter().filter(|r| self.matches(r)).cloned();
        match self.limit {
            Some(n) => matching.take(n).collect(),
            None => matching.collect(),
        }
    }
}
