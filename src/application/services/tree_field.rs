//! Tree field service
//!
//! Fetches root candidates and descendants as two separate queries, joins
//! them (roots first) and hands the result to the tree builder.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Node, Record, RecordQuery, TreeBuilder};
use crate::infrastructure::traits::DataSource;

/// Caller hook narrowing the root-level query. Descendants are never modified.
pub type RootQueryModifier<K> = Arc<dyn Fn(RecordQuery<K>) -> RecordQuery<K> + Send + Sync>;

pub struct TreeFieldService<K> {
    source: Arc<dyn DataSource<K>>,
    builder: TreeBuilder<K>,
    modify_query: Option<RootQueryModifier<K>>,
}

impl<K> TreeFieldService<K>
where
    K: Clone + Eq + Hash + Debug,
{
    pub fn new(source: Arc<dyn DataSource<K>>, builder: TreeBuilder<K>) -> Self {
        Self {
            source,
            builder,
            modify_query: None,
        }
    }

    /// Install a modifier for the root-level query.
    pub fn modify_query_using<F>(mut self, modifier: F) -> Self
    where
        F: Fn(RecordQuery<K>) -> RecordQuery<K> + Send + Sync + 'static,
    {
        self.modify_query = Some(Arc::new(modifier));
        self
    }

    pub fn builder(&self) -> &TreeBuilder<K> {
        &self.builder
    }

    /// Query for records at root level, with the modifier applied.
    pub fn root_query(&self) -> RecordQuery<K> {
        let query = RecordQuery::roots(self.builder.sentinel().clone());
        match &self.modify_query {
            Some(modify) => modify(query),
            None => query,
        }
    }

    /// Query for every record below root level, always unmodified.
    pub fn descendant_query(&self) -> RecordQuery<K> {
        RecordQuery::descendants(self.builder.sentinel().clone())
    }

    /// Root results followed by descendant results.
    pub fn fetch_records(&self) -> ApplicationResult<Vec<Record<K>>> {
        let mut records = self
            .source
            .fetch(&self.root_query())
            .with_context("fetch root records")?;
        let descendants = self
            .source
            .fetch(&self.descendant_query())
            .with_context("fetch descendant records")?;
        debug!(
            "fetch_records: {} roots, {} descendants",
            records.len(),
            descendants.len()
        );
        records.extend(descendants);
        Ok(records)
    }

    /// Build the option tree from the current data source state.
    #[instrument(level = "debug", skip(self))]
    pub fn get_tree(&self) -> ApplicationResult<Vec<Node<K>>> {
        let records = self.fetch_records()?;
        Ok(self.builder.build(&records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::InMemoryDataSource;

    fn service() -> TreeFieldService<i32> {
        // Descendant listed before its root: fetch order must still be roots first
        let source = InMemoryDataSource::new(vec![
            Record::child(3, "c1", 1),
            Record::root(1, "a"),
            Record::root(2, "b"),
        ]);
        TreeFieldService::new(Arc::new(source), TreeBuilder::new())
    }

    #[test]
    fn given_mixed_source_order_when_fetching_then_roots_come_first() {
        let ids: Vec<i32> = service().fetch_records().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn given_modifier_when_building_then_only_roots_are_filtered() {
        let service = service().modify_query_using(|q| q.filter(|r| r.id == 1));

        let tree = service.get_tree().unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].value, 1);
        assert_eq!(tree[0].children()[0].value, 3);
    }
}
