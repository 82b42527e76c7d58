//! Tree builder: flat self-referencing records to nested option nodes.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::entities::{Node, Record, RootSentinel};
use crate::domain::error::DomainError;
use crate::domain::grouping::group_by_key;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Bucket a record is grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ParentKey<K> {
    /// Parent matches the root sentinel
    Root,
    /// Parent is another record's identity (which may not exist)
    Parent(K),
    /// No parent value, and absence is not a root marker
    Detached,
}

/// Outcome of assembling records into an arena.
#[derive(Debug)]
pub struct Assembly<K> {
    pub arena: TreeArena<K>,
    /// Records not reachable from any root, in input order
    pub unreachable: Vec<K>,
}

/// Constructs nested option trees from flat records.
///
/// The builder is pure: it never mutates its input and yields the same
/// output for the same records and configuration.
#[derive(Debug, Clone)]
pub struct TreeBuilder<K> {
    sentinel: RootSentinel<K>,
    disabled: HashSet<K>,
}

impl<K> Default for TreeBuilder<K> {
    fn default() -> Self {
        Self {
            sentinel: RootSentinel::default(),
            disabled: HashSet::new(),
        }
    }
}

impl<K> TreeBuilder<K>
where
    K: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Redefine the parent value that marks a root record.
    pub fn parent_null_value(mut self, value: Option<K>) -> Self {
        self.sentinel = RootSentinel::new(value).with_absent_as_root(self.sentinel.absent_is_root);
        self
    }

    /// Also treat records without parent value as roots.
    pub fn absent_parent_is_root(mut self, enabled: bool) -> Self {
        self.sentinel = self.sentinel.with_absent_as_root(enabled);
        self
    }

    /// Identities rendered with `disabled: true`.
    pub fn disabled_options(mut self, ids: impl IntoIterator<Item = K>) -> Self {
        self.disabled = ids.into_iter().collect();
        self
    }

    pub fn sentinel(&self) -> &RootSentinel<K> {
        &self.sentinel
    }

    /// Build the nested node tree.
    ///
    /// Unreachable records are dropped. Fails with
    /// [`DomainError::CycleDetected`] when an identity reappears below
    /// itself, and with [`DomainError::DuplicateIdentity`] when it reappears
    /// anywhere else in the tree.
    pub fn build(&self, records: &[Record<K>]) -> TreeResult<Vec<Node<K>>> {
        Ok(self.assemble(records)?.arena.to_nodes())
    }

    /// Group records by parent and lay them out in an arena.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn assemble(&self, records: &[Record<K>]) -> TreeResult<Assembly<K>> {
        let mut buckets = group_by_key(records.iter().enumerate(), |(_, r)| self.parent_key(r));
        let roots = buckets.remove(&ParentKey::Root).unwrap_or_default();
        debug!("assemble: {} roots, {} parent groups", roots.len(), buckets.len());

        let mut arena = TreeArena::new();
        let mut visited: HashSet<&K> = HashSet::with_capacity(records.len());
        let mut reached = vec![false; records.len()];
        // Reverse pushes keep sibling order when popping
        let mut stack: Vec<((usize, &Record<K>), Option<Index>)> =
            roots.into_iter().rev().map(|entry| (entry, None)).collect();

        while let Some(((pos, record), parent_idx)) = stack.pop() {
            if !visited.insert(&record.id) {
                let id = format!("{:?}", record.id);
                return Err(if has_ancestor(&arena, parent_idx, &record.id) {
                    DomainError::CycleDetected(id)
                } else {
                    DomainError::DuplicateIdentity(id)
                });
            }
            reached[pos] = true;

            let node_data = NodeData {
                id: record.id.clone(),
                label: record.label.clone(),
                disabled: self.disabled.contains(&record.id),
            };
            let current_idx = arena.insert_node(node_data, parent_idx);

            if let Some(children) = buckets.remove(&ParentKey::Parent(record.id.clone())) {
                for child in children.into_iter().rev() {
                    stack.push((child, Some(current_idx)));
                }
            }
        }

        let unreachable: Vec<K> = records
            .iter()
            .zip(&reached)
            .filter(|(_, seen)| !**seen)
            .map(|(r, _)| r.id.clone())
            .collect();
        if !unreachable.is_empty() {
            debug!("assemble: {} unreachable records dropped", unreachable.len());
        }

        Ok(Assembly { arena, unreachable })
    }

    fn parent_key(&self, record: &Record<K>) -> ParentKey<K> {
        let parent = record.parent.as_ref();
        if self.sentinel.matches(parent) {
            return ParentKey::Root;
        }
        match parent {
            Some(p) => ParentKey::Parent(p.clone()),
            None => ParentKey::Detached,
        }
    }
}

/// Whether `id` sits on the path from `idx` up to its root.
fn has_ancestor<K: PartialEq>(arena: &TreeArena<K>, mut idx: Option<Index>, id: &K) -> bool {
    while let Some(node) = idx.and_then(|i| arena.get_node(i)) {
        if &node.data.id == id {
            return true;
        }
        idx = node.parent;
    }
    false
}
