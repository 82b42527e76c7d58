//! Arena-backed forest used while assembling the option tree.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::Node;

/// Data payload for one arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData<K> {
    /// Record identity, becomes `Node::value`
    pub id: K,
    /// Record label, becomes `Node::name`
    pub label: String,
    pub disabled: bool,
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode<K> {
    pub data: NodeData<K>,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based forest.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. Roots and children keep their insertion order.
#[derive(Debug)]
pub struct TreeArena<K> {
    arena: Arena<TreeNode<K>>,
    roots: Vec<Index>,
}

impl<K> Default for TreeArena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TreeArena<K> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    pub fn insert_node(&mut self, data: NodeData<K>, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        match parent {
            Some(parent_idx) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.children.push(node_idx);
                }
            }
            None => self.roots.push(node_idx),
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<K>> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Post-order traversal: every child is yielded before its parent.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, K> {
        PostOrderIterator::new(self)
    }
}

impl<K: Clone> TreeArena<K> {
    /// Convert into nested nodes without recursion.
    ///
    /// Children are assembled before their parents via post-order traversal,
    /// so each parent can take its finished children in order.
    #[instrument(level = "trace", skip(self))]
    pub fn to_nodes(&self) -> Vec<Node<K>> {
        let mut built: HashMap<Index, Node<K>> = HashMap::with_capacity(self.len());
        for (idx, tree_node) in self.iter_postorder() {
            let children: Vec<Node<K>> = tree_node
                .children
                .iter()
                .filter_map(|c| built.remove(c))
                .collect();
            let data = &tree_node.data;
            let node = Node::leaf(data.label.clone(), data.id.clone(), data.disabled)
                .with_children(children);
            built.insert(idx, node);
        }
        self.roots.iter().filter_map(|r| built.remove(r)).collect()
    }
}

pub struct PostOrderIterator<'a, K> {
    arena: &'a TreeArena<K>,
    stack: Vec<(Index, bool)>,
}

impl<'a, K> PostOrderIterator<'a, K> {
    fn new(arena: &'a TreeArena<K>) -> Self {
        let stack = arena.roots.iter().rev().map(|&r| (r, false)).collect();
        Self { arena, stack }
    }
}

impl<'a, K> Iterator for PostOrderIterator<'a, K> {
    type Item = (Index, &'a TreeNode<K>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
