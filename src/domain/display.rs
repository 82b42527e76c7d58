use std::fmt::Display;

use termtree::Tree;

use crate::domain::entities::Node;

/// Per-node hook applied to each rendered line.
pub type LineStyle<'a, K> = &'a dyn Fn(&Node<K>, String) -> String;

/// Terminal rendering of option trees.
pub trait TreeDisplay<K> {
    /// Convert into a printable tree; `with_count` appends descendant counts
    /// to branch nodes.
    fn to_tree_string(&self, with_count: bool) -> Tree<String> {
        self.to_tree_string_styled(with_count, &|_, line| line)
    }

    /// Like [`TreeDisplay::to_tree_string`], passing every line through `style`.
    fn to_tree_string_styled(&self, with_count: bool, style: LineStyle<'_, K>) -> Tree<String>;
}

fn node_line<K: Display>(node: &Node<K>, with_count: bool) -> String {
    let mut line = format!("{} [{}]", node.name, node.value);
    if with_count && !node.is_leaf() {
        line.push_str(&format!(" ({})", node.descendant_count()));
    }
    if node.disabled {
        line.push_str(" (disabled)");
    }
    line
}

impl<K: Display> TreeDisplay<K> for Node<K> {
    fn to_tree_string_styled(&self, with_count: bool, style: LineStyle<'_, K>) -> Tree<String> {
        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|c| c.to_tree_string_styled(with_count, style))
            .collect();
        Tree::new(style(self, node_line(self, with_count))).with_leaves(leaves)
    }
}

// A forest hangs under a synthetic "." root
impl<K: Display> TreeDisplay<K> for [Node<K>] {
    fn to_tree_string_styled(&self, with_count: bool, style: LineStyle<'_, K>) -> Tree<String> {
        if self.is_empty() {
            return Tree::new("Empty tree".to_string());
        }
        let leaves: Vec<_> = self
            .iter()
            .map(|n| n.to_tree_string_styled(with_count, style))
            .collect();
        Tree::new(".".to_string()).with_leaves(leaves)
    }
}
