//! Generic grouping of items under a caller-supplied key.

use std::collections::HashMap;
use std::hash::Hash;

use itertools::Itertools;

/// Group items by `key` in a single pass.
///
/// Each group keeps the relative input order of its items.
pub fn group_by_key<I, T, G, F>(items: I, key: F) -> HashMap<G, Vec<T>>
where
    I: IntoIterator<Item = T>,
    G: Eq + Hash,
    F: FnMut(&T) -> G,
{
    items.into_iter().into_group_map_by(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_items_when_grouping_then_keeps_input_order_per_group() {
        let items = vec![(1, 'a'), (2, 'b'), (1, 'c'), (3, 'd'), (2, 'e')];
        let groups = group_by_key(items, |(k, _)| *k);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&1], vec![(1, 'a'), (1, 'c')]);
        assert_eq!(groups[&2], vec![(2, 'b'), (2, 'e')]);
        assert_eq!(groups[&3], vec![(3, 'd')]);
    }

    #[test]
    fn given_no_items_when_grouping_then_returns_empty_map() {
        let groups = group_by_key(Vec::<u8>::new(), |x| *x);
        assert!(groups.is_empty());
    }
}
