//! Join helpers for eager relationship loading.
//!
//! A one-to-many join fans out: a root with N children appears in N joined
//! pairs. [`distinct_on_root`] folds those pairs back so each root is returned
//! exactly once with its children attached.

use std::collections::HashMap;
use std::hash::Hash;

use crate::table::{Record, Table};

/// Left outer join of `roots` against `children`.
///
/// Every matching child yields one `(root, Some(child))` pair. A root with no
/// match yields a single `(root, None)` pair.
pub fn left_join<'a, L, R>(
    roots: impl IntoIterator<Item = &'a L>,
    children: &Table<R>,
    on: impl Fn(&L, &R) -> bool,
) -> Vec<(L, Option<R>)>
where
    L: Clone + 'a,
    R: Record,
{
    let mut joined = Vec::new();
    for root in roots {
        let before = joined.len();
        for child in children.rows().filter(|child| on(root, child)) {
            joined.push((root.clone(), Some(child.clone())));
        }
        if joined.len() == before {
            joined.push((root.clone(), None));
        }
    }
    joined
}

/// Group joined pairs by root key, keeping first-seen root order.
pub fn distinct_on_root<L, R, K>(
    joined: Vec<(L, Option<R>)>,
    key: impl Fn(&L) -> K,
) -> Vec<(L, Vec<R>)>
where
    K: Eq + Hash,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut grouped: Vec<(L, Vec<R>)> = Vec::new();

    for (root, child) in joined {
        let root_key = key(&root);
        let slot = match slots.get(&root_key) {
            Some(slot) => *slot,
            None => {
                slots.insert(root_key, grouped.len());
                grouped.push((root, Vec::new()));
                grouped.len() - 1
            }
        };
        if let Some(child) = child {
            grouped[slot].1.push(child);
        }
    }

    grouped
}
