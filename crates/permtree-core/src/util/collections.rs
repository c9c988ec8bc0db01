//! Order-preserving duplicate partitioning.
//!
//! Both the node merge engine and group composition share the same
//! strategy: split a sequence into buckets of items sharing a key, fold each
//! multi-item bucket left to right, then emit the folded results followed by
//! the items that never had a duplicate.
//!
//! The output order is therefore *merged buckets first* (in the order their
//! key was first seen) and *unique items second* (in their original order).
//! A merged key does not keep its position relative to unique keys.

use std::collections::HashMap;
use std::hash::Hash;

/// Result of splitting a sequence by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    /// Buckets with two or more members, in first-occurrence order.
    /// Members keep their original relative order.
    pub duplicates: Vec<Vec<T>>,
    /// Items whose key occurs exactly once, in original order.
    pub unique: Vec<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            duplicates: Vec::new(),
            unique: Vec::new(),
        }
    }
}

/// Split `items` into duplicate buckets and unique items by `key_of`.
///
/// # Examples
///
/// ```
/// use permtree_core::partition_by_key;
///
/// let partition = partition_by_key(vec!["a1", "b1", "a2", "c1"], |s| s.chars().next());
/// assert_eq!(partition.duplicates, vec![vec!["a1", "a2"]]);
/// assert_eq!(partition.unique, vec!["b1", "c1"]);
/// ```
pub fn partition_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key_of: F) -> Partition<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<Vec<T>> = Vec::new();

    for item in items {
        let key = key_of(&item);
        match index.get(&key) {
            Some(&slot) => buckets[slot].push(item),
            None => {
                index.insert(key, buckets.len());
                buckets.push(vec![item]);
            }
        }
    }

    let mut partition = Partition::default();
    for bucket in buckets {
        if bucket.len() > 1 {
            partition.duplicates.push(bucket);
        } else {
            partition.unique.extend(bucket);
        }
    }
    partition
}

/// Partition `items` by key and left-fold every duplicate bucket with
/// `merge_two`.
///
/// Returns the folded buckets followed by the unique items.
pub fn merge_partitioned<T, K, F, M>(
    items: impl IntoIterator<Item = T>,
    key_of: F,
    mut merge_two: M,
) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
    M: FnMut(T, T) -> T,
{
    let partition = partition_by_key(items, key_of);
    log::trace!(
        "Merging {} duplicate bucket(s), keeping {} unique item(s)",
        partition.duplicates.len(),
        partition.unique.len()
    );

    let mut result = Vec::with_capacity(partition.duplicates.len() + partition.unique.len());
    for bucket in partition.duplicates {
        if let Some(merged) = bucket.into_iter().reduce(&mut merge_two) {
            result.push(merged);
        }
    }
    result.extend(partition.unique);
    result
}
