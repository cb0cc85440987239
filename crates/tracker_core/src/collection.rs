//! Synchronous collection transforms used for optimistic mutations.
//!
//! Every function here returns a fresh `Vec`; the input slice is never
//! touched, so the caller always holds an intact pre-mutation snapshot.

use crate::{Entity, Patch, RecordId, TempId};

/// Result of a keyed transform: the new collection and how many entities matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation<T> {
    pub optimistic: Vec<T>,
    pub matched: usize,
}

/// Merges `patch` into every entity whose key equals `key_value`.
///
/// Order is preserved. When nothing matches, `optimistic` equals `items`.
pub fn apply_patch<T, K, P, F>(items: &[T], key: F, key_value: &K, patch: &P) -> Mutation<T>
where
    T: Clone,
    K: PartialEq + ?Sized,
    P: Patch<T> + ?Sized,
    F: Fn(&T) -> &K,
{
    let mut matched = 0;
    let optimistic = items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if key(&item) == key_value {
                patch.apply_to(&mut item);
                matched += 1;
            }
            item
        })
        .collect();
    Mutation {
        optimistic,
        matched,
    }
}

/// Drops every entity whose key equals `key_value`.
pub fn remove_matching<T, K, F>(items: &[T], key: F, key_value: &K) -> Mutation<T>
where
    T: Clone,
    K: PartialEq + ?Sized,
    F: Fn(&T) -> &K,
{
    let optimistic: Vec<T> = items
        .iter()
        .filter(|item| key(*item) != key_value)
        .cloned()
        .collect();
    let matched = items.len() - optimistic.len();
    Mutation {
        optimistic,
        matched,
    }
}

/// Appends a placeholder built from `draft` under the temporary id.
pub fn append_optimistic<T: Entity>(items: &[T], temp: TempId, draft: &T::Draft) -> Vec<T> {
    let mut optimistic = Vec::with_capacity(items.len() + 1);
    optimistic.extend_from_slice(items);
    optimistic.push(T::from_draft(RecordId::Temp(temp), draft));
    optimistic
}

/// Swaps the placeholder carrying `temp` for the server's entity, in place.
pub fn replace_temp<T: Entity>(items: Vec<T>, temp: TempId, created: T) -> Vec<T> {
    let temp = RecordId::Temp(temp);
    let mut created = Some(created);
    items
        .into_iter()
        .filter_map(|item| {
            if item.record_id() == &temp {
                // Only one placeholder per temp id; extra copies are dropped.
                created.take()
            } else {
                Some(item)
            }
        })
        .collect()
}
