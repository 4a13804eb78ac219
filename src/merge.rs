#![allow(clippy::self_named_module_files)]

//! Recursive ("deep") merge of nested mappings.
//!
//! A *specialized* mapping is merged into a *source* mapping entry by entry:
//!
//! 1. keys missing from the source are adopted from the specialized mapping;
//! 2. when both sides hold a nested mapping, the nested mappings are merged
//!    the same way, in place inside the source;
//! 3. equal values are left alone;
//! 4. anything else is overwritten by the specialized value.
//!
//! Arrays are ordinary values here: they are replaced, never concatenated.

use std::collections::HashSet;
use tracing::trace;

pub mod table;

pub use table::{Node, Table};

type NestedTable<T> = <<T as Table>::Node as Node>::Table;

/// Table pairs still waiting to be merged, as `(target, overlay)`.
type Pending<'a, T> = Vec<(&'a mut NestedTable<T>, &'a NestedTable<T>)>;

/// Deep merge over a mapping type.
pub trait DeepMerge {
    /// Merges `specialized` into `self` and returns `self` for chaining.
    fn deep_merge_in_place(&mut self, specialized: &Self) -> &mut Self;

    /// Returns the merge of `specialized` into a copy of `self`.
    #[must_use]
    fn deep_merge(&self, specialized: &Self) -> Self
    where
        Self: Sized;
}

impl<T> DeepMerge for T
where
    T: Table + Clone,
{
    fn deep_merge_in_place(&mut self, specialized: &Self) -> &mut Self {
        merge_tables(self, specialized);
        self
    }

    fn deep_merge(&self, specialized: &Self) -> Self {
        let mut merged = self.clone();
        merge_tables(&mut merged, specialized);
        merged
    }
}

/// Returns a new mapping holding `specialized` deep-merged into `source`.
///
/// Neither input is modified.
///
/// ```
/// use deep_merge::deep_merge;
/// use serde_json::json;
///
/// let source = json!({"a": 1, "b": {"x": 1, "y": 2}});
/// let specialized = json!({"b": {"y": 3, "z": 4}, "c": 5});
///
/// let merged = deep_merge(
///     source.as_object().expect("object"),
///     specialized.as_object().expect("object"),
/// );
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({"a": 1, "b": {"x": 1, "y": 3, "z": 4}, "c": 5})
/// );
/// ```
pub fn deep_merge<T: DeepMerge>(source: &T, specialized: &T) -> T {
    source.deep_merge(specialized)
}

/// Deep-merges `specialized` into `source` and returns `source`.
pub fn deep_merge_in_place<'s, T: DeepMerge + ?Sized>(
    source: &'s mut T,
    specialized: &T,
) -> &'s mut T {
    source.deep_merge_in_place(specialized)
}

/// Walks nested tables with an explicit work list, so nesting depth costs
/// heap rather than call stack.
fn merge_tables<T: Table>(source: &mut T, specialized: &T) {
    let mut pending: Pending<'_, T> = Vec::new();
    absorb(source, specialized, &mut pending);
    drain::<T::Node>(pending);
}

fn drain<'a, N: Node>(mut pending: Vec<(&'a mut N::Table, &'a N::Table)>) {
    let mut visited = 0_usize;
    while let Some((target, overlay)) = pending.pop() {
        visited += 1;
        absorb(target, overlay, &mut pending);
    }
    trace!(nested_tables = visited, "deep merge finished");
}

/// Applies one level of the merge rules to `target`, queueing every key
/// where both sides hold a table.
fn absorb<'a, T: Table>(target: &'a mut T, overlay: &'a T, pending: &mut Pending<'a, T>) {
    let mut nested: HashSet<&'a str> = HashSet::new();

    for (key, value) in overlay.entries() {
        match target.lookup_mut(key) {
            Some(existing) => {
                if existing.as_table().is_some() && value.as_table().is_some() {
                    nested.insert(key.as_str());
                } else if *existing != *value {
                    trace!(key = %key, "overwriting entry");
                    *existing = value.clone();
                }
            },
            None => {
                trace!(key = %key, "adopting new entry");
                target.put(key.clone(), value.clone());
            },
        }
    }

    if nested.is_empty() {
        return;
    }

    for (key, existing) in target.entries_mut() {
        if !nested.contains(key.as_str()) {
            continue;
        }
        let overlay_table = overlay.lookup(key).and_then(Node::as_table);
        if let (Some(target_table), Some(overlay_table)) = (existing.as_table_mut(), overlay_table) {
            pending.push((target_table, overlay_table));
        }
    }
}
