//! Reference-sharing mapping model.
//!
//! [`SharedTable`] is a handle: cloning it clones the handle, not the
//! entries. Merging adopts specialized entries by handle, so a nested table
//! introduced by a merge stays the same object as in the specialized
//! mapping. [`DeepMerge::deep_merge`] copies only the top level before
//! merging; nested tables reachable from the source are still merged in
//! place and every other holder of those handles sees the change.
//!
//! Self-referential tables are not supported and merging one does not
//! terminate.

use crate::merge::DeepMerge;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::trace;

/// A value held by a [`SharedTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum SharedNode {
    /// Any non-mapping value, arrays included.
    Scalar(Value),
    Table(SharedTable),
}

/// Shared, interior-mutable mapping handle.
#[derive(Debug, Clone, Default)]
pub struct SharedTable(Rc<RefCell<BTreeMap<String, SharedNode>>>);

impl SharedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// New top-level table holding the same entry handles as `self`.
    #[must_use]
    pub fn shallow_copy(&self) -> Self {
        Self(Rc::new(RefCell::new(self.0.borrow().clone())))
    }

    /// Returns the handle stored under `key`.
    pub fn get(&self, key: &str) -> Option<SharedNode> {
        self.0.borrow().get(key).cloned()
    }

    /// Returns the nested table stored under `key`, if that entry is a table.
    pub fn table(&self, key: &str) -> Option<Self> {
        match self.get(key) {
            Some(SharedNode::Table(table)) => Some(table),
            _ => None,
        }
    }

    pub fn insert(&self, key: impl Into<String>, node: impl Into<SharedNode>) -> Option<SharedNode> {
        self.0.borrow_mut().insert(key.into(), node.into())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Whether both handles point at the same table.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Snapshot of the table as a JSON object.
    pub fn to_json(&self) -> Value {
        let entries = self
            .0
            .borrow()
            .iter()
            .map(|(key, node)| {
                let value = match node {
                    SharedNode::Scalar(value) => value.clone(),
                    SharedNode::Table(table) => table.to_json(),
                };
                (key.clone(), value)
            })
            .collect::<Map<String, Value>>();
        Value::Object(entries)
    }
}

impl PartialEq for SharedTable {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl From<&Map<String, Value>> for SharedTable {
    fn from(map: &Map<String, Value>) -> Self {
        let table = Self::new();
        for (key, value) in map {
            table.insert(key.clone(), value.clone());
        }
        table
    }
}

impl From<Value> for SharedNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Table(SharedTable::from(&map)),
            other => Self::Scalar(other),
        }
    }
}

impl From<SharedTable> for SharedNode {
    fn from(table: SharedTable) -> Self {
        Self::Table(table)
    }
}

impl DeepMerge for SharedTable {
    fn deep_merge_in_place(&mut self, specialized: &Self) -> &mut Self {
        merge_shared(self, specialized);
        self
    }

    fn deep_merge(&self, specialized: &Self) -> Self {
        let merged = self.shallow_copy();
        merge_shared(&merged, specialized);
        merged
    }
}

fn merge_shared(target: &SharedTable, overlay: &SharedTable) {
    // Snapshot the overlay so no borrow is held while `target` is written;
    // the two handles may point at the same table.
    let entries: Vec<(String, SharedNode)> =
        overlay.0.borrow().iter().map(|(key, node)| (key.clone(), node.clone())).collect();

    for (key, node) in entries {
        match (target.get(&key), node) {
            (Some(SharedNode::Table(existing)), SharedNode::Table(nested)) => {
                merge_shared(&existing, &nested);
            },
            (Some(existing), node) if existing == node => {},
            (_, node) => {
                trace!(key = %key, "replacing shared entry");
                target.insert(key, node);
            },
        }
    }
}
