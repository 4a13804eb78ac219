//! Mapping models the merge engine can run over.
//!
//! A [`Node`] is a value that may or may not be a nested mapping; a [`Table`]
//! is a mapping from string keys to nodes. Arrays and every other non-mapping
//! value are opaque scalars as far as merging is concerned.

use std::collections::HashMap;
use std::hash::BuildHasher;

/// A value inside a mapping.
pub trait Node: Clone + PartialEq {
    /// The nested mapping type this node can hold.
    type Table: Table<Node = Self>;

    fn as_table(&self) -> Option<&Self::Table>;

    fn as_table_mut(&mut self) -> Option<&mut Self::Table>;
}

/// A string-keyed mapping of [`Node`]s.
pub trait Table {
    type Node: Node;

    type Entries<'a>: Iterator<Item = (&'a String, &'a Self::Node)>
    where
        Self: 'a;

    type EntriesMut<'a>: Iterator<Item = (&'a String, &'a mut Self::Node)>
    where
        Self: 'a;

    fn lookup(&self, key: &str) -> Option<&Self::Node>;

    fn lookup_mut(&mut self, key: &str) -> Option<&mut Self::Node>;

    fn put(&mut self, key: String, node: Self::Node);

    fn entries(&self) -> Self::Entries<'_>;

    fn entries_mut(&mut self) -> Self::EntriesMut<'_>;
}

impl Node for serde_json::Value {
    type Table = serde_json::Map<String, Self>;

    fn as_table(&self) -> Option<&Self::Table> {
        self.as_object()
    }

    fn as_table_mut(&mut self) -> Option<&mut Self::Table> {
        self.as_object_mut()
    }
}

impl Table for serde_json::Map<String, serde_json::Value> {
    type Node = serde_json::Value;
    type Entries<'a> = serde_json::map::Iter<'a>;
    type EntriesMut<'a> = serde_json::map::IterMut<'a>;

    fn lookup(&self, key: &str) -> Option<&Self::Node> {
        self.get(key)
    }

    fn lookup_mut(&mut self, key: &str) -> Option<&mut Self::Node> {
        self.get_mut(key)
    }

    fn put(&mut self, key: String, node: Self::Node) {
        self.insert(key, node);
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter()
    }

    fn entries_mut(&mut self) -> Self::EntriesMut<'_> {
        self.iter_mut()
    }
}

impl Node for toml::Value {
    type Table = toml::Table;

    fn as_table(&self) -> Option<&toml::Table> {
        match self {
            toml::Value::Table(table) => Some(table),
            _ => None,
        }
    }

    fn as_table_mut(&mut self) -> Option<&mut toml::Table> {
        match self {
            toml::Value::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl Table for toml::Table {
    type Node = toml::Value;
    type Entries<'a> = toml::map::Iter<'a>;
    type EntriesMut<'a> = toml::map::IterMut<'a>;

    fn lookup(&self, key: &str) -> Option<&Self::Node> {
        self.get(key)
    }

    fn lookup_mut(&mut self, key: &str) -> Option<&mut Self::Node> {
        self.get_mut(key)
    }

    fn put(&mut self, key: String, node: Self::Node) {
        self.insert(key, node);
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter()
    }

    fn entries_mut(&mut self) -> Self::EntriesMut<'_> {
        self.iter_mut()
    }
}

/// Flat carrier used when a document is held as loose top-level fields
/// (e.g. a struct's `#[serde(flatten)]` remainder).
impl<S> Table for HashMap<String, serde_json::Value, S>
where
    S: BuildHasher,
{
    type Node = serde_json::Value;
    type Entries<'a>
        = std::collections::hash_map::Iter<'a, String, serde_json::Value>
    where
        Self: 'a;
    type EntriesMut<'a>
        = std::collections::hash_map::IterMut<'a, String, serde_json::Value>
    where
        Self: 'a;

    fn lookup(&self, key: &str) -> Option<&Self::Node> {
        self.get(key)
    }

    fn lookup_mut(&mut self, key: &str) -> Option<&mut Self::Node> {
        self.get_mut(key)
    }

    fn put(&mut self, key: String, node: Self::Node) {
        self.insert(key, node);
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter()
    }

    fn entries_mut(&mut self) -> Self::EntriesMut<'_> {
        self.iter_mut()
    }
}
