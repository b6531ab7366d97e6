//! Name-keyed record collection that keeps file order
//!
//! Both cache files are JSON objects keyed by park name. Cluster seeding walks
//! parks in file order, and rewriting a cache must not shuffle it, so the
//! collection keeps insertion order and serializes back as a map in that order.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct NamedRecords<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for NamedRecords<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> NamedRecords<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record. A replaced record keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, record: T) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = record,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, record));
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<T, S: Into<String>> FromIterator<(S, T)> for NamedRecords<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut records = Self::new();
        for (name, record) in iter {
            records.insert(name, record);
        }
        records
    }
}

impl<T: Serialize> Serialize for NamedRecords<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

struct NamedRecordsVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for NamedRecordsVisitor<T> {
    type Value = NamedRecords<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map keyed by park name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut records = NamedRecords::new();
        while let Some((name, record)) = access.next_entry::<String, T>()? {
            records.insert(name, record);
        }
        Ok(records)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NamedRecords<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NamedRecordsVisitor(PhantomData))
    }
}
