//! Ordered map for generic objects.
//!
//! [`ValueMap`] wraps an [`IndexMap`] so that objects keep the order their
//! keys were first inserted in. A compound converted to an object therefore
//! lists its members in tag order, and converting back restores that order.
//!
//! ## Examples
//!
//! ```rust
//! use nbt_codec::{Value, ValueMap};
//!
//! let mut map = ValueMap::new();
//! map.insert("name".to_string(), Value::from("Alex"));
//! map.insert("level".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alex"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to generic values.
///
/// Re-inserting an existing key replaces its value but keeps its position.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{Value, ValueMap};
///
/// let mut map = ValueMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
/// map.insert("first".to_string(), Value::from(3));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// assert_eq!(map.get("first"), Some(&Value::from(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueMap(IndexMap<String, crate::Value>);

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        ValueMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ValueMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for ValueMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        ValueMap(map.into_iter().collect())
    }
}

impl From<ValueMap> for HashMap<String, crate::Value> {
    fn from(map: ValueMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        ValueMap(IndexMap::from_iter(iter))
    }
}
