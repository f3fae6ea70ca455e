//! A map from string keys to lists of string values. This has an API similar to the standard
//! library's `HashMap`, except inserts append instead of replacing.

use hashbrown::hash_map::Iter;
use hashbrown::HashMap;

/// Associates each key with every value ever inserted for it, in insertion order. Duplicate values
/// are kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiMap {
    inner: HashMap<String, Vec<String>>,
}

impl MultiMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends all `values` to `key`, creating the key if it wasn't present.
    pub fn insert<K, I>(&mut self, key: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = String>,
    {
        self.inner.entry(key.into()).or_default().extend(values);
    }

    /// Number of values stored for `key`, 0 if the key is absent.
    pub fn key_len(&self, key: &str) -> usize {
        self.inner.get(key).map_or(0, Vec::len)
    }

    /// Values stored for `key`, if the key is present.
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    /// Removes `key` and all its values. Returns whether the key was present.
    pub fn delete_key(&mut self, key: &str) -> bool {
        self.inner.remove(key).is_some()
    }

    /// Number of keys in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Vec<String>> {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a MultiMap {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
