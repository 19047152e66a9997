//! Path parameters captured from a matched URL.

use std::collections::HashMap;

use serde::Serialize;

/// Path parameters extracted from the matched route, keyed by placeholder name.
///
/// Values are the raw captured substrings; any typed parsing is up to the caller.
///
/// # Examples
///
/// ```
/// use routetree::PathParams;
///
/// let params: PathParams = [("id", "42")].into_iter().collect();
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathParams {
    map: HashMap<String, String>,
}

impl PathParams {
    /// Create a new empty parameters map
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Insert a value, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    /// Get a value by placeholder name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consume the parameters, returning the underlying map
    pub fn into_map(self) -> HashMap<String, String> {
        self.map
    }
}

impl<K, V> FromIterator<(K, V)> for PathParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = PathParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_value() {
        let mut params = PathParams::new();
        params.insert("id", "1");
        params.insert("id", "2");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id"), Some("2"));
    }

    #[test]
    fn collect_and_iterate() {
        let params: PathParams = [("a", "x"), ("b", "y")].into_iter().collect();
        let mut pairs: Vec<_> = params.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("a", "x"), ("b", "y")]);
        assert!(params.contains_key("b"));
        assert!(!params.is_empty());
    }

    #[test]
    fn into_map_hands_back_owned_values() {
        let params: PathParams = [("slug", "hello-world")].into_iter().collect();
        let map = params.into_map();
        assert_eq!(map.get("slug").map(String::as_str), Some("hello-world"));
    }
}
