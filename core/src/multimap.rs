use std::fmt::Debug;

/// A case-insensitive, insertion ordered, multi-valued string map.
///
/// Keys compare case-insensitively but keep the spelling they were first
/// inserted with. Used for both HTTP headers and query parameters.
///
/// ```
/// use snsign_core::MultiMap;
///
/// let mut headers = MultiMap::new();
/// headers.put("Content-Type", "application/json");
/// headers.add("Accept", "text/csv");
/// headers.add("accept", "application/json");
///
/// assert_eq!(headers.first_value("content-type"), Some("application/json"));
/// assert_eq!(headers.value("ACCEPT").map(|v| v.len()), Some(2));
/// assert_eq!(headers.keys(), vec!["Content-Type", "Accept"]);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MultiMap {
    entries: Vec<Entry>,
}

#[derive(Clone, PartialEq, Eq)]
struct Entry {
    lower: String,
    key: String,
    values: Vec<String>,
}

/// Conversion into the list of values stored under a single key.
pub trait IntoValues {
    /// Convert into values, in order.
    fn into_values(self) -> Vec<String>;
}

impl IntoValues for &str {
    fn into_values(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoValues for String {
    fn into_values(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoValues for &String {
    fn into_values(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoValues for Vec<String> {
    fn into_values(self) -> Vec<String> {
        self
    }
}

impl IntoValues for Vec<&str> {
    fn into_values(self) -> Vec<String> {
        self.into_iter().map(String::from).collect()
    }
}

impl IntoValues for &[&str] {
    fn into_values(self) -> Vec<String> {
        self.iter().map(|v| v.to_string()).collect()
    }
}

impl<const N: usize> IntoValues for [&str; N] {
    fn into_values(self) -> Vec<String> {
        self.iter().map(|v| v.to_string()).collect()
    }
}

impl MultiMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        let lower = key.to_lowercase();
        self.entries.iter().position(|e| e.lower == lower)
    }

    fn entry_mut(&mut self, key: &str) -> &mut Entry {
        let idx = match self.position(key) {
            Some(idx) => idx,
            None => {
                self.entries.push(Entry {
                    lower: key.to_lowercase(),
                    key: key.to_string(),
                    values: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    /// Append value(s) to the values already stored for `key`.
    pub fn add(&mut self, key: &str, value: impl IntoValues) -> &mut Self {
        self.entry_mut(key).values.extend(value.into_values());
        self
    }

    /// Replace all values stored for `key`.
    ///
    /// The key keeps its original position and spelling if it was already present.
    pub fn put(&mut self, key: &str, value: impl IntoValues) -> &mut Self {
        let entry = self.entry_mut(key);
        entry.values = value.into_values();
        self
    }

    /// Replace the values of every key present in `values`, in iteration order.
    pub fn put_all<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: AsRef<str>,
        V: IntoValues,
    {
        for (k, v) in values {
            self.put(k.as_ref(), v);
        }
        self
    }

    /// Get all values for `key`.
    pub fn value(&self, key: &str) -> Option<&[String]> {
        self.position(key)
            .map(|idx| self.entries[idx].values.as_slice())
    }

    /// Get the first value for `key`.
    pub fn first_value(&self, key: &str) -> Option<&str> {
        self.value(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Remove `key` and return its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.position(key)
            .map(|idx| self.entries.remove(idx).values)
    }

    /// Check if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Keys in insertion order, spelled as first inserted.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    /// Iterate `(key, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.values.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all keys.
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }
}

impl Debug for MultiMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for MultiMap
where
    K: AsRef<str>,
    V: IntoValues,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = MultiMap::new();
        for (k, v) in iter {
            map.add(k.as_ref(), v);
        }
        map
    }
}
