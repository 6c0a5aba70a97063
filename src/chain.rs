//! Collision chains stored in the buckets of a `ChainedHashMap`

/// A key-value pair stored in a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

impl<V> Entry<V> {
    /// Returns the key of this entry
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value of this entry
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, returning the owned key and value
    #[must_use]
    pub fn into_pair(self) -> (String, V) {
        (self.key, self.value)
    }
}

/// The ordered list of entries whose keys hash to the same bucket.
///
/// Entries keep their insertion order. `append` does not look for duplicates, so
/// callers that need unique keys go through `set`, which updates an existing entry
/// in place and only appends when the key is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain<V> {
    /// Entries in insertion order
    entries: Vec<Entry<V>>,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds an entry at the tail without checking whether the key is already present
    pub fn append(&mut self, key: impl Into<String>, value: V) {
        self.entries.push(Entry { key: key.into(), value });
    }

    /// Returns the first entry stored under `key`
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Entry<V>> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Returns true if an entry is stored under `key`
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Stores `value` under `key`.
    ///
    /// Returns true if the key already existed and its value was replaced, false if a
    /// new entry was appended.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == key) {
            entry.value = value;
            return true;
        }
        self.append(key, value);
        false
    }

    /// Removes the entry stored under `key`, keeping the order of the others.
    ///
    /// Returns true if an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.entries.iter().position(|entry| entry.key == key) {
            Some(position) => {
                let _removed = self.entries.remove(position);
                true
            }
            None => false,
        }
    }

    /// Number of entries in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the chain holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in chain order
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<V>> {
        self.entries.iter()
    }

    /// Keys in chain order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }
}

impl<V: Clone> Chain<V> {
    /// Values in chain order
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.entries.iter().map(|entry| entry.value.clone()).collect()
    }

    /// Key-value pairs in chain order
    #[must_use]
    pub fn entries(&self) -> Vec<(String, V)> {
        self.entries.iter().map(|entry| (entry.key.clone(), entry.value.clone())).collect()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = Entry<V>;
    type IntoIter = std::vec::IntoIter<Entry<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = &'a Entry<V>;
    type IntoIter = std::slice::Iter<'a, Entry<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(pairs: &[(&str, i32)]) -> Chain<i32> {
        let mut chain = Chain::new();
        for &(key, value) in pairs {
            chain.append(key, value);
        }
        chain
    }

    #[test]
    fn test_empty_chain() {
        let mut chain: Chain<i32> = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.find("a"), None);
        assert!(!chain.has("a"));
        assert!(!chain.remove("a"));
        assert!(chain.keys().is_empty());
        assert!(chain.values().is_empty());
        assert!(chain.entries().is_empty());
    }

    #[test]
    fn test_append_keeps_order() {
        let chain = chain_of(&[("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.keys(), vec!["a", "b", "c"]);
        assert_eq!(chain.values(), vec![1, 2, 3]);
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let chain = chain_of(&[("a", 1), ("a", 2)]);
        assert_eq!(chain.len(), 2);
        // first match wins
        assert_eq!(chain.find("a").map(Entry::value), Some(&1));
    }

    #[test]
    fn test_find_and_has() {
        let chain = chain_of(&[("a", 1), ("b", 2)]);
        let entry = chain.find("b");
        assert_eq!(entry.map(Entry::key), Some("b"));
        assert_eq!(entry.map(Entry::value), Some(&2));
        assert!(chain.has("a"));
        assert!(!chain.has("c"));
    }

    #[test]
    fn test_set_updates_or_appends() {
        let mut chain = Chain::new();
        assert!(!chain.set("a", 1));
        assert!(!chain.set("b", 2));
        assert!(chain.set("a", 10));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.entries(), vec![("a".to_string(), 10), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut chain = chain_of(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);

        assert!(chain.remove("a"));
        assert_eq!(chain.keys(), vec!["b", "c", "d"]);

        assert!(chain.remove("c"));
        assert_eq!(chain.keys(), vec!["b", "d"]);

        assert!(chain.remove("d"));
        assert_eq!(chain.keys(), vec!["b"]);

        assert!(!chain.remove("d"));
        assert!(chain.remove("b"));
        assert!(chain.is_empty());
    }

    #[test]
    fn test_borrowed_iteration() {
        let chain = chain_of(&[("k", 7)]);
        let mut count = 0;
        for entry in &chain {
            assert_eq!(entry.key(), "k");
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn test_owned_iteration_moves_values() {
        // String values are not Copy, so these pairs are moved out of the chain
        let mut chain = Chain::new();
        chain.append("a", String::from("x"));
        chain.append("b", String::from("y"));

        let pairs: Vec<_> = chain.into_iter().map(Entry::into_pair).collect();
        assert_eq!(
            pairs,
            vec![("a".to_string(), "x".to_string()), ("b".to_string(), "y".to_string())]
        );
    }
}
