use std::{iter::FusedIterator, mem};

use tracing::{debug, trace};

use crate::{Chain, Entry, TableConfig, TableError, config::validate_threshold, rolling_hash};

/// A hash table with string keys and separate chaining.
///
/// Keys are hashed with [`rolling_hash`] straight into a bucket index, and every
/// bucket holds at most one [`Chain`] of colliding entries. Before a new key is
/// inserted the table checks `len >= capacity * load_factor_threshold` and, if so,
/// doubles its capacity and rehashes every entry.
///
/// Iteration follows bucket order, then chain order. That order is deterministic for
/// a given sequence of operations but is not otherwise meaningful.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock for shared access.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    /// The buckets; `None` until the first key lands in one
    buckets: Vec<Option<Chain<V>>>,
    /// Number of buckets the hash is computed for
    capacity: usize,
    /// Current number of distinct keys in the table
    size: usize,
    /// Ratio of keys to buckets at which the table grows
    load_factor_threshold: f64,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<V>
where
    K: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Reports a bucket index that does not fit the bucket array
#[cold]
#[track_caller]
#[allow(clippy::panic)]
fn bucket_out_of_range(index: usize, capacity: usize) -> ! {
    panic!("{}", TableError::BucketOutOfRange { index, capacity })
}

impl<V> ChainedHashMap<V> {
    /// Creates an empty table with 16 buckets and a load factor threshold of 0.75
    #[must_use]
    pub fn new() -> Self {
        let config = TableConfig::default();
        Self::from_parts(config.capacity, config.load_factor)
    }

    /// Creates an empty table from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns the error reported by [`TableConfig::validate`].
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::from_parts(config.capacity, config.load_factor))
    }

    /// Creates an empty table with the given load factor threshold and bucket count.
    ///
    /// `capacity * load_factor` must be at least 1 so that the table holds one key
    /// before it first grows. Below that, re-inserting entries during growth could
    /// grow the table again and again.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidLoadFactor`], [`TableError::ThresholdBelowOneKey`]
    /// or [`TableError::ZeroCapacity`] for parameters that cannot describe a table.
    pub fn with_options(load_factor: f64, capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig { load_factor, capacity })
    }

    /// Builds an empty table without validating its parameters
    fn from_parts(capacity: usize, load_factor_threshold: f64) -> Self {
        Self { buckets: empty_buckets(capacity), capacity, size: 0, load_factor_threshold }
    }

    /// Returns the chain in the bucket `key` hashes to, if the bucket is occupied
    ///
    /// # Panics
    ///
    /// Panics if the index is not below the number of buckets, which means the hash
    /// and the capacity bookkeeping disagree.
    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        let index = rolling_hash(key, self.capacity);
        match self.buckets.get(index) {
            Some(slot) => slot.as_ref(),
            None => bucket_out_of_range(index, self.buckets.len()),
        }
    }

    /// Returns the bucket slot `key` hashes to
    ///
    /// # Panics
    ///
    /// Panics under the same condition as [`chain`](Self::chain).
    fn slot_mut(&mut self, key: &str) -> &mut Option<Chain<V>> {
        let index = rolling_hash(key, self.capacity);
        let bucket_count = self.buckets.len();
        match self.buckets.get_mut(index) {
            Some(slot) => slot,
            None => bucket_out_of_range(index, bucket_count),
        }
    }

    /// Returns true if inserting one more key has to grow the table first
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn needs_growth(&self) -> bool {
        self.size as f64 >= self.capacity as f64 * self.load_factor_threshold
    }

    /// Stores `value` under `key`, replacing the value of an existing key.
    ///
    /// Grows the table first when `key` is new and the table has reached its load
    /// factor threshold.
    ///
    /// # Panics
    ///
    /// Panics if the computed bucket index falls outside the bucket array.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if self.needs_growth() && !self.has(&key) {
            self.grow();
        }

        let chain = self.slot_mut(&key).get_or_insert_with(|| {
            trace!(key = %key, "creating chain");
            Chain::new()
        });
        if !chain.set(key, value) {
            self.size = self.size.saturating_add(1);
        }
    }

    /// Retrieve the value stored under `key`
    ///
    /// # Panics
    ///
    /// Panics if the computed bucket index falls outside the bucket array.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.find(key).map(Entry::value)
    }

    /// Returns true if the table contains `key`
    ///
    /// # Panics
    ///
    /// Panics if the computed bucket index falls outside the bucket array.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.chain(key).is_some_and(|chain| chain.has(key))
    }

    /// Removes `key` from the table, returning true if it was present.
    ///
    /// A chain left empty by the removal is dropped and its bucket becomes empty.
    ///
    /// # Panics
    ///
    /// Panics if the computed bucket index falls outside the bucket array.
    pub fn remove(&mut self, key: &str) -> bool {
        let slot = self.slot_mut(key);
        let Some(chain) = slot.as_mut() else {
            return false;
        };
        if !chain.remove(key) {
            return false;
        }
        if chain.is_empty() {
            trace!(key, "dropping empty chain");
            *slot = None;
        }
        self.size = self.size.saturating_sub(1);
        true
    }

    /// Returns the number of keys in the table
    #[must_use]
    pub fn length(&self) -> usize {
        self.size
    }

    /// Returns the number of keys in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every key while keeping the current capacity
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.capacity);
        self.size = 0;
    }

    /// Doubles the capacity and rehashes every entry.
    ///
    /// The old table is swapped out for an empty one with twice the buckets, and its
    /// entries are moved back in through [`set`](Self::set). `self` holds a consistent
    /// table at every step.
    fn grow(&mut self) {
        let new_capacity = self.capacity.saturating_mul(2);
        debug!(old_capacity = self.capacity, new_capacity, entries = self.size, "growing table");

        let threshold = self.load_factor_threshold;
        let old = mem::replace(self, Self::from_parts(new_capacity, threshold));
        for (key, value) in old.into_pairs() {
            self.set(key, value);
        }
    }

    /// Consumes the table, yielding owned pairs in bucket order then chain order
    fn into_pairs(self) -> impl Iterator<Item = (String, V)> {
        self.buckets.into_iter().flatten().flat_map(IntoIterator::into_iter).map(Entry::into_pair)
    }

    /// All keys, in bucket order then chain order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    /// Returns the number of buckets in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the ratio of keys to buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// Returns the ratio of keys to buckets at which the table grows
    #[must_use]
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Changes the ratio of keys to buckets at which the table grows.
    ///
    /// The new threshold is checked on the next insertion of a new key.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidLoadFactor`] if `threshold` is not finite or not
    /// greater than zero, and [`TableError::ThresholdBelowOneKey`] if the current
    /// capacity could not hold a single key under it.
    pub fn set_load_factor_threshold(&mut self, threshold: f64) -> Result<(), TableError> {
        validate_threshold(threshold, self.capacity)?;
        self.load_factor_threshold = threshold;
        Ok(())
    }

    /// Returns the length of the chain in every bucket, zero for empty buckets
    #[must_use]
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(|bucket| bucket.as_ref().map_or(0, Chain::len)).collect()
    }

    /// Returns an iterator over the key-value pairs
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None, remaining: self.size }
    }
}

impl<V: Clone> ChainedHashMap<V> {
    /// All values, in bucket order then chain order
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// All key-value pairs, in bucket order then chain order
    #[must_use]
    pub fn entries(&self) -> Vec<(String, V)> {
        self.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }
}

/// Allocates `capacity` empty buckets
fn empty_buckets<V>(capacity: usize) -> Vec<Option<Chain<V>>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of a `ChainedHashMap`
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: std::slice::Iter<'a, Option<Chain<V>>>,
    /// Entries left in the chain currently being walked
    chain: Option<std::slice::Iter<'a, Entry<V>>>,
    /// Number of pairs not yet yielded
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((entry.key(), entry.value()));
            }
            let chain = self.buckets.next()?;
            self.chain = chain.as_ref().map(Chain::iter);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
