//! # Chained Hash Map
//!
//! A Rust implementation of a hash table with separate chaining and string keys.
//!
//! Keys are hashed with a polynomial rolling hash taken modulo the current number of
//! buckets. Each bucket holds a [`Chain`] of the entries that collide in it, created on
//! the first insertion and dropped again when its last entry is removed. The table
//! doubles its bucket count once the number of keys reaches `capacity * load_factor`,
//! rehashing every entry into the new buckets.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // Create a new hash map with 16 buckets and a 0.75 load factor
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.set("apple", "red");
//! map.set("banana", "yellow");
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&"red"));
//! assert!(map.has("banana"));
//!
//! // Update values
//! map.set("apple", "green");
//! assert_eq!(map.get("apple"), Some(&"green"));
//! assert_eq!(map.length(), 2);
//!
//! // Remove values
//! assert!(map.remove("apple"));
//! assert!(!map.remove("apple"));
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::with_options(0.75, 16).unwrap();
//! for i in 0..12 {
//!     map.set(format!("key-{i}"), i);
//! }
//! assert_eq!(map.capacity(), 16);
//!
//! // 12 >= 16 * 0.75, so the next new key doubles the table first
//! map.set("key-12", 12);
//! assert_eq!(map.capacity(), 32);
//! assert_eq!(map.length(), 13);
//! ```

/// Module implementing the collision chains held by each bucket
mod chain;
/// Module implementing the separate-chaining hash map
mod chained_hash_map;
/// Construction parameters and their defaults
mod config;
/// Error types
mod error;
/// Hashing functions
mod utils;

pub use chain::{Chain, Entry};
pub use chained_hash_map::{ChainedHashMap, Iter};
pub use config::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, TableConfig};
pub use error::TableError;
pub use utils::{HASH_MULTIPLIER, rolling_hash};
