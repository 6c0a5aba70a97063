//! Error types for `ChainedHashMap`

use thiserror::Error;

/// Errors produced while configuring or operating a `ChainedHashMap`.
///
/// Missing keys are not errors: lookups report them as `None` or `false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A computed bucket index fell outside the bucket array.
    ///
    /// The table never returns this variant; it panics with its message because
    /// no input can produce it while the hash and the capacity agree.
    #[error("bucket index {index} out of range for capacity {capacity}")]
    BucketOutOfRange {
        /// The offending index
        index: usize,
        /// Number of buckets at the time of the lookup
        capacity: usize,
    },
    /// Load factor threshold was not a finite, strictly positive number
    #[error("load factor must be finite and greater than zero, got {0}")]
    InvalidLoadFactor(f64),
    /// The load factor leaves room for less than one key in the bucket array
    #[error("load factor {load_factor} cannot hold a single key in {capacity} buckets")]
    ThresholdBelowOneKey {
        /// The rejected load factor
        load_factor: f64,
        /// Number of buckets it was checked against
        capacity: usize,
    },
    /// Initial capacity was zero
    #[error("capacity must be at least 1")]
    ZeroCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = TableError::BucketOutOfRange { index: 20, capacity: 16 };
        assert_eq!(err.to_string(), "bucket index 20 out of range for capacity 16");

        let err = TableError::InvalidLoadFactor(-1.0);
        assert_eq!(err.to_string(), "load factor must be finite and greater than zero, got -1");

        let err = TableError::ThresholdBelowOneKey { load_factor: 0.1, capacity: 4 };
        assert_eq!(err.to_string(), "load factor 0.1 cannot hold a single key in 4 buckets");

        assert_eq!(TableError::ZeroCapacity.to_string(), "capacity must be at least 1");
    }
}
