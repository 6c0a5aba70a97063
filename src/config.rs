//! Construction parameters for `ChainedHashMap`

use crate::TableError;

/// Load factor threshold used when none is given
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Number of buckets a new table starts with
pub const DEFAULT_CAPACITY: usize = 16;

/// Parameters controlling the initial size and growth of a `ChainedHashMap`.
///
/// ```rust
/// use chainmap::{ChainedHashMap, TableConfig};
///
/// let config = TableConfig { load_factor: 0.5, ..TableConfig::default() };
/// let map = ChainedHashMap::<u32>::with_config(config).unwrap();
/// assert_eq!(map.capacity(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Ratio of stored keys to buckets at which the table doubles
    pub load_factor: f64,
    /// Initial number of buckets
    pub capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { load_factor: DEFAULT_LOAD_FACTOR, capacity: DEFAULT_CAPACITY }
    }
}

impl TableConfig {
    /// Checks that the parameters describe a usable table
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidLoadFactor`] for a load factor that is not finite
    /// or not greater than zero, [`TableError::ZeroCapacity`] for an empty bucket array
    /// and [`TableError::ThresholdBelowOneKey`] when `capacity * load_factor < 1`.
    pub fn validate(&self) -> Result<(), TableError> {
        validate_load_factor(self.load_factor)?;
        if self.capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        validate_threshold(self.load_factor, self.capacity)
    }
}

/// Rejects load factors that would make the growth threshold meaningless
fn validate_load_factor(load_factor: f64) -> Result<(), TableError> {
    if load_factor.is_finite() && load_factor > 0.0 {
        Ok(())
    } else {
        Err(TableError::InvalidLoadFactor(load_factor))
    }
}

/// Rejects a load factor under which `capacity` buckets cannot hold a single key.
///
/// Such a table would grow before its first insertion and could grow again while
/// re-inserting entries during growth.
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
pub(crate) fn validate_threshold(load_factor: f64, capacity: usize) -> Result<(), TableError> {
    validate_load_factor(load_factor)?;
    if capacity as f64 * load_factor < 1.0 {
        return Err(TableError::ThresholdBelowOneKey { load_factor, capacity });
    }
    Ok(())
}
