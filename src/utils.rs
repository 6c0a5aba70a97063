//! Hashing utilities for `ChainedHashMap`

/// Multiplier of the polynomial rolling hash
pub const HASH_MULTIPLIER: u32 = 31;

/// Hashes `key` straight into a bucket index for a table of `capacity` buckets.
///
/// Each UTF-16 code unit is folded in left to right as
/// `hash = (31 * hash + unit) % capacity`, starting from zero. The modulus is applied
/// at every step, so the result depends on `capacity` as a whole and every key has to
/// be rehashed when the capacity changes.
///
/// A `capacity` of zero yields zero; tables never ask for it.
///
/// ```rust
/// use chainmap::rolling_hash;
///
/// // 'a' is 97
/// assert_eq!(rolling_hash("a", 16), 1);
/// assert_eq!(rolling_hash("a", 32), 1);
/// assert_eq!(rolling_hash("q", 16), 1);
/// assert_eq!(rolling_hash("q", 32), 17);
/// ```
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn rolling_hash(key: &str, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    // u128 keeps `31 * hash + unit` exact for any `hash < capacity <= usize::MAX`
    let modulus = capacity as u128;
    let hash = key.encode_utf16().fold(0_u128, |hash, unit| {
        (u128::from(HASH_MULTIPLIER) * hash + u128::from(unit)) % modulus
    });
    // hash < capacity, so it always fits back into usize
    usize::try_from(hash).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_hashes_to_zero() {
        assert_eq!(rolling_hash("", 16), 0);
        assert_eq!(rolling_hash("", 1), 0);
    }

    #[test]
    fn test_known_values() {
        // "ab": (31 * (97 % 16) + 98) % 16 = 129 % 16
        assert_eq!(rolling_hash("ab", 16), 1);
        // "ab" at 1000: (31 * 97 + 98) % 1000 = 3105 % 1000
        assert_eq!(rolling_hash("ab", 1000), 105);
        assert_eq!(rolling_hash("apple", 1), 0);
    }

    #[test]
    fn test_modulus_applied_every_step() {
        // With a large modulus the hash is the plain polynomial value
        let plain = 31 * 31 * 99 + 31 * 97 + 116; // "cat"
        assert_eq!(rolling_hash("cat", 1 << 20), plain);
        assert_eq!(rolling_hash("cat", 7), plain % 7);
    }

    #[test]
    fn test_uses_utf16_code_units() {
        // U+00E9 is a single code unit with value 233
        assert_eq!(rolling_hash("\u{e9}", 1000), 233);
        // U+1F600 is the surrogate pair 0xD83D 0xDE00
        let expected = (31 * 0xD83D + 0xDE00) % 100_000;
        assert_eq!(rolling_hash("\u{1f600}", 100_000), expected);
    }

    #[test]
    fn test_always_below_capacity() {
        for capacity in [1, 2, 3, 16, 17, 1024] {
            for key in ["", "a", "apple", "ice cream", "a;sldfjk", "\u{1f600}"] {
                assert!(rolling_hash(key, capacity) < capacity);
            }
        }
    }
}
