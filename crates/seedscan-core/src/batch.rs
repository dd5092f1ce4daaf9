//! A batch of 8 seeds advanced together through one filter pass.

use alloc::string::String;

use crate::error::CoreError;
use crate::mask::LANES;

/// Balatro seeds are 8 characters drawn from `[A-Z0-9]`, excluding `0`, `O`,
/// `1`, `I`/`L` to avoid visual ambiguity when players type them in by hand.
pub const SEED_LEN: usize = 8;

fn is_valid_seed_char(c: u8) -> bool {
    matches!(c, b'A'..=b'Z' | b'2'..=b'9') && !matches!(c, b'I' | b'L' | b'O')
}

/// The alphabet seed characters are drawn from, in ascending order; index
/// `i` of this table is digit value `i` of a base-[`ALPHABET.len()`] seed.
const ALPHABET: [u8; 31] = [
    b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H',
    b'J', b'K', b'M', b'N', b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z',
];

fn digit_value(c: u8) -> Option<u8> {
    ALPHABET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// Size of the full seed space (`ALPHABET.len() ^ SEED_LEN`), the upper
/// bound an index-based enumeration (see [`Seed::from_index`]) can reach.
pub const SEED_SPACE_SIZE: u64 = 31u64.pow(SEED_LEN as u32);

/// A single validated 8-character seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let bytes = s.as_bytes();
        if bytes.len() != SEED_LEN {
            return Err(CoreError::Domain("seed must be exactly 8 characters"));
        }
        let mut out = [0u8; SEED_LEN];
        for (i, &b) in bytes.iter().enumerate() {
            let upper = b.to_ascii_uppercase();
            if !is_valid_seed_char(upper) {
                return Err(CoreError::Domain("seed contains an invalid character"));
            }
            out[i] = upper;
        }
        Ok(Seed(out))
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).expect("seed bytes are always valid ascii")
    }

    pub fn to_owned_string(&self) -> String {
        String::from(self.as_str())
    }

    /// The `index`-th seed in ascending alphabetical order, for index-based
    /// seed-space enumeration (`0..SEED_SPACE_SIZE`). Panics if `index` is
    /// out of range.
    pub fn from_index(index: u64) -> Self {
        assert!(index < SEED_SPACE_SIZE, "seed index out of range");
        let base = ALPHABET.len() as u64;
        let mut n = index;
        let mut out = [0u8; SEED_LEN];
        for slot in out.iter_mut().rev() {
            *slot = ALPHABET[(n % base) as usize];
            n /= base;
        }
        Seed(out)
    }

    /// Inverse of [`Self::from_index`]: this seed's position in ascending
    /// alphabetical order.
    pub fn index(&self) -> u64 {
        let base = ALPHABET.len() as u64;
        self.0.iter().fold(0u64, |acc, &c| {
            acc * base + digit_value(c).expect("seed chars are validated on construction") as u64
        })
    }
}

impl core::fmt::Display for Seed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eight seeds evaluated together by one worker's filter pass.
#[derive(Debug, Clone)]
pub struct SeedBatch {
    seeds: [Seed; LANES],
}

impl SeedBatch {
    pub fn new(seeds: [Seed; LANES]) -> Self {
        SeedBatch { seeds }
    }

    pub fn from_strs(strs: [&str; LANES]) -> Result<Self, CoreError> {
        let mut seeds = [Seed::parse("AAAAAAAA").expect("literal is valid"); LANES];
        for (slot, s) in seeds.iter_mut().zip(strs.iter()) {
            *slot = Seed::parse(s)?;
        }
        Ok(SeedBatch { seeds })
    }

    /// The batch of `LANES` consecutive seeds starting at `start_index`
    /// (see [`Seed::from_index`]). The caller is responsible for not
    /// running past [`SEED_SPACE_SIZE`].
    pub fn from_index(start_index: u64) -> Self {
        let mut seeds = [Seed::parse("AAAAAAAA").expect("literal is valid"); LANES];
        for (i, slot) in seeds.iter_mut().enumerate() {
            *slot = Seed::from_index(start_index + i as u64);
        }
        SeedBatch { seeds }
    }

    #[inline]
    pub fn lane(&self, index: usize) -> Seed {
        self.seeds[index]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Seed> {
        self.seeds.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_lowercase_and_normalizes_to_uppercase() {
        let seed = Seed::parse("abcd2345").unwrap();
        assert_eq!(seed.as_str(), "ABCD2345");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(Seed::parse("ABC").is_err());
    }

    #[test]
    fn parse_rejects_ambiguous_characters() {
        for bad in ["AAAAAAA0", "AAAAAAAO", "AAAAAAA1", "AAAAAAAI", "AAAAAAAL"] {
            assert!(Seed::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn index_round_trips_through_from_index() {
        for idx in [0u64, 1, 30, 31, 1_000_000, SEED_SPACE_SIZE - 1] {
            let seed = Seed::from_index(idx);
            assert_eq!(seed.index(), idx, "seed {seed} should round-trip index {idx}");
        }
    }

    #[test]
    fn from_index_is_strictly_ascending() {
        let a = Seed::from_index(5);
        let b = Seed::from_index(6);
        assert!(a.as_str() < b.as_str());
    }

    #[test]
    fn batch_from_index_covers_consecutive_seeds() {
        let batch = SeedBatch::from_index(100);
        assert_eq!(batch.lane(0).index(), 100);
        assert_eq!(batch.lane(7).index(), 107);
    }

    #[test]
    fn batch_from_strs_preserves_lane_order() {
        let batch = SeedBatch::from_strs([
            "AAAAAAA2", "AAAAAAA3", "AAAAAAA4", "AAAAAAA5",
            "AAAAAAA6", "AAAAAAA7", "AAAAAAA8", "AAAAAAA9",
        ])
        .unwrap();
        assert_eq!(batch.lane(0).as_str(), "AAAAAAA2");
        assert_eq!(batch.lane(7).as_str(), "AAAAAAA9");
    }
}
