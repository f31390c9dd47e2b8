use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{SeedParseError, ShapeKind};

/// Chooses the kind of each newly spawned piece.
///
/// Any `FnMut() -> ShapeKind` closure is a source, which keeps tests
/// deterministic:
///
/// ```
/// use stackfall_engine::{PieceSource, ShapeKind};
///
/// let mut kinds = [ShapeKind::I, ShapeKind::O].into_iter().cycle();
/// let mut source = move || kinds.next().unwrap();
/// assert_eq!(source.next_kind(), ShapeKind::I);
/// assert_eq!(source.next_kind(), ShapeKind::O);
/// assert_eq!(source.next_kind(), ShapeKind::I);
/// ```
pub trait PieceSource {
    fn next_kind(&mut self) -> ShapeKind;
}

impl<F> PieceSource for F
where
    F: FnMut() -> ShapeKind,
{
    fn next_kind(&mut self) -> ShapeKind {
        self()
    }
}

/// Uniform random choice over the seven kinds, driven by a seeded PCG
/// generator.
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceSource {
    /// Creates a source with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// The seed this source was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl PieceSource for RandomPieceSource {
    fn next_kind(&mut self) -> ShapeKind {
        self.rng.random()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit value written as 32 hexadecimal digits, both on the command
/// line and in recordings. The same seed always produces the same piece
/// sequence.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use stackfall_engine::{PieceSeed, PieceSource as _, RandomPieceSource};
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = RandomPieceSource::with_seed(seed);
/// let mut b = RandomPieceSource::with_seed(seed);
/// assert_eq!(a.next_kind(), b.next_kind());
///
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SeedParseError {
            input: s.to_owned(),
        };
        // from_str_radix alone would accept a leading sign.
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| invalid())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQUENTIAL: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_all_zeros() {
            let seed = PieceSeed::from_bytes([0u8; 16]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"00000000000000000000000000000000\"");
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            // Big-endian: bytes appear in order as hex pairs
            let seed = PieceSeed::from_bytes(SEQUENTIAL);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized.to_bytes(), SEQUENTIAL);
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let json = "\"0123456789ABCDEFFEDCBA9876543210\"";
            let deserialized: PieceSeed = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized.to_bytes(), SEQUENTIAL);
        }

        #[test]
        fn test_error_invalid_hex() {
            for json in [
                "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
                "\"0123456789abcdef0123456789abcde\"",
                "\"0123456789abcdef0123456789abcdef0\"",
                "\"\"",
            ] {
                let err = serde_json::from_str::<PieceSeed>(json).unwrap_err();
                assert!(err.to_string().contains("32 hex digits"), "{json}");
            }
        }
    }

    mod piece_seed_parsing {
        use super::*;

        #[test]
        fn test_parse_matches_display() {
            let seed = PieceSeed::from_bytes(SEQUENTIAL);
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
            assert_eq!("0123456789abcdeffedcba9876543210".parse(), Ok(seed));
        }

        #[test]
        fn test_parse_rejects_sign() {
            let input = "+123456789abcdeffedcba9876543210";
            assert_eq!(
                input.parse::<PieceSeed>(),
                Err(SeedParseError {
                    input: input.to_owned()
                })
            );
        }

        #[test]
        fn test_parse_rejects_wrong_length() {
            assert!("abc".parse::<PieceSeed>().is_err());
            assert!("".parse::<PieceSeed>().is_err());
        }
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = PieceSeed::from_bytes(SEQUENTIAL);
        let mut source1 = RandomPieceSource::with_seed(seed);
        let mut source2 = RandomPieceSource::with_seed(seed);
        for _ in 0..20 {
            assert_eq!(source1.next_kind(), source2.next_kind());
        }
        assert_eq!(source1.seed(), seed);
    }

    #[test]
    fn test_random_source_yields_every_kind() {
        let mut source = RandomPieceSource::with_seed(PieceSeed::from_bytes([7; 16]));
        let mut seen = [false; ShapeKind::LEN];
        for _ in 0..500 {
            seen[source.next_kind() as usize - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_closure_source() {
        let mut count = 0;
        let mut source = || {
            count += 1;
            if count % 2 == 0 {
                ShapeKind::S
            } else {
                ShapeKind::Z
            }
        };
        assert_eq!(source.next_kind(), ShapeKind::Z);
        assert_eq!(source.next_kind(), ShapeKind::S);
    }
}
