//! The five SHA-2 variants covered by the conformance suite

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SHA-2 algorithm variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// SHA-224, 28-byte digest
    Sha224,
    /// SHA-256, 32-byte digest
    Sha256,
    /// SHA-384, 48-byte digest
    Sha384,
    /// SHA-512, 64-byte digest
    Sha512,
    /// SHA-512/256, 32-byte digest
    #[serde(rename = "sha512_256")]
    Sha512_256,
}

impl Algorithm {
    /// Every variant, in conventional order
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha512_256,
    ];

    /// Human-readable name, e.g. `SHA-512/256`
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha512_256 => "SHA-512/256",
        }
    }

    /// Prefix of the response files for this variant, e.g. `SHA512_256`
    #[must_use]
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha512_256 => "SHA512_256",
        }
    }

    /// Digest length in bytes
    #[must_use]
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 | Self::Sha512_256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Compression block length in bytes
    #[must_use]
    pub fn block_len(self) -> usize {
        match self {
            Self::Sha224 | Self::Sha256 => 64,
            Self::Sha384 | Self::Sha512 | Self::Sha512_256 => 128,
        }
    }

    /// Non-zero tag identifying the variant inside a live state region
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Self::Sha224 => 1,
            Self::Sha256 => 2,
            Self::Sha384 => 3,
            Self::Sha512 => 4,
            Self::Sha512_256 => 5,
        }
    }

    /// Base name of the short-message response file
    #[must_use]
    pub fn short_msg_file(self) -> String {
        format!("{}ShortMsg.rsp", self.file_prefix())
    }

    /// Base name of the long-message response file
    #[must_use]
    pub fn long_msg_file(self) -> String {
        format!("{}LongMsg.rsp", self.file_prefix())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known algorithm
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported hash algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | '/'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            "sha512256" => Ok(Self::Sha512_256),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_common_spellings() {
        assert_eq!("SHA-512/256".parse(), Ok(Algorithm::Sha512_256));
        assert_eq!("sha512_256".parse(), Ok(Algorithm::Sha512_256));
        assert_eq!("Sha224".parse(), Ok(Algorithm::Sha224));
        assert!("sha1".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse(), Ok(algorithm));
            assert_eq!(algorithm.file_prefix().parse(), Ok(algorithm));
        }
    }

    #[test]
    fn test_tags_are_distinct_and_non_zero() {
        let mut tags: Vec<u8> = Algorithm::ALL.iter().map(|a| a.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), 5);
        assert!(!tags.contains(&0));
    }

    #[test]
    fn test_vector_file_names() {
        assert_eq!(Algorithm::Sha512_256.short_msg_file(), "SHA512_256ShortMsg.rsp");
        assert_eq!(Algorithm::Sha224.long_msg_file(), "SHA224LongMsg.rsp");
    }

    #[test]
    fn test_serde_uses_identifiers() {
        let json = serde_json::to_string(&Algorithm::Sha512_256).expect("serialize");
        assert_eq!(json, "\"sha512_256\"");
        let back: Algorithm = serde_json::from_str("\"sha384\"").expect("deserialize");
        assert_eq!(back, Algorithm::Sha384);
    }
}
