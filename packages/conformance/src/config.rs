//! Run configuration

use crate::error::{ConformanceError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`ConformanceConfig::vectors_dir`]
pub const VECTORS_DIR_ENV: &str = "SHAVS_VECTORS_DIR";

/// Which checks a conformance run performs and where it finds its vectors
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceConfig {
    /// Directory holding the `.rsp` files; groups name files relative to it
    #[serde(default = "default_vectors_dir")]
    pub vectors_dir: PathBuf,
    /// Also absorb messages byte by byte and in three uneven chunks
    #[serde(default = "default_true")]
    pub chunked_streaming: bool,
    /// Longest message (in bits) fed one byte per `update`
    #[serde(default = "default_byte_by_byte_max_bits")]
    pub byte_by_byte_max_bits: u64,
    /// Also serialize mid-stream and resume in a second state buffer
    #[serde(default = "default_true")]
    pub checkpoint_resume: bool,
    /// Run suite groups concurrently on the blocking pool
    #[serde(default = "default_true")]
    pub parallel_groups: bool,
}

fn default_vectors_dir() -> PathBuf {
    PathBuf::from("tests/vectors")
}

fn default_true() -> bool {
    true
}

fn default_byte_by_byte_max_bits() -> u64 {
    1024
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            vectors_dir: default_vectors_dir(),
            chunked_streaming: true,
            byte_by_byte_max_bits: default_byte_by_byte_max_bits(),
            checkpoint_resume: true,
            parallel_groups: true,
        }
    }
}

impl ConformanceConfig {
    /// Defaults, with `vectors_dir` taken from `SHAVS_VECTORS_DIR` when set
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load a JSON config file; missing fields take their defaults
    ///
    /// `SHAVS_VECTORS_DIR` still overrides the file's `vectors_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConformanceError::Config` if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConformanceError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            ConformanceError::Config(format!("invalid config {}: {e}", path.display()))
        })?;
        Ok(config.with_env_overrides())
    }

    /// Replace the vectors directory
    #[must_use]
    pub fn with_vectors_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.vectors_dir = dir.into();
        self
    }

    /// Path of the vector file `basename`
    #[must_use]
    pub fn vector_path(&self, basename: &str) -> PathBuf {
        self.vectors_dir.join(basename)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(VECTORS_DIR_ENV).filter(|d| !d.is_empty()) {
            self.vectors_dir = PathBuf::from(dir);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: ConformanceConfig =
            serde_json::from_str(r#"{ "checkpoint_resume": false }"#).expect("valid config");
        assert!(!config.checkpoint_resume);
        assert!(config.chunked_streaming);
        assert_eq!(config.byte_by_byte_max_bits, 1024);
        assert_eq!(config.vectors_dir, PathBuf::from("tests/vectors"));
    }

    #[test]
    fn test_vector_path_joins_basename() {
        let config = ConformanceConfig::default().with_vectors_dir("/data/shavs");
        assert_eq!(
            config.vector_path("SHA256ShortMsg.rsp"),
            PathBuf::from("/data/shavs/SHA256ShortMsg.rsp")
        );
    }
}
