//! Conformance groups and the suite that runs them
//!
//! A group is one vector file paired with one algorithm. Each group parses
//! its own file and owns its own state buffers, so groups can run on
//! separate threads without sharing anything.

use crate::config::ConformanceConfig;
use crate::error::{ConformanceError, Result};
use crate::parser;
use crate::report::GroupReport;
use crate::runner::ConformanceRunner;
use futures::future::join_all;
use log::debug;
use serde::{Deserialize, Serialize};
use shavs_common::{LoggingTransformer, ResultExt, ensure};
use shavs_hashing::algorithm::UnknownAlgorithm;
use shavs_hashing::{Algorithm, HashEngine, Sha224, Sha256, Sha384, Sha512, Sha512_256};
use std::sync::Arc;

/// One vector file and the algorithm it exercises
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Algorithm under test
    pub algorithm: Algorithm,
    /// File name relative to the vectors directory
    pub file_basename: String,
}

impl GroupSpec {
    /// Group for an arbitrary file
    #[must_use]
    pub fn new(algorithm: Algorithm, file_basename: impl Into<String>) -> Self {
        Self {
            algorithm,
            file_basename: file_basename.into(),
        }
    }

    /// The algorithm's short-message group
    #[must_use]
    pub fn short_msg(algorithm: Algorithm) -> Self {
        Self::new(algorithm, algorithm.short_msg_file())
    }

    /// The algorithm's long-message group
    #[must_use]
    pub fn long_msg(algorithm: Algorithm) -> Self {
        Self::new(algorithm, algorithm.long_msg_file())
    }

    /// Group for a response file named after its algorithm, e.g.
    /// `SHA512_256LongMsg.rsp` or `sha384-custom.rsp`
    ///
    /// The prefix before `ShortMsg`/`LongMsg` (or the whole stem) names the
    /// algorithm.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAlgorithm` if the prefix names no supported variant.
    pub fn from_basename(basename: &str) -> std::result::Result<Self, UnknownAlgorithm> {
        let stem = group_name(basename);
        let prefix = stem
            .strip_suffix("ShortMsg")
            .or_else(|| stem.strip_suffix("LongMsg"))
            .unwrap_or(stem);
        let algorithm = prefix
            .parse::<Algorithm>()
            .map_err(|_| UnknownAlgorithm(basename.to_string()))?;
        Ok(Self::new(algorithm, basename))
    }

    /// The ten standard groups: short and long messages for each algorithm
    #[must_use]
    pub fn standard() -> Vec<Self> {
        Algorithm::ALL
            .into_iter()
            .flat_map(|algorithm| [Self::short_msg(algorithm), Self::long_msg(algorithm)])
            .collect()
    }

    /// Group name: the file name without its `.rsp` extension
    #[must_use]
    pub fn name(&self) -> &str {
        group_name(&self.file_basename)
    }

    /// Run this group
    ///
    /// # Errors
    ///
    /// See [`run_group`].
    pub fn run(&self, config: &ConformanceConfig) -> Result<GroupReport> {
        run_group_for(self.algorithm, config, &self.file_basename)
    }
}

fn group_name(basename: &str) -> &str {
    basename.strip_suffix(".rsp").unwrap_or(basename)
}

/// Parse `basename` and verify engine `E` against it
///
/// # Errors
///
/// Setup errors abort the group before any check runs: the file is missing
/// or malformed, its `[L = N]` header disagrees with `E::DIGEST_LEN`, or a
/// state buffer cannot be allocated. Digest mismatches are not errors; they
/// are recorded in the returned report.
pub fn run_group<E: HashEngine>(config: &ConformanceConfig, basename: &str) -> Result<GroupReport> {
    let group = group_name(basename);
    let file = parser::parse(config.vector_path(basename))?;

    if file.digest_length_bytes != E::DIGEST_LEN {
        return Err(ConformanceError::DigestLengthMismatch {
            group: group.to_string(),
            declared: file.digest_length_bytes,
            engine: E::DIGEST_LEN,
        });
    }

    ConformanceRunner::<E>::new(group, &file, config).run()
}

/// [`run_group`] with the engine chosen by `algorithm`
///
/// # Errors
///
/// See [`run_group`].
pub fn run_group_for(
    algorithm: Algorithm,
    config: &ConformanceConfig,
    basename: &str,
) -> Result<GroupReport> {
    match algorithm {
        Algorithm::Sha224 => run_group::<Sha224>(config, basename),
        Algorithm::Sha256 => run_group::<Sha256>(config, basename),
        Algorithm::Sha384 => run_group::<Sha384>(config, basename),
        Algorithm::Sha512 => run_group::<Sha512>(config, basename),
        Algorithm::Sha512_256 => run_group::<Sha512_256>(config, basename),
    }
}

/// Result of one group within a suite run
#[derive(Debug)]
pub struct GroupOutcome {
    /// The group that ran
    pub spec: GroupSpec,
    /// Its report, or the setup error that stopped it
    pub result: Result<GroupReport>,
}

impl GroupOutcome {
    /// Whether setup succeeded and every check passed
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(&self.result, Ok(report) if report.passed())
    }
}

/// Outcomes of every group in a suite run, in group order
#[derive(Debug, Default)]
pub struct SuiteReport {
    /// Per-group outcomes
    pub outcomes: Vec<GroupOutcome>,
}

impl SuiteReport {
    /// Whether at least one group ran and every group passed
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(GroupOutcome::passed)
    }

    /// Groups that failed setup or recorded mismatches
    pub fn failed_groups(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// Collapse into the first failure, as a workspace-level error
    ///
    /// A suite that ran no groups does not pass.
    ///
    /// # Errors
    ///
    /// Returns the first group's setup error or mismatch listing.
    pub fn into_result(self) -> shavs_common::Result<()> {
        ensure!(!self.outcomes.is_empty(), Configuration, "suite ran no groups");
        for outcome in self.outcomes {
            let name = outcome.spec.name().to_string();
            outcome
                .result
                .and_then(GroupReport::into_result)
                .context(format!("group {name}"))?;
        }
        Ok(())
    }
}

/// A set of independent conformance groups
#[derive(Debug, Clone)]
pub struct Suite {
    config: Arc<ConformanceConfig>,
    groups: Vec<GroupSpec>,
}

impl Suite {
    /// Suite over explicit groups
    #[must_use]
    pub fn new(config: ConformanceConfig, groups: Vec<GroupSpec>) -> Self {
        Self {
            config: Arc::new(config),
            groups,
        }
    }

    /// Suite over the ten standard groups
    #[must_use]
    pub fn standard(config: ConformanceConfig) -> Self {
        Self::new(config, GroupSpec::standard())
    }

    /// Suite over every `.rsp` file in the configured vectors directory
    ///
    /// Files whose names map to no algorithm are skipped. Groups are ordered
    /// by file name.
    ///
    /// # Errors
    ///
    /// Returns `ConformanceError::Config` if the directory cannot be listed.
    pub fn discover(config: ConformanceConfig) -> Result<Self> {
        let dir = &config.vectors_dir;
        let entries = std::fs::read_dir(dir).map_err(|err| {
            ConformanceError::Config(format!(
                "cannot list vectors directory {}: {err}",
                dir.display()
            ))
        })?;

        let mut basenames: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".rsp"))
            .collect();
        basenames.sort();

        let groups = basenames
            .iter()
            .filter_map(|name| match GroupSpec::from_basename(name) {
                Ok(spec) => Some(spec),
                Err(err) => {
                    debug!("Skipping {name}: {err}");
                    None
                }
            })
            .collect();
        Ok(Self::new(config, groups))
    }

    /// Groups in run order
    #[must_use]
    pub fn groups(&self) -> &[GroupSpec] {
        &self.groups
    }

    /// Run every group, concurrently on tokio's blocking pool when
    /// `parallel_groups` is set
    ///
    /// A setup failure in one group is reported in its outcome and does not
    /// affect the others.
    pub async fn run_all(&self) -> SuiteReport {
        if !self.config.parallel_groups {
            let suite = self.clone();
            return tokio::task::spawn_blocking(move || suite.run_all_blocking())
                .await
                .unwrap_or_else(|err| self.join_failures(&err.to_string()));
        }

        let tasks = self.groups.iter().cloned().map(|spec| {
            let config = Arc::clone(&self.config);
            let worker_spec = spec.clone();
            async move {
                let result = tokio::task::spawn_blocking(move || run_logged(&worker_spec, &config))
                    .await
                    .unwrap_or_else(|err| {
                        Err(ConformanceError::Join {
                            group: spec.name().to_string(),
                            reason: err.to_string(),
                        })
                    });
                GroupOutcome { spec, result }
            }
        });

        SuiteReport {
            outcomes: join_all(tasks).await,
        }
    }

    /// Run every group sequentially on the calling thread
    #[must_use]
    pub fn run_all_blocking(&self) -> SuiteReport {
        let outcomes = self
            .groups
            .iter()
            .map(|spec| GroupOutcome {
                spec: spec.clone(),
                result: run_logged(spec, &self.config),
            })
            .collect();
        SuiteReport { outcomes }
    }

    fn join_failures(&self, reason: &str) -> SuiteReport {
        let outcomes = self
            .groups
            .iter()
            .map(|spec| GroupOutcome {
                spec: spec.clone(),
                result: Err(ConformanceError::Join {
                    group: spec.name().to_string(),
                    reason: reason.to_string(),
                }),
            })
            .collect();
        SuiteReport { outcomes }
    }
}

fn run_logged(spec: &GroupSpec, config: &ConformanceConfig) -> Result<GroupReport> {
    spec.run(config).map_err(|err| {
        if !matches!(err, ConformanceError::GroupFailed { .. }) {
            LoggingTransformer::log_setup_failure(spec.name(), &err);
        }
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_groups() {
        let groups = GroupSpec::standard();
        assert_eq!(groups.len(), 10);
        assert_eq!(groups[0].file_basename, "SHA224ShortMsg.rsp");
        assert_eq!(groups[1].file_basename, "SHA224LongMsg.rsp");
        assert_eq!(groups[9].name(), "SHA512_256LongMsg");
    }

    #[test]
    fn test_group_from_basename() {
        let long = GroupSpec::from_basename("SHA512_256LongMsg.rsp").expect("known prefix");
        assert_eq!(long, GroupSpec::long_msg(Algorithm::Sha512_256));

        let custom = GroupSpec::from_basename("sha-384.rsp").expect("known prefix");
        assert_eq!(custom.algorithm, Algorithm::Sha384);
        assert_eq!(custom.name(), "sha-384");

        assert_eq!(
            GroupSpec::from_basename("SHA1ShortMsg.rsp"),
            Err(UnknownAlgorithm("SHA1ShortMsg.rsp".to_string()))
        );
    }

    #[test]
    fn test_group_name_without_extension() {
        assert_eq!(group_name("custom"), "custom");
        assert_eq!(group_name("SHA384ShortMsg.rsp"), "SHA384ShortMsg");
    }
}
