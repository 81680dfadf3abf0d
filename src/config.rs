//! Run configuration: thresholds, candidate pruning and resource limits.
//!
//! A config can be built in code, or read from a TOML file such as
//!
//! ```toml
//! support = 500
//! confidence = 0.6
//! pruning = "previous-level"
//! parallel = true
//! time_budget_secs = 30.0
//! ```

use std::{fmt, path::Path, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which frequent items a basket is intersected with before its size-k
/// combinations are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidatePruning {
    /// Intersect with L_1 at every level.
    #[default]
    LevelOne,
    /// Intersect with the items of L_{k-1} and skip any combination that has
    /// an infrequent (k-1)-subset.
    PreviousLevel,
}

impl FromStr for CandidatePruning {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "level-one" => Ok(Self::LevelOne),
            "previous-level" => Ok(Self::PreviousLevel),
            other => Err(Error::Config(format!(
                "unknown pruning strategy `{other}`, expected `level-one` or `previous-level`"
            ))),
        }
    }
}

impl fmt::Display for CandidatePruning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelOne => write!(f, "level-one"),
            Self::PreviousLevel => write!(f, "previous-level"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiningConfig {
    /// An itemset is frequent when its count is strictly greater than this.
    pub support: u32,
    /// A rule is kept when its confidence is strictly greater than this.
    pub confidence: f64,
    pub pruning: CandidatePruning,
    /// Count baskets on the rayon pool.
    pub parallel: bool,
    /// Stop after the level during which this many seconds elapsed.
    pub time_budget_secs: Option<f64>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            support: 0,
            confidence: 0.5,
            pruning: CandidatePruning::LevelOne,
            parallel: true,
            time_budget_secs: None,
        }
    }
}

impl MiningConfig {
    pub fn new(support: u32, confidence: f64) -> Self {
        Self {
            support,
            confidence,
            ..Self::default()
        }
    }

    pub fn with_pruning(mut self, pruning: CandidatePruning) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_secs = Some(budget.as_secs_f64());
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Range of the confidence threshold is not checked: values >= 1 yield no
    /// rules and values <= 0 keep every rule. Only NaN is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.confidence.is_nan() {
            return Err(Error::InvalidConfidence(self.confidence));
        }
        if let Some(secs) = self.time_budget_secs {
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(Error::Config(format!(
                    "time budget must be a non-negative number of seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }

    /// The budget as a `Duration`. Call `validate` first: an out-of-range
    /// value reads as no budget here.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}
