//! Engine configuration
//!
//! [`EngineConfig`] is read from TOML; every key is optional.
//!
//! ```
//! use gomoku::config::{CandidatePolicy, EngineConfig};
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     depth = 4
//!     candidate_policy = "nearby"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.depth, 4);
//! assert_eq!(config.candidate_policy, CandidatePolicy::Nearby);
//! assert_eq!(config.candidate_count, 5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tuned constants
pub mod tuning {
    /// Default search depth in plies
    pub const DEFAULT_DEPTH: u8 = 2;

    /// Default shortlist size for formula-guided candidates
    pub const DEFAULT_CANDIDATE_COUNT: usize = 5;

    /// Default neighbourhood radius for the nearby policy
    pub const DEFAULT_NEARBY_RADIUS: u8 = 1;

    /// Leaf heuristic weight of a satisfied four-in-line formula
    pub const FOUR_WEIGHT: f64 = 4.0;

    /// Leaf heuristic weight of a satisfied three-in-line formula
    pub const THREE_WEIGHT: f64 = 1.0;

    /// Favor formulas: `s1 + n0 > FAVOR_SEPARATION · (s0 + n1)`
    pub const FAVOR_SEPARATION: f64 = 2.0;

    /// Favor formulas: `s1 > FAVOR_SUPPORT · n1`
    pub const FAVOR_SUPPORT: f64 = 1.5;

    /// Disfavor formulas: `s0 + n1 > DISFAVOR_SEPARATION · (s1 + n0)`
    pub const DISFAVOR_SEPARATION: f64 = 2.0;

    /// Disfavor formulas: `n1 ≥ DISFAVOR_REJECTION · s1`
    pub const DISFAVOR_REJECTION: f64 = 0.7;
}

/// How internal search nodes pick the moves to explore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidatePolicy {
    /// Every empty field
    All,
    /// Empty fields close to a stone
    Nearby,
    /// Shortlist from the tactical and main rules
    #[default]
    FormulaGuided,
}

/// When a line of stones counts as a win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRule {
    /// Exactly five; an overline does not win
    #[default]
    Exact,
    /// Five or more
    Freestyle,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depth in plies (0 = pick by leaf value of each candidate)
    pub depth: u8,
    pub candidate_policy: CandidatePolicy,
    /// Shortlist size K for the formula-guided policy
    pub candidate_count: usize,
    /// Score depth-limited leaves with the pattern heuristic instead of 0
    pub evaluation_enabled: bool,
    pub win_rule: WinRule,
    /// Chebyshev radius for the nearby policy
    pub nearby_radius: u8,
    /// Fixed RNG seed for reproducible tie-breaking
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: tuning::DEFAULT_DEPTH,
            candidate_policy: CandidatePolicy::default(),
            candidate_count: tuning::DEFAULT_CANDIDATE_COUNT,
            evaluation_enabled: true,
            win_rule: WinRule::default(),
            nearby_radius: tuning::DEFAULT_NEARBY_RADIUS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.candidate_count == 0 {
            return Err(Error::InvalidConfig {
                message: "candidate_count must be at least 1".into(),
            });
        }
        if self.nearby_radius == 0 {
            return Err(Error::InvalidConfig {
                message: "nearby_radius must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_candidate_policy(mut self, policy: CandidatePolicy) -> Self {
        self.candidate_policy = policy;
        self
    }

    pub fn with_candidate_count(mut self, count: usize) -> Self {
        self.candidate_count = count;
        self
    }

    pub fn with_evaluation(mut self, enabled: bool) -> Self {
        self.evaluation_enabled = enabled;
        self
    }

    pub fn with_win_rule(mut self, rule: WinRule) -> Self {
        self.win_rule = rule;
        self
    }

    pub fn with_nearby_radius(mut self, radius: u8) -> Self {
        self.nearby_radius = radius;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
