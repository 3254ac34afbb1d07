//! Search configuration.
//!
//! Every tunable of the search lives here: the qualification thresholds for
//! attack and defense branches, the max-dice override, and the budgets. The
//! configuration can be loaded from JSON and adjusted through engine options.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{MAX_DICE, MIN_DICE};

/// Errors raised while loading or adjusting a `SearchConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("max dice override must be within 1..=8, got {0}")]
    InvalidDiceOverride(u8),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },
}

/// Node budget applied per turn unless configured otherwise.
pub const DEFAULT_NODE_LIMIT: u64 = 1_000_000;

/// Tunables of the expectiminimax search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum probability for an attack branch to be explored.
    pub qualification_threshold: f64,
    /// Minimum survival probability for a counter-attack branch to be explored.
    pub survival_threshold: f64,
    /// Die count at which a branch is explored regardless of its odds.
    pub max_dice_override: u8,
    /// Hard recursion ceiling; `None` derives it from the board size.
    pub max_depth: Option<usize>,
    /// Maximum number of search nodes per turn; `None` for no limit.
    /// Defaults to `DEFAULT_NODE_LIMIT`.
    pub node_limit: Option<u64>,
    /// Below this much remaining time the search is skipped in favour of
    /// the dice-advantage heuristic.
    pub fallback_time_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            qualification_threshold: 0.2,
            survival_threshold: 0.2,
            max_dice_override: MAX_DICE,
            max_depth: None,
            node_limit: Some(DEFAULT_NODE_LIMIT),
            fallback_time_ms: 50,
        }
    }
}

impl SearchConfig {
    /// Parses and validates a JSON configuration. Missing fields keep their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that thresholds are probabilities and the override is a legal
    /// die count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("qualification_threshold", self.qualification_threshold),
            ("survival_threshold", self.survival_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if !(MIN_DICE..=MAX_DICE).contains(&self.max_dice_override) {
            return Err(ConfigError::InvalidDiceOverride(self.max_dice_override));
        }
        Ok(())
    }

    /// Attack-branch test: `prob` clears the qualification threshold, or the
    /// attacker sits at the max-dice override.
    #[inline]
    pub fn qualifies(&self, prob: f64, attacker_dice: u8) -> bool {
        prob >= self.qualification_threshold || attacker_dice == self.max_dice_override
    }

    /// Defense-branch test: `survival` clears the survival threshold, or the
    /// held region sits at the max-dice override.
    #[inline]
    pub fn survives(&self, survival: f64, held_dice: u8) -> bool {
        survival >= self.survival_threshold || held_dice == self.max_dice_override
    }

    /// Recursion ceiling for a board with `region_count` regions. Each
    /// attack/defense pair captures a region, so twice the region count
    /// covers every natural line of play.
    pub fn depth_limit(&self, region_count: usize) -> usize {
        let natural = region_count.saturating_mul(2).max(1);
        self.max_depth.map_or(natural, |d| d.min(natural))
    }

    /// Remaining-time floor under which the search is skipped.
    pub fn fallback_time(&self) -> Duration {
        Duration::from_millis(self.fallback_time_ms)
    }

    /// Applies a named engine option. Empty values clear optional limits.
    pub fn apply_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        let mut next = self.clone();
        match name {
            "QualificationThreshold" => {
                next.qualification_threshold = value.parse().map_err(|_| invalid())?;
            }
            "SurvivalThreshold" => {
                next.survival_threshold = value.parse().map_err(|_| invalid())?;
            }
            "MaxDiceOverride" => {
                next.max_dice_override = value.parse().map_err(|_| invalid())?;
            }
            "MaxDepth" => {
                next.max_depth = parse_limit(value).map_err(|_| invalid())?;
            }
            "NodeLimit" => {
                next.node_limit = parse_limit(value).map_err(|_| invalid())?;
            }
            "FallbackTime" => {
                next.fallback_time_ms = value.parse().map_err(|_| invalid())?;
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Parses an optional limit: empty, `none` or `0` mean unlimited.
fn parse_limit<T>(value: &str) -> Result<Option<T>, T::Err>
where
    T: std::str::FromStr + Default + PartialEq,
{
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let parsed: T = value.parse()?;
    Ok((parsed != T::default()).then_some(parsed))
}
