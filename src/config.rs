//! Run configuration and algorithm selection.

use crate::error::BurstError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RATE: f64 = 2.0;
pub const DEFAULT_PENALTY: f64 = 1.0;

/// Which decoder to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Forward dynamic programming.
    #[default]
    Viterbi,
    /// Bellman-Ford over the layered graph.
    Trellis,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Viterbi => "viterbi",
            Algorithm::Trellis => "trellis",
        }
    }
}

impl FromStr for Algorithm {
    type Err = BurstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viterbi" => Ok(Algorithm::Viterbi),
            "trellis" | "bellman-ford" | "shortest-path" => Ok(Algorithm::Trellis),
            _ => Err(BurstError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model parameters for one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstConfig {
    /// Growth factor between consecutive rate states; must exceed 1.
    pub rate: f64,
    /// Weight of the per-level upward transition surcharge ("gamma").
    pub penalty: f64,
    pub algorithm: Algorithm,
    /// Force all `|V| - 1` Bellman-Ford rounds in the trellis decoder.
    pub exhaustive_relaxation: bool,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            penalty: DEFAULT_PENALTY,
            algorithm: Algorithm::default(),
            exhaustive_relaxation: false,
        }
    }
}

impl BurstConfig {
    pub fn validate(&self) -> Result<(), BurstError> {
        if !self.rate.is_finite() || self.rate <= 1.0 {
            return Err(BurstError::InvalidRate { rate: self.rate });
        }
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(BurstError::InvalidPenalty {
                penalty: self.penalty,
            });
        }
        Ok(())
    }
}
