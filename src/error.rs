//! Error type shared by every fallible operation in the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating input or configuring a run.
///
/// Solving itself never fails: once an [`EventSeries`](crate::series::EventSeries)
/// and a [`BurstConfig`](crate::config::BurstConfig) have been validated, both
/// decoders run to completion.
#[derive(Error, Debug)]
pub enum BurstError {
    /// Fewer than two timestamps, so there is no interval to model.
    #[error("need at least 2 timestamps, got {len}")]
    TooFewTimestamps { len: usize },

    /// A timestamp is NaN or infinite.
    #[error("timestamp {index} is not finite ({value})")]
    NonFiniteTimestamp { index: usize, value: f64 },

    /// Timestamps must be strictly increasing.
    #[error("timestamps must be strictly increasing: t[{index}] = {next} follows {previous}")]
    NonIncreasing {
        index: usize,
        previous: f64,
        next: f64,
    },

    /// The last timestamp (total duration measured from 0) must be positive.
    #[error("total duration must be positive, got {total}")]
    NonPositiveDuration { total: f64 },

    /// The per-state rate growth factor must be finite and greater than 1.
    #[error("rate growth factor must be finite and > 1, got {rate}")]
    InvalidRate { rate: f64 },

    /// The transition penalty weight must be finite and non-negative.
    #[error("penalty weight must be finite and >= 0, got {penalty}")]
    InvalidPenalty { penalty: f64 },

    /// The data's dynamic range needs more rate states than [`MAX_STATES`](crate::states::MAX_STATES).
    #[error("state space would need {num_states} states (limit {limit}); raise the rate growth factor")]
    StateSpaceTooLarge { num_states: usize, limit: usize },

    /// A derived state rate overflowed.
    #[error("rate of state {state} is not finite ({value})")]
    NonFiniteRate { state: usize, value: f64 },

    /// Algorithm name not recognised.
    #[error("unknown algorithm '{name}' (expected 'viterbi' or 'trellis')")]
    UnknownAlgorithm { name: String },

    /// The summarizer was handed an empty state sequence.
    #[error("state sequence is empty")]
    EmptyStates,

    /// State sequence and timestamps disagree on the number of steps.
    #[error("state sequence has {states} entries but there are {timestamps} timestamps")]
    LengthMismatch { timestamps: usize, states: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token in the input could not be parsed as a real number.
    #[error("{path}: token {position} ('{token}') is not a number")]
    Parse {
        path: String,
        token: String,
        position: usize,
    },
}
