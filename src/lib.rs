//! Burst detection over event timestamps (BURST-DP)
//!
//! This crate estimates a piecewise-constant hidden *rate state* behind an
//! irregular sequence of event times. Each inter-event interval is modelled as
//! exponentially distributed with the rate of its hidden state, and moving to
//! a faster state is penalised.
//!
//! ## Core idea
//! 1. Derive a finite ladder of rates from the data's dynamic range
//!    ([`StateSpace`]).
//! 2. Score each step with the shared [`CostModel`]: exponential negative
//!    log-likelihood plus an upward-jump surcharge.
//! 3. Find the minimum-cost state path with a [`StateDecoder`]: either
//!    Viterbi dynamic programming or Bellman-Ford over the explicit layered
//!    graph. Both return the same path and cost.
//! 4. Collapse the path into constant-state [`Segmentation`] segments.
//!
//! ## Quick start
//! ```
//! use burst_dp::{detect, BurstConfig, EventSeries};
//!
//! let series: EventSeries = "0 1 2 3 10 11 12".parse().unwrap();
//! let detection = detect(&series, &BurstConfig::default()).unwrap();
//! assert_eq!(detection.decoding.states.len(), 7);
//! assert_eq!(detection.segments.to_string(), "0 [0 12)\n");
//! ```
//!
//! ## Decoders
//! The `decoders` module contains:
//! - [`ViterbiDecoder`](decoders::ViterbiDecoder): `O(n k^2)` forward DP.
//! - [`TrellisDecoder`](decoders::TrellisDecoder): generic shortest path on
//!   the `(step, state)` DAG.

pub mod builder;
pub mod config;
pub mod cost;
pub mod decoders;
pub mod engine;
pub mod error;
pub mod report;
pub mod segments;
pub mod series;
pub mod states;
pub mod traits;

pub use crate::builder::BurstEngineBuilder;
pub use crate::config::{Algorithm, BurstConfig};
pub use crate::cost::CostModel;
pub use crate::engine::{detect, BurstEngine, DecoderTable, Detection};
pub use crate::error::BurstError;
pub use crate::segments::{Segment, Segmentation};
pub use crate::series::{load_timestamps, EventSeries};
pub use crate::states::StateSpace;
pub use crate::traits::{Decoding, StateDecoder};
