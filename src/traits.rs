//! Core trait definitions for state-sequence decoders.
//!
//! To plug a search strategy into [`BurstEngine`](crate::engine::BurstEngine),
//! implement [`StateDecoder`]. A decoder receives the shared
//! [`CostModel`] and the interval sequence and must return the minimum-cost
//! state path under the following conventions:
//! - The path has one entry per timestamp (`intervals.len() + 1` entries).
//! - Step 0 is pinned to state 0 with accumulated cost 0.
//! - Each step `s >= 1` costs `model.step_cost(prev, cur, intervals[s - 1])`,
//!   added to the predecessor's accumulated cost.
//! - Ties are broken towards the lowest state index, both when choosing a
//!   predecessor and when choosing the final state.
//!
//! Decoders following these rules return identical paths and costs, which is
//! what lets the engine treat them interchangeably.

use crate::cost::CostModel;
use std::fmt;

/// A strategy for finding the minimum-cost state path.
pub trait StateDecoder {
    /// Working table kept after decoding (cost matrix, distance map, ...).
    ///
    /// Its `Display` impl renders the full table; the formatter precision
    /// (`{:.3}`) selects the number of decimals, defaulting to 2.
    type Table: fmt::Display;

    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Decode the minimum-cost state path for `intervals`.
    fn decode(&self, model: &CostModel, intervals: &[f64]) -> Decoding<Self::Table>;
}

/// Outcome of one decoder run.
#[derive(Clone, Debug)]
pub struct Decoding<T> {
    /// State index per timestamp, oldest first.
    pub states: Vec<usize>,
    /// Total accumulated cost of `states`.
    pub cost: f64,
    /// The decoder's working table.
    pub table: T,
}

impl<T> Decoding<T> {
    /// State of the last timestamp.
    pub fn final_state(&self) -> usize {
        self.states.last().copied().unwrap_or(0)
    }

    /// Number of positions where the state differs from its predecessor.
    pub fn switches(&self) -> usize {
        self.states.windows(2).filter(|w| w[0] != w[1]).count()
    }
}
