//! Viterbi decoding of rate states.
//!
//! Forward dynamic programming over `steps x states` with backpointers;
//! `O(num_points * num_states^2)` time.

use super::lowest_argmin;
use crate::cost::CostModel;
use crate::traits::{Decoding, StateDecoder};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum accumulated cost per `(step, state)`, stored row-major by step.
#[derive(Clone, Debug, PartialEq)]
pub struct CostTable {
    num_states: usize,
    cells: Vec<f64>,
}

impl CostTable {
    /// Table for `num_points` steps: infinity everywhere except `(0, 0) = 0`.
    pub fn new(num_points: usize, num_states: usize) -> Self {
        let mut cells = vec![f64::INFINITY; (num_points + 1) * num_states];
        if !cells.is_empty() {
            cells[0] = 0.0;
        }
        Self { num_states, cells }
    }

    /// Number of rows, i.e. timestamps.
    pub fn num_rows(&self) -> usize {
        if self.num_states == 0 {
            0
        } else {
            self.cells.len() / self.num_states
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    #[inline]
    pub fn get(&self, step: usize, state: usize) -> f64 {
        self.cells[step * self.num_states + state]
    }

    pub fn row(&self, step: usize) -> &[f64] {
        let k = self.num_states;
        &self.cells[step * k..(step + 1) * k]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.num_states.max(1))
    }

    /// Split into the finished row `step - 1` and the writable row `step`.
    fn split_rows(&mut self, step: usize) -> (&[f64], &mut [f64]) {
        let k = self.num_states;
        let (done, rest) = self.cells.split_at_mut(step * k);
        (&done[(step - 1) * k..], &mut rest[..k])
    }
}

impl fmt::Display for CostTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        for row in self.rows() {
            write!(f, "[")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{value:.precision$}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Forward DP decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViterbiDecoder;

impl ViterbiDecoder {
    pub fn new() -> Self {
        Self
    }
}

/// Best predecessor of state `j`: `(accumulated cost, predecessor)`.
/// The scan runs over ascending `l` and keeps the first strict minimum.
#[inline]
fn best_predecessor(model: &CostModel, prev: &[f64], j: usize, delta: f64) -> (f64, usize) {
    let (arg, best) = lowest_argmin(
        prev.iter()
            .enumerate()
            .map(|(l, &c)| c + model.step_cost(l, j, delta)),
    );
    (best, arg)
}

impl StateDecoder for ViterbiDecoder {
    type Table = CostTable;

    fn name(&self) -> &'static str {
        "viterbi"
    }

    fn decode(&self, model: &CostModel, intervals: &[f64]) -> Decoding<CostTable> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "viterbi_decode",
            steps = intervals.len(),
            states = model.num_states()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let n = intervals.len();
        let k = model.num_states();
        let mut table = CostTable::new(n, k);
        // back[step * k + j]: predecessor of state j at `step`
        let mut back = vec![0usize; (n + 1) * k];

        for step in 1..=n {
            let delta = intervals[step - 1];
            let (prev, cur) = table.split_rows(step);

            #[cfg(feature = "parallel")]
            let best: Vec<(f64, usize)> = (0..k)
                .into_par_iter()
                .map(|j| best_predecessor(model, prev, j, delta))
                .collect();
            #[cfg(not(feature = "parallel"))]
            let best: Vec<(f64, usize)> = (0..k)
                .map(|j| best_predecessor(model, prev, j, delta))
                .collect();

            for (j, (cost, arg)) in best.into_iter().enumerate() {
                cur[j] = cost;
                back[step * k + j] = arg;
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(step, row = ?table.row(step), "cost row");
        }

        let (final_state, cost) = lowest_argmin(table.row(n).iter().copied());

        let mut states = Vec::with_capacity(n + 1);
        let mut s = final_state;
        for step in (0..=n).rev() {
            states.push(s);
            if step > 0 {
                s = back[step * k + s];
            }
        }
        states.reverse();

        #[cfg(feature = "tracing")]
        tracing::debug!(cost, final_state, "viterbi finished");

        Decoding {
            states,
            cost,
            table,
        }
    }
}
