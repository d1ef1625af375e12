//! Cost model shared by both decoders.
//!
//! A step from state `i` to state `j` that emits interval `delta` costs
//!
//! ```text
//! surcharge(i, j) + emission(j, delta)
//! surcharge(i, j) = penalty * (j - i) * ln(num_points)   if j > i, else 0
//! emission(j, delta) = -ln(lambda_j) + lambda_j * delta
//! ```
//!
//! The surcharge scale `ln(num_points)` is fixed per run from the total
//! number of intervals, not per segment.

use crate::states::StateSpace;

/// Emission and transition costs for one run.
#[derive(Clone, Debug)]
pub struct CostModel {
    lambdas: Vec<f64>,
    /// Precomputed `-ln(lambda_j)`.
    neg_log_lambdas: Vec<f64>,
    /// `penalty * ln(num_points)`; the cost of one upward level.
    jump_cost: f64,
}

impl CostModel {
    /// Build the model for `num_points` intervals over `space`.
    pub fn new(space: &StateSpace, penalty: f64, num_points: usize) -> Self {
        let lambdas = space.lambdas().to_vec();
        let neg_log_lambdas = lambdas.iter().map(|l| -l.ln()).collect();
        let jump_cost = penalty * (num_points.max(1) as f64).ln();
        Self {
            lambdas,
            neg_log_lambdas,
            jump_cost,
        }
    }

    pub fn num_states(&self) -> usize {
        self.lambdas.len()
    }

    /// Surcharge charged per level when moving up one state.
    pub fn jump_cost(&self) -> f64 {
        self.jump_cost
    }

    /// Negative log-likelihood of `delta` under an exponential with rate `lambda_j`.
    #[inline]
    pub fn emission(&self, j: usize, delta: f64) -> f64 {
        self.neg_log_lambdas[j] + self.lambdas[j] * delta
    }

    /// Transition surcharge for `from -> to`; zero unless moving to a faster state.
    #[inline]
    pub fn surcharge(&self, from: usize, to: usize) -> f64 {
        if to > from {
            self.jump_cost * (to - from) as f64
        } else {
            0.0
        }
    }

    /// Full cost of one step. Both decoders add exactly this value to the
    /// predecessor's accumulated cost.
    #[inline]
    pub fn step_cost(&self, from: usize, to: usize, delta: f64) -> f64 {
        self.surcharge(from, to) + self.emission(to, delta)
    }
}
