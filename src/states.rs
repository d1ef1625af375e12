//! Discrete rate states derived from the observed dynamic range.
//!
//! The slowest state has the rate of the whole stream averaged over its
//! duration; each further state is `rate` times faster. Enough states are
//! generated that the fastest one can explain the shortest observed interval.

use crate::error::BurstError;
use crate::series::EventSeries;

/// Upper bound on the number of derived states.
pub const MAX_STATES: usize = 1024;

/// Ordered, strictly increasing exponential rates `lambda_i = rate^i / mean_interval`.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpace {
    lambdas: Vec<f64>,
    rate: f64,
}

impl StateSpace {
    /// Derive the state space for `series` with growth factor `rate`.
    ///
    /// `num_states = ceil(1 + log_rate(T) + log_rate(1 / min_interval))`, where
    /// `T` is the last timestamp; clamped to at least one state.
    ///
    /// Fails with [`BurstError::StateSpaceTooLarge`] above [`MAX_STATES`] and
    /// with [`BurstError::NonFiniteRate`] if the fastest rate overflows.
    pub fn derive(series: &EventSeries, rate: f64) -> Result<Self, BurstError> {
        if !rate.is_finite() || rate <= 1.0 {
            return Err(BurstError::InvalidRate { rate });
        }
        let total = series.total_duration();
        let log_rate = rate.ln();
        let raw = 1.0 + total.ln() / log_rate + (1.0 / series.min_interval()).ln() / log_rate;
        let num_states = if raw.is_nan() || raw <= 1.0 {
            1
        } else if raw > MAX_STATES as f64 {
            return Err(BurstError::StateSpaceTooLarge {
                // saturating cast; also covers raw = inf
                num_states: raw.ceil() as usize,
                limit: MAX_STATES,
            });
        } else {
            raw.ceil() as usize
        };
        let top = i32::try_from(num_states - 1).map_err(|_| BurstError::StateSpaceTooLarge {
            num_states,
            limit: MAX_STATES,
        })?;

        let mean = series.mean_interval();
        let fastest = rate.powi(top) / mean;
        if !fastest.is_finite() {
            return Err(BurstError::NonFiniteRate {
                state: num_states - 1,
                value: fastest,
            });
        }
        let lambdas = (0..=top).map(|i| rate.powi(i) / mean).collect::<Vec<_>>();

        #[cfg(feature = "tracing")]
        tracing::debug!(num_states, rate, mean_interval = mean, ?lambdas, "derived state space");

        Ok(Self { lambdas, rate })
    }

    pub fn num_states(&self) -> usize {
        self.lambdas.len()
    }

    pub fn lambdas(&self) -> &[f64] {
        &self.lambdas
    }

    /// Rate of state `j`.
    #[inline]
    pub fn lambda(&self, j: usize) -> f64 {
        self.lambdas[j]
    }

    /// Growth factor between consecutive states.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}
