//! Validated event-time input.
//!
//! An [`EventSeries`] is the only way timestamps enter the decoders, so every
//! precondition the model relies on (at least one interval, strictly
//! increasing finite values, positive total duration) is checked exactly once
//! here.

use crate::error::BurstError;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Strictly increasing event timestamps together with their intervals.
#[derive(Clone, Debug, PartialEq)]
pub struct EventSeries {
    timestamps: Vec<f64>,
    intervals: Vec<f64>,
}

impl EventSeries {
    /// Validate `timestamps` and precompute the inter-event intervals.
    pub fn new(timestamps: Vec<f64>) -> Result<Self, BurstError> {
        if timestamps.len() < 2 {
            return Err(BurstError::TooFewTimestamps {
                len: timestamps.len(),
            });
        }
        for (index, &value) in timestamps.iter().enumerate() {
            if !value.is_finite() {
                return Err(BurstError::NonFiniteTimestamp { index, value });
            }
        }
        let intervals = timestamps
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let delta = w[1] - w[0];
                if delta > 0.0 {
                    Ok(delta)
                } else {
                    Err(BurstError::NonIncreasing {
                        index: i + 1,
                        previous: w[0],
                        next: w[1],
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = timestamps[timestamps.len() - 1];
        if total <= 0.0 {
            return Err(BurstError::NonPositiveDuration { total });
        }

        Ok(Self {
            timestamps,
            intervals,
        })
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn intervals(&self) -> &[f64] {
        &self.intervals
    }

    /// Number of intervals, i.e. DP steps. One less than the timestamp count.
    pub fn num_points(&self) -> usize {
        self.intervals.len()
    }

    /// Number of timestamps.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false: a validated series holds at least two timestamps.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Total observed duration, measured from the time origin 0 to the last event.
    pub fn total_duration(&self) -> f64 {
        self.timestamps[self.timestamps.len() - 1]
    }

    pub fn min_interval(&self) -> f64 {
        self.intervals.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn mean_interval(&self) -> f64 {
        self.total_duration() / self.num_points() as f64
    }
}

impl FromStr for EventSeries {
    type Err = BurstError;

    /// Parse the first line of `s` as whitespace-separated timestamps.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventSeries::new(parse_first_line(s, "<input>")?)
    }
}

/// Read timestamps from the first line of the file at `path`.
pub fn load_timestamps(path: impl AsRef<Path>) -> Result<EventSeries, BurstError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| BurstError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values = parse_first_line(&text, &path.display().to_string())?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), count = values.len(), "loaded timestamps");

    EventSeries::new(values)
}

fn parse_first_line(text: &str, source: &str) -> Result<Vec<f64>, BurstError> {
    let line = text.lines().next().unwrap_or("");
    line.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| BurstError::Parse {
                path: source.to_string(),
                token: token.to_string(),
                position,
            })
        })
        .collect()
}
