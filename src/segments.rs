//! Constant-state segments of a decoded path.
//!
//! A [`Segment`] covers a contiguous run of steps sharing one state. The state
//! at step `s` explains the interval `[t[s-1], t[s])`, so a run of steps
//! `a..b` spans `[t[a-1], t[b-1])`; the first segment starts at `t[0]`.

use crate::error::BurstError;
use std::fmt;
use std::ops::Range;

/// One run of identical states over the half-open time span `[start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub state: usize,
    pub start: f64,
    pub end: f64,
    /// Steps (indices into the state sequence) covered by this run.
    pub steps: Range<usize>,
}

impl Segment {
    /// Length of the segment in steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} {})", self.state, self.start, self.end)
    }
}

/// Ordered, gap-free segments covering `[t[0], t[-1])`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segmentation {
    segments: Vec<Segment>,
}

impl Segmentation {
    /// Collapse `states` (one per timestamp) into constant-state segments.
    pub fn summarize(timestamps: &[f64], states: &[usize]) -> Result<Self, BurstError> {
        let Some(&first) = states.first() else {
            return Err(BurstError::EmptyStates);
        };
        if timestamps.len() != states.len() {
            return Err(BurstError::LengthMismatch {
                timestamps: timestamps.len(),
                states: states.len(),
            });
        }

        let mut segments = Vec::new();
        let mut current = first;
        let mut start = timestamps[0];
        let mut start_step = 0;
        for (step, &state) in states.iter().enumerate().skip(1) {
            if state != current {
                let end = timestamps[step - 1];
                segments.push(Segment {
                    state: current,
                    start,
                    end,
                    steps: start_step..step,
                });
                current = state;
                start = end;
                start_step = step;
            }
        }
        segments.push(Segment {
            state: current,
            start,
            end: timestamps[timestamps.len() - 1],
            steps: start_step..states.len(),
        });

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Expand back to one state per timestamp.
    pub fn to_states(&self) -> Vec<usize> {
        let mut states = Vec::with_capacity(self.segments.last().map_or(0, |s| s.steps.end));
        for seg in &self.segments {
            states.extend(std::iter::repeat(seg.state).take(seg.len()));
        }
        states
    }
}

impl<'a> IntoIterator for &'a Segmentation {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.segments {
            writeln!(f, "{seg}")?;
        }
        Ok(())
    }
}
