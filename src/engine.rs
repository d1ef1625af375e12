//! Burst-detection engine.
//!
//! This module wires the pipeline together:
//! 1. derive the rate states from the timestamps,
//! 2. build the shared cost model,
//! 3. decode the minimum-cost state path with a [`StateDecoder`],
//! 4. collapse the path into constant-state segments.
//!
//! The engine is completely generic over implementations of [`StateDecoder`];
//! [`detect`] picks the decoder at runtime from a [`BurstConfig`].

use crate::config::{Algorithm, BurstConfig, DEFAULT_PENALTY, DEFAULT_RATE};
use crate::cost::CostModel;
use crate::decoders::{CostTable, DistanceMap, TrellisDecoder, ViterbiDecoder};
use crate::error::BurstError;
use crate::segments::Segmentation;
use crate::series::EventSeries;
use crate::states::StateSpace;
use crate::traits::{Decoding, StateDecoder};
use std::fmt;

/// Burst-detection engine for a given decoder `D`.
///
/// Typical usage:
/// ```
/// use burst_dp::{BurstEngine, EventSeries, decoders::ViterbiDecoder};
///
/// let series = EventSeries::new(vec![0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0]).unwrap();
/// let engine = BurstEngine::new(ViterbiDecoder);
/// let detection = engine.run(&series).unwrap();
/// assert_eq!(detection.decoding.states.len(), series.len());
/// print!("{}", detection.segments);
/// ```
pub struct BurstEngine<D: StateDecoder> {
    decoder: D,
    rate: f64,
    penalty: f64,
}

/// Everything one run produces.
#[derive(Clone, Debug)]
pub struct Detection<T> {
    pub space: StateSpace,
    pub decoding: Decoding<T>,
    pub segments: Segmentation,
}

impl<T> Detection<T> {
    /// Replace the decoder table, keeping the rest of the result.
    pub fn map_table<U>(self, f: impl FnOnce(T) -> U) -> Detection<U> {
        Detection {
            space: self.space,
            decoding: Decoding {
                states: self.decoding.states,
                cost: self.decoding.cost,
                table: f(self.decoding.table),
            },
            segments: self.segments,
        }
    }
}

impl<D: StateDecoder> BurstEngine<D> {
    /// Create an engine with the default rate (2) and penalty (1).
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            rate: DEFAULT_RATE,
            penalty: DEFAULT_PENALTY,
        }
    }

    /// Create an engine with explicit parameters.
    pub fn with_params(decoder: D, rate: f64, penalty: f64) -> Result<Self, BurstError> {
        BurstConfig {
            rate,
            penalty,
            ..BurstConfig::default()
        }
        .validate()?;
        Ok(Self {
            decoder,
            rate,
            penalty,
        })
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Run the full pipeline on `series`.
    pub fn run(&self, series: &EventSeries) -> Result<Detection<D::Table>, BurstError> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "burst_run",
            decoder = self.decoder.name(),
            timestamps = series.len(),
            rate = self.rate,
            penalty = self.penalty
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let space = StateSpace::derive(series, self.rate)?;
        let model = CostModel::new(&space, self.penalty, series.num_points());
        let decoding = self.decoder.decode(&model, series.intervals());
        let segments = Segmentation::summarize(series.timestamps(), &decoding.states)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            states = space.num_states(),
            cost = decoding.cost,
            segments = segments.len(),
            switches = decoding.switches(),
            "detection finished"
        );

        Ok(Detection {
            space,
            decoding,
            segments,
        })
    }
}

/// Working table of whichever decoder [`detect`] ran.
#[derive(Clone, Debug)]
pub enum DecoderTable {
    Viterbi(CostTable),
    Trellis(DistanceMap),
}

impl DecoderTable {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            DecoderTable::Viterbi(_) => Algorithm::Viterbi,
            DecoderTable::Trellis(_) => Algorithm::Trellis,
        }
    }
}

impl fmt::Display for DecoderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        match self {
            DecoderTable::Viterbi(table) => write!(f, "{table:.precision$}"),
            DecoderTable::Trellis(map) => write!(f, "{map:.precision$}"),
        }
    }
}

/// Run the decoder selected by `config.algorithm` on `series`.
pub fn detect(
    series: &EventSeries,
    config: &BurstConfig,
) -> Result<Detection<DecoderTable>, BurstError> {
    config.validate()?;
    match config.algorithm {
        Algorithm::Viterbi => {
            let engine = BurstEngine::with_params(ViterbiDecoder, config.rate, config.penalty)?;
            Ok(engine.run(series)?.map_table(DecoderTable::Viterbi))
        }
        Algorithm::Trellis => {
            let decoder = TrellisDecoder::new().exhaustive(config.exhaustive_relaxation);
            let engine = BurstEngine::with_params(decoder, config.rate, config.penalty)?;
            Ok(engine.run(series)?.map_table(DecoderTable::Trellis))
        }
    }
}
