use crate::config::{BurstConfig, DEFAULT_PENALTY, DEFAULT_RATE};
use crate::error::BurstError;
use crate::traits::StateDecoder;
use crate::BurstEngine;

pub struct BurstEngineBuilder<D: StateDecoder> {
    decoder: D,
    rate: Option<f64>,
    penalty: Option<f64>,
}

impl<D: StateDecoder> BurstEngineBuilder<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            rate: None,
            penalty: None,
        }
    }
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }
    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = Some(penalty);
        self
    }
    /// Take rate and penalty from `config`; the algorithm field is ignored.
    pub fn with_config(self, config: &BurstConfig) -> Self {
        self.with_rate(config.rate).with_penalty(config.penalty)
    }
    pub fn build(self) -> Result<BurstEngine<D>, BurstError> {
        BurstEngine::with_params(
            self.decoder,
            self.rate.unwrap_or(DEFAULT_RATE),
            self.penalty.unwrap_or(DEFAULT_PENALTY),
        )
    }
}
