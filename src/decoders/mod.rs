//! Decoders implementing [`StateDecoder`](crate::traits::StateDecoder).
//!
//! Both search the same objective and return the same path:
//! - [`viterbi`] : forward dynamic programming with backpointers.
//! - [`trellis`] : Bellman-Ford shortest path over the explicit layered graph.

pub mod trellis;
pub mod viterbi;

pub use trellis::{DistanceMap, Edge, LayeredGraph, TrellisDecoder, Vertex};
pub use viterbi::{CostTable, ViterbiDecoder};

/// Index and value of the smallest entry; the first one wins on ties.
/// An all-infinite (or empty) input yields `(0, inf)`.
pub(crate) fn lowest_argmin(values: impl IntoIterator<Item = f64>) -> (usize, f64) {
    let mut arg = 0;
    let mut best = f64::INFINITY;
    for (i, v) in values.into_iter().enumerate() {
        if v < best {
            best = v;
            arg = i;
        }
    }
    (arg, best)
}
