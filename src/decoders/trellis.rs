//! Rate-state decoding as a shortest path over a layered graph.
//!
//! Graph structure: one vertex per `(step, state)`, steps `0..=num_points`;
//! every state at step `s` has an edge to every state at step `s + 1` weighted
//! by [`CostModel::step_cost`]. The source is `(0, 0)`.
//!
//! Distances are found with Bellman-Ford relaxation rather than a single
//! topological sweep. Edges are stored in step order, so the first round
//! already settles every vertex and the second round detects convergence;
//! [`TrellisDecoder::exhaustive`] forces the full `|V| - 1` rounds.

use super::lowest_argmin;
use crate::cost::CostModel;
use crate::traits::{Decoding, StateDecoder};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A vertex of the layered graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub step: usize,
    pub state: usize,
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.step, self.state)
    }
}

/// Directed edge `from -> to` between consecutive layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
    pub weight: f64,
}

/// Explicit layered DAG with all forward transitions.
#[derive(Clone, Debug)]
pub struct LayeredGraph {
    num_points: usize,
    num_states: usize,
    edges: Vec<Edge>,
}

fn layer_edges(model: &CostModel, step: usize, delta: f64) -> Vec<Edge> {
    let k = model.num_states();
    let mut edges = Vec::with_capacity(k * k);
    for i in 0..k {
        for j in 0..k {
            edges.push(Edge {
                from: Vertex { step, state: i },
                to: Vertex {
                    step: step + 1,
                    state: j,
                },
                weight: model.step_cost(i, j, delta),
            });
        }
    }
    edges
}

impl LayeredGraph {
    /// Build the graph for `intervals`; edges are ordered by step, then source
    /// state, then target state.
    pub fn build(model: &CostModel, intervals: &[f64]) -> Self {
        #[cfg(feature = "parallel")]
        let layers: Vec<Vec<Edge>> = intervals
            .par_iter()
            .enumerate()
            .map(|(step, &delta)| layer_edges(model, step, delta))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let layers: Vec<Vec<Edge>> = intervals
            .iter()
            .enumerate()
            .map(|(step, &delta)| layer_edges(model, step, delta))
            .collect();

        Self {
            num_points: intervals.len(),
            num_states: model.num_states(),
            edges: layers.concat(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        (self.num_points + 1) * self.num_states
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn source(&self) -> Vertex {
        Vertex { step: 0, state: 0 }
    }

    #[inline]
    fn index(&self, v: Vertex) -> usize {
        v.step * self.num_states + v.state
    }
}

/// Shortest distance from the source to every vertex, with predecessors.
#[derive(Clone, Debug)]
pub struct DistanceMap {
    num_states: usize,
    dist: Vec<f64>,
    pred: Vec<Option<Vertex>>,
    rounds: usize,
}

impl DistanceMap {
    fn new(graph: &LayeredGraph) -> Self {
        let v = graph.num_vertices();
        let mut dist = vec![f64::INFINITY; v];
        if v > 0 {
            dist[graph.index(graph.source())] = 0.0;
        }
        Self {
            num_states: graph.num_states(),
            dist,
            pred: vec![None; v],
            rounds: 0,
        }
    }

    #[inline]
    fn index(&self, v: Vertex) -> usize {
        v.step * self.num_states + v.state
    }

    pub fn distance(&self, v: Vertex) -> f64 {
        self.dist[self.index(v)]
    }

    pub fn predecessor(&self, v: Vertex) -> Option<Vertex> {
        self.pred[self.index(v)]
    }

    /// Relaxation rounds actually performed.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    /// `(vertex, distance)` in step-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Vertex, f64)> + '_ {
        let k = self.num_states.max(1);
        self.dist.iter().enumerate().map(move |(i, &d)| {
            (
                Vertex {
                    step: i / k,
                    state: i % k,
                },
                d,
            )
        })
    }
}

impl fmt::Display for DistanceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        for (v, d) in self.iter() {
            writeln!(f, "{v}: {d:.precision$}")?;
        }
        Ok(())
    }
}

/// Bellman-Ford decoder over the layered graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrellisDecoder {
    exhaustive: bool,
}

impl TrellisDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all `|V| - 1` rounds instead of stopping at the first quiet round.
    pub fn exhaustive(mut self, exhaustive: bool) -> Self {
        self.exhaustive = exhaustive;
        self
    }

    /// Relax every edge of `graph` until no distance changes (or `|V| - 1` rounds).
    pub fn relax(&self, graph: &LayeredGraph) -> DistanceMap {
        let mut map = DistanceMap::new(graph);
        let max_rounds = graph.num_vertices().saturating_sub(1);

        for _round in 0..max_rounds {
            let mut changed = false;
            for edge in graph.edges() {
                let u = graph.index(edge.from);
                let v = graph.index(edge.to);
                let cand = map.dist[u] + edge.weight;
                if cand < map.dist[v] {
                    map.dist[v] = cand;
                    map.pred[v] = Some(edge.from);
                    changed = true;

                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        from = %edge.from,
                        to = %edge.to,
                        weight = edge.weight,
                        distance = cand,
                        "relaxed edge"
                    );
                }
            }
            map.rounds += 1;

            #[cfg(feature = "tracing")]
            tracing::trace!(round = _round, changed, "relaxation round");

            if !changed && !self.exhaustive {
                break;
            }
        }
        map
    }
}

impl StateDecoder for TrellisDecoder {
    type Table = DistanceMap;

    fn name(&self) -> &'static str {
        "trellis"
    }

    fn decode(&self, model: &CostModel, intervals: &[f64]) -> Decoding<DistanceMap> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "trellis_decode",
            steps = intervals.len(),
            states = model.num_states(),
            exhaustive = self.exhaustive
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let graph = LayeredGraph::build(model, intervals);
        let map = self.relax(&graph);
        let n = graph.num_points();

        let (state, cost) = lowest_argmin(
            (0..graph.num_states()).map(|state| map.distance(Vertex { step: n, state })),
        );
        let sink = Vertex { step: n, state };

        let mut states = Vec::with_capacity(n + 1);
        let mut current = Some(sink);
        while let Some(v) = current {
            states.push(v.state);
            current = map.predecessor(v);
        }
        states.reverse();
        debug_assert_eq!(states.len(), n + 1, "predecessor chain must reach the source");

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cost,
            rounds = map.rounds(),
            edges = graph.edges().len(),
            "trellis finished"
        );

        Decoding {
            states,
            cost,
            table: map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::EventSeries;
    use crate::states::StateSpace;

    fn model_for(ts: &[f64], penalty: f64) -> (CostModel, EventSeries) {
        let series = EventSeries::new(ts.to_vec()).unwrap();
        let space = StateSpace::derive(&series, 2.0).unwrap();
        (
            CostModel::new(&space, penalty, series.num_points()),
            series,
        )
    }

    #[test]
    fn graph_is_fully_connected_between_layers() {
        let (model, series) = model_for(&[0.0, 1.0, 2.0, 6.0], 1.0);
        let g = LayeredGraph::build(&model, series.intervals());
        let k = model.num_states();
        assert_eq!(g.num_vertices(), 4 * k);
        assert_eq!(g.edges().len(), 3 * k * k);
        assert!(g.edges().iter().all(|e| e.to.step == e.from.step + 1));
        assert_eq!(g.edges()[0].from, g.source());
    }

    #[test]
    fn converges_after_second_round() {
        let (model, series) = model_for(&[0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0], 1.0);
        let d = TrellisDecoder::new().decode(&model, series.intervals());
        assert_eq!(d.table.rounds(), 2);
        assert_eq!(d.states.len(), series.len());
        assert_eq!(d.states[0], 0);
    }

    #[test]
    fn exhaustive_rounds_give_same_answer() {
        let (model, series) = model_for(&[0.0, 0.2, 0.3, 2.0, 2.1], 0.5);
        let quick = TrellisDecoder::new().decode(&model, series.intervals());
        let full = TrellisDecoder::new()
            .exhaustive(true)
            .decode(&model, series.intervals());
        let g = LayeredGraph::build(&model, series.intervals());
        assert_eq!(full.table.rounds(), g.num_vertices() - 1);
        assert_eq!(quick.states, full.states);
        assert_eq!(quick.cost, full.cost);
    }

    #[test]
    fn step_zero_only_reaches_source() {
        let (model, series) = model_for(&[0.0, 1.0, 3.0], 1.0);
        let d = TrellisDecoder::new().decode(&model, series.intervals());
        assert_eq!(d.table.distance(Vertex { step: 0, state: 0 }), 0.0);
        for state in 1..model.num_states() {
            let v = Vertex { step: 0, state };
            assert!(d.table.distance(v).is_infinite());
            assert_eq!(d.table.predecessor(v), None);
        }
    }

    fn uniform_graph(num_points: usize, num_states: usize) -> LayeredGraph {
        let mut edges = Vec::new();
        for step in 0..num_points {
            for i in 0..num_states {
                for j in 0..num_states {
                    edges.push(Edge {
                        from: Vertex { step, state: i },
                        to: Vertex {
                            step: step + 1,
                            state: j,
                        },
                        weight: 1.0,
                    });
                }
            }
        }
        LayeredGraph {
            num_points,
            num_states,
            edges,
        }
    }

    #[test]
    fn equal_distances_keep_lowest_predecessor() {
        let graph = uniform_graph(2, 3);
        let map = TrellisDecoder::new().relax(&graph);
        for state in 0..3 {
            let v = Vertex { step: 2, state };
            assert_eq!(map.distance(v), 2.0);
            assert_eq!(map.predecessor(v), Some(Vertex { step: 1, state: 0 }));
        }
        let (sink, cost) =
            crate::decoders::lowest_argmin((0..3).map(|state| map.distance(Vertex { step: 2, state })));
        assert_eq!((sink, cost), (0, 2.0));
    }

    #[test]
    fn display_lists_vertices() {
        let (model, series) = model_for(&[0.0, 10.0], 1.0);
        let d = TrellisDecoder::new().decode(&model, series.intervals());
        let text = format!("{}", d.table);
        assert!(text.starts_with("(0, 0): 0.00\n"));
        assert_eq!(text.lines().count(), d.table.len());
    }
}
