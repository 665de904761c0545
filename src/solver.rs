use std::collections::HashSet;

use itertools::Itertools;
use log::debug;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::grid::{CellPair, Grid, Score};
use crate::location::Location;
use crate::network::{FlowNetwork, NodeId};

const SOURCE: NodeId = 0;
const SINK: NodeId = 1;

/// Internal faults a solver may surface.
///
/// These indicate programming-logic failures, never bad input: malformed
/// grids are rejected by [`GridBuilder`](crate::builder::GridBuilder) and
/// cannot reach a solver.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverError {
    /// The residual graph contained a negative-cost cycle, which the bipartite
    /// grid reduction never produces.
    #[error("negative-cost cycle in residual graph")]
    NegativeResidualCycle,
    /// Path reconstruction hit a node with no recorded predecessor.
    #[error("broken predecessor chain during path reconstruction")]
    BrokenPredecessorChain,
}

/// The surface every pairing solver presents.
pub trait Solver {
    /// Compute a pairing for the grid and return its score.
    ///
    /// Recomputes from scratch on every call; running twice on the same grid
    /// yields the same result.
    fn run(&mut self) -> Result<Score, SolverError>;
    /// The pairs selected by the last [`Self::run`]; empty before the first.
    fn pairs(&self) -> &[CellPair];
    /// The score of the current pairing, recomputed from the grid.
    fn score(&self) -> Score;
}

/// The greedy baseline: take valid pairs in ascending cost order, skipping any
/// that would reuse a cell.
///
/// Not optimal; it exists as a reference point and correctness check for
/// [`FlowSolver`], whose score never exceeds this one's.
pub struct NaiveSolver<'a> {
    grid: &'a Grid,
    pairs: Vec<CellPair>,
}

impl<'a> NaiveSolver<'a> {
    /// A solver over `grid`, with no pairing selected yet.
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, pairs: Vec::new() }
    }
}

impl Solver for NaiveSolver<'_> {
    fn run(&mut self) -> Result<Score, SolverError> {
        // the sort is stable, so equal-cost pairs keep enumeration order and
        // repeated runs select identically
        let candidates = self
            .grid
            .valid_pairs()
            .into_iter()
            .sorted_by_key(|pair| self.grid.cost(pair))
            .collect_vec();

        self.pairs.clear();
        let mut used: HashSet<Location> = HashSet::new();
        for pair in candidates {
            if !used.contains(&pair.0) && !used.contains(&pair.1) {
                used.insert(pair.0);
                used.insert(pair.1);
                self.pairs.push(pair);
            }
        }

        Ok(self.score())
    }

    fn pairs(&self) -> &[CellPair] {
        &self.pairs
    }

    fn score(&self) -> Score {
        self.grid.score(&self.pairs)
    }
}

/// The exact solver: reduces the grid to a unit-capacity bipartite flow
/// network and reads the optimal pairing off a minimum-cost flow.
///
/// Cells 2-color by coordinate-sum parity, and every valid pair joins the two
/// classes, so the pairing graph is bipartite: source → even cells → odd
/// cells → sink, all capacities 1. A pair edge costs the pair's value
/// difference minus both cells' values — the exact change in score from
/// covering those two cells — so the cheapest flow over all flow values is
/// the minimum-score pairing.
pub struct FlowSolver<'a> {
    grid: &'a Grid,
    pairs: Vec<CellPair>,
}

impl<'a> FlowSolver<'a> {
    /// A solver over `grid`, with no pairing selected yet.
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, pairs: Vec::new() }
    }

    // cell node ids start after the two sentinels, row-major
    fn node_id(&self, location: Location) -> NodeId {
        2 + location.0 * self.grid.cols() + location.1
    }

    fn location_of(&self, node: NodeId) -> Location {
        let cell = node - 2;
        Location(cell / self.grid.cols(), cell % self.grid.cols())
    }

    fn build_network(&self) -> FlowNetwork {
        let mut network = FlowNetwork::with_nodes(2 + self.grid.rows() * self.grid.cols());

        for location in self.grid.locations() {
            if self.grid.is_forbidden(location) {
                continue;
            }
            if location.is_even() {
                network.add_edge(SOURCE, self.node_id(location), 1, 0);
            } else {
                network.add_edge(self.node_id(location), SINK, 1, 0);
            }
        }

        for (a, b, _) in self.grid.pairing_graph().all_edges() {
            let (even, odd) = if a.is_even() { (a, b) } else { (b, a) };
            // cost of the pair minus the two standalone values it removes
            // from the score; always negative since values are positive
            let margin = self.grid.cost(&UnorderedPair(even, odd)) as i64
                - self.grid.value(even) as i64
                - self.grid.value(odd) as i64;
            network.add_edge(self.node_id(even), self.node_id(odd), 1, margin);
        }

        debug!(
            "flow network built: {} nodes, {} arena edges",
            network.node_count(),
            network.edge_count()
        );

        network
    }
}

impl Solver for FlowSolver<'_> {
    fn run(&mut self) -> Result<Score, SolverError> {
        // nothing carries over between runs; the network is rebuilt from scratch
        let mut network = self.build_network();
        network.min_cost_flow(SOURCE, SINK)?;

        self.pairs = network
            .unit_flow_edges()
            .filter(|&(u, v)| u > SINK && v > SINK)
            .map(|(u, v)| UnorderedPair(self.location_of(u), self.location_of(v)))
            .collect();
        debug!("flow solver selected {} pair(s)", self.pairs.len());

        Ok(self.score())
    }

    fn pairs(&self) -> &[CellPair] {
        &self.pairs
    }

    fn score(&self) -> Score {
        self.grid.score(&self.pairs)
    }
}
