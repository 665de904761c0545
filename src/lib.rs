#![warn(missing_docs)]

//! # `gridpair`
//!
//! A solver for adjacent-cell pairing puzzles on colored, valued rectangular grids.
//! Begin by building a grid object with [`GridBuilder`](builder::GridBuilder), then hand it to a solver:
//! [`FlowSolver`] for the optimal pairing, or [`NaiveSolver`] for the cheap greedy baseline.
//! Calling [`run()`](crate::Solver::run) computes a pairing and returns its score; the selected
//! [`pairs()`](crate::Solver::pairs) stay readable on the solver afterwards.
//!
//! The objective: select pairwise-disjoint pairs of adjacent, color-compatible cells so that the
//! sum of pair costs (absolute value differences) plus the values of cells left unpaired is minimal.
//! Black cells can never pair and never count.
//!
//! # Internals
//! This crate is driven by expressing the problem as a minimum-cost flow over the grid's bipartite
//! structure, pushing flow along successively cheapest augmenting paths, and re-expressing the
//! resulting unit flows as selected pairs.
//!
//! Checkerboard-color the cells by parity of row + column; every adjacency joins the two classes,
//! so the pairing graph is bipartite and matchings are exactly unit flows through
//! source → even cells → odd cells → sink, all capacities 1.
//! A pair edge's cost is the pair's cost minus both cells' values — the exact score change from
//! taking that pair — so augmentation stops once no remaining path lowers the score, and the flow
//! left on the network is a minimum-score pairing, not merely a maximum matching.
//! Residual edges carry negated costs, which makes the shortest-path subproblem
//! negative-edge-tolerant; a queue-driven label-correcting search handles it where Dijkstra could not.

pub use builder::{GridBuilder, InvalidGridReason};
pub use color::Color;
pub use grid::{CellPair, Cost, Grid, Score, Value};
pub use location::Location;
pub use solver::{FlowSolver, NaiveSolver, Solver, SolverError};

pub mod builder;
mod tests;
pub(crate) mod network;
pub mod color;
pub mod location;
pub mod grid;
pub mod solver;
