use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::color::Color;
use crate::location::{Dimension, Location, Step};

/// The value carried by one cell. Always positive on a built grid.
pub type Value = u32;
/// The cost of one pair: the absolute difference of its cells' values.
pub type Cost = u32;
/// The score of a pairing: total pair cost plus the values of uncovered cells.
pub type Score = u64;
/// An unordered pair of cell locations; `(a, b)` and `(b, a)` compare and hash equal.
pub type CellPair = UnorderedPair<Location>;

/// An immutable colored, valued rectangular grid.
///
/// Build one with a [`GridBuilder`](crate::builder::GridBuilder); solvers only
/// ever read it. Every query about hypothetical pairs is total: asking about
/// out-of-bounds or otherwise unusable cells answers "not a valid pair" rather
/// than failing.
pub struct Grid {
    // rows, columns
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) colors: Array2<Color>,
    pub(crate) values: Array2<Value>,
}

impl Grid {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.dims.0.get()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.dims.1.get()
    }

    /// Whether `location` lies on this grid.
    pub fn contains(&self, location: Location) -> bool {
        location.0 < self.rows() && location.1 < self.cols()
    }

    /// The color of the cell at `location`.
    ///
    /// # Panics
    /// If `location` is out of bounds.
    pub fn color(&self, location: Location) -> Color {
        self.colors[location.as_index()]
    }

    /// The value of the cell at `location`.
    ///
    /// # Panics
    /// If `location` is out of bounds.
    pub fn value(&self, location: Location) -> Value {
        self.values[location.as_index()]
    }

    /// Whether the cell at `location` is black and therefore excluded from pairing.
    ///
    /// # Panics
    /// If `location` is out of bounds.
    pub fn is_forbidden(&self, location: Location) -> bool {
        self.color(location).is_forbidden()
    }

    /// Whether the colors of the cells at `c1` and `c2` allow pairing them.
    /// See [`Color::pairs_with`] for the rules.
    ///
    /// # Panics
    /// If either location is out of bounds.
    pub fn color_compatible(&self, c1: Location, c2: Location) -> bool {
        self.color(c1).pairs_with(self.color(c2))
    }

    /// Whether `c1` and `c2` form a valid pair: both on the grid, neither
    /// forbidden, 4-directionally adjacent, and of mutually compatible colors.
    pub fn valid_pair(&self, c1: Location, c2: Location) -> bool {
        self.contains(c1)
            && self.contains(c2)
            && !self.is_forbidden(c1)
            && !self.is_forbidden(c2)
            && c1.adjacent_to(c2)
            && self.color_compatible(c1, c2)
    }

    /// The cost of taking `pair`: the absolute difference of its cells' values.
    ///
    /// # Panics
    /// If either location is out of bounds.
    pub fn cost(&self, pair: &CellPair) -> Cost {
        self.value(pair.0).abs_diff(self.value(pair.1))
    }

    /// Iterate every location on the grid in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.rows()).flat_map(move |i| (0..self.cols()).map(move |j| Location(i, j)))
    }

    /// Every valid pair on the grid, each unordered pair exactly once.
    ///
    /// Each cell tests only its right and below neighbors, so the scan is
    /// O(rows × columns) and its order is deterministic.
    pub fn valid_pairs(&self) -> Vec<CellPair> {
        let mut pairs = Vec::new();
        for location in self.locations() {
            for step in Step::FORWARD_VARIANTS {
                let neighbor = step.attempt_from(location);
                if self.valid_pair(location, neighbor) {
                    pairs.push(UnorderedPair(location, neighbor));
                }
            }
        }
        pairs
    }

    /// The valid pairs of [`Self::valid_pairs`] as an undirected graph: nodes
    /// are pairable cells, edge weights are pair costs.
    pub fn pairing_graph(&self) -> UnGraphMap<Location, Cost> {
        let pairs = self.valid_pairs();
        let mut graph = UnGraphMap::with_capacity(self.rows() * self.cols(), pairs.len());
        for pair in pairs {
            graph.add_edge(pair.0, pair.1, self.cost(&pair));
        }
        graph
    }

    /// The score of a pairing: the cost of every pair taken, plus the value of
    /// every non-forbidden cell no pair covers. Lower is better.
    pub fn score(&self, pairs: &[CellPair]) -> Score {
        let mut total: Score = pairs.iter().map(|pair| self.cost(pair) as Score).sum();

        let used: HashSet<Location> = pairs.iter().flat_map(|pair| [pair.0, pair.1]).collect();
        for location in self.locations() {
            if !self.is_forbidden(location) && !used.contains(&location) {
                total += self.value(location) as Score;
            }
        }

        total
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.rows() {
            let mut line = String::with_capacity(self.cols() * 4);
            for j in 0..self.cols() {
                if j > 0 {
                    line.push(' ');
                }
                let location = Location(i, j);
                line.push(self.color(location).letter());
                line.push_str(&self.value(location).to_string());
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
