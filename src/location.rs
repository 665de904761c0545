use std::num::NonZero;

use strum::VariantArray;

/// A single coordinate along either grid axis.
pub type Coord = usize;
/// A nonzero extent of a grid axis.
pub type Dimension = NonZero<Coord>;

/// A cell position, as `(row, column)`, both 0-indexed from the top-left corner.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    /// Offset this location by the given `(row, column)` deltas.
    ///
    /// Stepping off the top or left edge wraps to a location no grid contains;
    /// bounds are the grid's concern, not this type's.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether `other` is reachable from `self` by exactly one [`Step`].
    ///
    /// A location is never adjacent to itself, and diagonal neighbors do not count.
    pub fn adjacent_to(&self, other: Location) -> bool {
        Step::VARIANTS.iter().any(|step| step.attempt_from(*self) == other)
    }

    // checkerboard class; every step lands in the other class
    pub(crate) fn is_even(&self) -> bool {
        (self.0 + self.1) % 2 == 0
    }
}

/// The four cardinal steps between cells of a rectangular grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Step {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Step {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    /// The steps whose destination is indexed higher than their origin in row-major order.
    ///
    /// Scanning only these from every cell visits each adjacent pair exactly once.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];
}
