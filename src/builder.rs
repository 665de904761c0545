use ndarray::Array2;
use thiserror::Error;

use crate::color::Color;
use crate::grid::{Grid, Value};
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum InvalidGridReason {
    /// A color or value matrix did not have exactly one row per grid row.
    #[error("{got} rows supplied, expected {expected}")]
    RowCountMismatch {
        /// Rows the grid has.
        expected: usize,
        /// Rows supplied.
        got: usize,
    },
    /// A supplied row did not have exactly one entry per grid column.
    #[error("row {row} has {got} entries, expected {expected}")]
    RowLengthMismatch {
        /// Index of the offending row.
        row: usize,
        /// Entries the row needs.
        expected: usize,
        /// Entries the row had.
        got: usize,
    },
    /// A color code outside `0..=4` was supplied.
    #[error("unrecognized color code {code}")]
    UnknownColorCode {
        /// The offending code.
        code: u8,
    },
    /// Cell values must be positive.
    #[error("zero value at ({}, {})", location.0, location.1)]
    ZeroValue {
        /// The offending cell.
        location: Location,
    },
    /// An edit targeted a location outside the builder's dimensions.
    #[error("location ({}, {}) is out of bounds", location.0, location.1)]
    OutOfBounds {
        /// The offending location.
        location: Location,
    },
}

/// A builder for [`Grid`]s, and the place malformed input is rejected so that
/// solvers never see it.
///
/// Cells start white with value 1. Mutators return `&mut Self` for chaining
/// and become no-ops once the builder is invalid; [`Self::build`] reports
/// every accumulated [`InvalidGridReason`].
#[derive(Clone)]
pub struct GridBuilder {
    // rows, columns
    dims: (Dimension, Dimension),
    colors: Array2<Color>,
    values: Array2<Value>,
    invalid_reasons: Vec<InvalidGridReason>,
}

impl GridBuilder {
    /// Construct a builder for a grid of the given `(rows, columns)`, all
    /// cells white with value 1.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            colors: Array2::from_shape_simple_fn((dims.0.get(), dims.1.get()), Color::default),
            values: Array2::from_shape_simple_fn((dims.0.get(), dims.1.get()), || 1),
            invalid_reasons: Vec::new(),
        }
    }

    /// Assign every cell's color from numeric codes, one slice per grid row.
    ///
    /// May invalidate the builder with [`RowCountMismatch`](InvalidGridReason::RowCountMismatch),
    /// [`RowLengthMismatch`](InvalidGridReason::RowLengthMismatch), or
    /// [`UnknownColorCode`](InvalidGridReason::UnknownColorCode).
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn color_rows(&mut self, rows: &[Vec<u8>]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if rows.len() != self.dims.0.get() {
            self.invalid_reasons.push(InvalidGridReason::RowCountMismatch {
                expected: self.dims.0.get(),
                got: rows.len(),
            });
            return self;
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != self.dims.1.get() {
                self.invalid_reasons.push(InvalidGridReason::RowLengthMismatch {
                    row: i,
                    expected: self.dims.1.get(),
                    got: row.len(),
                });
                return self;
            }

            for (j, &code) in row.iter().enumerate() {
                match Color::from_code(code) {
                    Some(color) => self.colors[(i, j)] = color,
                    None => {
                        self.invalid_reasons.push(InvalidGridReason::UnknownColorCode { code });
                        return self;
                    }
                }
            }
        }

        self
    }

    /// Assign every cell's value, one slice per grid row.
    ///
    /// May invalidate the builder with [`RowCountMismatch`](InvalidGridReason::RowCountMismatch),
    /// [`RowLengthMismatch`](InvalidGridReason::RowLengthMismatch), or
    /// [`ZeroValue`](InvalidGridReason::ZeroValue).
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn value_rows(&mut self, rows: &[Vec<Value>]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if rows.len() != self.dims.0.get() {
            self.invalid_reasons.push(InvalidGridReason::RowCountMismatch {
                expected: self.dims.0.get(),
                got: rows.len(),
            });
            return self;
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != self.dims.1.get() {
                self.invalid_reasons.push(InvalidGridReason::RowLengthMismatch {
                    row: i,
                    expected: self.dims.1.get(),
                    got: row.len(),
                });
                return self;
            }

            for (j, &value) in row.iter().enumerate() {
                if value == 0 {
                    self.invalid_reasons.push(InvalidGridReason::ZeroValue { location: Location(i, j) });
                    return self;
                }
                self.values[(i, j)] = value;
            }
        }

        self
    }

    /// Recolor the single cell at `location`.
    ///
    /// May invalidate the builder with [`OutOfBounds`](InvalidGridReason::OutOfBounds).
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn paint(&mut self, location: Location, color: Color) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
            self.invalid_reasons.push(InvalidGridReason::OutOfBounds { location });
            return self;
        }

        self.colors[location.as_index()] = color;
        self
    }

    /// Set the value of the single cell at `location`.
    ///
    /// May invalidate the builder with [`OutOfBounds`](InvalidGridReason::OutOfBounds)
    /// or [`ZeroValue`](InvalidGridReason::ZeroValue).
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn set_value(&mut self, location: Location, value: Value) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
            self.invalid_reasons.push(InvalidGridReason::OutOfBounds { location });
            return self;
        }

        if value == 0 {
            self.invalid_reasons.push(InvalidGridReason::ZeroValue { location });
            return self;
        }

        self.values[location.as_index()] = value;
        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<InvalidGridReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<InvalidGridReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into an immutable [`Grid`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of
    /// [`InvalidGridReason`] will indicate why.
    pub fn build(&self) -> Result<Grid, &Vec<InvalidGridReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(Grid {
            dims: self.dims,
            colors: self.colors.clone(),
            values: self.values.clone(),
        })
    }
}
