use strum::VariantArray;

/// The color of a grid cell, determining whether and with whom it may pair.
///
/// Colors are interchangeable with the numeric codes `0..=4` in declaration
/// order, the encoding grid inputs use.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Color {
    /// Code 0; pairs with any non-black cell.
    #[default]
    White,
    /// Code 1; pairs with white, red, and blue cells.
    Red,
    /// Code 2; pairs with white, red, and blue cells.
    Blue,
    /// Code 3; pairs with white and green cells.
    Green,
    /// Code 4; forbidden: never pairs, and its value never counts.
    Black,
}

impl Color {
    /// Decode a numeric color code, or [`None`] if it is out of range.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::VARIANTS.get(code as usize).copied()
    }

    /// The numeric code of this color.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Single-letter display form, as used by [`Grid`](crate::Grid)'s text rendering.
    pub fn letter(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Red => 'r',
            Self::Blue => 'b',
            Self::Green => 'g',
            Self::Black => 'k',
        }
    }

    /// Whether cells of this color are excluded from pairing entirely.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Whether two cells of these colors may be paired. The relation is symmetric.
    pub fn pairs_with(&self, other: Color) -> bool {
        match (*self, other) {
            (Self::Black, _) | (_, Self::Black) => false,
            (Self::White, _) | (_, Self::White) => true,
            (Self::Green, peer) | (peer, Self::Green) => peer == Self::Green,
            // red and blue mix freely
            _ => true,
        }
    }
}
