use crate::{color::Color, role::Role};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// Gets the English letter of the piece, uppercase for White.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempi::Color;
    ///
    /// assert_eq!(Color::White.king().char(), 'K');
    /// assert_eq!(Color::Black.pawn().char(), 'p');
    /// ```
    pub fn char(self) -> char {
        self.color
            .fold(self.role.upper_char(), self.role.char())
    }
}
