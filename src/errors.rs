use std::{error::Error, fmt};

use bitflags::bitflags;

/// Reason a candidate move was rejected.
///
/// Every rule violation is reported through one of these variants; no
/// violation is swallowed and a rejected move never mutates any state.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum MoveRejection {
    /// A coordinate was off the board.
    OutOfBounds,
    /// The origin square is empty.
    NoPieceAtOrigin,
    /// The piece at the origin belongs to the player not on turn.
    WrongTurn,
    /// The destination does not fit the piece's movement shape.
    IllegalShape,
    /// A sliding piece's path is obstructed.
    PathBlocked,
    /// The destination holds a piece of the mover's own color.
    CapturesOwnPiece,
    /// The move would leave the mover's own king attacked.
    LeavesKingInCheck,
    /// A castling precondition failed: a participant has moved, a square
    /// between them is occupied, or the king's path is attacked.
    CastlingPreconditionFailed,
    /// A diagonal pawn move onto an empty square that is not a valid
    /// en passant capture.
    EnPassantPreconditionFailed,
    /// Two-move variant: the second half-move selected the piece already
    /// moved in the first half-move of the same turn.
    SameTurnPieceReused,
    /// A promotion decision is outstanding; resolve it first.
    PromotionPending,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveRejection::OutOfBounds => "coordinate off the board",
            MoveRejection::NoPieceAtOrigin => "no piece at origin square",
            MoveRejection::WrongTurn => "piece belongs to the player not on turn",
            MoveRejection::IllegalShape => "destination does not fit the movement shape",
            MoveRejection::PathBlocked => "path is obstructed",
            MoveRejection::CapturesOwnPiece => "destination holds an own piece",
            MoveRejection::LeavesKingInCheck => "move would leave own king in check",
            MoveRejection::CastlingPreconditionFailed => "castling precondition failed",
            MoveRejection::EnPassantPreconditionFailed => "en passant precondition failed",
            MoveRejection::SameTurnPieceReused => "piece was already moved this turn",
            MoveRejection::PromotionPending => "a promotion decision is pending",
        })
    }
}

impl Error for MoveRejection {}

/// Error when resolving a promotion.
///
/// Unlike [`MoveRejection`], these are contract violations by the caller,
/// not rule violations by the player.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PromotionError {
    /// No promotion is pending.
    NotPending,
    /// Pawns may only promote to knight, bishop, rook or queen.
    InvalidRole,
}

impl fmt::Display for PromotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PromotionError::NotPending => "no promotion is pending",
            PromotionError::InvalidRole => "invalid promotion role",
        })
    }
}

impl Error for PromotionError {}

bitflags! {
    /// Reasons a board cannot be used as a game position.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;

        /// A side has no king.
        const MISSING_KING = 1 << 1;

        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 2;

        /// There are pawns on the first or last rank.
        const PAWNS_ON_BACKRANK = 1 << 3;

        /// The side not to move is in check.
        const OPPOSITE_CHECK = 1 << 4;
    }
}

/// Error when constructing a game from an invalid board.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PositionError {
    pub(crate) kinds: PositionErrorKinds,
}

impl PositionError {
    pub fn kinds(&self) -> PositionErrorKinds {
        self.kinds
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid position: {:?}", self.kinds)
    }
}

impl Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            MoveRejection::PathBlocked.to_string(),
            "path is obstructed"
        );
        assert_eq!(PromotionError::NotPending.to_string(), "no promotion is pending");
    }
}
