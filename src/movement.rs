//! Per-role movement shapes and path obstruction.
//!
//! These are the pseudo-legal tests: they know the geometry of each piece
//! type and nothing about turns, king safety, or capturing one's own
//! pieces. The full legality judgement lives in the validator.

use crate::{
    board::Board,
    color::Color,
    role::Role,
    square,
    square::Square,
    types::Piece,
};

/// Shape-only movement test for the piece standing on `from`.
///
/// Pawn occupancy rules (push onto empty squares, capture diagonally onto
/// enemies or the en passant target) are folded into the pawn shape. A
/// two-file horizontal king shift is recognized as a castling attempt and
/// passes the shape test; its preconditions are checked by the validator.
pub fn pseudo_legal(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    ep_square: Option<Square>,
) -> bool {
    let file_delta = to.file() - from.file();
    let rank_delta = to.rank() - from.rank();

    match piece.role {
        Role::Pawn => pawn_shape(board, piece.color, from, to, ep_square),
        Role::Knight => file_delta.abs() * rank_delta.abs() == 2,
        Role::Bishop => file_delta.abs() == rank_delta.abs() && file_delta != 0,
        Role::Rook => (file_delta == 0) != (rank_delta == 0),
        Role::Queen => {
            (file_delta.abs() == rank_delta.abs() && file_delta != 0)
                || ((file_delta == 0) != (rank_delta == 0))
        }
        Role::King => {
            square::distance(from, to) == 1 || (rank_delta == 0 && file_delta.abs() == 2)
        }
    }
}

fn pawn_shape(
    board: &Board,
    color: Color,
    from: Square,
    to: Square,
    ep_square: Option<Square>,
) -> bool {
    let dir = color.fold(1, -1);
    let file_delta = to.file() - from.file();
    let rank_delta = to.rank() - from.rank();

    // Single push onto an empty square.
    if file_delta == 0 && rank_delta == dir {
        return board.piece_at(to).is_none();
    }

    // Double push: only from the start square, over two empty squares.
    if file_delta == 0 && rank_delta == 2 * dir {
        let passed = Square::new(from.file(), from.rank() + dir);
        return !board.ever_moved(from)
            && board.piece_at(passed).is_none()
            && board.piece_at(to).is_none();
    }

    // Diagonal step: onto an enemy, or onto the en passant target.
    if file_delta.abs() == 1 && rank_delta == dir {
        return match board.piece_at(to) {
            Some(target) => target.color != color,
            None => ep_square == Some(to),
        };
    }

    false
}

/// Whether any square strictly between `from` and `to` is occupied.
///
/// Meaningful for the sliding pieces; knights and kings never have an
/// obstructed path and pawn obstruction is part of the pawn shape.
pub fn path_obstructed(board: &Board, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }

    let file_step = (to.file() - from.file()).signum();
    let rank_step = (to.rank() - from.rank()).signum();

    let mut file = from.file() + file_step;
    let mut rank = from.rank() + rank_step;
    while (file, rank) != (to.file(), to.rank()) {
        match Square::from_coords(file, rank) {
            Some(sq) => {
                if board.piece_at(sq).is_some() {
                    return true;
                }
            }
            None => return false,
        }
        file += file_step;
        rank += rank_step;
    }

    false
}
