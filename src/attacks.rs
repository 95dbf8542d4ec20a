//! Attack detection.
//!
//! Re-derives from scratch whether a square is attacked, independent of
//! whose turn it is: rays are cast outward from the square and the first
//! occupied square on each ray decides, then the knight, pawn and king
//! probe squares are tested. A full re-scan per call is cheap at 8×8
//! scale; no incremental attack maps are maintained.

use crate::{
    board::Board,
    color::Color,
    role::Role,
    square::Square,
};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Tests if `sq` is attacked by any piece of `by`.
pub fn attacked(board: &Board, sq: Square, by: Color) -> bool {
    rays(board, sq, by, &ROOK_DIRECTIONS, Role::Rook)
        || rays(board, sq, by, &BISHOP_DIRECTIONS, Role::Bishop)
        || probes(board, sq, by, &KNIGHT_JUMPS, Role::Knight)
        || probes(board, sq, by, &KING_STEPS, Role::King)
        || pawn_attack(board, sq, by)
}

/// Tests if the king of `color` is attacked.
///
/// Boards without a king of `color` report no check; the game layer
/// guarantees both kings are present.
pub fn king_in_check(board: &Board, color: Color) -> bool {
    board
        .king_of(color)
        .map_or(false, |king| attacked(board, king, !color))
}

fn rays(board: &Board, sq: Square, by: Color, directions: &[(i8, i8)], slider: Role) -> bool {
    for &(file_step, rank_step) in directions {
        for i in 1..8i8 {
            let probe =
                match Square::from_coords(sq.file() + file_step * i, sq.rank() + rank_step * i) {
                    Some(probe) => probe,
                    None => break,
                };
            if let Some(piece) = board.piece_at(probe) {
                if piece.color == by && (piece.role == slider || piece.role == Role::Queen) {
                    return true;
                }
                // Whatever else occupies the ray blocks it.
                break;
            }
        }
    }
    false
}

fn probes(board: &Board, sq: Square, by: Color, offsets: &[(i8, i8)], role: Role) -> bool {
    offsets.iter().any(|&(file_delta, rank_delta)| {
        Square::from_coords(sq.file() + file_delta, sq.rank() + rank_delta)
            .and_then(|probe| board.piece_at(probe))
            == Some(role.of(by))
    })
}

fn pawn_attack(board: &Board, sq: Square, by: Color) -> bool {
    // An attacking pawn sits one rank toward its own side: a white pawn
    // captures upward, so it attacks `sq` from the rank below.
    let rank_delta = by.fold(-1, 1);
    [(-1, rank_delta), (1, rank_delta)].iter().any(|&(file_delta, rank_delta)| {
        Square::from_coords(sq.file() + file_delta, sq.rank() + rank_delta)
            .and_then(|probe| board.piece_at(probe))
            == Some(by.pawn())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_ray() {
        let mut board = Board::empty();
        board.set_piece_at(Square::A8, Color::Black.rook(), true);
        assert!(attacked(&board, Square::A1, Color::Black));
        assert!(attacked(&board, Square::H8, Color::Black));
        assert!(!attacked(&board, Square::B1, Color::Black));

        // The first occupied square along the ray blocks it.
        board.set_piece_at(Square::A4, Color::White.pawn(), true);
        assert!(!attacked(&board, Square::A1, Color::Black));
        assert!(attacked(&board, Square::A5, Color::Black));
    }

    #[test]
    fn test_bishop_ray() {
        let mut board = Board::empty();
        board.set_piece_at(Square::H4, Color::Black.queen(), true);
        assert!(attacked(&board, Square::E1, Color::Black));
        board.set_piece_at(Square::G3, Color::White.pawn(), true);
        assert!(!attacked(&board, Square::E1, Color::Black));
    }

    #[test]
    fn test_blocker_of_wrong_kind_is_not_an_attacker() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E4, Color::Black.knight(), true);
        // The knight sits on the rook ray from e1 but does not attack along it.
        assert!(!attacked(&board, Square::E1, Color::Black));
        assert!(attacked(&board, Square::D2, Color::Black));
    }

    #[test]
    fn test_knight_probes() {
        let mut board = Board::empty();
        board.set_piece_at(Square::F3, Color::White.knight(), true);
        assert!(attacked(&board, Square::E5, Color::White));
        assert!(attacked(&board, Square::G5, Color::White));
        assert!(attacked(&board, Square::E1, Color::White));
        assert!(!attacked(&board, Square::F4, Color::White));
    }

    #[test]
    fn test_pawn_direction() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E4, Color::White.pawn(), true);
        board.set_piece_at(Square::E5, Color::Black.pawn(), true);
        // White pawns attack upward, black pawns downward.
        assert!(attacked(&board, Square::D5, Color::White));
        assert!(attacked(&board, Square::F5, Color::White));
        assert!(!attacked(&board, Square::D3, Color::White));
        assert!(attacked(&board, Square::D4, Color::Black));
        assert!(attacked(&board, Square::F4, Color::Black));
        assert!(!attacked(&board, Square::D6, Color::Black));
    }

    #[test]
    fn test_king_adjacency() {
        let mut board = Board::empty();
        board.set_piece_at(Square::D4, Color::Black.king(), true);
        assert!(attacked(&board, Square::C3, Color::Black));
        assert!(attacked(&board, Square::E5, Color::Black));
        assert!(!attacked(&board, Square::D6, Color::Black));
    }

    #[test]
    fn test_king_in_check() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king(), false);
        board.set_piece_at(Square::E8, Color::Black.rook(), true);
        assert!(king_in_check(&board, Color::White));
        assert!(!king_in_check(&board, Color::Black));

        board.set_piece_at(Square::E5, Color::White.pawn(), true);
        assert!(!king_in_check(&board, Color::White));
    }
}
