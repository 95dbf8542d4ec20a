use crate::{
    attacks,
    bitboard::Bitboard,
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    errors::{MoveRejection, PositionError, PositionErrorKinds},
    m::{Move, MoveList},
    movement,
    role::Role,
    square::Square,
    types::Piece,
};

/// Game end: checkmate or stalemate.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }
}

/// Board plus the transient en passant target: everything the validator
/// needs to judge a move for either color.
///
/// Deliberately turn-agnostic, so the same code validates real moves and
/// hypothetical ones during simulation. Turn ownership is enforced by the
/// game layer.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Situation {
    pub board: Board,
    pub ep_square: Option<Square>,
}

impl Default for Situation {
    fn default() -> Situation {
        Situation {
            board: Board::standard(),
            ep_square: None,
        }
    }
}

impl Situation {
    /// Validates a board for use as a game position and wraps it.
    ///
    /// Pawns standing off their start rank are marked as having moved, so
    /// they cannot double-push from the middle of the board.
    pub fn from_board(mut board: Board, turn: Color) -> Result<Situation, PositionError> {
        let mut kinds = PositionErrorKinds::empty();

        if board.occupied().is_empty() {
            kinds |= PositionErrorKinds::EMPTY_BOARD;
        }

        for color in Color::ALL {
            match board.by_color(color).into_iter().filter(|&sq| board.piece_at(sq) == Some(color.king())).count() {
                0 => kinds |= PositionErrorKinds::MISSING_KING,
                1 => (),
                _ => kinds |= PositionErrorKinds::TOO_MANY_KINGS,
            }
        }

        if board
            .pieces()
            .any(|(sq, piece)| piece.role == Role::Pawn && (sq.rank() == 0 || sq.rank() == 7))
        {
            kinds |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        if !kinds.contains(PositionErrorKinds::MISSING_KING)
            && attacks::king_in_check(&board, !turn)
        {
            kinds |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        if !kinds.is_empty() {
            return Err(PositionError { kinds });
        }

        let off_start: Vec<(Square, Piece)> = board
            .pieces()
            .filter(|&(sq, piece)| {
                piece.role == Role::Pawn && sq.rank() != piece.color.fold(1, 6)
            })
            .collect();
        for (sq, piece) in off_start {
            board.set_piece_at(sq, piece, true);
        }

        Ok(Situation {
            board,
            ep_square: None,
        })
    }

    /// Full legality judgement for a candidate move of `color`, as a typed
    /// [`Move`] on success. Short-circuits on the first failing stage.
    ///
    /// `promotion` is consulted only when the move actually promotes; the
    /// game layer turns a promoting move without a role into a pending
    /// decision.
    pub fn classify(
        &self,
        color: Color,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, MoveRejection> {
        let m = self.classify_shape(color, from, to, promotion)?;
        if self.exposes_king(color, &m) {
            return Err(MoveRejection::LeavesKingInCheck);
        }
        Ok(m)
    }

    fn classify_shape(
        &self,
        color: Color,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, MoveRejection> {
        if from == to {
            return Err(MoveRejection::IllegalShape);
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or(MoveRejection::NoPieceAtOrigin)?;
        if piece.color != color {
            return Err(MoveRejection::WrongTurn);
        }

        // A two-file king shift is a castling attempt with its own rules.
        if piece.role == Role::King
            && to.rank() == from.rank()
            && (to.file() - from.file()).abs() == 2
        {
            return self.classify_castle(color, from, to);
        }

        if !movement::pseudo_legal(&self.board, piece, from, to, self.ep_square) {
            return Err(MoveRejection::IllegalShape);
        }

        if matches!(piece.role, Role::Bishop | Role::Rook | Role::Queen)
            && movement::path_obstructed(&self.board, from, to)
        {
            return Err(MoveRejection::PathBlocked);
        }

        let capture = self.board.piece_at(to);
        if let Some(target) = capture {
            if target.color == color {
                return Err(MoveRejection::CapturesOwnPiece);
            }
        }

        // A diagonal pawn step onto an empty square passed the shape test,
        // so it targets the en passant square; the captured pawn sits
        // beside the origin, not on the destination.
        if piece.role == Role::Pawn && capture.is_none() && to.file() != from.file() {
            let victim = Square::new(to.file(), from.rank());
            return match self.board.piece_at(victim) {
                Some(p) if p.color != color && p.role == Role::Pawn => {
                    Ok(Move::EnPassant { from, to })
                }
                _ => Err(MoveRejection::EnPassantPreconditionFailed),
            };
        }

        let promotion = if piece.role == Role::Pawn && to.rank() == color.fold(7, 0) {
            match promotion {
                Some(Role::Pawn) | Some(Role::King) => return Err(MoveRejection::IllegalShape),
                role => role,
            }
        } else {
            None
        };

        Ok(Move::Normal {
            role: piece.role,
            from,
            capture: capture.map(|p| p.role),
            to,
            promotion,
        })
    }

    fn classify_castle(
        &self,
        color: Color,
        from: Square,
        to: Square,
    ) -> Result<Move, MoveRejection> {
        let side = CastlingSide::from_king_side(to.file() > from.file());
        let backrank = color.backrank();

        // The king must be unmoved on its home square, the rook unmoved on
        // its corner.
        if from != Square::new(4, backrank) || self.board.ever_moved(from) {
            return Err(MoveRejection::CastlingPreconditionFailed);
        }
        let rook_from = Square::new(side.rook_from_file(), backrank);
        match self.board.piece_at(rook_from) {
            Some(piece)
                if piece.color == color
                    && piece.role == Role::Rook
                    && !self.board.ever_moved(rook_from) => {}
            _ => return Err(MoveRejection::CastlingPreconditionFailed),
        }

        for &file in side.empty_files() {
            if self.board.piece_at(Square::new(file, backrank)).is_some() {
                return Err(MoveRejection::CastlingPreconditionFailed);
            }
        }

        // Never out of, through, or into check.
        for file in [4, side.rook_to_file(), side.king_to_file()] {
            if attacks::attacked(&self.board, Square::new(file, backrank), !color) {
                return Err(MoveRejection::CastlingPreconditionFailed);
            }
        }

        Ok(Move::Castle {
            king: from,
            rook: rook_from,
        })
    }

    /// Simulates `m` and reports whether it leaves the king of `color`
    /// attacked. The simulation runs on a clone, so restoration of the
    /// board, the moved flags and the en passant target is structural
    /// rather than replayed field by field.
    fn exposes_king(&self, color: Color, m: &Move) -> bool {
        let mut simulation = self.clone();
        simulation.apply(color, m);
        attacks::king_in_check(&simulation.board, color)
    }

    /// Applies a validated move for `color`. The en passant target is
    /// cleared unconditionally and re-armed only by a double push.
    pub fn apply(&mut self, color: Color, m: &Move) -> Option<Piece> {
        self.ep_square.take();

        match *m {
            Move::Normal {
                role,
                from,
                to,
                promotion,
                ..
            } => {
                let captured = self.board.relocate(from, to);
                if let Some(promotion) = promotion {
                    self.board.set_piece_at(to, promotion.of(color), true);
                }
                if role == Role::Pawn && (to.rank() - from.rank()).abs() == 2 {
                    self.ep_square = Some(Square::new(from.file(), (from.rank() + to.rank()) / 2));
                }
                captured
            }
            Move::EnPassant { from, to } => {
                let victim = Square::new(to.file(), from.rank());
                let captured = self.board.remove_piece_at(victim);
                self.board.relocate(from, to);
                captured
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_king_side(king < rook);
                let backrank = color.backrank();
                self.board
                    .relocate(king, Square::new(side.king_to_file(), backrank));
                self.board
                    .relocate(rook, Square::new(side.rook_to_file(), backrank));
                None
            }
        }
    }

    /// Legal destination squares for the piece on `from`, for move hints.
    pub fn destinations(&self, color: Color, from: Square) -> Bitboard {
        let mut targets = Bitboard::EMPTY;
        for to in Bitboard::ALL {
            if self.classify(color, from, to, None).is_ok() {
                targets.add(to);
            }
        }
        targets
    }

    /// Exhaustive scan: every piece of `color` against all 64 squares.
    pub fn any_legal_move(&self, color: Color) -> bool {
        for (from, piece) in self.board.pieces() {
            if piece.color != color {
                continue;
            }
            for to in Bitboard::ALL {
                if self.classify(color, from, to, None).is_ok() {
                    return true;
                }
            }
        }
        false
    }

    /// All legal moves for `color`. Promoting moves appear once, with the
    /// promotion role still undecided.
    pub fn legal_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for (from, piece) in self.board.pieces() {
            if piece.color != color {
                continue;
            }
            for to in Bitboard::ALL {
                if let Ok(m) = self.classify(color, from, to, None) {
                    moves.push(m);
                }
            }
        }
        moves
    }

    /// Terminal classification for the player to move, or `None` while any
    /// legal move remains.
    pub fn outcome_for(&self, color: Color) -> Option<Outcome> {
        if self.any_legal_move(color) {
            return None;
        }
        if attacks::king_in_check(&self.board, color) {
            Some(Outcome::Checkmate { winner: !color })
        } else {
            Some(Outcome::Stalemate)
        }
    }
}
