use crate::{
    attacks,
    bitboard::Bitboard,
    board::Board,
    color::{ByColor, Color},
    errors::{MoveRejection, PositionError, PromotionError},
    m::{Move, MoveList},
    position::{Outcome, Situation},
    role::Role,
    square::Square,
};

/// Result of a successfully submitted move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Play {
    /// The move was applied and the turn advanced.
    Completed(Move),
    /// The move was applied, but a pawn reached the last rank without a
    /// promotion role. The game accepts no further moves until
    /// [`Chess::resolve_promotion`] is called.
    PromotionRequired { at: Square },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Pending {
    pub(crate) from: Square,
    pub(crate) capture: Option<Role>,
    pub(crate) to: Square,
}

/// A two-player game of standard chess.
///
/// Owns the turn, the promotion-pending state and the terminal result;
/// this is the only turn-aware surface. Validation fully precedes
/// mutation: a rejected move leaves the game untouched.
///
/// # Examples
///
/// ```
/// use tempi::{Chess, Play, Square};
///
/// let mut game = Chess::new();
/// assert_eq!(game.legal_moves().len(), 20);
///
/// match game.play(Square::E2, Square::E4, None)? {
///     Play::Completed(m) => assert_eq!(m.to_string(), "e2-e4"),
///     Play::PromotionRequired { .. } => unreachable!(),
/// }
/// assert!(game.outcome().is_none());
/// # Ok::<_, tempi::MoveRejection>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Chess {
    situation: Situation,
    turn: Color,
    pending: Option<Pending>,
    captured: ByColor<Vec<Role>>,
    outcome: Option<Outcome>,
}

impl Default for Chess {
    fn default() -> Chess {
        Chess {
            situation: Situation::default(),
            turn: Color::White,
            pending: None,
            captured: ByColor::default(),
            outcome: None,
        }
    }
}

impl Chess {
    /// The standard starting position, White to move.
    pub fn new() -> Chess {
        Chess::default()
    }

    /// Starts a game from an arbitrary piece placement.
    ///
    /// The board is validated first (§ both kings present, no pawns on the
    /// back ranks, the side not on turn not already in check), and the
    /// terminal result is classified immediately, so a constructed
    /// stalemate reports [`Outcome::Stalemate`] right away.
    pub fn from_board(board: Board, turn: Color) -> Result<Chess, PositionError> {
        let situation = Situation::from_board(board, turn)?;
        let outcome = situation.outcome_for(turn);
        Ok(Chess {
            situation,
            turn,
            pending: None,
            captured: ByColor::default(),
            outcome,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.situation.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// En passant target square, armed for exactly one reply after a
    /// double pawn push.
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.situation.ep_square
    }

    /// Square of the pawn awaiting its promotion decision.
    #[inline]
    pub fn promotion_pending(&self) -> Option<Square> {
        self.pending.map(|pending| pending.to)
    }

    /// Game result, or `None` while the game is ongoing.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Pieces captured by `color`, in capture order.
    pub fn captured(&self, color: Color) -> &[Role] {
        self.captured.by_color(color)
    }

    /// Tests if the king of `color` is currently attacked.
    pub fn in_check(&self, color: Color) -> bool {
        attacks::king_in_check(&self.situation.board, color)
    }

    /// Legal destination squares for the piece on `from`, for move hints.
    ///
    /// Empty when the square does not hold a piece of the player on turn,
    /// or while a promotion decision is pending.
    pub fn legal_destinations(&self, from: Square) -> Bitboard {
        if self.pending.is_some() {
            return Bitboard::EMPTY;
        }
        match self.situation.board.piece_at(from) {
            Some(piece) if piece.color == self.turn => self.situation.destinations(self.turn, from),
            _ => Bitboard::EMPTY,
        }
    }

    /// All legal moves for the player on turn.
    pub fn legal_moves(&self) -> MoveList {
        if self.pending.is_some() {
            return MoveList::new();
        }
        self.situation.legal_moves(self.turn)
    }

    /// Submits a candidate move for the player on turn.
    ///
    /// On success the move has been applied; a pawn reaching the last rank
    /// without `promotion` suspends the game until
    /// [`resolve_promotion`](Chess::resolve_promotion). On rejection
    /// nothing changed.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Play, MoveRejection> {
        let result = self.play_inner(from, to, promotion);
        if let Err(rejection) = result {
            log::trace!("{}: rejected {} -> {}: {}", self.turn, from, to, rejection);
        }
        result
    }

    /// Submits a candidate move in raw board coordinates, as delivered by
    /// a hit-testing UI layer.
    pub fn play_coords(
        &mut self,
        from: (i8, i8),
        to: (i8, i8),
        promotion: Option<Role>,
    ) -> Result<Play, MoveRejection> {
        let from = Square::from_coords(from.0, from.1).ok_or(MoveRejection::OutOfBounds)?;
        let to = Square::from_coords(to.0, to.1).ok_or(MoveRejection::OutOfBounds)?;
        self.play(from, to, promotion)
    }

    fn play_inner(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Play, MoveRejection> {
        if self.pending.is_some() {
            return Err(MoveRejection::PromotionPending);
        }
        let piece = self
            .situation
            .board
            .piece_at(from)
            .ok_or(MoveRejection::NoPieceAtOrigin)?;
        if piece.color != self.turn {
            return Err(MoveRejection::WrongTurn);
        }

        let m = self.situation.classify(self.turn, from, to, promotion)?;
        Ok(self.commit(m))
    }

    fn commit(&mut self, m: Move) -> Play {
        let captured = self.situation.apply(self.turn, &m);
        if let Some(piece) = captured {
            self.captured.by_color_mut(self.turn).push(piece.role);
        }

        if let Move::Normal {
            role: Role::Pawn,
            from,
            capture,
            to,
            promotion: None,
        } = m
        {
            if to.rank() == self.turn.fold(7, 0) {
                log::debug!("{}: {} awaits promotion", self.turn, m);
                self.pending = Some(Pending { from, capture, to });
                return Play::PromotionRequired { at: to };
            }
        }

        self.finish_move(m);
        Play::Completed(m)
    }

    /// Supplies the promotion role for the pawn parked on the last rank.
    ///
    /// Valid only while [`promotion_pending`](Chess::promotion_pending) is
    /// set; calling it otherwise is a contract violation, reported as
    /// [`PromotionError::NotPending`].
    pub fn resolve_promotion(&mut self, role: Role) -> Result<Move, PromotionError> {
        let pending = self.pending.ok_or(PromotionError::NotPending)?;
        if matches!(role, Role::Pawn | Role::King) {
            return Err(PromotionError::InvalidRole);
        }
        self.pending = None;

        self.situation
            .board
            .set_piece_at(pending.to, role.of(self.turn), true);
        let m = Move::Normal {
            role: Role::Pawn,
            from: pending.from,
            capture: pending.capture,
            to: pending.to,
            promotion: Some(role),
        };
        self.finish_move(m);
        Ok(m)
    }

    /// Returns to the initial position and clears all transient state.
    pub fn reset(&mut self) {
        *self = Chess::default();
        log::debug!("game reset");
    }

    fn finish_move(&mut self, m: Move) {
        log::debug!("{}: {}", self.turn, m);
        self.turn = !self.turn;
        self.outcome = self.situation.outcome_for(self.turn);
        match self.outcome {
            Some(Outcome::Checkmate { winner }) => log::debug!("checkmate, {winner} wins"),
            Some(Outcome::Stalemate) => log::debug!("stalemate"),
            None => (),
        }
    }
}
