//! The two-moves-per-turn variant.
//!
//! A full turn is two accepted half-moves by the same player, with one
//! restriction: the second half-move may not select the piece already
//! moved in the first. The turn owner toggles, and checkmate/stalemate
//! are evaluated, only at the boundary after the second half-move. Move
//! legality itself is judged by the same validator and attack detector
//! as the standard game.

use crate::{
    attacks,
    bitboard::Bitboard,
    board::Board,
    color::{ByColor, Color},
    errors::{MoveRejection, PositionError, PromotionError},
    game::{Pending, Play},
    m::{Move, MoveList},
    position::{Outcome, Situation},
    role::Role,
    square::Square,
};

/// Which half-move of the current turn comes next.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Phase {
    First,
    Second,
}

/// A two-player game of the two-moves-per-turn variant.
///
/// # Examples
///
/// ```
/// use tempi::{Color, MoveRejection, Phase, Square, TwoStep};
///
/// let mut game = TwoStep::new();
/// game.play(Square::E2, Square::E4, None)?;
/// assert_eq!(game.phase(), Phase::Second);
///
/// // The e-pawn already moved this turn.
/// assert_eq!(
///     game.play(Square::E4, Square::E5, None),
///     Err(MoveRejection::SameTurnPieceReused),
/// );
///
/// game.play(Square::D2, Square::D4, None)?;
/// assert_eq!(game.turn(), Color::Black);
/// # Ok::<_, tempi::MoveRejection>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TwoStep {
    situation: Situation,
    turn: Color,
    phase: Phase,
    first_moved: Option<Square>,
    pending: Option<Pending>,
    captured: ByColor<Vec<Role>>,
    outcome: Option<Outcome>,
}

impl Default for TwoStep {
    fn default() -> TwoStep {
        TwoStep {
            situation: Situation::default(),
            turn: Color::White,
            phase: Phase::First,
            first_moved: None,
            pending: None,
            captured: ByColor::default(),
            outcome: None,
        }
    }
}

impl TwoStep {
    /// The standard starting position, White to move twice.
    pub fn new() -> TwoStep {
        TwoStep::default()
    }

    /// Starts a variant game from an arbitrary piece placement.
    pub fn from_board(board: Board, turn: Color) -> Result<TwoStep, PositionError> {
        let situation = Situation::from_board(board, turn)?;
        let outcome = situation.outcome_for(turn);
        Ok(TwoStep {
            situation,
            turn,
            phase: Phase::First,
            first_moved: None,
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

    /// Which half-move of the current turn comes next.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current square of the piece moved in the first half-move of this
    /// turn, which the second half-move may not select.
    #[inline]
    pub fn first_moved(&self) -> Option<Square> {
        self.first_moved
    }

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
    /// Empty for the piece already moved this turn, so a UI can grey it
    /// out during the second half-move.
    pub fn legal_destinations(&self, from: Square) -> Bitboard {
        if self.pending.is_some() {
            return Bitboard::EMPTY;
        }
        if self.phase == Phase::Second && self.first_moved == Some(from) {
            return Bitboard::EMPTY;
        }
        match self.situation.board.piece_at(from) {
            Some(piece) if piece.color == self.turn => self.situation.destinations(self.turn, from),
            _ => Bitboard::EMPTY,
        }
    }

    /// All legal half-moves for the player on turn.
    pub fn legal_moves(&self) -> MoveList {
        if self.pending.is_some() {
            return MoveList::new();
        }
        let mut moves = self.situation.legal_moves(self.turn);
        if self.phase == Phase::Second {
            if let Some(reused) = self.first_moved {
                moves.retain(|m| m.from() != reused);
            }
        }
        moves
    }

    /// Submits a candidate half-move for the player on turn.
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

    /// Submits a candidate half-move in raw board coordinates.
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
        if self.phase == Phase::Second && self.first_moved == Some(from) {
            return Err(MoveRejection::SameTurnPieceReused);
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

        self.finish_half(m, Some(landed(m, self.turn)));
        Play::Completed(m)
    }

    /// Supplies the promotion role for the pawn parked on the last rank.
    ///
    /// Promotion replaces the pawn with a new piece, so a piece created by
    /// a first-half-move promotion is not the first-moved piece and may be
    /// selected again in the second half-move.
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
        self.finish_half(m, None);
        Ok(m)
    }

    /// Returns to the initial position and clears all turn state.
    pub fn reset(&mut self) {
        *self = TwoStep::default();
        log::debug!("game reset");
    }

    fn finish_half(&mut self, m: Move, first_marker: Option<Square>) {
        log::debug!("{}: {}", self.turn, m);
        match self.phase {
            Phase::First => {
                self.phase = Phase::Second;
                self.first_moved = first_marker;
            }
            Phase::Second => {
                self.phase = Phase::First;
                self.first_moved = None;
                self.turn = !self.turn;
                self.outcome = self.situation.outcome_for(self.turn);
                match self.outcome {
                    Some(Outcome::Checkmate { winner }) => {
                        log::debug!("checkmate, {winner} wins")
                    }
                    Some(Outcome::Stalemate) => log::debug!("stalemate"),
                    None => (),
                }
            }
        }
    }
}

/// Square the moved piece ends up on; for castling that is the king's
/// destination, so the castled rook stays available for the second
/// half-move.
fn landed(m: Move, color: Color) -> Square {
    match m.castling_side() {
        Some(side) => Square::new(side.king_to_file(), color.backrank()),
        None => m.to(),
    }
}
