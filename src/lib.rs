//! A library for two-player chess rules and game state, built to sit
//! behind a UI layer: it judges move legality, tracks turns and game end,
//! and reports every rule violation as a typed rejection.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use tempi::Chess;
//!
//! let game = Chess::new();
//! assert_eq!(game.legal_moves().len(), 20);
//! ```
//!
//! Play moves and watch for game end:
//!
//! ```
//! use tempi::{Chess, MoveRejection, Square};
//!
//! let mut game = Chess::new();
//! game.play(Square::E2, Square::E4, None)?;
//!
//! // Rule violations are typed rejections, never faults.
//! assert_eq!(
//!     game.play(Square::D2, Square::D4, None).unwrap_err(),
//!     MoveRejection::WrongTurn,
//! );
//!
//! game.play(Square::E7, Square::E5, None)?;
//! assert!(game.outcome().is_none());
//! # Ok::<_, tempi::MoveRejection>(())
//! ```
//!
//! The two-moves-per-turn variant wraps the same rules:
//!
//! ```
//! use tempi::{Color, Square, TwoStep};
//!
//! let mut game = TwoStep::new();
//! game.play(Square::E2, Square::E4, None)?;
//! game.play(Square::D2, Square::D4, None)?;
//! assert_eq!(game.turn(), Color::Black);
//! # Ok::<_, tempi::MoveRejection>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod castling_side;
mod color;
mod errors;
mod game;
mod m;
mod position;
mod role;
mod square;
mod types;
mod variant;

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod movement;

pub use bitboard::Bitboard;
pub use board::Board;
pub use castling_side::CastlingSide;
pub use color::{ByColor, Color};
pub use errors::{MoveRejection, PositionError, PositionErrorKinds, PromotionError};
pub use game::{Chess, Play};
pub use m::{Move, MoveList};
pub use position::Outcome;
pub use role::Role;
pub use square::{distance, Square};
pub use types::Piece;
pub use variant::{Phase, TwoStep};
