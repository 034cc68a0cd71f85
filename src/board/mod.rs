//! Board representation: bitboards, magic attack tables, move encoding,
//! pseudo-legal generation and reversible make/unmake.

pub mod attacks;
pub mod bitboard;
pub mod fen;
pub mod magics;
pub mod makemove;
pub mod movegen;
pub mod moves;
pub mod position;
pub mod types;

pub use bitboard::Bitboard;
pub use moves::{Move, MoveFlags, MoveList, MAX_MOVES};
pub use position::{named_fen, Position};
pub use types::{CastleRights, Color, Piece, Square};
