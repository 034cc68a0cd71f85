// Bitboard engine core: move generation, make/unmake, alpha-beta search
pub mod board;
pub mod error;
pub mod perft;
pub mod search;
pub mod uci;

pub use board::{Move, Position};
pub use error::{FenError, UciError};
