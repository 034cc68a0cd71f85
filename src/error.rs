use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN needs at least 4 fields, got {0}")]
    MissingFields(usize),
    #[error("invalid piece placement character '{0}'")]
    InvalidPieceChar(char),
    #[error("rank {rank} describes {files} files")]
    InvalidRankWidth { rank: usize, files: usize },
    #[error("piece placement has {0} ranks, expected 8")]
    InvalidRankCount(usize),
    #[error("invalid side to move '{0}', expected 'w' or 'b'")]
    InvalidSide(String),
    #[error("invalid castling character '{0}'")]
    InvalidCastlingChar(char),
    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),
    #[error("{0} king missing or duplicated")]
    BadKingCount(&'static str),
    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(String),
    #[error("{0} has more material than promotions allow")]
    TooMuchMaterial(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("unknown position '{0}'")]
    UnknownPosition(String),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("move '{0}' is not legal here")]
    IllegalMove(String),
    #[error("invalid value '{value}' for '{name}'")]
    BadNumber { name: &'static str, value: String },
}
