//! Error types for move application and FEN loading.

use thiserror::Error;

use crate::types::{Color, Coords};

/// Why a move request was refused. State is unchanged whenever one of these
/// is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is over, no further moves are accepted")]
    GameOver,
    #[error("invalid move {from}{to}")]
    InvalidMove { from: Coords, to: Coords },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 to 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: usize },
    #[error("invalid piece character '{0}'")]
    PieceChar(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en-passant field '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("{0} must have exactly one king")]
    KingCount(Color),
}
