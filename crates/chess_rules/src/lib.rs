//! Rules engine for standard chess.
//!
//! The engine keeps the authoritative position, enumerates legal moves
//! ("safe squares"), applies special moves (castling, en passant,
//! promotion), detects check, checkmate, stalemate and the draw rules
//! (insufficient material, threefold repetition, fifty-move rule), and
//! encodes the position as FEN.
//!
//! ```
//! use chess_rules::{GameState, MoveOutcome};
//!
//! let mut game = GameState::new();
//! assert_eq!(game.safe_squares().values().map(Vec::len).sum::<usize>(), 20);
//!
//! // e2 -> e4, coordinates are (row, column)
//! let played = game.make_move(1, 4, 3, 4, None).unwrap();
//! assert!(matches!(played, MoveOutcome::Played(_)));
//! assert_eq!(
//!     game.fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! ```

pub mod attacks;
pub mod board;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;

pub use attacks::{is_attacked, king_attacked};
pub use board::Board;
pub use error::{FenError, MoveError};
pub use fen::{STARTING_FEN, board_to_fen, position_key};
pub use game::{FIFTY_MOVE_PLIES, GameOutcome, GameSnapshot, GameState, MoveOutcome};
pub use movegen::{SafeSquares, compute_safe_squares};
pub use notation::{MoveKind, MoveRecord, format_coordinate_move, parse_coordinate_move};
pub use perft::perft;
pub use types::*;
