//! Game state and the move executor.
//!
//! [`GameState`] owns the board and everything derived from it. The only way
//! to change it is [`GameState::make_move`], which validates the request
//! against the current legal-move map and then performs the whole
//! transition: special-move side effects, counters, check state, the next
//! legal-move map, FEN, repetition bookkeeping and game-over detection.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::{
    attacks::king_attacked,
    board::Board,
    error::{FenError, MoveError},
    fen::{board_to_fen, parse_fen, position_key},
    movegen::{SafeSquares, compute_safe_squares},
    notation::{MoveFacts, MoveRecord, move_kinds, san_body},
    types::*,
};

/// Plies without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "Checkmate! {winner} wins"),
            GameOutcome::Stalemate => write!(f, "Stalemate"),
            GameOutcome::InsufficientMaterial => write!(f, "Draw due to insufficient material"),
            GameOutcome::ThreefoldRepetition => write!(f, "Draw due to threefold repetition"),
            GameOutcome::FiftyMoveRule => write!(f, "Draw due to fifty move rule"),
        }
    }
}

/// Result of a move request that was not refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Out-of-bounds coordinates, an empty square or an opponent's piece.
    /// Nothing changed.
    Ignored,
    Played(MoveRecord),
}

/// Serializable read-only view of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[Option<char>; 8]; 8],
    pub player_color: Color,
    pub safe_squares: Vec<(Coords, Vec<Coords>)>,
    pub check_state: CheckState,
    pub last_move: Option<LastMove>,
    pub is_game_over: bool,
    pub game_over_message: Option<String>,
    pub fen: String,
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    player_color: Color,
    safe_squares: SafeSquares,
    last_move: Option<LastMove>,
    check_state: CheckState,
    /// Plies since the last capture or pawn move
    half_move_clock: u32,
    full_move_number: u32,
    /// Position key -> occurrences, saturating at 3
    repetitions: HashMap<String, u8>,
    outcome: Option<GameOutcome>,
    fen: String,
    move_list: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for GameState {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl GameState {
    /// A new game from the standard initial position.
    pub fn new() -> Self {
        Self::from_parts(Board::startpos(), Color::White, None, 0, 1)
    }

    /// Set up a game from a FEN string. Castling rights, pawn rows and the
    /// en-passant field are turned back into "has moved" flags and a last move.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = parse_fen(fen)?;
        Ok(Self::from_parts(
            parsed.board,
            parsed.side_to_move,
            parsed.last_move,
            parsed.half_move_clock,
            parsed.full_move_number,
        ))
    }

    fn from_parts(
        board: Board,
        player_color: Color,
        last_move: Option<LastMove>,
        half_move_clock: u32,
        full_move_number: u32,
    ) -> Self {
        let mut game = GameState {
            board,
            player_color,
            safe_squares: SafeSquares::new(),
            last_move,
            check_state: CheckState::NotInCheck,
            half_move_clock,
            full_move_number,
            repetitions: HashMap::new(),
            outcome: None,
            fen: String::new(),
            move_list: Vec::new(),
        };
        game.refresh();
        game.outcome = game.evaluate_outcome();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Notation characters per square, `[row][column]`.
    pub fn board_view(&self) -> [[Option<char>; 8]; 8] {
        self.board.view()
    }

    /// Side to move.
    pub fn player_color(&self) -> Color {
        self.player_color
    }

    pub fn safe_squares(&self) -> &SafeSquares {
        &self.safe_squares
    }

    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn game_over_message(&self) -> Option<String> {
        self.outcome.map(|o| o.to_string())
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// Plies since the last capture or pawn move.
    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    pub fn full_move_number(&self) -> u32 {
        self.full_move_number
    }

    pub fn move_list(&self) -> &[MoveRecord] {
        &self.move_list
    }

    /// How often the current position (board, side, castling, en passant)
    /// has occurred, counting up to 3.
    pub fn repetition_count(&self) -> u8 {
        self.repetitions
            .get(&position_key(&self.fen))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.half_move_clock >= FIFTY_MOVE_PLIES
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board_view(),
            player_color: self.player_color,
            safe_squares: self
                .safe_squares
                .iter()
                .map(|(from, dests)| (*from, dests.clone()))
                .collect(),
            check_state: self.check_state,
            last_move: self.last_move,
            is_game_over: self.is_game_over(),
            game_over_message: self.game_over_message(),
            fen: self.fen.clone(),
        }
    }

    /// Apply a move for the side to move.
    ///
    /// Out-of-bounds coordinates, an empty source square or an opponent's
    /// piece are ignored. A destination outside the piece's legal list, or
    /// any request after the game has ended, is refused. Either way the
    /// state is untouched unless the move is played.
    ///
    /// `promotion` only matters for a pawn reaching the last row; anything
    /// other than knight, bishop or rook (including `None`) gives a queen.
    pub fn make_move(
        &mut self,
        prev_x: i8,
        prev_y: i8,
        new_x: i8,
        new_y: i8,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, MoveError> {
        if let Some(outcome) = self.outcome {
            warn!(%outcome, "move requested after the game ended");
            return Err(MoveError::GameOver);
        }

        let (Some(from), Some(to)) = (Coords::new(prev_x, prev_y), Coords::new(new_x, new_y))
        else {
            trace!(prev_x, prev_y, new_x, new_y, "ignoring out-of-bounds move");
            return Ok(MoveOutcome::Ignored);
        };
        let Some(piece) = self.board.piece_at(from) else {
            trace!(%from, "ignoring move from an empty square");
            return Ok(MoveOutcome::Ignored);
        };
        if piece.color != self.player_color {
            trace!(%from, color = %piece.color, "ignoring move of the opponent's piece");
            return Ok(MoveOutcome::Ignored);
        }

        let legal = self
            .safe_squares
            .get(&from)
            .is_some_and(|dests| dests.contains(&to));
        if !legal {
            warn!(%from, %to, "rejected illegal move");
            return Err(MoveError::InvalidMove { from, to });
        }

        Ok(MoveOutcome::Played(self.apply(from, to, piece, promotion)))
    }

    /// [`GameState::make_move`] taking board coordinates.
    pub fn play(
        &mut self,
        from: Coords,
        to: Coords,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, MoveError> {
        self.make_move(
            from.x as i8,
            from.y as i8,
            to.x as i8,
            to.y as i8,
            promotion,
        )
    }

    // Every precondition has been checked; from here on the move happens.
    fn apply(
        &mut self,
        from: Coords,
        to: Coords,
        mut piece: Piece,
        promotion: Option<PieceKind>,
    ) -> MoveRecord {
        let target = self.board.piece_at(to);
        let is_castle = piece.kind == PieceKind::King && from.y.abs_diff(to.y) == 2;
        let is_en_passant = piece.kind == PieceKind::Pawn && from.y != to.y && target.is_none();
        let promoted = (piece.kind == PieceKind::Pawn && to.x == piece.color.promotion_row())
            .then(|| PieceKind::promotion_or_queen(promotion));

        let facts = MoveFacts {
            from,
            to,
            piece,
            is_capture: target.is_some() || is_en_passant,
            is_castle,
            promotion: promoted,
        };
        let san = san_body(&self.board, &self.safe_squares, &facts);

        piece.mark_moved();

        self.half_move_clock = if piece.kind == PieceKind::Pawn || facts.is_capture {
            0
        } else {
            self.half_move_clock.saturating_add(1)
        };

        if is_castle {
            let king_side = to.y > from.y;
            let rook_from = Coords {
                x: from.x,
                y: if king_side { 7 } else { 0 },
            };
            let rook_to = Coords {
                x: from.x,
                y: if king_side { 5 } else { 3 },
            };
            if let Some(mut rook) = self.board.take(rook_from) {
                rook.mark_moved();
                self.board.set_piece(rook_to, Some(rook));
            }
        }
        if is_en_passant {
            self.board.take(Coords { x: from.x, y: to.y });
        }

        let placed = match promoted {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };
        self.board.set_piece(from, None);
        self.board.set_piece(to, Some(placed));

        self.last_move = Some(LastMove { from, to, piece });
        if self.player_color == Color::Black {
            self.full_move_number = self.full_move_number.saturating_add(1);
        }
        self.player_color = self.player_color.other();

        self.refresh();
        self.outcome = self.evaluate_outcome();

        let check = self.check_state.is_in_check();
        let mate = check && self.safe_squares.is_empty();
        let suffix = if mate {
            "#"
        } else if check {
            "+"
        } else {
            ""
        };
        let record = MoveRecord {
            from,
            to,
            piece,
            san: format!("{san}{suffix}"),
            kinds: move_kinds(&facts, check, mate),
        };
        self.move_list.push(record.clone());

        debug!(san = %record.san, fen = %self.fen, "move applied");
        if let Some(outcome) = self.outcome {
            info!(%outcome, "game over");
        }
        record
    }

    /// Recompute everything derived from the board for the side to move and
    /// count the resulting position.
    fn refresh(&mut self) {
        self.check_state = CheckState::from(king_attacked(&self.board, self.player_color));
        self.safe_squares =
            compute_safe_squares(&self.board, self.player_color, self.last_move.as_ref());
        self.fen = board_to_fen(
            &self.board,
            self.player_color,
            self.last_move.as_ref(),
            self.half_move_clock,
            self.full_move_number,
        );
        let seen = self.repetitions.entry(position_key(&self.fen)).or_insert(0);
        *seen = (*seen + 1).min(3);
    }

    fn evaluate_outcome(&self) -> Option<GameOutcome> {
        if self.board.is_insufficient_material() {
            return Some(GameOutcome::InsufficientMaterial);
        }
        if self.safe_squares.is_empty() {
            return Some(if self.check_state.is_in_check() {
                GameOutcome::Checkmate {
                    winner: self.player_color.other(),
                }
            } else {
                GameOutcome::Stalemate
            });
        }
        if self.repetition_count() >= 3 {
            return Some(GameOutcome::ThreefoldRepetition);
        }
        if self.is_fifty_move_draw() {
            return Some(GameOutcome::FiftyMoveRule);
        }
        None
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
