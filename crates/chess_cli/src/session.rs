//! Command interpreter for the line protocol.
//!
//! One [`Session`] owns one game. Each input line is a command; the reply is
//! either text for stdout or a request to stop. Failures come back as
//! [`CommandError`] and leave the game as it was.

use chess_rules::{
    Color, Coords, FenError, GameState, MoveError, MoveOutcome, MoveRecord,
    parse_coordinate_move,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::render::render_board;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error("cannot read move '{0}', expected something like e2e4 or e7e8q")]
    MoveSyntax(String),
    #[error("invalid square '{0}'")]
    Square(String),
    #[error("no piece of the side to move on {0}")]
    NotMovable(Coords),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Session {
    game: GameState,
    config: CliConfig,
    // full-move number the move list starts at
    first_move_number: u32,
}

impl Session {
    pub fn new(config: CliConfig) -> Result<Self, FenError> {
        let game = start_position(&config)?;
        Ok(Self {
            first_move_number: game.full_move_number(),
            game,
            config,
        })
    }

    #[cfg(test)]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn handle(&mut self, line: &str) -> Result<Reply, CommandError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Ok(Reply::Text(String::new()));
        };

        let text = match cmd {
            "new" => {
                let game = start_position(&self.config)?;
                self.load(game);
                info!("new game");
                "ok".to_string()
            }
            "fen" if args.is_empty() => self.game.fen().to_string(),
            "fen" => {
                let game = GameState::from_fen(&args.join(" "))?;
                self.load(game);
                debug!(fen = %self.game.fen(), "position loaded");
                "ok".to_string()
            }
            "board" => self.board(),
            "moves" => self.moves(args.first().copied())?,
            "move" => {
                let arg = args.first().ok_or(CommandError::MissingArgument("move"))?;
                self.play(arg)?
            }
            "state" => serde_json::to_string_pretty(&self.game.snapshot())?,
            "history" => self.history(),
            "quit" => return Ok(Reply::Quit),
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Reply::Text(text))
    }

    fn load(&mut self, game: GameState) {
        self.first_move_number = game.full_move_number();
        self.game = game;
    }

    fn board(&self) -> String {
        render_board(&self.game.board_view(), self.config.unicode_pieces)
    }

    fn moves(&self, square: Option<&str>) -> Result<String, CommandError> {
        let safe = self.game.safe_squares();
        let lines: Vec<String> = match square {
            Some(sq) => {
                let from =
                    Coords::from_algebraic(sq).ok_or_else(|| CommandError::Square(sq.to_string()))?;
                safe.get(&from)
                    .map(|dests| move_line(from, dests))
                    .into_iter()
                    .collect()
            }
            None => safe.iter().map(|(&from, dests)| move_line(from, dests)).collect(),
        };

        if lines.is_empty() {
            Ok("(none)".to_string())
        } else {
            Ok(lines.join("\n"))
        }
    }

    fn play(&mut self, arg: &str) -> Result<String, CommandError> {
        let (from, to, promotion) =
            parse_coordinate_move(arg).ok_or_else(|| CommandError::MoveSyntax(arg.to_string()))?;

        let record = match self.game.play(from, to, promotion)? {
            MoveOutcome::Played(record) => record,
            MoveOutcome::Ignored => return Err(CommandError::NotMovable(from)),
        };

        let mut out = record.san;
        if let Some(message) = self.game.game_over_message() {
            out.push('\n');
            out.push_str(&message);
        }
        if self.config.show_board_after_move {
            out.push('\n');
            out.push_str(&self.board());
        }
        Ok(out)
    }

    /// Numbered SAN, e.g. `1. e4 e5 2. Nf3`.
    fn history(&self) -> String {
        format_history(self.game.move_list(), self.first_move_number)
    }
}

fn start_position(config: &CliConfig) -> Result<GameState, FenError> {
    match &config.start_fen {
        Some(fen) => GameState::from_fen(fen),
        None => Ok(GameState::new()),
    }
}

fn move_line(from: Coords, dests: &[Coords]) -> String {
    let dests: Vec<String> = dests.iter().map(Coords::to_string).collect();
    format!("{from}: {}", dests.join(" "))
}

fn format_history(moves: &[MoveRecord], first_number: u32) -> String {
    let mut out = Vec::new();
    let mut number = first_number;
    for (i, record) in moves.iter().enumerate() {
        match record.piece.color {
            Color::White => out.push(format!("{number}. {}", record.san)),
            Color::Black if i == 0 => out.push(format!("{number}... {}", record.san)),
            Color::Black => out.push(record.san.clone()),
        }
        if record.piece.color == Color::Black {
            number += 1;
        }
    }
    out.join(" ")
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
