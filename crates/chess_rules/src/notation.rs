use serde::{Deserialize, Serialize};

use crate::{board::Board, movegen::SafeSquares, types::*};

/// Tags describing what a move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Basic,
    Capture,
    Castling,
    Promotion,
    Check,
    CheckMate,
}

/// A played move as recorded in the game's move list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Coords,
    pub to: Coords,
    /// The mover as it left its square (a promoting pawn stays a pawn here).
    pub piece: Piece,
    /// Standard Algebraic Notation
    pub san: String,
    pub kinds: Vec<MoveKind>,
}

/// What the executor knows about a move before the board changes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MoveFacts {
    pub from: Coords,
    pub to: Coords,
    pub piece: Piece,
    pub is_capture: bool,
    pub is_castle: bool,
    pub promotion: Option<PieceKind>,
}

/// SAN without the check suffix, computed on the position before the move.
/// `safe_squares` is the mover's legal-move map, used for disambiguation.
pub(crate) fn san_body(board: &Board, safe_squares: &SafeSquares, mv: &MoveFacts) -> String {
    if mv.is_castle {
        return if mv.to.y > mv.from.y {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let mut san = String::new();
    if mv.piece.kind == PieceKind::Pawn {
        if mv.is_capture {
            san.push(mv.from.file_char());
        }
    } else {
        san.push(mv.piece.kind.letter());
        san.push_str(&disambiguation(board, safe_squares, mv));
    }

    if mv.is_capture {
        san.push('x');
    }
    san.push_str(&mv.to.to_string());

    if let Some(kind) = mv.promotion {
        san.push('=');
        san.push(kind.letter());
    }
    san
}

// File if that tells the candidates apart, else rank, else both.
fn disambiguation(board: &Board, safe_squares: &SafeSquares, mv: &MoveFacts) -> String {
    let rivals: Vec<Coords> = safe_squares
        .iter()
        .filter(|&(&from, dests)| {
            from != mv.from
                && dests.contains(&mv.to)
                && board
                    .piece_at(from)
                    .is_some_and(|pc| pc.kind == mv.piece.kind && pc.color == mv.piece.color)
        })
        .map(|(&from, _)| from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|r| r.y != mv.from.y) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|r| r.x != mv.from.x) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

pub(crate) fn move_kinds(mv: &MoveFacts, check: bool, mate: bool) -> Vec<MoveKind> {
    let mut kinds = Vec::new();
    if mv.is_capture {
        kinds.push(MoveKind::Capture);
    }
    if mv.is_castle {
        kinds.push(MoveKind::Castling);
    }
    if mv.promotion.is_some() {
        kinds.push(MoveKind::Promotion);
    }
    if mate {
        kinds.push(MoveKind::CheckMate);
    } else if check {
        kinds.push(MoveKind::Check);
    }
    if kinds.is_empty() {
        kinds.push(MoveKind::Basic);
    }
    kinds
}

/// Coordinate notation such as `e2e4` or `e7e8q`.
pub fn format_coordinate_move(from: Coords, to: Coords, promotion: Option<PieceKind>) -> String {
    let mut s = format!("{from}{to}");
    if let Some(kind) = promotion {
        s.push(kind.letter().to_ascii_lowercase());
    }
    s
}

/// Parses coordinate notation. A trailing promotion letter is optional;
/// anything unrecognised there is passed through as `None`.
pub fn parse_coordinate_move(txt: &str) -> Option<(Coords, Coords, Option<PieceKind>)> {
    let txt = txt.trim();
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = Coords::from_algebraic(&txt[0..2])?;
    let to = Coords::from_algebraic(&txt[2..4])?;
    let promo = txt.chars().nth(4).and_then(PieceKind::from_letter);
    Some((from, to, promo))
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
