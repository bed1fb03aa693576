//! Forsyth-Edwards Notation.
//!
//! Encoding is used both for display and, through [`position_key`], as the
//! threefold-repetition key. Decoding rebuilds the per-piece "has moved"
//! flags from the castling field and pawn rows, and turns an en-passant
//! field back into the two-square advance that produced it.

use crate::{board::Board, error::FenError, types::*};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Full six-field FEN. `half_move_clock` is in plies.
pub fn board_to_fen(
    board: &Board,
    side_to_move: Color,
    last_move: Option<&LastMove>,
    half_move_clock: u32,
    full_move_number: u32,
) -> String {
    let mut fen = String::with_capacity(90);

    for x in (0..8u8).rev() {
        let mut empty = 0u32;
        for y in 0..8u8 {
            match board.piece_at(Coords { x, y }) {
                None => empty += 1,
                Some(pc) => {
                    if empty != 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(pc.fen_char());
                }
            }
        }
        if empty != 0 {
            fen.push_str(&empty.to_string());
        }
        if x != 0 {
            fen.push('/');
        }
    }

    let side = match side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let en_passant = en_passant_target(last_move)
        .map(|sq| sq.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{fen} {side} {} {en_passant} {half_move_clock} {full_move_number}",
        castling_availability(board)
    )
}

/// `KQkq` subset, or `-`. A right needs the unmoved king on e1/e8 and the
/// unmoved rook of the same colour on the matching corner.
pub fn castling_availability(board: &Board) -> String {
    let mut rights = String::new();
    for color in [Color::White, Color::Black] {
        let row = color.back_row();
        let king_home = board
            .piece_at(Coords { x: row, y: 4 })
            .is_some_and(|k| k.kind == PieceKind::King && k.color == color && !k.has_moved());
        if !king_home {
            continue;
        }
        for (col, letter) in [(7, 'K'), (0, 'Q')] {
            let rook_home = board.piece_at(Coords { x: row, y: col }).is_some_and(|r| {
                r.kind == PieceKind::Rook && r.color == color && !r.has_moved()
            });
            if rook_home {
                rights.push(match color {
                    Color::White => letter,
                    Color::Black => letter.to_ascii_lowercase(),
                });
            }
        }
    }
    if rights.is_empty() {
        rights.push('-');
    }
    rights
}

/// Square passed over by a pawn that just advanced two rows.
pub fn en_passant_target(last_move: Option<&LastMove>) -> Option<Coords> {
    let last = last_move?;
    if !last.is_double_pawn_push() {
        return None;
    }
    Some(Coords {
        x: (last.from.x + last.to.x) / 2,
        y: last.from.y,
    })
}

/// Board, side, castling and en-passant fields; move counters are dropped.
pub fn position_key(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

/// A decoded FEN, ready to seed a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParsedFen {
    pub board: Board,
    pub side_to_move: Color,
    pub last_move: Option<LastMove>,
    pub half_move_clock: u32,
    pub full_move_number: u32,
}

pub(crate) fn parse_fen(fen: &str) -> Result<ParsedFen, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&parts.len()) {
        return Err(FenError::FieldCount(parts.len()));
    }

    let mut board = parse_placement(parts[0])?;

    let side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::SideToMove(other.to_string())),
    };

    let castling = parts[2];
    if castling != "-" {
        let mut seen = String::new();
        for c in castling.chars() {
            if !"KQkq".contains(c) || seen.contains(c) {
                return Err(FenError::Castling(castling.to_string()));
            }
            seen.push(c);
        }
    }

    for color in [Color::White, Color::Black] {
        let kings = board
            .pieces()
            .filter(|(_, pc)| pc.color == color && pc.kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(FenError::KingCount(color));
        }
    }

    restore_moved_flags(&mut board, castling);

    let last_move = match parts[3] {
        "-" => None,
        ep => Some(
            implied_double_push(&board, side_to_move, ep)
                .ok_or_else(|| FenError::EnPassant(ep.to_string()))?,
        ),
    };

    let half_move_clock = parse_counter(parts.get(4).copied().unwrap_or("0"))?;
    let full_move_number = parse_counter(parts.get(5).copied().unwrap_or("1"))?;

    Ok(ParsedFen {
        board,
        side_to_move,
        last_move,
        half_move_clock,
        full_move_number,
    })
}

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (idx, rank_str) in ranks.iter().enumerate() {
        // FEN lists rank 8 first
        let x = 7 - idx as u8;
        let width_err = FenError::RankWidth { rank: 8 - idx };
        let mut y: u8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                if d == 0 {
                    return Err(width_err);
                }
                y += d as u8;
            } else {
                let pc = Piece::from_fen_char(ch).ok_or(FenError::PieceChar(ch))?;
                if y >= 8 {
                    return Err(width_err);
                }
                board.set_piece(Coords { x, y }, Some(pc));
                y += 1;
            }
            if y > 8 {
                return Err(width_err);
            }
        }
        if y != 8 {
            return Err(width_err);
        }
    }
    Ok(board)
}

/// Kings and rooks count as unmoved only when the castling field still
/// grants them a right; pawns only while on their starting row.
fn restore_moved_flags(board: &mut Board, castling: &str) {
    let pieces: Vec<(Coords, Piece)> = board.pieces().collect();
    for (at, pc) in pieces {
        let row = pc.color.back_row();
        let (king_side, queen_side) = match pc.color {
            Color::White => ('K', 'Q'),
            Color::Black => ('k', 'q'),
        };
        let unmoved = match pc.kind {
            PieceKind::Pawn => at.x as i8 == row as i8 + pc.color.forward(),
            PieceKind::King => {
                at == Coords { x: row, y: 4 }
                    && (castling.contains(king_side) || castling.contains(queen_side))
            }
            PieceKind::Rook => {
                (at == Coords { x: row, y: 7 } && castling.contains(king_side))
                    || (at == Coords { x: row, y: 0 } && castling.contains(queen_side))
            }
            _ => true,
        };
        if !unmoved {
            board.set_piece(at, Some(Piece::moved(pc.color, pc.kind)));
        }
    }
}

/// Rebuild the two-square pawn advance an en-passant field refers to.
fn implied_double_push(board: &Board, side_to_move: Color, ep: &str) -> Option<LastMove> {
    let target = Coords::from_algebraic(ep)?;
    let mover = side_to_move.other();
    let forward = mover.forward();
    let expected_row = mover.back_row() as i8 + 2 * forward;
    if target.x as i8 != expected_row {
        return None;
    }

    let from = target.offset(-forward, 0)?;
    let to = target.offset(forward, 0)?;
    let piece = board.piece_at(to)?;
    if piece.kind != PieceKind::Pawn
        || piece.color != mover
        || board.piece_at(from).is_some()
        || board.piece_at(target).is_some()
    {
        return None;
    }
    Some(LastMove { from, to, piece })
}

fn parse_counter(s: &str) -> Result<u32, FenError> {
    s.parse().map_err(|_| FenError::Counter(s.to_string()))
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
