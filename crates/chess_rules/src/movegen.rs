use std::collections::BTreeMap;

use crate::{attacks::is_attacked, board::Board, types::*};

/// Legal destinations per source square for the side to move.
///
/// Squares whose piece has no legal move are absent. Destination order
/// follows the piece's movement template, then castling / en passant.
pub type SafeSquares = BTreeMap<Coords, Vec<Coords>>;

/// Compute every legal move for `side`.
/// Works on a private copy of the board, so the caller's board is never touched.
pub fn compute_safe_squares(
    board: &Board,
    side: Color,
    last_move: Option<&LastMove>,
) -> SafeSquares {
    let mut tmp = board.clone();
    let in_check = is_attacked(&tmp, side);
    let own: Vec<(Coords, Piece)> = tmp.pieces().filter(|(_, pc)| pc.color == side).collect();

    let mut safe_squares = SafeSquares::new();
    for (from, pc) in own {
        let mut out = Vec::new();
        piece_safe_squares(&mut tmp, from, pc, &mut out);

        match pc.kind {
            PieceKind::King if !in_check => {
                for king_side in [true, false] {
                    if let Some(to) = can_castle(&mut tmp, from, king_side) {
                        out.push(to);
                    }
                }
            }
            PieceKind::Pawn => {
                if let Some(to) = can_capture_en_passant(&mut tmp, from, last_move) {
                    out.push(to);
                }
            }
            _ => {}
        }

        if !out.is_empty() {
            safe_squares.insert(from, out);
        }
    }
    safe_squares
}

fn piece_safe_squares(board: &mut Board, from: Coords, pc: Piece, out: &mut Vec<Coords>) {
    for &(dx, dy) in pc.directions() {
        let Some(mut to) = from.offset(dx, dy) else {
            continue;
        };
        let target = board.piece_at(to);
        if target.is_some_and(|t| t.color == pc.color) {
            continue;
        }

        if pc.kind == PieceKind::Pawn {
            // two squares forward: both squares must be empty
            if dx.abs() == 2 {
                if target.is_some() {
                    continue;
                }
                match from.offset(dx / 2, 0) {
                    Some(between) if board.piece_at(between).is_none() => {}
                    _ => continue,
                }
            }
            // one square forward: destination must be empty
            if dx.abs() == 1 && dy == 0 && target.is_some() {
                continue;
            }
            // diagonal: only as a capture
            if dy != 0 && target.is_none() {
                continue;
            }
        }

        if !pc.kind.is_slider() {
            if is_safe_after_move(board, pc.color, from, to, None) {
                out.push(to);
            }
            continue;
        }

        loop {
            let target = board.piece_at(to);
            if target.is_some_and(|t| t.color == pc.color) {
                break;
            }
            if is_safe_after_move(board, pc.color, from, to, None) {
                out.push(to);
            }
            if target.is_some() {
                break;
            }
            match to.offset(dx, dy) {
                Some(next) => to = next,
                None => break,
            }
        }
    }
}

/// Simulate-and-revert legality test shared by every move kind: plays
/// `from -> to` (also lifting `removed`, if given) and reports whether
/// `mover`'s king is safe in the resulting position. The board is restored
/// before this returns.
pub(crate) fn is_safe_after_move(
    board: &mut Board,
    mover: Color,
    from: Coords,
    to: Coords,
    removed: Option<Coords>,
) -> bool {
    let sim = board.simulate(from, to, removed);
    !is_attacked(&sim, mover)
}

/// Castling destination for the king on `king_at`, if castling on that side
/// is currently legal. The caller has already established that the king is
/// not in check.
pub(crate) fn can_castle(board: &mut Board, king_at: Coords, king_side: bool) -> Option<Coords> {
    let king = board.piece_at(king_at)?;
    if king.kind != PieceKind::King || king.has_moved() {
        return None;
    }
    let row = king.color.back_row();
    if king_at != (Coords { x: row, y: 4 }) {
        return None;
    }

    let rook_at = Coords {
        x: row,
        y: if king_side { 7 } else { 0 },
    };
    match board.piece_at(rook_at) {
        Some(rook)
            if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved() => {}
        _ => return None,
    }

    let step: i8 = if king_side { 1 } else { -1 };
    let transit = king_at.offset(0, step)?;
    let dest = king_at.offset(0, 2 * step)?;
    if board.piece_at(transit).is_some() || board.piece_at(dest).is_some() {
        return None;
    }
    // the queen-side rook also crosses b1 / b8
    if !king_side && board.piece_at(Coords { x: row, y: 1 }).is_some() {
        return None;
    }

    let safe = is_safe_after_move(board, king.color, king_at, transit, None)
        && is_safe_after_move(board, king.color, king_at, dest, None);
    safe.then_some(dest)
}

/// En-passant destination for the pawn on `pawn_at`, if the previous move
/// was an adjacent opposing pawn's two-square advance and taking it leaves
/// the capturing side's king safe.
pub(crate) fn can_capture_en_passant(
    board: &mut Board,
    pawn_at: Coords,
    last_move: Option<&LastMove>,
) -> Option<Coords> {
    let last = last_move?;
    let pawn = board.piece_at(pawn_at)?;
    if pawn.kind != PieceKind::Pawn
        || last.piece.color == pawn.color
        || !last.is_double_pawn_push()
        || last.to.x != pawn_at.x
        || last.to.y.abs_diff(pawn_at.y) != 1
    {
        return None;
    }
    // the pushed pawn must still be standing where it landed
    if board.piece_at(last.to) != Some(last.piece) {
        return None;
    }

    let dest = Coords::new(pawn_at.x as i8 + pawn.color.forward(), last.to.y as i8)?;
    if board.piece_at(dest).is_some() {
        return None;
    }
    is_safe_after_move(board, pawn.color, pawn_at, dest, Some(last.to)).then_some(dest)
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
