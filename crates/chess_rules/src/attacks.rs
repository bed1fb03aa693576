//! Attack detection.
//!
//! A king is attacked when some opposing piece reaches its square through
//! the piece's own movement template:
//! - Kings and knights test exactly one square per direction
//! - Pawns test only their two diagonal vectors
//! - Bishops, rooks and queens walk each ray up to the first occupied square

use crate::board::Board;
use crate::types::*;

/// Coordinate of `color`'s king if any opposing piece attacks it.
///
/// Stops at the first attacker found.
pub fn king_attacked(board: &Board, color: Color) -> Option<Coords> {
    for (from, pc) in board.pieces() {
        if pc.color == color {
            continue;
        }

        for &(dx, dy) in pc.directions() {
            if pc.kind.is_slider() {
                let mut next = from.offset(dx, dy);
                while let Some(sq) = next {
                    if let Some(target) = board.piece_at(sq) {
                        if is_king_of(target, color) {
                            return Some(sq);
                        }
                        break;
                    }
                    next = sq.offset(dx, dy);
                }
            } else {
                // Pawns never capture straight ahead
                if pc.kind == PieceKind::Pawn && dy == 0 {
                    continue;
                }
                if let Some(sq) = from.offset(dx, dy)
                    && let Some(target) = board.piece_at(sq)
                    && is_king_of(target, color)
                {
                    return Some(sq);
                }
            }
        }
    }
    None
}

/// Whether `color`'s king is currently attacked.
#[inline]
pub fn is_attacked(board: &Board, color: Color) -> bool {
    king_attacked(board, color).is_some()
}

#[inline]
fn is_king_of(pc: Piece, color: Color) -> bool {
    pc.kind == PieceKind::King && pc.color == color
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
