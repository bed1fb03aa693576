use std::ops::Deref;

use crate::types::*;

/// 8×8 grid of optional pieces, indexed `[row][column]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();

        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            b.squares[0][col] = Some(Piece::new(Color::White, kind));
            b.squares[7][col] = Some(Piece::new(Color::Black, kind));
        }
        // Pawns
        for col in 0..8 {
            b.squares[1][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            b.squares[6][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        b
    }

    pub fn piece_at(&self, at: Coords) -> Option<Piece> {
        self.squares[at.x as usize][at.y as usize]
    }

    pub(crate) fn set_piece(&mut self, at: Coords, pc: Option<Piece>) {
        self.squares[at.x as usize][at.y as usize] = pc;
    }

    pub(crate) fn take(&mut self, at: Coords) -> Option<Piece> {
        self.squares[at.x as usize][at.y as usize].take()
    }

    /// Occupied squares in row-major order, starting at a1.
    pub fn pieces(&self) -> impl Iterator<Item = (Coords, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(x, row)| {
            row.iter().enumerate().filter_map(move |(y, sq)| {
                sq.map(|pc| {
                    (
                        Coords {
                            x: x as u8,
                            y: y as u8,
                        },
                        pc,
                    )
                })
            })
        })
    }

    pub fn king_coords(&self, c: Color) -> Option<Coords> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(at, _)| at)
    }

    /// Notation characters per square, `[row][column]`; colour is the case.
    pub fn view(&self) -> [[Option<char>; 8]; 8] {
        self.squares.map(|row| row.map(|sq| sq.map(Piece::fen_char)))
    }

    /// Material from which neither side can deliver mate:
    /// K v K, K+minor v K, K+N+N v K, and kings with bishops that all stand on
    /// one square colour (one side or both).
    pub fn is_insufficient_material(&self) -> bool {
        let mut white = Vec::new();
        let mut black = Vec::new();
        for (at, pc) in self.pieces() {
            if pc.kind == PieceKind::King {
                continue;
            }
            match pc.color {
                Color::White => white.push((at, pc.kind)),
                Color::Black => black.push((at, pc.kind)),
            }
        }

        match (white.as_slice(), black.as_slice()) {
            ([], []) => true,
            ([(_, kind)], []) | ([], [(_, kind)]) => {
                matches!(kind, PieceKind::Bishop | PieceKind::Knight)
            }
            (side, []) | ([], side) => {
                only_two_knights(side) || bishops_on_one_colour(side.iter())
            }
            (w, b) => bishops_on_one_colour(w.iter().chain(b.iter())),
        }
    }

    /// Speculatively moves the piece on `from` to `to`, optionally emptying
    /// `removed` as well (the pawn taken en passant). The returned guard
    /// derefs to the simulated board and puts every touched square back when
    /// dropped.
    pub(crate) fn simulate(
        &mut self,
        from: Coords,
        to: Coords,
        removed: Option<Coords>,
    ) -> Simulation<'_> {
        let mut saved = [(from, self.piece_at(from)); 3];
        saved[1] = (to, self.piece_at(to));
        let mut len = 2;
        if let Some(r) = removed {
            saved[2] = (r, self.take(r));
            len = 3;
        }

        let mover = self.take(from);
        self.set_piece(to, mover);

        Simulation {
            board: self,
            saved,
            len,
        }
    }
}

fn only_two_knights(pieces: &[(Coords, PieceKind)]) -> bool {
    pieces.len() == 2 && pieces.iter().all(|(_, k)| *k == PieceKind::Knight)
}

fn bishops_on_one_colour<'a>(mut pieces: impl Iterator<Item = &'a (Coords, PieceKind)>) -> bool {
    let Some(&(first, PieceKind::Bishop)) = pieces.next() else {
        return false;
    };
    let dark = first.is_dark();
    pieces.all(|&(at, kind)| kind == PieceKind::Bishop && at.is_dark() == dark)
}

/// Scoped in-place mutation created by [`Board::simulate`].
pub(crate) struct Simulation<'a> {
    board: &'a mut Board,
    saved: [(Coords, Option<Piece>); 3],
    len: usize,
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        for &(at, pc) in self.saved[..self.len].iter().rev() {
            self.board.set_piece(at, pc);
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
