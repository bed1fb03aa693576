use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    /// Row holding this side's king and rooks at the start of the game.
    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
    /// Row a pawn of this colour promotes on.
    pub fn promotion_row(self) -> u8 {
        self.other().back_row()
    }
    /// Row delta of a single forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

// Movement templates as (row delta, column delta).
const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];
const WHITE_PAWN_START: [(i8, i8); 4] = [(1, 0), (2, 0), (1, 1), (1, -1)];
const WHITE_PAWN: [(i8, i8); 3] = [(1, 0), (1, 1), (1, -1)];
const BLACK_PAWN_START: [(i8, i8); 4] = [(-1, 0), (-2, 0), (-1, 1), (-1, -1)];
const BLACK_PAWN: [(i8, i8); 3] = [(-1, 0), (-1, 1), (-1, -1)];

impl PieceKind {
    /// Bishops, rooks and queens repeat their direction vectors until blocked.
    pub fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Only these kinds remember whether they have left their starting square.
    pub fn tracks_moves(self) -> bool {
        matches!(self, PieceKind::King | PieceKind::Rook | PieceKind::Pawn)
    }

    /// Upper-case notation letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Kind a pawn turns into for a requested promotion.
    /// Anything other than knight, bishop, rook or queen falls back to a queen.
    pub fn promotion_or_queen(choice: Option<PieceKind>) -> PieceKind {
        match choice {
            Some(kind @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook)) => kind,
            _ => PieceKind::Queen,
        }
    }
}

/// A piece as it stands on the board.
///
/// `has_moved` is only meaningful for kings, rooks and pawns and can only ever
/// go from `false` to `true` (see [`Piece::mark_moved`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }

    pub(crate) fn moved(color: Color, kind: PieceKind) -> Self {
        let mut piece = Self::new(color, kind);
        piece.mark_moved();
        piece
    }

    pub fn has_moved(self) -> bool {
        self.has_moved
    }

    /// Flag a king, rook or pawn as having moved. No-op for other kinds.
    pub fn mark_moved(&mut self) {
        if self.kind.tracks_moves() {
            self.has_moved = true;
        }
    }

    /// FEN character: upper-case for White, lower-case for Black.
    pub fn fen_char(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }

    /// Movement template. Pawns point towards the opponent and drop the
    /// two-square advance once they have moved.
    pub fn directions(self) -> &'static [(i8, i8)] {
        match self.kind {
            PieceKind::King | PieceKind::Queen => &ALL_DIRECTIONS,
            PieceKind::Rook => &ORTHOGONAL,
            PieceKind::Bishop => &DIAGONAL,
            PieceKind::Knight => &KNIGHT_JUMPS,
            PieceKind::Pawn => match (self.color, self.has_moved) {
                (Color::White, false) => &WHITE_PAWN_START,
                (Color::White, true) => &WHITE_PAWN,
                (Color::Black, false) => &BLACK_PAWN_START,
                (Color::Black, true) => &BLACK_PAWN,
            },
        }
    }
}

/// Board coordinate: `x` is the row (0 = White's back rank), `y` the column
/// (0 = the a-file).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coords {
    pub x: u8,
    pub y: u8,
}

impl Coords {
    /// Returns `None` unless both components are in `0..8`.
    pub fn new(x: i8, y: i8) -> Option<Coords> {
        if (0..8).contains(&x) && (0..8).contains(&y) {
            Some(Coords {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    pub fn offset(self, dx: i8, dy: i8) -> Option<Coords> {
        Coords::new(self.x as i8 + dx, self.y as i8 + dy)
    }

    pub fn is_dark(self) -> bool {
        is_square_dark(self.x, self.y)
    }

    pub fn file_char(self) -> char {
        (b'a' + self.y) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.x) as char
    }

    /// Parses algebraic coordinates such as `e4`.
    pub fn from_algebraic(s: &str) -> Option<Coords> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return None;
        }
        let (f, r) = (b[0], b[1]);
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return None;
        }
        Some(Coords {
            x: r - b'1',
            y: f - b'a',
        })
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// Square colour classifier; a1 is dark.
pub fn is_square_dark(x: u8, y: u8) -> bool {
    (x + y) % 2 == 0
}

/// Whether the side to move is in check, and where its king stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckState {
    #[default]
    NotInCheck,
    InCheck {
        king: Coords,
    },
}

impl CheckState {
    pub fn is_in_check(self) -> bool {
        matches!(self, CheckState::InCheck { .. })
    }
}

impl From<Option<Coords>> for CheckState {
    fn from(king: Option<Coords>) -> Self {
        match king {
            Some(king) => CheckState::InCheck { king },
            None => CheckState::NotInCheck,
        }
    }
}

/// The most recent move. `piece` is the mover as it left its source square,
/// so a promoting pawn is still recorded as a pawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub from: Coords,
    pub to: Coords,
    pub piece: Piece,
}

impl LastMove {
    /// True for a pawn that just advanced two rows.
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.x.abs_diff(self.to.x) == 2
    }
}
