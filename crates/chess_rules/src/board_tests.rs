use super::*;

fn at(s: &str) -> Coords {
    Coords::from_algebraic(s).unwrap()
}

fn board_with(pieces: &[(&str, Color, PieceKind)]) -> Board {
    let mut b = Board::empty();
    for &(sq, color, kind) in pieces {
        b.set_piece(at(sq), Some(Piece::new(color, kind)));
    }
    b
}

#[test]
fn test_startpos_layout() {
    let b = Board::startpos();
    assert_eq!(b.pieces().count(), 32);
    assert_eq!(b.king_coords(Color::White), Some(at("e1")));
    assert_eq!(b.king_coords(Color::Black), Some(at("e8")));

    let view = b.view();
    assert_eq!(view[0][3], Some('Q'));
    assert_eq!(view[7][3], Some('q'));
    assert_eq!(view[1][0], Some('P'));
    assert_eq!(view[4][4], None);
}

#[test]
fn test_simulation_restores_capture() {
    let mut b = Board::startpos();
    b.set_piece(at("e6"), Some(Piece::new(Color::White, PieceKind::Knight)));
    let before = b.clone();

    {
        let sim = b.simulate(at("d7"), at("e6"), None);
        assert_eq!(sim.piece_at(at("d7")), None);
        assert_eq!(
            sim.piece_at(at("e6")),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
    }

    assert_eq!(b, before);
}

#[test]
fn test_simulation_restores_en_passant_victim() {
    let mut b = board_with(&[
        ("e5", Color::White, PieceKind::Pawn),
        ("d5", Color::Black, PieceKind::Pawn),
    ]);
    let before = b.clone();

    {
        let sim = b.simulate(at("e5"), at("d6"), Some(at("d5")));
        assert_eq!(sim.piece_at(at("d5")), None);
        assert_eq!(sim.piece_at(at("e5")), None);
        assert!(sim.piece_at(at("d6")).is_some());
    }

    assert_eq!(b, before);
}

#[test]
fn test_square_colours() {
    assert!(at("a1").is_dark());
    assert!(!at("h1").is_dark());
    assert!(at("h8").is_dark());
    assert!(!is_square_dark(0, 1));
}

#[test]
fn test_insufficient_material_lone_kings() {
    let b = board_with(&[
        ("e1", Color::White, PieceKind::King),
        ("e8", Color::Black, PieceKind::King),
    ]);
    assert!(b.is_insufficient_material());
}

#[test]
fn test_insufficient_material_two_knights() {
    let b = board_with(&[
        ("e1", Color::White, PieceKind::King),
        ("b1", Color::White, PieceKind::Knight),
        ("g1", Color::White, PieceKind::Knight),
        ("e8", Color::Black, PieceKind::King),
    ]);
    assert!(b.is_insufficient_material());
}

#[test]
fn test_insufficient_material_bishops_one_side() {
    // c1 and e3 are both dark
    let same = board_with(&[
        ("e1", Color::White, PieceKind::King),
        ("c1", Color::White, PieceKind::Bishop),
        ("e3", Color::White, PieceKind::Bishop),
        ("e8", Color::Black, PieceKind::King),
    ]);
    assert!(same.is_insufficient_material());

    let mixed = board_with(&[
        ("e1", Color::White, PieceKind::King),
        ("c1", Color::White, PieceKind::Bishop),
        ("f1", Color::White, PieceKind::Bishop),
        ("e8", Color::Black, PieceKind::King),
    ]);
    assert!(!mixed.is_insufficient_material());
}

#[test]
fn test_sufficient_material_minor_each() {
    let b = board_with(&[
        ("e1", Color::White, PieceKind::King),
        ("c1", Color::White, PieceKind::Bishop),
        ("e8", Color::Black, PieceKind::King),
        ("b8", Color::Black, PieceKind::Knight),
    ]);
    assert!(!b.is_insufficient_material());
}
