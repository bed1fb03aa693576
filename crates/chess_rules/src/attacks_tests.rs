use super::*;

fn at(s: &str) -> Coords {
    Coords::from_algebraic(s).unwrap()
}

fn kings_plus(extra: &[(&str, Color, PieceKind)]) -> Board {
    let mut b = Board::empty();
    b.set_piece(at("e1"), Some(Piece::new(Color::White, PieceKind::King)));
    b.set_piece(at("e8"), Some(Piece::new(Color::Black, PieceKind::King)));
    for &(sq, color, kind) in extra {
        b.set_piece(at(sq), Some(Piece::new(color, kind)));
    }
    b
}

#[test]
fn test_startpos_nobody_attacked() {
    let b = Board::startpos();
    assert!(!is_attacked(&b, Color::White));
    assert!(!is_attacked(&b, Color::Black));
}

#[test]
fn test_rook_attack_reports_king_square() {
    let b = kings_plus(&[("e5", Color::Black, PieceKind::Rook)]);
    assert_eq!(king_attacked(&b, Color::White), Some(at("e1")));
    assert!(!is_attacked(&b, Color::Black));
}

#[test]
fn test_slider_ray_stops_at_blocker() {
    // Own pawn on e2 shields the king from the rook
    let b = kings_plus(&[
        ("e5", Color::Black, PieceKind::Rook),
        ("e2", Color::White, PieceKind::Pawn),
    ]);
    assert!(!is_attacked(&b, Color::White));

    // An opposing piece blocks just the same
    let b = kings_plus(&[
        ("a5", Color::Black, PieceKind::Bishop),
        ("c3", Color::Black, PieceKind::Knight),
    ]);
    assert!(!is_attacked(&b, Color::White));
}

#[test]
fn test_knight_attack() {
    let b = kings_plus(&[("d3", Color::Black, PieceKind::Knight)]);
    assert!(is_attacked(&b, Color::White));

    let b = kings_plus(&[("d4", Color::Black, PieceKind::Knight)]);
    assert!(!is_attacked(&b, Color::White));
}

#[test]
fn test_pawn_attacks_only_diagonally() {
    // Black pawn on d2 attacks c1 and e1
    let b = kings_plus(&[("d2", Color::Black, PieceKind::Pawn)]);
    assert!(is_attacked(&b, Color::White));

    // Directly in front is not an attack
    let b = kings_plus(&[("e2", Color::Black, PieceKind::Pawn)]);
    assert!(!is_attacked(&b, Color::White));

    // White pawn on d7 attacks e8
    let b = kings_plus(&[("d7", Color::White, PieceKind::Pawn)]);
    assert_eq!(king_attacked(&b, Color::Black), Some(at("e8")));
}

#[test]
fn test_queen_diagonal_attack() {
    let b = kings_plus(&[("h4", Color::Black, PieceKind::Queen)]);
    assert!(is_attacked(&b, Color::White));
}
