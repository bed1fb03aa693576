use super::*;

fn at(s: &str) -> Coords {
    Coords::from_algebraic(s).unwrap()
}

#[test]
fn test_startpos_fen() {
    let fen = board_to_fen(&Board::startpos(), Color::White, None, 0, 1);
    assert_eq!(fen, STARTING_FEN);
}

#[test]
fn test_position_key_drops_counters() {
    assert_eq!(
        position_key(STARTING_FEN),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
    );
    assert_eq!(
        position_key("8/8/8/4k3/8/4K3/8/8 w - - 12 40"),
        position_key("8/8/8/4k3/8/4K3/8/8 w - - 30 57")
    );
}

#[test]
fn test_parse_round_trip() {
    for fen in [
        STARTING_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 7 30",
    ] {
        let parsed = parse_fen(fen).unwrap();
        let again = board_to_fen(
            &parsed.board,
            parsed.side_to_move,
            parsed.last_move.as_ref(),
            parsed.half_move_clock,
            parsed.full_move_number,
        );
        assert_eq!(again, fen);
    }
}

#[test]
fn test_parse_defaults_counters() {
    let parsed = parse_fen("8/8/8/4k3/8/4K3/8/8 b - -").unwrap();
    assert_eq!(parsed.side_to_move, Color::Black);
    assert_eq!(parsed.half_move_clock, 0);
    assert_eq!(parsed.full_move_number, 1);
}

#[test]
fn test_parse_restores_moved_flags() {
    let parsed = parse_fen("r3k2r/8/8/8/8/8/4P3/R3K2R w K - 0 1").unwrap();
    let b = &parsed.board;
    assert!(!b.piece_at(at("e1")).unwrap().has_moved());
    assert!(!b.piece_at(at("h1")).unwrap().has_moved());
    assert!(b.piece_at(at("a1")).unwrap().has_moved());
    assert!(b.piece_at(at("e8")).unwrap().has_moved());
    assert!(!b.piece_at(at("e2")).unwrap().has_moved());
    assert_eq!(castling_availability(b), "K");
}

#[test]
fn test_en_passant_field_becomes_last_move() {
    let parsed =
        parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    let last = parsed.last_move.unwrap();
    assert_eq!(last.from, at("e2"));
    assert_eq!(last.to, at("e4"));
    assert_eq!(last.piece.kind, PieceKind::Pawn);
    assert_eq!(en_passant_target(Some(&last)), Some(at("e3")));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_fen("8/8/8 w"), Err(FenError::FieldCount(2)));
    assert_eq!(
        parse_fen("8/8/8/8/8/8/8 w - - 0 1"),
        Err(FenError::RankCount(7))
    );
    assert_eq!(
        parse_fen("9/8/8/4k3/8/4K3/8/8 w - - 0 1"),
        Err(FenError::RankWidth { rank: 8 })
    );
    assert_eq!(
        parse_fen("8/8/8/4k3/8/4K3/8/7X w - - 0 1"),
        Err(FenError::PieceChar('X'))
    );
    assert_eq!(
        parse_fen("8/8/8/4k3/8/4K3/8/8 x - - 0 1"),
        Err(FenError::SideToMove("x".to_string()))
    );
    assert_eq!(
        parse_fen("8/8/8/4k3/8/4K3/8/8 w KK - 0 1"),
        Err(FenError::Castling("KK".to_string()))
    );
    assert_eq!(
        parse_fen("8/8/8/4k3/8/4K3/8/8 w - e3 0 1"),
        Err(FenError::EnPassant("e3".to_string()))
    );
    assert_eq!(
        parse_fen("8/8/8/4k3/8/4K3/8/8 w - - x 1"),
        Err(FenError::Counter("x".to_string()))
    );
    assert_eq!(
        parse_fen("8/8/8/8/8/4K3/8/8 w - - 0 1"),
        Err(FenError::KingCount(Color::Black))
    );
}
