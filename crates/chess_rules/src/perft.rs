use crate::{game::GameState, types::PieceKind};

const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`; a pawn
/// reaching the last row counts once per promotion choice. A position where
/// the game has already ended has no children.
pub fn perft(game: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    if game.is_game_over() {
        return 0;
    }

    let mut nodes = 0u64;
    for (&from, dests) in game.safe_squares() {
        let Some(pc) = game.board().piece_at(from) else {
            continue;
        };
        for &to in dests {
            let promotes = pc.kind == PieceKind::Pawn && to.x == pc.color.promotion_row();
            let choices: &[PieceKind] = if promotes {
                &PROMOTION_CHOICES
            } else {
                &[PieceKind::Queen]
            };

            if depth == 1 {
                nodes += choices.len() as u64;
                continue;
            }
            for &choice in choices {
                let mut child = game.clone();
                if child.play(from, to, Some(choice)).is_ok() {
                    nodes += perft(&child, depth - 1);
                }
            }
        }
    }
    nodes
}
