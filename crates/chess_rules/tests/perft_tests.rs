use std::time::Instant;

use rayon::prelude::*;

use chess_rules::{GameState, perft};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
// Move generation clones the game per node, so keep the default run short.
const NODE_LIMIT: u64 = 100_000;

fn parse_epd_line(line: &str) -> Option<(String, Vec<(u8, u64)>)> {
    let mut parts = line.split(';');
    let fen = parts.next()?.trim();
    if fen.is_empty() {
        return None;
    }

    let mut depths = Vec::new();
    for part in parts {
        let mut items = part.split_whitespace();
        let key = items.next().unwrap_or("");
        let val = items.next().unwrap_or("");
        let Some(depth) = key.strip_prefix('D') else {
            continue;
        };
        let depth: u8 = depth
            .parse()
            .unwrap_or_else(|_| panic!("Invalid depth token in EPD: {key}"));
        let expected: u64 = val
            .parse()
            .unwrap_or_else(|_| panic!("Invalid node count in EPD: {val}"));
        depths.push((depth, expected));
    }
    if depths.is_empty() {
        return None;
    }
    depths.sort_by_key(|(d, _)| *d);
    Some((fen.to_string(), depths))
}

#[test]
fn perft_from_standard_epd() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();
    let data = include_str!("standard.epd");
    let cases: Vec<(usize, String, Vec<(u8, u64)>)> = data
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_epd_line(line.trim()).map(|(fen, d)| (idx, fen, d)))
        .collect();
    assert_eq!(cases.len(), 6);

    cases.par_iter().for_each(|(idx, fen, depths)| {
        let game = GameState::from_fen(fen)
            .unwrap_or_else(|e| panic!("Invalid FEN in case {}: {e}", idx + 1));
        let case_start = Instant::now();
        let mut ran_depths = Vec::new();
        let mut total_nodes = 0u64;

        for (depth, expected) in depths {
            if !full && *expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {depth} for case {} (expected {expected} nodes), set {FULL_PERFT_ENV}=1 to run all.",
                    idx + 1
                );
                continue;
            }
            let got = perft(&game, *depth);
            assert_eq!(
                got, *expected,
                "Perft mismatch for FEN '{fen}' at depth {depth}"
            );
            ran_depths.push(*depth);
            total_nodes += got;
        }

        println!(
            "Case {:03} done: depths {:?}, total nodes {}, elapsed {:.3?}",
            idx + 1,
            ran_depths,
            total_nodes,
            case_start.elapsed()
        );
    });
}

#[test]
fn perft_leaves_the_game_untouched() {
    let game = GameState::new();
    let before = game.fen().to_string();
    assert_eq!(perft(&game, 2), 400);
    assert_eq!(game.fen(), before);
    assert!(game.move_list().is_empty());
}

#[test]
fn perft_depth_zero_is_one() {
    assert_eq!(perft(&GameState::new(), 0), 1);
}
