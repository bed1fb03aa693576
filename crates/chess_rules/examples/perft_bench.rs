//! Perft benchmark for profiling move generation.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_rules -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 4 over the test suite
//!   cargo run --profile profiling --example perft_bench -p chess_rules
//!
//!   # Custom depth and position (Kiwipete)
//!   cargo run --release --example perft_bench -p chess_rules -- 3 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"

use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use chess_rules::{GameState, STARTING_FEN, perft};

const TEST_POSITIONS: &[(&str, &str)] = &[
    ("Starting position", STARTING_FEN),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    (
        "Position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
    ),
];

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    if let Some(fen) = args.get(2) {
        match GameState::from_fen(fen) {
            Ok(game) => run_single_position(&game, depth),
            Err(e) => {
                eprintln!("invalid FEN: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        run_all_positions(depth);
    }
    ExitCode::SUCCESS
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_single_position(game: &GameState, depth: u8) {
    println!("Position: {}", game.fen());
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let nodes = perft(game, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
}

fn run_all_positions(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let Ok(game) = GameState::from_fen(fen) else {
            println!("{name:.<30} invalid FEN");
            continue;
        };
        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&game, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;
        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
