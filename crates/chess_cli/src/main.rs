//! Line-protocol driver for the chess rules engine.
//!
//! Reads one command per line from stdin and answers on stdout. Logs go to
//! stderr so stdout carries protocol text only.

mod config;
mod render;
mod session;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use config::CliConfig;
use session::{Reply, Session};

fn print_usage() {
    println!("chess_cli - play chess over a line protocol");
    println!();
    println!("Usage:");
    println!("  chess_cli [--config <path>]");
    println!();
    println!("Commands:");
    println!("  new                 start a new game");
    println!("  fen [<fen>]         print the position, or load one");
    println!("  board               draw the board");
    println!("  moves [<square>]    legal moves, all or from one square");
    println!("  move <from><to>[q|r|b|n]");
    println!("  state               JSON snapshot of the game");
    println!("  history             moves played so far");
    println!("  quit");
}

enum Args {
    Run { config: Option<PathBuf> },
    Help,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut config = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).ok_or("--config needs a path")?;
                config = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => return Ok(Args::Help),
            other => return Err(format!("unknown argument '{other}'")),
        }
        i += 1;
    }
    Ok(Args::Run { config })
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let config_path = match parse_args(&args) {
        Ok(Args::Run { config }) => config,
        Ok(Args::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let config = match CliConfig::load_or_default(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_filter);

    let mut session = match Session::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: start_fen: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match session.handle(line) {
            Ok(Reply::Text(text)) => {
                writeln!(stdout, "{text}").ok();
            }
            Ok(Reply::Quit) => break,
            Err(e) => {
                warn!(command = line, error = %e, "command failed");
                writeln!(stdout, "error: {e}").ok();
            }
        }
        stdout.flush().ok();
    }
    ExitCode::SUCCESS
}
