//! Perft with a per-move breakdown, for hunting move generation bugs and
//! for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo run --release --example perft_divide -p chess_core -- [depth] [fen]
//!
//! Without a FEN the starting position is used; depth defaults to 4.

use chess_core::{legal_moves, perft, GameState};
use std::env;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4).max(1);

    let mut state = match args.get(2) {
        Some(fen) => match GameState::from_fen(fen) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameState::new(),
    };

    println!("{state}");
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let mut total = 0u64;
    for mv in legal_moves(&mut state) {
        state.apply(mv);
        let nodes = perft(&mut state, depth - 1);
        state.undo();
        println!("{mv}: {nodes}");
        total += nodes;
    }
    let elapsed = start.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        total as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!();
    println!("Nodes: {total}");
    println!("Time: {elapsed:.3?} ({nps:.0} nps)");
    ExitCode::SUCCESS
}
