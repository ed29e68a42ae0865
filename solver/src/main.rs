//! Shenzhen Solitaire Solver
//!
//! Reads a dealt position as JSON (stdin, or a file path given as the first
//! argument), searches for a winning sequence of moves, and prints the
//! result as JSON. Position construction from a screen recognizer and move
//! playback against a live game are both external to this crate.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod config;
mod search;

use config::SearchConfig;
use search::{Solution, SolveOutcome};
use shenzhen_engine::position::Position;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::time::Instant;

#[derive(serde::Serialize)]
struct SolveReport {
    timestamp: String,
    solved: bool,
    move_count: Option<usize>,
    expansion_cap: Option<usize>,
    execution_time_ms: u64,
    solution: Option<Vec<shenzhen_engine::r#move::Move>>,
}

fn read_input() -> io::Result<String> {
    match env::args().nth(1) {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn solution_moves(solution: &Solution) -> Vec<shenzhen_engine::r#move::Move> {
    solution.steps.iter().filter_map(|step| step.move_taken).collect()
}

fn main() {
    let input = match read_input() {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("failed to read input: {e}");
            std::process::exit(1);
        }
    };

    let position: Position = match serde_json::from_str(&input) {
        Ok(position) => position,
        Err(e) => {
            eprintln!("failed to parse position: {e}");
            std::process::exit(1);
        }
    };

    println!("Shenzhen Solitaire solver starting at {}...", chrono::Utc::now().to_rfc3339());

    let config = SearchConfig::default();
    let start = Instant::now();
    let outcome = search::solve(position, &config);
    let execution_time_ms = start.elapsed().as_millis() as u64;

    let report = match &outcome {
        SolveOutcome::Solved(solution) => {
            println!("Solved in {execution_time_ms}ms with {} moves", solution.move_count());
            SolveReport {
                timestamp: chrono::Utc::now().to_rfc3339(),
                solved: true,
                move_count: Some(solution.move_count()),
                expansion_cap: config.max_expansions,
                execution_time_ms,
                solution: Some(solution_moves(solution)),
            }
        }
        SolveOutcome::NoSolution(reason) => {
            println!("No solution found after {execution_time_ms}ms ({reason:?})");
            SolveReport {
                timestamp: chrono::Utc::now().to_rfc3339(),
                solved: false,
                move_count: None,
                expansion_cap: config.max_expansions,
                execution_time_ms,
                solution: None,
            }
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize report: {e}"),
    }
}
