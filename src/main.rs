//! Timing harness for the search policies.
//!
//! Usage: `scacco [positionIndex] [depth] [syncIterations]`
//!
//! Arguments parse tolerantly: malformed numbers fall back to the defaults
//! and an out-of-range position index clamps into the built-in table. Each
//! parallel policy is timed against the sequential reference over the same
//! tree and reported as one CSV line on stdout:
//!
//! `timeMicroseconds,nodesExplored,seqTimeMicroseconds,seqNodes,positionIndex`
//!
//! Log output goes to stderr so the CSV stays machine-readable.

use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use scacco_engine::positions::BENCH_POSITIONS;
use scacco_engine::{AlphaBetaResult, GameNode, MAX_SCORE, MIN_SCORE, Policy, alpha_beta};

const DEFAULT_POSITION: usize = 0;
const DEFAULT_DEPTH: u8 = 5;
const DEFAULT_SYNC_STRIDE: u8 = 2;

/// Runs averaged per policy.
const TRIALS: u32 = 3;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let position_index = parse_or(args.first(), DEFAULT_POSITION).min(BENCH_POSITIONS.len() - 1);
    let depth = parse_or(args.get(1), DEFAULT_DEPTH).max(1);
    let sync_stride = parse_or(args.get(2), DEFAULT_SYNC_STRIDE).max(1);

    let (name, fen) = BENCH_POSITIONS[position_index];
    info!(position = name, position_index, depth, sync_stride, "timing search policies");

    let root = GameNode::from_fen(fen).context("building the game tree root")?;

    let (seq_time, seq_result) = time_policy(&root, Policy::Sequential, depth)?;
    info!(
        policy = "Sequential",
        micros = seq_time,
        nodes = seq_result.nodes_explored,
        "reference timed"
    );

    for policy in [
        Policy::SharedCutoffs,
        Policy::LocalCutoffs,
        Policy::BlendedCutoffs { sync_stride },
    ] {
        let (time, result) = time_policy(&root, policy, depth)?;
        info!(?policy, micros = time, nodes = result.nodes_explored, "policy timed");
        println!(
            "{},{},{},{},{}",
            time, result.nodes_explored, seq_time, seq_result.nodes_explored, position_index
        );
    }

    Ok(())
}

/// Tolerant positional-argument parsing: missing or malformed values fall
/// back to the default.
fn parse_or<T: std::str::FromStr>(arg: Option<&String>, default: T) -> T {
    arg.and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Run `policy` over `TRIALS` full-window searches of the same tree and
/// return the mean wall time in microseconds with the last result.
fn time_policy(root: &GameNode, policy: Policy, depth: u8) -> Result<(u64, AlphaBetaResult)> {
    let mut total_micros: u128 = 0;
    let mut last = None;
    for _ in 0..TRIALS {
        let start = Instant::now();
        let result = alpha_beta(root, policy, depth, MIN_SCORE, MAX_SCORE, true)
            .context("searching a bench position")?;
        total_micros += start.elapsed().as_micros();
        last = Some(result);
    }
    let mean = (total_micros / u128::from(TRIALS)) as u64;
    let result = last.context("at least one trial runs")?;
    Ok((mean, result))
}
