//! Parallel exploration with worker-private pruning windows.
//!
//! Each worker takes a round-robin slice of the root's children, copies the
//! caller's window once on entry, and prunes only from what it has finished
//! itself. Nothing is shared while the workers run; the per-worker bests are
//! folded into a single result after the join, with the sentinel-scored
//! empty move as the identity of the fold. The static split keeps node
//! totals reproducible for a given worker count.

use std::thread;

use tracing::debug;

use crate::eval::Score;
use crate::search::{AlphaBetaResult, ScoredMove, leaf, sequential, worker_count};
use crate::tree::GameNode;

pub(super) fn search(
    root: &GameNode,
    depth: u8,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> AlphaBetaResult {
    if depth == 0 || root.children().is_empty() {
        return leaf(root, maximizing);
    }
    let children = root.children();

    let workers = worker_count(children.len());
    debug!(workers, children = children.len(), "local-cutoff parallel region");

    let mut partials: Vec<AlphaBetaResult> = (0..workers)
        .map(|_| AlphaBetaResult {
            best: ScoredMove::sentinel(maximizing),
            nodes_explored: 0,
        })
        .collect();

    thread::scope(|s| {
        for (worker, partial) in partials.iter_mut().enumerate() {
            s.spawn(move || {
                *partial = explore(children, worker, workers, depth, alpha, beta, maximizing);
            });
        }
    });

    combine(partials, maximizing)
}

/// Worker body: the sequential skeleton over every `stride`-th child,
/// starting at `offset`, with a private copy of the window.
fn explore(
    children: &[GameNode],
    offset: usize,
    stride: usize,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> AlphaBetaResult {
    let mut best = ScoredMove::sentinel(maximizing);
    let mut nodes_explored = 0;
    for child in children.iter().skip(offset).step_by(stride) {
        let result = sequential::recurse(child, depth - 1, alpha, beta, !maximizing);
        nodes_explored += result.nodes_explored;
        if best.improved_by(result.best.score, maximizing) {
            best = ScoredMove {
                mv: child.last_move().cloned(),
                score: result.best.score,
            };
        }
        if maximizing {
            alpha = alpha.max(best.score);
        } else {
            beta = beta.min(best.score);
        }
        if beta <= alpha {
            break;
        }
    }
    AlphaBetaResult { best, nodes_explored }
}

/// Fold the per-worker results: node counts sum, bests reduce by score
/// extremum. Strict improvement makes the combine insensitive to order
/// among tied workers.
pub(super) fn combine(partials: Vec<AlphaBetaResult>, maximizing: bool) -> AlphaBetaResult {
    let mut merged = AlphaBetaResult {
        best: ScoredMove::sentinel(maximizing),
        nodes_explored: 0,
    };
    for partial in partials {
        merged.nodes_explored += partial.nodes_explored;
        if merged.best.improved_by(partial.best.score, maximizing) {
            merged.best = partial.best;
        }
    }
    merged
}
