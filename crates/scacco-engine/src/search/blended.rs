//! Parallel exploration with periodically reconciled pruning windows.
//!
//! Workers run with private windows exactly as in the local-cutoff policy,
//! but a pair of call-wide bounds lives on the stack of the parallel region,
//! seeded from the caller's window and borrowed by every worker. A worker
//! publishes into the globals whenever one of its finished root children
//! tightens its side of the window; those values hold at the root and are
//! therefore valid everywhere in the tree. On the way down, every recursion
//! level whose remaining depth is a multiple of the sync stride pulls the
//! globals back into the private window, so a cutoff discovered by one
//! worker reaches the others at the next reconciliation point.
//!
//! Bounds accumulated below the root are never published: they are
//! conditional on the path that produced them, and leaking them into a
//! sibling subtree could prune lines the opponent can actually reach.
//!
//! A stride of 1 reconciles at every level and behaves much like the
//! shared-cutoff policy; a stride beyond the search depth never fires, the
//! globals go unread, and the policy degenerates to local cutoffs.

use std::sync::atomic::{AtomicI16, Ordering};
use std::thread;

use tracing::debug;

use crate::eval::Score;
use crate::search::{AlphaBetaResult, ScoredMove, leaf, local, worker_count};
use crate::tree::GameNode;

/// The call-wide window. Globals only ever tighten: alpha rises, beta falls,
/// and each stays within the caller's window, so any private window that has
/// pulled them still contains the true root score.
struct GlobalBounds {
    alpha: AtomicI16,
    beta: AtomicI16,
}

impl GlobalBounds {
    fn new(alpha: Score, beta: Score) -> Self {
        Self {
            alpha: AtomicI16::new(alpha),
            beta: AtomicI16::new(beta),
        }
    }

    /// Publish a root-level alpha if it tightens the global one. The
    /// unlocked read keeps the common no-improvement case free of
    /// read-modify-write traffic.
    fn publish_alpha(&self, alpha: Score) {
        if alpha > self.alpha.load(Ordering::Acquire) {
            self.alpha.fetch_max(alpha, Ordering::AcqRel);
        }
    }

    /// Symmetric to [`GlobalBounds::publish_alpha`].
    fn publish_beta(&self, beta: Score) {
        if beta < self.beta.load(Ordering::Acquire) {
            self.beta.fetch_min(beta, Ordering::AcqRel);
        }
    }

    /// Adopt the globals into a private window. The private window only
    /// shrinks, never widens, keeping it at least as tight as the global one
    /// at every sync point.
    fn pull(&self, alpha: &mut Score, beta: &mut Score) {
        *alpha = (*alpha).max(self.alpha.load(Ordering::Acquire));
        *beta = (*beta).min(self.beta.load(Ordering::Acquire));
    }
}

pub(super) fn search(
    root: &GameNode,
    depth: u8,
    alpha: Score,
    beta: Score,
    maximizing: bool,
    sync_stride: u8,
) -> AlphaBetaResult {
    if depth == 0 || root.children().is_empty() {
        return leaf(root, maximizing);
    }
    let children = root.children();

    let workers = worker_count(children.len());
    debug!(
        workers,
        children = children.len(),
        sync_stride,
        "blended-cutoff parallel region"
    );

    let globals = GlobalBounds::new(alpha, beta);
    let mut partials: Vec<AlphaBetaResult> = (0..workers)
        .map(|_| AlphaBetaResult {
            best: ScoredMove::sentinel(maximizing),
            nodes_explored: 0,
        })
        .collect();

    thread::scope(|s| {
        for (worker, partial) in partials.iter_mut().enumerate() {
            let globals = &globals;
            s.spawn(move || {
                *partial = explore(
                    children, worker, workers, depth, alpha, beta, maximizing, globals,
                    sync_stride,
                );
            });
        }
    });

    local::combine(partials, maximizing)
}

/// Worker body: the local-cutoff loop over a round-robin slice. Each
/// finished root child publishes the worker's tightened bound; the pull side
/// of the reconciliation follows the same depth schedule as the recursion.
#[allow(clippy::too_many_arguments)]
fn explore(
    children: &[GameNode],
    offset: usize,
    stride: usize,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    globals: &GlobalBounds,
    sync_stride: u8,
) -> AlphaBetaResult {
    let mut best = ScoredMove::sentinel(maximizing);
    let mut nodes_explored = 0;
    for child in children.iter().skip(offset).step_by(stride) {
        let result = recurse(child, depth - 1, alpha, beta, !maximizing, globals, sync_stride);
        nodes_explored += result.nodes_explored;
        if best.improved_by(result.best.score, maximizing) {
            best = ScoredMove {
                mv: child.last_move().cloned(),
                score: result.best.score,
            };
        }
        if maximizing {
            alpha = alpha.max(best.score);
            globals.publish_alpha(alpha);
        } else {
            beta = beta.min(best.score);
            globals.publish_beta(beta);
        }
        if depth % sync_stride == 0 {
            globals.pull(&mut alpha, &mut beta);
        }
        if beta <= alpha {
            break;
        }
    }
    AlphaBetaResult { best, nodes_explored }
}

/// The sequential skeleton plus the periodic pull of the global window.
fn recurse(
    node: &GameNode,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    globals: &GlobalBounds,
    sync_stride: u8,
) -> AlphaBetaResult {
    if depth == 0 || node.children().is_empty() {
        return leaf(node, maximizing);
    }
    let children = node.children();

    if depth % sync_stride == 0 {
        globals.pull(&mut alpha, &mut beta);
    }

    let mut best = ScoredMove::sentinel(maximizing);
    let mut nodes_explored = 0;
    for child in children {
        let result = recurse(child, depth - 1, alpha, beta, !maximizing, globals, sync_stride);
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
