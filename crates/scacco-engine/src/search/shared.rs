//! Parallel exploration with a shared pruning window.
//!
//! The root's children are dealt out to a scoped worker pool through an
//! atomic cursor. Workers read the shared window before starting a child and
//! abandon children the window has already closed on; completed children are
//! offered back through a double-checked update of the shared best move. A
//! worker that started a child on a stale window cannot be recalled, so this
//! policy visits at least as many nodes as the sequential reference and the
//! totals vary run to run with completion timing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI16, AtomicUsize, Ordering};
use std::thread;

use shakmaty::Move;
use tracing::debug;

use crate::eval::{MAX_SCORE, MIN_SCORE, Score};
use crate::search::{AlphaBetaResult, ScoredMove, leaf, sequential, worker_count};
use crate::tree::GameNode;

/// The cross-worker state for one parallel node.
///
/// Only the bound belonging to the player at the node moves during the
/// search (alpha at a maximizing node, beta at a minimizing one); the other
/// bound is fixed by the caller. The best score is mirrored in an atomic so
/// workers can reject non-improvements without touching the lock.
struct SharedWindow {
    maximizing: bool,
    /// The caller's opposite bound: beta at a maximizing node, alpha otherwise.
    fixed: Score,
    /// The adjustable bound, tightened as bests are installed.
    bound: AtomicI16,
    best_score: AtomicI16,
    best_move: Mutex<Option<Move>>,
}

impl SharedWindow {
    fn new(alpha: Score, beta: Score, maximizing: bool) -> Self {
        let (bound, fixed, seed) = if maximizing {
            (alpha, beta, MIN_SCORE - 1)
        } else {
            (beta, alpha, MAX_SCORE + 1)
        };
        Self {
            maximizing,
            fixed,
            bound: AtomicI16::new(bound),
            best_score: AtomicI16::new(seed),
            best_move: Mutex::new(None),
        }
    }

    /// Current `(alpha, beta)` as a worker about to start a child sees it.
    fn current(&self) -> (Score, Score) {
        let bound = self.bound.load(Ordering::Acquire);
        if self.maximizing {
            (bound, self.fixed)
        } else {
            (self.fixed, bound)
        }
    }

    /// Offer a completed child's result: install it as the best on strict
    /// improvement, then tighten the bound from the installed score.
    fn offer(&self, mv: Option<Move>, score: Score) {
        if self.improves(score, self.best_score.load(Ordering::Acquire)) {
            let mut best_move = self.best_move.lock().expect("best-move lock poisoned");
            // Re-test under the lock: a sibling worker may have installed a
            // better move since the unlocked read.
            if self.improves(score, self.best_score.load(Ordering::Acquire)) {
                *best_move = mv;
                self.best_score.store(score, Ordering::Release);
            }
        }
        if self.maximizing {
            self.bound.fetch_max(score, Ordering::AcqRel);
        } else {
            self.bound.fetch_min(score, Ordering::AcqRel);
        }
    }

    /// Strict-improvement test for the player at this node.
    fn improves(&self, score: Score, current: Score) -> bool {
        if self.maximizing {
            score > current
        } else {
            score < current
        }
    }

    fn into_best(self) -> ScoredMove {
        ScoredMove {
            mv: self.best_move.into_inner().expect("best-move lock poisoned"),
            score: self.best_score.into_inner(),
        }
    }
}

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
    debug!(workers, children = children.len(), "shared-cutoff parallel region");

    let window = SharedWindow::new(alpha, beta, maximizing);
    let cursor = AtomicUsize::new(0);
    let mut node_counts = vec![0u64; workers];

    thread::scope(|s| {
        for count in node_counts.iter_mut() {
            let window = &window;
            let cursor = &cursor;
            s.spawn(move || {
                *count = explore(children, depth, maximizing, window, cursor);
            });
        }
    });

    AlphaBetaResult {
        best: window.into_best(),
        nodes_explored: node_counts.iter().sum(),
    }
}

/// Worker body: pull the next unclaimed child, skip it if the shared window
/// has closed, otherwise descend sequentially and offer the result back.
fn explore(
    children: &[GameNode],
    depth: u8,
    maximizing: bool,
    window: &SharedWindow,
    cursor: &AtomicUsize,
) -> u64 {
    let mut nodes_explored = 0;
    loop {
        let index = cursor.fetch_add(1, Ordering::Relaxed);
        let Some(child) = children.get(index) else {
            break;
        };
        let (alpha, beta) = window.current();
        if beta <= alpha {
            // A sibling already produced a cutoff; this child is abandoned
            // and contributes nothing to the count.
            continue;
        }
        let result = sequential::recurse(child, depth - 1, alpha, beta, !maximizing);
        nodes_explored += result.nodes_explored;
        window.offer(child.last_move().cloned(), result.best.score);
    }
    nodes_explored
}
