//! The sequential alpha-beta skeleton.
//!
//! Every other policy reuses this recursion for the subtrees it hands to a
//! single worker, so this file is the semantic reference: the parallel
//! policies may only ever visit more nodes than this one, never fewer, and
//! must agree with it on the returned score.

use crate::eval::Score;
use crate::search::{AlphaBetaResult, ScoredMove, leaf};
use crate::tree::GameNode;

/// Entry point for the purely sequential policy.
pub(super) fn search(
    root: &GameNode,
    depth: u8,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> AlphaBetaResult {
    recurse(root, depth, alpha, beta, maximizing)
}

/// One level of alpha-beta: evaluate leaves, otherwise fold the children
/// left to right, tightening the window and stopping at the first cutoff.
///
/// Ties keep the earliest child in enumeration order (strict improvement
/// gates the update). The best move is always installed before the bound is
/// derived from it.
pub(super) fn recurse(
    node: &GameNode,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> AlphaBetaResult {
    // Short-circuit keeps depth-0 leaves from materializing their replies.
    if depth == 0 || node.children().is_empty() {
        return leaf(node, maximizing);
    }
    let children = node.children();

    let mut best = ScoredMove::sentinel(maximizing);
    let mut nodes_explored = 0;
    for child in children {
        let result = recurse(child, depth - 1, alpha, beta, !maximizing);
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
