//! Minimax move selection with alpha-beta pruning.
//!
//! One recursive skeleton, four execution policies. The policies agree on
//! the score they return and differ only in how the pruning window is
//! coordinated while the root's children are explored: not at all
//! (sequential), through shared slots every worker reads and writes
//! ([`Policy::SharedCutoffs`]), not across workers at all
//! ([`Policy::LocalCutoffs`]), or through call-wide bounds reconciled every
//! few plies ([`Policy::BlendedCutoffs`]).

mod blended;
mod local;
mod sequential;
mod shared;

use shakmaty::Move;
use tracing::debug;

use crate::eval::{MAX_SCORE, MIN_SCORE, Score};
use crate::tree::GameNode;

/// Window-coordination strategy for exploring the root's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Single worker, children left to right, cutoffs applied immediately.
    /// The correctness reference for the parallel policies.
    Sequential,
    /// One worker per core; the window bound and the best move live in
    /// shared slots that every worker consults before starting a child.
    SharedCutoffs,
    /// One worker per core; each worker prunes only from its own finished
    /// children and the per-worker bests are reduced after the join.
    LocalCutoffs,
    /// Worker-private windows reconciled with call-wide bounds at every
    /// recursion level whose remaining depth is a multiple of `sync_stride`.
    /// A stride of 1 behaves like [`Policy::SharedCutoffs`]; large strides
    /// degenerate to [`Policy::LocalCutoffs`].
    BlendedCutoffs {
        /// Plies between reconciliations. Must be nonzero.
        sync_stride: u8,
    },
}

/// A move with the score the search attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    /// The chosen move. `None` when the searched node was itself a leaf
    /// root, which has no move to report.
    pub mv: Option<Move>,
    /// Score of the subtree behind `mv`, from the root player's perspective.
    pub score: Score,
}

impl ScoredMove {
    /// Accumulator seed that loses to every legal score for the player.
    fn sentinel(maximizing: bool) -> Self {
        let score = if maximizing { MIN_SCORE - 1 } else { MAX_SCORE + 1 };
        Self { mv: None, score }
    }

    /// Whether `score` strictly beats this accumulator for the player.
    /// Strictness is what makes ties resolve to the earliest candidate.
    fn improved_by(&self, score: Score, maximizing: bool) -> bool {
        if maximizing {
            score > self.score
        } else {
            score < self.score
        }
    }
}

/// Outcome of one [`alpha_beta`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaBetaResult {
    /// Best move found for the player at the searched node.
    pub best: ScoredMove,
    /// Number of leaf evaluations performed. Pruned or abandoned subtrees
    /// contribute nothing.
    pub nodes_explored: u64,
}

/// Input validation failures. All are fatal to the call; the recursive body
/// itself is total on valid inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// `alpha` was outside `[MIN_SCORE, MAX_SCORE]`.
    #[error("alpha bound {value} is outside the legal score range")]
    AlphaOutOfRange {
        /// The rejected bound.
        value: Score,
    },
    /// `beta` was outside `[MIN_SCORE, MAX_SCORE]`.
    #[error("beta bound {value} is outside the legal score range")]
    BetaOutOfRange {
        /// The rejected bound.
        value: Score,
    },
    /// A search needs at least one ply to choose a move.
    #[error("search depth must be nonzero")]
    ZeroDepth,
    /// `BlendedCutoffs` cannot reconcile every zero plies.
    #[error("sync stride must be nonzero")]
    ZeroSyncStride,
}

/// Select a move for the player at `root`.
///
/// `depth` is the number of plies to explore, `alpha` and `beta` the initial
/// pruning window (both must lie within `[MIN_SCORE, MAX_SCORE]`), and
/// `maximizing` says whether the side to move at `root` is the maximizing
/// player. The returned score is always the best child score found, from the
/// maximizing player's perspective.
pub fn alpha_beta(
    root: &GameNode,
    policy: Policy,
    depth: u8,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> Result<AlphaBetaResult, SearchError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&alpha) {
        return Err(SearchError::AlphaOutOfRange { value: alpha });
    }
    if !(MIN_SCORE..=MAX_SCORE).contains(&beta) {
        return Err(SearchError::BetaOutOfRange { value: beta });
    }
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    if matches!(policy, Policy::BlendedCutoffs { sync_stride: 0 }) {
        return Err(SearchError::ZeroSyncStride);
    }

    debug!(?policy, depth, alpha, beta, maximizing, "starting alpha-beta search");

    Ok(match policy {
        Policy::Sequential => sequential::search(root, depth, alpha, beta, maximizing),
        Policy::SharedCutoffs => shared::search(root, depth, alpha, beta, maximizing),
        Policy::LocalCutoffs => local::search(root, depth, alpha, beta, maximizing),
        Policy::BlendedCutoffs { sync_stride } => {
            blended::search(root, depth, alpha, beta, maximizing, sync_stride)
        }
    })
}

/// Leaf result: evaluate the node, flip the sign so the score reads from
/// the maximizing player's perspective, and attach it to the node's move.
fn leaf(node: &GameNode, maximizing: bool) -> AlphaBetaResult {
    let mut score = node.evaluate();
    if !maximizing {
        score = -score;
    }
    AlphaBetaResult {
        best: ScoredMove { mv: node.last_move().cloned(), score },
        nodes_explored: 1,
    }
}

/// Worker-pool size for a parallel region over `children` siblings: the
/// hardware thread count, but never more workers than there is work.
fn worker_count(children: usize) -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(children)
}

#[cfg(test)]
mod tests {
    use super::{AlphaBetaResult, Policy, ScoredMove, SearchError, alpha_beta};
    use crate::eval::{MAX_SCORE, MIN_SCORE};
    use crate::tree::GameNode;

    const MATE_IN_TWO: &str = "5Q2/p1r5/6K1/R7/6k1/P7/8/8 w - - 0 1";
    const SICILIAN: &str = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";

    fn full_window(root: &GameNode, policy: Policy, depth: u8) -> AlphaBetaResult {
        alpha_beta(root, policy, depth, MIN_SCORE, MAX_SCORE, true)
            .expect("full-window search on a valid tree succeeds")
    }

    /// Leaf count of the unpruned tree: what plain minimax would evaluate.
    fn minimax_leaves(node: &GameNode, depth: u8) -> u64 {
        if depth == 0 || node.children().is_empty() {
            return 1;
        }
        node.children()
            .iter()
            .map(|c| minimax_leaves(c, depth - 1))
            .sum()
    }

    #[test]
    fn alpha_below_range_is_rejected() {
        let root = GameNode::startpos();
        let err = alpha_beta(&root, Policy::Sequential, 2, MIN_SCORE - 1, MAX_SCORE, true)
            .unwrap_err();
        assert_eq!(err, SearchError::AlphaOutOfRange { value: MIN_SCORE - 1 });
    }

    #[test]
    fn beta_above_range_is_rejected() {
        let root = GameNode::startpos();
        let err = alpha_beta(&root, Policy::Sequential, 2, MIN_SCORE, MAX_SCORE + 1, true)
            .unwrap_err();
        assert_eq!(err, SearchError::BetaOutOfRange { value: MAX_SCORE + 1 });
    }

    #[test]
    fn zero_depth_is_rejected() {
        let root = GameNode::startpos();
        let err = alpha_beta(&root, Policy::Sequential, 0, MIN_SCORE, MAX_SCORE, true)
            .unwrap_err();
        assert_eq!(err, SearchError::ZeroDepth);
    }

    #[test]
    fn zero_sync_stride_is_rejected() {
        let root = GameNode::startpos();
        let err = alpha_beta(
            &root,
            Policy::BlendedCutoffs { sync_stride: 0 },
            2,
            MIN_SCORE,
            MAX_SCORE,
            true,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::ZeroSyncStride);
    }

    #[test]
    fn bound_validation_applies_to_every_policy() {
        let root = GameNode::startpos();
        for policy in [
            Policy::Sequential,
            Policy::SharedCutoffs,
            Policy::LocalCutoffs,
            Policy::BlendedCutoffs { sync_stride: 2 },
        ] {
            let err = alpha_beta(&root, policy, 2, MIN_SCORE, MAX_SCORE + 1, true).unwrap_err();
            assert_eq!(err, SearchError::BetaOutOfRange { value: MAX_SCORE + 1 });
        }
    }

    #[test]
    fn sequential_prunes_against_minimax() {
        let root = GameNode::from_fen(MATE_IN_TWO).unwrap();
        let full = minimax_leaves(&root, 3);
        let pruned = full_window(&root, Policy::Sequential, 3).nodes_explored;
        assert!(
            pruned <= full,
            "alpha-beta visited {pruned} leaves, plain minimax {full}"
        );
    }

    #[test]
    fn node_count_grows_with_depth() {
        // A quiet position: growth from the extra ply dwarfs any pruning.
        let root = GameNode::from_fen(SICILIAN).unwrap();
        let mut previous = 0;
        for depth in 1..=4 {
            let nodes = full_window(&root, Policy::Sequential, depth).nodes_explored;
            assert!(
                nodes > previous,
                "depth {depth} explored {nodes} nodes, depth {} explored {previous}",
                depth - 1
            );
            previous = nodes;
        }
    }

    #[test]
    fn widening_the_window_never_lowers_the_score() {
        let root = GameNode::from_fen(MATE_IN_TWO).unwrap();
        let wide = full_window(&root, Policy::Sequential, 2).best.score;
        for (alpha, beta) in [(MIN_SCORE, 0), (0, MAX_SCORE), (-10, 10)] {
            let narrow = alpha_beta(&root, Policy::Sequential, 2, alpha, beta, true)
                .unwrap()
                .best
                .score;
            assert!(
                wide >= narrow,
                "window [{alpha}, {beta}] returned {narrow}, full window {wide}"
            );
        }
    }

    #[test]
    fn sentinel_seeds_lose_to_any_legal_score() {
        let max_seed = ScoredMove::sentinel(true);
        let min_seed = ScoredMove::sentinel(false);
        assert!(max_seed.improved_by(MIN_SCORE, true));
        assert!(min_seed.improved_by(MAX_SCORE, false));
        assert!(!max_seed.improved_by(max_seed.score, true), "ties do not improve");
    }

    #[test]
    fn root_leaf_is_scored_directly() {
        // Checkmated root: no children, so the root itself is the leaf and
        // there is no move to report.
        let root = GameNode::from_fen("1k4R1/8/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        let result = full_window(&root, Policy::Sequential, 3);
        assert_eq!(result.best.mv, None);
        assert_eq!(result.best.score, MIN_SCORE);
        assert_eq!(result.nodes_explored, 1);
    }
}
