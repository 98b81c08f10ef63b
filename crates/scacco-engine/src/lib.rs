//! Move selection for scacco.
//!
//! Minimax with alpha-beta pruning over a lazily materialized game tree,
//! offered under four execution policies that trade pruning sharpness
//! against parallelism. Chess rules (move generation, legality, FEN,
//! game-over detection) come from the `shakmaty` crate; this crate owns the
//! tree, the material evaluator, and the search.

pub mod eval;
pub mod positions;
pub mod search;
pub mod tree;

pub use eval::{MAX_SCORE, MIN_SCORE, Score, evaluate};
pub use search::{AlphaBetaResult, Policy, ScoredMove, SearchError, alpha_beta};
pub use tree::{FenError, GameNode};
