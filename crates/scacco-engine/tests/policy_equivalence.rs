//! Integration tests across the four search policies.
//!
//! Verifies that every parallel policy agrees with the sequential reference
//! on the selected score, and that the node-count relationships between the
//! policies hold on real positions.

use scacco_engine::{GameNode, MAX_SCORE, MIN_SCORE, Policy, alpha_beta};

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const ROOK_MATE_FEN: &str = "1k6/6R1/1K6/8/8/8/8/8 w - - 0 1";

const ROOK_MATE_BLACK_FEN: &str = "8/8/8/8/8/1k6/6r1/1K6 b - - 0 1";

const MATE_IN_TWO_FEN: &str = "5Q2/p1r5/6K1/R7/6k1/P7/8/8 w - - 0 1";

const SICILIAN_FEN: &str = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";

/// Every policy under test, sequential first.
fn all_policies() -> Vec<Policy> {
    vec![
        Policy::Sequential,
        Policy::SharedCutoffs,
        Policy::LocalCutoffs,
        Policy::BlendedCutoffs { sync_stride: 1 },
        Policy::BlendedCutoffs { sync_stride: 2 },
        Policy::BlendedCutoffs { sync_stride: 3 },
    ]
}

/// Full-window search for the side to move as the maximizer.
fn search(root: &GameNode, policy: Policy, depth: u8) -> scacco_engine::AlphaBetaResult {
    alpha_beta(root, policy, depth, MIN_SCORE, MAX_SCORE, true)
        .expect("valid full-window search")
}

// ── Score equivalence with the sequential reference ───────────────────────────

#[test]
fn all_policies_agree_at_shallow_depths() {
    let positions = [
        ("startpos", STARTPOS_FEN),
        ("rook mate", ROOK_MATE_FEN),
        ("rook mate, black", ROOK_MATE_BLACK_FEN),
        ("mate in two", MATE_IN_TWO_FEN),
        ("sicilian", SICILIAN_FEN),
    ];

    for (name, fen) in positions {
        let root = GameNode::from_fen(fen).expect("test FEN is legal");
        for depth in 1..=3 {
            let reference = search(&root, Policy::Sequential, depth).best.score;
            for policy in all_policies() {
                let score = search(&root, policy, depth).best.score;
                assert_eq!(
                    score, reference,
                    "{policy:?} diverged from sequential on {name} at depth {depth}"
                );
            }
        }
    }
}

#[test]
fn startpos_depth_five_scores_match() {
    let root = GameNode::from_fen(STARTPOS_FEN).unwrap();
    let reference = search(&root, Policy::Sequential, 5).best.score;
    for policy in [
        Policy::SharedCutoffs,
        Policy::LocalCutoffs,
        Policy::BlendedCutoffs { sync_stride: 2 },
    ] {
        let score = search(&root, policy, 5).best.score;
        assert_eq!(
            score, reference,
            "{policy:?} diverged from sequential on the starting position at depth 5"
        );
    }
}

// ── Returned moves achieve the agreed score ───────────────────────────────────

#[test]
fn parallel_policies_return_a_move_achieving_the_score() {
    // Ties may resolve differently across policies, but the chosen move must
    // be a real reply whose subtree achieves the returned score.
    let root = GameNode::from_fen(MATE_IN_TWO_FEN).unwrap();
    let reference = search(&root, Policy::Sequential, 3).best.score;
    for policy in all_policies() {
        let result = search(&root, policy, 3);
        let best = result.best.mv.expect("a move is always selected at the root");
        let chosen = root
            .children()
            .iter()
            .find(|c| c.last_move() == Some(&best))
            .expect("selected move is one of the root's children");
        // Re-score just the chosen subtree with the reference policy.
        let rescored = alpha_beta(chosen, Policy::Sequential, 2, MIN_SCORE, MAX_SCORE, false)
            .unwrap()
            .best
            .score;
        assert_eq!(
            rescored, reference,
            "{policy:?} chose a move whose subtree does not achieve the score"
        );
    }
}

// ── Node-count relationships ──────────────────────────────────────────────────

#[test]
fn local_cutoffs_never_explores_fewer_nodes_than_sequential() {
    for fen in [MATE_IN_TWO_FEN, SICILIAN_FEN, STARTPOS_FEN] {
        let root = GameNode::from_fen(fen).unwrap();
        let seq = search(&root, Policy::Sequential, 3).nodes_explored;
        let local = search(&root, Policy::LocalCutoffs, 3).nodes_explored;
        assert!(
            local >= seq,
            "local cutoffs explored {local} nodes but sequential {seq} on {fen}"
        );
    }
}

#[test]
fn node_counts_grow_with_depth_for_every_policy() {
    let root = GameNode::from_fen(SICILIAN_FEN).unwrap();
    for policy in all_policies() {
        let mut previous = 0;
        for depth in 1..=3 {
            let nodes = search(&root, policy, depth).nodes_explored;
            assert!(
                nodes > previous,
                "{policy:?} explored {nodes} nodes at depth {depth}, {previous} one ply shallower"
            );
            previous = nodes;
        }
    }
}

// ── Shared tree across policies ───────────────────────────────────────────────

#[test]
fn one_tree_serves_every_policy() {
    // All six searches walk the same memoized tree; materialization under
    // the parallel policies must not disturb the sequential result.
    let root = GameNode::from_fen(MATE_IN_TWO_FEN).unwrap();
    let before = search(&root, Policy::Sequential, 2).best.score;
    for policy in all_policies() {
        search(&root, policy, 2);
    }
    let after = search(&root, Policy::Sequential, 2).best.score;
    assert_eq!(before, after);
}
