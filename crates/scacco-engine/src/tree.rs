//! Lazily materialized game tree.
//!
//! A [`GameNode`] owns a position, the move that produced it, and, once
//! first observed, one child node per legal reply. Children are built on
//! demand behind a [`OnceLock`], so a search only ever pays for the part of
//! the tree it actually visits, and concurrent first touches from worker
//! threads settle on a single memoized sequence.

use std::sync::OnceLock;

use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::{CastlingMode, Chess, Move, Position, PositionError};

use crate::eval::{self, Score};

/// Errors from constructing a root node out of a FEN string.
#[derive(Debug, thiserror::Error)]
pub enum FenError {
    /// The string is not syntactically valid FEN.
    #[error("invalid FEN: {0}")]
    Parse(#[from] ParseFenError),
    /// The FEN parsed but does not describe a legal chess position.
    #[error("illegal position: {0}")]
    Position(#[from] PositionError<Chess>),
}

/// A node of the game tree: a position, the move that reached it, and a
/// lazily materialized child per legal reply.
///
/// Ownership is strict: a node exclusively owns its children, and dropping
/// the root drops the whole subtree.
#[derive(Debug)]
pub struct GameNode {
    position: Chess,
    last_move: Option<Move>,
    children: OnceLock<Vec<GameNode>>,
}

impl GameNode {
    /// Root node for the standard starting position.
    pub fn startpos() -> Self {
        Self {
            position: Chess::default(),
            last_move: None,
            children: OnceLock::new(),
        }
    }

    /// Root node for an arbitrary position given as FEN.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen: Fen = fen.parse()?;
        let position = fen.into_position(CastlingMode::Standard)?;
        Ok(Self {
            position,
            last_move: None,
            children: OnceLock::new(),
        })
    }

    /// Non-root node: clones the parent position, plays `mv` on the clone,
    /// and records it as the node's last move.
    pub fn child(parent: &Chess, mv: Move) -> Self {
        let mut position = parent.clone();
        position.play_unchecked(&mv);
        Self {
            position,
            last_move: Some(mv),
            children: OnceLock::new(),
        }
    }

    /// The position this node represents.
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// The move that produced this node, `None` for the root.
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// Child nodes, one per legal reply, in legal-move enumeration order.
    ///
    /// Materialized on first access and memoized for the life of the node;
    /// the first observer (from any thread) builds the sequence and every
    /// later call returns the same slice. Terminal positions have no
    /// children.
    pub fn children(&self) -> &[GameNode] {
        self.children.get_or_init(|| {
            self.position
                .legal_moves()
                .iter()
                .map(|mv| GameNode::child(&self.position, mv.clone()))
                .collect()
        })
    }

    /// Static evaluation of this node's position, side to move perspective.
    pub fn evaluate(&self) -> Score {
        eval::evaluate(&self.position)
    }
}
