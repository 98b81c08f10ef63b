//! Static board evaluation.
//!
//! Scores are material-only, computed from the side-to-move's perspective.
//! Terminal positions saturate to the score bounds before any counting
//! happens, so a checkmate can never be outweighed by material.

use shakmaty::{Chess, Color, Outcome, Position, Role};

/// Score type used throughout the search.
pub type Score = i16;

/// Material value of a king.
pub const KING_WEIGHT: Score = 200;
/// Material value of a queen.
pub const QUEEN_WEIGHT: Score = 9;
/// Material value of a rook.
pub const ROOK_WEIGHT: Score = 5;
/// Material value of a bishop.
pub const BISHOP_WEIGHT: Score = 3;
/// Material value of a knight.
pub const KNIGHT_WEIGHT: Score = 3;
/// Material value of a pawn.
pub const PAWN_WEIGHT: Score = 1;

/// Highest score any position can evaluate to: the full starting army.
pub const MAX_SCORE: Score = KING_WEIGHT
    + QUEEN_WEIGHT
    + 2 * ROOK_WEIGHT
    + 2 * BISHOP_WEIGHT
    + 2 * KNIGHT_WEIGHT
    + 8 * PAWN_WEIGHT;

/// Lowest score any position can evaluate to.
pub const MIN_SCORE: Score = -MAX_SCORE;

/// Material weight for a piece role.
fn weight(role: Role) -> Score {
    match role {
        Role::King => KING_WEIGHT,
        Role::Queen => QUEEN_WEIGHT,
        Role::Rook => ROOK_WEIGHT,
        Role::Bishop => BISHOP_WEIGHT,
        Role::Knight => KNIGHT_WEIGHT,
        Role::Pawn => PAWN_WEIGHT,
    }
}

/// Evaluate a position from the side-to-move's perspective.
///
/// Finished games saturate: [`MAX_SCORE`] if the side to move has won,
/// [`MIN_SCORE`] if it has lost, `0` for a draw. Otherwise the score is the
/// weighted material balance, negated when Black is to move so that a
/// positive score always favors the player about to act.
pub fn evaluate(pos: &Chess) -> Score {
    if let Some(outcome) = pos.outcome() {
        return match outcome {
            Outcome::Decisive { winner } if winner == pos.turn() => MAX_SCORE,
            Outcome::Decisive { .. } => MIN_SCORE,
            Outcome::Draw => 0,
        };
    }

    let board = pos.board();
    let mut material: Score = 0;
    for role in Role::ALL {
        let white = board.by_piece(role.of(Color::White)).count() as Score;
        let black = board.by_piece(role.of(Color::Black)).count() as Score;
        material += weight(role) * (white - black);
    }

    if pos.turn() == Color::Black {
        -material
    } else {
        material
    }
}
