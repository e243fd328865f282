//! Minimax search with alpha-beta pruning.
//!
//! White maximises and Black minimises a single White-positive score. The
//! search plays moves on the caller's state and undoes each one before
//! trying the next.

use chess_core::{legal_moves, Color, GameState, Move};
use tracing::trace;

use crate::config::EvalWeights;
use crate::eval::evaluate;

/// Outside any reachable evaluation.
pub const INFINITY: i32 = 1_000_000;

/// Most promising moves first, by their ordering value. Stable, so equal
/// values keep generation order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by(|a, b| b.order_value.cmp(&a.order_value));
}

/// Scores every legal root move with a full-width search of `depth - 1`
/// plies and returns the best one for the side to move.
///
/// Depth 0 scores each root move by evaluating the position it leads to.
/// Ties go to the earlier move in ordered sequence. Returns `None` when the
/// side to move has no legal moves.
pub fn pick_best_move(
    state: &mut GameState,
    depth: u8,
    weights: &EvalWeights,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    let mut moves = legal_moves(state);
    if moves.is_empty() {
        return None;
    }
    order_moves(&mut moves);

    let maximising = state.side_to_move() == Color::White;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        state.apply(mv);
        *nodes += 1;
        let score = alpha_beta(
            state,
            depth.saturating_sub(1),
            -INFINITY,
            INFINITY,
            weights,
            nodes,
        );
        state.undo();
        trace!(%mv, score, "root move");

        let better = match best {
            None => true,
            Some((_, best_score)) if maximising => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if better {
            best = Some((mv, score));
        }
    }
    best
}

/// Recursive minimax with alpha-beta pruning.
///
/// Leaves (depth exhausted, a move that just repeated a position, or no legal
/// moves) are scored by [`evaluate`]. A repetition already on record before
/// the search started does not end a branch.
pub fn alpha_beta(
    state: &mut GameState,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    weights: &EvalWeights,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 || state.repetition_at_last_move() {
        return evaluate(state, weights);
    }

    let mut moves = legal_moves(state);
    if moves.is_empty() {
        return evaluate(state, weights);
    }
    order_moves(&mut moves);

    match state.side_to_move() {
        Color::White => {
            let mut best = -INFINITY;
            for mv in moves {
                state.apply(mv);
                *nodes += 1;
                let score = alpha_beta(state, depth - 1, alpha, beta, weights, nodes);
                state.undo();

                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break; // Beta cutoff
                }
            }
            best
        }
        Color::Black => {
            let mut best = INFINITY;
            for mv in moves {
                state.apply(mv);
                *nodes += 1;
                let score = alpha_beta(state, depth - 1, alpha, beta, weights, nodes);
                state.undo();

                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break; // Alpha cutoff
                }
            }
            best
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
