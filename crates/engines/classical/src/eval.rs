//! Static evaluation: material, mobility and castling, scored from White's side.

use chess_core::{legal_moves, Color, GameState};

use crate::config::EvalWeights;

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [100, 350, 350, 525, 1000, 10_000];

/// Evaluates the position. Positive favours White.
///
/// Generates the legal moves of the side to move first, so a mated or
/// stalemated position is scored as such:
/// - White mated: `-mate`, Black mated: `+mate`
/// - stalemate, or a last move that repeated a position: `draw` charged
///   against the side that just moved
///
/// A repetition earlier in the game does not count. Mate and stalemate flags
/// are cleared again before returning.
pub fn evaluate(state: &mut GameState, weights: &EvalWeights) -> i32 {
    let to_move = legal_moves(state).len() as i32;

    let score = if state.white_mated() {
        -weights.mate
    } else if state.black_mated() {
        weights.mate
    } else if state.is_stalemate() || state.repetition_at_last_move() {
        match state.side_to_move() {
            Color::White => weights.draw,
            Color::Black => -weights.draw,
        }
    } else {
        let waiting = state.with_side_flipped(|s| legal_moves(s).len() as i32);
        let (white_moves, black_moves) = match state.side_to_move() {
            Color::White => (to_move, waiting),
            Color::Black => (waiting, to_move),
        };
        material(state)
            + weights.mobility * (white_moves - black_moves)
            + weights.castled * (castled(state, Color::White) - castled(state, Color::Black))
    };

    state.clear_terminal_flags();
    score
}

/// Sum of piece values, White positive.
pub fn material(state: &GameState) -> i32 {
    state
        .board()
        .iter()
        .flatten()
        .flatten()
        .map(|pc| {
            let v = PIECE_VALUES[pc.kind.idx()];
            if pc.color == Color::White {
                v
            } else {
                -v
            }
        })
        .sum()
}

fn castled(state: &GameState, color: Color) -> i32 {
    i32::from(state.has_castled(color))
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
