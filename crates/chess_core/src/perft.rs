use crate::{board::GameState, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
///
/// Promotions only ever produce a queen here, so counts differ from the
/// published tables for positions where a pawn can promote within `depth`.
pub fn perft(state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(state: &mut GameState, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(state, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            state.apply(mv);
            nodes += inner(state, depth - 1, rest);
            state.undo();
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    let nodes = inner(state, depth, &mut layers[..]);
    state.clear_terminal_flags();
    nodes
}
