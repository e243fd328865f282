//! Whole-position properties of move generation and apply/undo.

use chess_core::{legal_moves, square_under_attack, GameState};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
    "r1bqkb1r/pppp1Npp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K2R b KQkq - 0 1",
    "r1bqkbnr/ppp2ppp/2np4/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
];

#[test]
fn apply_undo_restores_every_position() {
    for fen in POSITIONS {
        let mut state = GameState::from_fen(fen).unwrap();
        let before = state.snapshot();
        for mv in legal_moves(&mut state) {
            state.apply(mv);
            state.undo();
            assert_eq!(state.snapshot(), before, "{mv} did not undo cleanly in {fen}");
            assert_eq!(state.castling_history_len(), 1);
        }
    }
}

#[test]
fn no_legal_move_leaves_own_king_attacked() {
    for fen in POSITIONS {
        let mut state = GameState::from_fen(fen).unwrap();
        let mover = state.side_to_move();
        for mv in legal_moves(&mut state) {
            state.apply(mv);
            let attacked = state.with_side_flipped(|s| {
                let king = s.king_square(mover);
                square_under_attack(s, king)
            });
            assert!(!attacked, "{mv} leaves the king en prise in {fen}");
            state.undo();
        }
    }
}

#[test]
fn castling_history_tracks_move_count() {
    let mut state = GameState::new();
    for m in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"] {
        state.play_notation(m).unwrap();
        assert_eq!(state.castling_history_len(), state.move_log().len() + 1);
    }
    assert!(state.has_castled(chess_core::Color::White));
    while !state.move_log().is_empty() {
        state.undo();
        assert_eq!(state.castling_history_len(), state.move_log().len() + 1);
    }
}

#[test]
fn king_square_follows_the_king() {
    let mut state = GameState::new();
    for m in ["e2e4", "e7e5", "e1e2", "e8e7"] {
        state.play_notation(m).unwrap();
    }
    assert_eq!(state.king_square(chess_core::Color::White).to_string(), "e2");
    assert_eq!(state.king_square(chess_core::Color::Black).to_string(), "e7");
    state.undo();
    assert_eq!(state.king_square(chess_core::Color::Black).to_string(), "e8");
}
