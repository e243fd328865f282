use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn notations(moves: &[Move]) -> Vec<String> {
    let mut v: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    v.sort();
    v
}

#[test]
fn test_startpos_moves() {
    let mut state = GameState::new();
    let moves = legal_moves(&mut state);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
    assert!(!state.in_check());
    assert!(!state.is_terminal());
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let mut state =
        GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&mut state);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_pinned_rook_slides_along_pin_only() {
    // Rook on e4 pinned by the rook on e8: it may only move along the e-file.
    let mut state = GameState::from_fen("k3r3/8/8/8/4R3/8/8/4K3 w - - 0 1").unwrap();
    let rook_moves: Vec<Move> = legal_moves(&mut state)
        .into_iter()
        .filter(|m| m.from == sq("e4"))
        .collect();
    assert_eq!(
        notations(&rook_moves),
        vec!["e4e2", "e4e3", "e4e5", "e4e6", "e4e7", "e4e8"]
    );
}

#[test]
fn test_pinned_knight_cannot_move() {
    let mut state = GameState::from_fen("4k3/8/8/8/1b6/8/3N4/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&mut state);
    assert!(moves.iter().all(|m| m.from != sq("d2")));
}

#[test]
fn test_diagonally_pinned_pawn_may_capture_pinner() {
    // Pawn on d2 pinned by bishop on c3 can only take it.
    let mut state = GameState::from_fen("4k3/8/8/8/8/2b5/3P4/4K3 w - - 0 1").unwrap();
    let pawn_moves: Vec<Move> = legal_moves(&mut state)
        .into_iter()
        .filter(|m| m.from == sq("d2"))
        .collect();
    assert_eq!(notations(&pawn_moves), vec!["d2c3"]);
}

#[test]
fn test_single_check_must_block_capture_or_move_king() {
    // Rook on e8 checks the king on e1; the rook on a4 or the bishop on c2 can
    // interpose on e4.
    let mut state = GameState::from_fen("k3r3/8/8/8/R7/8/2B5/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&mut state);
    assert!(state.in_check());
    for m in &moves {
        let is_king = m.piece.kind == PieceKind::King;
        assert!(
            is_king || m.to.col == 4,
            "{m} neither moves the king nor lands on the e-file"
        );
    }
    assert!(moves.iter().any(|m| m.to_string() == "a4e4"));
    assert!(moves.iter().all(|m| m.to_string() != "c2d3"));
    // The king may not retreat along the checking file.
    assert!(moves.iter().all(|m| m.to_string() != "e1e2"));
}

#[test]
fn test_knight_check_only_capture_or_king_move() {
    let mut state = GameState::from_fen("4k3/8/8/8/8/5n2/8/R3K3 w Q - 0 1").unwrap();
    let moves = legal_moves(&mut state);
    for m in &moves {
        assert!(m.piece.kind == PieceKind::King || m.to == sq("f3"));
    }
    // No castling out of check.
    assert!(moves.iter().all(|m| !m.is_castle));
}

#[test]
fn test_double_check_only_king_moves() {
    let mut state = GameState::from_fen("k3r3/8/8/8/8/3n4/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&mut state);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.piece.kind == PieceKind::King));
    assert!(moves.iter().all(|m| !m.is_castle));
}

#[test]
fn test_fools_mate() {
    let mut state = GameState::new();
    for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        state.play_notation(m).unwrap();
    }
    let moves = legal_moves(&mut state);
    assert!(moves.is_empty());
    assert!(state.in_check());
    assert!(state.white_mated());
    assert!(!state.black_mated());
    assert!(!state.is_stalemate());

    // Undo leaves the mated position, and the flag with it.
    state.undo();
    assert!(!state.is_checkmate());
}

#[test]
fn test_stalemate_king_and_queen() {
    // Black king on a8, white queen on b6, white king on c7, Black to move.
    let mut state = GameState::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    let moves = legal_moves(&mut state);
    assert!(moves.is_empty());
    assert!(!state.in_check());
    assert!(state.is_stalemate());
    assert!(state.is_drawn());
    assert!(!state.is_checkmate());
}

#[test]
fn test_flags_recomputed_per_query() {
    let mut state = GameState::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    legal_moves(&mut state);
    assert!(state.is_stalemate());
    state.with_side_flipped(|s| {
        let white = legal_moves(s);
        assert!(!white.is_empty());
        assert!(!s.is_stalemate());
    });
    // Flags restored after the flip.
    assert!(state.is_stalemate());
}

#[test]
fn test_en_passant_offered_after_double_step() {
    let mut state = GameState::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
    state.play_notation("e2e4").unwrap();
    let moves = legal_moves(&mut state);
    let ep = moves
        .iter()
        .find(|m| m.is_en_passant)
        .expect("d4xe3 en passant should be legal");
    assert_eq!(ep.to_string(), "d4e3");
}

#[test]
fn test_en_passant_not_offered_later() {
    let mut state = GameState::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
    state.play_notation("e2e4").unwrap();
    state.play_notation("e8d8").unwrap();
    state.play_notation("e1d1").unwrap();
    let moves = legal_moves(&mut state);
    assert!(moves.iter().all(|m| !m.is_en_passant));
}

#[test]
fn test_own_double_step_target_is_not_en_passant() {
    let mut state = GameState::new();
    state.play_notation("e2e4").unwrap();
    let white = state.with_side_flipped(legal_moves);
    assert_eq!(white.len(), 30);
    assert!(white.iter().all(|m| !m.is_en_passant));
}

#[test]
fn test_en_passant_refused_when_it_exposes_king_on_rank() {
    // Both pawns leaving the fifth rank would open the h5 rook onto the king on a5.
    let mut state = GameState::from_fen("8/2p5/8/KP5r/8/8/8/7k b - - 0 1").unwrap();
    state.play_notation("c7c5").unwrap();
    let moves = legal_moves(&mut state);
    assert!(moves.iter().all(|m| !m.is_en_passant));
}

#[test]
fn test_en_passant_captures_checking_pawn() {
    // d7-d5 gives check to the king on e4; exd6 e.p. removes the checker.
    let mut state = GameState::from_fen("4k3/3p4/8/4P3/4K3/8/8/8 b - - 0 1").unwrap();
    state.play_notation("d7d5").unwrap();
    let moves = legal_moves(&mut state);
    assert!(state.in_check());
    assert!(moves.iter().any(|m| m.is_en_passant && m.to_string() == "e5d6"));
}

#[test]
fn test_castling_needs_empty_and_safe_path() {
    let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let castles: Vec<String> = legal_moves(&mut state)
        .iter()
        .filter(|m| m.is_castle)
        .map(|m| m.to_string())
        .collect();
    assert_eq!(castles.len(), 2);

    // Knight on g1 blocks the king side.
    let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K1NR w KQ - 0 1").unwrap();
    let castles: Vec<String> = legal_moves(&mut state)
        .iter()
        .filter(|m| m.is_castle)
        .map(|m| m.to_string())
        .collect();
    assert_eq!(castles, vec!["e1c1"]);

    // Rook on f8 attacks the transit square f1.
    let mut state = GameState::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let castles: Vec<String> = legal_moves(&mut state)
        .iter()
        .filter(|m| m.is_castle)
        .map(|m| m.to_string())
        .collect();
    assert_eq!(castles, vec!["e1c1"]);

    // b1 attacked does not stop queen-side castling; b1 occupied does.
    let mut state = GameState::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    assert!(legal_moves(&mut state).iter().any(|m| m.is_castle));
    let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").unwrap();
    assert!(legal_moves(&mut state).iter().all(|m| !m.is_castle));
}

#[test]
fn test_castling_requires_right() {
    let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    assert!(legal_moves(&mut state).iter().all(|m| !m.is_castle));
}

#[test]
fn test_king_cannot_capture_defended_piece() {
    // Black rook on e2 is defended by the rook on e8.
    let mut state = GameState::from_fen("k3r3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&mut state);
    assert!(moves.iter().all(|m| m.to_string() != "e1e2"));
}

#[test]
fn test_promotion_flags() {
    let mut state = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promo: Vec<Move> = legal_moves(&mut state)
        .into_iter()
        .filter(|m| m.from == sq("b7"))
        .collect();
    // One move per destination: always a queen.
    assert_eq!(promo.len(), 1);
    assert!(promo[0].is_promotion);
}
