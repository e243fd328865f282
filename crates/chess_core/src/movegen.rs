use crate::attacks::{
    analyze, square_under_attack, Analysis, Check, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS,
    ORTHOGONALS,
};
use crate::board::GameState;
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(state: &mut GameState) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(state, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Refreshes the check marker and the mate/stalemate flags of `state`.
pub fn legal_moves_into(state: &mut GameState, out: &mut Vec<Move>) {
    out.clear();
    state.clear_terminal_flags();

    let analysis = analyze(state);
    state.in_check = analysis.in_check;
    let us = state.side_to_move();
    let king = state.king_square(us);

    match analysis.checks.as_slice() {
        [] => pseudo_moves(state, &analysis, out),
        [check] => {
            pseudo_moves(state, &analysis, out);
            let targets = evasion_squares(state, king, check);
            out.retain(|m| {
                m.piece.kind == PieceKind::King
                    || targets.contains(&m.to)
                    || (m.is_en_passant && Square::new(m.from.row, m.to.col) == check.square)
            });
        }
        // Double check: only the king can move.
        _ => gen_king(state, king, us, out),
    }

    if out.is_empty() {
        if analysis.in_check {
            match us {
                Color::White => state.flags.white_mated = true,
                Color::Black => state.flags.black_mated = true,
            }
        } else {
            state.flags.stalemate = true;
        }
    }
}

/// Squares a non-king move must land on to answer a single check: the
/// checker itself, plus the line between it and the king for sliders.
fn evasion_squares(state: &GameState, king: Square, check: &Check) -> Vec<Square> {
    let is_knight = state
        .piece_at(check.square)
        .is_some_and(|pc| pc.kind == PieceKind::Knight);
    if is_knight {
        return vec![check.square];
    }
    let mut squares = Vec::with_capacity(7);
    let (dr, dc) = check.dir;
    let mut cur = king;
    while let Some(next) = cur.offset(dr, dc) {
        squares.push(next);
        if next == check.square {
            break;
        }
        cur = next;
    }
    squares
}

/// Moves obeying piece movement and pins, ignoring whether the king ends in check
/// (except for king moves themselves, which are always screened).
fn pseudo_moves(state: &mut GameState, analysis: &Analysis, out: &mut Vec<Move>) {
    let us = state.side_to_move();
    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square::new(row, col);
            let pc = match state.piece_at(from) {
                Some(p) => p,
                None => continue,
            };
            if pc.color != us {
                continue;
            }
            let pin = analysis.pin_on(from);
            match pc.kind {
                PieceKind::Pawn => gen_pawn(state, from, pc, pin, out),
                PieceKind::Knight => {
                    // A pinned knight can never stay on the pin line.
                    if pin.is_none() {
                        gen_knight(state, from, pc, out);
                    }
                }
                PieceKind::Bishop => gen_slider(state, from, pc, pin, &DIAGONALS, out),
                PieceKind::Rook => gen_slider(state, from, pc, pin, &ORTHOGONALS, out),
                PieceKind::Queen => {
                    gen_slider(state, from, pc, pin, &ORTHOGONALS, out);
                    gen_slider(state, from, pc, pin, &DIAGONALS, out);
                }
                PieceKind::King => {
                    gen_king(state, from, us, out);
                    if !analysis.in_check {
                        gen_castle(state, from, us, out);
                    }
                }
            }
        }
    }
}

fn along_pin(pin: Option<(i8, i8)>, dir: (i8, i8)) -> bool {
    match pin {
        None => true,
        Some((pr, pc)) => dir == (pr, pc) || dir == (-pr, -pc),
    }
}

fn gen_pawn(
    state: &mut GameState,
    from: Square,
    pawn: Piece,
    pin: Option<(i8, i8)>,
    out: &mut Vec<Move>,
) {
    let dir = pawn.color.forward();

    // forward 1, then 2 from the home rank
    if along_pin(pin, (dir, 0)) {
        if let Some(to) = from.offset(dir, 0) {
            if state.piece_at(to).is_none() {
                out.push(Move::new(from, to, pawn, None));
                if from.row == pawn.color.pawn_row() {
                    if let Some(to2) = to.offset(dir, 0) {
                        if state.piece_at(to2).is_none() {
                            out.push(Move::new(from, to2, pawn, None));
                        }
                    }
                }
            }
        }
    }

    // captures + en-passant
    for dc in [-1, 1] {
        if !along_pin(pin, (dir, dc)) {
            continue;
        }
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match state.piece_at(to) {
            Some(target) if target.color != pawn.color => {
                out.push(Move::new(from, to, pawn, Some(target)));
            }
            None if state.en_passant() == Some(to) => {
                // The target only counts for the side that did not make the double step.
                let victim = state.piece_at(Square::new(from.row, to.col));
                let passed_pawn = Some(Piece::new(pawn.color.other(), PieceKind::Pawn));
                if victim == passed_pawn && en_passant_keeps_king_safe(state, from, to) {
                    out.push(Move::en_passant(from, to, pawn));
                }
            }
            _ => {}
        }
    }
}

/// Both pawns leave the same rank in an en-passant capture, which can open a
/// line the pin scan never saw. Lift them off, look, and put them back.
fn en_passant_keeps_king_safe(state: &mut GameState, from: Square, to: Square) -> bool {
    let victim_sq = Square::new(from.row, to.col);
    let pawn = state.piece_at(from);
    let victim = state.piece_at(victim_sq);

    state.set_piece(from, None);
    state.set_piece(victim_sq, None);
    state.set_piece(to, pawn);
    let safe = !analyze(state).in_check;
    state.set_piece(to, None);
    state.set_piece(victim_sq, victim);
    state.set_piece(from, pawn);

    safe
}

fn gen_knight(state: &GameState, from: Square, knight: Piece, out: &mut Vec<Move>) {
    for (dr, dc) in KNIGHT_OFFSETS {
        if let Some(to) = from.offset(dr, dc) {
            match state.piece_at(to) {
                None => out.push(Move::new(from, to, knight, None)),
                Some(pc) if pc.color != knight.color => {
                    out.push(Move::new(from, to, knight, Some(pc)))
                }
                _ => {}
            }
        }
    }
}

fn gen_slider(
    state: &GameState,
    from: Square,
    slider: Piece,
    pin: Option<(i8, i8)>,
    dirs: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(dr, dc) in dirs {
        if !along_pin(pin, (dr, dc)) {
            continue;
        }
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match state.piece_at(to) {
                None => out.push(Move::new(from, to, slider, None)),
                Some(pc) if pc.color != slider.color => {
                    out.push(Move::new(from, to, slider, Some(pc)));
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

/// King steps onto squares the enemy does not attack. The scan treats our own
/// king as transparent, so stepping back along a checking line is refused.
fn gen_king(state: &GameState, from: Square, us: Color, out: &mut Vec<Move>) {
    let Some(king) = state.piece_at(from) else {
        return;
    };
    for (dr, dc) in KING_OFFSETS {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        let target = state.piece_at(to);
        if target.is_some_and(|pc| pc.color == us) {
            continue;
        }
        if !square_under_attack(state, to) {
            out.push(Move::new(from, to, king, target));
        }
    }
}

fn gen_castle(state: &GameState, from: Square, us: Color, out: &mut Vec<Move>) {
    let row = us.home_row();
    if from != Square::new(row, 4) {
        return;
    }
    let Some(king) = state.piece_at(from) else {
        return;
    };
    let rights = state.castling_rights();
    let rook = Some(Piece::new(us, PieceKind::Rook));
    let empty = |cols: &[u8]| cols.iter().all(|&c| state.piece_at(Square::new(row, c)).is_none());
    let safe = |cols: &[u8]| cols.iter().all(|&c| !square_under_attack(state, Square::new(row, c)));

    // King side: f and g empty and not attacked.
    if rights.king_side(us)
        && state.piece_at(Square::new(row, 7)) == rook
        && empty(&[5, 6])
        && safe(&[5, 6])
    {
        out.push(Move::castle(from, Square::new(row, 6), king));
    }
    // Queen side: b, c and d empty; only d and c must be safe.
    if rights.queen_side(us)
        && state.piece_at(Square::new(row, 0)) == rook
        && empty(&[1, 2, 3])
        && safe(&[3, 2])
    {
        out.push(Move::castle(from, Square::new(row, 2), king));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
