//! Check and pin detection by ray casting.
//!
//! Rays are cast in the eight queen directions from the side-to-move's king:
//! - the first allied piece on a ray is a pin candidate, a second ends the ray
//! - an enemy piece able to strike along the ray is a check (nothing between)
//!   or confirms the pin (one ally between)
//! - knights are found by direct offset lookup
//!
//! [`square_under_attack`] runs the same scan from any square, which is how
//! king destinations and castling transit squares are validated.

use crate::board::GameState;
use crate::types::{Color, Piece, PieceKind, Square};

/// Orthogonal directions as (row delta, column delta).
pub const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
/// Diagonal directions as (row delta, column delta).
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, 2),
    (1, -2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// An allied piece that may only move along `dir` (or its reverse).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    /// Direction from the king towards the pinned piece.
    pub dir: (i8, i8),
}

/// An enemy piece giving check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Check {
    pub square: Square,
    /// Direction from the king towards the checker; the jump itself for knights.
    pub dir: (i8, i8),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl Analysis {
    /// Pin direction for the piece on `sq`, if it is pinned.
    pub fn pin_on(&self, sq: Square) -> Option<(i8, i8)> {
        self.pins.iter().find(|p| p.square == sq).map(|p| p.dir)
    }

    pub fn is_double_check(&self) -> bool {
        self.checks.len() > 1
    }
}

/// Checks and pins against the side to move.
pub fn analyze(state: &GameState) -> Analysis {
    let us = state.side_to_move();
    scan(state, state.king_square(us), us)
}

/// Whether the opponent of the side to move attacks `sq`.
pub fn square_under_attack(state: &GameState, sq: Square) -> bool {
    scan(state, sq, state.side_to_move()).in_check
}

fn scan(state: &GameState, origin: Square, us: Color) -> Analysis {
    let mut out = Analysis::default();

    let rays = ORTHOGONALS
        .iter()
        .map(|&d| (d, false))
        .chain(DIAGONALS.iter().map(|&d| (d, true)));

    for ((dr, dc), diagonal) in rays {
        let mut candidate: Option<Square> = None;
        let mut cur = origin;
        let mut distance = 0u8;
        while let Some(next) = cur.offset(dr, dc) {
            cur = next;
            distance += 1;
            let Some(pc) = state.piece_at(cur) else {
                continue;
            };
            if pc.color == us {
                // Our own king never shields anything from its own square.
                if pc.kind == PieceKind::King {
                    continue;
                }
                if candidate.is_none() {
                    candidate = Some(cur);
                    continue;
                }
                break;
            }
            if strikes_along(pc, dr, distance, diagonal) {
                match candidate {
                    None => {
                        out.in_check = true;
                        out.checks.push(Check {
                            square: cur,
                            dir: (dr, dc),
                        });
                    }
                    Some(pinned) => out.pins.push(Pin {
                        square: pinned,
                        dir: (dr, dc),
                    }),
                }
            }
            break;
        }
    }

    for (dr, dc) in KNIGHT_OFFSETS {
        if let Some(sq) = origin.offset(dr, dc) {
            if let Some(pc) = state.piece_at(sq) {
                if pc.color != us && pc.kind == PieceKind::Knight {
                    out.in_check = true;
                    out.checks.push(Check {
                        square: sq,
                        dir: (dr, dc),
                    });
                }
            }
        }
    }

    out
}

/// Can enemy `pc`, found `distance` steps away along `(dr, _)`, hit the origin?
fn strikes_along(pc: Piece, dr: i8, distance: u8, diagonal: bool) -> bool {
    match pc.kind {
        PieceKind::Queen => true,
        PieceKind::Rook => !diagonal,
        PieceKind::Bishop => diagonal,
        PieceKind::King => distance == 1,
        // A pawn attacks the origin from one step behind it (from the pawn's point of view).
        PieceKind::Pawn => distance == 1 && diagonal && dr == -pc.color.forward(),
        PieceKind::Knight => false,
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
