//! A small hard-coded opening book.
//!
//! Lines are keyed on the exact sequence of move ids played from the standard
//! starting position. Where a line offers several replies one is picked at
//! random, so games don't all open the same way.

use chess_core::{legal_moves, GameState, Move};
use rand::seq::SliceRandom;
use rand::Rng;

/// Move id of a two-square notation, evaluated at compile time.
const fn mv(notation: &str) -> u16 {
    let b = notation.as_bytes();
    let from_col = (b[0] - b'a') as u16;
    let from_row = (b'8' - b[1]) as u16;
    let to_col = (b[2] - b'a') as u16;
    let to_row = (b'8' - b[3]) as u16;
    from_row * 1000 + from_col * 100 + to_row * 10 + to_col
}

#[derive(Debug, Clone, Copy)]
pub struct BookLine {
    pub name: &'static str,
    /// Move ids played so far.
    pub after: &'static [u16],
    /// Candidate replies, as move ids.
    pub replies: &'static [u16],
}

const E4: u16 = mv("e2e4");
const D4: u16 = mv("d2d4");

const LINES: &[BookLine] = &[
    BookLine {
        name: "King's Pawn or Queen's Pawn",
        after: &[],
        replies: &[E4, D4],
    },
    BookLine {
        name: "Open Game, Sicilian or Caro-Kann",
        after: &[E4],
        replies: &[mv("e7e5"), mv("c7c5"), mv("c7c6")],
    },
    BookLine {
        name: "King's Knight Opening",
        after: &[E4, mv("e7e5")],
        replies: &[mv("g1f3")],
    },
    BookLine {
        name: "Sicilian: open or closed",
        after: &[E4, mv("c7c5")],
        replies: &[mv("g1f3"), mv("b1c3")],
    },
    BookLine {
        name: "Caro-Kann",
        after: &[E4, mv("c7c6")],
        replies: &[D4],
    },
    BookLine {
        name: "King's Knight Opening: Normal Variation",
        after: &[E4, mv("e7e5"), mv("g1f3")],
        replies: &[mv("b8c6")],
    },
    BookLine {
        name: "Sicilian: 2...d6",
        after: &[E4, mv("c7c5"), mv("g1f3")],
        replies: &[mv("d7d6")],
    },
    BookLine {
        name: "Closed Sicilian",
        after: &[E4, mv("c7c5"), mv("b1c3")],
        replies: &[mv("b8c6")],
    },
    BookLine {
        name: "Caro-Kann: main line",
        after: &[E4, mv("c7c6"), D4],
        replies: &[mv("d7d5")],
    },
    BookLine {
        name: "Italian Game",
        after: &[E4, mv("e7e5"), mv("g1f3"), mv("b8c6")],
        replies: &[mv("f1c4")],
    },
    BookLine {
        name: "Open Sicilian",
        after: &[E4, mv("c7c5"), mv("g1f3"), mv("d7d6")],
        replies: &[D4],
    },
    BookLine {
        name: "Indian Defence or Queen's Pawn Game",
        after: &[D4],
        replies: &[mv("g8f6"), mv("d7d5")],
    },
    BookLine {
        name: "Queen's Gambit",
        after: &[D4, mv("d7d5")],
        replies: &[mv("c2c4")],
    },
    BookLine {
        name: "Indian Defence: 2.c4",
        after: &[D4, mv("g8f6")],
        replies: &[mv("c2c4")],
    },
];

/// A move suggested by the book, with the name of the line it continues.
#[derive(Debug, Clone, Copy)]
pub struct BookMove {
    pub mv: Move,
    pub line: &'static str,
}

#[derive(Debug, Clone)]
pub struct OpeningBook {
    lines: &'static [BookLine],
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::standard()
    }
}

impl OpeningBook {
    pub fn standard() -> Self {
        Self { lines: LINES }
    }

    pub fn lines(&self) -> &'static [BookLine] {
        self.lines
    }

    /// The line continuing exactly the given sequence of move ids.
    pub fn line_for(&self, ids: &[u16]) -> Option<&'static BookLine> {
        self.lines.iter().find(|line| line.after == ids)
    }

    /// Pick a book reply for the side to move, uniformly among the line's
    /// replies that are legal here.
    ///
    /// Returns `None` when the game has left the book, or when it did not
    /// start from the standard position (e.g. set up from FEN).
    pub fn pick<R: Rng + ?Sized>(&self, state: &mut GameState, rng: &mut R) -> Option<BookMove> {
        let line = self.line_for(&state.move_ids())?;
        if !started_from_standard_position(state) {
            return None;
        }

        let legal: Vec<Move> = legal_moves(state)
            .into_iter()
            .filter(|m| line.replies.contains(&m.id()))
            .collect();
        state.clear_terminal_flags();

        legal.choose(rng).map(|&mv| BookMove {
            mv,
            line: line.name,
        })
    }
}

fn started_from_standard_position(state: &GameState) -> bool {
    let mut replay = GameState::new();
    for m in state.move_log() {
        if replay.play(m.from, m.to).is_err() {
            return false;
        }
    }
    replay.snapshot() == state.snapshot()
}

#[cfg(test)]
#[path = "opening_tests.rs"]
mod opening_tests;
