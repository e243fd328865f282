pub mod attacks;
pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use attacks::{analyze, square_under_attack, Analysis, Check, Pin};
pub use board::*;
pub use error::*;
pub use movegen::*;
pub use perft::perft;
pub use types::*;

// =============================================================================
// Engine trait, implemented by automated players
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation in centipawns, positive favouring White
    pub score: i32,
    /// Search depth requested
    pub depth: u8,
    /// Number of nodes searched (for stats)
    pub nodes: u64,
    /// Whether the move came from the opening table rather than search
    pub from_book: bool,
}

/// Trait that automated players implement.
///
/// The engine searches by applying and undoing moves on the caller's state;
/// on return the state is exactly as it was handed in.
pub trait Engine {
    /// Pick a move for the side to move, looking `depth` plies ahead.
    fn best_move(&mut self, state: &mut GameState, depth: u8) -> SearchResult;

    /// Returns the engine's name for display
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
