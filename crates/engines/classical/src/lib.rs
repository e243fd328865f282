//! Classical Chess Engine
//!
//! Alpha-beta minimax over a material, mobility and castling evaluation,
//! with a small opening book for the first few plies.

mod config;
mod eval;
mod opening;
mod search;

use chess_core::{Engine, GameState, SearchResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

pub use config::{ConfigError, EngineConfig, EvalWeights};
pub use eval::{evaluate, material};
pub use opening::{BookLine, BookMove, OpeningBook};
pub use search::{alpha_beta, order_moves, pick_best_move, INFINITY};

/// Classical chess engine using minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Minimax search with alpha-beta pruning, White maximising
/// - Material, mobility and castling evaluation
/// - Repetition and stalemate scored as a penalty for the side steering into them
/// - A hard-coded opening book while the game is young
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    config: EngineConfig,
    book: OpeningBook,
    rng: StdRng,
    /// Node counter for statistics
    nodes: u64,
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ClassicalEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = seeded_rng(config.seed);
        Self {
            config,
            book: OpeningBook::standard(),
            rng,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Search at the configured depth.
    pub fn search_default(&mut self, state: &mut GameState) -> SearchResult {
        let depth = self.config.depth;
        self.best_move(state, depth)
    }

    fn book_move(&mut self, state: &mut GameState, depth: u8) -> Option<SearchResult> {
        if !self.config.use_opening_book || state.move_log().len() > self.config.book_max_plies {
            return None;
        }
        let hit = self.book.pick(state, &mut self.rng)?;
        debug!(mv = %hit.mv, line = hit.line, "opening book move");
        Some(SearchResult {
            best_move: Some(hit.mv),
            score: evaluate(state, &self.config.weights),
            depth,
            nodes: 0,
            from_book: true,
        })
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl Engine for ClassicalEngine {
    fn best_move(&mut self, state: &mut GameState, depth: u8) -> SearchResult {
        self.nodes = 0;

        let result = match self.book_move(state, depth) {
            Some(result) => result,
            None => {
                let outcome =
                    search::pick_best_move(state, depth, &self.config.weights, &mut self.nodes);
                if let Some((mv, score)) = outcome {
                    debug!(%mv, score, nodes = self.nodes, depth, "search finished");
                } else {
                    debug!(depth, "no legal moves");
                }
                SearchResult {
                    best_move: outcome.map(|(mv, _)| mv),
                    score: outcome.map(|(_, s)| s).unwrap_or(0),
                    depth,
                    nodes: self.nodes,
                    from_book: false,
                }
            }
        };

        state.refresh_in_check();
        result
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
        if self.config.seed.is_some() {
            self.rng = seeded_rng(self.config.seed);
        }
    }
}
