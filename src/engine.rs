//! Main AI Engine integrating rule store, win detection and search
//!
//! The engine picks a move by trying, in order:
//!
//! 1. **No move**: the board is full
//! 2. **Opening**: on an empty board, a random pick among the top-ranked fields
//! 3. **Immediate win**: a pattern-flagged field that completes a five
//! 4. **Block**: a pattern-flagged field where the opponent would complete a five
//! 5. **Search**: minimax over the configured candidates, ties broken at random
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gomoku::{AIEngine, EngineConfig, GameState, Player, RuleStore, WinRule};
//!
//! let store = RuleStore::builder(15).line_checkers(WinRule::Exact).build().unwrap();
//! let engine = AIEngine::new(Arc::new(store), EngineConfig::default()).unwrap();
//!
//! let mut state = GameState::new(15);
//! state.place(113, Player::First).unwrap();
//!
//! let result = engine.get_move_with_stats(&state, Player::Second).unwrap();
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::board::{GameState, Player};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::rules::{has_five_at, RuleStore};
use crate::search::{SearchResult, Searcher};

/// Type of step that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Empty board: pick among the top-ranked opening fields
    Opening,
    /// Move completes a five for the mover
    ImmediateWin,
    /// Move takes the field where the opponent would complete a five
    Block,
    /// Regular minimax search result
    Search,
    /// No legal move (board full or no candidates)
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<usize>,
    /// Main-rule score for openings, minimax score for searches,
    /// ±1 for wins and blocks
    pub score: f64,
    /// Type of step that found this move
    pub search_type: SearchType,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn opening(field: usize, score: i32, time_ms: u64) -> Self {
        Self {
            best_move: Some(field),
            score: f64::from(score),
            search_type: SearchType::Opening,
            nodes: 0,
            time_ms,
        }
    }

    #[inline]
    fn immediate_win(field: usize, nodes: u64, time_ms: u64) -> Self {
        Self {
            best_move: Some(field),
            score: 1.0,
            search_type: SearchType::ImmediateWin,
            nodes,
            time_ms,
        }
    }

    #[inline]
    fn block(field: usize, nodes: u64, time_ms: u64) -> Self {
        Self {
            best_move: Some(field),
            score: -1.0,
            search_type: SearchType::Block,
            nodes,
            time_ms,
        }
    }

    /// Create a result from minimax search with the tie-broken move
    #[inline]
    fn from_search(result: &SearchResult, field: usize, time_ms: u64) -> Self {
        Self {
            best_move: Some(field),
            score: result.score,
            search_type: SearchType::Search,
            nodes: result.nodes,
            time_ms,
        }
    }

    #[inline]
    fn no_move(nodes: u64, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0.0,
            search_type: SearchType::NoMove,
            nodes,
            time_ms,
        }
    }
}

/// Move-selection engine.
///
/// Shares an immutable [`RuleStore`]; `&self` methods make it safe to run
/// several engines (one per player, say) on separate threads.
#[derive(Debug, Clone)]
pub struct AIEngine {
    store: Arc<RuleStore>,
    config: EngineConfig,
}

impl AIEngine {
    /// Create an engine, validating the configuration.
    pub fn new(store: Arc<RuleStore>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &Arc<RuleStore> {
        &self.store
    }

    /// Set search depth in plies
    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    /// Toggle heuristic scoring of depth-limited leaves
    pub fn set_evaluation(&mut self, enabled: bool) {
        self.config.evaluation_enabled = enabled;
    }

    /// Get the best move for the given position.
    ///
    /// `Ok(None)` means there is no move to make (game over).
    pub fn get_best_move(&self, state: &GameState, player: Player) -> Result<Option<usize>> {
        Ok(self.get_move_with_stats(state, player)?.best_move)
    }

    /// Get the best move with detailed search statistics.
    ///
    /// # Arguments
    ///
    /// * `state` - Current game state; must match the store's board size
    /// * `player` - Player to move
    pub fn get_move_with_stats(&self, state: &GameState, player: Player) -> Result<MoveResult> {
        let start = Instant::now();
        let elapsed = || start.elapsed().as_millis() as u64;
        self.store.check_state(state)?;
        let mut rng = self.rng();

        // 0. Nothing left to play
        if state.is_full() {
            return Ok(self.log(MoveResult::no_move(0, elapsed())));
        }

        // 1. Opening: no stones yet, skip the search
        if state.is_empty() {
            let ranking = self.store.rank_fields(state);
            let top = ranking.first().map_or(0, |&(score, _)| score);
            let best: Vec<usize> = ranking
                .iter()
                .take_while(|&&(score, _)| score == top)
                .map(|&(_, field)| field)
                .collect();
            if let Some(&field) = best.choose(&mut rng) {
                return Ok(self.log(MoveResult::opening(field, top, elapsed())));
            }
        }

        // 2-3. Tactical shortcuts on pattern-flagged fields
        let flagged = self.store.flagged_fields(state)?;
        let mut work = state.clone();
        let mut nodes = 0;
        for mover in [player, player.opponent()] {
            for &field in &flagged {
                nodes += 1;
                if self.completes_five(&mut work, field, mover) {
                    let time_ms = elapsed();
                    let result = if mover == player {
                        MoveResult::immediate_win(field, nodes, time_ms)
                    } else {
                        MoveResult::block(field, nodes, time_ms)
                    };
                    return Ok(self.log(result));
                }
            }
        }

        // 4. Search
        let result = Searcher::new(&self.store, &self.config).search(&mut work, player)?;
        let nodes = nodes + result.nodes;
        let picked = match result.best_moves.choose(&mut rng) {
            Some(&field) => MoveResult::from_search(&result, field, elapsed()),
            None => MoveResult::no_move(nodes, elapsed()),
        };
        Ok(self.log(MoveResult { nodes, ..picked }))
    }

    fn completes_five(&self, state: &mut GameState, field: usize, player: Player) -> bool {
        let trial = state.trial(field, player);
        has_five_at(&trial, field, player, self.config.win_rule)
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn log(&self, result: MoveResult) -> MoveResult {
        debug!(
            search_type = ?result.search_type,
            field = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "move selected"
        );
        result
    }
}
