//! Formula-guided five-in-a-row AI
//!
//! An engine for the five-in-a-row game on an N×N board, guided by a library
//! of boolean rule formulas in CNF:
//! - Main rules per field: `favor` and `disfavor` formula sets, stored once
//!   per symmetry class and evaluated across the 8 board orientations
//! - Pattern rules per field: four/three-in-line and nearby checkers that
//!   flag tactical fields
//! - Exactly five in a line wins (overlines optionally allowed)
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Game state as a bitset of player cells, coordinates, symmetry
//! - [`rules`]: CNF formulas, the rule store, line checkers, win detection
//! - [`eval`]: Leaf heuristic over satisfied pattern formulas
//! - [`search`]: Candidate policies and minimax with alpha-beta pruning
//! - [`engine`]: Main AI engine integrating all components
//! - [`worker`]: Background move computation
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use gomoku::{AIEngine, EngineConfig, GameState, Player, RuleStore, WinRule};
//!
//! // In-memory store with the geometric checkers only
//! let store = RuleStore::builder(15).line_checkers(WinRule::Exact).build().unwrap();
//! let engine = AIEngine::new(Arc::new(store), EngineConfig::default()).unwrap();
//!
//! let mut state = GameState::new(15);
//! state.place(113, Player::First).unwrap();
//!
//! // AI responds as the second player
//! if let Some(field) = engine.get_best_move(&state, Player::Second).unwrap() {
//!     state.place(field, Player::Second).unwrap();
//! }
//! assert_eq!(state.stone_count(), 2);
//! ```
//!
//! Rule libraries on disk are loaded with [`RuleStore::load`].
//!
//! # Move Priority
//!
//! 1. Opening book from main rules on an empty board
//! 2. Immediate winning move
//! 3. Block of the opponent's winning move
//! 4. Minimax over formula-guided candidates

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod worker;

// Re-export commonly used types for convenience
pub use board::{GameState, Player};
pub use config::{CandidatePolicy, EngineConfig};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{Error, Result};
pub use rules::{RuleStore, WinRule};
pub use worker::MoveWorker;
