//! Static evaluation for the search
//!
//! Depth-limited leaves are scored from the tactical pattern rules: how many
//! four and three patterns each player has available on the empty fields.

pub mod heuristic;

pub use heuristic::{evaluate, pattern_balance};
