//! Rule library for move selection
//!
//! This module implements the knowledge the engine plays from:
//! - CNF pattern formulas and their file format
//! - The per-field rule store with symmetry-aware evaluation
//! - Geometric line checkers (three/four in line, nearby)
//! - Win conditions (five in a row)

pub mod checkers;
pub mod formula;
pub mod store;
pub mod win;

// Re-exports for convenient access
pub use formula::{Clause, Formula, FormulaSet, FormulaStats, Literal, ParseError};
pub use store::{FieldRules, PatternRules, PatternScore, RuleStore, RuleStoreBuilder};
pub use win::{find_five, has_five, has_five_at, winner, WinRule, WIN_LENGTH};

/// Tactical role of a pattern formula set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKind {
    /// Completes a five when played
    Four,
    /// Makes a four with room to grow
    Three,
    /// Field touches an occupied neighbour
    Nearby,
    Other,
}

impl PatternKind {
    /// Classify a rule file by the tag after `{field}_` in its name
    pub fn from_file_tag(tag: &str) -> Self {
        if tag.starts_with("4_checker") {
            PatternKind::Four
        } else if tag.starts_with("3_checker") {
            PatternKind::Three
        } else if tag.starts_with("nearby") {
            PatternKind::Nearby
        } else {
            PatternKind::Other
        }
    }
}
