//! Search module for the engine
//!
//! Contains:
//! - Candidate move policies (all, nearby, formula-guided)
//! - Depth-limited minimax with alpha-beta pruning

pub mod candidates;
pub mod minimax;

pub use candidates::CandidateGenerator;
pub use minimax::{SearchResult, Searcher, WIN_SCORE};

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total alpha-beta cutoffs
    pub beta_cutoffs: u64,
    /// Cutoffs on the first candidate tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Depth-horizon leaves scored
    pub leaf_evaluations: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_rate() {
        assert_eq!(SearchStats::default().first_move_rate(), 0.0);
        let stats = SearchStats {
            beta_cutoffs: 4,
            first_move_cutoffs: 3,
            leaf_evaluations: 0,
        };
        assert_eq!(stats.first_move_rate(), 75.0);
    }
}
