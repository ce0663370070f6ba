//! CNF-style pattern formulas and their text format
//!
//! A [`Literal`] tests one state cell, a [`Clause`] is an OR of literals, a
//! [`Formula`] is an AND of clauses. A [`FormulaSet`] is what one rule file
//! holds: a parameter line followed by `clauses × formulas` clause lines.
//!
//! ```text
//! c 113_1.cnf
//! c field = 113
//! p cnf 2 1
//! -224 -225
//! 226 228
//! ```
//!
//! Literals are state cell indices; a leading `-` negates (so `-0` is valid).

use std::fmt;

use crate::board::{GameState, Player};
use crate::config::tuning;

/// Reference to one state cell with a polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub cell: u32,
    pub negated: bool,
}

impl Literal {
    pub fn positive(cell: usize) -> Self {
        Self {
            cell: cell as u32,
            negated: false,
        }
    }

    pub fn negative(cell: usize) -> Self {
        Self {
            cell: cell as u32,
            negated: true,
        }
    }

    #[inline]
    pub fn is_satisfied(&self, state: &GameState) -> bool {
        state.cell(self.cell as usize) != self.negated
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "-{}", self.cell)
        } else {
            write!(f, "{}", self.cell)
        }
    }
}

/// Disjunction of literals
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    #[inline]
    pub fn is_satisfied(&self, state: &GameState) -> bool {
        self.literals.iter().any(|l| l.is_satisfied(state))
    }
}

/// Conjunction of clauses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Formula {
    pub clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Formula made of single-literal clauses
    pub fn conjunction(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            clauses: literals
                .into_iter()
                .map(|l| Clause::new(vec![l]))
                .collect(),
        }
    }

    #[inline]
    pub fn is_satisfied(&self, state: &GameState) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied(state))
    }

    /// Player whose stones this formula looks for.
    ///
    /// `Some` when every positive literal references the same player's cells.
    pub fn owner(&self) -> Option<Player> {
        let mut owner = None;
        for lit in self.clauses.iter().flat_map(|c| &c.literals) {
            if lit.negated {
                continue;
            }
            let player = Player::of_cell(lit.cell as usize);
            match owner {
                None => owner = Some(player),
                Some(p) if p != player => return None,
                Some(_) => {}
            }
        }
        owner
    }

    pub(crate) fn max_cell(&self) -> Option<u32> {
        self.clauses
            .iter()
            .flat_map(|c| &c.literals)
            .map(|l| l.cell)
            .max()
    }
}

/// Error from [`FormulaSet::parse`], positioned by 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// Formulas of one rule file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormulaSet {
    /// Literal width from a three-number parameter line, if present
    pub width: Option<usize>,
    /// Clauses per formula
    pub clause_count: usize,
    pub formulas: Vec<Formula>,
}

/// Lines starting with this marker are comments
pub const COMMENT_MARKER: char = 'c';

impl FormulaSet {
    pub fn new(clause_count: usize, formulas: Vec<Formula>) -> Self {
        debug_assert!(formulas.iter().all(|f| f.clauses.len() == clause_count));
        Self {
            width: None,
            clause_count,
            formulas,
        }
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Number of formulas satisfied by the state
    #[inline]
    pub fn count_satisfied(&self, state: &GameState) -> usize {
        self.formulas.iter().filter(|f| f.is_satisfied(state)).count()
    }

    /// Parse the rule file text format.
    ///
    /// ```
    /// use gomoku::rules::FormulaSet;
    ///
    /// let set = FormulaSet::parse("c demo\np cnf 2 1\n-0 1\n4\n").unwrap();
    /// assert_eq!(set.clause_count, 2);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_bounded(text, usize::MAX)
    }

    /// Parse, rejecting literals on cells `>= cell_count`
    pub fn parse_bounded(text: &str, cell_count: usize) -> Result<Self, ParseError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with(COMMENT_MARKER));

        let (param_line, params) = lines
            .next()
            .ok_or_else(|| ParseError::new(0, "missing parameter line"))?;
        let (width, clause_count, formula_count) = parse_parameters(params)
            .map_err(|reason| ParseError::new(param_line, reason))?;

        if clause_count == 0 && formula_count > 0 {
            return Err(ParseError::new(
                param_line,
                "formulas declared with zero clauses",
            ));
        }

        let mut formulas = Vec::with_capacity(formula_count);
        let mut clauses = Vec::with_capacity(clause_count);
        let mut last_line = param_line;
        for (line_no, line) in lines {
            last_line = line_no;
            if formulas.len() == formula_count {
                return Err(ParseError::new(
                    line_no,
                    format!("more than {} clause lines", clause_count * formula_count),
                ));
            }
            let literals = line
                .split_whitespace()
                .map(|token| parse_literal(token, cell_count))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|reason| ParseError::new(line_no, reason))?;
            clauses.push(Clause::new(literals));
            if clauses.len() == clause_count {
                formulas.push(Formula::new(std::mem::take(&mut clauses)));
            }
        }

        if formulas.len() != formula_count || !clauses.is_empty() {
            return Err(ParseError::new(
                last_line,
                format!(
                    "expected {} clause lines, found {}",
                    clause_count * formula_count,
                    formulas.len() * clause_count + clauses.len()
                ),
            ));
        }

        Ok(Self {
            width,
            clause_count,
            formulas,
        })
    }

    pub(crate) fn max_cell(&self) -> Option<u32> {
        self.formulas.iter().filter_map(Formula::max_cell).max()
    }
}

impl fmt::Display for FormulaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.width {
            Some(width) => writeln!(
                f,
                "p cnf {} {} {}",
                width,
                self.clause_count,
                self.formulas.len()
            )?,
            None => writeln!(f, "p cnf {} {}", self.clause_count, self.formulas.len())?,
        }
        for formula in &self.formulas {
            for clause in &formula.clauses {
                let line = clause
                    .literals
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

/// Parameter line: optional `p cnf` prefix, then `[width] clauses formulas`
fn parse_parameters(line: &str) -> Result<(Option<usize>, usize, usize), String> {
    let numbers = line
        .split_whitespace()
        .skip_while(|t| t.parse::<usize>().is_err())
        .map(|t| {
            t.parse::<usize>()
                .map_err(|_| format!("invalid parameter '{t}'"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match numbers.as_slice() {
        [width, clauses, formulas] => Ok((Some(*width), *clauses, *formulas)),
        [clauses, formulas] => Ok((None, *clauses, *formulas)),
        _ => Err(format!("expected 2 or 3 parameters in '{line}'")),
    }
}

fn parse_literal(token: &str, cell_count: usize) -> Result<Literal, String> {
    let (negated, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let cell = digits
        .parse::<u32>()
        .map_err(|_| format!("invalid literal '{token}'"))?;
    if cell as usize >= cell_count {
        return Err(format!("literal '{token}' outside {cell_count} cells"));
    }
    Ok(Literal { cell, negated })
}

/// Satisfaction counts of one formula over a labelled sample.
///
/// `s1`/`n1` count samples where the field was later taken (class 1) that
/// satisfy / do not satisfy the formula, `s0`/`n0` the same for class 0.
/// The acceptance tests are the ones the statistical rule generator applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormulaStats {
    pub s1: u32,
    pub n1: u32,
    pub s0: u32,
    pub n0: u32,
}

impl FormulaStats {
    /// Count satisfied/unsatisfied samples per class
    pub fn measure<'a>(
        formula: &Formula,
        samples: impl IntoIterator<Item = (&'a GameState, bool)>,
    ) -> Self {
        let mut stats = Self::default();
        for (state, occupied) in samples {
            match (occupied, formula.is_satisfied(state)) {
                (true, true) => stats.s1 += 1,
                (true, false) => stats.n1 += 1,
                (false, true) => stats.s0 += 1,
                (false, false) => stats.n0 += 1,
            }
        }
        stats
    }

    pub fn accepts_as_favor(&self) -> bool {
        let (s1, n1, s0, n0) = self.as_f64();
        s1 + n0 > tuning::FAVOR_SEPARATION * (s0 + n1) && s1 > tuning::FAVOR_SUPPORT * n1
    }

    pub fn accepts_as_disfavor(&self) -> bool {
        let (s1, n1, s0, n0) = self.as_f64();
        s0 + n1 > tuning::DISFAVOR_SEPARATION * (s1 + n0)
            && n1 >= tuning::DISFAVOR_REJECTION * s1
    }

    fn as_f64(&self) -> (f64, f64, f64, f64) {
        (
            f64::from(self.s1),
            f64::from(self.n1),
            f64::from(self.s0),
            f64::from(self.n0),
        )
    }
}
