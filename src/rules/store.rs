//! Rule store: main and pattern formulas per field
//!
//! Main rules exist for the canonical wedge only. Any other field is scored
//! by reflecting it, together with the game state, into the wedge. A rule
//! library on disk looks like:
//!
//! ```text
//! rules/
//!   main/{f}_0.cnf          disfavor formulas of canonical field f
//!   main/{f}_1.cnf          favor formulas of canonical field f
//!   additional/{f}_{tag}.cnf  pattern formulas of field f
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use super::checkers;
use super::formula::FormulaSet;
use super::win::WinRule;
use super::PatternKind;
use crate::board::{canonical_fields, classify, symmetry::is_canonical, GameState, Player, ORIENTATIONS};
use crate::error::{Error, Result};

/// Favor and disfavor formulas of one canonical field
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    pub favor: FormulaSet,
    pub disfavor: FormulaSet,
}

impl FieldRules {
    /// `satisfied(favor) - satisfied(disfavor)`
    #[inline]
    pub fn score(&self, state: &GameState) -> i32 {
        self.favor.count_satisfied(state) as i32 - self.disfavor.count_satisfied(state) as i32
    }
}

/// One tactical formula set of a field
#[derive(Debug, Clone)]
pub struct PatternRules {
    pub kind: PatternKind,
    pub set: FormulaSet,
    /// Player each formula looks for, parallel to `set.formulas`
    owners: Vec<Option<Player>>,
}

impl PatternRules {
    pub fn new(kind: PatternKind, set: FormulaSet) -> Self {
        let owners = set.formulas.iter().map(|f| f.owner()).collect();
        Self { kind, set, owners }
    }

    /// Satisfied formulas with their owner
    pub fn satisfied_owners<'a>(
        &'a self,
        state: &'a GameState,
    ) -> impl Iterator<Item = Option<Player>> + 'a {
        self.set
            .formulas
            .iter()
            .zip(&self.owners)
            .filter(move |(f, _)| f.is_satisfied(state))
            .map(|(_, owner)| *owner)
    }
}

/// Satisfied pattern formulas of one field, by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternScore {
    pub four: u32,
    pub three: u32,
    pub nearby: u32,
    pub other: u32,
}

impl PatternScore {
    #[inline]
    pub fn total(&self) -> u32 {
        self.four + self.three + self.nearby + self.other
    }

    fn add(&mut self, kind: PatternKind, n: u32) {
        match kind {
            PatternKind::Four => self.four += n,
            PatternKind::Three => self.three += n,
            PatternKind::Nearby => self.nearby += n,
            PatternKind::Other => self.other += n,
        }
    }
}

/// Immutable rule library for one board size
#[derive(Debug, Clone)]
pub struct RuleStore {
    size: usize,
    /// Main rules indexed by field; `None` off the wedge
    main: Vec<Option<FieldRules>>,
    /// Pattern rules indexed by field
    patterns: Vec<Vec<PatternRules>>,
}

impl RuleStore {
    /// Start an in-memory store for an N×N board
    pub fn builder(size: usize) -> RuleStoreBuilder {
        RuleStoreBuilder::new(size)
    }

    /// Load a rule library from disk.
    ///
    /// Every canonical field needs both main files. Without an `additional/`
    /// directory the pattern rules are generated with [`WinRule::Exact`].
    pub fn load(dir: impl AsRef<Path>, size: usize) -> Result<Self> {
        Self::load_with_rule(dir, size, WinRule::default())
    }

    /// Like [`RuleStore::load`], generating missing pattern rules for `rule`.
    pub fn load_with_rule(dir: impl AsRef<Path>, size: usize, rule: WinRule) -> Result<Self> {
        let dir = dir.as_ref();
        let start = Instant::now();
        if !dir.is_dir() {
            return Err(Error::RuleFileMissing {
                path: dir.to_path_buf(),
            });
        }
        let cell_count = 2 * size * size;
        let mut builder = Self::builder(size);

        let main_dir = dir.join("main");
        for field in canonical_fields(size) {
            let disfavor = read_set(&main_dir.join(format!("{field}_0.cnf")), cell_count)?;
            let favor = read_set(&main_dir.join(format!("{field}_1.cnf")), cell_count)?;
            builder.insert_main(field, FieldRules { favor, disfavor });
        }

        let additional_dir = dir.join("additional");
        if additional_dir.is_dir() {
            for (path, field, kind) in pattern_files(&additional_dir, size)? {
                let set = read_set(&path, cell_count)?;
                builder.insert_pattern(field, kind, set);
            }
        } else {
            warn!(
                path = %additional_dir.display(),
                ?rule,
                "no pattern rule files, using built-in line checkers"
            );
            builder = builder.line_checkers(rule);
        }

        let store = builder.build()?;
        info!(
            size,
            main_fields = store.main.iter().flatten().count(),
            main_formulas = store.main_formula_count(),
            pattern_formulas = store.pattern_formula_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded rule library from {}",
            dir.display()
        );
        Ok(store)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn main_formula_count(&self) -> usize {
        self.main
            .iter()
            .flatten()
            .map(|r| r.favor.len() + r.disfavor.len())
            .sum()
    }

    pub fn pattern_formula_count(&self) -> usize {
        self.patterns.iter().flatten().map(|p| p.set.len()).sum()
    }

    /// Main rules of a canonical field
    pub fn field_rules(&self, field: usize) -> Option<&FieldRules> {
        self.main.get(field).and_then(Option::as_ref)
    }

    /// Pattern rules of any field
    pub fn pattern_rules(&self, field: usize) -> &[PatternRules] {
        self.patterns.get(field).map_or(&[], Vec::as_slice)
    }

    /// Reject states built for another board size
    pub fn check_state(&self, state: &GameState) -> Result<()> {
        let expected = 2 * self.size * self.size;
        if state.cell_count() != expected {
            return Err(Error::InvalidStateLength {
                expected,
                got: state.cell_count(),
            });
        }
        Ok(())
    }

    fn check_field(&self, field: usize) -> Result<()> {
        if !(1..=self.size * self.size).contains(&field) {
            return Err(Error::InvalidField {
                field,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Main-rule score of one field, evaluated in its canonical orientation
    pub fn evaluate_field(&self, field: usize, state: &GameState) -> Result<i32> {
        self.check_state(state)?;
        self.check_field(field)?;
        let chain = classify(field, self.size);
        let canonical = chain.apply_field(field, self.size);
        let oriented = chain.apply_state(state);
        Ok(self.field_rules(canonical).map_or(0, |r| r.score(&oriented)))
    }

    /// Main-rule scores of every empty field.
    ///
    /// Each field keeps its best score over the 8 orientations of the board.
    /// Sorted by score descending, then field ascending.
    pub fn evaluate_all(&self, state: &GameState) -> Result<Vec<(i32, usize)>> {
        self.check_state(state)?;
        Ok(self.rank_fields(state))
    }

    pub(crate) fn rank_fields(&self, state: &GameState) -> Vec<(i32, usize)> {
        let size = self.size;
        let mut best: HashMap<usize, i32> = HashMap::with_capacity(size * size);
        let wedge = canonical_fields(size);
        for chain in ORIENTATIONS {
            let oriented = chain.apply_state(state);
            for &canonical in &wedge {
                let score = self.field_rules(canonical).map_or(0, |r| r.score(&oriented));
                let field = chain.revert_field(canonical, size);
                best.entry(field)
                    .and_modify(|s| *s = (*s).max(score))
                    .or_insert(score);
            }
        }
        let mut ranked: Vec<(i32, usize)> = best
            .into_iter()
            .filter(|&(field, _)| !state.is_occupied(field))
            .map(|(field, score)| (score, field))
            .collect();
        ranked.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked
    }

    /// Satisfied pattern formulas of one field, by kind
    pub fn pattern_score(&self, field: usize, state: &GameState) -> Result<PatternScore> {
        self.check_state(state)?;
        self.check_field(field)?;
        Ok(self.score_patterns(field, state))
    }

    pub(crate) fn score_patterns(&self, field: usize, state: &GameState) -> PatternScore {
        let mut score = PatternScore::default();
        for rules in self.pattern_rules(field) {
            score.add(rules.kind, rules.set.count_satisfied(state) as u32);
        }
        score
    }

    /// Empty fields with at least one satisfied pattern formula, ascending
    pub fn flagged_fields(&self, state: &GameState) -> Result<Vec<usize>> {
        self.check_state(state)?;
        Ok(self.flagged(state).map(|(field, _)| field).collect())
    }

    pub(crate) fn flagged<'a>(
        &'a self,
        state: &'a GameState,
    ) -> impl Iterator<Item = (usize, PatternScore)> + 'a {
        state
            .empty_fields()
            .map(move |field| (field, self.score_patterns(field, state)))
            .filter(|(_, score)| score.total() > 0)
    }
}

/// In-memory construction of a [`RuleStore`].
///
/// ```
/// use gomoku::board::GameState;
/// use gomoku::rules::{RuleStore, WinRule};
///
/// let store = RuleStore::builder(15).line_checkers(WinRule::Exact).build().unwrap();
/// let empty = GameState::new(15);
/// assert!(store.flagged_fields(&empty).unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct RuleStoreBuilder {
    size: usize,
    main: Vec<Option<FieldRules>>,
    patterns: Vec<Vec<PatternRules>>,
}

impl RuleStoreBuilder {
    fn new(size: usize) -> Self {
        let fields = size * size + 1;
        Self {
            size,
            main: vec![None; fields],
            patterns: vec![Vec::new(); fields],
        }
    }

    /// Set the main rules of a canonical field
    pub fn main_rules(mut self, field: usize, favor: FormulaSet, disfavor: FormulaSet) -> Self {
        self.insert_main(field, FieldRules { favor, disfavor });
        self
    }

    /// Add a pattern formula set to a field
    pub fn pattern(mut self, field: usize, kind: PatternKind, set: FormulaSet) -> Self {
        self.insert_pattern(field, kind, set);
        self
    }

    /// Add the geometric line checkers of every field
    pub fn line_checkers(mut self, rule: WinRule) -> Self {
        for field in 1..=self.size * self.size {
            for (kind, set) in checkers::field_checkers(field, self.size, rule) {
                self.insert_pattern(field, kind, set);
            }
        }
        self
    }

    fn insert_main(&mut self, field: usize, rules: FieldRules) {
        if let Some(slot) = self.main.get_mut(field) {
            *slot = Some(rules);
        } else {
            // keep the out-of-range field so build() reports it
            self.main.resize(field + 1, None);
            self.main[field] = Some(rules);
        }
    }

    fn insert_pattern(&mut self, field: usize, kind: PatternKind, set: FormulaSet) {
        if field >= self.patterns.len() {
            self.patterns.resize(field + 1, Vec::new());
        }
        self.patterns[field].push(PatternRules::new(kind, set));
    }

    /// Validate fields and literals
    pub fn build(self) -> Result<RuleStore> {
        let size = self.size;
        let field_count = size * size;
        let cell_count = 2 * field_count;
        let invalid = |field: usize, reason: String| Error::MalformedRuleFile {
            path: PathBuf::from(format!("<field {field}>")),
            line: 0,
            reason,
        };

        for (field, rules) in self.main.iter().enumerate() {
            let Some(rules) = rules else { continue };
            if field == 0 || field > field_count || !is_canonical(field, size) {
                return Err(Error::InvalidField { field, size });
            }
            for set in [&rules.favor, &rules.disfavor] {
                if let Some(cell) = set.max_cell().filter(|&c| c as usize >= cell_count) {
                    return Err(invalid(field, format!("literal on cell {cell} outside {cell_count} cells")));
                }
            }
        }
        for (field, rules) in self.patterns.iter().enumerate() {
            if rules.is_empty() {
                continue;
            }
            if field == 0 || field > field_count {
                return Err(Error::InvalidField { field, size });
            }
            for r in rules {
                if let Some(cell) = r.set.max_cell().filter(|&c| c as usize >= cell_count) {
                    return Err(invalid(field, format!("literal on cell {cell} outside {cell_count} cells")));
                }
            }
        }

        let mut main = self.main;
        let mut patterns = self.patterns;
        main.truncate(field_count + 1);
        patterns.truncate(field_count + 1);
        Ok(RuleStore {
            size,
            main,
            patterns,
        })
    }
}

fn read_set(path: &Path, cell_count: usize) -> Result<FormulaSet> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::RuleFileMissing {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    FormulaSet::parse_bounded(&text, cell_count).map_err(|e| Error::MalformedRuleFile {
        path: path.to_path_buf(),
        line: e.line,
        reason: e.reason,
    })
}

/// `{field}_{tag}.cnf` files of a pattern directory, sorted by name
fn pattern_files(dir: &Path, size: usize) -> Result<Vec<(PathBuf, usize, PatternKind)>> {
    let io_err = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("cnf") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some((field, tag)) = stem.split_once('_') else {
            continue;
        };
        let Ok(field) = field.parse::<usize>() else {
            continue;
        };
        if !(1..=size * size).contains(&field) {
            return Err(Error::MalformedRuleFile {
                path,
                line: 0,
                reason: format!("field {field} outside a {size}x{size} board"),
            });
        }
        let kind = PatternKind::from_file_tag(tag);
        files.push((path, field, kind));
    }
    files.sort();
    Ok(files)
}
