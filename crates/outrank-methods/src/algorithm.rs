//! Decision algorithm capability and selection by short code.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use outrank_core::{DecisionProblem, OutrankError, Result};

use crate::electre::OutrankingEngine;
use crate::event::StageListener;
use crate::promethee::PrometheeEngine;

/// A decision method that accepts data, runs, and saves its results.
///
/// Implemented by [`OutrankingEngine`] (ELECTRE) and [`PrometheeEngine`].
pub trait DecisionAlgorithm: Send + Debug {
    fn kind(&self) -> AlgorithmKind;

    /// Display name, e.g. `"ELECTRE"`.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Short selection code, e.g. `'e'`.
    fn code(&self) -> char {
        self.kind().code()
    }

    fn description(&self) -> &'static str {
        self.kind().description()
    }

    fn alt_info(&self) -> &'static str {
        self.kind().alt_info()
    }

    /// Replaces the decision matrix; clears any previous result.
    fn set_data(&mut self, matrix: Vec<Vec<f64>>);

    /// Replaces the criterion weights; clears any previous result.
    fn set_weights(&mut self, weights: Vec<f64>);

    /// Takes every input the method uses from `problem`.
    fn load(&mut self, problem: &DecisionProblem) -> Result<()>;

    fn add_listener(&mut self, listener: Arc<dyn StageListener>);

    fn run(&mut self) -> Result<()>;

    /// Writes the results below `dir` and returns the files written.
    fn save(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// One-line result description, `None` before a successful run.
    fn summary(&self) -> Option<String>;
}

/// The available decision methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Electre,
    Promethee,
}

/// Selection code meaning "every method".
pub const ALL_CODE: char = 'a';

impl AlgorithmKind {
    pub fn all() -> &'static [AlgorithmKind] {
        &[AlgorithmKind::Electre, AlgorithmKind::Promethee]
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.code() == code)
    }

    pub fn code(self) -> char {
        match self {
            AlgorithmKind::Electre => 'e',
            AlgorithmKind::Promethee => 'p',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Electre => "ELECTRE",
            AlgorithmKind::Promethee => "PROMETHEE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AlgorithmKind::Electre => "Outranking kernel",
            AlgorithmKind::Promethee => "Preference flow ranking",
        }
    }

    pub fn alt_info(self) -> &'static str {
        match self {
            AlgorithmKind::Electre => "ELECTRE I with vetos and preference thresholds",
            AlgorithmKind::Promethee => "PROMETHEE II net flows",
        }
    }

    /// Creates an unconfigured engine of this kind.
    pub fn instantiate(self) -> Box<dyn DecisionAlgorithm> {
        match self {
            AlgorithmKind::Electre => Box::new(OutrankingEngine::new()),
            AlgorithmKind::Promethee => Box::new(PrometheeEngine::new()),
        }
    }
}

/// Result of parsing a selection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected methods, in first-mention order, without repeats.
    pub kinds: Vec<AlgorithmKind>,
    /// Codes that matched no method.
    pub rejected: Vec<char>,
}

/// Parses short codes such as `"e"`, `"pe"` or `"a"`.
///
/// Unknown codes are collected in [`Selection::rejected`] so the caller can
/// warn about them. Whitespace is ignored.
///
/// # Errors
///
/// Returns [`OutrankError::Configuration`] if no code selects a method.
///
/// # Examples
///
/// ```
/// use outrank_methods::{parse_selection, AlgorithmKind};
///
/// let selection = parse_selection("pxe").unwrap();
/// assert_eq!(selection.kinds, vec![AlgorithmKind::Promethee, AlgorithmKind::Electre]);
/// assert_eq!(selection.rejected, vec!['x']);
///
/// assert!(parse_selection("zz").is_err());
/// ```
pub fn parse_selection(codes: &str) -> Result<Selection> {
    let mut kinds = Vec::new();
    let mut rejected = Vec::new();

    let mut select = |kind: AlgorithmKind| {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    };
    for code in codes.chars().filter(|c| !c.is_whitespace()) {
        if code == ALL_CODE {
            AlgorithmKind::all().iter().copied().for_each(&mut select);
        } else if let Some(kind) = AlgorithmKind::from_code(code) {
            select(kind);
        } else {
            rejected.push(code);
        }
    }

    if kinds.is_empty() {
        return Err(OutrankError::configuration(format!(
            "no valid algorithm in selection '{codes}'"
        )));
    }
    Ok(Selection { kinds, rejected })
}
