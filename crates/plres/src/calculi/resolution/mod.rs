use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Clause;

pub mod prop;
mod util;

pub use util::negate_clause;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Params {
    /// Upper bound on saturation rounds. `None` runs until a terminal state.
    pub max_rounds: Option<usize>,
}

impl Params {
    pub fn with_max_rounds(max_rounds: usize) -> Self {
        Self {
            max_rounds: Some(max_rounds),
        }
    }
}

/// Verdict of a refutation run together with the clauses each round derived.
///
/// If `entailed`, the last round contains the empty clause. Otherwise the last
/// round is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entailment {
    pub entailed: bool,
    pub rounds: Vec<HashSet<Clause>>,
}

impl Entailment {
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn num_derived(&self) -> usize {
        self.rounds.iter().map(HashSet::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResErr {
    RoundLimit(usize),
}

impl fmt::Display for ResErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResErr::RoundLimit(n) => write!(
                f,
                "Saturation did not finish within {n} round{}",
                if *n == 1 { "" } else { "s" }
            ),
        }
    }
}

impl std::error::Error for ResErr {}

pub type ResResult<T> = Result<T, ResErr>;
