use std::collections::HashSet;

use serde::Serialize;

use crate::{Clause, Entailment};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub entailed: bool,
    pub rounds: Vec<Vec<String>>,
}

impl From<&Entailment> for Report {
    fn from(e: &Entailment) -> Self {
        Report {
            entailed: e.entailed,
            rounds: e.rounds.iter().map(sorted_round).collect(),
        }
    }
}

/// Clauses of one round as text, sorted by that text.
pub fn sorted_round(round: &HashSet<Clause>) -> Vec<String> {
    let mut cs: Vec<String> = round.iter().map(Clause::to_string).collect();
    cs.sort();
    cs
}

/// Each round as its size followed by its clauses, then `YES` or `NO`.
pub fn render_rounds(e: &Entailment) -> String {
    let mut out = String::new();

    for round in &e.rounds {
        out.push_str(&round.len().to_string());
        out.push('\n');
        for c in sorted_round(round) {
            out.push_str(&c);
            out.push('\n');
        }
    }

    out.push_str(if e.entailed { "YES" } else { "NO" });
    out
}
