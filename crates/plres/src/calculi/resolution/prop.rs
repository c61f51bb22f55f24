use std::collections::HashSet;

use log::{debug, info, trace};

use crate::{Clause, KnowledgeBase};

use super::util::{build_resolvent, negate_clause};
use super::{Entailment, Params, ResErr, ResResult};

/// All non-tautological resolvents of `c1` and `c2`, one per complementary
/// literal pair.
pub fn resolve(c1: &Clause, c2: &Clause) -> HashSet<Clause> {
    let mut resolvents = HashSet::new();

    for a1 in c1 {
        for a2 in c2 {
            if !a1.is_complement_of(a2) {
                continue;
            }
            let c = build_resolvent(c1, a1, c2, a2);
            if !c.is_tautology() {
                resolvents.insert(c);
            }
        }
    }

    resolvents
}

/// Decides whether `kb` entails `alpha` by refutation.
pub fn resolution(kb: &KnowledgeBase, alpha: &Clause) -> Entailment {
    let mut state = State::new(kb, alpha);

    loop {
        match state.apply_round() {
            Status::Running => {}
            terminal => return state.finish(terminal),
        }
    }
}

/// Like [`resolution`], but gives up with [`ResErr::RoundLimit`] once
/// `params.max_rounds` rounds ran without reaching a verdict.
pub fn resolution_with(
    kb: &KnowledgeBase,
    alpha: &Clause,
    params: &Params,
) -> ResResult<Entailment> {
    let limit = match params.max_rounds {
        Some(limit) => limit,
        None => return Ok(resolution(kb, alpha)),
    };

    let mut state = State::new(kb, alpha);
    while state.rounds.len() < limit {
        match state.apply_round() {
            Status::Running => {}
            terminal => return Ok(state.finish(terminal)),
        }
    }

    debug!("Giving up after {limit} rounds");
    Err(ResErr::RoundLimit(limit))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Contradiction,
    Saturated,
}

/// Working set of one refutation run. Owned by a single call and dropped with it.
#[derive(Debug)]
struct State {
    /// Every clause seen so far, in the order it was first added.
    clauses: Vec<Clause>,
    seen: HashSet<Clause>,
    rounds: Vec<HashSet<Clause>>,
}

impl State {
    fn new(kb: &KnowledgeBase, alpha: &Clause) -> Self {
        let mut state = State {
            clauses: Vec::with_capacity(kb.size() + alpha.size()),
            seen: HashSet::new(),
            rounds: vec![],
        };

        for c in kb {
            state.insert(c.clone());
        }
        for c in negate_clause(alpha) {
            state.insert(c);
        }

        debug!(
            "Seeded {} clauses ({} from KB, negated query {})",
            state.clauses.len(),
            kb.size(),
            alpha
        );
        state
    }

    fn insert(&mut self, c: Clause) -> bool {
        if self.seen.insert(c.clone()) {
            self.clauses.push(c);
            true
        } else {
            false
        }
    }

    fn apply_round(&mut self) -> Status {
        let mut new = HashSet::new();

        for (i, c1) in self.clauses.iter().enumerate() {
            for c2 in &self.clauses[i + 1..] {
                for r in resolve(c1, c2) {
                    if self.seen.contains(&r) || r.is_tautology() {
                        continue;
                    }
                    trace!("{} + {} => {}", c1, c2, r);
                    new.insert(r);
                }
            }
        }

        let status = if new.iter().any(Clause::is_empty) {
            Status::Contradiction
        } else if new.is_empty() {
            Status::Saturated
        } else {
            Status::Running
        };

        if status == Status::Running {
            for c in &new {
                self.insert(c.clone());
            }
        }

        debug!(
            "Round {}: {} new clauses, {} in working set",
            self.rounds.len() + 1,
            new.len(),
            self.clauses.len()
        );
        self.rounds.push(new);
        status
    }

    fn finish(self, status: Status) -> Entailment {
        let entailed = status == Status::Contradiction;
        if entailed {
            info!("Empty clause derived in round {}", self.rounds.len());
        } else {
            info!("Saturated after {} rounds", self.rounds.len());
        }

        Entailment {
            entailed,
            rounds: self.rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{session, Literal};

    fn clause(lits: &[&str]) -> Clause {
        lits.iter()
            .map(|l| match l.strip_prefix('-') {
                Some(s) => Literal::neg(s),
                None => Literal::pos(l),
            })
            .collect()
    }

    fn kb(clauses: &[&[&str]]) -> KnowledgeBase {
        clauses.iter().map(|c| clause(c)).collect()
    }

    #[test]
    fn resolve_units_gives_empty_clause() {
        session(|| {
            let rs = resolve(&clause(&["P"]), &clause(&["-P"]));
            assert_eq!(1, rs.len());
            assert!(rs.contains(&Clause::empty()));
        })
    }

    #[test]
    fn resolve_without_complements_is_empty() {
        session(|| {
            assert!(resolve(&clause(&["P", "Q"]), &clause(&["P", "-R"])).is_empty());
            assert!(resolve(&clause(&["P"]), &Clause::empty()).is_empty());
        })
    }

    #[test]
    fn resolve_filters_tautologies() {
        session(|| {
            // Q OR -Q via P, P OR -P via Q.
            assert!(resolve(&clause(&["P", "Q"]), &clause(&["-P", "-Q"])).is_empty());
        })
    }

    #[test]
    fn resolve_emits_every_pairing() {
        session(|| {
            let a = clause(&["P", "Q", "R"]);
            let b = clause(&["-P", "-R", "Q"]);
            let rs = resolve(&a, &b);
            // Both candidates keep R / -R or P / -P and are dropped.
            assert!(rs.is_empty());

            let a = clause(&["P", "Q"]);
            let b = clause(&["-P", "S"]);
            let c = clause(&["-Q", "S"]);
            assert_eq!(HashSet::from([clause(&["Q", "S"])]), resolve(&a, &b));
            assert_eq!(HashSet::from([clause(&["P", "S"])]), resolve(&a, &c));
        })
    }

    #[test]
    fn resolve_is_symmetric() {
        session(|| {
            let cases = [
                (clause(&["P", "Q"]), clause(&["-P", "R"])),
                (clause(&["A", "-B", "C"]), clause(&["B", "-C", "D"])),
                (clause(&["P"]), clause(&["-P"])),
                (clause(&["P", "Q"]), clause(&["-P", "-Q"])),
            ];
            for (a, b) in cases {
                let ab = resolve(&a, &b);
                assert_eq!(ab, resolve(&b, &a));
                assert!(ab.iter().all(|c| !c.is_tautology()));
            }
        })
    }

    #[test]
    fn modus_ponens_is_entailed() {
        session(|| {
            let res = resolution(&kb(&[&["P"], &["-P", "Q"]]), &clause(&["Q"]));
            assert!(res.entailed);
            assert!(res.rounds.last().unwrap().contains(&Clause::empty()));
        })
    }

    #[test]
    fn unrelated_query_is_not_entailed() {
        session(|| {
            let res = resolution(&kb(&[&["P"], &["Q"]]), &clause(&["R"]));
            assert!(!res.entailed);
            assert_eq!(1, res.num_rounds());
            assert!(res.rounds[0].is_empty());
        })
    }

    #[test]
    fn contradictory_kb_entails_anything() {
        session(|| {
            let kb = kb(&[&["P", "Q"], &["-P", "Q"], &["P", "-Q"], &["-P", "-Q"]]);
            let res = resolution(&kb, &clause(&["S"]));
            assert!(res.entailed);
            assert!(res.rounds.last().unwrap().contains(&Clause::empty()));
        })
    }

    #[test]
    fn rounds_hold_only_new_clauses() {
        session(|| {
            let kb = kb(&[&["-A", "B"], &["-B", "C"], &["-C", "D"]]);
            let res = resolution(&kb, &clause(&["-A", "D"]));
            assert!(res.entailed);

            let first = &res.rounds[0];
            assert!(first.contains(&clause(&["-A", "C"])));
            assert!(first.contains(&clause(&["-B", "D"])));
            assert!(!first.contains(&clause(&["-A", "B"])));

            let mut seen = HashSet::new();
            for round in &res.rounds {
                for c in round {
                    assert!(seen.insert(c.clone()), "{c} derived twice");
                    assert!(!kb.contains(c));
                }
            }
        })
    }

    #[test]
    fn negated_query_is_split_into_units() {
        session(|| {
            // KB: P OR Q. Query P OR Q. Seed gets -P and -Q as separate units.
            let res = resolution(&kb(&[&["P", "Q"]]), &clause(&["Q", "P"]));
            assert!(res.entailed);
            assert_eq!(2, res.num_rounds());
            assert_eq!(
                HashSet::from([clause(&["Q"]), clause(&["P"])]),
                res.rounds[0]
            );
        })
    }

    #[test]
    fn saturation_is_deterministic() {
        session(|| {
            let kb = kb(&[&["P", "Q"], &["-Q", "R"], &["-R", "S", "T"]]);
            let alpha = clause(&["S"]);
            let first = resolution(&kb, &alpha);
            let second = resolution(&kb, &alpha);
            assert_eq!(first, second);
            assert!(!first.entailed);
            assert!(first.rounds.last().unwrap().is_empty());
        })
    }

    #[test]
    fn round_limit() {
        session(|| {
            let kb = kb(&[&["-A", "B"], &["-B", "C"], &["-C", "D"], &["-D", "E"]]);
            let alpha = clause(&["-A", "E"]);

            assert_eq!(
                Err(ResErr::RoundLimit(0)),
                resolution_with(&kb, &alpha, &Params::with_max_rounds(0))
            );
            assert_eq!(
                Err(ResErr::RoundLimit(1)),
                resolution_with(&kb, &alpha, &Params::with_max_rounds(1))
            );

            let capped = resolution_with(&kb, &alpha, &Params::with_max_rounds(64)).unwrap();
            assert_eq!(resolution(&kb, &alpha), capped);
        })
    }

    #[test]
    fn empty_kb_and_query() {
        session(|| {
            let res = resolution(&KnowledgeBase::new(), &Clause::empty());
            assert!(!res.entailed);
            assert_eq!(vec![HashSet::new()], res.rounds);

            // Tautological query: -P and P become units and refute each other.
            let res = resolution(&KnowledgeBase::new(), &clause(&["P", "-P"]));
            assert!(res.entailed);
            assert_eq!(1, res.num_rounds());
        })
    }
}
