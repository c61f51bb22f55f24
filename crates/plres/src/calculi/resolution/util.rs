use crate::{Clause, Literal};

/// ¬(l1 ∨ ... ∨ ln) as the unit clauses ¬l1, ..., ¬ln.
pub fn negate_clause(c: &Clause) -> Vec<Clause> {
    c.iter().map(|l| Clause::unit(l.negate())).collect()
}

/// (c1 ∪ c2) \ {a1, a2}
pub fn build_resolvent(c1: &Clause, a1: &Literal, c2: &Clause, a2: &Literal) -> Clause {
    c1.iter()
        .chain(c2.iter())
        .filter(|a| *a != a1 && *a != a2)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session;

    #[test]
    fn negation_is_one_unit_per_literal() {
        session(|| {
            let alpha = Clause::new([Literal::pos("P"), Literal::neg("Q")]);
            let mut units = negate_clause(&alpha);
            units.sort_by_key(|c| c.to_string());
            assert_eq!(
                vec![
                    Clause::unit(Literal::neg("P")),
                    Clause::unit(Literal::pos("Q"))
                ],
                units
            );
            assert!(negate_clause(&Clause::empty()).is_empty());
        })
    }

    #[test]
    fn resolvent_drops_both_literals() {
        session(|| {
            let p = Literal::pos("P");
            let c1 = Clause::new([p, Literal::pos("Q")]);
            let c2 = Clause::new([p.negate(), Literal::pos("Q"), Literal::pos("R")]);
            let r = build_resolvent(&c1, &p, &c2, &p.negate());
            assert_eq!(Clause::new([Literal::pos("Q"), Literal::pos("R")]), r);

            let unit = build_resolvent(
                &Clause::unit(p),
                &p,
                &Clause::unit(p.negate()),
                &p.negate(),
            );
            assert!(unit.is_empty());
        })
    }
}
