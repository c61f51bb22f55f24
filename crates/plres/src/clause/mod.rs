use std::collections::{btree_set, hash_set, BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Symbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Literal {
    symbol: Symbol,
    negated: bool,
}

impl Literal {
    pub fn new(symbol: Symbol, negated: bool) -> Self {
        Literal { symbol, negated }
    }

    pub fn pos(symbol: &str) -> Self {
        Self::new(Symbol::intern(symbol), false)
    }

    pub fn neg(symbol: &str) -> Self {
        Self::new(Symbol::intern(symbol), true)
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn negated(&self) -> bool {
        self.negated
    }

    /// Same symbol, opposite polarity.
    pub fn negate(&self) -> Literal {
        Literal {
            symbol: self.symbol,
            negated: !self.negated,
        }
    }

    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.symbol == other.symbol && self.negated != other.negated
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.negated() { "-" } else { "" }, self.symbol())
    }
}

/// A disjunction of literals.
///
/// Literals are kept in a sorted set, which doubles as the canonical key for
/// equality and hashing: clauses built from the same literals in any order, or
/// with repetitions, are the same clause.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

impl Clause {
    pub fn new<I>(literals: I) -> Self
    where
        I: IntoIterator<Item = Literal>,
    {
        Clause {
            literals: literals.into_iter().collect(),
        }
    }

    /// The empty clause, i.e. falsehood.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn unit(literal: Literal) -> Self {
        Self::new([literal])
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Literal> {
        self.literals.iter()
    }

    /// True iff some symbol occurs both positively and negatively.
    /// The empty clause is not a tautology.
    pub fn is_tautology(&self) -> bool {
        let mut polarity: HashMap<Symbol, bool> = HashMap::new();
        for lit in &self.literals {
            match polarity.get(&lit.symbol()) {
                Some(&negated) if negated != lit.negated() => return true,
                Some(_) => {}
                None => {
                    polarity.insert(lit.symbol(), lit.negated());
                }
            }
        }
        false
    }

    /// Literals in display order: by spelling, positive before negative.
    pub fn sorted_literals(&self) -> Vec<&Literal> {
        let mut lits: Vec<&Literal> = self.literals.iter().collect();
        lits.sort_by_cached_key(|l| (l.symbol.to_string(), l.negated));
        lits
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause::new(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;

    type IntoIter = btree_set::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        for (i, l) in self.sorted_literals().into_iter().enumerate() {
            if i > 0 {
                write!(f, " OR ")?;
            }
            write!(f, "{}", l)?;
        }
        Ok(())
    }
}

/// Premise clauses. Never holds a tautology or the same clause twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    clauses: HashSet<Clause>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `c` unless it is a tautology or already present. Returns
    /// whether the knowledge base changed.
    pub fn add(&mut self, c: Clause) -> bool {
        if c.is_tautology() {
            return false;
        }
        self.clauses.insert(c)
    }

    pub fn add_all<I>(&mut self, cs: I) -> usize
    where
        I: IntoIterator<Item = Clause>,
    {
        let mut added = 0;
        for c in cs {
            if self.add(c) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, c: &Clause) -> bool {
        self.clauses.contains(c)
    }

    pub fn all(&self) -> &HashSet<Clause> {
        &self.clauses
    }

    pub fn size(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Clause> {
        self.clauses.iter()
    }
}

impl FromIterator<Clause> for KnowledgeBase {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        let mut kb = KnowledgeBase::new();
        kb.add_all(iter);
        kb
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a Clause;

    type IntoIter = hash_set::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "KB is empty");
        }

        let mut lines: Vec<String> = self.clauses.iter().map(|c| c.to_string()).collect();
        lines.sort();
        write!(f, "{}", lines.join("\n"))
    }
}
