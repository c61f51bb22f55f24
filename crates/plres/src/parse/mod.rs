use std::fmt;

pub mod clause_set;

pub use clause_set::{parse_clause, parse_input, parse_literal};

pub type ParseResult<T> = Result<T, ParseErr>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErr {
    Expected(String, String),
    EmptyToken(usize),
    MissingLine(&'static str),
    InvalidCount(String),
    MissingClauses { expected: usize, got: usize },
    AtLine(usize, Box<ParseErr>),
}

impl ParseErr {
    pub(crate) fn at_line(self, line: usize) -> Self {
        ParseErr::AtLine(line, Box::new(self))
    }
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErr::Expected(expected, got) => write!(f, "Expected {} but got {}", expected, got),
            ParseErr::EmptyToken(pos) => write!(
                f,
                "Unexpected character at position {pos}. Please use alphanumeric symbols only and separate literals with 'OR'."
            ),
            ParseErr::MissingLine(what) => write!(f, "Missing {what}"),
            ParseErr::InvalidCount(got) => {
                write!(f, "Expected the number of clauses but got '{got}'")
            }
            ParseErr::MissingClauses { expected, got } => {
                write!(f, "Expected {expected} clauses but found only {got}")
            }
            ParseErr::AtLine(line, e) => write!(f, "Line {line}: {e}"),
        }
    }
}

impl std::error::Error for ParseErr {}
