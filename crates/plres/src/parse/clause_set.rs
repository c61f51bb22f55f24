use std::{fmt, iter::Peekable};

use super::{ParseErr, ParseResult};
use crate::clause::{Clause, KnowledgeBase, Literal};
use crate::symbol::Symbol;

/// Parses a single literal such as `P` or `-P`.
pub fn parse_literal(formula: &str) -> ParseResult<Literal> {
    let mut parser = ClauseParser::new(formula);
    let lit = parser.parse_lit()?;
    parser.expect_end()?;
    Ok(lit)
}

/// Parses a clause such as `-P OR Q OR R`.
pub fn parse_clause(formula: &str) -> ParseResult<Clause> {
    ClauseParser::parse(formula)
}

/// Parses an input file: the query clause on the first non-blank line, the
/// number of premise clauses on the next, followed by that many clause lines.
pub fn parse_input(text: &str) -> ParseResult<(Clause, KnowledgeBase)> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line_no, line) = lines
        .next()
        .ok_or(ParseErr::MissingLine("query clause"))?;
    let alpha = parse_clause(line).map_err(|e| e.at_line(line_no))?;

    let (line_no, line) = lines
        .next()
        .ok_or(ParseErr::MissingLine("number of clauses"))?;
    let n: usize = line
        .parse()
        .map_err(|_| ParseErr::InvalidCount(line.to_string()).at_line(line_no))?;

    let mut kb = KnowledgeBase::new();
    for got in 0..n {
        let (line_no, line) = lines
            .next()
            .ok_or(ParseErr::MissingClauses { expected: n, got })?;
        kb.add(parse_clause(line).map_err(|e| e.at_line(line_no))?);
    }

    Ok((alpha, kb))
}

#[derive(Debug, PartialEq, Eq)]
struct Token<'t> {
    pub kind: TokenKind,
    pub spelling: &'t str,
    pub src_pos: usize,
}

impl<'t> fmt::Display for Token<'t> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spelling)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum TokenKind {
    Or,
    Not,
    Ident,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Not => write!(f, "-"),
            TokenKind::Ident => write!(f, "identifier"),
        }
    }
}

struct ClauseTokenizer<'f> {
    formula: &'f str,
    pos: usize,
}

impl<'f> ClauseTokenizer<'f> {
    pub fn new(formula: &'f str) -> Self {
        Self { formula, pos: 0 }
    }

    fn bump(&mut self, size: usize) {
        self.pos += size;
        self.formula = &self.formula[size..];
    }

    fn next_token(&mut self) -> Option<ParseResult<Token<'f>>> {
        let first = self.formula.chars().next()?;

        let (kind, size) = match first {
            '-' => (TokenKind::Not, 1),
            c if c.is_whitespace() => {
                self.bump(c.len_utf8());
                return self.next_token();
            }
            _ => {
                let size = self
                    .formula
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(self.formula.len());

                if size == 0 {
                    return Some(Err(ParseErr::EmptyToken(self.pos)));
                }

                let kind = match &self.formula[..size] {
                    "OR" => TokenKind::Or,
                    _ => TokenKind::Ident,
                };
                (kind, size)
            }
        };

        let t = Token {
            kind,
            spelling: &self.formula[..size],
            src_pos: self.pos,
        };
        self.bump(size);
        Some(Ok(t))
    }
}

impl<'f> Iterator for ClauseTokenizer<'f> {
    type Item = ParseResult<Token<'f>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl<'f> From<&'f str> for ClauseTokenizer<'f> {
    fn from(f: &'f str) -> Self {
        ClauseTokenizer::new(f)
    }
}

pub struct ClauseParser<'f> {
    tokens: Peekable<ClauseTokenizer<'f>>,
}

impl<'f> ClauseParser<'f> {
    fn new(formula: &'f str) -> Self {
        let tokens: ClauseTokenizer = formula.into();
        ClauseParser {
            tokens: tokens.peekable(),
        }
    }

    pub fn parse(formula: &'f str) -> ParseResult<Clause> {
        let mut parser = ClauseParser::new(formula);
        let c = parser.parse_c()?;
        parser.expect_end()?;
        Ok(c)
    }

    fn parse_c(&mut self) -> ParseResult<Clause> {
        let mut c = vec![self.parse_lit()?];

        while self.or()? {
            c.push(self.parse_lit()?)
        }

        Ok(Clause::new(c))
    }

    fn parse_lit(&mut self) -> ParseResult<Literal> {
        let negated = self.em()?;
        Ok(Literal::new(self.parse_symbol()?, negated))
    }

    fn parse_symbol(&mut self) -> ParseResult<Symbol> {
        match self.tokens.next() {
            Some(Err(e)) => Err(e),
            Some(Ok(Token {
                spelling,
                kind: TokenKind::Ident,
                ..
            })) => Ok(Symbol::intern(spelling)),
            Some(Ok(t)) => Err(ParseErr::Expected(
                "identifier".to_string(),
                format!("'{}' at position {}", t, t.src_pos),
            )),
            None => Err(ParseErr::Expected(
                "identifier".to_string(),
                "end of input".to_string(),
            )),
        }
    }

    fn expect_end(&mut self) -> ParseResult<()> {
        match self.tokens.next() {
            None => Ok(()),
            Some(Err(e)) => Err(e),
            Some(Ok(t)) => Err(ParseErr::Expected(
                format!("{} or end of input", TokenKind::Or),
                format!("'{}' at position {}", t, t.src_pos),
            )),
        }
    }

    fn eat_if_kind(&mut self, expected: TokenKind) -> ParseResult<bool> {
        match self.tokens.peek() {
            Some(Ok(Token { kind, .. })) if *kind == expected => {
                self.tokens.next();
                Ok(true)
            }
            Some(Err(e)) => Err(e.clone()),
            _ => Ok(false),
        }
    }

    fn or(&mut self) -> ParseResult<bool> {
        self.eat_if_kind(TokenKind::Or)
    }

    fn em(&mut self) -> ParseResult<bool> {
        self.eat_if_kind(TokenKind::Not)
    }
}
