//! Query string parser.
//!
//! Turns a query string such as
//!
//! ```text
//! ripp AND ( [genus]streptomyces OR lactococcus )
//! ```
//!
//! into a [`QueryTerm`] tree.
//!
//! # Grammar
//!
//! ```text
//! term       = expression ( [keyword] expression )*
//! expression = "(" term ")" / atom
//! keyword    = "AND" / "OR" / "EXCEPT"          ; case-insensitive
//! atom       = "[" category "]" searchterm / searchterm
//! ```
//!
//! Two expressions with no keyword between them are combined with AND.
//! Operands chain to the left: `a OR b EXCEPT c` is `( ( a OR b ) EXCEPT c )`.
//! A bare atom, or one whose bracket is never closed, has the category
//! [`UNKNOWN_CATEGORY`] and is resolved at evaluation time.

mod tokenizer;

use std::str::FromStr;

pub use tokenizer::{END_TOKEN, tokenize};

use crate::error::{QueryError, QueryResult};
use crate::term::{Operator, QueryTerm, UNKNOWN_CATEGORY};

/// Default bound on parenthesis nesting and tree depth.
///
/// Operands chain to the left, so a run of `n` operands builds a tree `n`
/// levels deep; the bound therefore also caps the length of a chain.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Recursive-descent parser over a token stream produced by [`tokenize`].
pub struct Parser<'a> {
    tokens: &'a [String],
    pos: usize,
    nesting: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser with the default depth bound.
    pub fn new(tokens: &'a [String]) -> Self {
        Self {
            tokens,
            pos: 0,
            nesting: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses the whole token stream into a single term.
    pub fn parse(mut self) -> QueryResult<QueryTerm> {
        let (term, _) = self.parse_term()?;

        // Everything but the trailing sentinel must have been consumed.
        if self.remaining() != 1 {
            let token = self.peek().unwrap_or(END_TOKEN);
            return Err(QueryError::malformed(format!("unexpected token {}", token)));
        }
        Ok(term)
    }

    fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn consume(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn consume_expected(&mut self, expected: &str) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn nesting_error(&self) -> QueryError {
        QueryError::malformed(format!(
            "query nesting exceeds maximum depth of {}",
            self.max_depth
        ))
    }

    fn chain_error(&self) -> QueryError {
        QueryError::malformed(format!(
            "too many chained operands: query tree exceeds maximum depth of {}",
            self.max_depth
        ))
    }

    /// Parses a chain of operands, returning the term and its tree depth.
    fn parse_term(&mut self) -> QueryResult<(QueryTerm, usize)> {
        if self.remaining() < 2 {
            return Err(QueryError::malformed("unexpected end of expression"));
        }

        let (mut left, mut depth) = self.parse_expression()?;

        loop {
            let operator = match self.peek() {
                None | Some(END_TOKEN) | Some(")") => break,
                Some(token) => match Operator::from_keyword(token) {
                    Some(operator) => {
                        self.pos += 1;
                        operator
                    }
                    // Adjacent expressions without a keyword are ANDed
                    None => Operator::And,
                },
            };
            let (right, right_depth) = self.parse_expression()?;
            // Each operand deepens the left spine by one level
            depth = 1 + depth.max(right_depth);
            if depth > self.max_depth {
                return Err(self.chain_error());
            }
            left = QueryTerm::operation(operator, left, right);
        }

        Ok((left, depth))
    }

    fn parse_expression(&mut self) -> QueryResult<(QueryTerm, usize)> {
        if self.consume_expected("(") {
            self.nesting += 1;
            if self.nesting > self.max_depth {
                return Err(self.nesting_error());
            }
            let term = self.parse_term()?;
            if !self.consume_expected(")") {
                let token = self.peek().unwrap_or(END_TOKEN);
                return Err(QueryError::malformed(format!(
                    "invalid token {}, expected ')'",
                    token
                )));
            }
            self.nesting -= 1;
            return Ok(term);
        }

        let raw = self
            .consume()
            .ok_or_else(|| QueryError::malformed("unexpected end of expression"))?;
        if Operator::from_keyword(raw).is_some() {
            return Err(QueryError::malformed(format!(
                "invalid use of keyword {}",
                raw
            )));
        }
        if raw == END_TOKEN {
            return Err(QueryError::malformed("malformed input"));
        }
        if raw == ")" {
            return Err(QueryError::malformed("unexpected token )"));
        }
        Ok((parse_atom(raw)?, 1))
    }
}

/// Splits `[category]term`. An unterminated bracket leaves the whole token
/// as the term.
fn parse_atom(raw: &str) -> QueryResult<QueryTerm> {
    if let Some(rest) = raw.strip_prefix('[') {
        if let Some(end) = rest.find(']') {
            let category = &rest[..end];
            let term = &rest[end + 1..];
            if term.is_empty() {
                return Err(QueryError::malformed(format!(
                    "missing search term after [{}]",
                    category
                )));
            }
            let category = if category.is_empty() {
                UNKNOWN_CATEGORY
            } else {
                category
            };
            return Ok(QueryTerm::expression(category, term));
        }
    }
    Ok(QueryTerm::unknown(raw))
}

/// Parses a token stream with the default depth bound.
pub fn parse(tokens: &[String]) -> QueryResult<QueryTerm> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses a query string.
pub fn parse_query(input: &str) -> QueryResult<QueryTerm> {
    parse(&tokenize(input))
}

/// Tokenizes and parses a query string with an explicit depth bound.
pub fn parse_query_with_max_depth(input: &str, max_depth: usize) -> QueryResult<QueryTerm> {
    Parser::new(&tokenize(input))
        .with_max_depth(max_depth)
        .parse()
}

impl FromStr for QueryTerm {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_query(s)
    }
}
