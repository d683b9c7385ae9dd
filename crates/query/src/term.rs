//! Query term tree.
//!
//! A [`QueryTerm`] is either a leaf [`Expression`] (a search term scoped to a
//! category) or an [`Operation`] combining two sub-terms with AND, OR or
//! EXCEPT. Trees own their children and are never mutated after
//! construction; category resolution produces a new tree.
//!
//! # Wire format
//!
//! Every node carries a `term_type` discriminator so that decoding can
//! dispatch before reading the rest of the node:
//!
//! ```text
//! {"term_type":"expr","category":"type","term":"nrps"}
//! {"term_type":"op","operation":"and","left":{...},"right":{...}}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{QueryError, QueryResult};

/// Category sentinel for expressions whose scope has not been resolved yet.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Set operator applied by an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Entries matching both sides (intersection).
    And,
    /// Entries matching either side (union).
    Or,
    /// Entries matching the left side but not the right (difference).
    Except,
}

impl Operator {
    /// Matches a query keyword, ignoring case.
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            "except" => Some(Operator::Except),
            _ => None,
        }
    }

    /// Upper-case keyword as used in query strings.
    pub fn keyword(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Except => "EXCEPT",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_keyword(s).ok_or_else(|| QueryError::InvalidOperation {
            operation: s.to_string(),
        })
    }
}

/// A search term scoped to a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Expression {
    /// Category key, or [`UNKNOWN_CATEGORY`].
    pub category: String,
    /// The search term.
    pub term: String,
}

impl Expression {
    /// Creates an expression with an explicit category.
    pub fn new(category: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            term: term.into(),
        }
    }

    /// Creates an expression whose category is still to be resolved.
    pub fn unknown(term: impl Into<String>) -> Self {
        Self::new(UNKNOWN_CATEGORY, term)
    }

    /// Returns true if the category still needs resolving.
    pub fn is_unresolved(&self) -> bool {
        self.category == UNKNOWN_CATEGORY
    }

    /// Renders the expression in query-string syntax.
    pub fn query_text(&self) -> String {
        if self.is_unresolved() {
            self.term.clone()
        } else {
            format!("[{}]{}", self.category, self.term)
        }
    }
}

/// Two sub-terms combined by an [`Operator`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Operation {
    /// Combining operator, `operation` on the wire.
    #[serde(rename = "operation")]
    pub operator: Operator,
    /// Left operand.
    pub left: Box<QueryTerm>,
    /// Right operand; for `EXCEPT`, the ids removed from the left.
    pub right: Box<QueryTerm>,
}

impl Operation {
    /// Creates an operation node.
    pub fn new(operator: Operator, left: QueryTerm, right: QueryTerm) -> Self {
        Self {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Renders the operation as `( left OP right )`.
    pub fn query_text(&self) -> String {
        format!(
            "( {} {} {} )",
            self.left.query_text(),
            self.operator,
            self.right.query_text()
        )
    }
}

/// A node of the query tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "term_type")]
pub enum QueryTerm {
    /// A single `[category]term` lookup.
    #[serde(rename = "expr")]
    Expression(Expression),
    /// Two sub-terms joined by an operator.
    #[serde(rename = "op")]
    Operation(Operation),
}

impl QueryTerm {
    /// Leaf node constructor.
    pub fn expression(category: impl Into<String>, term: impl Into<String>) -> Self {
        QueryTerm::Expression(Expression::new(category, term))
    }

    /// Leaf node with unknown category.
    pub fn unknown(term: impl Into<String>) -> Self {
        QueryTerm::Expression(Expression::unknown(term))
    }

    /// Operation node constructor.
    pub fn operation(operator: Operator, left: QueryTerm, right: QueryTerm) -> Self {
        QueryTerm::Operation(Operation::new(operator, left, right))
    }

    /// `left AND right`.
    pub fn and(left: QueryTerm, right: QueryTerm) -> Self {
        Self::operation(Operator::And, left, right)
    }

    /// `left OR right`.
    pub fn or(left: QueryTerm, right: QueryTerm) -> Self {
        Self::operation(Operator::Or, left, right)
    }

    /// `left EXCEPT right`.
    pub fn except(left: QueryTerm, right: QueryTerm) -> Self {
        Self::operation(Operator::Except, left, right)
    }

    /// Renders the tree in query-string syntax. Operations are always
    /// parenthesized, so the output parses back to the same tree.
    pub fn query_text(&self) -> String {
        match self {
            QueryTerm::Expression(expr) => expr.query_text(),
            QueryTerm::Operation(op) => op.query_text(),
        }
    }

    /// Number of levels in the tree; a single expression has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            QueryTerm::Expression(_) => 1,
            QueryTerm::Operation(op) => 1 + op.left.depth().max(op.right.depth()),
        }
    }

    /// Returns true if no expression in the tree has an unknown category.
    pub fn is_resolved(&self) -> bool {
        match self {
            QueryTerm::Expression(expr) => !expr.is_unresolved(),
            QueryTerm::Operation(op) => op.left.is_resolved() && op.right.is_resolved(),
        }
    }

    /// Decodes a term from its JSON wire form.
    pub fn from_json(json: &str) -> QueryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the term to its JSON wire form.
    pub fn to_json(&self) -> QueryResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_text())
    }
}

impl From<Expression> for QueryTerm {
    fn from(expr: Expression) -> Self {
        QueryTerm::Expression(expr)
    }
}

impl From<Operation> for QueryTerm {
    fn from(op: Operation) -> Self {
        QueryTerm::Operation(op)
    }
}

/// Undecoded node: only the discriminator is interpreted before dispatch.
#[derive(Deserialize)]
struct RawTerm {
    term_type: Option<String>,
    category: Option<String>,
    term: Option<String>,
    operation: Option<String>,
    left: Option<Box<RawTerm>>,
    right: Option<Box<RawTerm>>,
}

impl RawTerm {
    fn decode(self) -> Result<QueryTerm, String> {
        let term_type = self.term_type.ok_or("missing field 'term_type'")?;
        match term_type.to_lowercase().as_str() {
            "expr" => {
                let category = self.category.ok_or("expression is missing 'category'")?;
                let term = self.term.ok_or("expression is missing 'term'")?;
                if term.is_empty() {
                    return Err("expression term must not be empty".to_string());
                }
                Ok(QueryTerm::expression(category, term))
            }
            "op" => {
                let operation = self.operation.ok_or("operation is missing 'operation'")?;
                let operator = Operator::from_keyword(&operation)
                    .ok_or_else(|| format!("invalid operation '{}'", operation))?;
                let left = self.left.ok_or("operation is missing 'left'")?.decode()?;
                let right = self.right.ok_or("operation is missing 'right'")?.decode()?;
                Ok(QueryTerm::operation(operator, left, right))
            }
            _ => Err(format!("invalid term_type '{}'", term_type)),
        }
    }
}

impl<'de> Deserialize<'de> for QueryTerm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawTerm::deserialize(deserializer)?
            .decode()
            .map_err(serde::de::Error::custom)
    }
}
