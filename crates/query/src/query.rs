//! Search request envelope.
//!
//! A [`Query`] bundles the term tree with what is being searched for and how
//! results should be returned:
//!
//! ```text
//! {"search":"cluster","return_type":"json","terms":{...}}
//! ```
//!
//! `search` and `return_type` are matched case-insensitively on decode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::parser::parse_query;
use crate::term::QueryTerm;

/// The kind of record a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum QueryType {
    /// Whole gene clusters.
    #[default]
    Cluster,
    /// Coding sequences.
    Cds,
    /// Protein domains.
    Domain,
}

impl QueryType {
    /// Wire name of the query type.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Cluster => "cluster",
            QueryType::Cds => "cds",
            QueryType::Domain => "domain",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cluster" => Ok(QueryType::Cluster),
            "cds" => Ok(QueryType::Cds),
            "domain" => Ok(QueryType::Domain),
            _ => Err(QueryError::malformed(format!("invalid query type {}", s))),
        }
    }
}

// Decode errors carry the bare message; the JSON layer adds its own context.
impl TryFrom<String> for QueryType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse()
            .map_err(|_| format!("invalid query type {}", value))
    }
}

impl From<QueryType> for String {
    fn from(value: QueryType) -> Self {
        value.as_str().to_string()
    }
}

/// Output format requested for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ReturnType {
    /// JSON documents.
    #[default]
    Json,
    /// Comma-separated values.
    Csv,
    /// Nucleotide FASTA.
    NucleotideFasta,
    /// Amino-acid FASTA.
    AminoAcidFasta,
}

impl ReturnType {
    /// Wire name of the return type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::Json => "json",
            ReturnType::Csv => "csv",
            ReturnType::NucleotideFasta => "fasta",
            ReturnType::AminoAcidFasta => "fastaa",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReturnType::Json),
            "csv" => Ok(ReturnType::Csv),
            "fasta" => Ok(ReturnType::NucleotideFasta),
            "fastaa" => Ok(ReturnType::AminoAcidFasta),
            _ => Err(QueryError::malformed(format!("invalid return type {}", s))),
        }
    }
}

impl TryFrom<String> for ReturnType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse()
            .map_err(|_| format!("invalid return type {}", value))
    }
}

impl From<ReturnType> for String {
    fn from(value: ReturnType) -> Self {
        value.as_str().to_string()
    }
}

/// A complete search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Record type searched for, `search` on the wire.
    #[serde(rename = "search")]
    pub query_type: QueryType,
    /// Result format.
    pub return_type: ReturnType,
    /// The boolean query tree.
    pub terms: QueryTerm,
}

impl Query {
    /// Wraps a term tree with the default query and return types.
    pub fn new(terms: QueryTerm) -> Self {
        Self {
            query_type: QueryType::default(),
            return_type: ReturnType::default(),
            terms,
        }
    }

    /// Parses a query string into a cluster search returning JSON.
    pub fn from_search_string(input: &str) -> QueryResult<Self> {
        Ok(Self::new(parse_query(input)?))
    }

    /// Sets the record type searched for.
    pub fn with_query_type(mut self, query_type: QueryType) -> Self {
        self.query_type = query_type;
        self
    }

    /// Sets the result format.
    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Decodes a query from its JSON wire form.
    pub fn from_json(json: &str) -> QueryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the query to its JSON wire form.
    pub fn to_json(&self) -> QueryResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
