//! Command-line front end for the MIBiG query language.
//!
//! Every command prints pretty JSON on stdout; logs go to stderr.
//!
//! ```text
//! mibig parse "ripp AND ( streptomyces OR lactococcus )"
//! mibig --catalog mibig.json convert "nrps streptomyces"
//! mibig --catalog mibig.json search "[type]nrps EXCEPT [genus]streptomyces"
//! mibig --catalog mibig.json search --json query.json
//! mibig --catalog mibig.json available genus strept
//! mibig --catalog mibig.json stats
//! mibig --catalog mibig.json repository
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MIBIG_CATALOG` | | Catalog document to search |
//! | `MIBIG_LOG_LEVEL` | warn | Log level |
//!
//! Engine settings (`MIBIG_MAX_DEPTH` and friends) are described in
//! [`QueryConfig`].

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mibig_catalog::{
    AvailableTerm, CatalogStore, RepositoryEntry, ResultStats, StatCluster, StatCounts,
    TaxonStats,
};
use mibig_query::{EntryId, Query, QueryConfig, QueryEngine, QueryType, ReturnType};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// MIBiG query tool.
#[derive(Debug, Clone, Parser)]
#[command(name = "mibig")]
#[command(about = "Search the MIBiG repository of biosynthetic gene clusters")]
#[command(version)]
pub struct Cli {
    /// Catalog document (JSON) to search.
    #[arg(long, env = "MIBIG_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "MIBIG_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Query engine settings.
    #[command(flatten)]
    pub query: QueryConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse a query string and print its JSON form.
    Parse {
        /// Query string, e.g. "ripp AND [genus]streptomyces".
        query: String,

        /// Record type to search for (cluster, cds, domain).
        #[arg(long, default_value = "cluster")]
        search: QueryType,

        /// Result format (json, csv, fasta, fastaa).
        #[arg(long, default_value = "json")]
        return_type: ReturnType,
    },

    /// Resolve the category of every unscoped term.
    Convert {
        /// Query string.
        query: String,
    },

    /// Run a query and print the matching entries.
    Search {
        /// Query string.
        #[arg(required_unless_present = "json", conflicts_with = "json")]
        query: Option<String>,

        /// Read the query from a JSON file instead.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Suggest values of a category.
    Available {
        /// Category to suggest from, e.g. genus.
        category: String,
        /// Partial input to match.
        term: String,
    },

    /// Print catalog statistics.
    Stats,

    /// List every entry.
    Repository,
}

impl Cli {
    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = self.query.validate().err().unwrap_or_default();

        if !matches!(
            self.log_level.to_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            errors.push(format!("Unknown log level '{}'", self.log_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Result of the `search` command.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    /// Number of matching entries.
    pub total: usize,
    /// Matching ids in evaluation order.
    pub ids: Vec<EntryId>,
    /// Summaries of the matches, ordered by accession.
    pub clusters: Vec<RepositoryEntry>,
    /// Breakdown of the matches.
    pub stats: ResultStats,
}

/// Result of the `stats` command.
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    /// Catalog-wide entry counts.
    pub counts: StatCounts,
    /// Entries per BGC type.
    pub clusters: Vec<StatCluster>,
    /// Entries per genus.
    pub taxon_stats: Vec<TaxonStats>,
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "mibig={level},mibig_query={level},mibig_catalog={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Runs the selected command and returns its JSON output.
pub fn execute(cli: &Cli) -> anyhow::Result<Value> {
    match &cli.command {
        Command::Parse {
            query,
            search,
            return_type,
        } => {
            let terms = mibig_query::parse_query_with_max_depth(query, cli.query.max_depth)?;
            let query = Query::new(terms)
                .with_query_type(*search)
                .with_return_type(*return_type);
            Ok(serde_json::to_value(query)?)
        }
        Command::Convert { query } => {
            let engine = open_engine(cli)?;
            let query = engine.parse(query)?;
            Ok(serde_json::to_value(engine.convert(query)?)?)
        }
        Command::Search { query, json } => {
            let engine = open_engine(cli)?;
            let query = match (query, json) {
                (_, Some(path)) => {
                    let raw = fs::read_to_string(path)
                        .with_context(|| format!("failed to read query file {}", path.display()))?;
                    Query::from_json(&raw)?
                }
                (Some(query), None) => engine.parse(query)?,
                (None, None) => anyhow::bail!("either a query or --json must be given"),
            };

            let ids = engine.search(&query)?;
            let store = engine.store();
            let output = SearchOutput {
                total: ids.len(),
                clusters: store.get(&ids),
                stats: store.result_stats(&ids),
                ids,
            };
            Ok(serde_json::to_value(output)?)
        }
        Command::Available { category, term } => {
            let store = open_store(cli)?;
            let available: Vec<AvailableTerm> = store.available(category, term)?;
            Ok(serde_json::to_value(available)?)
        }
        Command::Stats => {
            let store = open_store(cli)?;
            let output = StatsOutput {
                counts: store.counts(),
                clusters: store.cluster_stats(),
                taxon_stats: store.genus_stats(),
            };
            Ok(serde_json::to_value(output)?)
        }
        Command::Repository => {
            let store = open_store(cli)?;
            Ok(serde_json::to_value(store.repository())?)
        }
    }
}

fn open_store(cli: &Cli) -> anyhow::Result<CatalogStore> {
    let path = cli
        .catalog
        .as_ref()
        .context("no catalog given; pass --catalog or set MIBIG_CATALOG")?;
    let store = CatalogStore::from_path(path)?;
    info!(
        catalog = %path.display(),
        entries = store.catalog().entries.len(),
        "Opened catalog"
    );
    Ok(store)
}

fn open_engine(cli: &Cli) -> anyhow::Result<QueryEngine<CatalogStore>> {
    Ok(QueryEngine::new(open_store(cli)?, cli.query.clone()))
}
