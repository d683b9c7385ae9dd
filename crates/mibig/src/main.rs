//! MIBiG query tool.
//!
//! Parses, converts and runs MIBiG queries against a catalog document.

use clap::Parser;
use mibig::{Cli, execute, init_logging};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(errors) = cli.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        max_depth = cli.query.max_depth,
        unresolved_category = ?cli.query.unresolved_category,
        category_priority = %cli.query.category_priority,
        "Starting mibig"
    );

    let output = execute(&cli)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
