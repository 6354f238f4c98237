mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use gallery_query::{QueryKeywords, SearchQuery, SearchQueryParser};
use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let keywords = match &cli.keywords {
        Some(path) => load_keywords(path)?,
        None => QueryKeywords::default(),
    };
    let parser = SearchQueryParser::new(keywords)
        .context("Invalid keyword vocabulary")?
        .with_implicit_or(!cli.no_implicit_or)
        .with_date_order(cli.date_order.into());
    info!(json = cli.json, "ready, type /bye to quit");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        } else if line == "/bye" {
            break;
        }

        match convert_line(&parser, line, cli.json) {
            Ok(output) => println!("{output}"),
            Err(e) => error!(line, "Failed to convert: {e:#}"),
        }
    }

    Ok(())
}

fn load_keywords(path: &Path) -> Result<QueryKeywords> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keywords from {}", path.display()))?;
    let keywords = serde_json::from_str(&content)
        .with_context(|| format!("Failed to decode keywords in {}", path.display()))?;
    debug!(path = %path.display(), "loaded keyword vocabulary");
    Ok(keywords)
}

/// Output for one input line: the JSON tree and canonical text of a query, or
/// in `json` mode the canonical text of a JSON tree.
fn convert_line(parser: &SearchQueryParser, line: &str, json: bool) -> Result<String> {
    if json {
        let query = SearchQuery::from_json(line).context("Failed to decode query tree")?;
        return Ok(parser.stringify(&query));
    }
    let query = parser.parse(line).context("Failed to parse query")?;
    let tree = serde_json::to_string_pretty(&query).context("Failed to encode query")?;
    Ok(format!("{tree}\n{}", parser.stringify(&query)))
}
