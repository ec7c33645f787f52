//! Command implementations for the xiphos CLI.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::engine::{IndexConfig, SearchIndex};
use crate::query::QueryParser;

/// Execute a CLI command.
pub fn execute_command(args: XiphosArgs) -> anyhow::Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
        Command::Parse(parse_args) => parse_query(parse_args, &args),
    }
}

/// Load the documents and run one query.
fn search(args: &SearchArgs, cli_args: &XiphosArgs) -> anyhow::Result<()> {
    let index = load_index(&args.documents, args.config.as_deref())?;

    let start = Instant::now();
    let response = index
        .search(&args.query, args.model, args.limit)
        .with_context(|| format!("search for '{}' failed", args.query))?;
    let duration_ms = start.elapsed().as_millis() as u64;

    output_search(
        &SearchOutput {
            query: &args.query,
            response: &response,
            duration_ms,
        },
        cli_args,
    )?;
    Ok(())
}

/// Load the documents and print the index summary.
fn show_stats(args: &StatsArgs, cli_args: &XiphosArgs) -> anyhow::Result<()> {
    let index = load_index(&args.documents, args.config.as_deref())?;
    output_summary(&index.summary(), cli_args)?;
    Ok(())
}

fn parse_query(args: &ParseArgs, cli_args: &XiphosArgs) -> anyhow::Result<()> {
    let tree = QueryParser::new().parse(&args.query)?;
    output_query(
        &ParseOutput {
            query: &args.query,
            prefix: tree.to_string(),
            tree: &tree,
        },
        cli_args,
    )?;
    Ok(())
}

/// Build an in-memory index named after the document file and fill it.
fn load_index(documents: &Path, config: Option<&Path>) -> anyhow::Result<SearchIndex> {
    let config = match config {
        Some(path) => IndexConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => IndexConfig::default(),
    };

    let name = documents
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("documents");
    let index = SearchIndex::new(name, config)?;

    let start = Instant::now();
    let ids = index
        .ingest_file(documents)
        .with_context(|| format!("failed to ingest {}", documents.display()))?;
    info!(
        "loaded {} documents from {} in {:?}",
        ids.len(),
        documents.display(),
        start.elapsed()
    );

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn documents_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_index() {
        let file = documents_file(r#"[{"id": "a", "text": "cat"}, {"id": "b", "text": "dog"}]"#);

        let index = load_index(file.path(), None).unwrap();
        assert_eq!(index.document_count(), 2);
        assert_eq!(index.search("dog", crate::search::ModelKind::Bm25, None).unwrap().ids(), vec!["b"]);
    }

    #[test]
    fn test_load_index_with_config() {
        let file = documents_file(r#"{"id": "a", "text": "cat"}"#);
        let config = documents_file(r#"{"models": ["bool"]}"#);

        let index = load_index(file.path(), Some(config.path())).unwrap();
        assert_eq!(index.config().models, vec![crate::search::ModelKind::Boolean]);
    }

    #[test]
    fn test_load_index_reports_bad_input() {
        let file = documents_file(r#"[{"id": "a"}]"#);
        let err = load_index(file.path(), None).unwrap_err();
        assert!(format!("{err:#}").contains("failed to ingest"));
    }
}
