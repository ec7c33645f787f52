//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, XiphosArgs};
use crate::engine::IndexSummary;
use crate::error::Result;
use crate::query::QueryNode;
use crate::search::SearchResponse;

/// Characters of document text shown per hit in human output.
const SNIPPET_LENGTH: usize = 120;

/// Search results together with the elapsed query time.
#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    pub query: &'a str,
    #[serde(flatten)]
    pub response: &'a SearchResponse,
    pub duration_ms: u64,
}

/// A parsed query in both notations.
#[derive(Debug, Serialize)]
pub struct ParseOutput<'a> {
    pub query: &'a str,
    pub prefix: String,
    pub tree: &'a QueryNode,
}

pub fn output_search(output: &SearchOutput<'_>, args: &XiphosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            output_search_human(output);
            Ok(())
        }
        OutputFormat::Json => output_json(output, args),
    }
}

pub fn output_summary(summary: &IndexSummary, args: &XiphosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            output_summary_human(summary);
            Ok(())
        }
        OutputFormat::Json => output_json(summary, args),
    }
}

pub fn output_query(output: &ParseOutput<'_>, args: &XiphosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", output.prefix);
            Ok(())
        }
        OutputFormat::Json => output_json(output, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &XiphosArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn output_search_human(output: &SearchOutput<'_>) {
    let response = output.response;
    println!("Search Results ({}): {}", response.model, output.query);
    println!("═══════════════");

    for (i, hit) in response.hits.iter().enumerate() {
        println!();
        match hit.score {
            Some(score) => println!("Result {}: {} (Score: {score:.4})", i + 1, hit.document.id()),
            None => println!("Result {}: {}", i + 1, hit.document.id()),
        }
        println!("─────────────");
        if let Some(title) = hit.document.title() {
            println!("title: {title}");
        }
        println!("text: {}", snippet(hit.document.text()));
    }

    println!();
    println!("Total hits: {}", response.total);
    if let Some(stopwords) = response.stopwords.as_ref().filter(|words| !words.is_empty()) {
        let words: Vec<&str> = stopwords.iter().map(String::as_str).collect();
        println!("Ignored stopwords: {}", words.join(", "));
    }
    println!("Search time: {}ms", output.duration_ms);
}

fn output_summary_human(summary: &IndexSummary) {
    println!("Index Statistics: {}", summary.name);
    println!("════════════════");
    println!("Documents: {}", summary.document_count);
    println!("Terms: {}", summary.term_count);
    let models: Vec<&str> = summary.models.iter().map(|model| model.as_str()).collect();
    println!("Models: {}", models.join(", "));
    println!("Created: {}", summary.created_at.to_rfc3339());

    if !summary.sample_documents.is_empty() {
        println!();
        println!("Sample documents:");
        println!("─────────────────");
        for document in &summary.sample_documents {
            println!("{}: {}", document.id(), snippet(document.text()));
        }
    }
}

/// The first `SNIPPET_LENGTH` characters of `text` on one line.
fn snippet(text: &str) -> String {
    let mut snippet: String = text
        .chars()
        .take(SNIPPET_LENGTH)
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if text.chars().nth(SNIPPET_LENGTH).is_some() {
        snippet.push_str("...");
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet() {
        assert_eq!(snippet("short\ntext"), "short text");

        let long = "ž".repeat(SNIPPET_LENGTH + 5);
        let cut = snippet(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), SNIPPET_LENGTH + 3);
    }
}
