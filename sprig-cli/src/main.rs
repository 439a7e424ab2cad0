//! Sprig CLI
//!
//! Runs a selector against a JSON document tree and prints the matches.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;
use sprig_common::warning::clear_warnings;
use sprig_dom::{DomTree, NodeId, load_json_file, parse_json};
use sprig_select::{Matcher, classify, collect, compile, default_root, try_compile};

/// Sprig: query a document tree with a selector
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # All elements with class "cls" under <body>
    sprig .cls page.json

    # Direct children, starting from the element with id "menu"
    sprig 'ul > li.active' page.json --root menu

    # Inline document, JSON output
    sprig --format json 'body span' --json '{"tag":"html","children":[{"tag":"body"}]}'

    # Show how the selector was understood, rejecting malformed selectors
    sprig --explain --strict 'div.cls > span' page.json
"#)]
struct Cli {
    /// Selector to run
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// Path to a JSON document
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Use this JSON document instead of reading a file
    #[arg(long, value_name = "JSON", conflicts_with = "path")]
    json: Option<String>,

    /// Start from the element with this id instead of the body element
    #[arg(long, value_name = "ID")]
    root: Option<String>,

    /// How to print matches
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the selector kind and compiled matcher before the matches
    #[arg(long)]
    explain: bool,

    /// Fail on a malformed selector instead of matching nothing
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `tag#id.class` label per line
    Text,
    /// A JSON array of `{ "node", "label" }` records
    Json,
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    node: usize,
    label: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let tree = load_tree(&cli)?;
    let root = resolve_root(&tree, cli.root.as_deref())?;
    let matcher = if cli.strict {
        try_compile(&cli.selector)
            .with_context(|| format!("cannot compile selector '{}'", cli.selector))?
    } else {
        compile(&cli.selector)
    };

    if cli.explain {
        print_explanation(&cli.selector, &matcher);
    }

    let matches = collect(&tree, &matcher, root);
    match cli.format {
        OutputFormat::Text => {
            for id in &matches {
                println!("{}", tree.describe(*id));
            }
        }
        OutputFormat::Json => println!("{}", render_json(&tree, &matches)?),
    }

    Ok(())
}

/// Load the document from `--json` or the file argument.
fn load_tree(cli: &Cli) -> Result<DomTree> {
    if let Some(ref json) = cli.json {
        Ok(parse_json(json)?)
    } else if let Some(ref path) = cli.path {
        Ok(load_json_file(path)?)
    } else {
        bail!("a document is required: pass a FILE or --json")
    }
}

fn resolve_root(tree: &DomTree, id: Option<&str>) -> Result<NodeId> {
    match id {
        Some(id) => tree
            .element_by_id(id)
            .ok_or_else(|| anyhow!("no element with id '{id}'")),
        None => Ok(default_root(tree)),
    }
}

fn print_explanation(selector: &str, matcher: &Matcher) {
    println!("{} {}", "kind:".bold(), classify(selector).cyan());
    if matcher.is_never() {
        println!("{} {}", "matcher:".bold(), matcher.red());
    } else {
        println!("{} {}", "matcher:".bold(), matcher.green());
    }
}

fn render_json(tree: &DomTree, matches: &[NodeId]) -> Result<String> {
    let records: Vec<MatchRecord> = matches
        .iter()
        .map(|&id| MatchRecord {
            node: id.0,
            label: tree.describe(id),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
