//! `bscope resolve` - reconcile an uploaded company list against the catalog.

use std::path::PathBuf;

use buyerscope_discovery::config::ResolutionConfig;
use buyerscope_discovery::model::{ResolveSummary, UploadRow};
use buyerscope_discovery::{resolve_with, summarize};
use buyerscope_lexicon::Lexicon;
use clap::Args;
use serde::Serialize;

use crate::exit_codes::EXIT_INVALID_INPUT;
use crate::rank::load_catalog;
use crate::util::{pad_right, read_file, to_json, write_output};
use crate::CliError;

#[derive(Args)]
pub struct ResolveArgs {
    /// Catalog JSON file (array of companies)
    #[arg(long)]
    pub catalog: PathBuf,

    /// Upload JSON file (array of rows with at least `name`)
    #[arg(long)]
    pub rows: PathBuf,

    /// Output JSON to stdout instead of only the human summary
    #[arg(long)]
    pub json: bool,

    /// Write JSON output to file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct ResolveOutput {
    summary: ResolveSummary,
    rows: Vec<UploadRow>,
}

pub fn cmd_resolve(
    lexicon: &Lexicon,
    config: &ResolutionConfig,
    args: ResolveArgs,
) -> Result<(), CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let rows: Vec<UploadRow> = serde_json::from_str(&read_file(&args.rows)?).map_err(|e| {
        CliError::new(EXIT_INVALID_INPUT, format!("{}: {e}", args.rows.display()))
            .with_hint("rows must be a JSON array of objects such as {\"name\": \"Acme Ltd\"}")
    })?;

    let rows = resolve_with(lexicon, config, &rows, &catalog);
    let out = ResolveOutput {
        summary: summarize(&rows),
        rows,
    };

    let json_str = to_json(&out)?;
    if let Some(ref path) = args.output {
        write_output(path, &json_str)?;
    }
    if args.json {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &out.summary;
    eprintln!(
        "{} rows: {} matched, {} multiple, {} new, {} unresolved",
        s.total_rows, s.matched, s.multiple, s.new, s.unresolved
    );
    for row in &out.rows {
        let Some(r) = &row.resolution else { continue };
        let target = match (&r.matched_company_id, r.confidence_pct()) {
            (Some(id), Some(pct)) => format!("{id} ({pct}%)"),
            _ if !r.candidates.is_empty() => r
                .candidates
                .iter()
                .map(|c| c.company_id.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
            _ => String::new(),
        };
        eprintln!(
            "  {} {} {}",
            pad_right(row.name.as_deref().unwrap_or(""), 32),
            pad_right(&r.status.to_string(), 10),
            target
        );
    }

    Ok(())
}
