//! `bscope rank` - rank a catalog against a query or a saved assumption set.

use std::path::PathBuf;
use std::time::Duration;

use buyerscope_discovery::config::RankingConfig;
use buyerscope_discovery::model::Suggestion;
use buyerscope_discovery::{interpret_with, rank_with, AssumptionSet, Catalog, RankOptions};
use buyerscope_lexicon::Lexicon;
use chrono::NaiveDate;
use clap::Args;

use crate::exit_codes::{EXIT_INVALID_INPUT, EXIT_NOT_RUNNABLE, EXIT_USAGE};
use crate::interpret::{apply_edits, print_assumptions};
use crate::util::{pad_right, read_file, to_json, write_output};
use crate::CliError;

#[derive(Args)]
pub struct RankArgs {
    /// Catalog JSON file (array of companies)
    #[arg(long)]
    pub catalog: PathBuf,

    /// Free-text product query
    #[arg(long, conflicts_with = "assumptions", required_unless_present = "assumptions")]
    pub query: Option<String>,

    /// Assumption set JSON file (as printed by `bscope interpret --json`)
    #[arg(long)]
    pub assumptions: Option<PathBuf>,

    /// Assumption edit applied before ranking. Repeatable.
    #[arg(long, value_name = "JSON")]
    pub edit: Vec<String>,

    /// Maximum results returned
    #[arg(long, default_value_t = buyerscope_discovery::rank::DEFAULT_LIMIT)]
    pub limit: usize,

    /// Reference date for recency (defaults to the newest shipment in the catalog)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub as_of: Option<String>,

    /// Wall-clock budget for scoring, in milliseconds
    #[arg(long)]
    pub budget_ms: Option<u64>,

    /// Output JSON to stdout instead of only the human summary
    #[arg(long)]
    pub json: bool,

    /// Write JSON output to file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn cmd_rank(lexicon: &Lexicon, config: &RankingConfig, args: RankArgs) -> Result<(), CliError> {
    let catalog = load_catalog(&args.catalog)?;

    let base = match (&args.query, &args.assumptions) {
        (Some(query), _) => interpret_with(lexicon, query),
        (None, Some(path)) => load_assumptions(&read_file(path)?)?,
        (None, None) => {
            return Err(CliError::new(EXIT_USAGE, "either --query or --assumptions is required"))
        }
    };
    let assumptions = apply_edits(base, &args.edit)?;

    if !assumptions.is_runnable() {
        print_assumptions(&assumptions);
        return Err(CliError::new(EXIT_NOT_RUNNABLE, "no product recognised in the query")
            .with_hint("name a commodity (e.g. 'black pepper') or add one with --edit '{\"op\":\"add_hs\",\"code\":\"0904\",\"confidence\":1.0}'"));
    }

    let as_of = args
        .as_of
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                CliError::new(EXIT_USAGE, format!("invalid --as-of '{s}': {e}"))
            })
        })
        .transpose()?;
    let options = RankOptions {
        limit: args.limit,
        as_of,
        budget: args.budget_ms.map(Duration::from_millis),
    };

    let result = rank_with(lexicon, config, &catalog, &assumptions, &options)?;

    let json_str = to_json(&result)?;
    if let Some(ref path) = args.output {
        write_output(path, &json_str)?;
    }
    if args.json {
        println!("{json_str}");
    }

    // Human summary to stderr
    eprintln!(
        "{} candidates, {} shown{}",
        result.total_candidates,
        result.results_shown,
        if result.partial { " (partial: budget elapsed)" } else { "" }
    );
    for (i, r) in result.results.iter().enumerate() {
        eprintln!(
            "{:>3}. {} {} {:>6.3}  {}",
            i + 1,
            pad_right(&r.company.id, 12),
            pad_right(&r.company.name, 32),
            r.match_score,
            r.matched_hs.join(",")
        );
    }
    print_suggestions("refine", &result.refine_suggestions);
    print_suggestions("broaden", &result.broaden_suggestions);

    Ok(())
}

pub(crate) fn load_catalog(path: &std::path::Path) -> Result<Catalog, CliError> {
    let json = read_file(path)?;
    Catalog::from_json(&json).map_err(|e| {
        CliError::new(EXIT_INVALID_INPUT, format!("{}: {e}", path.display()))
    })
}

/// A bare assumption set, or the `{"runnable": .., "assumptions": {..}}`
/// envelope printed by `bscope interpret --json`.
fn load_assumptions(json: &str) -> Result<AssumptionSet, CliError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| CliError::new(EXIT_INVALID_INPUT, format!("assumptions: {e}")))?;
    let inner = match value.get("assumptions") {
        Some(inner) if value.get("runnable").is_some() => inner,
        _ => &value,
    };
    Ok(AssumptionSet::from_json(&inner.to_string())?)
}

fn print_suggestions(kind: &str, suggestions: &[Suggestion]) {
    for s in suggestions {
        eprintln!("{kind}: {} -> {} candidates", s.label, s.candidates_after);
    }
}
