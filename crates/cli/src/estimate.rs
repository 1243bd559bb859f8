//! `bscope estimate` - credit cost of enriching a company selection, and the
//! optional commit that queues it.

use std::path::PathBuf;

use buyerscope_discovery::config::EnrichmentPolicy;
use buyerscope_discovery::model::{EnrichmentEstimate, EnrichmentTransition};
use buyerscope_discovery::{commit_enrichment, estimate_with};
use buyerscope_lexicon::Lexicon;
use clap::Args;
use serde::Serialize;

use crate::rank::load_catalog;
use crate::util::{pad_right, to_json, write_output};
use crate::CliError;

#[derive(Args)]
pub struct EstimateArgs {
    /// Catalog JSON file (array of companies)
    #[arg(long)]
    pub catalog: PathBuf,

    /// Company ids, comma-separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub ids: Vec<String>,

    /// Queue the selection and write the updated catalog to this file
    #[arg(long, value_name = "FILE")]
    pub commit: Option<PathBuf>,

    /// Output JSON to stdout instead of only the human summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct EstimateOutput {
    estimate: EnrichmentEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    transitions: Option<Vec<EnrichmentTransition>>,
}

pub fn cmd_estimate(
    lexicon: &Lexicon,
    policy: &EnrichmentPolicy,
    args: EstimateArgs,
) -> Result<(), CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let ids: Vec<String> = args
        .ids
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let estimate = estimate_with(lexicon, policy, &ids, &catalog)?;

    let transitions = match args.commit {
        Some(ref path) => {
            let (committed, transitions) = commit_enrichment(&catalog, &ids)?;
            write_output(path, &to_json(&committed.companies())?)?;
            Some(transitions)
        }
        None => None,
    };

    let out = EstimateOutput {
        estimate,
        transitions,
    };
    if args.json {
        println!("{}", to_json(&out)?);
    }

    // Human summary to stderr
    for e in &out.estimate.breakdown {
        eprintln!(
            "  {} {} contacts  {:>4} credits",
            pad_right(&e.company_id, 16),
            e.billable_contacts,
            e.total_credits
        );
    }
    let est = &out.estimate;
    eprintln!(
        "total: {} credits ({} contact, {} profile)",
        est.total_credits, est.contact_credits, est.profile_credits
    );
    if let Some(ref transitions) = out.transitions {
        eprintln!("queued {} of {} companies", transitions.len(), est.breakdown.len());
    }

    Ok(())
}
