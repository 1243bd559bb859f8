use std::time::{Duration, Instant};

use buyerscope_lexicon::Lexicon;
use chrono::NaiveDate;
use rayon::prelude::*;

use crate::assumptions::AssumptionSet;
use crate::catalog::Catalog;
use crate::config::RankingConfig;
use crate::error::DiscoveryError;
use crate::model::{Company, RankedResultSet, ScoreBreakdown, ScoredCompany};
use crate::suggest;

pub const DEFAULT_LIMIT: usize = 50;
/// More qualifying companies than this triggers refine suggestions.
pub const REFINE_ABOVE: usize = 50;
/// Fewer shown results than this triggers broaden suggestions.
pub const BROADEN_BELOW: usize = 20;

const SCORE_CHUNK: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct RankOptions {
    pub limit: usize,
    /// Reference date for recency. Defaults to the newest shipment in the catalog.
    pub as_of: Option<NaiveDate>,
    /// Wall-clock budget for scoring.
    pub budget: Option<Duration>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            as_of: None,
            budget: None,
        }
    }
}

/// Rank with the built-in lexicon and default weights.
pub fn rank(
    catalog: &Catalog,
    assumptions: &AssumptionSet,
    limit: usize,
) -> Result<RankedResultSet, DiscoveryError> {
    let options = RankOptions {
        limit,
        ..RankOptions::default()
    };
    rank_with(
        Lexicon::builtin(),
        &RankingConfig::default(),
        catalog,
        assumptions,
        &options,
    )
}

pub fn rank_with(
    lexicon: &Lexicon,
    config: &RankingConfig,
    catalog: &Catalog,
    assumptions: &AssumptionSet,
    options: &RankOptions,
) -> Result<RankedResultSet, DiscoveryError> {
    if options.limit == 0 {
        return Err(DiscoveryError::InvalidLimit(options.limit));
    }
    let as_of = options.as_of.or_else(|| catalog.newest_shipment());

    if !assumptions.is_runnable() {
        return Ok(RankedResultSet {
            total_candidates: 0,
            results_shown: 0,
            results: Vec::new(),
            refine_suggestions: Vec::new(),
            broaden_suggestions: Vec::new(),
            partial: false,
            as_of,
        });
    }

    let deadline = options.budget.map(|b| Instant::now() + b);

    // Counting pass; always exact.
    let qualifying: Vec<&Company> = catalog
        .companies()
        .par_iter()
        .filter(|c| qualifies(lexicon, c, assumptions))
        .collect();
    let total = qualifying.len();

    let mut scored: Vec<ScoredCompany> = Vec::with_capacity(total);
    let mut partial = false;
    for chunk in qualifying.chunks(SCORE_CHUNK) {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            partial = true;
            break;
        }
        scored.par_extend(
            chunk
                .par_iter()
                .map(|c| score(lexicon, config, c, assumptions, as_of)),
        );
    }
    if partial {
        log::warn!(
            "rank: budget elapsed after scoring {} of {} candidates",
            scored.len(),
            total
        );
    }

    scored.sort_by(|a, b| {
        b.match_score
            .total_cmp(&a.match_score)
            .then_with(|| a.company.id.cmp(&b.company.id))
    });
    scored.truncate(options.limit);

    let refine_suggestions = if total > REFINE_ABOVE {
        suggest::refine(lexicon, &qualifying, assumptions, config.max_suggestions)
    } else {
        Vec::new()
    };
    // Decided on what is returned, so a budget cut-off still offers broadening.
    let broaden_suggestions = if scored.len() < BROADEN_BELOW {
        suggest::broaden(lexicon, catalog, assumptions, config.max_suggestions)
    } else {
        Vec::new()
    };

    log::debug!(
        "rank: {} of {} companies qualify, {} shown, {} refine, {} broaden",
        total,
        catalog.len(),
        scored.len(),
        refine_suggestions.len(),
        broaden_suggestions.len()
    );

    Ok(RankedResultSet {
        total_candidates: total,
        results_shown: scored.len(),
        results: scored,
        refine_suggestions,
        broaden_suggestions,
        partial,
        as_of,
    })
}

/// HS codes overlap when equal or when one is a prefix of the other.
pub fn hs_overlap(a: &str, b: &str) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

pub(crate) fn qualifies(lexicon: &Lexicon, company: &Company, assumptions: &AssumptionSet) -> bool {
    let hs_hit = assumptions
        .hs_codes()
        .any(|code| company.commodities.iter().any(|c| hs_overlap(code, c)));
    if !hs_hit {
        return false;
    }
    if !assumptions.markets.is_empty()
        && !assumptions
            .markets
            .iter()
            .any(|m| covers_destination(lexicon, m, company))
    {
        return false;
    }
    assumptions.certs.is_subset(&company.certs)
}

pub(crate) fn covers_destination(lexicon: &Lexicon, market: &str, company: &Company) -> bool {
    company
        .destination_countries
        .iter()
        .any(|d| lexicon.market_covers(market, d))
}

pub(crate) fn count_qualifying(
    lexicon: &Lexicon,
    catalog: &Catalog,
    assumptions: &AssumptionSet,
) -> usize {
    catalog
        .companies()
        .par_iter()
        .filter(|c| qualifies(lexicon, c, assumptions))
        .count()
}

fn score(
    lexicon: &Lexicon,
    config: &RankingConfig,
    company: &Company,
    assumptions: &AssumptionSet,
    as_of: Option<NaiveDate>,
) -> ScoredCompany {
    let mut breakdown = ScoreBreakdown::default();
    let mut matched_hs = Vec::new();

    for entry in &assumptions.hs {
        if company.commodities.iter().any(|c| hs_overlap(&entry.code, c)) {
            breakdown.hs += entry.confidence;
            matched_hs.push(entry.code.clone());
        }
    }

    let markets = assumptions
        .markets
        .iter()
        .filter(|m| covers_destination(lexicon, m, company))
        .count();
    breakdown.market = config.market_weight * markets as f64;

    let certs = assumptions.certs.intersection(&company.certs).count();
    breakdown.cert = config.cert_weight * certs as f64;

    breakdown.recency = recency_bonus(
        config.recency_weight,
        company.last_shipment_on,
        as_of,
        assumptions.lookback_days,
    );

    ScoredCompany {
        company: company.clone(),
        match_score: breakdown.total(),
        breakdown,
        matched_hs,
    }
}

/// Linear decay from `weight` on the reference date to 0 at the end of the
/// lookback window. Shipments dated after the reference date count as age 0.
fn recency_bonus(
    weight: f64,
    last: Option<NaiveDate>,
    as_of: Option<NaiveDate>,
    lookback_days: u32,
) -> f64 {
    let (Some(last), Some(as_of)) = (last, as_of) else {
        return 0.0;
    };
    if lookback_days == 0 {
        return 0.0;
    }
    let age = (as_of - last).num_days().max(0);
    let window = i64::from(lookback_days);
    if age > window {
        return 0.0;
    }
    weight * (1.0 - age as f64 / window as f64)
}
