//! Refine / broaden suggestions for a ranked search.
//!
//! Refine offers one extra filter drawn from the qualifying companies; broaden
//! offers dropping one present filter. Each suggestion carries the candidate
//! count it would produce, so the UI never re-derives it.

use std::collections::BTreeSet;

use buyerscope_lexicon::Lexicon;
use rayon::prelude::*;

use crate::assumptions::AssumptionSet;
use crate::catalog::Catalog;
use crate::model::{Company, Suggestion, SuggestionField};
use crate::rank::{count_qualifying, covers_destination};

/// Filters that strictly shrink `qualifying` without emptying it, smallest
/// resulting count first.
pub(crate) fn refine(
    lexicon: &Lexicon,
    qualifying: &[&Company],
    assumptions: &AssumptionSet,
    max: usize,
) -> Vec<Suggestion> {
    let total = qualifying.len();
    let mut candidates: Vec<(SuggestionField, String)> = Vec::new();

    if assumptions.markets.is_empty() {
        let mut markets = BTreeSet::new();
        for company in qualifying {
            for dest in &company.destination_countries {
                markets.insert(dest.clone());
                markets.extend(lexicon.regions_containing(dest).into_iter().map(String::from));
            }
        }
        candidates.extend(markets.into_iter().map(|m| (SuggestionField::Market, m)));
    }

    let certs: BTreeSet<&String> = qualifying
        .iter()
        .flat_map(|c| c.certs.iter())
        .filter(|c| !assumptions.certs.contains(*c))
        .collect();
    candidates.extend(certs.into_iter().map(|c| (SuggestionField::Cert, c.clone())));

    let mut out: Vec<Suggestion> = candidates
        .into_par_iter()
        .filter_map(|(field, value)| {
            let count = qualifying
                .iter()
                .filter(|c| match field {
                    SuggestionField::Market => covers_destination(lexicon, &value, c),
                    SuggestionField::Cert => c.certs.contains(&value),
                })
                .count();
            (count > 0 && count < total).then(|| Suggestion {
                label: refine_label(field, &value),
                field,
                value,
                candidates_after: count,
            })
        })
        .collect();

    out.sort_by(|a, b| {
        a.candidates_after
            .cmp(&b.candidates_after)
            .then_with(|| a.label.cmp(&b.label))
    });
    out.truncate(max);
    out
}

/// One suggestion per relaxable filter (the market filter as a whole, each
/// cert on its own), largest resulting count first.
pub(crate) fn broaden(
    lexicon: &Lexicon,
    catalog: &Catalog,
    assumptions: &AssumptionSet,
    max: usize,
) -> Vec<Suggestion> {
    let mut out = Vec::new();

    if !assumptions.markets.is_empty() {
        let mut relaxed = assumptions.clone();
        relaxed.markets.clear();
        let value = assumptions
            .markets
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        out.push(Suggestion {
            label: format!("Drop market filter ({value})"),
            field: SuggestionField::Market,
            value,
            candidates_after: count_qualifying(lexicon, catalog, &relaxed),
        });
    }

    for cert in &assumptions.certs {
        let mut relaxed = assumptions.clone();
        relaxed.certs.remove(cert);
        out.push(Suggestion {
            label: format!("Drop cert {cert}"),
            field: SuggestionField::Cert,
            value: cert.clone(),
            candidates_after: count_qualifying(lexicon, catalog, &relaxed),
        });
    }

    out.sort_by(|a, b| {
        b.candidates_after
            .cmp(&a.candidates_after)
            .then_with(|| a.label.cmp(&b.label))
    });
    out.truncate(max);
    out
}

fn refine_label(field: SuggestionField, value: &str) -> String {
    match field {
        SuggestionField::Market => format!("Ships to {value}"),
        SuggestionField::Cert => format!("Holds {value}"),
    }
}
