//! Enrichment state transitions. The only code that writes
//! `Company::enrichment`; every operation returns a new catalog.

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::error::DiscoveryError;
use crate::model::{EnrichmentStatus, EnrichmentTransition};

/// Queue the selected companies. Only `none` moves (to `queued`); the
/// returned transitions list exactly the moves made, in selection order.
pub fn commit_enrichment(
    catalog: &Catalog,
    ids: &[String],
) -> Result<(Catalog, Vec<EnrichmentTransition>), DiscoveryError> {
    let mut next = catalog.clone();
    let mut transitions = Vec::new();

    for id in ids {
        let company = next
            .get_mut(id)
            .ok_or_else(|| DiscoveryError::UnknownCompany(id.clone()))?;
        if company.enrichment.status != EnrichmentStatus::None {
            continue;
        }
        company.enrichment.status = EnrichmentStatus::Queued;
        transitions.push(EnrichmentTransition {
            company_id: company.id.clone(),
            from: EnrichmentStatus::None,
            to: EnrichmentStatus::Queued,
        });
    }

    log::debug!(
        "enrichment: {} of {} selected companies queued",
        transitions.len(),
        ids.len()
    );
    Ok((next, transitions))
}

/// Move one company a step along none → queued → fetching → done.
pub fn advance_enrichment(
    catalog: &Catalog,
    id: &str,
) -> Result<(Catalog, EnrichmentTransition), DiscoveryError> {
    let mut next = catalog.clone();
    let company = next
        .get_mut(id)
        .ok_or_else(|| DiscoveryError::UnknownCompany(id.to_string()))?;
    let from = company.enrichment.status;
    let to = from.advance();
    company.enrichment.status = to;
    let transition = EnrichmentTransition {
        company_id: company.id.clone(),
        from,
        to,
    };
    Ok((next, transition))
}

/// Record a finished enrichment: `done`, enriched, with the verified contact
/// count and completion time.
pub fn mark_enriched(
    catalog: &Catalog,
    id: &str,
    verified_count: u32,
    at: DateTime<Utc>,
) -> Result<Catalog, DiscoveryError> {
    let mut next = catalog.clone();
    let company = next
        .get_mut(id)
        .ok_or_else(|| DiscoveryError::UnknownCompany(id.to_string()))?;
    if company.enrichment.status != EnrichmentStatus::Fetching
        && company.enrichment.status != EnrichmentStatus::Done
    {
        log::warn!(
            "enrichment: '{id}' marked enriched from status {}",
            company.enrichment.status
        );
    }
    company.enrichment.enriched = true;
    company.enrichment.verified_count = verified_count;
    company.enrichment.enriched_at = Some(at);
    company.enrichment.status = EnrichmentStatus::Done;
    Ok(next)
}
