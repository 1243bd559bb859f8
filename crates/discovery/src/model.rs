use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

/// A catalog company. Immutable from the engine's point of view; only the
/// enrichment subsystem writes `enrichment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    /// HS codes traded, in catalog order.
    #[serde(default)]
    pub commodities: Vec<String>,
    #[serde(default)]
    pub hq_country: Option<String>,
    #[serde(default)]
    pub origin_countries: BTreeSet<String>,
    #[serde(default)]
    pub destination_countries: BTreeSet<String>,
    #[serde(default)]
    pub profile_type: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub certs: BTreeSet<String>,
    #[serde(default)]
    pub last_shipment_on: Option<NaiveDate>,
    /// Web domain, e.g. `keralaspice.com`.
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub enrichment: EnrichmentState,
}

/// A known person at a company, as offered by the contact provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub title: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    #[default]
    None,
    Queued,
    Fetching,
    Done,
}

impl EnrichmentStatus {
    /// Next step of the pipeline: none → queued → fetching → done.
    pub fn advance(self) -> Self {
        match self {
            Self::None => Self::Queued,
            Self::Queued => Self::Fetching,
            Self::Fetching | Self::Done => Self::Done,
        }
    }
}

impl std::fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Queued => write!(f, "queued"),
            Self::Fetching => write!(f, "fetching"),
            Self::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentState {
    #[serde(default)]
    pub enriched: bool,
    #[serde(default)]
    pub verified_count: u32,
    #[serde(default)]
    pub enriched_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: EnrichmentStatus,
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Per-signal contributions to a match score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub hs: f64,
    pub market: f64,
    pub cert: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.hs + self.market + self.cert + self.recency
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCompany {
    pub company: Company,
    pub match_score: f64,
    pub breakdown: ScoreBreakdown,
    /// Assumption HS codes found in the company's commodities.
    pub matched_hs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionField {
    Market,
    Cert,
}

/// A filter to add (refine) or drop (broaden).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub field: SuggestionField,
    pub value: String,
    /// Candidate count if the suggestion were applied.
    pub candidates_after: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResultSet {
    pub total_candidates: usize,
    pub results_shown: usize,
    pub results: Vec<ScoredCompany>,
    pub refine_suggestions: Vec<Suggestion>,
    pub broaden_suggestions: Vec<Suggestion>,
    /// Scoring stopped early on the caller's time budget.
    pub partial: bool,
    /// Reference date used for recency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Upload resolution
// ---------------------------------------------------------------------------

/// One uploaded row. Columns other than name/country/email are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    Multiple,
    New,
    Unresolved,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::Multiple => write!(f, "multiple"),
            Self::New => write!(f, "new"),
            Self::Unresolved => write!(f, "unresolved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub company_id: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_company_id: Option<String>,
    /// Similarity in [0, 1]; set for `Matched` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Tied candidates, best first; set for `Multiple` only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<CandidateMatch>,
}

impl Resolution {
    pub fn unresolved() -> Self {
        Self {
            status: MatchStatus::Unresolved,
            matched_company_id: None,
            confidence: None,
            candidates: Vec::new(),
        }
    }

    pub fn new_record() -> Self {
        Self {
            status: MatchStatus::New,
            ..Self::unresolved()
        }
    }

    /// Confidence as a whole percentage, as shown next to a match.
    pub fn confidence_pct(&self) -> Option<u8> {
        self.confidence
            .map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveSummary {
    pub total_rows: usize,
    pub matched: usize,
    pub multiple: usize,
    pub new: usize,
    pub unresolved: usize,
    /// Rows that have not been through the resolver.
    pub pending: usize,
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyEstimate {
    pub company_id: String,
    pub billable_contacts: usize,
    pub contact_credits: u64,
    pub profile_credits: u64,
    pub total_credits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentEstimate {
    pub contact_credits: u64,
    pub profile_credits: u64,
    pub total_credits: u64,
    /// Per company, in selection order.
    pub breakdown: Vec<CompanyEstimate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichmentTransition {
    pub company_id: String,
    pub from: EnrichmentStatus,
    pub to: EnrichmentStatus,
}
