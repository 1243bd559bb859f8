use buyerscope_lexicon::ContactRole;
use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Tunable policy constants. Every section falls back to its defaults, so an
/// empty file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub ranking: RankingConfig,
    pub resolution: ResolutionConfig,
    pub enrichment: EnrichmentPolicy,
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    /// Added once per requested market that covers a company destination.
    pub market_weight: f64,
    /// Added once per requested certification the company holds.
    pub cert_weight: f64,
    /// Ceiling of the recency bonus, reached by a shipment on the reference date.
    pub recency_weight: f64,
    /// Cap on each suggestion list.
    pub max_suggestions: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            market_weight: 0.5,
            cert_weight: 0.25,
            recency_weight: 0.5,
            max_suggestions: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolutionConfig {
    /// Minimum similarity for a catalog company to count as a candidate.
    pub match_threshold: f64,
    /// Candidates this close to the best one make the row ambiguous.
    pub tie_margin: f64,
    /// Share of the score carried by the country comparison when both sides
    /// have a country.
    pub country_weight: f64,
    /// Floor applied when the row's email domain equals the company domain.
    pub domain_match_score: f64,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.88,
            tie_margin: 0.03,
            country_weight: 0.15,
            domain_match_score: 0.95,
        }
    }
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    #[serde(rename = "linkedin")]
    LinkedIn,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::LinkedIn => write!(f, "linkedin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verification {
    /// Only verified person emails are billable.
    #[default]
    Strict,
    /// Any reachable contact on a policy channel is billable.
    Relaxed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnrichmentPolicy {
    pub max_contacts_per_company: usize,
    pub roles: Vec<ContactRole>,
    pub channels: Vec<Channel>,
    pub verification: Verification,
    pub contact_credit_rate: u64,
    pub profile_credit_rate: u64,
}

impl Default for EnrichmentPolicy {
    fn default() -> Self {
        Self {
            max_contacts_per_company: 2,
            roles: ContactRole::ALL.to_vec(),
            channels: vec![Channel::Email, Channel::LinkedIn],
            verification: Verification::Strict,
            contact_credit_rate: 1,
            profile_credit_rate: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl DiscoveryConfig {
    pub fn from_toml(input: &str) -> Result<Self, DiscoveryError> {
        let config: DiscoveryConfig =
            toml::from_str(input).map_err(|e| DiscoveryError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, DiscoveryError> {
        toml::to_string_pretty(self).map_err(|e| DiscoveryError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), DiscoveryError> {
        let r = &self.ranking;
        for (name, value) in [
            ("ranking.market_weight", r.market_weight),
            ("ranking.cert_weight", r.cert_weight),
            ("ranking.recency_weight", r.recency_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        if r.max_suggestions == 0 {
            return Err(invalid("ranking.max_suggestions must be at least 1".into()));
        }

        let m = &self.resolution;
        if !(m.match_threshold > 0.0 && m.match_threshold <= 1.0) {
            return Err(invalid(format!(
                "resolution.match_threshold must be in (0, 1], got {}",
                m.match_threshold
            )));
        }
        if !(0.0..1.0).contains(&m.tie_margin) {
            return Err(invalid(format!(
                "resolution.tie_margin must be in [0, 1), got {}",
                m.tie_margin
            )));
        }
        if !(0.0..1.0).contains(&m.country_weight) {
            return Err(invalid(format!(
                "resolution.country_weight must be in [0, 1), got {}",
                m.country_weight
            )));
        }
        if !(0.0..=1.0).contains(&m.domain_match_score) {
            return Err(invalid(format!(
                "resolution.domain_match_score must be in [0, 1], got {}",
                m.domain_match_score
            )));
        }

        let e = &self.enrichment;
        if e.max_contacts_per_company == 0 {
            return Err(invalid("enrichment.max_contacts_per_company must be at least 1".into()));
        }
        if e.roles.is_empty() {
            return Err(invalid("enrichment.roles must not be empty".into()));
        }
        if e.channels.is_empty() {
            return Err(invalid("enrichment.channels must not be empty".into()));
        }

        Ok(())
    }
}

fn invalid(msg: String) -> DiscoveryError {
    DiscoveryError::ConfigValidation(msg)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
