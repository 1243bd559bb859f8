use std::collections::BTreeSet;

use buyerscope_lexicon::is_valid_hs_code;
use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 180;

/// One HS code the search targets, with the lexicon's confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsEntry {
    pub code: String,
    pub confidence: f64,
}

/// Structured search produced by the interpreter.
///
/// HS entries are unique by code and keep the order of first appearance.
/// Changed only through [`AssumptionSet::apply`], which returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssumptionSet {
    #[serde(default)]
    pub hs: Vec<HsEntry>,
    #[serde(default)]
    pub markets: BTreeSet<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub pack: Option<String>,
    #[serde(default = "default_lookback")]
    pub lookback_days: u32,
    #[serde(default)]
    pub moq_tonnes: Option<f64>,
    #[serde(default)]
    pub certs: BTreeSet<String>,
}

fn default_lookback() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

impl Default for AssumptionSet {
    fn default() -> Self {
        Self {
            hs: Vec::new(),
            markets: BTreeSet::new(),
            grade: None,
            pack: None,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            moq_tonnes: None,
            certs: BTreeSet::new(),
        }
    }
}

/// An explicit user edit of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AssumptionEdit {
    /// Adds the code, or replaces the confidence of an existing one in place.
    AddHs { code: String, confidence: f64 },
    RemoveHs { code: String },
    AddMarket { code: String },
    RemoveMarket { code: String },
    ReplaceMarkets { codes: Vec<String> },
    SetGrade { grade: String },
    ClearGrade,
    SetPack { pack: String },
    ClearPack,
    SetMoq { tonnes: f64 },
    ClearMoq,
    SetLookback { days: u32 },
    AddCert { code: String },
    RemoveCert { code: String },
    Reset,
}

impl AssumptionSet {
    /// A search needs at least one HS code; an empty set never means "everything".
    pub fn is_runnable(&self) -> bool {
        !self.hs.is_empty()
    }

    pub fn hs_codes(&self) -> impl Iterator<Item = &str> {
        self.hs.iter().map(|e| e.code.as_str())
    }

    /// Decode a JSON assumption set and check its invariants.
    pub fn from_json(input: &str) -> Result<Self, DiscoveryError> {
        let set: AssumptionSet = serde_json::from_str(input)
            .map_err(|e| DiscoveryError::InvalidAssumptions(format!("JSON: {e}")))?;
        set.validate().map_err(|e| match e {
            DiscoveryError::InvalidEdit(msg) => DiscoveryError::InvalidAssumptions(msg),
            other => other,
        })?;
        Ok(set)
    }

    pub fn validate(&self) -> Result<(), DiscoveryError> {
        let mut seen = BTreeSet::new();
        for entry in &self.hs {
            check_hs(&entry.code, entry.confidence)?;
            if !seen.insert(entry.code.as_str()) {
                return Err(edit_err(format!("duplicate HS code '{}'", entry.code)));
            }
        }
        if self.lookback_days == 0 {
            return Err(edit_err("lookback must be at least 1 day".into()));
        }
        if let Some(t) = self.moq_tonnes {
            check_moq(t)?;
        }
        Ok(())
    }

    /// Apply one edit, returning the edited copy. `self` is left unchanged.
    pub fn apply(&self, edit: AssumptionEdit) -> Result<AssumptionSet, DiscoveryError> {
        let mut next = self.clone();
        match edit {
            AssumptionEdit::AddHs { code, confidence } => {
                let code = code.trim().to_string();
                check_hs(&code, confidence)?;
                match next.hs.iter_mut().find(|e| e.code == code) {
                    Some(existing) => existing.confidence = confidence,
                    None => next.hs.push(HsEntry { code, confidence }),
                }
            }
            AssumptionEdit::RemoveHs { code } => {
                let code = code.trim();
                let before = next.hs.len();
                next.hs.retain(|e| e.code != code);
                if next.hs.len() == before {
                    return Err(edit_err(format!("no HS code '{code}' to remove")));
                }
            }
            AssumptionEdit::AddMarket { code } => {
                next.markets.insert(checked_code(&code, "market")?);
            }
            AssumptionEdit::RemoveMarket { code } => {
                let code = checked_code(&code, "market")?;
                if !next.markets.remove(&code) {
                    return Err(edit_err(format!("no market '{code}' to remove")));
                }
            }
            AssumptionEdit::ReplaceMarkets { codes } => {
                next.markets = codes
                    .iter()
                    .map(|c| checked_code(c, "market"))
                    .collect::<Result<_, _>>()?;
            }
            AssumptionEdit::SetGrade { grade } => next.grade = Some(checked_label(&grade, "grade")?),
            AssumptionEdit::ClearGrade => next.grade = None,
            AssumptionEdit::SetPack { pack } => next.pack = Some(checked_label(&pack, "pack")?),
            AssumptionEdit::ClearPack => next.pack = None,
            AssumptionEdit::SetMoq { tonnes } => {
                check_moq(tonnes)?;
                next.moq_tonnes = Some(tonnes);
            }
            AssumptionEdit::ClearMoq => next.moq_tonnes = None,
            AssumptionEdit::SetLookback { days } => {
                if days == 0 {
                    return Err(edit_err("lookback must be at least 1 day".into()));
                }
                next.lookback_days = days;
            }
            AssumptionEdit::AddCert { code } => {
                next.certs.insert(checked_code(&code, "cert")?);
            }
            AssumptionEdit::RemoveCert { code } => {
                let code = checked_code(&code, "cert")?;
                if !next.certs.remove(&code) {
                    return Err(edit_err(format!("no cert '{code}' to remove")));
                }
            }
            AssumptionEdit::Reset => next = AssumptionSet::default(),
        }
        Ok(next)
    }
}

fn edit_err(msg: String) -> DiscoveryError {
    DiscoveryError::InvalidEdit(msg)
}

fn check_hs(code: &str, confidence: f64) -> Result<(), DiscoveryError> {
    if !is_valid_hs_code(code) {
        return Err(edit_err(format!("malformed HS code '{code}'")));
    }
    if !(0.0..=1.0).contains(&confidence) {
        return Err(edit_err(format!(
            "confidence {confidence} for HS code '{code}' is outside [0, 1]"
        )));
    }
    Ok(())
}

fn check_moq(tonnes: f64) -> Result<(), DiscoveryError> {
    if !tonnes.is_finite() || tonnes <= 0.0 {
        return Err(edit_err(format!("MOQ must be a positive number of tonnes, got {tonnes}")));
    }
    Ok(())
}

fn checked_code(raw: &str, kind: &str) -> Result<String, DiscoveryError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.is_empty() {
        return Err(edit_err(format!("empty {kind} code")));
    }
    Ok(code)
}

fn checked_label(raw: &str, kind: &str) -> Result<String, DiscoveryError> {
    let label = raw.trim();
    if label.is_empty() {
        return Err(edit_err(format!("empty {kind}")));
    }
    Ok(label.to_string())
}
