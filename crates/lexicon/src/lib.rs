//! `buyerscope-lexicon` - static trade taxonomy.
//!
//! Flat keyword tables (commodity → HS code, place → market, certification,
//! grade, pack, job title → contact role) built once per process.
//! No IO dependencies.

mod error;
pub mod tables;

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use error::LexiconError;

static BUILTIN: Lazy<Lexicon> = Lazy::new(Lexicon::from_tables);

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CommodityEntry {
    pub hs_code: String,
    pub confidence: f64,
}

/// A lexicon hit, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term<'a> {
    Commodity(&'a CommodityEntry),
    Market(&'a str),
    Cert(&'a str),
    Grade(&'a str),
    Pack(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRole {
    Procurement,
    CategoryManager,
    /// Owner, CEO or founder.
    Executive,
}

impl ContactRole {
    pub const ALL: [ContactRole; 3] = [
        ContactRole::Procurement,
        ContactRole::CategoryManager,
        ContactRole::Executive,
    ];

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "procurement" => Some(Self::Procurement),
            "category_manager" => Some(Self::CategoryManager),
            "executive" => Some(Self::Executive),
            _ => None,
        }
    }
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Procurement => write!(f, "Procurement"),
            Self::CategoryManager => write!(f, "Category Manager"),
            Self::Executive => write!(f, "Owner/CEO/Founder"),
        }
    }
}

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Lexicon {
    commodities: HashMap<String, CommodityEntry>,
    markets: HashMap<String, String>,
    regions: HashMap<String, Vec<String>>,
    certs: HashMap<String, String>,
    grades: HashMap<String, String>,
    packs: HashMap<String, String>,
    max_ngram: usize,
}

impl Lexicon {
    /// The built-in tables, shared process-wide.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    fn from_tables() -> Self {
        let commodities = tables::COMMODITIES
            .iter()
            .map(|(k, code, conf)| {
                (
                    (*k).to_string(),
                    CommodityEntry {
                        hs_code: (*code).to_string(),
                        confidence: *conf,
                    },
                )
            })
            .collect();
        let pairs = |t: &[(&str, &str)]| -> HashMap<String, String> {
            t.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
        };
        let regions = tables::REGIONS
            .iter()
            .map(|(code, members)| {
                (
                    (*code).to_string(),
                    members.iter().map(|m| (*m).to_string()).collect(),
                )
            })
            .collect();

        let mut lexicon = Self {
            commodities,
            markets: pairs(tables::MARKETS),
            regions,
            certs: pairs(tables::CERTS),
            grades: pairs(tables::GRADES),
            packs: pairs(tables::PACKS),
            max_ngram: 1,
        };
        lexicon.recompute_max_ngram();
        lexicon
    }

    fn recompute_max_ngram(&mut self) {
        self.max_ngram = self
            .commodities
            .keys()
            .chain(self.markets.keys())
            .chain(self.certs.keys())
            .chain(self.grades.keys())
            .chain(self.packs.keys())
            .map(|k| k.split(' ').count())
            .max()
            .unwrap_or(1);
    }

    /// Longest keyword, in tokens.
    pub fn max_ngram(&self) -> usize {
        self.max_ngram
    }

    /// Look up a normalized key in priority order:
    /// commodity, market, certification, grade, pack.
    pub fn lookup(&self, key: &str) -> Option<Term<'_>> {
        if let Some(entry) = self.commodities.get(key) {
            return Some(Term::Commodity(entry));
        }
        if let Some(code) = self.markets.get(key) {
            return Some(Term::Market(code));
        }
        if let Some(code) = self.certs.get(key) {
            return Some(Term::Cert(code));
        }
        if let Some(grade) = self.grades.get(key) {
            return Some(Term::Grade(grade));
        }
        self.packs.get(key).map(|p| Term::Pack(p))
    }

    pub fn commodity(&self, key: &str) -> Option<&CommodityEntry> {
        self.commodities.get(&normalize_key(key))
    }

    pub fn market(&self, key: &str) -> Option<&str> {
        self.markets.get(&normalize_key(key)).map(String::as_str)
    }

    pub fn cert(&self, key: &str) -> Option<&str> {
        self.certs.get(&normalize_key(key)).map(String::as_str)
    }

    /// Member countries of a region code; empty for plain country codes.
    pub fn region_members(&self, code: &str) -> &[String] {
        self.regions.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_region(&self, code: &str) -> bool {
        self.regions.contains_key(code)
    }

    /// Region codes whose members include `country`, sorted.
    pub fn regions_containing(&self, country: &str) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .regions
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m == country))
            .map(|(code, _)| code.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    /// A market covers a country when it is that country or a region containing it.
    pub fn market_covers(&self, market: &str, country: &str) -> bool {
        market == country || self.region_members(market).iter().any(|m| m == country)
    }

    /// Resolve free text ("India", "in", "United Kingdom") to an ISO country code.
    ///
    /// Region names do not resolve: a company row names one country.
    pub fn country_code(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        let code = match self.markets.get(&normalize_key(trimmed)) {
            Some(code) => code.clone(),
            // Bare ISO code the table does not list
            None if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) => {
                trimmed.to_ascii_uppercase()
            }
            None => return None,
        };
        if self.is_region(&code) {
            None
        } else {
            Some(code)
        }
    }

    /// Map a free-text job title onto a contact role.
    pub fn contact_role(&self, title: &str) -> Option<ContactRole> {
        let padded = format!(" {} ", normalize_words(title));
        tables::ROLE_TITLES
            .iter()
            .find(|(_, phrases)| {
                phrases
                    .iter()
                    .any(|p| padded.contains(&format!(" {p} ")))
            })
            .and_then(|(key, _)| ContactRole::from_key(key))
    }

    pub fn is_legal_suffix(&self, token: &str) -> bool {
        tables::LEGAL_SUFFIXES.contains(&token)
    }

    pub fn is_free_mail_domain(&self, domain: &str) -> bool {
        tables::FREE_MAIL_DOMAINS.contains(&domain)
    }

    /// Built-in tables plus the entries of a TOML extension file.
    pub fn from_toml(input: &str) -> Result<Lexicon, LexiconError> {
        Self::builtin().extend_from_toml(input)
    }

    /// Layer extra entries from TOML over this lexicon. Extra entries replace
    /// existing ones with the same keyword.
    pub fn extend_from_toml(&self, input: &str) -> Result<Lexicon, LexiconError> {
        let ext: LexiconExtension =
            toml::from_str(input).map_err(|e| LexiconError::Parse(e.to_string()))?;
        let mut out = self.clone();

        for c in ext.commodity {
            let keyword = checked_keyword(&c.keyword, "commodity")?;
            if !is_valid_hs_code(&c.hs_code) {
                return Err(LexiconError::Validation(format!(
                    "commodity '{keyword}': invalid HS code '{}'",
                    c.hs_code
                )));
            }
            if !(0.0..=1.0).contains(&c.confidence) {
                return Err(LexiconError::Validation(format!(
                    "commodity '{keyword}': confidence {} outside [0, 1]",
                    c.confidence
                )));
            }
            out.commodities.insert(
                keyword,
                CommodityEntry {
                    hs_code: c.hs_code,
                    confidence: c.confidence,
                },
            );
        }

        for m in ext.market {
            let keyword = checked_keyword(&m.keyword, "market")?;
            let code = checked_code(&m.code, "market", &keyword)?;
            if !m.members.is_empty() {
                let members = m.members.iter().map(|c| c.trim().to_ascii_uppercase()).collect();
                out.regions.insert(code.clone(), members);
            }
            out.markets.insert(keyword, code);
        }

        for (defs, kind) in [(ext.cert, "cert"), (ext.grade, "grade"), (ext.pack, "pack")] {
            for d in defs {
                let keyword = checked_keyword(&d.keyword, kind)?;
                let code = checked_code(&d.code, kind, &keyword)?;
                let table = match kind {
                    "cert" => &mut out.certs,
                    "grade" => &mut out.grades,
                    _ => &mut out.packs,
                };
                table.insert(keyword, code);
            }
        }

        out.recompute_max_ngram();
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Extension file
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconExtension {
    #[serde(default)]
    commodity: Vec<CommodityDef>,
    #[serde(default)]
    market: Vec<MarketDef>,
    #[serde(default)]
    cert: Vec<LabelDef>,
    #[serde(default)]
    grade: Vec<LabelDef>,
    #[serde(default)]
    pack: Vec<LabelDef>,
}

#[derive(Debug, Deserialize)]
struct CommodityDef {
    keyword: String,
    hs_code: String,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct MarketDef {
    keyword: String,
    code: String,
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LabelDef {
    keyword: String,
    code: String,
}

fn checked_keyword(raw: &str, kind: &str) -> Result<String, LexiconError> {
    let key = normalize_key(raw);
    if key.is_empty() {
        return Err(LexiconError::Validation(format!("{kind}: empty keyword")));
    }
    Ok(key)
}

fn checked_code(raw: &str, kind: &str, keyword: &str) -> Result<String, LexiconError> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(LexiconError::Validation(format!("{kind} '{keyword}': empty code")));
    }
    Ok(code.to_string())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lower-case and collapse whitespace. Table keys are stored in this form.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case, replace non-alphanumerics with spaces, collapse whitespace.
pub fn normalize_words(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    normalize_key(&replaced)
}

/// HS codes are 2-10 digits in pairs (chapter, heading, subheading, ...).
pub fn is_valid_hs_code(code: &str) -> bool {
    (2..=10).contains(&code.len())
        && code.len() % 2 == 0
        && code.chars().all(|c| c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
