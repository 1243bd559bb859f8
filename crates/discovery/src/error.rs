use std::fmt;

use buyerscope_lexicon::LexiconError;

#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (weight out of range, empty role set, etc.).
    ConfigValidation(String),
    /// Ranking limit must be at least 1.
    InvalidLimit(usize),
    /// Catalog precondition violated (duplicate id, blank name, bad HS code).
    InvalidCatalog(String),
    /// A decoded assumption set breaks its invariants.
    InvalidAssumptions(String),
    /// A user edit would break an assumption set invariant.
    InvalidEdit(String),
    /// Company id not present in the catalog.
    UnknownCompany(String),
    Lexicon(LexiconError),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidLimit(limit) => write!(f, "invalid limit {limit}: must be at least 1"),
            Self::InvalidCatalog(msg) => write!(f, "invalid catalog: {msg}"),
            Self::InvalidAssumptions(msg) => write!(f, "invalid assumptions: {msg}"),
            Self::InvalidEdit(msg) => write!(f, "invalid edit: {msg}"),
            Self::UnknownCompany(id) => write!(f, "unknown company: '{id}'"),
            Self::Lexicon(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lexicon(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexiconError> for DiscoveryError {
    fn from(err: LexiconError) -> Self {
        Self::Lexicon(err)
    }
}
