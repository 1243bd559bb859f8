use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LexiconError {
    /// TOML parse / deserialization error.
    Parse(String),
    /// An extension entry is malformed (empty keyword, bad HS code, etc.).
    Validation(String),
}

impl fmt::Display for LexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "lexicon parse error: {msg}"),
            Self::Validation(msg) => write!(f, "lexicon validation error: {msg}"),
        }
    }
}

impl std::error::Error for LexiconError {}
