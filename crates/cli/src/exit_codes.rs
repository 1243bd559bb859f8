//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `bscope` exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | Success                                                     |
//! | 1    | General error (unspecified)                                 |
//! | 2    | CLI usage error (bad args, missing file)                    |
//! | 3    | Invalid config or lexicon extension                         |
//! | 4    | Invalid input (catalog, rows, assumptions)                  |
//! | 5    | Search not runnable (no HS code in the assumptions)         |
//! | 6    | Unknown company id                                          |
//! | 7    | Invalid assumption edit                                     |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `discovery_exit_code` or the command's error handling

use buyerscope_discovery::DiscoveryError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (output write, serialization).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable input file.
pub const EXIT_USAGE: u8 = 2;

/// Config or lexicon file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Catalog, upload rows or assumption file is malformed.
pub const EXIT_INVALID_INPUT: u8 = 4;

/// The query yielded no HS code, so there is nothing to search.
pub const EXIT_NOT_RUNNABLE: u8 = 5;

/// A requested company id is not in the catalog.
pub const EXIT_UNKNOWN_COMPANY: u8 = 6;

/// An assumption edit was rejected.
pub const EXIT_INVALID_EDIT: u8 = 7;

/// Map an engine error to its exit code.
pub fn discovery_exit_code(err: &DiscoveryError) -> u8 {
    match err {
        DiscoveryError::ConfigParse(_)
        | DiscoveryError::ConfigValidation(_)
        | DiscoveryError::Lexicon(_) => EXIT_INVALID_CONFIG,
        DiscoveryError::InvalidLimit(_) => EXIT_USAGE,
        DiscoveryError::InvalidCatalog(_) | DiscoveryError::InvalidAssumptions(_) => {
            EXIT_INVALID_INPUT
        }
        DiscoveryError::InvalidEdit(_) => EXIT_INVALID_EDIT,
        DiscoveryError::UnknownCompany(_) => EXIT_UNKNOWN_COMPANY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buyerscope_lexicon::LexiconError;

    #[test]
    fn engine_errors_map_to_registry() {
        assert_eq!(
            discovery_exit_code(&DiscoveryError::ConfigParse("x".into())),
            EXIT_INVALID_CONFIG
        );
        assert_eq!(
            discovery_exit_code(&DiscoveryError::Lexicon(LexiconError::Parse("x".into()))),
            EXIT_INVALID_CONFIG
        );
        assert_eq!(discovery_exit_code(&DiscoveryError::InvalidLimit(0)), EXIT_USAGE);
        assert_eq!(
            discovery_exit_code(&DiscoveryError::InvalidCatalog("x".into())),
            EXIT_INVALID_INPUT
        );
        assert_eq!(
            discovery_exit_code(&DiscoveryError::InvalidEdit("x".into())),
            EXIT_INVALID_EDIT
        );
        assert_eq!(
            discovery_exit_code(&DiscoveryError::UnknownCompany("x".into())),
            EXIT_UNKNOWN_COMPANY
        );
    }
}
