//! `bscope config` and the config/lexicon loading shared by every command.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use buyerscope_discovery::DiscoveryConfig;
use buyerscope_lexicon::Lexicon;
use clap::Subcommand;

use crate::exit_codes::EXIT_INVALID_CONFIG;
use crate::util::read_file;
use crate::CliError;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective policy config as TOML
    #[command(after_help = "\
Examples:
  bscope config show
  bscope config show --config policy.toml > policy.toml.bak")]
    Show,

    /// Check a policy config file without running anything
    #[command(after_help = "\
Examples:
  bscope config validate policy.toml")]
    Validate {
        /// Path to the policy TOML file
        file: PathBuf,
    },
}

pub fn cmd_config(cmd: ConfigCommands, explicit: Option<&Path>) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Show => {
            let config = load_config(explicit)?;
            let text = config
                .to_toml()
                .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, e.to_string()))?;
            print!("{text}");
            Ok(())
        }
        ConfigCommands::Validate { file } => {
            parse_config(&file)?;
            eprintln!("config ok: {}", file.display());
            Ok(())
        }
    }
}

/// `--config <path>`, else the user config file when present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<DiscoveryConfig, CliError> {
    if let Some(path) = explicit {
        return parse_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            log::debug!("config: using {}", path.display());
            parse_config(&path)
        }
        _ => Ok(DiscoveryConfig::default()),
    }
}

/// `$XDG_CONFIG_HOME/buyerscope/policy.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("buyerscope").join("policy.toml"))
}

fn parse_config(path: &Path) -> Result<DiscoveryConfig, CliError> {
    let text = read_file(path)?;
    DiscoveryConfig::from_toml(&text).map_err(|e| {
        CliError::new(EXIT_INVALID_CONFIG, format!("{}: {e}", path.display()))
            .with_hint("run `bscope config show` to see every key with its default")
    })
}

/// Built-in lexicon, extended by `--lexicon <path>` when given.
pub fn load_lexicon(extension: Option<&Path>) -> Result<Cow<'static, Lexicon>, CliError> {
    let Some(path) = extension else {
        return Ok(Cow::Borrowed(Lexicon::builtin()));
    };
    let text = read_file(path)?;
    let lexicon = Lexicon::from_toml(&text)
        .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, format!("{}: {e}", path.display())))?;
    Ok(Cow::Owned(lexicon))
}
