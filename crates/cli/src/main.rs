// bscope - buyer discovery from the command line
// JSON on stdout (with --json), human summary and logs on stderr

mod config;
mod estimate;
mod exit_codes;
mod interpret;
mod rank;
mod resolve;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use buyerscope_discovery::DiscoveryError;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::ConfigCommands;
use estimate::EstimateArgs;
use exit_codes::{discovery_exit_code, EXIT_SUCCESS};
use rank::RankArgs;
use resolve::ResolveArgs;

#[derive(Parser)]
#[command(name = "bscope")]
#[command(about = "Buyer discovery: interpret queries, rank exporters, resolve uploads, price enrichment")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Policy config TOML (defaults to the user config file, then built-in defaults)
    #[arg(long, global = true, env = "BSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Extra lexicon entries TOML layered over the built-in tables
    #[arg(long, global = true, env = "BSCOPE_LEXICON")]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a free-text product query into a structured assumption set
    #[command(after_help = "\
Examples:
  bscope interpret 'black pepper ASTA 500 Europe 180d'
  bscope interpret pepper europe --json > assumptions.json
  bscope interpret pepper --edit '{\"op\":\"add_cert\",\"code\":\"HACCP\"}'")]
    Interpret {
        /// Query text (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        /// Assumption edit applied after interpretation. Repeatable.
        #[arg(long, value_name = "JSON")]
        edit: Vec<String>,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Rank catalog companies against a query or assumption set
    #[command(after_help = "\
Examples:
  bscope rank --catalog catalog.json --query 'pepper Europe 180d'
  bscope rank --catalog catalog.json --assumptions assumptions.json --limit 20 --json
  bscope rank --catalog catalog.json --query turmeric --budget-ms 200 --output ranked.json")]
    Rank(RankArgs),

    /// Match uploaded company rows against the catalog
    #[command(after_help = "\
Examples:
  bscope resolve --catalog catalog.json --rows upload.json
  bscope resolve --catalog catalog.json --rows upload.json --json --output resolved.json")]
    Resolve(ResolveArgs),

    /// Estimate enrichment credits for a company selection
    #[command(after_help = "\
Examples:
  bscope estimate --catalog catalog.json --ids cmp-001,cmp-002
  bscope estimate --catalog catalog.json --ids cmp-001 --commit catalog.next.json --json")]
    Estimate(EstimateArgs),

    /// Show or validate the policy config
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  buyerscope-discovery ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  buyerscope-discovery ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
        )
    }
}

/// Logs go to stderr; `BSCOPE_LOG` takes an env-filter directive, default `warn`.
/// Records from the `log` facade are captured as well.
fn init_logging() {
    let filter = EnvFilter::try_from_env("BSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Config { command } => config::cmd_config(command, config_path),
        Commands::Interpret { text, edit, json } => {
            let lexicon = config::load_lexicon(cli.lexicon.as_deref())?;
            interpret::cmd_interpret(&lexicon, &text.join(" "), &edit, json)
        }
        Commands::Rank(args) => {
            let lexicon = config::load_lexicon(cli.lexicon.as_deref())?;
            let policy = config::load_config(config_path)?;
            rank::cmd_rank(&lexicon, &policy.ranking, args)
        }
        Commands::Resolve(args) => {
            let lexicon = config::load_lexicon(cli.lexicon.as_deref())?;
            let policy = config::load_config(config_path)?;
            resolve::cmd_resolve(&lexicon, &policy.resolution, args)
        }
        Commands::Estimate(args) => {
            let lexicon = config::load_lexicon(cli.lexicon.as_deref())?;
            let policy = config::load_config(config_path)?;
            estimate::cmd_estimate(&lexicon, &policy.enrichment, args)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<DiscoveryError> for CliError {
    fn from(err: DiscoveryError) -> Self {
        let hint = match &err {
            DiscoveryError::UnknownCompany(_) => {
                Some("ids must match the `id` field of a catalog company".to_string())
            }
            DiscoveryError::InvalidLimit(_) => Some("use --limit 1 or more".to_string()),
            _ => None,
        };
        Self { code: discovery_exit_code(&err), message: err.to_string(), hint }
    }
}
