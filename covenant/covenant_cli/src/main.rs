use anyhow::Context;
use clap::{Parser, Subcommand};
use covenant_core::utils::{ConfigOverrides, CovenantConfig, LogLevel};
use log::debug;
use std::path::PathBuf;

mod commands;

use commands::{exit_codes, policy, vocab};

/// Covenant Command Line Interface
///
/// Author, check and export rights-expression policies.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[clap(long, global = true)]
    log_level: Option<LogLevel>,

    /// Profile IRI written into ODRL documents that declare none
    #[clap(long, global = true)]
    profile: Option<String>,

    /// Emit compact JSON regardless of configuration
    #[clap(long, global = true)]
    compact: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical skeleton of a new policy
    New(policy::NewArgs),

    /// Check policy documents for structural violations
    Validate(policy::ValidateArgs),

    /// Export a policy document in canonical form
    Export(policy::ExportArgs),

    /// Save valid policies into a store and list its entries
    Catalog(policy::CatalogArgs),

    /// List vocabulary tables and their terms
    Vocab(vocab::VocabArgs),
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_codes::ERROR
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut config =
        CovenantConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.merge(ConfigOverrides {
        log_level: cli.log_level,
        pretty: cli.compact.then_some(false),
        default_profile: cli.profile,
    });
    config
        .validate()
        .context("invalid command-line options")?;

    init_logging(config.logging.level);

    match cli.command {
        Commands::New(args) => policy::execute_new(&args, &config),
        Commands::Validate(args) => policy::execute_validate(&args),
        Commands::Export(args) => policy::execute_export(&args, &config),
        Commands::Catalog(args) => policy::execute_catalog(&args, &config),
        Commands::Vocab(args) => vocab::execute_vocab(&args),
    }
}

/// Install the logger. `RUST_LOG` still wins over the configured level.
fn init_logging(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .format_timestamp(None)
        .try_init();

    // A logger installed earlier keeps receiving records.
    if let Err(e) = result {
        debug!("Logger not replaced: {}", e);
    }
}
