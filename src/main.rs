use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use linkexplain::config::Config;
use linkexplain::error::ExplainResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Explain record-linkage match scores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags given on the command line override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Break a scored comparison row into waterfall contributions.
    Explain(cmd::explain::ExplainArgs),
    /// Show what differs between two field values.
    Diff(cmd::diff::DiffArgs),
    /// Turn an entered record pair into the records sent for scoring.
    Prepare(cmd::prepare::PrepareArgs),
    /// Convert between probability, Bayes factor and match weight.
    Convert(cmd::convert::ConvertArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Explain(args) => resolve_config(&cli, &matches, "explain", |config, sub| {
            config.display.merge_from_cli(&args.display, sub)
        })
        .and_then(|config| cmd::explain::run(args, config)),
        Commands::Prepare(args) => resolve_config(&cli, &matches, "prepare", |config, sub| {
            config.term_frequency.merge_from_cli(&args.term_frequency, sub)
        })
        .and_then(|config| cmd::prepare::run(args, config)),
        Commands::Diff(args) => cmd::diff::run(args),
        Commands::Convert(args) => cmd::convert::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

/// File config (or the defaults) as the base, flags typed for the
/// subcommand on top. `apply` merges only the section that subcommand owns.
fn resolve_config(
    cli: &Cli,
    matches: &ArgMatches,
    subcommand: &str,
    apply: impl FnOnce(&mut Config, &ArgMatches),
) -> ExplainResult<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };
    if let Some(sub_matches) = matches.subcommand_matches(subcommand) {
        apply(&mut config, sub_matches);
    }
    Ok(config)
}
