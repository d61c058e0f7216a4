use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use showdown::config::{Edition, SetConfig};
use showdown::era::Era;
use showdown::error::{SdResult, ShowdownError};
use std::process;
use tracing::{info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "expanded")]
    edition: Edition,

    /// JSON set file replacing the built-in tables for the edition.
    #[arg(global = true, long)]
    set_config: Option<String>,

    /// Forces the era instead of deriving it from the first season.
    #[arg(global = true, long)]
    era: Option<Era>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Build(cmd::build::BuildArgs),
    Charts(cmd::charts::ChartsArgs),
    Batch(cmd::batch::BatchArgs),
}

fn main() {
    // Raw matches tell explicitly passed flags apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> SdResult<()> {
    let mut set = match &cli.set_config {
        Some(path) => {
            info!("⚖️  Loading set config from {}", path);
            SetConfig::load_from_file(path)?
        }
        None => SetConfig::for_edition(cli.edition),
    };

    // Tuning flags live on the subcommand, so merge against its matches
    let sub_matches = matches
        .subcommand()
        .map(|(_, m)| m)
        .ok_or_else(|| ShowdownError::Config("No subcommand given".into()))?;
    let tuning = match &cli.command {
        Commands::Build(args) => &args.tuning,
        Commands::Charts(args) => &args.tuning,
        Commands::Batch(args) => &args.tuning,
    };
    set.merge_from_cli(tuning, sub_matches);
    set.validate()?;

    match cli.command {
        Commands::Build(args) => cmd::build::run(args, &set, cli.era),
        Commands::Charts(args) => cmd::charts::run(args, &set),
        Commands::Batch(args) => cmd::batch::run(args, &set, cli.era),
    }
}
