use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "poidb")]
#[command(about = "Load point-of-interest CSV files and run composite queries over them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a POI CSV file and run one query against it
    Query(commands::query::QueryArgs),

    /// Tabulate search times and throughputs from many query output directories
    Collect {
        /// Directory whose sub-directories each hold a query's log.txt
        #[arg(long, default_value = "./output")]
        base: String,
    },
}

/// How records with an already loaded id are handled.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Duplicates {
    /// Fail the load
    #[default]
    Reject,
    /// Keep the first record and continue
    Skip,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query(args) => commands::query::run(args),
        Commands::Collect { base } => commands::collect::run(base),
    }
}
