//! typequiz CLI: play and inspect typography quiz catalogs.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "typequiz", version, about = "Typography quiz in the terminal")]
struct Cli {
    /// Log engine events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the quiz
    Play {
        /// Start at the first question of this category
        #[arg(long)]
        category: Option<String>,

        /// Start at this question
        #[arg(long, conflicts_with = "category")]
        question: Option<String>,

        /// Catalog file or directory (default: built-in questions)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pause after each answer, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// List categories
    Categories {
        /// Catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show one question, its answer and what follows it
    Show {
        /// Question ID
        id: String,

        /// Catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the lookup result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Create starter config and example catalog
    Init,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("typequiz=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typequiz=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let result = match cli.command {
        Commands::Play {
            category,
            question,
            catalog,
            config,
            delay_ms,
        } => commands::play::execute(commands::play::PlayArgs {
            category,
            question,
            catalog,
            config,
            delay_ms,
        }),
        Commands::Categories { catalog, config } => commands::categories::execute(catalog, config),
        Commands::Show {
            id,
            catalog,
            config,
            json,
        } => commands::show::execute(id, catalog, config, json),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
