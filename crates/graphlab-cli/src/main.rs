//! Graphlab CLI - generate practice graphs, print step traces, and grade
//! scripted play sessions from the terminal.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use commands::GraphSource;

/// Graph algorithm practice tool.
///
/// Generates practice graphs, shows every step an algorithm takes on
/// them, and grades a sequence of moves the way an interactive session
/// would.
#[derive(Parser)]
#[command(name = "graphlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Suppress output and info messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Generate a practice graph
    Generate {
        #[command(flatten)]
        source: GraphSource,

        /// Write the graph as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run an algorithm and print every step
    Trace {
        #[command(flatten)]
        source: GraphSource,

        /// Algorithm key (dfs, bfs, dijkstra, astar, kruskal, prim,
        /// ford-fulkerson, edmonds-karp)
        #[arg(short, long)]
        algorithm: String,

        /// Start node (flow source)
        #[arg(long, default_value = "0")]
        start: String,

        /// Goal node for A*, sink for flow algorithms
        #[arg(long)]
        goal: Option<String>,
    },

    /// Print an algorithm's pseudocode
    Pseudocode {
        /// Algorithm key
        algorithm: String,
    },

    /// Grade a sequence of moves
    Play {
        #[command(flatten)]
        source: GraphSource,

        /// Algorithm key
        #[arg(short, long)]
        algorithm: String,

        /// Start node (flow source)
        #[arg(long, default_value = "0")]
        start: String,

        /// Goal node for A*, sink for flow algorithms
        #[arg(long)]
        goal: Option<String>,

        /// Scoring policy JSON file
        #[arg(long)]
        scoring: Option<PathBuf>,

        /// Moves in order: `A`, `A->B`, or `S->A->T`
        moves: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let result = match cli.command {
        Commands::Generate { source, output } => {
            commands::generate::run(&source, output.as_deref(), cli.format, cli.quiet)
        }
        Commands::Trace {
            source,
            algorithm,
            start,
            goal,
        } => commands::trace::run(&source, &algorithm, start, goal, cli.format, cli.quiet),
        Commands::Pseudocode { algorithm } => {
            commands::pseudocode::run(&algorithm, cli.format, cli.quiet)
        }
        Commands::Play {
            source,
            algorithm,
            start,
            goal,
            scoring,
            moves,
        } => commands::play::run(
            &source,
            &commands::play::PlayArgs {
                algorithm,
                start,
                goal,
                scoring,
                moves,
            },
            cli.format,
            cli.quiet,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
