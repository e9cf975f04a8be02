//! Spellcast Solver - CLI
//!
//! Finds the best moves on a 5x5 letter grid, including gem-funded letter
//! swaps, and advises whether a shuffle is worth a gem.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info};
use spellcast_solver::{
    commands::{SolveConfig, run_benchmark, solve_text},
    dictionary::{Dictionary, loader::load_from_file},
    output::{print_benchmark_result, print_solve_result},
    solver::{LeafFilter, Ranking, SearchLimits},
};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "spellcast",
    about = "Move finder for 5x5 letter-grid word games with gem-funded letter swaps",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list file, one word per line (default: embedded dictionary)
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    /// Worker threads for the search (default: one per core)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only record words of at least this many letters (lossy)
    #[arg(long, global = true)]
    min_length: Option<usize>,

    /// Only record words whose multiplier-free score reaches this (lossy)
    #[arg(long, global = true)]
    min_score: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a board read from a file or stdin
    Solve {
        /// Board file (reads stdin when omitted)
        board: Option<PathBuf>,

        /// Number of moves to show
        #[arg(short, long, default_value = "3")]
        moves: usize,

        /// Rank moves by long-term value, counting the gems they leave
        #[arg(short, long)]
        gem_management: bool,
    },

    /// Benchmark the solver on random boards
    Benchmark {
        /// Number of random boards to solve
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,

        /// Seed for board generation
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the thread pool")?;
    }

    let dictionary = load_dictionary(cli.dictionary.as_deref())?;
    let limits = search_limits(cli.min_length, cli.min_score);

    match cli.command {
        Commands::Solve {
            board,
            moves,
            gem_management,
        } => run_solve_command(
            &dictionary,
            board.as_deref(),
            moves,
            gem_management,
            limits,
            cli.verbose,
        ),
        Commands::Benchmark { count, seed } => {
            run_benchmark_command(&dictionary, limits, count, seed)
        }
    }
}

/// Load the word list given by `--dictionary`, or the embedded one
fn load_dictionary(path: Option<&Path>) -> Result<Dictionary> {
    let dictionary = match path {
        Some(path) => load_from_file(path)
            .with_context(|| format!("failed to read dictionary {}", path.display()))?,
        None => Dictionary::embedded(),
    };
    info!("dictionary loaded: {} words", dictionary.len());
    Ok(dictionary)
}

/// Exhaustive search unless either lossy threshold is given
fn search_limits(min_length: Option<usize>, min_score: Option<u32>) -> SearchLimits {
    if min_length.is_none() && min_score.is_none() {
        return SearchLimits::exhaustive();
    }

    let defaults = LeafFilter::default();
    SearchLimits {
        leaf_filter: Some(LeafFilter::new(
            min_length.unwrap_or(defaults.min_length),
            min_score.unwrap_or(defaults.min_score),
        )),
        ..SearchLimits::exhaustive()
    }
}

fn read_board_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read board {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read board from stdin")?;
            Ok(text)
        }
    }
}

fn run_solve_command(
    dictionary: &Dictionary,
    board: Option<&Path>,
    moves: usize,
    gem_management: bool,
    limits: SearchLimits,
    verbose: bool,
) -> Result<()> {
    let text = read_board_text(board)?;
    let config = SolveConfig {
        limits,
        ..SolveConfig::new(moves, Ranking::from_gem_management(gem_management))
    };

    let result = solve_text(&text, dictionary, &config).context("invalid board")?;
    print_solve_result(&result, verbose);
    Ok(())
}

fn run_benchmark_command(
    dictionary: &Dictionary,
    limits: SearchLimits,
    count: usize,
    seed: u64,
) -> Result<()> {
    println!("Running benchmark on {count} random boards (seed {seed})...");

    let result = run_benchmark(dictionary, limits, count, seed, true)
        .context("failed to generate a benchmark board")?;
    print_benchmark_result(&result);
    Ok(())
}
