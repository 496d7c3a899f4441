//! Puzzle Pair - CLI
//!
//! Code breaker and word search in the terminal, plus stats and an offline
//! generation report.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use puzzle_pair::{
    codebreak::CodeBreakEngine,
    commands::run_generation_report,
    interactive::{CodeBreakApp, WordSearchApp, run_tui},
    logging::{LogTarget, init_tracing},
    output::{print_dashboard, print_generation_report},
    stats::{Dashboard, JsonFileStore},
    themes::{Theme, builtin_catalog, load_from_file},
    wordsearch::{GRID_SIZE, GeneratorConfig, PLACEMENT_ATTEMPTS, WordSearchEngine},
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "puzzle_pair",
    about = "Code breaker and themed word search in the terminal",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Stats file shared by both games
    #[arg(
        long,
        global = true,
        env = "PUZZLE_PAIR_STORE",
        default_value = "puzzle_pair_stats.json"
    )]
    store: PathBuf,

    /// Seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write logs to this file (the games log nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Theme catalog file with `name: WORD WORD ...` lines (default: built-in themes)
    #[arg(short = 't', long, global = true)]
    themes: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crack the hidden color code (default)
    Codebreak,

    /// Find the theme words hidden in the letter grid
    Wordsearch,

    /// Show best time and word search progress
    Stats {
        /// Print as JSON instead of the formatted summary
        #[arg(long)]
        json: bool,
    },

    /// Generate many puzzles and report how often words fail to fit
    GenerationReport {
        /// Number of puzzles to generate
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,

        /// Grid height and width
        #[arg(short, long, default_value_t = GRID_SIZE)]
        size: usize,

        /// Random placements tried per word
        #[arg(short, long, default_value_t = PLACEMENT_ATTEMPTS)]
        attempts: usize,
    },
}

/// Load the theme catalog from the -t flag
fn load_catalog(path: Option<&Path>) -> Result<Vec<Theme>> {
    let Some(path) = path else {
        return Ok(builtin_catalog());
    };

    let catalog = load_from_file(path)
        .with_context(|| format!("failed to read themes from {}", path.display()))?;
    if catalog.is_empty() {
        bail!("no valid themes in {}", path.display());
    }
    Ok(catalog)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to the code breaker if no command given
    let command = cli.command.unwrap_or(Commands::Codebreak);

    let log_target = match (&command, cli.log_file.as_deref()) {
        (_, Some(path)) => LogTarget::File(path),
        (Commands::Codebreak | Commands::Wordsearch, None) => LogTarget::Silent,
        (_, None) => LogTarget::Stderr,
    };
    init_tracing(log_target)?;

    match command {
        Commands::Codebreak => run_codebreak_command(&cli.store, cli.seed),
        Commands::Wordsearch => {
            let catalog = load_catalog(cli.themes.as_deref())?;
            run_wordsearch_command(&cli.store, cli.seed, catalog)
        }
        Commands::Stats { json } => run_stats_command(&cli.store, json),
        Commands::GenerationReport {
            count,
            size,
            attempts,
        } => {
            let catalog = load_catalog(cli.themes.as_deref())?;
            run_generation_report_command(&catalog, count, size, attempts, cli.seed)
        }
    }
}

fn open_store(path: &Path) -> Result<JsonFileStore> {
    JsonFileStore::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn run_codebreak_command(store_path: &Path, seed: Option<u64>) -> Result<()> {
    let store = open_store(store_path)?;
    let engine = seed.map_or_else(CodeBreakEngine::new, CodeBreakEngine::with_seed);

    info!(store = %store_path.display(), "starting codebreak");
    run_tui(CodeBreakApp::new(engine, Box::new(store)))
}

fn run_wordsearch_command(store_path: &Path, seed: Option<u64>, catalog: Vec<Theme>) -> Result<()> {
    let store = open_store(store_path)?;
    let engine = match seed {
        Some(seed) => WordSearchEngine::with_seed(catalog, seed)?,
        None => WordSearchEngine::new(catalog)?,
    };

    info!(store = %store_path.display(), "starting word search");
    run_tui(WordSearchApp::new(engine, Box::new(store)))
}

fn run_stats_command(store_path: &Path, json: bool) -> Result<()> {
    let store = open_store(store_path)?;
    let dashboard = Dashboard::load(&store);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print_dashboard(&dashboard);
    }
    Ok(())
}

fn run_generation_report_command(
    catalog: &[Theme],
    count: usize,
    size: usize,
    attempts: usize,
    seed: Option<u64>,
) -> Result<()> {
    if size == 0 {
        bail!("grid size must be at least 1");
    }

    let config = GeneratorConfig {
        rows: size,
        cols: size,
        placement_attempts: attempts,
    };
    let base_seed = seed.unwrap_or_else(rand::random);

    println!("Generating {count} puzzles on a {size}x{size} grid (seed {base_seed})...");
    let stats = run_generation_report(catalog, &config, count, base_seed, true)
        .context("theme catalog is empty")?;

    print_generation_report(&stats, &config);
    Ok(())
}
