use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record};

use connect_four_solver::ai::{BoundPolicy, MinimaxAgent, SearchKind};
use connect_four_solver::config::SolverConfig;
use connect_four_solver::game::GameState;

/// Find the best Connect Four move for the side to move.
#[derive(Parser)]
#[command(name = "c4solve", about = "Connect Four minimax solver")]
struct Cli {
    /// Moves played so far as 1-based column digits, Red first (e.g. "4453")
    #[arg(long, default_value = "")]
    moves: String,

    /// Path to TOML configuration file
    #[arg(long, default_value = "c4solve.toml")]
    config: PathBuf,

    /// Override search depth
    #[arg(long)]
    depth: Option<u32>,

    /// Override the cache bound policy
    #[arg(long, value_enum)]
    bound_policy: Option<PolicyArg>,

    /// Search without the transposition cache
    #[arg(long)]
    no_cache: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Log search details to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Window,
    Reference,
}

impl From<PolicyArg> for BoundPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Window => BoundPolicy::Window,
            PolicyArg::Reference => BoundPolicy::Reference,
        }
    }
}

/// Minimal stderr sink for the `log` facade.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("installing logger: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    if cli.print_config {
        print!("{}", SolverConfig::default_toml());
        return Ok(());
    }

    // Load configuration
    let mut config = SolverConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(policy) = cli.bound_policy {
        config.search.bound_policy = policy.into();
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }
    config.validate().context("invalid configuration")?;

    let state = GameState::from_moves(&cli.moves)
        .with_context(|| format!("replaying moves '{}'", cli.moves))?;

    println!("{}", state.board());
    println!();

    if let Some(outcome) = state.outcome() {
        bail!("game is already over: {outcome:?}");
    }

    let player = state.current_player();
    let mut agent = MinimaxAgent::from_config(&config, player);
    let outcome = agent
        .pick_best_move(state.board())
        .context("searching for a move")?;

    let how = match outcome.kind {
        SearchKind::ImmediateWin => "immediate win",
        SearchKind::ForcedBlock => "forced block",
        SearchKind::FullSearch => "search",
    };
    println!(
        "{} ({}) to move: column {} [{how}, score {}]",
        player,
        player.symbol(),
        outcome.best_move.col + 1,
        outcome.score
    );

    let cache = agent.cache().stats();
    println!(
        "depth {}, {} nodes, {} cutoffs, {} cache cutoffs, {} cached positions ({:.1}% hit rate), {:.2?}",
        agent.depth(),
        outcome.stats.nodes,
        outcome.stats.cutoffs,
        outcome.stats.cache_cutoffs,
        agent.cache().len(),
        cache.hit_rate() * 100.0,
        outcome.stats.elapsed,
    );

    Ok(())
}
