//! # Episode Runner
//!
//! Loads a price table, builds a [`StockEnv`] and plays episodes with either
//! a seeded random policy or a fixed action, logging a summary per episode.
//! The trade history of each episode can be exported as JSON (column layout)
//! or CSV (one row per step).

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rl::{run_episode, ConstantPolicy, Discrete, EpisodeSummary, Policy, RandomPolicy};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use trading::{
    LiquidationProceeds, RenderMode, ResetOptions, StockEnv, StockEnvConfig, TradeAction,
    TradeHistory,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Uniformly random actions, reproducible with `--seed`.
    Random,
    /// The action given by `--action` on every step.
    Constant,
}

/// Play trading episodes over a daily price table.
#[derive(Debug, Parser)]
#[command(name = "stockgym", version, about)]
pub struct RunArgs {
    /// CSV price table with an `Adj Close` column.
    #[arg(long)]
    pub prices: PathBuf,

    /// JSON file with environment settings; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Starting cash for every episode.
    #[arg(long)]
    pub cash: Option<f64>,

    /// Seed for the first episode; later episodes use consecutive seeds.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    pub policy: PolicyKind,

    /// Action index (0-6) for the constant policy.
    #[arg(long, default_value_t = 6)]
    pub action: i64,

    #[arg(long, default_value_t = 1)]
    pub episodes: usize,

    /// Truncate episodes after this many steps.
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Print the environment state after every step.
    #[arg(long)]
    pub render: bool,

    /// Pay out shares liquidated by an oversized sell order.
    #[arg(long)]
    pub credit_liquidation: bool,

    /// Write the trade history here (`.json` or `.csv`). With several
    /// episodes the episode number is appended to the file stem.
    #[arg(long)]
    pub history_out: Option<PathBuf>,
}

/// Runs the episodes requested on the command line.
///
/// # Errors
///
/// Returns any error from loading the configuration or price table, from
/// the environment itself, or from writing the history.
pub fn run(args: &RunArgs) -> Result<()> {
    run_episodes(args).map(|_| ())
}

/// Same as [`run`] but hands back the per-episode summaries.
///
/// # Errors
///
/// See [`run`].
pub fn run_episodes(args: &RunArgs) -> Result<Vec<EpisodeSummary>> {
    let config = load_config(args)?;
    let mut env = StockEnv::from_csv_path(&args.prices, config)
        .with_context(|| format!("Failed to load price table {}", args.prices.display()))?;
    tracing::info!(
        "Loaded {} trading days from {}",
        env.series().len(),
        args.prices.display()
    );

    let mut policy = build_policy(args)?;
    let mut summaries = Vec::with_capacity(args.episodes);

    for episode in 0..args.episodes {
        let seed = args.seed.map(|seed| seed.wrapping_add(episode as u64));
        let summary = run_episode(
            &mut env,
            policy.as_mut(),
            seed,
            ResetOptions::default(),
            args.max_steps,
        )
        .with_context(|| format!("Episode {episode} failed"))?;

        let final_value = env
            .state()
            .map_or(config.starting_cash, |state| state.total_value);
        tracing::info!(
            "Episode {}: {} steps, total reward {:.2}, final value {:.2}{}",
            episode,
            summary.steps,
            summary.total_reward,
            final_value,
            if summary.truncated { " (truncated)" } else { "" }
        );

        if let Some(path) = &args.history_out {
            let path = episode_path(path, episode, args.episodes);
            write_history(env.history(), &path)?;
            tracing::info!("Wrote {} history records to {}", env.history().len(), path.display());
        }
        summaries.push(summary);
    }

    Ok(summaries)
}

fn load_config(args: &RunArgs) -> Result<StockEnvConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => StockEnvConfig::default(),
    };

    if let Some(cash) = args.cash {
        config.starting_cash = cash;
    }
    if args.render {
        config.render_mode = Some(RenderMode::Human);
    }
    if args.credit_liquidation {
        config.liquidation = LiquidationProceeds::Credited;
    }
    Ok(config)
}

fn build_policy(args: &RunArgs) -> Result<Box<dyn Policy<[f32; 3], Discrete>>> {
    let policy: Box<dyn Policy<[f32; 3], Discrete>> = match args.policy {
        PolicyKind::Random => match args.seed {
            Some(seed) => Box::new(RandomPolicy::with_seed(seed)),
            None => Box::new(RandomPolicy::new()),
        },
        PolicyKind::Constant => {
            let Some(action) = TradeAction::from_index(args.action) else {
                bail!("--action must be between 0 and 6, got {}", args.action);
            };
            tracing::info!("Playing {} on every step", action);
            Box::new(ConstantPolicy(args.action))
        }
    };
    Ok(policy)
}

fn episode_path(path: &Path, episode: usize, episodes: usize) -> PathBuf {
    if episodes <= 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}-{episode}");
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

fn write_history(history: &TradeHistory, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        history
            .write_csv(writer)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        serde_json::to_writer_pretty(writer, &history.columns())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}
