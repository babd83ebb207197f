//! Headless monster simulation.
//!
//! Loads content (a data directory or the built-in river room), runs one room
//! for a number of ticks and prints a summary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use game_content::{
    ContentFactory, MonsterCatalog, RoomLayout, builtin_config, builtin_monsters, builtin_room,
};
use game_core::GameConfig;
use runtime::{RunSummary, RuntimeConfig, Simulation};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Run a monster room without rendering
#[derive(Parser)]
#[command(name = "monster-sim")]
#[command(about = "Headless monster behavior simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory with config.toml, monsters.ron and rooms/
    /// (defaults to the built-in content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Room to load from the content directory
    #[arg(short, long, default_value = "river")]
    room: String,

    /// Session seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Log progress every N ticks
    #[arg(long, value_name = "N")]
    summary_interval: Option<u64>,

    /// Respawn soft-killed monsters after N ticks
    #[arg(long, value_name = "N")]
    respawn_delay: Option<u32>,

    /// Also write logs to monster-sim.log in this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// JSON run summary
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_dir.as_deref())?;

    let (game_config, catalog, layout) = load_content(cli.data_dir.as_deref(), &cli.room)?;

    let mut simulation = Simulation::builder()
        .config(RuntimeConfig {
            seed: cli.seed,
            ticks: cli.ticks,
            summary_interval: cli.summary_interval,
            respawn_delay: cli.respawn_delay,
        })
        .game_config(game_config)
        .catalog(catalog)
        .layout(layout)
        .build()?;

    let summary = simulation.run();
    match cli.format {
        OutputFormat::Summary => print_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn load_content(
    data_dir: Option<&Path>,
    room: &str,
) -> Result<(GameConfig, MonsterCatalog, RoomLayout)> {
    match data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let config = factory.load_config()?;
            let catalog = factory.load_monsters()?;
            let layout = factory
                .load_room(room, &catalog)
                .with_context(|| format!("loading room '{room}'"))?;
            tracing::info!(data_dir = %dir.display(), templates = catalog.len(), "content loaded");
            Ok((config, catalog, layout))
        }
        None => {
            let catalog = builtin_monsters()?;
            let layout = builtin_room(&catalog)?;
            tracing::info!(templates = catalog.len(), "built-in content loaded");
            Ok((builtin_config()?, catalog, layout))
        }
    }
}

/// Installs the stderr layer and, with `log_dir`, a file layer.
///
/// The returned guard flushes the file writer when dropped.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, "monster-sim.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/monster-sim.log", dir.display());
    }
    Ok(guard)
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.stats;
    println!("room            {}", summary.room);
    println!("seed            {}", summary.seed);
    println!("ticks           {}", summary.ticks);
    println!("monsters alive  {}", summary.monsters_alive);
    println!(
        "monsters        {} spawned, {} killed, {} soft-killed, {} respawned",
        stats.monsters_spawned,
        stats.monsters_killed,
        stats.monsters_soft_killed,
        stats.monsters_respawned
    );
    println!(
        "projectiles     {} fired, {} removed",
        stats.projectiles_fired, stats.projectiles_removed
    );
    println!("interactions    {}", stats.interactions);
    println!("player damage   {}", summary.player_damage_taken);
    if !summary.cues.is_empty() {
        println!("cues");
        for (label, count) in &summary.cues {
            println!("  {label:<22}{count}");
        }
    }
}
