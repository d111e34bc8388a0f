mod analytics;
mod avatars;
mod console;
mod content;
mod core;
mod progression;
mod rewards;
mod storage;
mod tasks;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Life Physics: a to-do list with experience, levels, coins and avatars
#[derive(Parser, Debug)]
#[command(name = "life-physics")]
#[command(version)]
struct Cli {
    /// Directory holding gameplay_defaults.ron
    #[arg(long, default_value = "assets/data")]
    data_dir: PathBuf,

    /// Directory for per-user snapshots
    #[arg(long, default_value = ".life_physics")]
    store_dir: PathBuf,

    /// Identity the snapshot is keyed by
    #[arg(long, default_value = "local")]
    user: String,

    /// Seed for reward rolls (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log every transition, not just warnings
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> AppExit {
    build_app(Cli::parse())
        .set_runner(console::console_runner)
        .run()
}

/// Headless app: no window, renderer or input backends
fn build_app(cli: Cli) -> App {
    let level = if cli.verbose { Level::INFO } else { Level::WARN };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin {
            level,
            ..default()
        })
        .add_plugins((
            core::CorePlugin {
                session: core::SessionConfig::new(cli.user, cli.seed),
            },
            content::ContentPlugin {
                data_dir: cli.data_dir,
            },
            storage::StoragePlugin {
                store_dir: cli.store_dir,
            },
            rewards::RewardsPlugin,
            progression::ProgressionPlugin,
            tasks::TasksPlugin,
            avatars::AvatarsPlugin,
            console::ConsolePlugin,
        ));
    app
}
