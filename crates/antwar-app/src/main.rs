//! `antwar` command-line host.
//!
//! `antwar run <scenario.ini>` plays a mission headless with the auto-player.
//! `antwar inspect <scenario.ini>` prints the decoded scenario and its map.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use antwar_app::config::load_config;
use antwar_app::{inspect, progress, runner, AppError};
use antwar_core::enums::{EngineState, House};
use antwar_sim::world_setup::build_map;
use antwar_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "antwar")]
#[command(about = "Headless host for the ant missions")]
struct Cli {
    /// Log level used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a scenario to the end with the auto-player.
    Run {
        scenario: PathBuf,

        /// Play the mission this many times, one seed apart.
        #[arg(long, default_value_t = 1)]
        missions: u32,

        /// Give up on a mission after this many ticks.
        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,

        #[arg(long)]
        turbo: Option<f32>,

        #[arg(long)]
        seed: Option<u64>,

        /// Play as this house instead of the scenario's player.
        #[arg(long)]
        house: Option<String>,

        /// JSON engine config; flags override its fields.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the missions-completed counter.
        #[arg(long, default_value = ".")]
        progress_dir: PathBuf,
    },
    /// Print a scenario summary and an ASCII map.
    Inspect { scenario: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match execute(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> Result<ExitCode, AppError> {
    match command {
        Command::Run {
            scenario,
            missions,
            max_ticks,
            turbo,
            seed,
            house,
            config,
            progress_dir,
        } => {
            let mut sim_config = match &config {
                Some(path) => load_config(path)?,
                None => SimConfig::default(),
            };
            if let Some(turbo) = turbo {
                sim_config.turbo = turbo;
            }
            if let Some(seed) = seed {
                sim_config.seed = seed;
            }
            if let Some(name) = house {
                match House::from_name(&name) {
                    Some(h) => sim_config.player_house = Some(h),
                    None => warn!(house = %name, "unknown house, keeping the scenario's player"),
                }
            }

            let mut wins = 0;
            for mission in 0..missions {
                let config = SimConfig {
                    seed: sim_config.seed.wrapping_add(u64::from(mission)),
                    ..sim_config
                };
                let outcome = runner::run_file(&scenario, config, max_ticks)?;
                info!(
                    mission = mission + 1,
                    state = ?outcome.state,
                    ticks = outcome.ticks,
                    kills = outcome.score.kills,
                    losses = outcome.score.losses,
                    "mission finished"
                );
                println!(
                    "mission {}: {:?} after {} ticks ({} kills, {} losses)",
                    mission + 1,
                    outcome.state,
                    outcome.ticks,
                    outcome.score.kills,
                    outcome.score.losses
                );
                if outcome.state == EngineState::Won {
                    wins += 1;
                    let total = progress::record_win(&progress_dir)?;
                    info!(total, "missions completed");
                }
            }
            println!("won {wins} of {missions}");
            Ok(if wins == missions {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Inspect { scenario } => {
            let data = antwar_scenario::load_scenario(&scenario)?;
            let map = build_map(&data);
            print!("{}", inspect::summary(&data));
            println!();
            print!("{}", inspect::render_terrain(&map, &data));
            Ok(ExitCode::SUCCESS)
        }
    }
}
