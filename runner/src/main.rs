mod commands;
mod session;
mod sink;

use clap::{Parser, ValueEnum};
use tokio::sync::mpsc;

use common::config::{ConfigManager, FileContentConfigProvider, Validate};
use common::games::SessionRng;
use common::games::snake::{EdgeMode, SearchAlgorithm, SelfCollisionPolicy, SnakeGameState, SnakeSettings};
use common::{log, logger};
use session::{SessionOptions, run_session};
use sink::{LogSink, TerminalSink};

const DEFAULT_CONFIG_FILE: &str = "autosnake.yaml";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EdgeArg {
    Bounded,
    Wrapped,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CollisionArg {
    Strict,
    TailVacates,
    Lenient,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Bfs,
    Dfs,
}

#[derive(Parser)]
#[command(name = "autosnake", about = "Grid snake with a shortest-path autopilot")]
struct Args {
    /// YAML settings file; missing file means defaults
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
    #[arg(long)]
    grid_size: Option<usize>,
    #[arg(long, value_enum)]
    edge_mode: Option<EdgeArg>,
    #[arg(long, value_enum)]
    collision: Option<CollisionArg>,
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,
    /// Steer by hand (w/a/s/d on stdin) instead of the autopilot
    #[arg(long)]
    manual: bool,
    #[arg(long)]
    no_auto_reset: bool,
    #[arg(long)]
    tick_ms: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Draw the grid as text every tick
    #[arg(long)]
    render: bool,
    /// Do not read commands from stdin
    #[arg(long)]
    no_input: bool,
    #[arg(long)]
    verbose: bool,
    /// Save the effective settings back to the config file
    #[arg(long)]
    write_config: bool,
    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_to(&self, settings: &mut SnakeSettings) {
        if let Some(grid_size) = self.grid_size {
            settings.grid_size = grid_size;
        }
        if let Some(edge_mode) = self.edge_mode {
            settings.edge_mode = edge_arg_to_engine(edge_mode);
        }
        if let Some(collision) = self.collision {
            settings.self_collision_policy = collision_arg_to_engine(collision);
        }
        if let Some(algorithm) = self.algorithm {
            settings.search_algorithm = algorithm_arg_to_engine(algorithm);
        }
        if self.manual {
            settings.autopilot = false;
        }
        if self.no_auto_reset {
            settings.auto_reset = false;
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.verbose {
            settings.verbose = true;
        }
    }
}

fn edge_arg_to_engine(arg: EdgeArg) -> EdgeMode {
    match arg {
        EdgeArg::Bounded => EdgeMode::Bounded,
        EdgeArg::Wrapped => EdgeMode::Wrapped,
    }
}

fn collision_arg_to_engine(arg: CollisionArg) -> SelfCollisionPolicy {
    match arg {
        CollisionArg::Strict => SelfCollisionPolicy::Strict,
        CollisionArg::TailVacates => SelfCollisionPolicy::TailVacates,
        CollisionArg::Lenient => SelfCollisionPolicy::Lenient,
    }
}

fn algorithm_arg_to_engine(arg: AlgorithmArg) -> SearchAlgorithm {
    match arg {
        AlgorithmArg::Bfs => SearchAlgorithm::Bfs,
        AlgorithmArg::Dfs => SearchAlgorithm::Dfs,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Autosnake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager: ConfigManager<FileContentConfigProvider, SnakeSettings> =
        ConfigManager::from_yaml_file(&args.config);
    let mut settings = config_manager.get_config()?;
    args.apply_to(&mut settings);
    settings.validate()?;
    logger::set_verbose(settings.verbose);

    if args.write_config {
        config_manager.set_config(&settings)?;
        log!("Settings written to {}", args.config);
    }

    let rng = match settings.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let state = SnakeGameState::from_settings(&settings, rng);
    let options = SessionOptions::from_settings(&settings, args.max_ticks);

    log!(
        "Grid {}x{} {:?}, collision {:?}, search {:?}, tick {}ms",
        settings.grid_size,
        settings.grid_size,
        settings.edge_mode,
        settings.self_collision_policy,
        settings.search_algorithm,
        settings.tick_interval_ms
    );

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    if !args.no_input {
        commands::spawn_stdin_reader(command_tx);
    } else {
        drop(command_tx);
    }

    let summary = if args.render {
        run_session(state, options, TerminalSink, command_rx).await
    } else {
        run_session(state, options, LogSink, command_rx).await
    };

    log!(
        "Session over: {} ticks, {} games, score {}, high score {}, final state {:?}, seed {}",
        summary.ticks,
        summary.games,
        summary.score,
        summary.high_score,
        summary.final_status,
        summary.seed
    );

    Ok(())
}
