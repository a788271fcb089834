//! Headless host for the Textworld simulation.
//!
//! Wires configuration, world assets, the decision runner and player input
//! around the tick loop, and prints what the player perceives.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `textworld-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing) to stderr
//! 3. Load location and character assets
//! 4. Build the forest, spawn the characters and the player
//! 5. Create the decision source (`llm.backend: none` runs without one)
//! 6. Run the game loop until the player quits or a need runs out

mod assets;
mod command;
mod error;
mod render;

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use textworld_core::config::LoggingConfig;
use textworld_core::{
    DecisionSource, PassSummary, Simulation, SimulationConfig, StubDecisionSource, TickError,
};
use textworld_runner::{LlmDecisionSource, RunnerConfig};
use textworld_types::ActorId;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP};
use crate::error::EngineError;

/// Config file used when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "textworld-config.yaml";

/// Backend name that runs the simulation without a decision runner.
const NO_BACKEND: &str = "none";

/// How the game loop ended.
#[derive(Debug)]
enum Outcome {
    /// The player typed `quit`.
    Quit,
    /// Standard input closed.
    InputClosed,
    /// An actor's need reached zero.
    NeedViolated {
        /// Name of the actor.
        actor_name: String,
        /// Name of the need.
        need: String,
    },
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, assets or world construction fail, or
/// if a tick fails for any reason other than a violated need.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
    let config = load_config(&config_path)
        .with_context(|| format!("failed to load configuration from {config_path}"))?;

    init_logging(&config.logging);
    info!(
        config_path = %config_path,
        world_name = config.world.name,
        width = config.world.width,
        height = config.world.height,
        seed = ?config.world.seed,
        backend = config.llm.backend,
        "textworld-engine starting"
    );

    let locations = assets::load_locations(&config.assets.locations)?;
    let characters = assets::load_characters(&config.assets.characters)?;
    let mut sim = Simulation::from_config(&config, locations, characters)
        .map_err(EngineError::from)
        .context("failed to build the world")?;

    let frame = Duration::from_millis(config.time.frame_interval_ms.max(1));
    let outcome = if config.llm.backend.eq_ignore_ascii_case(NO_BACKEND) {
        warn!("No decision backend configured, autonomous actors will stay idle");
        run_game(&mut sim, &mut StubDecisionSource::new(), frame).await?
    } else {
        let runner_config =
            RunnerConfig::from_llm_config(&config.llm).map_err(EngineError::from)?;
        let mut source = LlmDecisionSource::from_config(&runner_config)
            .map_err(EngineError::from)
            .context("failed to set up the decision runner")?;
        run_game(&mut sim, &mut source, frame).await?
    };

    if let Outcome::NeedViolated { actor_name, need } = &outcome {
        info!(actor_name = %actor_name, need = %need, "Need ran out");
    }
    info!(
        passes = sim.pass_count(),
        outcome = ?outcome,
        "textworld-engine shutdown complete"
    );
    Ok(())
}

/// Load the configuration file, falling back to defaults when it is absent.
fn load_config(path: &str) -> Result<SimulationConfig, EngineError> {
    let path = Path::new(path);
    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}

/// Install the tracing subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Drive the simulation from the frame clock and player input.
///
/// Input lines arrive over a channel from a reader task, so a command is
/// only ever applied between passes.
async fn run_game<S: DecisionSource>(
    sim: &mut Simulation,
    source: &mut S,
    frame: Duration,
) -> Result<Outcome, EngineError> {
    let (tx, mut rx) = mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let player = sim.player_id();
    let snapshot = sim.snapshot();
    if let Some(view) = &snapshot.player {
        println!("{}", render::render_look(view));
    }
    println!("Type 'help' for commands.");
    let mut cursor = player.map_or(0, |id| print_new_history(sim, id, 0));

    let mut interval = tokio::time::interval(frame);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Instant::now();
                let delta = now.duration_since(last_frame).as_secs_f64();
                last_frame = now;

                let (result, typed, input_closed) =
                    tick_draining_input(sim, source, delta, &mut rx).await;
                if let Err(e) = result {
                    if let Some((_, actor_name, need)) = e.need_violation() {
                        println!("{actor_name} has run out of {need}. The game is over.");
                        return Ok(Outcome::NeedViolated {
                            actor_name: actor_name.to_owned(),
                            need: need.to_owned(),
                        });
                    }
                    return Err(e.into());
                }
                if let Some(id) = player {
                    cursor = print_new_history(sim, id, cursor);
                }
                for line in typed {
                    if handle_line(sim, player, &line)? {
                        return Ok(Outcome::Quit);
                    }
                }
                if input_closed {
                    return Ok(Outcome::InputClosed);
                }
            }
            line = rx.recv() => {
                let Some(line) = line else {
                    return Ok(Outcome::InputClosed);
                };
                if handle_line(sim, player, &line)? {
                    return Ok(Outcome::Quit);
                }
            }
        }
    }
}

/// Run one tick while collecting whatever the player types meanwhile.
///
/// Returns the tick result, the lines read and whether input closed.
async fn tick_draining_input<S: DecisionSource>(
    sim: &mut Simulation,
    source: &mut S,
    delta: f64,
    rx: &mut mpsc::Receiver<String>,
) -> (Result<Vec<PassSummary>, TickError>, Vec<String>, bool) {
    let mut typed = Vec::new();
    let mut input_closed = false;
    let tick = sim.tick(delta, source);
    tokio::pin!(tick);
    let result = loop {
        tokio::select! {
            result = &mut tick => break result,
            line = rx.recv(), if !input_closed => match line {
                Some(line) => typed.push(line),
                None => input_closed = true,
            },
        }
    };
    (result, typed, input_closed)
}

/// Apply one line of player input. Returns `true` when the player quits.
fn handle_line(
    sim: &mut Simulation,
    player: Option<ActorId>,
    line: &str,
) -> Result<bool, EngineError> {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(e) => {
            println!("{e}");
            return Ok(false);
        }
    };

    match command {
        Command::Quit => return Ok(true),
        Command::Help => println!("{HELP}"),
        Command::Map => print!("{}", render::render_map(&sim.snapshot())),
        Command::Look => {
            if let Some(view) = sim.snapshot().player {
                print!("{}", render::render_look(&view));
            }
        }
        Command::Status => {
            if let Some(view) = sim.snapshot().player {
                print!("{}", render::render_status(&view));
            }
        }
        Command::Move(_) | Command::Say(_) => {
            if let (Some(id), Some(intent)) = (player, command.into_intent()) {
                sim.queue_intent(id, intent)?;
            }
        }
    }
    Ok(false)
}

/// Print the player's history entries added since `cursor`, returning the
/// new cursor.
fn print_new_history(sim: &Simulation, player: ActorId, cursor: usize) -> usize {
    let Some(actor) = sim.actor(player) else {
        return cursor;
    };
    let history = actor.history();
    for entry in history.since(cursor) {
        println!("{entry}");
    }
    history.len()
}
