//! Shoal Run entry point
//!
//! Headless native runner: plays one autopilot run and prints the result.
//! Rendering and keyboard input live in a separate front end.
//!
//! Usage: `shoal-run [tuning.json] [easy|medium|hard]`

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use shoal_run::Tuning;
use shoal_run::sim::{GamePhase, GameState, TickInput, tick};
use shoal_run::tuning::Difficulty;

/// Stop a demo run after ten minutes of frames at 60 Hz
const MAX_TICKS: u64 = 36_000;

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    difficulty: &'static str,
    ticks: u64,
    game_over: bool,
    score: u32,
    coins_collected: u32,
    speed_multiplier: f32,
}

/// Split positional arguments into (tuning path, difficulty)
fn parse_args(args: &[String]) -> Result<(Option<&str>, Difficulty)> {
    let tuning_path = args.first().map(String::as_str);
    let difficulty = match args.get(1) {
        Some(arg) => {
            Difficulty::from_str(arg).ok_or_else(|| anyhow!("unknown difficulty '{arg}'"))?
        }
        None => Difficulty::Easy,
    };
    Ok((tuning_path, difficulty))
}

fn load_tuning(path: Option<&str>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {path}"))?;
    let tuning =
        Tuning::from_json(&json).with_context(|| format!("failed to parse tuning file {path}"))?;
    if !tuning.is_valid() {
        return Err(anyhow!("tuning file {path} has inconsistent bounds"));
    }
    log::info!("Loaded tuning from {path}");
    Ok(tuning)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Shoal Run (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (tuning_path, difficulty) = parse_args(&args)?;
    let tuning = load_tuning(tuning_path)?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_nanos() as u64;
    let mut state = GameState::with_tuning(seed, tuning);

    tick(
        &mut state,
        &TickInput {
            select_difficulty: Some(difficulty),
            ..Default::default()
        },
    );

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    while state.phase == GamePhase::Playing && state.session.elapsed_ticks < MAX_TICKS {
        tick(&mut state, &input);
    }

    let summary = RunSummary {
        seed,
        difficulty: difficulty.as_str(),
        ticks: state.session.elapsed_ticks,
        game_over: state.is_game_over(),
        score: state.session.score,
        coins_collected: state.session.coins_collected,
        speed_multiplier: state.session.speed_multiplier,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
