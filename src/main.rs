//! Brick Breaker headless runner
//!
//! Plays a session in demo mode against an in-memory surface and logs what
//! happens. Usage: `brick-breaker [seed] [tuning.json]`

use std::process::ExitCode;

use brick_breaker::platform::{HeadlessSurface, InputState, Presenter, Ticker};
use brick_breaker::sim::{GamePhase, GameState, tick};
use brick_breaker::{Tuning, TuningError};

const DEFAULT_SEED: u64 = 0xB41C;

/// Simulated host frame length (60 Hz)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this many ticks if the autopilot never loses
const MAX_TICKS: u64 = 50_000;

/// A given path must load; only a missing argument means defaults
fn load_tuning(path: Option<&str>) -> Result<Tuning, TuningError> {
    match path {
        Some(path) => Tuning::from_file(path),
        None => Ok(Tuning::default()),
    }
}

fn parse_seed(arg: Option<&str>) -> Result<u64, std::num::ParseIntError> {
    arg.map_or(Ok(DEFAULT_SEED), str::parse)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match parse_seed(args.first().map(String::as_str)) {
        Ok(seed) => seed,
        Err(e) => {
            log::error!("Invalid seed {:?}: {}", args[0], e);
            eprintln!("usage: brick-breaker [seed] [tuning.json]");
            return ExitCode::FAILURE;
        }
    };

    let tuning = match load_tuning(args.get(1).map(String::as_str)) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut state = match GameState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let surface = HeadlessSurface::new(state.tuning.arena_width);
    let mut presenter = match Presenter::new(surface, &state) {
        Ok(presenter) => presenter,
        Err(e) => {
            log::error!("Presentation startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    presenter.present(&mut state);

    let mut input = InputState::default();
    input.idle_mode = true;
    let mut ticker = Ticker::new(state.tuning.tick_period_ms);
    let mut last_phase = state.phase;

    while !state.is_over() && state.time_ticks < MAX_TICKS {
        for _ in 0..ticker.advance(FRAME_MS) {
            tick(&mut state, &input.next_tick());
        }
        presenter.present(&mut state);

        if state.phase != last_phase {
            log::debug!("Phase {:?} -> {:?}", last_phase, state.phase);
            last_phase = state.phase;
        }
        if state.bricks.is_empty() && state.phase == GamePhase::Playing {
            log::info!("All bricks cleared");
            break;
        }
    }

    let surface = presenter.into_surface();
    println!(
        "seed {}: {} ticks ({} ms), lives {}, bricks left {}, phase {:?}, {} items on screen",
        state.seed,
        state.time_ticks,
        state.time_ms,
        state.lives,
        state.bricks.len(),
        state.phase,
        surface.len()
    );
    ExitCode::SUCCESS
}
