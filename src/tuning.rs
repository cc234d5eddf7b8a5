//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a presentation layer
//! (or a test) can override it from JSON. Missing fields fall back to the
//! classic values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of bricks in the starting layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickRow {
    /// Vertical center of the row
    pub y: f32,
    /// Starting hits for every brick in the row (1..=3)
    pub hits: i32,
}

/// Tuning parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Timing ===
    /// Fixed tick period in milliseconds
    pub tick_period_ms: u64,
    /// Pause between losing a life and serving the next ball
    pub respawn_delay_ms: u64,
    /// How long a collected power-up keeps the ball empowered
    pub power_up_duration_ms: u64,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    /// Vertical center of a freshly served ball
    pub ball_spawn_y: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_y: f32,
    pub paddle_speed: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    /// Horizontal inset of the first column and the right-side stop
    pub brick_margin: f32,
    pub brick_rows: Vec<BrickRow>,

    // === Power-ups ===
    pub power_up_size: f32,
    pub power_up_fall_speed: f32,
    /// Probability (0..=1) that a destroyed brick drops a power-up
    pub power_up_drop_chance: f64,

    // === Session ===
    pub starting_lives: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 610.0,
            arena_height: 400.0,

            tick_period_ms: 50,
            respawn_delay_ms: 1000,
            power_up_duration_ms: 8000,

            ball_radius: 5.0,
            ball_speed: 10.0,
            ball_spawn_y: 310.0,

            paddle_width: 80.0,
            paddle_height: 10.0,
            paddle_y: 326.0,
            paddle_speed: 20.0,

            brick_width: 75.0,
            brick_height: 20.0,
            brick_margin: 5.0,
            brick_rows: vec![
                BrickRow { y: 50.0, hits: 3 },
                BrickRow { y: 70.0, hits: 2 },
                BrickRow { y: 90.0, hits: 1 },
            ],

            power_up_size: 20.0,
            power_up_fall_speed: 5.0,
            power_up_drop_chance: 0.25,

            starting_lives: 3,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("power_up_drop_chance must be within 0..=1, got {0}")]
    DropChance(f64),

    #[error("brick row at y={y} has {hits} hits, expected 1..=3")]
    BrickHits { y: f32, hits: i32 },

    #[error("starting_lives must not be negative, got {0}")]
    Lives(i32),
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: arena {}x{}, {} brick rows",
            tuning.arena_width,
            tuning.arena_height,
            tuning.brick_rows.len()
        );
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let sizes = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("power_up_size", self.power_up_size),
            ("power_up_fall_speed", self.power_up_fall_speed),
        ];
        for (field, value) in sizes {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.tick_period_ms == 0 {
            return Err(TuningError::NotPositive {
                field: "tick_period_ms",
                value: 0.0,
            });
        }
        if !(0.0..=1.0).contains(&self.power_up_drop_chance) {
            return Err(TuningError::DropChance(self.power_up_drop_chance));
        }
        if let Some(row) = self.brick_rows.iter().find(|r| !(1..=3).contains(&r.hits)) {
            return Err(TuningError::BrickHits {
                y: row.y,
                hits: row.hits,
            });
        }
        if self.starting_lives < 0 {
            return Err(TuningError::Lives(self.starting_lives));
        }
        Ok(())
    }

    /// Number of ticks covered by a duration, rounded up
    pub fn ticks_for(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_period_ms)
    }
}
