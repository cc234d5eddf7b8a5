//! Brick Breaker - a paddle-and-ball brick breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `platform`: Boundary to the presentation layer (surface, input, ticks)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Maximum ticks run per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ball damage levels
    pub const NORMAL_DAMAGE: i32 = 1;
    pub const EMPOWERED_DAMAGE: i32 = 2;

    /// Palette (0xRRGGBB)
    pub const BALL_COLOR: u32 = 0xFFFFFF;
    pub const BALL_EMPOWERED_COLOR: u32 = 0xFF0000;
    pub const PADDLE_COLOR: u32 = 0xFFB643;
    pub const POWER_UP_COLOR: u32 = 0xFFFF00;
    /// Brick colors for 1, 2 and 3 hits remaining
    pub const BRICK_TIER_COLORS: [u32; 3] = [0x4535AA, 0xED639E, 0x8FE1A2];
}
