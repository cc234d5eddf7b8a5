//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick period only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::{Contact, overlapping, resolve_ball_collisions};
pub use entity::{Aabb, Entity, EntityId, EntityKind, Shape};
pub use state::{
    Ball, Brick, BrickHit, EntityView, GameEvent, GamePhase, GameState, Paddle, PowerUp,
};
pub use tick::{TickInput, tick};
