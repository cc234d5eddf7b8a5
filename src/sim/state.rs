//! Game state and core simulation types
//!
//! The session owns every entity. Nothing holds a reference to its parent:
//! bricks report drops as return values and the carried ball is implied by
//! the `AwaitingLaunch` phase.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Entity, EntityId, EntityKind};
use super::layout;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Coarse phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball rests on the paddle, waiting for a launch signal
    AwaitingLaunch,
    /// Tick loop active
    Playing,
    /// Ball left the arena; short pause before the next serve
    LifeLost,
    /// Run ended
    GameOver,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned {
        id: EntityId,
        kind: EntityKind,
        bounds: Aabb,
        fill: u32,
    },
    Removed {
        id: EntityId,
    },
    Recolored {
        id: EntityId,
        fill: u32,
    },
    LivesChanged {
        lives: i32,
    },
    /// Show the launch prompt
    AwaitingLaunch,
    /// Hide the launch prompt
    Launched,
    PowerUpActivated {
        expires_at_ms: u64,
    },
    PowerUpExpired,
    LifeLost {
        lives: i32,
    },
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    pub bounds: Aabb,
    /// Each component is exactly -1 or +1; only changed through `aim` and bounces
    direction: IVec2,
    /// `None` means frozen / out of play
    pub speed: Option<f32>,
    /// 1 = normal, 2 = empowered
    pub damage: i32,
    /// Session time (ms) at which the power-up wears off
    pub power_up_expires_at: Option<u64>,
}

impl Ball {
    pub fn new(id: EntityId, center: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            id,
            bounds: Aabb::centered(center, radius, radius),
            direction: IVec2::new(1, -1),
            speed: Some(speed),
            damage: NORMAL_DAMAGE,
            power_up_expires_at: None,
        }
    }

    pub fn direction(&self) -> IVec2 {
        self.direction
    }

    /// Point the ball by the signs of `x` and `y`. Zero counts as positive.
    pub fn aim(&mut self, x: i32, y: i32) {
        let sign = |v: i32| if v < 0 { -1 } else { 1 };
        self.direction = IVec2::new(sign(x), sign(y));
    }

    /// Reflect off the side and top walls, then advance one step.
    /// The bottom edge is open: leaving it is the session's concern.
    pub fn update(&mut self, arena_width: f32) {
        let Some(speed) = self.speed else {
            return;
        };
        if self.bounds.x1 <= 0.0 || self.bounds.x2 >= arena_width {
            self.direction.x = -self.direction.x;
        }
        if self.bounds.y1 <= 0.0 {
            self.direction.y = -self.direction.y;
        }
        self.bounds.translate(self.direction.as_vec2() * speed);
    }

    /// Pick a bounce for the given overlapping boxes.
    ///
    /// Several contacts at once are treated as a top/bottom hit. A single
    /// contact is a side hit when the ball center lies outside the entity's
    /// horizontal span, otherwise a top/bottom hit.
    pub fn collide(&mut self, overlapping: &[Aabb]) {
        let center_x = self.bounds.center().x;
        match overlapping {
            [] => {}
            [other] => {
                if center_x > other.x2 {
                    self.direction.x = 1;
                } else if center_x < other.x1 {
                    self.direction.x = -1;
                } else {
                    self.direction.y = -self.direction.y;
                }
            }
            _ => self.direction.y = -self.direction.y,
        }
    }

    /// Empower the ball until `now_ms + duration_ms`. A second pickup
    /// restarts the clock rather than extending it.
    pub fn activate_power_up(&mut self, now_ms: u64, duration_ms: u64) {
        self.damage = EMPOWERED_DAMAGE;
        self.power_up_expires_at = Some(now_ms + duration_ms);
    }

    pub fn deactivate_power_up(&mut self) {
        self.damage = NORMAL_DAMAGE;
        self.power_up_expires_at = None;
    }

    pub fn is_empowered(&self) -> bool {
        self.damage > NORMAL_DAMAGE
    }

    /// True once the power-up deadline has been reached
    pub fn power_up_expired(&self, now_ms: u64) -> bool {
        self.power_up_expires_at.is_some_and(|deadline| now_ms >= deadline)
    }
}

impl Entity for Ball {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Ball
    }
    fn bounds(&self) -> Aabb {
        self.bounds
    }
    fn translate(&mut self, delta: Vec2) {
        self.bounds.translate(delta);
    }
    fn fill(&self) -> u32 {
        if self.is_empowered() {
            BALL_EMPOWERED_COLOR
        } else {
            BALL_COLOR
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: EntityId,
    pub bounds: Aabb,
    /// Horizontal distance covered per tick of held input
    pub speed: f32,
}

impl Paddle {
    pub fn new(id: EntityId, center: Vec2, width: f32, height: f32, speed: f32) -> Self {
        Self {
            id,
            bounds: Aabb::centered(center, width / 2.0, height / 1.5),
            speed,
        }
    }

    /// Move horizontally. The whole move is rejected (no partial clamp) if
    /// either edge would leave `[0, arena_width]`. Returns whether it moved.
    pub fn shift(&mut self, offset: f32, arena_width: f32) -> bool {
        if self.bounds.x1 + offset >= 0.0 && self.bounds.x2 + offset <= arena_width {
            self.bounds.translate(Vec2::new(offset, 0.0));
            true
        } else {
            false
        }
    }
}

impl Entity for Paddle {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Paddle
    }
    fn bounds(&self) -> Aabb {
        self.bounds
    }
    fn translate(&mut self, delta: Vec2) {
        self.bounds.translate(delta);
    }
    fn fill(&self) -> u32 {
        PADDLE_COLOR
    }
}

/// Result of a ball striking a brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrickHit {
    /// Still standing, now showing a new tier
    Damaged { hits: i32, fill: u32 },
    /// Gone; `drop` is where a power-up should appear, if one was rolled
    Destroyed { drop: Option<Vec2> },
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    pub bounds: Aabb,
    /// Remaining hits; any value <= 0 means destroyed
    pub hits: i32,
}

impl Brick {
    pub fn new(id: EntityId, center: Vec2, width: f32, height: f32, hits: i32) -> Self {
        Self {
            id,
            bounds: Aabb::centered(center, width / 2.0, height / 2.0),
            hits,
        }
    }

    /// Tier color for a hit count (clamped into the three known tiers)
    pub fn tier_color(hits: i32) -> u32 {
        BRICK_TIER_COLORS[(hits.clamp(1, 3) - 1) as usize]
    }

    /// Apply damage. Overdamage is fine: the count may go negative.
    pub fn hit<R: Rng>(&mut self, damage: i32, rng: &mut R, drop_chance: f64) -> BrickHit {
        self.hits -= damage;
        if self.hits <= 0 {
            let drop = (rng.random::<f64>() < drop_chance).then(|| self.bounds.origin());
            BrickHit::Destroyed { drop }
        } else {
            BrickHit::Damaged {
                hits: self.hits,
                fill: Self::tier_color(self.hits),
            }
        }
    }
}

impl Entity for Brick {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Brick
    }
    fn bounds(&self) -> Aabb {
        self.bounds
    }
    fn translate(&mut self, delta: Vec2) {
        self.bounds.translate(delta);
    }
    fn fill(&self) -> u32 {
        Self::tier_color(self.hits)
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub bounds: Aabb,
    pub fall_speed: f32,
}

impl PowerUp {
    pub fn new(id: EntityId, center: Vec2, size: f32, fall_speed: f32) -> Self {
        Self {
            id,
            bounds: Aabb::centered(center, size / 2.0, size / 2.0),
            fall_speed,
        }
    }

    pub fn update(&mut self) {
        self.bounds.translate(Vec2::new(0.0, self.fall_speed));
    }
}

impl Entity for PowerUp {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::PowerUp
    }
    fn bounds(&self) -> Aabb {
        self.bounds
    }
    fn translate(&mut self, delta: Vec2) {
        self.bounds.translate(delta);
    }
    fn fill(&self) -> u32 {
        POWER_UP_COLOR
    }
}

/// Read-only view of one entity, for presentation sync
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub bounds: Aabb,
    pub fill: u32,
}

impl EntityView {
    fn of(entity: &impl Entity) -> Self {
        Self {
            id: entity.id(),
            kind: entity.kind(),
            bounds: entity.bounds(),
            fill: entity.fill(),
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters this session was built with
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Remaining lives; the game ends when this goes negative
    pub lives: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Session clock in milliseconds
    pub time_ms: u64,
    pub phase: GamePhase,
    /// Session time at which a `LifeLost` pause ends
    pub respawn_at_ms: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Active bricks (sorted by id)
    pub bricks: Vec<Brick>,
    /// Active power-ups (sorted by id)
    pub power_ups: Vec<PowerUp>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session with the classic tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let paddle = Paddle::new(
            EntityId(1),
            Vec2::new(tuning.arena_width / 2.0, tuning.paddle_y),
            tuning.paddle_width,
            tuning.paddle_height,
            tuning.paddle_speed,
        );
        let ball = Ball::new(EntityId(0), Vec2::ZERO, tuning.ball_radius, tuning.ball_speed);

        let mut state = Self {
            lives: tuning.starting_lives,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            time_ms: 0,
            phase: GamePhase::AwaitingLaunch,
            respawn_at_ms: 0,
            paddle,
            ball,
            bricks: Vec::new(),
            power_ups: Vec::new(),
            events: Vec::new(),
            next_id: 2,
        };
        state.emit_spawned(EntityView::of(&state.paddle));

        for (center, hits) in layout::brick_grid(&state.tuning) {
            let id = state.next_entity_id();
            let brick = Brick::new(
                id,
                center,
                state.tuning.brick_width,
                state.tuning.brick_height,
                hits,
            );
            state.emit_spawned(EntityView::of(&brick));
            state.bricks.push(brick);
        }

        state.serve_ball();
        log::info!(
            "New session (seed {}): {} bricks, {} lives",
            seed,
            state.bricks.len(),
            state.lives
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Queue a notification for the presentation layer
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn emit_spawned(&mut self, view: EntityView) {
        self.emit(GameEvent::Spawned {
            id: view.id,
            kind: view.kind,
            bounds: view.bounds,
            fill: view.fill,
        });
    }

    /// Events queued since the last drain, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place a fresh ball above the paddle center and wait for launch.
    /// Lives and bricks carry over.
    pub fn serve_ball(&mut self) {
        if self.ball.id != EntityId(0) {
            let old = self.ball.id;
            self.emit(GameEvent::Removed { id: old });
        }
        let id = self.next_entity_id();
        let center = Vec2::new(self.paddle.bounds.center().x, self.tuning.ball_spawn_y);
        self.ball = Ball::new(id, center, self.tuning.ball_radius, self.tuning.ball_speed);
        self.emit_spawned(EntityView::of(&self.ball));

        self.phase = GamePhase::AwaitingLaunch;
        self.emit(GameEvent::LivesChanged { lives: self.lives });
        self.emit(GameEvent::AwaitingLaunch);
    }

    /// Launch signal: release the carried ball. Ignored outside `AwaitingLaunch`.
    pub fn launch(&mut self) -> bool {
        if self.phase != GamePhase::AwaitingLaunch {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.emit(GameEvent::Launched);
        log::info!("Ball launched ({} lives)", self.lives);
        true
    }

    /// Move the paddle; a ball waiting for launch rides along
    pub fn move_paddle(&mut self, offset: f32) -> bool {
        let moved = self.paddle.shift(offset, self.tuning.arena_width);
        if moved && self.phase == GamePhase::AwaitingLaunch {
            self.ball.translate(Vec2::new(offset, 0.0));
        }
        moved
    }

    /// Strike a brick with the given damage, handling removal and drops
    pub fn hit_brick(&mut self, id: EntityId, damage: i32) -> Option<BrickHit> {
        let drop_chance = self.tuning.power_up_drop_chance;
        let idx = self.bricks.iter().position(|b| b.id == id)?;
        let outcome = self.bricks[idx].hit(damage, &mut self.rng, drop_chance);

        match outcome {
            BrickHit::Damaged { fill, hits } => {
                log::trace!("Brick {:?} down to {} hits", id, hits);
                self.emit(GameEvent::Recolored { id, fill });
            }
            BrickHit::Destroyed { drop } => {
                self.bricks.remove(idx);
                self.emit(GameEvent::Removed { id });
                log::debug!("Brick {:?} destroyed, {} left", id, self.bricks.len());
                if let Some(at) = drop {
                    self.spawn_power_up(at);
                }
            }
        }
        Some(outcome)
    }

    /// Drop a power-up centered on `at`
    pub fn spawn_power_up(&mut self, at: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let power_up = PowerUp::new(
            id,
            at,
            self.tuning.power_up_size,
            self.tuning.power_up_fall_speed,
        );
        self.emit_spawned(EntityView::of(&power_up));
        self.power_ups.push(power_up);
        log::debug!("Power-up {:?} dropped at ({}, {})", id, at.x, at.y);
        id
    }

    /// Empower the ball (restarting the timer if already active)
    pub fn activate_power_up(&mut self) {
        self.ball
            .activate_power_up(self.time_ms, self.tuning.power_up_duration_ms);
        let id = self.ball.id;
        self.emit(GameEvent::Recolored {
            id,
            fill: BALL_EMPOWERED_COLOR,
        });
        if let Some(expires_at_ms) = self.ball.power_up_expires_at {
            self.emit(GameEvent::PowerUpActivated { expires_at_ms });
        }
    }

    /// Revert the ball to normal damage
    pub fn deactivate_power_up(&mut self) {
        self.ball.deactivate_power_up();
        let id = self.ball.id;
        self.emit(GameEvent::Recolored {
            id,
            fill: BALL_COLOR,
        });
        self.emit(GameEvent::PowerUpExpired);
    }

    /// The ball left through the bottom edge
    pub fn lose_life(&mut self) {
        self.ball.speed = None;
        self.lives -= 1;
        self.emit(GameEvent::LifeLost { lives: self.lives });

        if self.lives < 0 {
            self.phase = GamePhase::GameOver;
            self.emit(GameEvent::GameOver);
            log::info!("Game over after {} ticks", self.time_ticks);
        } else {
            self.phase = GamePhase::LifeLost;
            self.respawn_at_ms = self.time_ms + self.tuning.respawn_delay_ms;
            log::info!("Life lost, {} remaining", self.lives);
        }
    }

    /// Every live entity, in draw order
    pub fn snapshot(&self) -> Vec<EntityView> {
        let mut views = Vec::with_capacity(2 + self.bricks.len() + self.power_ups.len());
        views.push(EntityView::of(&self.paddle));
        views.extend(self.bricks.iter().map(EntityView::of));
        views.extend(self.power_ups.iter().map(EntityView::of));
        views.push(EntityView::of(&self.ball));
        views
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bricks.sort_by_key(|b| b.id);
        self.power_ups.sort_by_key(|p| p.id);
    }
}
