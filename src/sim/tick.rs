//! Fixed-period simulation tick
//!
//! Core game loop that advances the session by one step. Order inside
//! `Playing` matters: collisions use the ball's position from before this
//! tick's movement, and a power-up caught on the same tick the ball is lost
//! still applies.

use super::collision::resolve_ball_collisions;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left held (wins over right when both are held)
    pub move_left: bool,
    /// Right held
    pub move_right: bool,
    /// Launch the ball (space)
    pub launch: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Terminal: nothing moves and no further notifications
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += state.tuning.tick_period_ms;

    if state.ball.power_up_expired(state.time_ms) {
        log::debug!("Power-up expired at {} ms", state.time_ms);
        state.deactivate_power_up();
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::AwaitingLaunch => {
            apply_paddle_input(state, &input);
            if input.launch {
                state.launch();
            }
        }

        GamePhase::Playing => {
            resolve_ball_collisions(state);
            update_power_ups(state);

            if state.ball.bounds.y2 >= state.tuning.arena_height {
                state.lose_life();
            } else {
                state.ball.update(state.tuning.arena_width);
                apply_paddle_input(state, &input);
            }
        }

        GamePhase::LifeLost => {
            if state.time_ms >= state.respawn_at_ms {
                state.serve_ball();
            }
        }

        GamePhase::GameOver => {}
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

fn apply_paddle_input(state: &mut GameState, input: &TickInput) {
    let speed = state.paddle.speed;
    if input.move_left {
        state.move_paddle(-speed);
    } else if input.move_right {
        state.move_paddle(speed);
    }
}

/// Drop each power-up one step, collect those touching the paddle and cull
/// those that fell out of the arena
fn update_power_ups(state: &mut GameState) {
    let paddle = state.paddle.bounds;
    let floor = state.tuning.arena_height;
    let mut collected = 0usize;
    let mut removed = Vec::new();

    for power_up in state.power_ups.iter_mut() {
        power_up.update();
        if power_up.bounds.overlaps(&paddle) {
            collected += 1;
            removed.push(power_up.id);
        } else if power_up.bounds.y1 > floor {
            log::trace!("Power-up {:?} fell out of the arena", power_up.id);
            removed.push(power_up.id);
        }
    }

    if removed.is_empty() {
        return;
    }
    state.power_ups.retain(|p| !removed.contains(&p.id));
    for id in removed {
        state.emit(GameEvent::Removed { id });
    }
    for _ in 0..collected {
        state.activate_power_up();
        log::debug!("Power-up collected, ball empowered");
    }
}

/// Demo AI: serve immediately and keep the paddle under the ball
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    match state.phase {
        GamePhase::AwaitingLaunch => input.launch = true,
        GamePhase::Playing => {
            let target = state.ball.bounds.center().x;
            let paddle = state.paddle.bounds.center().x;
            let dead_zone = state.paddle.speed / 2.0;
            input.move_left = target < paddle - dead_zone;
            input.move_right = target > paddle + dead_zone;
        }
        _ => {}
    }
    input
}
