//! End-to-end session scenarios driven through the public API

use brick_breaker::Tuning;
use brick_breaker::platform::{HeadlessSurface, InputEvent, InputState, Presenter};
use brick_breaker::sim::{Aabb, EntityKind, GameEvent, GamePhase, GameState, TickInput, tick};
use glam::{IVec2, Vec2};

fn launch() -> TickInput {
    TickInput {
        launch: true,
        ..Default::default()
    }
}

/// Put the ball one step from the bottom edge, away from everything solid
fn drop_ball(state: &mut GameState) {
    state.ball.bounds = Aabb::centered(Vec2::new(20.0, 396.0), 5.0, 5.0);
    state.ball.aim(1, 1);
}

#[test]
fn four_lost_balls_end_the_game_exactly_once() {
    let mut state = GameState::new(2024);
    let mut events = state.drain_events();
    let mut lives_seen = Vec::new();

    for _ in 0..4 {
        assert_eq!(state.phase, GamePhase::AwaitingLaunch);
        tick(&mut state, &launch());
        assert_eq!(state.phase, GamePhase::Playing);

        drop_ball(&mut state);
        tick(&mut state, &TickInput::default());
        lives_seen.push(state.lives);

        // Wait out the respawn pause
        let mut guard = 0;
        while state.phase == GamePhase::LifeLost {
            tick(&mut state, &TickInput::default());
            guard += 1;
            assert!(guard <= 100, "respawn never happened");
        }
        events.extend(state.drain_events());
    }

    assert_eq!(lives_seen, vec![2, 1, 0, -1]);
    assert_eq!(state.phase, GamePhase::GameOver);

    // Terminal: more ticks change nothing and say nothing
    for _ in 0..50 {
        tick(&mut state, &launch());
    }
    events.extend(state.drain_events());

    let game_overs = events.iter().filter(|e| **e == GameEvent::GameOver).count();
    assert_eq!(game_overs, 1);
    let life_losses = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
        .count();
    assert_eq!(life_losses, 4);
    assert_eq!(state.bricks.len(), 24);
}

#[test]
fn forced_drop_spawns_one_power_up_at_brick_corner() {
    let tuning = Tuning {
        power_up_drop_chance: 1.0,
        ..Tuning::default()
    };
    let mut state = GameState::with_tuning(9, tuning).expect("valid tuning");
    tick(&mut state, &launch());
    state.drain_events();

    // Bottom-row brick of the first column: one hit left
    let brick = state
        .bricks
        .iter()
        .find(|b| b.hits == 1 && b.bounds.x1 == 5.0)
        .cloned()
        .expect("first-column one-hit brick");
    state.ball.bounds = Aabb::centered(
        Vec2::new(brick.bounds.center().x, brick.bounds.y2 + 4.0),
        5.0,
        5.0,
    );
    state.ball.aim(1, -1);

    tick(&mut state, &TickInput::default());

    assert!(state.bricks.iter().all(|b| b.id != brick.id));
    assert_eq!(state.power_ups.len(), 1);
    assert_eq!(state.ball.direction(), IVec2::new(1, 1));

    let spawned: Vec<Aabb> = state
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::Spawned {
                kind: EntityKind::PowerUp,
                bounds,
                ..
            } => Some(bounds),
            _ => None,
        })
        .collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].center(), brick.bounds.origin());
    // It has already fallen one step this tick
    assert_eq!(
        state.power_ups[0].bounds.center(),
        brick.bounds.origin() + Vec2::new(0.0, 5.0)
    );
}

#[test]
fn keyboard_session_through_presenter() {
    let mut state = GameState::new(77);
    let mut presenter =
        Presenter::new(HeadlessSurface::new(610.0), &state).expect("surface fits");
    presenter.present(&mut state);

    let mut input = InputState::default();
    input.apply(InputEvent::MoveLeftStart);
    let paddle_x = state.paddle.bounds.x1;
    let ball_x = state.ball.bounds.x1;
    tick(&mut state, &input.next_tick());

    // Carried ball rides along before launch
    assert_eq!(state.paddle.bounds.x1, paddle_x - 20.0);
    assert_eq!(state.ball.bounds.x1, ball_x - 20.0);

    input.apply(InputEvent::MoveLeftStop);
    input.apply(InputEvent::Launch);
    tick(&mut state, &input.next_tick());
    assert_eq!(state.phase, GamePhase::Playing);
    presenter.present(&mut state);
    assert_eq!(presenter.surface().texts(), vec!["Lives: 3"]);
}
