//! Collision detection and response
//!
//! Each tick the ball's box is tested against every solid entity (paddle and
//! bricks). The ball picks one bounce for the whole contact set, then every
//! brick in the set takes a hit at the ball's current damage.

use super::entity::{Aabb, EntityId, EntityKind};
use super::state::{BrickHit, GameState};

/// One entity overlapping the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: EntityId,
    pub kind: EntityKind,
    pub bounds: Aabb,
}

/// Solid entities whose boxes overlap `ball`, in id order
pub fn overlapping(state: &GameState, ball: &Aabb) -> Vec<Contact> {
    let mut contacts: Vec<Contact> = state
        .snapshot()
        .into_iter()
        .filter(|view| view.kind.is_solid() && view.bounds.overlaps(ball))
        .map(|view| Contact {
            id: view.id,
            kind: view.kind,
            bounds: view.bounds,
        })
        .collect();
    contacts.sort_by_key(|c| c.id);
    contacts
}

/// Resolve the ball against everything it currently overlaps.
///
/// Uses the ball's position before this tick's movement. Returns the
/// contacts that were found.
pub fn resolve_ball_collisions(state: &mut GameState) -> Vec<Contact> {
    let contacts = overlapping(state, &state.ball.bounds);
    if contacts.is_empty() {
        return contacts;
    }

    let boxes: Vec<Aabb> = contacts.iter().map(|c| c.bounds).collect();
    state.ball.collide(&boxes);

    let damage = state.ball.damage;
    for contact in contacts.iter().filter(|c| c.kind == EntityKind::Brick) {
        if let Some(BrickHit::Destroyed { drop: Some(_) }) = state.hit_brick(contact.id, damage) {
            log::debug!("Brick {:?} dropped a power-up", contact.id);
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Brick;
    use glam::{IVec2, Vec2};

    fn state_without_bricks() -> GameState {
        let mut state = GameState::new(11);
        state.bricks.clear();
        state.drain_events();
        state
    }

    fn place_ball(state: &mut GameState, center: Vec2, direction: IVec2) {
        state.ball.bounds = Aabb::centered(center, 5.0, 5.0);
        state.ball.aim(direction.x, direction.y);
    }

    #[test]
    fn test_no_contacts_is_noop() {
        let mut state = state_without_bricks();
        place_ball(&mut state, Vec2::new(300.0, 200.0), IVec2::new(1, -1));
        assert!(resolve_ball_collisions(&mut state).is_empty());
        assert_eq!(state.ball.direction(), IVec2::new(1, -1));
    }

    #[test]
    fn test_paddle_top_bounce() {
        let mut state = state_without_bricks();
        // Paddle top edge is at 326 - 10/1.5
        let top = state.paddle.bounds.y1;
        let cx = state.paddle.bounds.center().x;
        place_ball(&mut state, Vec2::new(cx, top - 4.0), IVec2::new(1, 1));

        let contacts = resolve_ball_collisions(&mut state);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].kind, EntityKind::Paddle);
        assert_eq!(state.ball.direction(), IVec2::new(1, -1));
    }

    #[test]
    fn test_power_ups_do_not_deflect() {
        let mut state = state_without_bricks();
        state.spawn_power_up(Vec2::new(300.0, 200.0));
        place_ball(&mut state, Vec2::new(300.0, 200.0), IVec2::new(1, -1));
        assert!(resolve_ball_collisions(&mut state).is_empty());
        assert_eq!(state.ball.direction(), IVec2::new(1, -1));
    }

    #[test]
    fn test_wedged_between_bricks_hits_both() {
        let mut state = state_without_bricks();
        let left = state.next_entity_id();
        let right = state.next_entity_id();
        state
            .bricks
            .push(Brick::new(left, Vec2::new(262.5, 100.0), 75.0, 20.0, 2));
        state
            .bricks
            .push(Brick::new(right, Vec2::new(337.5, 100.0), 75.0, 20.0, 2));
        place_ball(&mut state, Vec2::new(300.0, 112.0), IVec2::new(-1, -1));

        let contacts = resolve_ball_collisions(&mut state);
        assert_eq!(contacts.len(), 2);
        assert_eq!(state.ball.direction(), IVec2::new(-1, 1));
        assert!(state.bricks.iter().all(|b| b.hits == 1));
    }

    #[test]
    fn test_empowered_ball_destroys_three_hit_brick_in_two() {
        let mut state = state_without_bricks();
        state.tuning.power_up_drop_chance = 0.0;
        let id = state.next_entity_id();
        state
            .bricks
            .push(Brick::new(id, Vec2::new(300.0, 100.0), 75.0, 20.0, 3));
        state.activate_power_up();

        place_ball(&mut state, Vec2::new(300.0, 114.0), IVec2::new(1, -1));
        resolve_ball_collisions(&mut state);
        assert_eq!(state.bricks[0].hits, 1);

        place_ball(&mut state, Vec2::new(300.0, 114.0), IVec2::new(1, -1));
        resolve_ball_collisions(&mut state);
        assert!(state.bricks.is_empty());
        assert!(state.power_ups.is_empty());
    }
}
