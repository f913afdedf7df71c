//! Demo-mode driver
//!
//! Produces the input a simple player would give: keep the blade pointed at
//! the nearest enemy, wind up when it is in reach, burst through a
//! charging threat and go fetch ink when wounded. Pure function of the state,
//! so a headless run stays reproducible for a given seed.

use glam::Vec2;

use super::geometry::point_segment_distance;
use super::state::{CombatState, Entity, GameState, GameStatus};
use super::tick::InputState;

/// Distance under which a charging enemy is worth dodging
const THREAT_RANGE: f32 = 140.0;

/// Input for the next step
pub fn drive(state: &GameState) -> InputState {
    let mut input = InputState {
        pointer: state.player.pos,
        ..Default::default()
    };
    if state.status != GameStatus::Playing {
        return input;
    }

    let me = state.player.pos;
    let nearest = nearest_enemy(&state.enemies, me);

    // Wounded: walk to the closest pickup
    let wounded = state.player.hp < state.player.max_hp;
    let pickup = state
        .items
        .iter()
        .min_by(|a, b| a.pos.distance(me).total_cmp(&b.pos.distance(me)));
    if let Some(item) = pickup.filter(|_| wounded) {
        steer(&mut input, item.pos - me);
    }

    let Some(enemy) = nearest else {
        return input;
    };
    let dist = enemy.pos.distance(me);
    input.pointer = enemy.pos;

    let lane_end = crate::offset_along(enemy.pos, enemy.target_angle, state.tuning.slash_distance);
    let in_lane = point_segment_distance(me, enemy.pos, lane_end)
        < state.tuning.player_radius + state.tuning.enemy_slash_reach;
    let threatened = enemy.state == CombatState::Charging && (dist < THREAT_RANGE || in_lane);
    if threatened && state.player.dash_cooldown() <= 0.0 {
        // Burst straight through; the dash hits on the way
        steer(&mut input, enemy.pos - me);
        input.dash = true;
        return input;
    }

    input.primary = dist < state.tuning.slash_distance;
    input
}

fn nearest_enemy(enemies: &[Entity], from: Vec2) -> Option<&Entity> {
    enemies
        .iter()
        .min_by(|a, b| a.pos.distance(from).total_cmp(&b.pos.distance(from)))
}

fn steer(input: &mut InputState, toward: Vec2) {
    let dead_zone = 4.0;
    input.left = toward.x < -dead_zone;
    input.right = toward.x > dead_zone;
    input.up = toward.y < -dead_zone;
    input.down = toward.y > dead_zone;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyKind, Item, ItemKind, Viewport};
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(3, Viewport::new(1000.0, 1000.0), Tuning::default());
        state.start_game();
        state
    }

    #[test]
    fn test_idle_on_title() {
        let state = GameState::new(3, Viewport::new(800.0, 600.0), Tuning::default());
        let input = drive(&state);
        assert!(!input.primary && !input.dash);
        assert_eq!(input.move_axis(), Vec2::ZERO);
    }

    #[test]
    fn test_winds_up_on_nearby_enemy() {
        let mut state = playing();
        let id = state.next_entity_id();
        let pos = state.player.pos + Vec2::new(200.0, 0.0);
        state
            .enemies
            .push(Entity::enemy(id, pos, EnemyKind::Regular, &state.tuning));
        let input = drive(&state);
        assert!(input.primary);
        assert_eq!(input.pointer, pos);
    }

    #[test]
    fn test_dashes_through_charging_threat() {
        let mut state = playing();
        let id = state.next_entity_id();
        let pos = state.player.pos + Vec2::new(0.0, -100.0);
        let mut enemy = Entity::enemy(id, pos, EnemyKind::Elite, &state.tuning);
        enemy.enter(CombatState::Charging);
        state.enemies.push(enemy);
        let input = drive(&state);
        assert!(input.dash);
        assert!(input.up && !input.down);
    }

    #[test]
    fn test_wounded_player_seeks_ink() {
        let mut state = playing();
        state.player.hp = 1;
        let id = state.next_entity_id();
        state.items.push(Item {
            id,
            pos: state.player.pos + Vec2::new(-300.0, 0.0),
            kind: ItemKind::Health,
            pulse: 0.0,
        });
        let input = drive(&state);
        assert!(input.left && !input.right);
    }
}
