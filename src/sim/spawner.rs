//! Timed enemy and item spawning
//!
//! Three independent accumulators. Each fires on the step where it reaches its
//! interval and restarts from zero on that same step.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, Entity, GameEvent, GameState, Item, ItemKind, Viewport};
use crate::offset_along;

/// Accumulated time toward each spawn (ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy: f32,
    pub elite: f32,
    pub item: f32,
}

/// Which spawns fired this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnPlan {
    pub enemy: bool,
    pub elite: bool,
    pub item: bool,
}

impl SpawnTimers {
    /// Accumulate `dt` on every timer and report which ones fired
    pub fn advance(&mut self, dt: f32, enemy_every: f32, elite_every: f32, item_every: f32) -> SpawnPlan {
        SpawnPlan {
            enemy: accumulate(&mut self.enemy, dt, enemy_every),
            elite: accumulate(&mut self.elite, dt, elite_every),
            item: accumulate(&mut self.item, dt, item_every),
        }
    }
}

fn accumulate(timer: &mut f32, dt: f32, interval: f32) -> bool {
    *timer += dt;
    if *timer >= interval {
        *timer = 0.0;
        true
    } else {
        false
    }
}

/// Off-screen point at a random angle around `around`
pub fn enemy_spawn_point<R: Rng>(rng: &mut R, around: Vec2, viewport: Viewport, margin: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let dist = viewport.width.max(viewport.height) / 2.0 + margin;
    offset_along(around, angle, dist)
}

/// Uniform point inside the viewport inset by `margin`
pub fn item_spawn_point<R: Rng>(rng: &mut R, viewport: Viewport, margin: f32) -> Vec2 {
    let axis = |rng: &mut R, extent: f32| {
        let span = extent - margin * 2.0;
        if span > 0.0 {
            margin + rng.random_range(0.0..span)
        } else {
            extent / 2.0
        }
    };
    let x = axis(rng, viewport.width);
    let y = axis(rng, viewport.height);
    Vec2::new(x, y)
}

/// Create an enemy just beyond the visible area around the player
pub fn spawn_enemy(state: &mut GameState, kind: EnemyKind) -> u32 {
    let pos = enemy_spawn_point(
        &mut state.rng,
        state.player.pos,
        state.viewport,
        state.tuning.spawn_margin,
    );
    let id = state.next_entity_id();
    state.enemies.push(Entity::enemy(id, pos, kind, &state.tuning));
    log::debug!("Spawned {:?} enemy {} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    state.emit(GameEvent::EnemySpawned { id, kind });
    id
}

/// Drop a health pack somewhere on screen
pub fn spawn_health(state: &mut GameState) -> u32 {
    let pos = item_spawn_point(&mut state.rng, state.viewport, state.tuning.item_margin);
    let id = state.next_entity_id();
    state.items.push(Item {
        id,
        pos,
        kind: ItemKind::Health,
        pulse: 0.0,
    });
    log::debug!("Spawned health item {} at ({:.0}, {:.0})", id, pos.x, pos.y);
    state.emit(GameEvent::ItemSpawned { id });
    id
}

/// Advance spawn timers by `dt` and create whatever is due
pub fn run_spawner(state: &mut GameState, dt: f32) {
    let tuning = &state.tuning;
    let plan = state.spawn_timers.advance(
        dt,
        tuning.spawn_interval,
        tuning.elite_spawn_interval,
        tuning.item_spawn_interval,
    );
    if plan.enemy {
        spawn_enemy(state, EnemyKind::Regular);
    }
    if plan.elite {
        spawn_enemy(state, EnemyKind::Elite);
    }
    if plan.item {
        spawn_health(state);
    }
}
