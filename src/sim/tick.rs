//! Per-frame simulation step
//!
//! One call per display refresh. The elapsed time is measured against the
//! previous call and clamped, deferred transitions that came due are applied,
//! then every timer and state machine advances by the clamped delta.

use glam::Vec2;

use super::combat::{StrikeKind, apply_deferred, enemy_strike, player_strike};
use super::effects::{advance_particles, ink_splash};
use super::spawner::run_spawner;
use super::state::{CombatState, GameEvent, GameState, GameStatus};
use crate::consts::MAX_FRAME_DELTA_MS;
use crate::{angle_to, offset_along, palette};

/// Host input sampled for one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Burst key
    pub dash: bool,
    /// Primary pointer button held
    pub primary: bool,
    /// Pointer in world coordinates
    pub pointer: Vec2,
}

impl InputState {
    /// Raw sum of held direction keys (not normalized)
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }
}

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Elapsed ms since the previous call, clamped to `[0, MAX_FRAME_DELTA_MS]`.
    /// The first call only records the timestamp.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

/// Advance the world to `now_ms`
pub fn tick(state: &mut GameState, input: &InputState, now_ms: f64) {
    let input = *input;
    let dt = state.clock.advance(now_ms);
    state.time_ms = now_ms;
    state.events.clear();

    while let Some(command) = state.pending.pop_due(now_ms) {
        apply_deferred(state, command);
    }

    // Weather never stops
    state.ambient.advance(&mut state.rng, state.viewport, now_ms);

    if state.status != GameStatus::Playing {
        return;
    }

    state.flash_opacity = (state.flash_opacity - state.tuning.flash_decay * dt).clamp(0.0, 1.0);
    state.player.tick_cooldowns(dt);

    update_player(state, &input, dt, now_ms);
    run_spawner(state, dt);
    update_items(state, dt);
    update_enemies(state, dt, now_ms);

    let drag = state.tuning.particle_drag;
    advance_particles(&mut state.particles, drag);
}

fn update_player(state: &mut GameState, input: &InputState, dt: f32, now_ms: f64) {
    let axis = input.move_axis();

    // Dash
    let dash_ready = state.player.dash_cooldown() <= 0.0;
    if input.dash && dash_ready && state.player.state != CombatState::Slashing {
        let angle = if axis != Vec2::ZERO {
            axis.y.atan2(axis.x)
        } else {
            state.player.target_angle
        };
        player_strike(state, angle, StrikeKind::Dash, now_ms);
    }

    // Walking (diagonals are not faster)
    let player = &mut state.player;
    if !matches!(player.state, CombatState::Charging | CombatState::Slashing) && axis != Vec2::ZERO {
        player.pos += axis.normalize() * state.tuning.player_speed * dt;
    }

    // Aim follows the pointer
    player.target_angle = angle_to(player.pos, input.pointer);

    if input.primary
        && matches!(player.state, CombatState::Idle | CombatState::Cooldown)
        && player.cooldown() <= 0.0
    {
        player.enter(CombatState::Charging);
    }

    if player.state == CombatState::Charging {
        if !input.primary {
            // Released early: no strike
            player.enter(CombatState::Idle);
        } else {
            player.charge_time += dt;
            if player.charge_time >= player.charge_threshold(&state.tuning) {
                let angle = player.target_angle;
                player_strike(state, angle, StrikeKind::Slash, now_ms);
            }
        }
    }
}

fn update_items(state: &mut GameState, dt: f32) {
    let pickup_range = state.tuning.player_radius + state.tuning.item_radius;
    let pulse = state.tuning.item_pulse_rate * dt;
    let player_pos = state.player.pos;

    let mut touched = Vec::new();
    for item in &mut state.items {
        item.pulse += pulse;
        if item.pos.distance(player_pos) < pickup_range {
            touched.push((item.id, item.pos));
        }
    }

    for (id, pos) in touched {
        state.items.retain(|i| i.id != id);
        let healed = state.player.heal(1);
        if healed {
            let count = state.tuning.heal_particles;
            state
                .particles
                .extend(ink_splash(&mut state.rng, pos, palette::HEALTH, count));
        }
        state.emit(GameEvent::ItemCollected { id, healed });
    }
}

fn update_enemies(state: &mut GameState, dt: f32, now_ms: f64) {
    let player_pos = state.player.pos;

    for index in 0..state.enemies.len() {
        let tuning = &state.tuning;
        let enemy = &mut state.enemies[index];
        match enemy.state {
            CombatState::Idle => {
                let dist = enemy.pos.distance(player_pos);
                let angle = angle_to(enemy.pos, player_pos);
                let (speed, aggro) = if enemy.is_elite() {
                    (tuning.elite_speed, tuning.elite_aggro_factor)
                } else {
                    (tuning.enemy_speed, tuning.enemy_aggro_factor)
                };
                enemy.pos = offset_along(enemy.pos, angle, speed * dt);
                if dist < tuning.slash_distance * aggro {
                    enemy.enter(CombatState::Charging);
                    enemy.target_angle = angle;
                }
            }
            CombatState::Charging => {
                enemy.charge_time += dt;
                if enemy.charge_time >= enemy.charge_threshold(tuning) {
                    enemy_strike(state, index, now_ms);
                }
            }
            CombatState::Slashing | CombatState::Cooldown => {}
        }
    }
}
