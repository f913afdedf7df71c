//! Strike resolution
//!
//! Slashes and dashes are instantaneous: the attacker picks a destination
//! `slash_distance` away, everything the swept segment touches is hit once,
//! and the attacker reappears at the destination.

use glam::Vec2;

use super::effects::{ink_splash, stain_cluster};
use super::geometry::{swept_hit, sweep_targets};
use super::schedule::Deferred;
use super::state::{CombatState, GameEvent, GameState, GameStatus, default_attack_count};
use crate::{offset_along, palette};

/// How the player's strike was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeKind {
    /// Charged slash toward the pointer
    Slash,
    /// Uncharged burst on its own cooldown
    Dash,
}

/// Start and end of a strike
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikePath {
    pub from: Vec2,
    pub to: Vec2,
}

impl StrikePath {
    pub fn new(from: Vec2, angle: f32, distance: f32) -> Self {
        Self {
            from,
            to: offset_along(from, angle, distance),
        }
    }
}

/// Resolve a player strike along `angle`. Returns the ids of enemies hit.
pub fn player_strike(state: &mut GameState, angle: f32, kind: StrikeKind, now_ms: f64) -> Vec<u32> {
    let tuning = &state.tuning;
    let path = StrikePath::new(state.player.pos, angle, tuning.slash_distance);
    let (reach, hit_particles, trail_particles) = match kind {
        StrikeKind::Slash => (
            tuning.player_slash_reach,
            tuning.slash_hit_particles,
            tuning.slash_trail_particles,
        ),
        StrikeKind::Dash => (
            tuning.dash_reach,
            tuning.dash_hit_particles,
            tuning.dash_trail_particles,
        ),
    };

    let hits = sweep_targets(
        path.from,
        path.to,
        state
            .enemies
            .iter()
            .map(|en| (en.id, en.pos, en.radius(tuning) + reach)),
    );

    for &id in &hits {
        let Some(index) = state.enemies.iter().position(|e| e.id == id) else {
            continue;
        };
        let enemy = &mut state.enemies[index];
        let fatal = enemy.take_damage(1);
        let at = enemy.pos;
        state
            .particles
            .extend(ink_splash(&mut state.rng, at, palette::BLOOD, hit_particles));
        state
            .stains
            .extend(stain_cluster(&mut state.rng, at, palette::BLOOD));
        state.events.push(GameEvent::EnemyHit { id });

        if fatal {
            let slain = state.enemies.remove(index);
            let score_value = slain.score_value();
            state.score += score_value;
            if let Some(enemy_kind) = slain.enemy_kind() {
                log::debug!("Enemy {} slain (+{})", id, score_value);
                state.events.push(GameEvent::EnemySlain {
                    id,
                    kind: enemy_kind,
                    score_value,
                });
            }
        }
    }

    state.player.pos = path.to;
    state.particles.extend(ink_splash(
        &mut state.rng,
        path.to,
        palette::PLAYER,
        trail_particles,
    ));

    match kind {
        StrikeKind::Slash => {
            state.player.enter(CombatState::Slashing);
            let flash = state.tuning.slash_flash;
            state.flash(flash);
            let due = now_ms + f64::from(state.tuning.slash_duration);
            state.pending.schedule(
                due,
                Deferred::PlayerRecover {
                    id: state.player.id,
                },
            );
            state.emit(GameEvent::Slash {
                from: path.from,
                to: path.to,
            });
        }
        StrikeKind::Dash => {
            state.player.enter(CombatState::Idle);
            let cooldown = state.tuning.dash_cooldown;
            state.player.set_dash_cooldown(cooldown);
            let flash = state.tuning.dash_flash;
            state.flash(flash);
            state.emit(GameEvent::Dash {
                from: path.from,
                to: path.to,
            });
        }
    }

    hits
}

/// Resolve the charged strike of the enemy at `index`. Returns true if the
/// player was wounded.
pub fn enemy_strike(state: &mut GameState, index: usize, now_ms: f64) -> bool {
    let tuning = &state.tuning;
    let enemy = &state.enemies[index];
    let id = enemy.id;
    let path = StrikePath::new(enemy.pos, enemy.target_angle, tuning.slash_distance);
    let player_reach = tuning.player_radius + tuning.enemy_slash_reach;
    let combo_continues = enemy.is_elite() && enemy.attack_count().unwrap_or(1) > 1;
    let follow_up = if combo_continues {
        (
            now_ms + f64::from(tuning.slash_duration + tuning.combo_delay),
            Deferred::EnemyCombo { id },
        )
    } else {
        (
            now_ms + f64::from(tuning.slash_duration),
            Deferred::EnemyRecover { id },
        )
    };

    let touched = swept_hit(path.from, path.to, state.player.pos, player_reach);
    // Mid-slash the player is untouchable
    let wounded = touched
        && state.player.state != CombatState::Slashing
        && state.status == GameStatus::Playing;

    if wounded {
        state.player.take_damage(1);
        let flash = state.tuning.hurt_flash;
        state.flash(flash);
        let at = state.player.pos;
        let count = state.tuning.player_hurt_particles;
        state
            .particles
            .extend(ink_splash(&mut state.rng, at, palette::PLAYER, count));
        state
            .stains
            .extend(stain_cluster(&mut state.rng, at, palette::PLAYER));
        state.emit(GameEvent::PlayerHit {
            hp: state.player.hp,
        });
        if state.player.hp <= 0 {
            state.status = GameStatus::GameOver;
            log::info!("Game over, final score {}", state.score);
            state.emit(GameEvent::GameOver { score: state.score });
        }
    }

    let enemy = &mut state.enemies[index];
    enemy.enter(CombatState::Slashing);
    enemy.pos = path.to;
    state.pending.schedule(follow_up.0, follow_up.1);
    wounded
}

/// Apply a deferred transition. Unknown ids are ignored.
pub fn apply_deferred(state: &mut GameState, command: Deferred) {
    match command {
        Deferred::PlayerRecover { id } => {
            if state.player.id != id {
                log::trace!("Dropping recovery for stale player {}", id);
                return;
            }
            let cooldown = state.tuning.slash_cooldown;
            state.player.enter(CombatState::Cooldown);
            state.player.set_cooldown(cooldown);
        }
        Deferred::EnemyRecover { id } => {
            let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == id) else {
                log::trace!("Dropping recovery for missing enemy {}", id);
                return;
            };
            enemy.enter(CombatState::Idle);
            if let Some(kind) = enemy.enemy_kind() {
                enemy.set_attack_count(default_attack_count(kind, &state.tuning));
            }
        }
        Deferred::EnemyCombo { id } => {
            let player_pos = state.player.pos;
            let Some(enemy) = state.enemy_mut(id) else {
                log::trace!("Dropping combo swing for missing enemy {}", id);
                return;
            };
            let remaining = enemy.attack_count().unwrap_or(1).saturating_sub(1);
            enemy.enter(CombatState::Charging);
            enemy.set_attack_count(remaining);
            enemy.target_angle = crate::angle_to(enemy.pos, player_pos);
        }
    }
}
