//! Frame tessellation
//!
//! Turns a read-only snapshot of the world into one triangle list, back to
//! front, in world pixels. The host uploads the bytes and draws them with
//! alpha blending; nothing here touches the simulation.

pub mod hud;
pub mod shapes;
pub mod vertex;

pub use hud::Hud;
pub use vertex::{Vertex, as_bytes};

use glam::Vec2;
use std::f32::consts::PI;

use crate::palette::{self, with_alpha};
use crate::settings::Settings;
use crate::sim::{CombatState, Entity, GameState};

/// Dash pattern for charge telegraphs (dash, gap)
const ENEMY_TELEGRAPH_DASH: (f32, f32) = (15.0, 10.0);
const PLAYER_TELEGRAPH_DASH: (f32, f32) = (12.0, 18.0);

/// Build the triangle list for one frame
pub fn tessellate(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let mut out = Vec::with_capacity(4096);

    // Paper
    let screen = Vec2::new(state.viewport.width, state.viewport.height);
    out.extend(shapes::rect(Vec2::ZERO, screen, palette::PAPER));

    if settings.weather {
        for drop in &state.ambient.rain {
            let color = with_alpha(palette::RAIN, palette::RAIN[3] * drop.opacity);
            let end = drop.pos + Vec2::new(1.0, drop.length);
            out.extend(shapes::stroke(drop.pos, end, 1.0, color));
        }
    }

    for stain in state.stains.iter() {
        let color = with_alpha(stain.color, stain.alpha);
        out.extend(shapes::blot(stain.pos, stain.size, stain.rotation, color, 10));
    }

    if settings.weather {
        for leaf in &state.ambient.leaves {
            out.extend(shapes::ellipse(
                leaf.pos,
                leaf.size,
                leaf.size / 2.0,
                leaf.rotation,
                palette::LEAF,
                segments / 2,
            ));
        }
    }

    let item_radius = state.tuning.item_radius;
    for item in &state.items {
        let swell = item.pulse.sin();
        // Soft halo in place of a canvas shadow
        let glow = 15.0 + 5.0 + swell * 5.0;
        out.extend(shapes::circle(
            item.pos,
            item_radius + glow * 0.5,
            with_alpha(palette::HEALTH_GLOW, 0.25),
            segments,
        ));
        out.extend(shapes::circle(
            item.pos,
            item_radius + swell * 2.0,
            palette::HEALTH,
            segments,
        ));
        let detail = item_radius / 2.0 + item.pulse.cos();
        out.extend(shapes::ring(
            item.pos,
            detail - 1.0,
            detail + 1.0,
            palette::HEALTH_GLOW,
            segments,
        ));
    }

    let budget = settings.max_particles();
    for p in state.particles.iter().take(budget) {
        let fade = p.fade();
        let size = p.size * (0.5 + 0.5 * fade);
        out.extend(shapes::circle(p.pos, size, with_alpha(p.color, fade), 8));
    }

    for enemy in &state.enemies {
        enemy_shapes(&mut out, state, enemy, settings, segments);
    }

    player_shapes(&mut out, state, settings, segments);

    if settings.effective_flash() && state.flash_opacity > 0.0 {
        out.extend(shapes::rect(
            Vec2::ZERO,
            screen,
            with_alpha(palette::FLASH, state.flash_opacity),
        ));
    }

    out
}

fn enemy_shapes(out: &mut Vec<Vertex>, state: &GameState, enemy: &Entity, settings: &Settings, segments: u32) {
    let elite = enemy.is_elite();
    let (fill, rim) = if elite {
        (palette::ELITE, palette::ELITE_RIM)
    } else {
        (palette::ENEMY, palette::ENEMY_RIM)
    };
    let radius = enemy.radius(&state.tuning);

    if settings.telegraphs && enemy.state == CombatState::Charging {
        let end = crate::offset_along(enemy.pos, enemy.target_angle, state.tuning.slash_distance);
        let width = if elite { 40.0 } else { 30.0 };
        let (dash, gap) = ENEMY_TELEGRAPH_DASH;
        out.extend(shapes::dashed_stroke(
            enemy.pos,
            end,
            width,
            dash,
            gap,
            with_alpha(fill, 0.4),
        ));
    }

    out.extend(shapes::circle(enemy.pos, radius, fill, segments));
    out.extend(shapes::ring(enemy.pos, radius - 2.0, radius + 2.0, rim, segments));

    // Elite health bar once wounded
    if elite && enemy.hp < enemy.max_hp {
        let width = 40.0;
        let origin = enemy.pos + Vec2::new(-width / 2.0, -45.0);
        out.extend(shapes::rect(origin, Vec2::new(width, 6.0), [0.0, 0.0, 0.0, 0.3]));
        let filled = width * (enemy.hp.max(0) as f32 / enemy.max_hp.max(1) as f32);
        out.extend(shapes::rect(origin, Vec2::new(filled, 6.0), palette::ELITE));
    }
}

fn player_shapes(out: &mut Vec<Vertex>, state: &GameState, settings: &Settings, segments: u32) {
    let tuning = &state.tuning;
    let player = &state.player;
    let radius = tuning.player_radius;

    if player.dash_cooldown() > 0.0 {
        out.extend(shapes::progress_arc(
            player.pos,
            radius + 25.0,
            6.0,
            player.dash_cooldown() / tuning.dash_cooldown,
            with_alpha(palette::BLOOD, 0.4),
            segments,
        ));
    }

    if player.state == CombatState::Charging {
        if settings.telegraphs {
            let end = crate::offset_along(player.pos, player.target_angle, tuning.slash_distance);
            let (dash, gap) = PLAYER_TELEGRAPH_DASH;
            out.extend(shapes::dashed_stroke(
                player.pos,
                end,
                40.0,
                dash,
                gap,
                with_alpha(palette::PLAYER, 0.4),
            ));
        }
        let progress = player.charge_time / tuning.charge_time_player;
        out.extend(shapes::progress_arc(
            player.pos,
            radius + 15.0,
            6.0,
            progress,
            palette::PLAYER,
            segments,
        ));
    }

    if player.state == CombatState::Cooldown && player.cooldown() > 0.0 {
        out.extend(shapes::progress_arc(
            player.pos,
            radius + 15.0,
            4.0,
            player.cooldown() / tuning.slash_cooldown,
            [0.0, 0.0, 0.0, 0.2],
            segments,
        ));
    }

    out.extend(shapes::circle(player.pos, radius, palette::PLAYER, segments));

    // Brush rim drifts with time so the stroke looks alive
    let start = (state.time_ms * 0.003).rem_euclid(std::f64::consts::TAU) as f32;
    out.extend(shapes::arc(
        player.pos,
        radius + 3.5,
        radius + 6.5,
        start,
        PI,
        palette::PLAYER_RIM,
        segments,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::{EnemyKind, Viewport};
    use crate::tuning::Tuning;

    fn world() -> GameState {
        let mut state = GameState::new(11, Viewport::new(640.0, 480.0), Tuning::default());
        state.start_game();
        state
    }

    fn count_color(verts: &[Vertex], color: [f32; 4]) -> usize {
        verts.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_background_comes_first() {
        let verts = tessellate(&world(), &Settings::default());
        assert!(verts[..6].iter().all(|v| v.color == palette::PAPER));
    }

    #[test]
    fn test_flash_respects_reduced_motion() {
        let mut state = world();
        state.flash_opacity = 0.7;
        let flash = with_alpha(palette::FLASH, 0.7);

        let verts = tessellate(&state, &Settings::default());
        assert_eq!(count_color(&verts, flash), 6);
        assert_eq!(verts.last().map(|v| v.color), Some(flash));

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(count_color(&tessellate(&state, &calm), flash), 0);
    }

    #[test]
    fn test_elite_bar_only_when_wounded() {
        let mut state = world();
        let id = state.next_entity_id();
        state
            .enemies
            .push(Entity::enemy(id, Vec2::new(100.0, 100.0), EnemyKind::Elite, &state.tuning));
        let settings = Settings::from_preset(QualityPreset::Low);
        let bar_bg = [0.0, 0.0, 0.0, 0.3];
        assert_eq!(count_color(&tessellate(&state, &settings), bar_bg), 0);

        state.enemies[0].hp = 1;
        assert_eq!(count_color(&tessellate(&state, &settings), bar_bg), 6);
    }

    #[test]
    fn test_does_not_mutate() {
        let state = world();
        let a = tessellate(&state, &Settings::default());
        let b = tessellate(&state, &Settings::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_particle_budget() {
        let mut state = world();
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        state.particles = crate::sim::effects::ink_splash(&mut rng, Vec2::ZERO, palette::BLOOD, 50);
        let none = Settings {
            particles: false,
            ..Settings::default()
        };
        assert!(tessellate(&state, &none).len() < tessellate(&state, &Settings::default()).len());
    }
}
