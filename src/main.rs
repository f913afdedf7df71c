//! Headless demo runner
//!
//! Plays one run with the autopilot at 60 Hz of simulated time and logs what
//! happened. `INK_BLADE_TUNING` may point at a JSON balance file,
//! `INK_BLADE_SETTINGS` at a presentation settings file (written with
//! defaults when missing), `INK_BLADE_SEED` picks the seed.

use ink_blade::epitaph::offline_verse;
use ink_blade::sim::{GameEvent, Viewport, autopilot};
use ink_blade::{Game, Settings, Tuning};

/// Simulated frame length (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Seed when none is given
const DEFAULT_SEED: u64 = 0x1A4B_1ADE;
/// Give up after ten simulated minutes
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Ink Blade (headless) starting...");

    let tuning = match std::env::var("INK_BLADE_TUNING") {
        Ok(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };
    let settings = match std::env::var("INK_BLADE_SETTINGS") {
        Ok(path) => {
            let settings = Settings::load(&path);
            if !std::path::Path::new(&path).exists() {
                settings.save(&path);
            }
            settings
        }
        Err(_) => Settings::default(),
    };
    let seed = std::env::var("INK_BLADE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut game = Game::new(seed, Viewport::default(), tuning, settings, offline_verse);
    game.start();

    let mut kills = 0u32;
    let mut wounds = 0u32;
    let mut frames = 0u32;
    while frames < MAX_FRAMES && !game.is_over() {
        let input = autopilot::drive(game.state());
        let now = f64::from(frames) * FRAME_MS;
        for event in game.frame(now, &input) {
            match event {
                GameEvent::EnemySlain { .. } => kills += 1,
                GameEvent::PlayerHit { .. } => wounds += 1,
                _ => {}
            }
        }
        frames += 1;
    }

    let state = game.state();
    log::info!(
        "Run ended after {:.1}s: score {}, {} kills, {} wounds, hp {}/{}",
        f64::from(frames) * FRAME_MS / 1000.0,
        state.score,
        kills,
        wounds,
        state.player.hp,
        state.player.max_hp
    );

    if let Some(verse) = game.finish_epitaph() {
        println!("{verse}");
    }
}
