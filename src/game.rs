//! Session driver
//!
//! Glue between a host frame loop and the simulation: owns the world, the
//! presentation settings and the epitaph request for the current run.

use std::sync::Arc;

use crate::epitaph::{EpitaphStatus, EpitaphTask, EpitaphWriter};
use crate::renderer::{self, Hud, Vertex};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, GameStatus, InputState, Viewport, tick};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    settings: Settings,
    writer: Arc<dyn EpitaphWriter>,
    epitaph: Option<EpitaphTask>,
    epitaph_requests: u32,
}

impl Game {
    pub fn new(
        seed: u64,
        viewport: Viewport,
        tuning: Tuning,
        settings: Settings,
        writer: impl EpitaphWriter,
    ) -> Self {
        let mut state = GameState::new(seed, viewport, tuning);
        let (rain, leaves) = settings.ambient_counts();
        state.scatter_ambient(rain, leaves);
        log::info!(
            "Ink blade ready: seed {}, {}x{} viewport, {} quality",
            seed,
            viewport.width,
            viewport.height,
            settings.quality.as_str()
        );
        Self {
            state,
            settings,
            writer: Arc::new(writer),
            epitaph: None,
            epitaph_requests: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct world access for hosts that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap presentation settings; ambient density follows the new preset
    pub fn set_settings(&mut self, settings: Settings) {
        if settings.ambient_counts() != self.settings.ambient_counts() {
            let (rain, leaves) = settings.ambient_counts();
            self.state.scatter_ambient(rain, leaves);
        }
        self.settings = settings;
    }

    /// Enter (or re-enter) play. Any epitaph from the previous run is dropped.
    pub fn start(&mut self) {
        self.epitaph = None;
        self.state.start_game();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(Viewport::new(width, height));
    }

    /// Advance one display frame. Returns the events it raised.
    pub fn frame(&mut self, now_ms: f64, input: &InputState) -> &[GameEvent] {
        tick(&mut self.state, input, now_ms);

        let final_score = self.state.events().iter().find_map(|e| match e {
            GameEvent::GameOver { score } => Some(*score),
            _ => None,
        });
        if let Some(score) = final_score {
            if self.epitaph.is_none() {
                self.epitaph_requests += 1;
                self.epitaph = Some(EpitaphTask::spawn(Arc::clone(&self.writer), score));
            }
        }

        if let Some(task) = &mut self.epitaph {
            task.poll();
        }

        self.state.events()
    }

    pub fn epitaph(&self) -> EpitaphStatus {
        self.epitaph
            .as_ref()
            .map(EpitaphTask::status)
            .unwrap_or_default()
    }

    /// Block until the current epitaph (if any) is written
    pub fn finish_epitaph(&mut self) -> Option<String> {
        self.epitaph.as_mut().map(|task| task.wait().to_string())
    }

    /// Epitaphs requested since this session was created
    pub fn epitaph_requests(&self) -> u32 {
        self.epitaph_requests
    }

    pub fn is_over(&self) -> bool {
        self.state.status == GameStatus::GameOver
    }

    pub fn render(&self) -> Vec<Vertex> {
        renderer::tessellate(&self.state, &self.settings)
    }

    pub fn hud(&self) -> Hud {
        Hud::new(&self.state, &self.epitaph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epitaph::EpitaphError;

    fn game() -> Game {
        Game::new(
            5,
            Viewport::new(800.0, 600.0),
            Tuning::default(),
            Settings::default(),
            |_: u32| -> Result<String, EpitaphError> { Ok("still".into()) },
        )
    }

    #[test]
    fn test_title_until_started() {
        let mut g = game();
        for i in 0..10 {
            g.frame(i as f64 * 16.0, &InputState::default());
        }
        assert_eq!(g.state().status, GameStatus::Start);
        assert_eq!(g.epitaph(), EpitaphStatus::Idle);
        g.start();
        assert_eq!(g.state().status, GameStatus::Playing);
    }

    #[test]
    fn test_settings_change_rescatters_weather() {
        let mut g = game();
        g.set_settings(Settings {
            weather: false,
            ..Settings::default()
        });
        assert!(g.state().ambient.rain.is_empty());
        assert!(g.state().ambient.leaves.is_empty());
    }
}
