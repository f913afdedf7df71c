//! Ink Blade - an ink-wash wuxia brawler
//!
//! Core modules:
//! - `sim`: Simulation core (entities, combat, spawning, effects)
//! - `renderer`: Tessellates a world snapshot into brush-stroke triangles
//! - `game`: Host-facing session (clock, restart, epitaph request)
//! - `epitaph`: Boundary to the external death-poem writer
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod epitaph;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use epitaph::{EpitaphError, EpitaphStatus, EpitaphWriter};
pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest elapsed time a single step may consume (ms)
    pub const MAX_FRAME_DELTA_MS: f32 = 50.0;

    /// Segment subdivisions for the swept hit test (samples = steps + 1)
    pub const SWEEP_STEPS: u32 = 20;

    /// Default viewport when the host has not reported one yet
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

    /// Ambient decoration counts (medium quality)
    pub const RAIN_COUNT: usize = 100;
    pub const LEAF_COUNT: usize = 25;

    /// Player starting (and maximum) health
    pub const PLAYER_MAX_HP: i32 = 3;
}

/// Ink palette, linear RGBA
pub mod palette {
    pub const PAPER: [f32; 4] = [0.957, 0.945, 0.918, 1.0]; // #f4f1ea
    pub const ENEMY: [f32; 4] = [0.608, 0.110, 0.110, 1.0]; // #9b1c1c
    pub const ENEMY_RIM: [f32; 4] = [0.498, 0.114, 0.114, 1.0]; // #7f1d1d
    pub const ELITE: [f32; 4] = [0.298, 0.114, 0.584, 1.0]; // #4c1d95
    pub const ELITE_RIM: [f32; 4] = [0.180, 0.063, 0.396, 1.0]; // #2e1065
    pub const BLOOD: [f32; 4] = [0.357, 0.027, 0.027, 1.0]; // #5b0707
    pub const PLAYER: [f32; 4] = [0.102, 0.102, 0.102, 1.0]; // #1a1a1a
    pub const PLAYER_RIM: [f32; 4] = [0.267, 0.267, 0.267, 1.0]; // #444
    pub const HEALTH: [f32; 4] = [0.176, 0.353, 0.153, 1.0]; // #2d5a27
    pub const HEALTH_GLOW: [f32; 4] = [0.400, 0.733, 0.416, 1.0]; // #66bb6a
    pub const RAIN: [f32; 4] = [0.157, 0.157, 0.157, 0.15];
    pub const LEAF: [f32; 4] = [0.235, 0.196, 0.157, 0.4];
    pub const FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Same color with a different alpha
    #[inline]
    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }
}

/// Direction (radians) from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Point `dist` away from `origin` along `angle`
#[inline]
pub fn offset_along(origin: Vec2, angle: f32, dist: f32) -> Vec2 {
    origin + Vec2::new(angle.cos(), angle.sin()) * dist
}
