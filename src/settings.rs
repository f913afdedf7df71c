//! Presentation settings and preferences
//!
//! Nothing here changes gameplay; two players with different settings and the
//! same seed see the same fight. Stored as JSON next to the binary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{LEAF_COUNT, RAIN_COUNT};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Falling rain strokes
    pub fn rain_count(&self) -> usize {
        match self {
            QualityPreset::Low => RAIN_COUNT / 2,
            QualityPreset::Medium => RAIN_COUNT,
            QualityPreset::High => RAIN_COUNT * 2,
        }
    }

    /// Drifting leaves
    pub fn leaf_count(&self) -> usize {
        match self {
            QualityPreset::Low => LEAF_COUNT / 2,
            QualityPreset::Medium => LEAF_COUNT,
            QualityPreset::High => LEAF_COUNT * 2,
        }
    }

    /// Segments used for circles and arcs
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 40,
        }
    }

    /// Maximum particles drawn per frame
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 200,
            QualityPreset::Medium => 800,
            QualityPreset::High => 4000,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Ink splashes
    pub particles: bool,
    /// Rain and leaves
    pub weather: bool,
    /// Charge telegraphs around enemies
    pub telegraphs: bool,

    // === HUD ===
    pub show_hud: bool,

    // === Accessibility ===
    /// Reduced motion (no full-screen flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            weather: true,
            telegraphs: true,

            show_hud: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective flash overlay (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Ambient density as `(rain, leaves)`
    pub fn ambient_counts(&self) -> (usize, usize) {
        if !self.weather {
            (0, 0)
        } else {
            (self.quality.rain_count(), self.quality.leaf_count())
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str::<Self>(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Write settings as JSON
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}
