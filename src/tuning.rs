//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be rebalanced from a JSON
//! file without touching the simulation. Defaults reproduce the shipped feel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Radii (px) ===
    pub player_radius: f32,
    pub enemy_radius: f32,
    pub elite_radius: f32,
    pub item_radius: f32,

    // === Charge thresholds (ms) ===
    pub charge_time_player: f32,
    pub charge_time_enemy: f32,
    pub charge_time_elite: f32,

    // === Strikes ===
    /// Length of every slash and dash (px)
    pub slash_distance: f32,
    /// Delay between a slash and its follow-up transition (ms)
    pub slash_duration: f32,
    /// Extra wait before an elite re-aims for its next combo swing (ms)
    pub combo_delay: f32,
    /// Player recovery after a slash (ms)
    pub slash_cooldown: f32,
    pub dash_cooldown: f32,
    /// Hit reach added to the target radius
    pub player_slash_reach: f32,
    pub dash_reach: f32,
    pub enemy_slash_reach: f32,

    // === Movement (px per ms) ===
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub elite_speed: f32,
    /// Engagement distance as a fraction of `slash_distance`
    pub enemy_aggro_factor: f32,
    pub elite_aggro_factor: f32,

    // === Spawning (ms) ===
    pub spawn_interval: f32,
    pub elite_spawn_interval: f32,
    pub item_spawn_interval: f32,
    /// Distance beyond half the viewport at which enemies appear
    pub spawn_margin: f32,
    /// Inset from the viewport edge for item placement
    pub item_margin: f32,

    // === Roles ===
    pub player_max_hp: i32,
    pub enemy_hp: i32,
    pub elite_hp: i32,
    pub enemy_score: u32,
    pub elite_score: u32,
    pub elite_attack_count: u32,

    // === Effects ===
    pub slash_hit_particles: usize,
    pub dash_hit_particles: usize,
    pub slash_trail_particles: usize,
    pub dash_trail_particles: usize,
    pub player_hurt_particles: usize,
    pub heal_particles: usize,
    pub stain_cap: usize,
    /// Per-tick velocity multiplier for particles
    pub particle_drag: f32,
    /// Flash decay per ms
    pub flash_decay: f32,
    pub slash_flash: f32,
    pub dash_flash: f32,
    pub hurt_flash: f32,
    /// Item pulse phase per ms
    pub item_pulse_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: 24.0,
            enemy_radius: 20.0,
            elite_radius: 28.0,
            item_radius: 18.0,

            charge_time_player: 400.0,
            charge_time_enemy: 1200.0,
            charge_time_elite: 800.0,

            slash_distance: 320.0,
            slash_duration: 150.0,
            combo_delay: 100.0,
            slash_cooldown: 200.0,
            dash_cooldown: 2000.0,
            player_slash_reach: 25.0,
            dash_reach: 30.0,
            enemy_slash_reach: 15.0,

            player_speed: 0.22,
            enemy_speed: 0.08,
            elite_speed: 0.1,
            enemy_aggro_factor: 0.7,
            elite_aggro_factor: 1.0,

            spawn_interval: 1800.0,
            elite_spawn_interval: 20000.0,
            item_spawn_interval: 15000.0,
            spawn_margin: 150.0,
            item_margin: 100.0,

            player_max_hp: crate::consts::PLAYER_MAX_HP,
            enemy_hp: 1,
            elite_hp: 3,
            enemy_score: 5,
            elite_score: 25,
            elite_attack_count: 2,

            slash_hit_particles: 100,
            dash_hit_particles: 120,
            slash_trail_particles: 40,
            dash_trail_particles: 50,
            player_hurt_particles: 80,
            heal_particles: 30,
            stain_cap: 300,
            particle_drag: 0.94,
            flash_decay: 0.005,
            slash_flash: 0.7,
            dash_flash: 1.0,
            hurt_flash: 0.5,
            item_pulse_rate: 0.005,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("spawn_interval", self.spawn_interval),
            ("elite_spawn_interval", self.elite_spawn_interval),
            ("item_spawn_interval", self.item_spawn_interval),
            ("charge_time_player", self.charge_time_player),
            ("charge_time_enemy", self.charge_time_enemy),
            ("charge_time_elite", self.charge_time_elite),
            ("slash_distance", self.slash_distance),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }
        let non_negative = [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("elite_speed", self.elite_speed),
            ("slash_duration", self.slash_duration),
            ("combo_delay", self.combo_delay),
            ("slash_cooldown", self.slash_cooldown),
            ("dash_cooldown", self.dash_cooldown),
            ("flash_decay", self.flash_decay),
            ("item_pulse_rate", self.item_pulse_rate),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        if self.player_max_hp < 1 {
            return Err(TuningError::Invalid {
                field: "player_max_hp",
                reason: "must be at least 1",
            });
        }
        if self.enemy_hp < 1 || self.elite_hp < 1 {
            return Err(TuningError::Invalid {
                field: "enemy_hp",
                reason: "enemies need at least 1 hp",
            });
        }
        if self.elite_attack_count < 1 {
            return Err(TuningError::Invalid {
                field: "elite_attack_count",
                reason: "must be at least 1",
            });
        }
        if self.stain_cap == 0 {
            return Err(TuningError::Invalid {
                field: "stain_cap",
                reason: "must be at least 1",
            });
        }
        if !(0.0..=1.0).contains(&self.particle_drag) {
            return Err(TuningError::Invalid {
                field: "particle_drag",
                reason: "must be within [0, 1]",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_interval": 900.0 }"#).unwrap();
        assert_eq!(tuning.spawn_interval, 900.0);
        assert_eq!(tuning.slash_distance, 320.0);
        assert_eq!(tuning.stain_cap, 300);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Tuning::from_json(r#"{ "item_spawn_interval": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "item_spawn_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_rates_and_delays() {
        for field in [
            "player_speed",
            "enemy_speed",
            "elite_speed",
            "slash_duration",
            "combo_delay",
            "slash_cooldown",
            "dash_cooldown",
            "flash_decay",
            "item_pulse_rate",
        ] {
            let json = format!(r#"{{ "{field}": -0.01 }}"#);
            match Tuning::from_json(&json) {
                Err(TuningError::Invalid { field: rejected, .. }) => assert_eq!(rejected, field),
                other => panic!("{field} accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_rates_are_allowed() {
        let tuning = Tuning::from_json(r#"{ "flash_decay": 0.0, "combo_delay": 0.0 }"#).unwrap();
        assert_eq!(tuning.flash_decay, 0.0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
