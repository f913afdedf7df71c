//! Rain and falling leaves
//!
//! Pure decoration: runs every frame in every status and never touches
//! gameplay state. Motion is per tick, wrapping around the viewport.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Viewport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainDrop {
    pub pos: Vec2,
    pub length: f32,
    /// Pixels per tick
    pub speed: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    pub pos: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub vel: Vec2,
    /// Sway phase offset
    pub phase: f32,
}

/// Horizontal sway amplitude (px per tick)
const LEAF_SWAY: f32 = 1.5;
/// Sway period divisor (ms)
const LEAF_SWAY_PERIOD: f64 = 500.0;
/// Off-screen slack before a leaf wraps
const LEAF_WRAP_MARGIN: f32 = 20.0;

/// Decorative weather layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ambient {
    pub rain: Vec<RainDrop>,
    pub leaves: Vec<Leaf>,
}

impl Ambient {
    /// Scatter `rain_count` drops and `leaf_count` leaves over the viewport
    pub fn scatter<R: Rng>(rng: &mut R, viewport: Viewport, rain_count: usize, leaf_count: usize) -> Self {
        let rain = (0..rain_count)
            .map(|_| RainDrop {
                pos: random_point(rng, viewport),
                length: rng.random_range(10.0..30.0),
                speed: rng.random_range(10.0..25.0),
                opacity: rng.random_range(0.1..0.4),
            })
            .collect();

        let leaves = (0..leaf_count)
            .map(|_| Leaf {
                pos: random_point(rng, viewport),
                size: rng.random_range(4.0..10.0),
                rotation: rng.random_range(0.0..std::f32::consts::TAU),
                rotation_speed: rng.random_range(-0.05..0.05),
                vel: Vec2::new(rng.random_range(0.5..1.5), rng.random_range(1.0..2.5)),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();

        Self { rain, leaves }
    }

    /// Advance one tick. `time_ms` drives the leaf sway.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, viewport: Viewport, time_ms: f64) {
        for drop in &mut self.rain {
            drop.pos.y += drop.speed;
            drop.pos.x += 1.0;
            if drop.pos.y > viewport.height {
                drop.pos.y = -drop.length;
                drop.pos.x = rng.random_range(0.0..viewport.width.max(1.0));
            }
        }

        for leaf in &mut self.leaves {
            let sway = ((time_ms / LEAF_SWAY_PERIOD) as f32 + leaf.phase).sin() * LEAF_SWAY;
            leaf.pos.y += leaf.vel.y;
            leaf.pos.x += leaf.vel.x + sway;
            leaf.rotation += leaf.rotation_speed;
            if leaf.pos.y > viewport.height + LEAF_WRAP_MARGIN
                || leaf.pos.x > viewport.width + LEAF_WRAP_MARGIN
            {
                leaf.pos.y = -LEAF_WRAP_MARGIN;
                leaf.pos.x = rng.random_range(0.0..viewport.width.max(1.0));
            }
        }
    }
}

fn random_point<R: Rng>(rng: &mut R, viewport: Viewport) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..viewport.width.max(1.0)),
        rng.random_range(0.0..viewport.height.max(1.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rain_wraps_to_top() {
        let mut rng = Pcg32::seed_from_u64(3);
        let viewport = Viewport::new(200.0, 100.0);
        let mut ambient = Ambient {
            rain: vec![RainDrop {
                pos: Vec2::new(50.0, 95.0),
                length: 12.0,
                speed: 10.0,
                opacity: 0.2,
            }],
            leaves: Vec::new(),
        };
        ambient.advance(&mut rng, viewport, 0.0);
        let drop = &ambient.rain[0];
        assert_eq!(drop.pos.y, -12.0);
        assert!((0.0..200.0).contains(&drop.pos.x));
    }

    #[test]
    fn test_leaf_sway_follows_time() {
        let mut rng = Pcg32::seed_from_u64(3);
        let viewport = Viewport::new(1000.0, 1000.0);
        let leaf = Leaf {
            pos: Vec2::new(100.0, 100.0),
            size: 5.0,
            rotation: 0.0,
            rotation_speed: 0.01,
            vel: Vec2::new(1.0, 2.0),
            phase: 0.0,
        };
        let mut ambient = Ambient {
            rain: Vec::new(),
            leaves: vec![leaf],
        };
        // sin(0) = 0: no sway at t = 0
        ambient.advance(&mut rng, viewport, 0.0);
        assert!((ambient.leaves[0].pos.x - 101.0).abs() < 1e-4);
        assert!((ambient.leaves[0].pos.y - 102.0).abs() < 1e-4);
        // sin(π/2) = 1: full sway
        let t = std::f64::consts::FRAC_PI_2 * 500.0;
        ambient.advance(&mut rng, viewport, t);
        assert!((ambient.leaves[0].pos.x - 103.5).abs() < 1e-3);
    }

    #[test]
    fn test_scatter_counts() {
        let mut rng = Pcg32::seed_from_u64(11);
        let ambient = Ambient::scatter(&mut rng, Viewport::new(640.0, 480.0), 100, 25);
        assert_eq!(ambient.rain.len(), 100);
        assert_eq!(ambient.leaves.len(), 25);
        assert!(ambient.rain.iter().all(|d| d.pos.x < 640.0 && d.pos.y < 480.0));
    }
}
