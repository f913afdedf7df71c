//! Ink particles and stains
//!
//! Particles are short-lived splashes that drift, slow down and fade out.
//! Stains are the marks they leave behind: they never age, but the buffer is
//! capped and drops its oldest stain first.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A splash of ink flying away from an impact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Ticks lived so far
    pub life: u32,
    /// Ticks until removal
    pub max_life: u32,
    pub size: f32,
    pub color: [f32; 4],
}

impl Particle {
    /// Remaining fraction of life (1 = fresh, 0 = expired)
    #[inline]
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        (1.0 - self.life as f32 / self.max_life as f32).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life >= self.max_life
    }

    /// Advance one tick: move, apply drag, age
    pub fn advance(&mut self, drag: f32) {
        self.pos += self.vel;
        self.vel *= drag;
        self.life += 1;
    }
}

/// A persistent ink blot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stain {
    pub pos: Vec2,
    pub size: f32,
    pub color: [f32; 4],
    pub alpha: f32,
    pub rotation: f32,
}

/// Radial burst of `count` particles from `origin`
pub fn ink_splash<R: Rng>(rng: &mut R, origin: Vec2, color: [f32; 4], count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(3.0..11.0);
            Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 0,
                max_life: rng.random_range(50..100),
                size: rng.random_range(3.0..11.0),
                color,
            }
        })
        .collect()
}

/// A small cluster of stains jittered around `origin`
pub fn stain_cluster<R: Rng>(rng: &mut R, origin: Vec2, color: [f32; 4]) -> Vec<Stain> {
    let count = rng.random_range(4..8);
    (0..count)
        .map(|_| Stain {
            pos: origin + Vec2::new(rng.random_range(-40.0..40.0), rng.random_range(-40.0..40.0)),
            size: rng.random_range(20.0..70.0),
            color,
            alpha: rng.random_range(0.3..0.8),
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
        })
        .collect()
}

/// FIFO stain store with a hard size cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StainBuffer {
    stains: VecDeque<Stain>,
    cap: usize,
}

impl StainBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            stains: VecDeque::with_capacity(cap.min(1024)),
            cap: cap.max(1),
        }
    }

    /// Insert a stain, evicting the oldest when over the cap
    pub fn push(&mut self, stain: Stain) {
        self.stains.push_back(stain);
        while self.stains.len() > self.cap {
            self.stains.pop_front();
        }
    }

    pub fn extend(&mut self, stains: impl IntoIterator<Item = Stain>) {
        for stain in stains {
            self.push(stain);
        }
    }

    pub fn len(&self) -> usize {
        self.stains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stains.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Stain> {
        self.stains.iter()
    }
}

/// Advance every particle one tick and drop the expired ones
pub fn advance_particles(particles: &mut Vec<Particle>, drag: f32) {
    for particle in particles.iter_mut() {
        particle.advance(drag);
    }
    particles.retain(|p| !p.is_expired());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn stain_at(x: f32) -> Stain {
        Stain {
            pos: Vec2::new(x, 0.0),
            size: 30.0,
            color: crate::palette::BLOOD,
            alpha: 0.5,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_splash_shape() {
        let mut rng = Pcg32::seed_from_u64(1);
        let burst = ink_splash(&mut rng, Vec2::new(5.0, 5.0), crate::palette::BLOOD, 100);
        assert_eq!(burst.len(), 100);
        for p in &burst {
            assert_eq!(p.pos, Vec2::new(5.0, 5.0));
            assert_eq!(p.life, 0);
            assert!((50..100).contains(&p.max_life));
            let speed = p.vel.length();
            assert!((3.0 - 1e-3..11.0 + 1e-3).contains(&speed));
        }
    }

    #[test]
    fn test_particle_drag_and_expiry() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(10.0, 0.0),
            life: 0,
            max_life: 2,
            size: 4.0,
            color: crate::palette::PLAYER,
        }];
        advance_particles(&mut particles, 0.94);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].pos, Vec2::new(10.0, 0.0));
        assert!((particles[0].vel.x - 9.4).abs() < 1e-5);
        assert_eq!(particles[0].life, 1);
        advance_particles(&mut particles, 0.94);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_stain_cluster_size() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..20 {
            let cluster = stain_cluster(&mut rng, Vec2::ZERO, crate::palette::BLOOD);
            assert!((4..=7).contains(&cluster.len()));
            for s in &cluster {
                assert!(s.pos.x.abs() <= 40.0 && s.pos.y.abs() <= 40.0);
                assert!((0.3..0.8).contains(&s.alpha));
            }
        }
    }

    #[test]
    fn test_stain_cap_evicts_oldest() {
        let mut buffer = StainBuffer::new(300);
        for i in 0..300 {
            buffer.push(stain_at(i as f32));
        }
        assert_eq!(buffer.len(), 300);
        buffer.push(stain_at(300.0));
        assert_eq!(buffer.len(), 300);
        let xs: Vec<f32> = buffer.iter().map(|s| s.pos.x).collect();
        assert_eq!(xs[0], 1.0);
        assert_eq!(xs[299], 300.0);
    }
}
