//! Hit detection for straight-line strikes
//!
//! Slashes and dashes are instantaneous, so instead of continuous collision we
//! sample points along the strike segment and test each against the target
//! circle. Each target is tested once per strike and stops at its first hit.

use glam::Vec2;

use crate::consts::SWEEP_STEPS;

/// Point at parameter `t` (0..=1) along `start -> end`
#[inline]
pub fn lerp_point(start: Vec2, end: Vec2, t: f32) -> Vec2 {
    start + (end - start) * t
}

/// Evenly spaced samples along a segment, both endpoints included
pub fn segment_samples(start: Vec2, end: Vec2, steps: u32) -> impl Iterator<Item = Vec2> {
    let steps = steps.max(1);
    (0..=steps).map(move |i| lerp_point(start, end, i as f32 / steps as f32))
}

/// Index of the first sample point within `hit_radius` of `target`
pub fn first_sample_hit(start: Vec2, end: Vec2, target: Vec2, hit_radius: f32) -> Option<u32> {
    segment_samples(start, end, SWEEP_STEPS)
        .position(|p| p.distance(target) < hit_radius)
        .map(|i| i as u32)
}

/// Whether a strike from `start` to `end` touches a circle at `target`
#[inline]
pub fn swept_hit(start: Vec2, end: Vec2, target: Vec2, hit_radius: f32) -> bool {
    first_sample_hit(start, end, target, hit_radius).is_some()
}

/// Exact distance from `point` to the closest point on segment `a -> b`
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let line = b - a;
    let len_sq = line.length_squared();
    if len_sq < 0.0001 {
        return point.distance(a); // Degenerate segment
    }
    let t = ((point - a).dot(line) / len_sq).clamp(0.0, 1.0);
    point.distance(a + line * t)
}

/// Ids of every target a strike touches, each at most once, in target order
pub fn sweep_targets<I>(start: Vec2, end: Vec2, targets: I) -> Vec<u32>
where
    I: IntoIterator<Item = (u32, Vec2, f32)>,
{
    targets
        .into_iter()
        .filter(|&(_, pos, hit_radius)| swept_hit(start, end, pos, hit_radius))
        .map(|(id, _, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_samples_include_endpoints() {
        let samples: Vec<_> =
            segment_samples(Vec2::ZERO, Vec2::new(320.0, 0.0), SWEEP_STEPS).collect();
        assert_eq!(samples.len(), SWEEP_STEPS as usize + 1);
        assert_eq!(samples[0], Vec2::ZERO);
        assert!((samples[SWEEP_STEPS as usize].x - 320.0).abs() < 1e-4);
        assert!((samples[1].x - 16.0).abs() < 1e-4);
    }

    #[test]
    fn test_target_on_segment_hits_once() {
        let start = Vec2::ZERO;
        let end = Vec2::new(320.0, 0.0);
        // Sitting right on the line is within reach of several samples
        let hits = sweep_targets(start, end, [(7, Vec2::new(160.0, 0.0), 45.0)]);
        assert_eq!(hits, vec![7]);
    }

    #[test]
    fn test_first_sample_hit_index() {
        let hit = first_sample_hit(Vec2::ZERO, Vec2::new(320.0, 0.0), Vec2::new(160.0, 0.0), 10.0);
        assert_eq!(hit, Some(10));
    }

    #[test]
    fn test_miss_beyond_reach() {
        let start = Vec2::ZERO;
        let end = Vec2::new(320.0, 0.0);
        assert!(!swept_hit(start, end, Vec2::new(160.0, 60.0), 45.0));
        assert!(!swept_hit(start, end, Vec2::new(400.0, 0.0), 45.0));
    }

    #[test]
    fn test_boundary_is_exclusive() {
        // Exactly hit_radius away from the endpoint sample is not a hit
        assert!(!swept_hit(Vec2::ZERO, Vec2::new(320.0, 0.0), Vec2::new(365.0, 0.0), 45.0));
        assert!(swept_hit(Vec2::ZERO, Vec2::new(320.0, 0.0), Vec2::new(364.0, 0.0), 45.0));
    }

    #[test]
    fn test_point_segment_distance() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!((point_segment_distance(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-5);
        assert!((point_segment_distance(Vec2::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-5);
        assert!((point_segment_distance(Vec2::new(1.0, 1.0), a, a) - 2f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_sampling_never_misses_what_segment_distance_allows() {
        // Sample spacing (16px) is well under 2 * reach, so anything this close hits
        let start = Vec2::new(-50.0, 20.0);
        let end = Vec2::new(270.0, 20.0);
        for x in (-40..260).step_by(7) {
            let target = Vec2::new(x as f32, 50.0);
            assert!(point_segment_distance(target, start, end) < 35.0);
            assert!(swept_hit(start, end, target, 45.0));
        }
    }
}
