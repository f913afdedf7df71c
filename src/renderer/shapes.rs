//! Shape generation for 2D primitives
//!
//! Everything is emitted as a flat triangle list.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::Vertex;

fn push_tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

fn push_quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    push_tri(out, a, b, c, color);
    push_tri(out, c, b, d, color);
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, radius, radius, 0.0, color, segments)
}

/// Filled ellipse rotated by `rotation`
pub fn ellipse(
    center: Vec2,
    radius_x: f32,
    radius_y: f32,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let rot = Vec2::from_angle(rotation);
    let point = |i: u32| {
        let theta = (i as f32 / segments as f32) * TAU;
        center + rot.rotate(Vec2::new(radius_x * theta.cos(), radius_y * theta.sin()))
    };

    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        // Triangle from center to edge
        push_tri(&mut vertices, center, point(i), point(i + 1), color);
    }
    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    arc(center, inner_radius, outer_radius, 0.0, TAU, color, segments)
}

/// Thick arc band from `start` sweeping `span` radians clockwise on screen
pub fn arc(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    span: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    if span <= 0.0 || outer_radius <= inner_radius {
        return Vec::new();
    }
    // Keep the density of a full ring
    let num_segments = ((segments as f32 * span / TAU).ceil() as u32).max(2);
    let mut vertices = Vec::with_capacity((num_segments * 6) as usize);

    for i in 0..num_segments {
        let theta1 = start + (i as f32 / num_segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / num_segments as f32) * span;
        let dir1 = Vec2::from_angle(theta1);
        let dir2 = Vec2::from_angle(theta2);

        // Two triangles per segment
        push_tri(
            &mut vertices,
            center + dir1 * inner_radius,
            center + dir1 * outer_radius,
            center + dir2 * inner_radius,
            color,
        );
        push_tri(
            &mut vertices,
            center + dir2 * inner_radius,
            center + dir1 * outer_radius,
            center + dir2 * outer_radius,
            color,
        );
    }

    vertices
}

/// Progress arc starting at 12 o'clock (`progress` in 0..=1)
pub fn progress_arc(
    center: Vec2,
    radius: f32,
    width: f32,
    progress: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let half = width / 2.0;
    arc(
        center,
        radius - half,
        radius + half,
        -PI / 2.0,
        TAU * progress.clamp(0.0, 1.0),
        color,
        segments,
    )
}

/// Straight stroke of the given width
pub fn stroke(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width / 2.0);
    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, from + perp, from - perp, to + perp, to - perp, color);
    vertices
}

/// Stroke broken into `dash`-long pieces separated by `gap`
pub fn dashed_stroke(from: Vec2, to: Vec2, width: f32, dash: f32, gap: f32, color: [f32; 4]) -> Vec<Vertex> {
    let length = from.distance(to);
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO || dash <= 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::new();
    let mut t = 0.0;
    while t < length {
        let end = (t + dash).min(length);
        vertices.extend(stroke(from + dir * t, from + dir * end, width, color));
        t = end + gap.max(0.0);
    }
    vertices
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        min,
        Vec2::new(max.x, min.y),
        Vec2::new(min.x, max.y),
        max,
        color,
    );
    vertices
}

/// Irregular ink blot: a polygon whose radius wobbles per lobe.
/// The wobble is a hash of `seed`, so the same blot draws the same every frame.
pub fn blot(center: Vec2, size: f32, seed: f32, color: [f32; 4], lobes: u32) -> Vec<Vertex> {
    let lobes = lobes.max(3);
    let point = |i: u32| {
        let k = i % lobes;
        let angle = (k as f32 / lobes as f32) * TAU;
        let noise = ((k as f32 * 12.9898 + seed * 78.233).sin() * 43_758.547).fract().abs();
        let radius = size * (0.7 + noise * 0.6);
        center + Vec2::from_angle(angle + seed) * radius
    };
    let mut vertices = Vec::with_capacity((lobes * 3) as usize);
    for i in 0..lobes {
        push_tri(&mut vertices, center, point(i), point(i + 1), color);
    }
    vertices
}
