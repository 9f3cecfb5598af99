//! Triangle-list generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::color::Color;
use super::vertex::Vertex;

/// Segments used for a full circle of the given radius
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(12, 48)
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: Color) {
    radial_gradient(out, center, radius, color, color);
}

/// Filled circle fading from `inner` at the center to `outer` at the rim
pub fn radial_gradient(out: &mut Vec<Vertex>, center: Vec2, radius: f32, inner: Color, outer: Color) {
    if radius <= 0.0 {
        return;
    }
    let segments = circle_segments(radius);
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        out.push(Vertex::at(center, inner));
        out.push(Vertex::at(
            center + radius * Vec2::new(theta1.cos(), theta1.sin()),
            outer,
        ));
        out.push(Vertex::at(
            center + radius * Vec2::new(theta2.cos(), theta2.sin()),
            outer,
        ));
    }
}

/// Quad from four corners in order (two triangles: a-b-c, a-c-d)
pub fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: Color) {
    let [a, b, c, d] = corners;
    out.extend_from_slice(&[
        Vertex::at(a, color),
        Vertex::at(b, color),
        Vertex::at(c, color),
        Vertex::at(a, color),
        Vertex::at(c, color),
        Vertex::at(d, color),
    ]);
}

/// Axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: Color) {
    quad(
        out,
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ],
        color,
    );
}

/// Rectangle of `size` with its first corner at `offset`, in a frame
/// rotated by `angle` around `center`
pub fn rotated_rect(
    out: &mut Vec<Vertex>,
    center: Vec2,
    offset: Vec2,
    size: Vec2,
    angle: f32,
    color: Color,
) {
    let rot = Vec2::new(angle.cos(), angle.sin());
    let corners = [
        offset,
        offset + Vec2::new(size.x, 0.0),
        offset + size,
        offset + Vec2::new(0.0, size.y),
    ]
    .map(|p| center + rot.rotate(p));
    quad(out, corners, color);
}

/// Segment from `p0` to `p1` whose half width goes from `w0` to `w1`
pub fn tapered_segment(out: &mut Vec<Vertex>, p0: Vec2, p1: Vec2, w0: f32, w1: f32, color: Color) {
    let dir = (p1 - p0).normalize_or_zero();
    let dir = if dir == Vec2::ZERO { Vec2::X } else { dir };
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x);
    quad(
        out,
        [p0 + perp * w0, p1 + perp * w1, p1 - perp * w1, p0 - perp * w0],
        color,
    );
}
