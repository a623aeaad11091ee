//! Planar geometry helpers.
//!
//! The game is top-down: positions live in the XY plane and every orientation is a rotation
//! about +Z. An entity's "forward" is its local +X axis.

use bevy::prelude::*;

/// Rotation that points local +X along `dir`. `None` for a (near) zero vector.
#[inline]
pub fn facing(dir: Vec2) -> Option<Quat> {
    dir.try_normalize().map(|d| Quat::from_rotation_z(d.to_angle()))
}

/// Planar forward axis of a rotation.
#[inline]
pub fn forward(rotation: Quat) -> Vec2 {
    (rotation * Vec3::X).truncate().normalize_or(Vec2::X)
}

/// Turn `current` toward `desired` by a time-proportional slerp.
///
/// `rate * dt` is the interpolation fraction, clamped to `[0, 1]`: the turn is bounded per
/// frame and a zero rate never turns.
#[inline]
pub fn turn_toward(current: Quat, desired: Quat, rate: f32, dt: f32) -> Quat {
    let t = (rate * dt).clamp(0.0, 1.0);
    current.slerp(desired, t).normalize()
}

/// Offset of a point on a circle of `radius` at `angle_deg` (0° = +X, counter-clockwise).
#[inline]
pub fn orbit_offset(angle_deg: f32, radius: f32) -> Vec2 {
    Vec2::from_angle(angle_deg.to_radians()) * radius
}

/// Offset of slot `index` out of `count` spread over a half circle, lifted by `height`.
///
/// Angles run from -90° in equal steps of `180° / max(count - 1, 1)`.
pub fn arc_offset(index: usize, count: usize, radius: f32, height: f32) -> Vec2 {
    let step = 180.0 / (count.saturating_sub(1).max(1)) as f32;
    let angle = -90.0 + index as f32 * step;
    orbit_offset(angle, radius) + Vec2::new(0.0, height)
}

/// Shortest distance from `point` to the segment `a..b`.
pub fn segment_distance(a: Vec2, b: Vec2, point: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a.distance(point);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t).distance(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn facing_points_forward_along_direction() {
        let rot = facing(Vec2::new(0.0, 3.0)).unwrap();
        let f = forward(rot);
        assert!((f - Vec2::Y).length() < EPS, "got {f:?}");
        assert!(facing(Vec2::ZERO).is_none());
    }

    #[test]
    fn turn_toward_is_bounded_and_converges() {
        let from = Quat::IDENTITY;
        let to = facing(Vec2::Y).unwrap();

        let partial = turn_toward(from, to, 5.0, 0.05);
        let angle_partial = from.angle_between(partial);
        let angle_full = from.angle_between(to);
        assert!(angle_partial > 0.0 && angle_partial < angle_full);

        let snapped = turn_toward(from, to, 5.0, 10.0);
        assert!(snapped.angle_between(to) < EPS);

        let frozen = turn_toward(from, to, 0.0, 1.0);
        assert!(frozen.angle_between(from) < EPS);
    }

    #[test]
    fn orbit_offset_quarter_turns() {
        assert!((orbit_offset(0.0, 2.0) - Vec2::new(2.0, 0.0)).length() < EPS);
        assert!((orbit_offset(90.0, 2.0) - Vec2::new(0.0, 2.0)).length() < EPS);
        assert!((orbit_offset(180.0, 2.0) - Vec2::new(-2.0, 0.0)).length() < EPS);
        assert!((orbit_offset(270.0, 2.0) - Vec2::new(0.0, -2.0)).length() < EPS);
    }

    #[test]
    fn arc_offset_spans_half_circle_above_anchor() {
        // Single weapon sits at -90°.
        assert!((arc_offset(0, 1, 1.5, 2.5) - Vec2::new(0.0, 1.0)).length() < EPS);
        // Three weapons: -90°, 0°, 90°.
        assert!((arc_offset(0, 3, 1.5, 2.5) - Vec2::new(0.0, 1.0)).length() < EPS);
        assert!((arc_offset(1, 3, 1.5, 2.5) - Vec2::new(1.5, 2.5)).length() < EPS);
        assert!((arc_offset(2, 3, 1.5, 2.5) - Vec2::new(0.0, 4.0)).length() < EPS);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!((segment_distance(a, b, Vec2::new(5.0, 3.0)) - 3.0).abs() < EPS);
        assert!((segment_distance(a, b, Vec2::new(13.0, 4.0)) - 5.0).abs() < EPS);
        assert!((segment_distance(a, a, Vec2::new(0.0, 2.0)) - 2.0).abs() < EPS);
    }
}
