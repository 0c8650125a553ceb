use std::f64::consts::TAU;

use super::Vector2;

/// Returns the clockwise angle from `u` to `v`, wrapped to `[0, 2π)`.
///
/// This is the turn convention used by the room-cycle search and the
/// wall mitering: a small value means a tight counter-clockwise turn.
#[must_use]
pub fn clockwise_angle_2pi(u: &Vector2, v: &Vector2) -> f64 {
    let det = u.x * v.y - u.y * v.x;
    let dot = u.x * v.x + u.y * v.y;
    let mut theta = -det.atan2(dot);
    if theta < 0.0 {
        theta += TAU;
    }
    theta
}

/// Rotates a vector counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate_ccw(v: &Vector2, angle: f64) -> Vector2 {
    let (sn, cs) = angle.sin_cos();
    Vector2::new(v.x * cs - v.y * sn, v.x * sn + v.y * cs)
}
