use super::Point2;

/// Returns the minimum distance from point `p` to the line segment
/// from `a` to `b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let (closest, _) = closest_point_on_segment(p, a, b);
    (p - closest).norm()
}

/// Returns the closest point on segment `a`→`b` to point `p`, together
/// with the clamped parameter `t` in `[0, 1]` along the segment.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> (Point2, f64) {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (*a, 0.0);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (a + d * t, t)
}
