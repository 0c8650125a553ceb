use crate::error::{GeometryError, Result};
use crate::math::angle_2d::{clockwise_angle_2pi, rotate_ccw};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a half-edge in the floor plan.
    pub struct EdgeId;
}

/// Caps the miter length at `offset / MIN_HALF_ANGLE_SIN` (20x the wall
/// half-thickness) when two walls meet at a near-folded corner, where the
/// exact formula would divide by a vanishing sine.
const MIN_HALF_ANGLE_SIN: f64 = 0.05;

/// One oriented rendered face (front or back) of a wall, linked into a
/// room's circular boundary ring, or standalone when the wall is orphaned.
///
/// Half-edges are recreated on every update and never mutated in place;
/// the mitered geometry is computed once the ring is linked and cached
/// here for the render layer to read.
#[derive(Debug, Clone)]
pub struct HalfEdgeData {
    /// The wall this half-edge belongs to.
    pub wall: WallId,
    /// Front edges run start→end along the wall, back edges end→start.
    pub front: bool,
    /// Offset from the centerline, `thickness / 2`.
    pub offset: f64,
    pub height: f64,
    /// Previous edge in the room ring, `None` for orphan edges.
    pub prev: Option<EdgeId>,
    /// Next edge in the room ring, `None` for orphan edges.
    pub next: Option<EdgeId>,
    pub interior_start: Point2,
    pub interior_end: Point2,
    pub exterior_start: Point2,
    pub exterior_end: Point2,
}

impl HalfEdgeData {
    /// Creates an unlinked half-edge; geometry is filled in by the
    /// per-update miter pass.
    #[must_use]
    pub fn new(wall: WallId, front: bool, offset: f64, height: f64) -> Self {
        Self {
            wall,
            front,
            offset,
            height,
            prev: None,
            next: None,
            interior_start: Point2::origin(),
            interior_end: Point2::origin(),
            exterior_start: Point2::origin(),
            exterior_end: Point2::origin(),
        }
    }

    /// The four mitered points of the wall segment's footprint:
    /// `[interior_start, interior_end, exterior_end, exterior_start]`.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.interior_start,
            self.interior_end,
            self.exterior_end,
            self.exterior_start,
        ]
    }
}

/// Computes the mitered offset vector at the corner shared by two wall
/// segments.
///
/// `prev` is the incoming segment ending at the corner, `next` the
/// outgoing segment starting there. At an open or orphan end one of them
/// is absent and is replaced by a synthetic linear extension of the
/// other, which degenerates the miter into a plain perpendicular offset.
///
/// The miter direction is the outgoing direction rotated counter-
/// clockwise by half the turn angle; its length is `offset / sin(θ/2)`,
/// with the sine clamped away from zero for near-folded corners.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if the outgoing segment has zero
/// length, or [`GeometryError::ZeroVector`] if both segments are absent.
pub fn half_angle_vector(
    prev: Option<(Point2, Point2)>,
    next: Option<(Point2, Point2)>,
    offset: f64,
) -> Result<Vector2> {
    let (v1_start, v1_end, v2_start, v2_end) = match (prev, next) {
        (Some((a, b)), Some((c, d))) => (a, b, c, d),
        // Synthetic extension before the outgoing segment.
        (None, Some((c, d))) => (c - (d - c), c, c, d),
        // Synthetic extension after the incoming segment.
        (Some((a, b)), None) => (a, b, b, b + (b - a)),
        (None, None) => return Err(GeometryError::ZeroVector.into()),
    };

    // Turn angle at the shared corner, between the back-incoming and the
    // forward-outgoing vectors. π for a straight-through wall.
    let theta = clockwise_angle_2pi(&(v1_start - v1_end), &(v2_end - v1_end));
    let sn = (theta / 2.0).sin().max(MIN_HALF_ANGLE_SIN);

    let dir = v2_end - v2_start;
    let mag = dir.norm();
    if mag < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "zero-length wall segment at ({}, {})",
            v2_start.x, v2_start.y
        ))
        .into());
    }

    let bisector = rotate_ccw(&dir, theta / 2.0);
    Ok(bisector * (offset / sn / mag))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> (Point2, Point2) {
        (Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn straight_through_is_left_normal() {
        // Collinear segments: miter degenerates to the left normal.
        let v = half_angle_vector(Some(seg(0.0, 0.0, 1.0, 0.0)), Some(seg(1.0, 0.0, 2.0, 0.0)), 0.05)
            .unwrap();
        assert!(v.x.abs() < TOL, "v={v:?}");
        assert!((v.y - 0.05).abs() < TOL, "v={v:?}");
    }

    #[test]
    fn open_end_uses_synthetic_extension() {
        let with_prev =
            half_angle_vector(Some(seg(0.0, 0.0, 1.0, 0.0)), Some(seg(1.0, 0.0, 2.0, 0.0)), 0.05)
                .unwrap();
        let without_prev = half_angle_vector(None, Some(seg(1.0, 0.0, 2.0, 0.0)), 0.05).unwrap();
        assert!((with_prev - without_prev).norm() < TOL);

        let without_next = half_angle_vector(Some(seg(0.0, 0.0, 1.0, 0.0)), None, 0.05).unwrap();
        assert!((with_prev - without_next).norm() < TOL);
    }

    #[test]
    fn right_angle_ccw_corner() {
        // CCW square corner at (1,0): incoming along +x, outgoing along +y.
        // The interior bisector points up-left, scaled by offset·√2.
        let v = half_angle_vector(Some(seg(0.0, 0.0, 1.0, 0.0)), Some(seg(1.0, 0.0, 1.0, 1.0)), 0.1)
            .unwrap();
        assert!((v.x + 0.1).abs() < TOL, "v={v:?}");
        assert!((v.y - 0.1).abs() < TOL, "v={v:?}");
    }

    #[test]
    fn folded_corner_is_clamped() {
        // Outgoing doubles back over the incoming segment: θ ≈ 0. The
        // unclamped formula would divide by sin(0).
        let v = half_angle_vector(Some(seg(0.0, 0.0, 1.0, 0.0)), Some(seg(1.0, 0.0, 0.0, 0.0)), 0.1)
            .unwrap();
        assert!(v.x.is_finite() && v.y.is_finite());
        assert!(v.norm() <= 0.1 / MIN_HALF_ANGLE_SIN + TOL);
    }

    #[test]
    fn zero_length_segment_errors() {
        let r = half_angle_vector(None, Some(seg(1.0, 1.0, 1.0, 1.0)), 0.1);
        assert!(r.is_err());
    }

    #[test]
    fn corners_order() {
        let mut e = HalfEdgeData::new(WallId::default(), true, 0.05, 2.5);
        e.interior_start = Point2::new(0.0, 0.0);
        e.interior_end = Point2::new(1.0, 0.0);
        e.exterior_end = Point2::new(1.0, -0.1);
        e.exterior_start = Point2::new(0.0, -0.1);
        let c = e.corners();
        assert_eq!(c[0], e.interior_start);
        assert_eq!(c[1], e.interior_end);
        assert_eq!(c[2], e.exterior_end);
        assert_eq!(c[3], e.exterior_start);
    }
}
