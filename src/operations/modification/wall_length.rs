use crate::error::{GeometryError, OperationError, Result};
use crate::math::TOLERANCE;
use crate::plan::{FloorPlan, PlanEvent, WallId};

/// Rescales a wall to a target length around an anchor: the locked
/// corner when exactly one corner is locked, otherwise the wall
/// midpoint. A wall with both corners locked is left untouched.
pub struct SetWallLength {
    wall: WallId,
    length: f64,
}

impl SetWallLength {
    /// Creates a new `SetWallLength` operation.
    #[must_use]
    pub fn new(wall: WallId, length: f64) -> Self {
        Self { wall, length }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the target length is not positive, the wall
    /// has degenerate (zero) length, or the terminal update fails.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<()> {
        if self.length < TOLERANCE {
            return Err(
                OperationError::InvalidInput("wall length must be positive".into()).into(),
            );
        }

        let (start, end, start_locked, end_locked) = {
            let wall = plan.wall(self.wall)?;
            let start_locked = plan.corner(wall.start)?.locked;
            let end_locked = plan.corner(wall.end)?.locked;
            (wall.start, wall.end, start_locked, end_locked)
        };
        if start_locked && end_locked {
            return Ok(());
        }

        let (start_pos, end_pos) = plan.wall_span(self.wall)?;
        let span = end_pos - start_pos;
        let current = span.norm();
        if current < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "cannot rescale a zero-length wall".into(),
            )
            .into());
        }
        let direction = span / current;

        if start_locked {
            plan.corner_mut(end)?.position = start_pos + direction * self.length;
        } else if end_locked {
            plan.corner_mut(start)?.position = end_pos - direction * self.length;
        } else {
            let midpoint = start_pos + span / 2.0;
            plan.corner_mut(start)?.position = midpoint - direction * (self.length / 2.0);
            plan.corner_mut(end)?.position = midpoint + direction * (self.length / 2.0);
        }

        plan.emit(&PlanEvent::CornerMoved(start));
        plan.emit(&PlanEvent::CornerMoved(end));
        plan.emit(&PlanEvent::WallMoved(self.wall));
        plan.update()
    }
}
