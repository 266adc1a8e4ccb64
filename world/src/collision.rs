//! Proximity-based collision detection.

use crate::entities::Body;

/// Reports contact between bodies whose positions are close on both axes.
///
/// Positions are compared in cell units: two bodies touch when the absolute
/// difference of both their x and y coordinates is at most the tolerance.
/// Footprints are ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionDetector {
    cell_size: i32,
    tolerance: f64,
}

impl CollisionDetector {
    /// Creates a detector for the provided cell size and tolerance in cells.
    #[must_use]
    pub const fn new(cell_size: i32, tolerance: f64) -> Self {
        Self {
            cell_size,
            tolerance,
        }
    }

    /// Reports whether `a` and `b` touch. Symmetric in its arguments.
    #[must_use]
    pub fn collides<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: Body + ?Sized,
        B: Body + ?Sized,
    {
        let (ax, ay) = a.position().in_cells(self.cell_size);
        let (bx, by) = b.position().in_cells(self.cell_size);
        (ax - bx).abs() <= self.tolerance && (ay - by).abs() <= self.tolerance
    }
}
