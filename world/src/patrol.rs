//! Patrol range discovery for freshly spawned enemies.

use maze_runner_core::{CellCoord, PatrolAxis, PatrolRange};

use crate::walls::WallGrid;

/// Finds the longest free straight line through `spawn`.
///
/// Looks up the nearest wall or grid boundary on both sides of the spawn cell
/// along each axis. The horizontal span is chosen only when it is strictly
/// longer than the vertical one.
#[must_use]
pub fn discover(grid: &WallGrid, spawn: CellCoord) -> PatrolRange {
    let (left, right) = grid.free_run(spawn, PatrolAxis::Horizontal);
    let (down, up) = grid.free_run(spawn, PatrolAxis::Vertical);

    let horizontal = PatrolRange {
        axis: PatrolAxis::Horizontal,
        min: left,
        max: right,
    };
    let vertical = PatrolRange {
        axis: PatrolAxis::Vertical,
        min: down,
        max: up,
    };

    if horizontal.span() > vertical.span() {
        horizontal
    } else {
        vertical
    }
}
