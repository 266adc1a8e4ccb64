//! Sparse wall occupancy over the extent of the loaded map.

use std::{collections::BTreeSet, ops::Bound};

use maze_runner_core::{CellCoord, PatrolAxis, Position};

/// Set of wall cells inside a rectangular extent.
///
/// Cells outside the extent, including negative coordinates, always read as
/// walls so that movement and patrol discovery never leave the map. Only the
/// walls themselves are stored, so a map with a few far apart records stays
/// small.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallGrid {
    columns: u32,
    rows: u32,
    // Walls keyed as (column, row) and as (row, column).
    by_column: BTreeSet<(u32, u32)>,
    by_row: BTreeSet<(u32, u32)>,
}

impl WallGrid {
    /// Creates an empty grid of the provided extent.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Creates an empty grid covering the bounding box of the provided cells.
    #[must_use]
    pub fn covering(cells: impl IntoIterator<Item = CellCoord>) -> Self {
        let (columns, rows) = cells.into_iter().fold((0, 0), |(columns, rows), cell| {
            (
                columns.max(cell.column().saturating_add(1)),
                rows.max(cell.row().saturating_add(1)),
            )
        });
        Self::new(columns, rows)
    }

    /// Reports whether the cell lies inside the extent.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell blocks movement.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        !self.contains(cell) || self.by_column.contains(&(cell.column(), cell.row()))
    }

    /// Reports whether the cell at signed coordinates blocks movement.
    #[must_use]
    pub fn blocks(&self, column: i64, row: i64) -> bool {
        match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => self.is_wall(CellCoord::new(column, row)),
            _ => true,
        }
    }

    /// Reports whether `position` lies inside the extent in world units.
    #[must_use]
    pub fn encloses(&self, position: Position, cell_size: i32) -> bool {
        let size = i64::from(cell_size);
        let (x, y) = (i64::from(position.x()), i64::from(position.y()));
        x >= 0 && y >= 0 && x < i64::from(self.columns) * size && y < i64::from(self.rows) * size
    }

    /// Marks the cell as a wall. Cells outside the grid are already walls.
    pub fn set_wall(&mut self, cell: CellCoord) {
        if self.contains(cell) {
            let _ = self.by_column.insert((cell.column(), cell.row()));
            let _ = self.by_row.insert((cell.row(), cell.column()));
        }
    }

    /// Provides the dimensions of the grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Enumerates the wall cells inside the grid by column, then row.
    pub fn walls(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.by_column
            .iter()
            .map(|&(column, row)| CellCoord::new(column, row))
    }

    /// Free run of cells through `cell` along `axis`, as inclusive bounds.
    ///
    /// The run stops before the nearest wall on either side, or at the edge
    /// of the extent. `cell` must be a free cell inside the extent.
    #[must_use]
    pub fn free_run(&self, cell: CellCoord, axis: PatrolAxis) -> (u32, u32) {
        let (walls, line, along, limit) = match axis {
            PatrolAxis::Horizontal => (&self.by_row, cell.row(), cell.column(), self.columns),
            PatrolAxis::Vertical => (&self.by_column, cell.column(), cell.row(), self.rows),
        };
        let on_line = |&&(other, _): &&(u32, u32)| other == line;

        let min = walls
            .range(..(line, along))
            .next_back()
            .filter(on_line)
            .map_or(0, |&(_, wall)| wall.saturating_add(1));
        let max = walls
            .range((Bound::Excluded((line, along)), Bound::Unbounded))
            .next()
            .filter(on_line)
            .map_or(limit.saturating_sub(1), |&(_, wall)| wall.saturating_sub(1));
        (min, max)
    }
}

/// Cell whose centre is nearest to the provided position, as signed indices.
///
/// Halfway positions round toward the higher cell.
#[must_use]
pub fn nearest_cell(position: Position, cell_size: i32) -> (i64, i64) {
    let size = i64::from(cell_size.max(1));
    let half = size / 2;
    (
        (i64::from(position.x()) + half).div_euclid(size),
        (i64::from(position.y()) + half).div_euclid(size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_are_walls() {
        let grid = WallGrid::new(3, 2);
        assert!(!grid.is_wall(CellCoord::new(2, 1)));
        assert!(grid.is_wall(CellCoord::new(3, 0)));
        assert!(grid.is_wall(CellCoord::new(0, 2)));
        assert!(grid.blocks(-1, 0));
        assert!(grid.blocks(0, -1));
        assert!(!grid.blocks(1, 1));
    }

    #[test]
    fn set_wall_is_idempotent() {
        let mut once = WallGrid::new(4, 4);
        once.set_wall(CellCoord::new(1, 2));

        let mut twice = WallGrid::new(4, 4);
        twice.set_wall(CellCoord::new(1, 2));
        twice.set_wall(CellCoord::new(1, 2));

        assert_eq!(once, twice);
        assert_eq!(twice.walls().collect::<Vec<_>>(), vec![CellCoord::new(1, 2)]);
    }

    #[test]
    fn set_wall_outside_grid_is_ignored() {
        let mut grid = WallGrid::new(2, 2);
        grid.set_wall(CellCoord::new(5, 5));
        assert_eq!(grid.walls().count(), 0);
        assert!(grid.is_wall(CellCoord::new(5, 5)));
    }

    #[test]
    fn covering_spans_the_bounding_box() {
        let cells = [CellCoord::new(4, 1), CellCoord::new(0, 6)];
        assert_eq!(WallGrid::covering(cells).dimensions(), (5, 7));
        assert_eq!(WallGrid::covering(Vec::<CellCoord>::new()).dimensions(), (0, 0));
    }

    #[test]
    fn huge_extent_stores_only_walls() {
        let far = CellCoord::new(u32::MAX - 1, u32::MAX - 1);
        let mut grid = WallGrid::covering([CellCoord::new(0, 0), far]);
        grid.set_wall(far);

        assert_eq!(grid.dimensions(), (u32::MAX, u32::MAX));
        assert!(grid.is_wall(far));
        assert!(!grid.is_wall(CellCoord::new(7, 9)));
        assert_eq!(grid.walls().collect::<Vec<_>>(), vec![far]);
    }

    #[test]
    fn walls_are_listed_by_column_then_row() {
        let mut grid = WallGrid::new(3, 3);
        grid.set_wall(CellCoord::new(2, 0));
        grid.set_wall(CellCoord::new(0, 2));
        grid.set_wall(CellCoord::new(0, 1));
        assert_eq!(
            grid.walls().collect::<Vec<_>>(),
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(0, 2),
                CellCoord::new(2, 0),
            ]
        );
    }

    #[test]
    fn free_run_stops_before_walls_and_edges() {
        let mut grid = WallGrid::new(10, 6);
        grid.set_wall(CellCoord::new(2, 3));
        grid.set_wall(CellCoord::new(8, 3));
        grid.set_wall(CellCoord::new(5, 1));
        grid.set_wall(CellCoord::new(4, 4));

        let cell = CellCoord::new(5, 3);
        assert_eq!(grid.free_run(cell, PatrolAxis::Horizontal), (3, 7));
        assert_eq!(grid.free_run(cell, PatrolAxis::Vertical), (2, 5));
        assert_eq!(
            grid.free_run(CellCoord::new(0, 0), PatrolAxis::Horizontal),
            (0, 9)
        );
    }

    #[test]
    fn encloses_covers_the_extent_in_world_units() {
        let grid = WallGrid::new(2, 3);
        assert!(grid.encloses(Position::new(0, 0), 16));
        assert!(grid.encloses(Position::new(31, 47), 16));
        assert!(!grid.encloses(Position::new(32, 0), 16));
        assert!(!grid.encloses(Position::new(0, 48), 16));
        assert!(!grid.encloses(Position::new(-1, 0), 16));
        assert!(!grid.encloses(Position::new(0, -8), 16));
    }

    #[test]
    fn nearest_cell_rounds_halfway_up() {
        assert_eq!(nearest_cell(Position::new(0, 0), 16), (0, 0));
        assert_eq!(nearest_cell(Position::new(7, 8), 16), (0, 1));
        assert_eq!(nearest_cell(Position::new(23, 24), 16), (1, 2));
        assert_eq!(nearest_cell(Position::new(-8, -9), 16), (0, -1));
    }
}
