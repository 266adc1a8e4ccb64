//! Map records and the builder that turns them into a playable level.
//!
//! Maps are plain text with one `x,y=type` record per line. [`parse_map`]
//! reads them into a [`CellMap`], skipping malformed lines, and
//! [`MapBuilder`] converts the cell map into the wall grid and entity set of
//! a [`Level`].

use std::time::Duration;

use maze_runner_core::{
    CellCoord, CellKind, CellMap, EnemyId, EntityKind, SimulationConfig, TrapId,
};
use thiserror::Error;

use crate::{
    entities::{Enemy, Fixture, Trap},
    patrol,
    walls::WallGrid,
};

/// Reasons a single map record is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapParseError {
    /// The record lacks the `=` or `,` separator.
    #[error("expected `x,y=type`, found `{0}`")]
    MissingSeparator(String),
    /// A coordinate is not a non-negative integer.
    #[error("invalid coordinate `{0}`")]
    BadCoordinate(String),
    /// The cell type is not a non-negative integer.
    #[error("invalid cell type `{0}`")]
    BadCellType(String),
}

/// Outcome of parsing a whole map text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedMap {
    /// Cells read from well-formed records. Later duplicates win.
    pub cells: CellMap,
    /// Rejected records as `(line number, reason)`, numbered from one.
    pub skipped: Vec<(usize, MapParseError)>,
}

/// Parses a single `x,y=type` record.
pub fn parse_record(record: &str) -> Result<(CellCoord, u32), MapParseError> {
    let record = record.trim();
    let (coordinates, code) = record
        .split_once('=')
        .ok_or_else(|| MapParseError::MissingSeparator(record.to_owned()))?;
    let (column, row) = coordinates
        .split_once(',')
        .ok_or_else(|| MapParseError::MissingSeparator(record.to_owned()))?;

    let column = parse_coordinate(column)?;
    let row = parse_coordinate(row)?;
    let code = code
        .trim()
        .parse::<u32>()
        .map_err(|_| MapParseError::BadCellType(code.trim().to_owned()))?;

    Ok((CellCoord::new(column, row), code))
}

fn parse_coordinate(text: &str) -> Result<u32, MapParseError> {
    let text = text.trim();
    text.parse::<u32>()
        .map_err(|_| MapParseError::BadCoordinate(text.to_owned()))
}

/// Parses every record of a map text, skipping blank and malformed lines.
pub fn parse_map(text: &str) -> ParsedMap {
    let mut parsed = ParsedMap::default();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        match parse_record(line) {
            Ok((cell, code)) => {
                let _ = parsed.cells.insert(cell, code);
            }
            Err(error) => {
                tracing::warn!(line = line_number, %error, "skipping map record");
                parsed.skipped.push((line_number, error));
            }
        }
    }
    parsed
}

/// Wall grid and entities built from one map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Level {
    /// Blocked cells.
    pub grid: WallGrid,
    /// Cell the player spawns on.
    pub spawn: CellCoord,
    /// Entry tile, if the map defined one.
    pub entry: Option<Fixture>,
    /// Exit tile, if the map defined one.
    pub exit: Option<Fixture>,
    /// The key, until the player collects it.
    pub key: Option<Fixture>,
    /// Enemies in identifier order.
    pub enemies: Vec<Enemy>,
    /// Traps in identifier order.
    pub traps: Vec<Trap>,
}

/// Converts cell maps into levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapBuilder {
    cell_size: i32,
    cooldown: Duration,
}

impl MapBuilder {
    /// Creates a builder using the cell size and cooldown of `config`.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            cell_size: config.cell_size,
            cooldown: config.cooldown(),
        }
    }

    /// Builds a level from `cells`, visiting them by column, then row.
    ///
    /// Walls, the entry and the exit block movement. Unknown codes are
    /// ignored. When several entries, exits or keys exist the last one
    /// visited wins. Enemy patrol ranges are discovered once every cell has
    /// been placed. Cells too far from the origin to be positioned in world
    /// units are skipped and take no part in the grid extent.
    #[must_use]
    pub fn build(&self, cells: &CellMap) -> Level {
        let placeable: Vec<(CellCoord, u32)> = cells
            .iter()
            .map(|(&cell, &code)| (cell, code))
            .filter(|&(cell, code)| self.is_placeable(cell, code))
            .collect();

        let mut level = Level {
            grid: WallGrid::covering(placeable.iter().map(|&(cell, _)| cell)),
            ..Level::default()
        };
        let mut entry_cell = None;
        let mut enemy_cells = Vec::new();

        for (cell, code) in placeable {
            let Some(kind) = CellKind::from_code(code) else {
                tracing::debug!(?cell, code, "ignoring unknown cell type");
                continue;
            };
            if kind.blocks_movement() {
                level.grid.set_wall(cell);
            }
            match kind {
                CellKind::Wall => {}
                CellKind::Entry => {
                    entry_cell = Some(cell);
                    level.entry = Some(self.fixture(EntityKind::Entry, cell));
                }
                CellKind::Exit => level.exit = Some(self.fixture(EntityKind::Exit, cell)),
                CellKind::Key => level.key = Some(self.fixture(EntityKind::Key, cell)),
                CellKind::Trap => {
                    let id = TrapId::new(next_id(level.traps.len()));
                    level
                        .traps
                        .push(Trap::new(id, cell, self.cell_size, self.cooldown));
                }
                CellKind::Enemy => enemy_cells.push(cell),
            }
        }

        level.spawn = entry_cell.unwrap_or_else(|| {
            tracing::warn!("map has no entry cell, spawning at the origin");
            CellCoord::default()
        });

        level.enemies = enemy_cells
            .into_iter()
            .enumerate()
            .map(|(index, cell)| {
                let mut enemy =
                    Enemy::new(EnemyId::new(next_id(index)), cell, self.cell_size, self.cooldown);
                enemy.assign_patrol(patrol::discover(&level.grid, cell));
                enemy
            })
            .collect();

        level
    }

    fn is_placeable(&self, cell: CellCoord, code: u32) -> bool {
        let placeable = cell.checked_origin(self.cell_size).is_some();
        if !placeable {
            tracing::warn!(?cell, code, "skipping cell outside the world bounds");
        }
        placeable
    }

    fn fixture(&self, kind: EntityKind, cell: CellCoord) -> Fixture {
        Fixture::new(kind, cell, self.cell_size)
    }
}

fn next_id(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
