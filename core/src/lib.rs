#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Runner engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots such as [`Scene`], and respond with plain data.

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of a single cell measured in world units.
pub const CELL_SIZE: i32 = 16;

/// Delay before a killed enemy revives or a triggered trap rearms.
pub const COOLDOWN: Duration = Duration::from_millis(4000);

/// Largest per-axis distance, in cells, at which two entities touch.
pub const COLLISION_TOLERANCE: f64 = 0.6;

/// Hearts granted to the player on every fresh life.
pub const PLAYER_HEARTS: u8 = 4;

/// Footprint of the player sprite in world units.
pub const PLAYER_SIZE: Size = Size::new(12, 16);

/// Footprint shared by every tile-bound entity in world units.
pub const TILE_SIZE: Size = Size::new(16, 16);

/// Mapping from cell coordinate to the raw cell-type code read from a map.
///
/// Codes outside the known [`CellKind`] range are preserved so that the map
/// builder can decide to ignore them.
pub type CellMap = BTreeMap<CellCoord, u32>;

/// Top-level state of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// No ticks are processed; either no level is loaded or play is suspended.
    Paused,
    /// Ticks advance the level.
    Running,
    /// The player reached the exit with the key. Terminal for the level.
    Won,
    /// The player ran out of hearts. Terminal for the level.
    Lost,
}

impl GameState {
    /// Reports whether the state ends the current level.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Discards the current level and builds a new one from the provided cells.
    LoadLevel {
        /// Cell-type codes keyed by coordinate.
        cells: CellMap,
    },
    /// Suspends a running level.
    Pause,
    /// Continues a paused level that has not ended.
    Resume,
    /// Advances the simulation by one frame.
    Tick {
        /// Timestamp of the frame measured from the frame clock's epoch.
        now: Duration,
        /// Direction the player intends to move this frame, if any.
        input: Option<Direction>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a level was built from a cell map.
    LevelLoaded {
        /// Cell the player spawned on.
        spawn: CellCoord,
        /// Number of enemies created.
        enemies: usize,
        /// Number of traps created.
        traps: usize,
        /// Whether the map defined a key.
        has_key: bool,
        /// Whether the map defined an exit.
        has_exit: bool,
    },
    /// Announces that the top-level state machine entered a new state.
    GameStateChanged {
        /// State that became active.
        state: GameState,
    },
    /// Indicates that a running tick was processed.
    TimeAdvanced {
        /// Timestamp carried by the tick.
        now: Duration,
    },
    /// The player touched an enemy, which died and started its cooldown.
    EnemyKilled {
        /// Identifier of the enemy.
        enemy: EnemyId,
    },
    /// An enemy finished its cooldown and resumed patrolling.
    EnemyRevived {
        /// Identifier of the enemy.
        enemy: EnemyId,
    },
    /// The player stepped on an active trap, which became inactive.
    TrapTriggered {
        /// Identifier of the trap.
        trap: TrapId,
    },
    /// A trap finished its cooldown and became active again.
    TrapReactivated {
        /// Identifier of the trap.
        trap: TrapId,
    },
    /// The player lost a heart.
    PlayerDamaged {
        /// Hearts left after the hit.
        hearts: u8,
    },
    /// The player moved one step.
    PlayerMoved {
        /// Position before the step.
        from: Position,
        /// Position after the step.
        to: Position,
    },
    /// The requested step would have entered a wall.
    PlayerBlocked {
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// The player picked up the key.
    KeyCollected,
    /// The player reached the exit while holding the key.
    LevelWon,
    /// The player ran out of hearts.
    LevelLost,
}

/// Cardinal movement directions. Rows grow upward, so `Up` increases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    Up,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing row indices.
    Down,
}

impl Direction {
    /// Order in which held directions are honoured when several are pressed.
    pub const PRIORITY: [Self; 4] = [Self::Up, Self::Left, Self::Right, Self::Down];

    /// Unit offset `(dx, dy)` of the direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Down => (0, -1),
        }
    }
}

/// Set of direction keys held down during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldDirections {
    /// Whether the up key is held.
    pub up: bool,
    /// Whether the left key is held.
    pub left: bool,
    /// Whether the right key is held.
    pub right: bool,
    /// Whether the down key is held.
    pub down: bool,
}

impl HeldDirections {
    /// Creates an input set with exactly one direction held.
    #[must_use]
    pub fn only(direction: Direction) -> Self {
        let mut held = Self::default();
        held.press(direction);
        held
    }

    /// Reports whether the provided direction is held.
    #[must_use]
    pub const fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Down => self.down,
        }
    }

    /// Marks the provided direction as held.
    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
            Direction::Down => self.down = true,
        }
    }

    /// Reports whether no direction is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.up || self.left || self.right || self.down)
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a trap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrapId(u32);

impl TrapId {
    /// Creates a new trap identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Position of the cell's bottom-left corner, if it fits in world units.
    #[must_use]
    pub fn checked_origin(self, cell_size: i32) -> Option<Position> {
        let x = i32::try_from(self.column).ok()?.checked_mul(cell_size)?;
        let y = i32::try_from(self.row).ok()?.checked_mul(cell_size)?;
        Some(Position::new(x, y))
    }

    /// Position of the cell's bottom-left corner in world units.
    ///
    /// Saturates at `i32::MAX` on either axis. Levels only hold cells for
    /// which [`CellCoord::checked_origin`] succeeds.
    #[must_use]
    pub fn origin(self, cell_size: i32) -> Position {
        let column = i32::try_from(self.column).unwrap_or(i32::MAX);
        let row = i32::try_from(self.row).unwrap_or(i32::MAX);
        Position::new(
            column.saturating_mul(cell_size),
            row.saturating_mul(cell_size),
        )
    }
}

/// Continuous position measured in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Position expressed in fractional cells.
    #[must_use]
    pub fn in_cells(self, cell_size: i32) -> (f64, f64) {
        let size = f64::from(cell_size);
        (f64::from(self.x) / size, f64::from(self.y) / size)
    }

    /// Position shifted `distance` world units toward `direction`.
    #[must_use]
    pub const fn stepped(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx.saturating_mul(distance)),
            y: self.y.saturating_add(dy.saturating_mul(distance)),
        }
    }
}

/// Width and height of an entity in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    /// Creates a new size descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Cell types understood by the map builder, keyed by their map code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Structural wall.
    Wall,
    /// Player spawn tile.
    Entry,
    /// Level exit.
    Exit,
    /// Damaging trap.
    Trap,
    /// Patrolling enemy.
    Enemy,
    /// Key that unlocks the exit.
    Key,
}

impl CellKind {
    /// Decodes a map code, returning `None` for unknown codes.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Wall),
            1 => Some(Self::Entry),
            2 => Some(Self::Exit),
            3 => Some(Self::Trap),
            4 => Some(Self::Enemy),
            5 => Some(Self::Key),
            _ => None,
        }
    }

    /// Map code of the cell type.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Wall => 0,
            Self::Entry => 1,
            Self::Exit => 2,
            Self::Trap => 3,
            Self::Enemy => 4,
            Self::Key => 5,
        }
    }

    /// Whether cells of this type block movement in the wall grid.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Wall | Self::Entry | Self::Exit)
    }
}

/// Kinds of entity taking part in collision dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player.
    Player,
    /// A patrolling enemy.
    Enemy,
    /// A trap.
    Trap,
    /// The key.
    Key,
    /// The exit.
    Exit,
    /// The entry tile.
    Entry,
    /// A structural wall.
    Wall,
}

/// Axis along which an enemy patrols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatrolAxis {
    /// Back and forth along a row.
    Horizontal,
    /// Back and forth along a column.
    Vertical,
}

/// Heading of an enemy along its patrol axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatrolDirection {
    /// Toward the maximum bound.
    Forward,
    /// Toward the minimum bound.
    Reverse,
}

impl PatrolDirection {
    /// The opposite heading.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Free span discovered around an enemy's spawn cell, in cell indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatrolRange {
    /// Axis the enemy patrols along.
    pub axis: PatrolAxis,
    /// Lowest reachable cell index along the axis.
    pub min: u32,
    /// Highest reachable cell index along the axis.
    pub max: u32,
}

impl PatrolRange {
    /// Number of cells covered by the range.
    ///
    /// A range whose `min` exceeds its `max` still counts its own cell.
    #[must_use]
    pub const fn span(&self) -> u32 {
        self.max.saturating_sub(self.min).saturating_add(1)
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Current position in world units.
    pub position: Position,
    /// Footprint in world units.
    pub size: Size,
    /// Hearts left in the current life.
    pub hearts: u8,
    /// Whether the player is alive.
    pub alive: bool,
    /// Whether the player carries the key.
    pub has_key: bool,
    /// Whether the player reached the exit with the key.
    pub won: bool,
}

/// Immutable representation of an enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Current position in world units.
    pub position: Position,
    /// Footprint in world units.
    pub size: Size,
    /// Whether the enemy is alive and patrolling.
    pub alive: bool,
    /// Patrol span chosen at spawn.
    pub patrol: PatrolRange,
    /// Current heading.
    pub heading: PatrolDirection,
    /// Timestamp at which a dead enemy revives.
    pub cooldown_until: Option<Duration>,
}

/// Immutable representation of a trap used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrapSnapshot {
    /// Identifier of the trap.
    pub id: TrapId,
    /// Position in world units.
    pub position: Position,
    /// Footprint in world units.
    pub size: Size,
    /// Whether the trap currently damages the player.
    pub active: bool,
    /// Timestamp at which an inactive trap rearms.
    pub cooldown_until: Option<Duration>,
}

/// Immutable representation of a stateless tile entity (entry, exit, key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixtureSnapshot {
    /// Kind of fixture.
    pub kind: EntityKind,
    /// Position in world units.
    pub position: Position,
    /// Footprint in world units.
    pub size: Size,
}

/// Everything a presentation collaborator needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Current top-level state.
    pub state: GameState,
    /// Side length of a cell in world units.
    pub cell_size: i32,
    /// Cells blocked in the wall grid, by column, then row.
    pub walls: Vec<CellCoord>,
    /// The player.
    pub player: PlayerSnapshot,
    /// Enemies ordered by identifier.
    pub enemies: Vec<EnemySnapshot>,
    /// Traps ordered by identifier.
    pub traps: Vec<TrapSnapshot>,
    /// Entry tile, if the map defined one.
    pub entry: Option<FixtureSnapshot>,
    /// Exit tile, if the map defined one.
    pub exit: Option<FixtureSnapshot>,
    /// Key, until collected.
    pub key: Option<FixtureSnapshot>,
}

/// Tunable constants of the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Side length of a cell in world units.
    pub cell_size: i32,
    /// Enemy revival and trap reactivation delay in milliseconds.
    pub cooldown_millis: u64,
    /// Per-axis collision threshold measured in cells.
    pub collision_tolerance: f64,
    /// Hearts granted on a fresh life.
    pub player_hearts: u8,
    /// World units the player moves per honoured input.
    pub player_step: i32,
    /// World units an enemy advances per tick.
    pub enemy_step: i32,
}

impl SimulationConfig {
    /// Cooldown shared by enemies and traps.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_millis)
    }

    /// Checks that every constant lies in its usable range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if !self.collision_tolerance.is_finite() || self.collision_tolerance < 0.0 {
            return Err(ConfigError::Tolerance(self.collision_tolerance));
        }
        if self.player_hearts == 0 {
            return Err(ConfigError::NoHearts);
        }
        if self.player_step <= 0 {
            return Err(ConfigError::Step("player_step", self.player_step));
        }
        if self.enemy_step <= 0 {
            return Err(ConfigError::Step("enemy_step", self.enemy_step));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            cooldown_millis: 4000,
            collision_tolerance: COLLISION_TOLERANCE,
            player_hearts: PLAYER_HEARTS,
            player_step: 1,
            enemy_step: 1,
        }
    }
}

/// Reasons a [`SimulationConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Cells must have a positive size.
    #[error("cell_size must be positive, got {0}")]
    CellSize(i32),
    /// The collision tolerance must be a finite, non-negative number.
    #[error("collision_tolerance must be finite and non-negative, got {0}")]
    Tolerance(f64),
    /// The player needs at least one heart.
    #[error("player_hearts must be at least 1")]
    NoHearts,
    /// Movement steps must be positive.
    #[error("{0} must be positive, got {1}")]
    Step(&'static str, i32),
}
