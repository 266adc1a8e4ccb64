#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Runner.
//!
//! The [`World`] owns the wall grid, the player and every entity of the
//! loaded level. All mutations go through [`apply`], which executes one
//! [`Command`] and appends the resulting [`Event`] values. Read access goes
//! through the [`query`] module.

pub mod collision;
pub mod cooldown;
pub mod entities;
pub mod map;
pub mod patrol;
pub mod walls;

use std::time::Duration;

use maze_runner_core::{
    CellMap, Command, ConfigError, Direction, EntityKind, Event, GameState, SimulationConfig,
};

use crate::{
    collision::CollisionDetector,
    entities::{Body, Collidable, Player, PlayerReaction},
    map::{Level, MapBuilder},
    walls::nearest_cell,
};

/// Represents the authoritative Maze Runner world state.
#[derive(Debug)]
pub struct World {
    config: SimulationConfig,
    builder: MapBuilder,
    detector: CollisionDetector,
    state: GameState,
    level: Level,
    level_loaded: bool,
    player: Player,
}

impl World {
    /// Creates a paused world with no level, using the default constants.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(SimulationConfig::default())
    }

    /// Creates a paused world with no level, using the provided constants.
    pub fn with_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SimulationConfig) -> Self {
        Self {
            builder: MapBuilder::new(&config),
            detector: CollisionDetector::new(config.cell_size, config.collision_tolerance),
            state: GameState::Paused,
            level: Level::default(),
            level_loaded: false,
            player: Player::new(Default::default(), config.player_hearts),
            config,
        }
    }

    fn set_state(&mut self, state: GameState, out_events: &mut Vec<Event>) {
        if self.state == state {
            return;
        }
        self.state = state;
        out_events.push(Event::GameStateChanged { state });
    }

    fn load_level(&mut self, cells: &CellMap, out_events: &mut Vec<Event>) {
        let level = self.builder.build(cells);
        self.player = Player::new(
            level.spawn.origin(self.config.cell_size),
            self.config.player_hearts,
        );

        tracing::info!(
            spawn = ?level.spawn,
            enemies = level.enemies.len(),
            traps = level.traps.len(),
            "level loaded"
        );
        out_events.push(Event::LevelLoaded {
            spawn: level.spawn,
            enemies: level.enemies.len(),
            traps: level.traps.len(),
            has_key: level.key.is_some(),
            has_exit: level.exit.is_some(),
        });

        self.level = level;
        self.level_loaded = true;
        self.set_state(GameState::Running, out_events);
    }

    fn tick(&mut self, now: Duration, input: Option<Direction>, out_events: &mut Vec<Event>) {
        if self.state != GameState::Running {
            return;
        }
        out_events.push(Event::TimeAdvanced { now });

        self.advance_enemies();
        self.resolve_enemy_contacts(now, out_events);
        self.resolve_trap_contacts(now, out_events);
        self.resolve_objectives(now, out_events);
        if let Some(direction) = input {
            self.move_player(direction, out_events);
        }
        cooldown::process_expirations(
            &mut self.level.enemies,
            &mut self.level.traps,
            now,
            out_events,
        );
        self.evaluate_outcome(out_events);
    }

    fn advance_enemies(&mut self) {
        let step = self.config.enemy_step;
        let cell_size = self.config.cell_size;
        for enemy in self.level.enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
            enemy.advance(step, cell_size);
        }
    }

    fn resolve_enemy_contacts(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        let detector = self.detector;
        for enemy in self.level.enemies.iter_mut() {
            if !enemy.is_alive()
                || !self.player.is_alive()
                || !detector.collides(&self.player, &*enemy)
            {
                continue;
            }

            if let PlayerReaction::Damaged { hearts } =
                self.player.on_collision(EntityKind::Enemy, now)
            {
                out_events.push(Event::PlayerDamaged { hearts });
            }
            if enemy.on_collision(EntityKind::Player, now) {
                tracing::debug!(enemy = enemy.id().get(), ?now, "enemy killed");
                out_events.push(Event::EnemyKilled { enemy: enemy.id() });
            }
        }
    }

    fn resolve_trap_contacts(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        let detector = self.detector;
        for trap in self.level.traps.iter_mut() {
            if !trap.is_active() || !detector.collides(&self.player, &*trap) {
                continue;
            }

            if let PlayerReaction::Damaged { hearts } =
                self.player.on_collision(EntityKind::Trap, now)
            {
                out_events.push(Event::PlayerDamaged { hearts });
            }
            if trap.on_collision(EntityKind::Player, now) {
                tracing::debug!(trap = trap.id().get(), ?now, "trap triggered");
                out_events.push(Event::TrapTriggered { trap: trap.id() });
            }
        }
    }

    fn resolve_objectives(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        if let Some(key) = self.level.key {
            if self.detector.collides(&self.player, &key)
                && self.player.on_collision(key.kind(), now) == PlayerReaction::KeyAcquired
            {
                tracing::debug!(?now, "key collected");
                self.level.key = None;
                out_events.push(Event::KeyCollected);
            }
        } else if let Some(exit) = self.level.exit {
            if self.detector.collides(&self.player, &exit)
                && self.player.on_collision(exit.kind(), now) == PlayerReaction::Escaped
            {
                tracing::debug!(?now, "exit reached with the key");
            }
        }
    }

    /// Steps the player unless the destination leaves the grid or enters a
    /// new cell that is blocked. Moving within the current cell is allowed.
    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if !self.player.is_alive() {
            return;
        }

        let grid = &self.level.grid;
        let cell_size = self.config.cell_size;
        let from = self.player.position();
        let to = from.stepped(direction, self.config.player_step);
        let current = nearest_cell(from, cell_size);
        let (column, row) = nearest_cell(to, cell_size);

        let leaves_grid = !grid.encloses(to, cell_size);
        if leaves_grid || ((column, row) != current && grid.blocks(column, row)) {
            out_events.push(Event::PlayerBlocked { direction });
            return;
        }

        self.player.place_at(to);
        out_events.push(Event::PlayerMoved { from, to });
    }

    fn evaluate_outcome(&mut self, out_events: &mut Vec<Event>) {
        let (state, event) = if !self.player.is_alive() {
            (GameState::Lost, Event::LevelLost)
        } else if self.player.has_won() {
            (GameState::Won, Event::LevelWon)
        } else {
            return;
        };

        tracing::info!(?state, "level finished");
        out_events.push(event);
        self.set_state(state, out_events);
        self.clear_level();
    }

    fn clear_level(&mut self) {
        self.level = Level::default();
        self.level_loaded = false;
        self.player.reset_life();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { cells } => world.load_level(&cells, out_events),
        Command::Pause => {
            if world.state == GameState::Running {
                world.set_state(GameState::Paused, out_events);
            }
        }
        Command::Resume => {
            if world.state == GameState::Paused && world.level_loaded {
                world.set_state(GameState::Running, out_events);
            }
        }
        Command::Tick { now, input } => world.tick(now, input, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_runner_core::{
        EnemySnapshot, GameState, PlayerSnapshot, Scene, SimulationConfig, TrapSnapshot,
    };

    use super::World;
    use crate::walls::WallGrid;

    /// Current top-level state.
    #[must_use]
    pub fn state(world: &World) -> GameState {
        world.state
    }

    /// Reports whether a level is loaded and has not ended.
    #[must_use]
    pub fn level_loaded(world: &World) -> bool {
        world.level_loaded
    }

    /// Constants the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &SimulationConfig {
        &world.config
    }

    /// Provides read-only access to the wall grid of the loaded level.
    #[must_use]
    pub fn wall_grid(world: &World) -> &WallGrid {
        &world.level.grid
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures every enemy in identifier order.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemySnapshot> {
        world.level.enemies.iter().map(|enemy| enemy.snapshot()).collect()
    }

    /// Captures every trap in identifier order.
    #[must_use]
    pub fn traps(world: &World) -> Vec<TrapSnapshot> {
        world.level.traps.iter().map(|trap| trap.snapshot()).collect()
    }

    /// Captures everything a presentation collaborator needs for one frame.
    #[must_use]
    pub fn scene(world: &World) -> Scene {
        let level = &world.level;
        Scene {
            state: world.state,
            cell_size: world.config.cell_size,
            walls: level.grid.walls().collect(),
            player: world.player.snapshot(),
            enemies: enemies(world),
            traps: traps(world),
            entry: level.entry.map(|entry| entry.snapshot()),
            exit: level.exit.map(|exit| exit.snapshot()),
            key: level.key.map(|key| key.snapshot()),
        }
    }
}
