//! Entity model: the player, patrolling enemies, traps and static fixtures.
//!
//! Every entity exposes the [`Body`] capability used by collision detection.
//! Entities with state machines also implement [`Collidable`], which reacts to
//! a contact according to the kind of the *other* entity. The detector itself
//! is symmetric; the reactions are not: a player touching an enemy loses a
//! heart while the enemy touching the player dies.

use std::time::Duration;

use maze_runner_core::{
    CellCoord, EnemyId, EnemySnapshot, EntityKind, FixtureSnapshot, PatrolAxis, PatrolDirection,
    PatrolRange, PlayerSnapshot, Position, Size, TrapId, TrapSnapshot, PLAYER_SIZE, TILE_SIZE,
};

use crate::cooldown::Cooldown;

/// Positioned, sized participant in collision detection.
pub trait Body {
    /// Kind used to dispatch collision reactions.
    fn kind(&self) -> EntityKind;

    /// Bottom-left corner in world units.
    fn position(&self) -> Position;

    /// Footprint in world units.
    fn size(&self) -> Size;
}

/// Entity whose state changes when something touches it.
pub trait Collidable: Body {
    /// Outcome reported back to the caller.
    type Reaction;

    /// Reacts to a contact with an entity of kind `other` at time `now`.
    fn on_collision(&mut self, other: EntityKind, now: Duration) -> Self::Reaction;
}

/// What a contact did to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerReaction {
    /// The player lost a heart and has `hearts` left.
    Damaged {
        /// Hearts remaining after the hit.
        hearts: u8,
    },
    /// The player picked up the key.
    KeyAcquired,
    /// The player reached the exit while holding the key.
    Escaped,
    /// Nothing changed.
    Unaffected,
}

/// The player character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    position: Position,
    full_hearts: u8,
    hearts: u8,
    alive: bool,
    has_key: bool,
    won: bool,
}

impl Player {
    /// Creates a fresh player at `position` with `hearts` hearts.
    #[must_use]
    pub const fn new(position: Position, hearts: u8) -> Self {
        Self {
            position,
            full_hearts: hearts,
            hearts,
            alive: true,
            has_key: false,
            won: false,
        }
    }

    /// Hearts left in the current life.
    #[must_use]
    pub const fn hearts(&self) -> u8 {
        self.hearts
    }

    /// Whether the player is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether the player carries the key.
    #[must_use]
    pub const fn has_key(&self) -> bool {
        self.has_key
    }

    /// Whether the player reached the exit with the key.
    #[must_use]
    pub const fn has_won(&self) -> bool {
        self.won
    }

    /// Restores hearts and clears the key and win flags.
    pub fn reset_life(&mut self) {
        self.hearts = self.full_hearts;
        self.alive = true;
        self.has_key = false;
        self.won = false;
    }

    /// Moves the player to `position`.
    pub fn place_at(&mut self, position: Position) {
        self.position = position;
    }

    /// Captures the player's state for queries.
    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            size: PLAYER_SIZE,
            hearts: self.hearts,
            alive: self.alive,
            has_key: self.has_key,
            won: self.won,
        }
    }

    fn take_hit(&mut self) -> PlayerReaction {
        if !self.alive {
            return PlayerReaction::Unaffected;
        }
        self.hearts = self.hearts.saturating_sub(1);
        if self.hearts == 0 {
            self.alive = false;
        }
        PlayerReaction::Damaged {
            hearts: self.hearts,
        }
    }
}

impl Body for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn position(&self) -> Position {
        self.position
    }

    fn size(&self) -> Size {
        PLAYER_SIZE
    }
}

impl Collidable for Player {
    type Reaction = PlayerReaction;

    fn on_collision(&mut self, other: EntityKind, _now: Duration) -> PlayerReaction {
        match other {
            EntityKind::Enemy | EntityKind::Trap => self.take_hit(),
            EntityKind::Key => {
                self.has_key = true;
                PlayerReaction::KeyAcquired
            }
            EntityKind::Exit if self.has_key => {
                self.won = true;
                PlayerReaction::Escaped
            }
            EntityKind::Exit | EntityKind::Entry | EntityKind::Wall | EntityKind::Player => {
                PlayerReaction::Unaffected
            }
        }
    }
}

/// Enemy patrolling back and forth along one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    id: EnemyId,
    position: Position,
    alive: bool,
    cooldown: Cooldown,
    patrol: PatrolRange,
    heading: PatrolDirection,
}

impl Enemy {
    /// Spawns an enemy on `cell`. Its patrol covers only the spawn cell
    /// until [`Enemy::assign_patrol`] is called.
    #[must_use]
    pub fn new(id: EnemyId, cell: CellCoord, cell_size: i32, cooldown: Duration) -> Self {
        Self {
            id,
            position: cell.origin(cell_size),
            alive: true,
            cooldown: Cooldown::new(cooldown),
            patrol: PatrolRange {
                axis: PatrolAxis::Vertical,
                min: cell.row(),
                max: cell.row(),
            },
            heading: PatrolDirection::Forward,
        }
    }

    /// Identifier of the enemy.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Whether the enemy is alive and patrolling.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Patrol span chosen at spawn.
    #[must_use]
    pub const fn patrol(&self) -> PatrolRange {
        self.patrol
    }

    /// Current heading along the patrol axis.
    #[must_use]
    pub const fn heading(&self) -> PatrolDirection {
        self.heading
    }

    /// Installs the patrol span discovered around the spawn cell.
    pub fn assign_patrol(&mut self, patrol: PatrolRange) {
        self.patrol = patrol;
    }

    /// Advances one step along the patrol axis, turning around at a bound.
    ///
    /// The position never leaves `[min, max]` scaled to world units; the
    /// heading flips on the tick the enemy reaches a bound.
    pub fn advance(&mut self, step: i32, cell_size: i32) {
        if !self.alive {
            return;
        }

        let low = i64::from(self.patrol.min) * i64::from(cell_size);
        let high = i64::from(self.patrol.max) * i64::from(cell_size);
        let current = match self.patrol.axis {
            PatrolAxis::Horizontal => i64::from(self.position.x()),
            PatrolAxis::Vertical => i64::from(self.position.y()),
        };

        let (next, turn_around) = match self.heading {
            PatrolDirection::Forward => {
                let next = (current + i64::from(step)).min(high);
                (next, next >= high)
            }
            PatrolDirection::Reverse => {
                let next = (current - i64::from(step)).max(low);
                (next, next <= low)
            }
        };

        let next = i32::try_from(next).unwrap_or(i32::MAX);
        self.position = match self.patrol.axis {
            PatrolAxis::Horizontal => Position::new(next, self.position.y()),
            PatrolAxis::Vertical => Position::new(self.position.x(), next),
        };
        if turn_around {
            self.heading = self.heading.inverted();
        }
    }

    /// Revives a dead enemy once its cooldown elapsed, reporting whether it did.
    pub fn try_revive(&mut self, now: Duration) -> bool {
        if self.alive || !self.cooldown.expire(now) {
            return false;
        }
        self.alive = true;
        true
    }

    /// Captures the enemy's state for queries.
    #[must_use]
    pub fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.position,
            size: TILE_SIZE,
            alive: self.alive,
            patrol: self.patrol,
            heading: self.heading,
            cooldown_until: self.cooldown.until(),
        }
    }
}

impl Body for Enemy {
    fn kind(&self) -> EntityKind {
        EntityKind::Enemy
    }

    fn position(&self) -> Position {
        self.position
    }

    fn size(&self) -> Size {
        TILE_SIZE
    }
}

impl Collidable for Enemy {
    /// `true` when the contact killed the enemy.
    type Reaction = bool;

    fn on_collision(&mut self, other: EntityKind, now: Duration) -> bool {
        if other != EntityKind::Player || !self.alive {
            return false;
        }
        self.alive = false;
        self.cooldown.start(now);
        true
    }
}

/// Trap that hurts the player and then rearms after a cooldown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trap {
    id: TrapId,
    position: Position,
    active: bool,
    cooldown: Cooldown,
}

impl Trap {
    /// Places an active trap on `cell`.
    #[must_use]
    pub fn new(id: TrapId, cell: CellCoord, cell_size: i32, cooldown: Duration) -> Self {
        Self {
            id,
            position: cell.origin(cell_size),
            active: true,
            cooldown: Cooldown::new(cooldown),
        }
    }

    /// Identifier of the trap.
    #[must_use]
    pub const fn id(&self) -> TrapId {
        self.id
    }

    /// Whether the trap currently damages the player.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Rearms an inactive trap once its cooldown elapsed, reporting whether it did.
    pub fn try_reactivate(&mut self, now: Duration) -> bool {
        if self.active || !self.cooldown.expire(now) {
            return false;
        }
        self.active = true;
        true
    }

    /// Captures the trap's state for queries.
    #[must_use]
    pub fn snapshot(&self) -> TrapSnapshot {
        TrapSnapshot {
            id: self.id,
            position: self.position,
            size: TILE_SIZE,
            active: self.active,
            cooldown_until: self.cooldown.until(),
        }
    }
}

impl Body for Trap {
    fn kind(&self) -> EntityKind {
        EntityKind::Trap
    }

    fn position(&self) -> Position {
        self.position
    }

    fn size(&self) -> Size {
        TILE_SIZE
    }
}

impl Collidable for Trap {
    /// `true` when the contact disarmed the trap.
    type Reaction = bool;

    fn on_collision(&mut self, other: EntityKind, now: Duration) -> bool {
        if other != EntityKind::Player || !self.active {
            return false;
        }
        self.active = false;
        self.cooldown.start(now);
        true
    }
}

/// Stateless tile entity: the entry, the exit or the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fixture {
    kind: EntityKind,
    position: Position,
}

impl Fixture {
    /// Places a fixture of `kind` on `cell`.
    #[must_use]
    pub fn new(kind: EntityKind, cell: CellCoord, cell_size: i32) -> Self {
        Self {
            kind,
            position: cell.origin(cell_size),
        }
    }

    /// Captures the fixture for queries.
    #[must_use]
    pub const fn snapshot(&self) -> FixtureSnapshot {
        FixtureSnapshot {
            kind: self.kind,
            position: self.position,
            size: TILE_SIZE,
        }
    }
}

impl Body for Fixture {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn position(&self) -> Position {
        self.position
    }

    fn size(&self) -> Size {
        TILE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(4000);

    fn horizontal_enemy(min: u32, max: u32) -> Enemy {
        let mut enemy = Enemy::new(EnemyId::new(0), CellCoord::new(min, 0), 16, COOLDOWN);
        enemy.assign_patrol(PatrolRange {
            axis: PatrolAxis::Horizontal,
            min,
            max,
        });
        enemy
    }

    #[test]
    fn player_loses_hearts_until_dead() {
        let mut player = Player::new(Position::default(), 2);

        assert_eq!(
            player.on_collision(EntityKind::Enemy, Duration::ZERO),
            PlayerReaction::Damaged { hearts: 1 }
        );
        assert!(player.is_alive());
        assert_eq!(
            player.on_collision(EntityKind::Trap, Duration::ZERO),
            PlayerReaction::Damaged { hearts: 0 }
        );
        assert!(!player.is_alive());
        assert_eq!(
            player.on_collision(EntityKind::Trap, Duration::ZERO),
            PlayerReaction::Unaffected
        );
        assert_eq!(player.hearts(), 0);

        player.reset_life();
        assert_eq!(player.hearts(), 2);
        assert!(player.is_alive());
    }

    #[test]
    fn exit_requires_the_key() {
        let mut player = Player::new(Position::default(), 4);
        assert_eq!(
            player.on_collision(EntityKind::Exit, Duration::ZERO),
            PlayerReaction::Unaffected
        );
        assert!(!player.has_won());

        assert_eq!(
            player.on_collision(EntityKind::Key, Duration::ZERO),
            PlayerReaction::KeyAcquired
        );
        assert_eq!(
            player.on_collision(EntityKind::Exit, Duration::ZERO),
            PlayerReaction::Escaped
        );
        assert!(player.has_won());
    }

    #[test]
    fn walls_and_entries_do_not_affect_player() {
        let mut player = Player::new(Position::default(), 4);
        for kind in [EntityKind::Wall, EntityKind::Entry, EntityKind::Player] {
            assert_eq!(
                player.on_collision(kind, Duration::ZERO),
                PlayerReaction::Unaffected
            );
        }
        assert_eq!(player.snapshot().hearts, 4);
    }

    #[test]
    fn enemy_dies_only_on_player_contact() {
        let mut enemy = horizontal_enemy(0, 3);
        assert!(!enemy.on_collision(EntityKind::Trap, Duration::ZERO));
        assert!(enemy.is_alive());

        assert!(enemy.on_collision(EntityKind::Player, Duration::from_millis(10)));
        assert!(!enemy.is_alive());
        assert!(!enemy.on_collision(EntityKind::Player, Duration::from_millis(20)));
        assert_eq!(
            enemy.snapshot().cooldown_until,
            Some(Duration::from_millis(4010))
        );

        assert!(!enemy.try_revive(Duration::from_millis(4009)));
        assert!(enemy.try_revive(Duration::from_millis(4010)));
        assert!(enemy.is_alive());
        assert_eq!(enemy.snapshot().cooldown_until, None);
    }

    #[test]
    fn enemy_turns_around_at_bounds() {
        let mut enemy = horizontal_enemy(1, 2);
        let mut xs = Vec::new();
        for _ in 0..40 {
            enemy.advance(1, 16);
            xs.push(enemy.position().x());
        }

        assert!(xs.iter().all(|x| (16..=32).contains(x)));
        assert_eq!(xs[15], 32, "reaches the upper bound after sixteen steps");
        assert_eq!(xs[16], 31, "turns around on the next tick");
        assert_eq!(xs[31], 16, "reaches the lower bound");
        assert_eq!(xs[32], 17);
    }

    #[test]
    fn single_cell_patrol_stays_put() {
        let mut enemy = horizontal_enemy(4, 4);
        for _ in 0..5 {
            enemy.advance(1, 16);
            assert_eq!(enemy.position(), Position::new(64, 0));
        }
    }

    #[test]
    fn dead_enemies_do_not_move() {
        let mut enemy = horizontal_enemy(0, 5);
        assert!(enemy.on_collision(EntityKind::Player, Duration::ZERO));
        enemy.advance(1, 16);
        assert_eq!(enemy.position(), Position::new(0, 0));
    }

    #[test]
    fn trap_rearms_after_cooldown() {
        let mut trap = Trap::new(TrapId::new(3), CellCoord::new(2, 2), 16, COOLDOWN);
        assert!(trap.on_collision(EntityKind::Player, Duration::ZERO));
        assert!(!trap.is_active());
        assert!(!trap.try_reactivate(Duration::from_millis(3999)));
        assert!(trap.try_reactivate(Duration::from_millis(4000)));
        assert!(trap.is_active());
    }

    #[test]
    fn fixtures_sit_on_their_cell() {
        let key = Fixture::new(EntityKind::Key, CellCoord::new(3, 1), 16);
        assert_eq!(key.kind(), EntityKind::Key);
        assert_eq!(key.position(), Position::new(48, 16));
        assert_eq!(key.snapshot().size, TILE_SIZE);
    }
}
