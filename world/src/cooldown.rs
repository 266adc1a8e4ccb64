//! Timestamp-based cooldowns for enemy revival and trap reactivation.

use std::time::Duration;

use maze_runner_core::Event;

use crate::entities::{Enemy, Trap};

/// Deadline after which a dead or inactive entity returns to service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    delay: Duration,
    until: Option<Duration>,
}

impl Cooldown {
    /// Creates an idle cooldown that lasts `delay` once started.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, until: None }
    }

    /// Starts the cooldown at `now`.
    pub fn start(&mut self, now: Duration) {
        self.until = Some(now.saturating_add(self.delay));
    }

    /// Timestamp at which the cooldown ends, if running.
    #[must_use]
    pub const fn until(&self) -> Option<Duration> {
        self.until
    }

    /// Reports whether the cooldown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.until.is_some()
    }

    /// Clears the deadline once `now` reaches it, reporting whether it did.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.until {
            Some(until) if now >= until => {
                self.until = None;
                true
            }
            _ => false,
        }
    }
}

/// Revives enemies and rearms traps whose cooldown elapsed by `now`.
pub(crate) fn process_expirations(
    enemies: &mut [Enemy],
    traps: &mut [Trap],
    now: Duration,
    out_events: &mut Vec<Event>,
) {
    for enemy in enemies.iter_mut() {
        if enemy.try_revive(now) {
            tracing::debug!(enemy = enemy.id().get(), ?now, "enemy revived");
            out_events.push(Event::EnemyRevived { enemy: enemy.id() });
        }
    }

    for trap in traps.iter_mut() {
        if trap.try_reactivate(now) {
            tracing::debug!(trap = trap.id().get(), ?now, "trap reactivated");
            out_events.push(Event::TrapReactivated { trap: trap.id() });
        }
    }
}
