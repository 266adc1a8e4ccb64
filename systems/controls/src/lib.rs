#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system that turns held direction keys into a movement intent.

use maze_runner_core::{Direction, Event, GameState, HeldDirections};

/// Resolves held keys into the single direction honoured each frame.
///
/// Only one direction is honoured per frame, chosen by the fixed priority
/// up, left, right, down. Intents are suppressed unless the world reported
/// that a level is running.
#[derive(Debug, Default)]
pub struct Controls {
    running: bool,
}

impl Controls {
    /// Consumes world events and resolves the intent for the next tick.
    pub fn handle(&mut self, events: &[Event], held: HeldDirections) -> Option<Direction> {
        for event in events {
            if let Event::GameStateChanged { state } = event {
                self.running = *state == GameState::Running;
            }
        }

        if !self.running {
            return None;
        }
        resolve(held)
    }
}

/// Picks the highest-priority held direction.
#[must_use]
pub fn resolve(held: HeldDirections) -> Option<Direction> {
    Direction::PRIORITY
        .into_iter()
        .find(|direction| held.is_held(*direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_up_left_right_down() {
        let all = HeldDirections {
            up: true,
            left: true,
            right: true,
            down: true,
        };
        assert_eq!(resolve(all), Some(Direction::Up));

        let without_up = HeldDirections { up: false, ..all };
        assert_eq!(resolve(without_up), Some(Direction::Left));

        let right_down = HeldDirections {
            right: true,
            down: true,
            ..HeldDirections::default()
        };
        assert_eq!(resolve(right_down), Some(Direction::Right));
        assert_eq!(resolve(HeldDirections::only(Direction::Down)), Some(Direction::Down));
        assert_eq!(resolve(HeldDirections::default()), None);
    }
}
