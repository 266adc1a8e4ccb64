use std::time::Duration;

use maze_runner_core::{Command, Direction, Event, GameState, HeldDirections};
use maze_runner_system_controls::Controls;
use maze_runner_world::{self as world, map, query, World};

#[test]
fn intents_are_suppressed_until_a_level_runs() {
    let mut controls = Controls::default();
    let held = HeldDirections::only(Direction::Right);

    assert_eq!(controls.handle(&[], held), None);
    assert_eq!(
        controls.handle(
            &[Event::GameStateChanged {
                state: GameState::Running,
            }],
            held,
        ),
        Some(Direction::Right)
    );
    assert_eq!(controls.handle(&[], held), Some(Direction::Right));
    assert_eq!(
        controls.handle(
            &[Event::GameStateChanged {
                state: GameState::Paused,
            }],
            held,
        ),
        None
    );
}

#[test]
fn controls_drive_the_player_through_the_world() {
    let mut world = World::new();
    let mut controls = Controls::default();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadLevel {
            cells: map::parse_map("0,0=1\n3,3=0").cells,
        },
        &mut events,
    );

    let held = HeldDirections {
        up: true,
        right: true,
        ..HeldDirections::default()
    };
    for frame in 0..5 {
        let input = controls.handle(&events, held);
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                now: Duration::from_millis(frame * 16),
                input,
            },
            &mut events,
        );
    }

    let player = query::player(&world);
    assert_eq!(player.position.x(), 0, "right loses to up");
    assert_eq!(player.position.y(), 5);
}
