use std::time::Duration;

use maze_runner_core::{Command, Direction};
use maze_runner_system_hud::{view, HeartSlot, KeyStatus};
use maze_runner_world::{self as world, map, query, World};

#[test]
fn hud_follows_trap_damage_and_key_pickup() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadLevel {
            cells: map::parse_map("0,0=1\n1,0=3\n3,0=5\n5,0=2").cells,
        },
        &mut events,
    );
    let capacity = query::config(&world).player_hearts;

    let fresh = view(&query::player(&world), capacity, query::state(&world));
    assert_eq!(fresh.hearts, vec![HeartSlot::Full; 4]);
    assert_eq!(fresh.key, KeyStatus::Missing);

    for frame in 0..45 {
        world::apply(
            &mut world,
            Command::Tick {
                now: Duration::from_millis(frame * 16),
                input: Some(Direction::Right),
            },
            &mut events,
        );
    }

    let hud = view(&query::player(&world), capacity, query::state(&world));
    assert_eq!(
        hud.hearts,
        vec![
            HeartSlot::Full,
            HeartSlot::Full,
            HeartSlot::Full,
            HeartSlot::Empty,
        ]
    );
    assert_eq!(hud.key, KeyStatus::Held);
    assert!(hud.visible);
}
