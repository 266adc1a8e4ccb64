//! Fixed-step driver that feeds scripted input into the world.

use std::{fmt, fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use maze_runner_core::{CellMap, Command, Event, GameState, PlayerSnapshot, SimulationConfig};
use maze_runner_system_audio_cues::{AudioCues, Cue};
use maze_runner_system_controls::Controls;
use maze_runner_system_hud::{self as hud, HeartSlot, HudView};
use maze_runner_world::{self as world, map, query, World};

use crate::{config::RunnerSettings, script::Script};

/// Reads a map file, logging every record that had to be skipped.
pub(crate) fn read_map(path: &Path) -> Result<(CellMap, usize)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read map at {}", path.display()))?;
    let parsed = map::parse_map(&text);
    if !parsed.skipped.is_empty() {
        tracing::warn!(
            skipped = parsed.skipped.len(),
            map = %path.display(),
            "map contained malformed records"
        );
    }
    Ok((parsed.cells, parsed.skipped.len()))
}

/// Counts of notable events seen during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub(crate) hits: u32,
    pub(crate) enemies_killed: u32,
    pub(crate) traps_triggered: u32,
    pub(crate) blocked_moves: u32,
}

impl Tally {
    fn record(&mut self, event: &Event) {
        match event {
            Event::PlayerDamaged { .. } => self.hits += 1,
            Event::EnemyKilled { .. } => self.enemies_killed += 1,
            Event::TrapTriggered { .. } => self.traps_triggered += 1,
            Event::PlayerBlocked { .. } => self.blocked_moves += 1,
            _ => {}
        }
    }
}

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RunSummary {
    pub(crate) state: GameState,
    pub(crate) ticks: u64,
    pub(crate) elapsed: Duration,
    pub(crate) player: PlayerSnapshot,
    pub(crate) hud: HudView,
    pub(crate) tally: Tally,
    pub(crate) cues: Vec<Cue>,
}

/// Loads `cells` into a fresh world and plays `script` until the level ends,
/// the script runs out or the tick limit is hit.
pub(crate) fn run(
    cells: CellMap,
    config: SimulationConfig,
    settings: RunnerSettings,
    script: &Script,
) -> Result<RunSummary> {
    let capacity = config.player_hearts;
    let mut world = World::with_config(config).context("invalid simulation constants")?;
    let mut controls = Controls::default();
    let mut audio = AudioCues::default();
    let mut tally = Tally::default();
    let mut cues = Vec::new();
    let mut pending = Vec::new();

    world::apply(&mut world, Command::LoadLevel { cells }, &mut pending);
    observe(&pending, &mut audio, &mut cues, &mut tally);

    let frame = Duration::from_millis(settings.frame_millis);
    let mut now = Duration::ZERO;
    let mut ticks = 0;
    let limit = usize::try_from(settings.max_ticks).unwrap_or(usize::MAX);

    for held in script.frames().take(limit) {
        if query::state(&world).is_terminal() {
            break;
        }
        let input = controls.handle(&pending, held);
        pending.clear();
        world::apply(&mut world, Command::Tick { now, input }, &mut pending);
        observe(&pending, &mut audio, &mut cues, &mut tally);

        ticks += 1;
        now = now.saturating_add(frame);
    }

    let state = query::state(&world);
    let player = query::player(&world);
    tracing::info!(?state, ticks, "run finished");

    Ok(RunSummary {
        state,
        ticks,
        elapsed: now,
        hud: hud::view(&player, capacity, state),
        player,
        tally,
        cues,
    })
}

fn observe(events: &[Event], audio: &mut AudioCues, cues: &mut Vec<Cue>, tally: &mut Tally) {
    for event in events {
        tracing::trace!(?event, "world event");
        tally.record(event);
    }
    audio.handle(events, cues);
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hearts: String = self
            .hud
            .hearts
            .iter()
            .map(|slot| match slot {
                HeartSlot::Full => '#',
                HeartSlot::Empty => '-',
            })
            .collect();

        writeln!(f, "state:    {:?}", self.state)?;
        writeln!(
            f,
            "ticks:    {} ({} ms)",
            self.ticks,
            self.elapsed.as_millis()
        )?;
        writeln!(
            f,
            "player:   ({}, {}) hearts [{hearts}]",
            self.player.position.x(),
            self.player.position.y()
        )?;
        writeln!(f, "key:      {}", self.hud.key.label().unwrap_or("held"))?;
        writeln!(
            f,
            "events:   {} hits, {} enemies killed, {} traps triggered, {} blocked moves",
            self.tally.hits,
            self.tally.enemies_killed,
            self.tally.traps_triggered,
            self.tally.blocked_moves
        )?;
        write!(f, "cues:     {:?}", self.cues)
    }
}
