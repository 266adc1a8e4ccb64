#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating world events into requests for an audio player.

use maze_runner_core::{Event, GameState};

/// Sound requests understood by the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Start the looping in-level background track.
    BackgroundMusic,
    /// Stop the in-level background track.
    StopBackgroundMusic,
    /// Start the looping menu track.
    MenuMusic,
    /// Stop the menu track.
    StopMenuMusic,
    /// The player was hurt.
    Hit,
    /// The player picked up the key.
    KeyPickup,
    /// The level was won.
    Victory,
    /// The level was lost.
    GameOver,
}

/// Tracks which music loops are playing and emits cues for new events.
#[derive(Debug, Default)]
pub struct AudioCues {
    background_playing: bool,
    menu_playing: bool,
}

impl AudioCues {
    /// Consumes world events and appends the cues they trigger, in order.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Cue>) {
        for event in events {
            match event {
                Event::LevelLoaded { .. } => {
                    if !self.background_playing {
                        self.background_playing = true;
                        out.push(Cue::BackgroundMusic);
                    }
                }
                Event::GameStateChanged { state } => self.on_state(*state, out),
                Event::PlayerDamaged { .. } => out.push(Cue::Hit),
                Event::KeyCollected => out.push(Cue::KeyPickup),
                Event::LevelWon => {
                    self.stop_background(out);
                    out.push(Cue::Victory);
                }
                Event::LevelLost => {
                    self.stop_background(out);
                    out.push(Cue::GameOver);
                }
                _ => {}
            }
        }
    }

    fn on_state(&mut self, state: GameState, out: &mut Vec<Cue>) {
        match state {
            GameState::Paused if !self.menu_playing => {
                self.menu_playing = true;
                out.push(Cue::MenuMusic);
            }
            GameState::Running if self.menu_playing => {
                self.menu_playing = false;
                out.push(Cue::StopMenuMusic);
            }
            _ => {}
        }
    }

    fn stop_background(&mut self, out: &mut Vec<Cue>) {
        if self.background_playing {
            self.background_playing = false;
            out.push(Cue::StopBackgroundMusic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_and_key_map_to_cues() {
        let mut cues = AudioCues::default();
        let mut out = Vec::new();
        cues.handle(
            &[
                Event::PlayerDamaged { hearts: 3 },
                Event::KeyCollected,
                Event::PlayerDamaged { hearts: 2 },
            ],
            &mut out,
        );
        assert_eq!(out, vec![Cue::Hit, Cue::KeyPickup, Cue::Hit]);
    }

    #[test]
    fn pause_plays_menu_music_once() {
        let mut cues = AudioCues::default();
        let mut out = Vec::new();
        let paused = Event::GameStateChanged {
            state: GameState::Paused,
        };
        let running = Event::GameStateChanged {
            state: GameState::Running,
        };
        cues.handle(&[paused.clone(), paused, running.clone(), running], &mut out);
        assert_eq!(out, vec![Cue::MenuMusic, Cue::StopMenuMusic]);
    }
}
