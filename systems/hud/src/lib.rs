#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure heads-up display system deriving heart slots and key status.

use maze_runner_core::{GameState, PlayerSnapshot};

/// Text shown while the player has not found the key.
pub const NO_KEY_LABEL: &str = "YOU HAVE NO KEY!";

/// One heart frame in the heart bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeartSlot {
    /// A heart still available in this life.
    Full,
    /// A heart already lost.
    Empty,
}

/// Key indicator shown next to the heart bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyStatus {
    /// The player carries the key; draw the key icon.
    Held,
    /// The player has not collected the key yet.
    Missing,
}

impl KeyStatus {
    /// Text label for the status, if one is displayed.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Held => None,
            Self::Missing => Some(NO_KEY_LABEL),
        }
    }
}

/// Everything the presentation layer needs to draw the HUD.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudView {
    /// Heart frames, full hearts first.
    pub hearts: Vec<HeartSlot>,
    /// Key indicator.
    pub key: KeyStatus,
    /// Whether the HUD should be drawn at all.
    pub visible: bool,
}

/// Builds the HUD for the current player state.
///
/// `capacity` is the number of hearts of a fresh life. The HUD is hidden
/// whenever no level is running.
#[must_use]
pub fn view(player: &PlayerSnapshot, capacity: u8, state: GameState) -> HudView {
    let full = player.hearts.min(capacity);
    let hearts = (0..capacity)
        .map(|slot| {
            if slot < full {
                HeartSlot::Full
            } else {
                HeartSlot::Empty
            }
        })
        .collect();

    HudView {
        hearts,
        key: if player.has_key {
            KeyStatus::Held
        } else {
            KeyStatus::Missing
        },
        visible: state == GameState::Running,
    }
}
