//! Scripted keyboard input for headless runs.
//!
//! A script is a whitespace-separated list of `<keys><count>` tokens. Keys
//! are any combination of `U`, `L`, `R` and `D` held together, or `-` for a
//! frame without input. `R40 UR12 -250` holds right for 40 frames, up and
//! right for 12, then idles for 250.

use maze_runner_core::{Direction, HeldDirections};
use thiserror::Error;

/// Reasons a script token is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ScriptError {
    /// The token has keys but no frame count.
    #[error("token `{0}` has no frame count")]
    MissingCount(String),
    /// The frame count is not a positive integer.
    #[error("token `{0}` has an invalid frame count")]
    BadCount(String),
    /// The token holds a character that is not a direction key.
    #[error("token `{token}` holds unknown key `{key}`")]
    UnknownKey {
        /// Offending token.
        token: String,
        /// Offending character.
        key: char,
    },
}

/// One run of identical frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    held: HeldDirections,
    frames: u64,
}

/// Parsed input script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// Parses a script from its textual form.
    pub(crate) fn parse(text: &str) -> Result<Self, ScriptError> {
        let steps = text
            .split_whitespace()
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }

    /// Script holding no key for `frames` frames.
    pub(crate) fn idle(frames: u64) -> Self {
        Self {
            steps: vec![Step {
                held: HeldDirections::default(),
                frames,
            }],
        }
    }

    /// Total number of frames described by the script.
    pub(crate) fn len(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |total, step| total.saturating_add(step.frames))
    }

    /// Held keys for every frame, in order.
    pub(crate) fn frames(&self) -> impl Iterator<Item = HeldDirections> + '_ {
        self.steps.iter().flat_map(|step| {
            std::iter::repeat(step.held).take(usize::try_from(step.frames).unwrap_or(usize::MAX))
        })
    }
}

fn parse_token(token: &str) -> Result<Step, ScriptError> {
    let split = token
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| ScriptError::MissingCount(token.to_owned()))?;
    let (keys, count) = token.split_at(split);

    let frames = count
        .parse::<u64>()
        .ok()
        .filter(|frames| *frames > 0)
        .ok_or_else(|| ScriptError::BadCount(token.to_owned()))?;

    let mut held = HeldDirections::default();
    for key in keys.chars() {
        let direction = match key.to_ascii_uppercase() {
            'U' => Direction::Up,
            'L' => Direction::Left,
            'R' => Direction::Right,
            'D' => Direction::Down,
            '-' => continue,
            _ => {
                return Err(ScriptError::UnknownKey {
                    token: token.to_owned(),
                    key,
                })
            }
        };
        held.press(direction);
    }

    Ok(Step { held, frames })
}
