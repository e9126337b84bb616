//! Error types for the MinAtar games, organized by subsystem:
//! action resolution, observation access, and configuration.
//!
//! None of these are fatal. Every failure is reported as a value and
//! leaves the game instance in a usable state.

use std::error::Error;
use std::fmt;

use crate::traits::Transition;

/// Errors from [`Game::act`](crate::Game::act).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActError {
    /// The action code is outside `[0, n_actions)`. Game state is untouched.
    InvalidAction {
        /// The rejected action code.
        action: i32,
        /// Size of the action alphabet.
        n_actions: usize,
        /// The terminal flag at the time of the call, unchanged.
        terminal: bool,
    },
}

impl ActError {
    /// The sentinel transition paired with this error: a reward of `-1`
    /// and the terminal flag as it was before the call.
    ///
    /// RL loops that prefer not to branch on the error can fold this
    /// into their trajectory and keep going.
    pub fn transition(&self) -> Transition {
        match *self {
            Self::InvalidAction { terminal, .. } => Transition {
                reward: -1.0,
                terminal,
            },
        }
    }
}

impl fmt::Display for ActError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAction {
                action, n_actions, ..
            } => write!(
                f,
                "invalid action {action}: expected a code in [0, {n_actions})"
            ),
        }
    }
}

impl Error for ActError {}

/// Errors from observation access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObsError {
    /// A channel index outside `[0, channels)` was requested.
    ChannelOutOfRange {
        /// The requested channel index.
        index: usize,
        /// Number of channels the game encodes.
        channels: usize,
    },
    /// A caller-provided buffer does not match the observation size.
    ShapeMismatch {
        /// Number of `f32` values required.
        expected: usize,
        /// Number of `f32` values provided.
        actual: usize,
    },
    /// A layout lists the same channel name twice.
    DuplicateChannel {
        /// Position of the second occurrence.
        index: usize,
    },
}

impl fmt::Display for ObsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelOutOfRange { index, channels } => {
                write!(f, "channel {index} out of range (channels={channels})")
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "observation buffer has {actual} values, expected {expected}")
            }
            Self::DuplicateChannel { index } => {
                write!(f, "channel {index} duplicates an earlier channel name")
            }
        }
    }
}

impl Error for ObsError {}

/// Errors detected while validating environment configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Sticky-action probability is NaN or outside `[0, 1]`.
    InvalidStickyProb {
        /// The rejected value.
        value: f64,
    },
    /// A game name did not match any known game.
    UnknownGame {
        /// The name as given by the caller.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStickyProb { value } => {
                write!(f, "sticky action probability {value} is not in [0, 1]")
            }
            Self::UnknownGame { name } => write!(f, "unknown game '{name}'"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_action_sentinel_keeps_terminal_flag() {
        let live = ActError::InvalidAction {
            action: 6,
            n_actions: 6,
            terminal: false,
        };
        assert_eq!(live.transition(), Transition::new(-1.0, false));

        let dead = ActError::InvalidAction {
            action: -1,
            n_actions: 6,
            terminal: true,
        };
        assert_eq!(dead.transition(), Transition::new(-1.0, true));
    }

    #[test]
    fn display_messages() {
        let e = ActError::InvalidAction {
            action: -1,
            n_actions: 6,
            terminal: false,
        };
        assert_eq!(e.to_string(), "invalid action -1: expected a code in [0, 6)");

        let e = ObsError::ChannelOutOfRange {
            index: 4,
            channels: 4,
        };
        assert_eq!(e.to_string(), "channel 4 out of range (channels=4)");

        let e = ConfigError::UnknownGame {
            name: "pong".into(),
        };
        assert_eq!(e.to_string(), "unknown game 'pong'");
    }
}
