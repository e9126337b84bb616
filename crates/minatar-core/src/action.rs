//! The shared action alphabet and action-code validation.

use std::fmt;

use crate::error::ActError;

/// Number of actions in the alphabet, identical for every game.
pub const NUM_ACTIONS: usize = 6;

/// The full action alphabet in code order.
pub const ACTION_SET: [Action; NUM_ACTIONS] = [
    Action::Noop,
    Action::Left,
    Action::Up,
    Action::Right,
    Action::Down,
    Action::Fire,
];

/// A discrete player action.
///
/// The discriminant is the action code accepted by
/// [`Game::act`](crate::Game::act).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Do nothing.
    Noop = 0,
    /// Move left.
    Left = 1,
    /// Move up.
    Up = 2,
    /// Move right.
    Right = 3,
    /// Move down.
    Down = 4,
    /// Fire, where the game supports it.
    Fire = 5,
}

impl Action {
    /// Map an action code to an [`Action`], or `None` if out of range.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| ACTION_SET.get(i).copied())
    }

    /// Validate an action code for a game whose terminal flag is `terminal`.
    ///
    /// # Errors
    ///
    /// Returns [`ActError::InvalidAction`] carrying the unchanged terminal
    /// flag if `code` is not in `[0, NUM_ACTIONS)`.
    pub fn resolve(code: i32, terminal: bool) -> Result<Self, ActError> {
        Self::from_code(code).ok_or(ActError::InvalidAction {
            action: code,
            n_actions: NUM_ACTIONS,
            terminal,
        })
    }

    /// The integer code of this action.
    pub fn code(self) -> usize {
        self as usize
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Left => "left",
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Fire => "fire",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
