//! The [`Game`] trait implemented by every engine, and the per-step
//! [`Transition`] it returns.

use crate::error::{ActError, ObsError};
use crate::id::GameKind;

/// Outcome of a single [`Game::act`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transition {
    /// Reward accrued during this frame.
    pub reward: f64,
    /// Whether the episode has ended.
    pub terminal: bool,
}

impl Transition {
    /// Construct a transition.
    pub const fn new(reward: f64, terminal: bool) -> Self {
        Self { reward, terminal }
    }

    /// The no-op result returned by a game that is already terminal.
    pub const ABSORBED: Transition = Transition::new(0.0, true);
}

/// A single-instance, single-threaded grid-world game.
///
/// Implementations are [`Send`] so rollout workers can own one game each,
/// but are not required to be [`Sync`]: the encoded observation is cached
/// behind interior mutability and invalidated by every mutating call.
///
/// Once [`act`](Self::act) reports `terminal`, further calls return
/// [`Transition::ABSORBED`] and leave the state untouched until
/// [`reset`](Self::reset).
pub trait Game: Send {
    /// Which game this is.
    fn kind(&self) -> GameKind;

    /// Restore the starting configuration. Randomized starts draw from
    /// the instance's own generator, so the stream continues rather
    /// than restarting.
    fn reset(&mut self);

    /// Advance one frame.
    ///
    /// # Errors
    ///
    /// Returns [`ActError::InvalidAction`] for codes outside
    /// `[0, NUM_ACTIONS)` on a live game. The state is not modified.
    fn act(&mut self, action: i32) -> Result<Transition, ActError>;

    /// The encoded observation: `channels` planes of `rows * cols`
    /// values, each exactly `0.0` or `1.0`.
    fn state(&self) -> &[f32];

    /// `[channels, rows, cols]`.
    fn state_shape(&self) -> [usize; 3];

    /// Indices into the action alphabet that have an effect in this game.
    fn minimal_action_set(&self) -> Vec<usize>;

    /// Number of difficulty increases so far. Always 0 for games without
    /// a ramp.
    fn difficulty_ramp(&self) -> u32;

    /// Whether the current episode has ended.
    fn is_terminal(&self) -> bool;

    /// Number of observation channels.
    fn n_channels(&self) -> usize {
        self.state_shape()[0]
    }

    /// One plane of the observation.
    ///
    /// # Errors
    ///
    /// Returns [`ObsError::ChannelOutOfRange`] if `index >= n_channels()`.
    fn channel(&self, index: usize) -> Result<&[f32], ObsError> {
        let [channels, rows, cols] = self.state_shape();
        if index >= channels {
            return Err(ObsError::ChannelOutOfRange { index, channels });
        }
        let plane = rows * cols;
        Ok(&self.state()[index * plane..(index + 1) * plane])
    }
}
