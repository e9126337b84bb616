//! Data types for replay recording and playback.

use minatar_core::{ActError, GameKind, Transition};
use minatar_engine::EnvConfig;

/// Everything needed to rebuild the recorded environment.
///
/// # Examples
///
/// ```
/// use minatar_core::GameKind;
/// use minatar_engine::EnvConfig;
/// use minatar_replay::ReplayHeader;
///
/// let config = EnvConfig::new(GameKind::Freeway, 42);
/// let header = ReplayHeader::new(&config, [7, 10, 10]);
///
/// assert_eq!(header.env_config(), config);
/// assert_eq!(header.obs_shape, [7, 10, 10]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayHeader {
    /// Version of the crate that wrote the file (e.g. `"0.1.0"`).
    pub minatar_version: String,
    /// Which game was played.
    pub game: GameKind,
    /// Seed shared by the game and the sticky-action stream.
    pub seed: u64,
    /// Sticky-action probability. Stored as raw bits, so it round-trips
    /// exactly.
    pub sticky_action_prob: f64,
    /// Whether the difficulty ramp was enabled.
    pub difficulty_ramping: bool,
    /// `[channels, rows, cols]` of the recorded observations.
    pub obs_shape: [u32; 3],
}

impl ReplayHeader {
    /// Header for an environment built from `config` with observation
    /// shape `shape`.
    pub fn new(config: &EnvConfig, shape: [usize; 3]) -> Self {
        Self {
            minatar_version: env!("CARGO_PKG_VERSION").to_string(),
            game: config.game,
            seed: config.seed,
            sticky_action_prob: config.sticky_action_prob,
            difficulty_ramping: config.difficulty_ramping,
            obs_shape: shape.map(|d| u32::try_from(d).unwrap_or(u32::MAX)),
        }
    }

    /// The configuration the recording was made with.
    pub fn env_config(&self) -> EnvConfig {
        EnvConfig {
            game: self.game,
            sticky_action_prob: self.sticky_action_prob,
            difficulty_ramping: self.difficulty_ramping,
            seed: self.seed,
        }
    }
}

/// What the environment was asked to do on one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// `reset()` was called.
    Reset,
    /// `act(code)` was called with the requested (pre-sticky) code. The
    /// code may be invalid; rejections are replayed too.
    Act(i32),
}

/// The observable result of one [`Input`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    /// Reward returned, or the `-1` sentinel for a rejected action.
    pub reward: f64,
    /// Terminal flag after the input.
    pub terminal: bool,
    /// [`obs_hash`](crate::obs_hash) of the observation after the input.
    pub obs_hash: u64,
}

impl Outcome {
    /// Outcome of an `act` call. A rejected action folds into its
    /// sentinel transition.
    pub fn of_act(result: Result<Transition, ActError>, obs: &[f32]) -> Self {
        let t = result.unwrap_or_else(|e| e.transition());
        Self {
            reward: t.reward,
            terminal: t.terminal,
            obs_hash: crate::hash::obs_hash(obs),
        }
    }

    /// Outcome of a `reset` call.
    pub fn of_reset(obs: &[f32]) -> Self {
        Self {
            reward: 0.0,
            terminal: false,
            obs_hash: crate::hash::obs_hash(obs),
        }
    }
}

/// One recorded input and its outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Position in the recording, starting at 0.
    pub step: u64,
    /// What the environment was asked to do.
    pub input: Input,
    /// Reward returned.
    pub reward: f64,
    /// Terminal flag returned.
    pub terminal: bool,
    /// Hash of the observation after the input.
    pub obs_hash: u64,
}

impl Frame {
    /// Assemble a frame from its parts.
    pub fn new(step: u64, input: Input, outcome: Outcome) -> Self {
        Self {
            step,
            input,
            reward: outcome.reward,
            terminal: outcome.terminal,
            obs_hash: outcome.obs_hash,
        }
    }

    /// The recorded outcome.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            reward: self.reward,
            terminal: self.terminal,
            obs_hash: self.obs_hash,
        }
    }
}

// ── Input tag constants ─────────────────────────────────────────

/// Wire tag for [`Input::Act`].
pub const INPUT_ACT: u8 = 0;
/// Wire tag for [`Input::Reset`].
pub const INPUT_RESET: u8 = 1;
