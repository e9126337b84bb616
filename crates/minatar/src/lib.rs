//! MinAtar: five miniature Atari games on a 10x10 grid, for
//! reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all MinAtar sub-crates. For most users, adding `minatar` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use minatar::prelude::*;
//!
//! let config = EnvConfig::new(GameKind::Breakout, 42);
//! let mut env = Environment::new(config).unwrap();
//! assert_eq!(env.state_shape(), [4, 10, 10]);
//!
//! let mut ret = 0.0;
//! for _ in 0..100 {
//!     let t = env.act(Action::Right as i32).unwrap();
//!     ret += t.reward;
//!     if t.terminal {
//!         env.reset();
//!     }
//! }
//! assert!(ret >= 0.0);
//! assert!(env.state().iter().all(|&v| v == 0.0 || v == 1.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `minatar-core` | Actions, game ids, errors, the `Game` trait |
//! | [`space`] | `minatar-space` | Grid geometry, edge policies, cell masks |
//! | [`obs`] | `minatar-obs` | Channel layouts and observation encoding |
//! | [`games`] | `minatar-games` | The five game engines |
//! | [`engine`] | `minatar-engine` | Sticky-action environments and batching |
//! | [`replay`] | `minatar-replay` | Deterministic replay recording and verification |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`minatar-core`).
///
/// Contains the action alphabet, [`types::GameKind`], error types and the
/// [`types::Game`] trait every engine implements.
pub use minatar_core as types;

/// Grid geometry (`minatar-space`).
///
/// [`space::GridShape`], [`space::Position`], [`space::EdgeBehavior`] and
/// the bitboard-style [`space::CellMask`].
pub use minatar_space as space;

/// Observation layout and encoding (`minatar-obs`).
pub use minatar_obs as obs;

/// The game engines (`minatar-games`).
///
/// Build one directly, or by kind with [`games::make_game`].
pub use minatar_games as games;

/// Environments (`minatar-engine`).
///
/// [`engine::Environment`] adds sticky actions and episode statistics;
/// [`engine::BatchedEnv`] steps many environments at once.
pub use minatar_engine as engine;

/// Deterministic replay (`minatar-replay`).
///
/// Record runs with [`replay::ReplayWriter`], verify them with
/// [`replay::verify_replay`].
pub use minatar_replay as replay;

/// Common imports for typical MinAtar usage.
///
/// ```rust
/// use minatar::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use minatar_core::{Action, Game, GameKind, Transition, NUM_ACTIONS};

    // Errors
    pub use minatar_core::{ActError, ConfigError, ObsError};

    // Games
    pub use minatar_games::{make_game, Asterix, Breakout, Freeway, SeaQuest, SpaceInvaders};

    // Engine
    pub use minatar_engine::{BatchError, BatchedEnv, EnvConfig, Environment, EpisodeStats};

    // Replay
    pub use minatar_replay::{verify_replay, ReplayHeader, ReplayReader, ReplayWriter};
}
