//! Core types and traits for the MinAtar grid-world games.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by every game engine and wrapper in the
//! workspace: the action alphabet, game identifiers, timers, the
//! per-step [`Transition`], error types, and the [`Game`] trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;
pub mod id;
pub mod timer;
pub mod traits;

pub use action::{Action, ACTION_SET, NUM_ACTIONS};
pub use error::{ActError, ConfigError, ObsError};
pub use id::{ChannelId, GameKind};
pub use timer::Timer;
pub use traits::{Game, Transition};
