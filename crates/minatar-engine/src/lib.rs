//! Environment layer over the MinAtar game engines.
//!
//! [`Environment`] wraps one boxed [`Game`](minatar_core::Game) and adds
//! sticky actions, episode bookkeeping and logging. [`BatchedEnv`] owns
//! N environments and steps them in a single call for vectorized
//! rollouts.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batched;
pub mod config;
pub mod env;
pub mod metrics;

pub use batched::{BatchError, BatchedEnv};
pub use config::EnvConfig;
pub use env::Environment;
pub use metrics::EpisodeStats;

pub use minatar_core::ConfigError;
