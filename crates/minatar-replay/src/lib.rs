//! Deterministic replay for MinAtar environments.
//!
//! Records the inputs an [`Environment`](minatar_engine::Environment)
//! received together with a hash of every resulting observation, then
//! replays them through a fresh environment to prove the run
//! reproduces bit for bit.
//!
//! # Architecture
//!
//! - [`ReplayWriter`] records frames to any `Write` sink
//! - [`ReplayReader`] plays back frames from any `Read` source
//! - [`compare_observation`] and [`replay_and_compare`] verify determinism
//! - [`verify_replay`] rebuilds the recorded environment and drives it
//! - All I/O uses a small hand-written binary codec
//!
//! # Format
//!
//! ```text
//! [MAGIC "MNTR"] [VERSION u8] [ReplayHeader]
//! [Frame 1] [Frame 2] ... [Frame N]
//! ```
//!
//! Each frame holds the input (reset or action code), the resulting
//! reward and terminal flag, and an FNV-1a hash of the observation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compare;
pub mod error;
pub mod hash;
pub mod reader;
pub mod types;
pub mod writer;

pub use compare::{
    compare_observation, replay_and_compare, verify_replay, CellDivergence, DivergenceKind,
    DivergenceReport,
};
pub use error::ReplayError;
pub use hash::obs_hash;
pub use reader::{FrameIter, ReplayReader};
pub use types::{Frame, Input, Outcome, ReplayHeader};
pub use writer::ReplayWriter;

/// Magic bytes at the start of every replay file.
pub const MAGIC: [u8; 4] = *b"MNTR";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
