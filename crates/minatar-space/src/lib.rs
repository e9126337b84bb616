//! Grid geometry for the MinAtar games.
//!
//! Every game plays on a small fixed rectangle. This crate provides the
//! shared vocabulary for moving things around on it:
//!
//! - [`GridShape`] and [`Position`] describe the board and a cell on it
//! - [`EdgeBehavior`] and [`resolve_axis`] decide what happens at the edge
//!   (clamp, wrap, or despawn)
//! - [`Heading`] is a horizontal direction of travel
//! - [`CellMask`] is a dense occupancy grid with rigid-shift operations,
//!   used for brick fields, alien blocks and bullet layers

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod grid;
pub mod mask;

pub use edge::{resolve_axis, resolve_axis_in, EdgeBehavior};
pub use error::SpaceError;
pub use grid::{GridShape, Heading, Position};
pub use mask::CellMask;
