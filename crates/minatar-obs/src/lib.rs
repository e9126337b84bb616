//! Observation layout, encoding and caching for the MinAtar games.
//!
//! A game's observation is a `[channels, rows, cols]` tensor of `0.0` /
//! `1.0` values, stored flat with channel planes concatenated and each
//! plane row-major.
//!
//! - [`ObsLayout`] names the channels and fixes the tensor shape
//! - [`ObsFrame`] is the write cursor a game encodes itself through
//! - [`ObsCache`] encodes lazily and holds the result until invalidated

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod frame;
pub mod layout;

pub use cache::ObsCache;
pub use frame::ObsFrame;
pub use layout::ObsLayout;
