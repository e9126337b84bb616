//! Lazily encoded observation with explicit invalidation.
//!
//! [`ObsCache`] holds an [`ObsLayout`] and, once requested, the encoded
//! tensor. Games call [`ObsCache::invalidate`] from every mutating
//! operation and [`ObsCache::get_or_encode`] from `state()`, so repeated
//! reads between steps encode once and return the same buffer.

use std::cell::OnceCell;

use crate::frame::ObsFrame;
use crate::layout::ObsLayout;

/// Cached encoded observation.
///
/// The cache is filled through `&self`, which makes the owning game
/// [`Send`] but not [`Sync`].
///
/// # Examples
///
/// ```
/// use minatar_core::ChannelId;
/// use minatar_obs::{ObsCache, ObsLayout};
/// use minatar_space::{GridShape, Position};
///
/// let mut cache = ObsCache::new(ObsLayout::new(GridShape::MINATAR, &["player"]));
/// let obs = cache.get_or_encode(|frame| {
///     frame.set(ChannelId(0), Position::new(5, 5));
/// });
/// assert_eq!(obs[55], 1.0);
/// assert!(cache.is_cached());
///
/// cache.invalidate();
/// assert!(!cache.is_cached());
/// ```
#[derive(Debug)]
pub struct ObsCache {
    layout: ObsLayout,
    cached: OnceCell<Vec<f32>>,
}

impl ObsCache {
    /// An empty cache for `layout`.
    pub fn new(layout: ObsLayout) -> Self {
        Self {
            layout,
            cached: OnceCell::new(),
        }
    }

    /// The layout observations are encoded with.
    pub fn layout(&self) -> &ObsLayout {
        &self.layout
    }

    /// Drop the cached tensor so the next read re-encodes.
    pub fn invalidate(&mut self) {
        self.cached.take();
    }

    /// Whether an encoded tensor is currently held.
    pub fn is_cached(&self) -> bool {
        self.cached.get().is_some()
    }

    /// Return the cached tensor, encoding it with `encode` into a zeroed
    /// buffer first if needed.
    pub fn get_or_encode<F>(&self, encode: F) -> &[f32]
    where
        F: FnOnce(&mut ObsFrame<'_>),
    {
        self.cached.get_or_init(|| {
            let mut buf = vec![0.0; self.layout.len()];
            let mut frame = ObsFrame::for_layout(&self.layout, &mut buf);
            encode(&mut frame);
            buf
        })
    }
}
