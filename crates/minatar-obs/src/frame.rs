//! Write cursor for encoding a game state into a flat tensor.

use minatar_core::{ChannelId, ObsError};
use minatar_space::{CellMask, Position};

use crate::layout::ObsLayout;

/// Mutable view of a flat observation buffer, addressed by channel and
/// board position.
///
/// Writes to positions off the board are ignored, so trails and gauges
/// that would fall outside the grid need no special casing at the call
/// site.
pub struct ObsFrame<'a> {
    layout: &'a ObsLayout,
    buf: &'a mut [f32],
}

impl<'a> ObsFrame<'a> {
    /// Wrap `buf`, which must hold exactly `layout.len()` values.
    ///
    /// # Errors
    ///
    /// [`ObsError::ShapeMismatch`] if the buffer length is wrong.
    pub fn new(layout: &'a ObsLayout, buf: &'a mut [f32]) -> Result<Self, ObsError> {
        if buf.len() != layout.len() {
            return Err(ObsError::ShapeMismatch {
                expected: layout.len(),
                actual: buf.len(),
            });
        }
        Ok(Self { layout, buf })
    }

    /// Wrap a buffer already known to match `layout`.
    pub(crate) fn for_layout(layout: &'a ObsLayout, buf: &'a mut [f32]) -> Self {
        debug_assert_eq!(buf.len(), layout.len());
        Self { layout, buf }
    }

    fn offset(&self, channel: ChannelId, pos: Position) -> Option<usize> {
        if channel.index() >= self.layout.n_channels() {
            return None;
        }
        let cell = self.layout.grid().index(pos)?;
        Some(channel.index() * self.layout.plane_len() + cell)
    }

    /// Zero the whole buffer.
    pub fn clear(&mut self) {
        self.buf.fill(0.0);
    }

    /// Mark `pos` in `channel`. Returns whether the write landed.
    pub fn set(&mut self, channel: ChannelId, pos: Position) -> bool {
        match self.offset(channel, pos) {
            Some(i) => {
                self.buf[i] = 1.0;
                true
            }
            None => false,
        }
    }

    /// Mark the half-open column range `cols` of `row` in `channel`.
    pub fn fill_row(&mut self, channel: ChannelId, row: i32, cols: std::ops::Range<i32>) {
        for col in cols {
            self.set(channel, Position::new(row, col));
        }
    }

    /// Mark every occupied cell of `mask` in `channel`.
    pub fn copy_mask(&mut self, channel: ChannelId, mask: &CellMask) {
        for pos in mask.positions() {
            self.set(channel, pos);
        }
    }
}
