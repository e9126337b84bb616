//! Named channel layout of an observation tensor.

use indexmap::IndexMap;
use minatar_core::{ChannelId, ObsError};
use minatar_space::GridShape;

/// Channel names and board dimensions of one game's observation.
///
/// Channel order is the order the names were given in; a name's
/// position is its [`ChannelId`].
///
/// # Examples
///
/// ```
/// use minatar_core::ChannelId;
/// use minatar_obs::ObsLayout;
/// use minatar_space::GridShape;
///
/// let layout = ObsLayout::new(GridShape::MINATAR, &["paddle", "ball", "trail", "brick"]);
/// assert!(layout.validate().is_ok());
/// assert_eq!(layout.shape(), [4, 10, 10]);
/// assert_eq!(layout.channel("brick"), Some(ChannelId(3)));
/// assert_eq!(layout.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObsLayout {
    grid: GridShape,
    n_channels: usize,
    channels: IndexMap<&'static str, ChannelId>,
}

impl ObsLayout {
    /// Build a layout from channel names in tensor order.
    ///
    /// A repeated name still occupies its own plane but cannot be looked
    /// up by name; [`validate`](Self::validate) reports it.
    pub fn new(grid: GridShape, names: &[&'static str]) -> Self {
        let mut channels = IndexMap::with_capacity(names.len());
        for (i, &name) in names.iter().enumerate() {
            channels.entry(name).or_insert(ChannelId(i as u32));
        }
        Self {
            grid,
            n_channels: names.len(),
            channels,
        }
    }

    /// Check that every channel name is unique.
    ///
    /// # Errors
    ///
    /// [`ObsError::DuplicateChannel`] naming the first repeated position.
    pub fn validate(&self) -> Result<(), ObsError> {
        if self.channels.len() == self.n_channels {
            return Ok(());
        }
        let index = self
            .channels
            .values()
            .zip(0u32..)
            .find(|(id, expected)| id.0 != *expected)
            .map(|(_, expected)| expected as usize)
            .unwrap_or(self.channels.len());
        Err(ObsError::DuplicateChannel { index })
    }

    /// The board each plane covers.
    pub fn grid(&self) -> GridShape {
        self.grid
    }

    /// `[channels, rows, cols]`.
    pub fn shape(&self) -> [usize; 3] {
        [
            self.n_channels,
            self.grid.rows() as usize,
            self.grid.cols() as usize,
        ]
    }

    /// Number of channels.
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    /// Number of cells in one plane.
    pub fn plane_len(&self) -> usize {
        self.grid.cell_count()
    }

    /// Total number of values in the tensor.
    pub fn len(&self) -> usize {
        self.n_channels * self.plane_len()
    }

    /// Whether the tensor has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a channel by name.
    pub fn channel(&self, name: &str) -> Option<ChannelId> {
        self.channels.get(name).copied()
    }

    /// Channel names in tensor order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.channels.keys().copied()
    }

    /// Slice plane `index` out of a flat tensor laid out by `self`.
    ///
    /// # Errors
    ///
    /// [`ObsError::ChannelOutOfRange`] for a bad index, or
    /// [`ObsError::ShapeMismatch`] if `data` has the wrong length.
    pub fn plane<'a>(&self, data: &'a [f32], index: usize) -> Result<&'a [f32], ObsError> {
        if data.len() != self.len() {
            return Err(ObsError::ShapeMismatch {
                expected: self.len(),
                actual: data.len(),
            });
        }
        if index >= self.n_channels {
            return Err(ObsError::ChannelOutOfRange {
                index,
                channels: self.n_channels,
            });
        }
        let n = self.plane_len();
        Ok(&data[index * n..(index + 1) * n])
    }
}
