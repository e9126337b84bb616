//! Board dimensions, cell positions and horizontal headings.

use std::fmt;

use crate::edge::{resolve_axis, EdgeBehavior};
use crate::error::SpaceError;

/// Dimensions of a rectangular board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    rows: u32,
    cols: u32,
}

impl GridShape {
    /// The 10x10 board every game uses.
    pub const MINATAR: GridShape = GridShape { rows: 10, cols: 10 };

    /// Create a board of `rows` by `cols` cells.
    ///
    /// # Errors
    ///
    /// [`SpaceError::EmptySpace`] if either dimension is zero, or
    /// [`SpaceError::DimensionTooLarge`] if one exceeds `i32::MAX`.
    pub fn new(rows: u32, cols: u32) -> Result<Self, SpaceError> {
        if rows == 0 || cols == 0 {
            return Err(SpaceError::EmptySpace);
        }
        for value in [rows, cols] {
            if value > i32::MAX as u32 {
                return Err(SpaceError::DimensionTooLarge { value });
            }
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Last valid row index.
    pub fn max_row(&self) -> i32 {
        self.rows as i32 - 1
    }

    /// Last valid column index.
    pub fn max_col(&self) -> i32 {
        self.cols as i32 - 1
    }

    /// Whether `pos` lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows as i32 && pos.col >= 0 && pos.col < self.cols as i32
    }

    /// Row-major flat index of `pos`, or `None` if off the board.
    pub fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row as usize * self.cols as usize + pos.col as usize)
        } else {
            None
        }
    }

    /// Displace `pos` by `(d_row, d_col)`, resolving each axis under `edge`.
    ///
    /// Returns `None` only for [`EdgeBehavior::Despawn`] when the result
    /// leaves the board.
    pub fn step(&self, pos: Position, d_row: i32, d_col: i32, edge: EdgeBehavior) -> Option<Position> {
        let row = resolve_axis(pos.row + d_row, self.rows as i32, edge)?;
        let col = resolve_axis(pos.col + d_col, self.cols as i32, edge)?;
        Some(Position { row, col })
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A cell on the board, as signed coordinates so that a displaced
/// position can be checked before it is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row, 0 at the top.
    pub row: i32,
    /// Column, 0 at the left.
    pub col: i32,
}

impl Position {
    /// Construct a position.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position displaced by `(d_row, d_col)`, unresolved.
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Horizontal direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Heading {
    /// `Right` if `right` is true, else `Left`.
    pub fn from_right(right: bool) -> Self {
        if right {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Column displacement of one step: `-1` or `+1`.
    pub fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// The opposite heading.
    pub fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}
