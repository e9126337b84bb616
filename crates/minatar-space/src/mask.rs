//! Dense boolean occupancy grid.
//!
//! [`CellMask`] backs the static fields of the grid games: the Breakout
//! brick wall, the Space Invaders alien block and bullet layers. Shifts
//! move the whole pattern rigidly; cells pushed past an edge are dropped
//! and vacated cells become empty.

use crate::grid::{GridShape, Position};

/// A row-major grid of occupied / empty cells.
///
/// ```
/// use minatar_space::{CellMask, GridShape, Position};
///
/// let mut m = CellMask::new(GridShape::MINATAR);
/// m.set(Position::new(0, 3), true);
/// m.shift_rows(1);
/// assert!(m.get(Position::new(1, 3)));
/// assert_eq!(m.count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellMask {
    shape: GridShape,
    cells: Vec<bool>,
}

impl CellMask {
    /// An empty mask over `shape`.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            cells: vec![false; shape.cell_count()],
        }
    }

    /// The board this mask covers.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Whether `pos` is occupied. Off-board positions are never occupied.
    pub fn get(&self, pos: Position) -> bool {
        self.shape.index(pos).is_some_and(|i| self.cells[i])
    }

    /// Set the occupancy of `pos`. Returns `false` (and does nothing) if
    /// `pos` is off the board.
    pub fn set(&mut self, pos: Position, occupied: bool) -> bool {
        match self.shape.index(pos) {
            Some(i) => {
                self.cells[i] = occupied;
                true
            }
            None => false,
        }
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Occupy the rectangle `rows x cols` (half-open ranges, clipped to
    /// the board).
    pub fn fill_rect(&mut self, rows: std::ops::Range<i32>, cols: std::ops::Range<i32>) {
        for row in rows {
            for col in cols.clone() {
                self.set(Position::new(row, col), true);
            }
        }
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Whether any cell in `row` is occupied.
    pub fn row_occupied(&self, row: i32) -> bool {
        (0..self.shape.cols() as i32).any(|col| self.get(Position::new(row, col)))
    }

    /// Whether any cell in `col` is occupied.
    pub fn col_occupied(&self, col: i32) -> bool {
        (0..self.shape.rows() as i32).any(|row| self.get(Position::new(row, col)))
    }

    /// The lowest (largest-index) occupied row in `col`.
    pub fn lowest_in_col(&self, col: i32) -> Option<i32> {
        (0..self.shape.rows() as i32)
            .rev()
            .find(|&row| self.get(Position::new(row, col)))
    }

    /// Occupied positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.shape.cols() as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| Position::new((i / cols) as i32, (i % cols) as i32))
    }

    /// Raw row-major cells.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Move the pattern down by `d_row` rows (up if negative).
    pub fn shift_rows(&mut self, d_row: i32) {
        self.shift(d_row, 0);
    }

    /// Move the pattern right by `d_col` columns (left if negative).
    pub fn shift_cols(&mut self, d_col: i32) {
        self.shift(0, d_col);
    }

    fn shift(&mut self, d_row: i32, d_col: i32) {
        if d_row == 0 && d_col == 0 {
            return;
        }
        let mut next = vec![false; self.cells.len()];
        for pos in self.positions() {
            if let Some(i) = self.shape.index(pos.offset(d_row, d_col)) {
                next[i] = true;
            }
        }
        self.cells = next;
    }

    /// Clear every cell occupied in both `self` and `other`, in both
    /// masks, and return how many there were.
    ///
    /// Cells are matched by position, so masks over different boards only
    /// interact where they overlap.
    pub fn remove_overlap(&mut self, other: &mut CellMask) -> usize {
        let hits: Vec<Position> = self.positions().filter(|&p| other.get(p)).collect();
        for &pos in &hits {
            self.set(pos, false);
            other.set(pos, false);
        }
        hits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid() -> GridShape {
        GridShape::MINATAR
    }

    #[test]
    fn fill_rect_clips_to_board() {
        let mut m = CellMask::new(grid());
        m.fill_rect(8..12, -1..2);
        assert_eq!(m.count(), 4);
        assert!(m.get(Position::new(9, 1)));
    }

    #[test]
    fn shift_drops_cells_at_edges() {
        let mut m = CellMask::new(grid());
        m.set(Position::new(0, 0), true);
        m.set(Position::new(9, 5), true);
        m.shift_rows(1);
        assert_eq!(m.count(), 1);
        assert!(m.get(Position::new(1, 0)));
        m.shift_cols(-1);
        assert!(m.is_empty());
    }

    #[test]
    fn occupancy_queries() {
        let mut m = CellMask::new(grid());
        m.fill_rect(0..4, 2..8);
        assert!(m.col_occupied(2));
        assert!(!m.col_occupied(1));
        assert!(m.row_occupied(3));
        assert!(!m.row_occupied(4));
        assert_eq!(m.lowest_in_col(5), Some(3));
        assert_eq!(m.lowest_in_col(9), None);
    }

    #[test]
    fn remove_overlap_clears_both() {
        let mut a = CellMask::new(grid());
        let mut b = CellMask::new(grid());
        a.fill_rect(0..2, 0..2);
        b.set(Position::new(1, 1), true);
        b.set(Position::new(5, 5), true);
        assert_eq!(a.remove_overlap(&mut b), 1);
        assert_eq!(a.count(), 3);
        assert_eq!(b.count(), 1);
    }

    #[test]
    fn remove_overlap_on_different_boards_matches_by_position() {
        let mut a = CellMask::new(grid());
        let mut b = CellMask::new(GridShape::new(5, 5).unwrap());
        a.set(Position::new(2, 2), true);
        a.set(Position::new(7, 7), true);
        b.set(Position::new(2, 2), true);
        assert_eq!(a.remove_overlap(&mut b), 1);
        assert_eq!(a.count(), 1);
        assert!(b.is_empty());
    }

    proptest! {
        #[test]
        fn shift_never_creates_cells(
            cells in proptest::collection::vec((0i32..10, 0i32..10), 0..30),
            d_row in -3i32..4,
            d_col in -3i32..4,
        ) {
            let mut m = CellMask::new(grid());
            for (r, c) in cells {
                m.set(Position::new(r, c), true);
            }
            let before = m.count();
            m.shift_rows(d_row);
            m.shift_cols(d_col);
            prop_assert!(m.count() <= before);
            for p in m.positions() {
                prop_assert!(grid().contains(p));
            }
        }
    }
}
