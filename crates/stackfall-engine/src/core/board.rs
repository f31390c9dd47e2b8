use super::{cell::Cell, piece::Piece, shape::Shape};

/// Board height in cells.
pub const ROWS: usize = 20;
/// Board width in cells.
pub const COLS: usize = 12;

type Row = [Cell; COLS];

const EMPTY_ROW: Row = [Cell::EMPTY; COLS];

/// The grid of locked cells.
///
/// Row 0 is the top of the board. The size is fixed at `ROWS × COLS` and
/// every cell holds a value in `0..=7`.
///
/// # Collision
///
/// [`Board::collides`] is the single test used for gravity, lateral
/// movement and rotation:
///
/// - a cell left of column 0, right of the last column or below the last
///   row always collides;
/// - a cell above row 0 never collides on its own;
/// - any other cell collides iff the board cell under it is occupied.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, ShapeKind, ROWS};
///
/// let board = Board::EMPTY;
/// let o = ShapeKind::O.shape();
///
/// let bottom = i32::try_from(ROWS).unwrap() - 2;
/// assert!(!board.collides(0, bottom, &o));
/// assert!(board.collides(0, bottom + 1, &o));
/// assert!(board.collides(-1, 0, &o));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; ROWS],
    };

    /// Cell at `(row, col)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrites one cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> {
        self.rows.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|c| c.is_empty())
    }

    /// Returns `true` if `shape` placed with its top-left corner at
    /// column `x`, row `y` overlaps a wall, the floor or a locked cell.
    #[must_use]
    pub fn collides(&self, x: i32, y: i32, shape: &Shape) -> bool {
        shape.occupied_cells().any(|(dy, dx, _)| {
            let (col, row) = (x + offset(dx), y + offset(dy));
            let Ok(col) = usize::try_from(col) else {
                return true;
            };
            if col >= COLS {
                return true;
            }
            let Ok(row) = usize::try_from(row) else {
                // Above the visible board.
                return false;
            };
            row >= ROWS || self.rows[row][col].is_occupied()
        })
    }

    /// Shorthand for [`Board::collides`] at the piece's own position.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        self.collides(piece.x(), piece.y(), piece.shape())
    }

    /// Writes the piece's occupied cells into the board.
    ///
    /// Cells outside the board are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y, cell) in piece.occupied_positions() {
            let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *slot = cell;
            }
        }
    }

    /// Removes every full row, shifting the rows above down and filling
    /// the top with empty rows.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..ROWS).rev() {
            if is_full(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }
}

fn is_full(row: &Row) -> bool {
    row.iter().all(|c| c.is_occupied())
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn offset(d: usize) -> i32 {
    d as i32
}
