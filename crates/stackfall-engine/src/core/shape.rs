use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::ShapeError;

/// The seven tetromino kinds.
///
/// The discriminant is the shape's identifier, i.e. the cell value its
/// occupied cells carry on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 1,
    /// J-piece.
    J = 2,
    /// L-piece.
    L = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// T-piece.
    T = 6,
    /// Z-piece.
    Z = 7,
}

/// Uniform choice over the seven kinds.
impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::T,
        Self::Z,
    ];

    /// Identifier in `1..=7`.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// The cell value this kind leaves on the board.
    #[must_use]
    pub const fn cell(self) -> Cell {
        Cell::new(self.id())
    }

    /// Looks up a kind by identifier.
    ///
    /// ```
    /// use stackfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_id(4), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_id(0), None);
    /// ```
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::I),
            2 => Some(Self::J),
            3 => Some(Self::L),
            4 => Some(Self::O),
            5 => Some(Self::S),
            6 => Some(Self::T),
            7 => Some(Self::Z),
            _ => None,
        }
    }

    /// Returns a copy of this kind's canonical shape.
    #[must_use]
    pub const fn shape(self) -> Shape {
        CATALOG[self as usize - 1]
    }
}

/// Catalog lookup: the spawn orientation of `kind`.
#[must_use]
pub const fn shape_for(kind: ShapeKind) -> Shape {
    kind.shape()
}

/// A square matrix of cells describing one piece orientation.
///
/// Shapes are 2×2, 3×3 or 4×4 in the catalog (any size up to
/// [`Shape::MAX_SIZE`] through [`Shape::from_rows`]). All occupied cells
/// carry the same identifier. Cells outside `size × size` are always
/// empty, so rotation never changes the dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    cells: [[Cell; Shape::MAX_SIZE]; Shape::MAX_SIZE],
}

impl Shape {
    pub const MAX_SIZE: usize = 4;

    const fn from_ids(size: usize, ids: [[u8; Self::MAX_SIZE]; Self::MAX_SIZE]) -> Self {
        let mut cells = [[Cell::EMPTY; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                cells[y][x] = Cell::new(ids[y][x]);
                x += 1;
            }
            y += 1;
        }
        Self { size, cells }
    }

    /// Builds a shape from raw rows of cell values.
    ///
    /// ```
    /// use stackfall_engine::{Shape, ShapeError, ShapeKind};
    ///
    /// let shape = Shape::from_rows(&[[0, 6, 0], [6, 6, 6], [0, 0, 0]]).unwrap();
    /// assert_eq!(shape, ShapeKind::T.shape());
    ///
    /// let err = Shape::from_rows(&[[1, 2], [0, 0]]).unwrap_err();
    /// assert_eq!(err, ShapeError::MixedIds { first: 1, second: 2 });
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[u8]>,
    {
        let size = rows.len();
        if size == 0 {
            return Err(ShapeError::Empty);
        }
        if size > Self::MAX_SIZE {
            return Err(ShapeError::TooLarge { size });
        }

        let mut cells = [[Cell::EMPTY; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut id: Option<u8> = None;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(ShapeError::NotSquare {
                    row: y,
                    len: row.len(),
                    size,
                });
            }
            for (x, &value) in row.iter().enumerate() {
                let cell = Cell::try_from(value)
                    .map_err(|e| ShapeError::CellRange { value: e.value })?;
                if cell.is_empty() {
                    continue;
                }
                match id {
                    None => id = Some(value),
                    Some(first) if first != value => {
                        return Err(ShapeError::MixedIds {
                            first,
                            second: value,
                        });
                    }
                    Some(_) => {}
                }
                cells[y][x] = cell;
            }
        }
        if id.is_none() {
            return Err(ShapeError::Blank);
        }

        Ok(Self { size, cells })
    }

    /// Side length of the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cell at `(row, col)`, or `None` outside the matrix.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.size && col < self.size).then(|| self.cells[row][col])
    }

    /// The identifier shared by all occupied cells.
    #[must_use]
    pub fn id(&self) -> Cell {
        self.occupied_cells()
            .map(|(_, _, cell)| cell)
            .next()
            .unwrap_or(Cell::EMPTY)
    }

    /// Iterates the `size` rows, each `size` cells wide.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.size]
            .iter()
            .map(move |row| &row[..self.size])
    }

    /// Iterates `(row, col, cell)` for every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_occupied())
                .map(move |(x, &cell)| (y, x, cell))
        })
    }

    /// Rotates 90° clockwise: transpose, then reverse each row.
    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let size = self.size;
        let mut cells = [[Cell::EMPTY; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                cells[y][x] = self.cells[size - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self { size, cells }
    }
}

const CATALOG: [Shape; ShapeKind::LEN] = [
    // I-piece
    Shape::from_ids(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // J-piece
    Shape::from_ids(3, [[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // L-piece
    Shape::from_ids(3, [[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // O-piece
    Shape::from_ids(2, [[4, 4, 0, 0], [4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // S-piece
    Shape::from_ids(3, [[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // T-piece
    Shape::from_ids(3, [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // Z-piece
    Shape::from_ids(3, [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
];
