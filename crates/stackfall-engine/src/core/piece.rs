use super::{
    board::COLS,
    cell::Cell,
    shape::{Shape, ShapeKind},
};

/// Column where new pieces appear (`COLS / 2 - 1`).
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const PIECE_SPAWN_X: i32 = (COLS / 2) as i32 - 1;
/// Row where new pieces appear.
pub const PIECE_SPAWN_Y: i32 = 0;

/// The falling piece: a working copy of a shape plus its board offset.
///
/// `x` is the column and `y` the row of the shape matrix's top-left
/// corner. Either may be negative or run past the board; whether a
/// position is legal is the [`Board`](super::board::Board)'s call.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Piece, ShapeKind};
///
/// let piece = Piece::spawn(ShapeKind::O);
/// assert_eq!((piece.x(), piece.y()), (5, 0));
///
/// let cells: Vec<_> = piece.occupied_positions().map(|(x, y, _)| (x, y)).collect();
/// assert_eq!(cells, [(5, 0), (6, 0), (5, 1), (6, 1)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    #[must_use]
    pub const fn new(shape: Shape, x: i32, y: i32) -> Self {
        Self { shape, x, y }
    }

    /// A fresh piece of `kind` at the spawn position.
    #[must_use]
    pub const fn spawn(kind: ShapeKind) -> Self {
        Self::new(kind.shape(), PIECE_SPAWN_X, PIECE_SPAWN_Y)
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Absolute `(column, row, cell)` of every occupied cell.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dy, dx, cell)| (self.x + offset(dx), self.y + offset(dy), cell))
    }

    /// The shape this piece would have after a clockwise turn.
    ///
    /// Pure: neither the piece nor the catalog changes.
    #[must_use]
    pub const fn rotated_cw(&self) -> Shape {
        self.shape.rotated_cw()
    }

    pub(crate) fn shift(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub(crate) fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn offset(d: usize) -> i32 {
    // Shape offsets are bounded by Shape::MAX_SIZE.
    d as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position_is_centered() {
        for kind in ShapeKind::ALL {
            let piece = Piece::spawn(kind);
            assert_eq!(piece.x(), 5);
            assert_eq!(piece.y(), 0);
            assert_eq!(*piece.shape(), kind.shape());
        }
    }

    #[test]
    fn test_occupied_positions_follow_offset() {
        let piece = Piece::new(ShapeKind::T.shape(), -1, 3);
        let cells: Vec<_> = piece.occupied_positions().collect();
        let t = ShapeKind::T.cell();
        assert_eq!(cells, [(0, 3, t), (-1, 4, t), (0, 4, t), (1, 4, t)]);
    }

    #[test]
    fn test_rotated_cw_is_pure() {
        let piece = Piece::spawn(ShapeKind::J);
        let rotated = piece.rotated_cw();
        assert_ne!(rotated, *piece.shape());
        assert_eq!(*piece.shape(), ShapeKind::J.shape());
    }

    #[test]
    fn test_shift_and_set_shape() {
        let mut piece = Piece::spawn(ShapeKind::S);
        piece.shift(-2, 4);
        assert_eq!((piece.x(), piece.y()), (3, 4));

        let rotated = piece.rotated_cw();
        piece.set_shape(rotated);
        assert_eq!(*piece.shape(), rotated);
        assert_eq!(ShapeKind::S.shape().rotated_cw(), rotated);
    }
}
