//! Piece module - the falling piece and its geometry
//!
//! A piece is a shape matrix anchored at the grid coordinate of its top-left
//! corner. Movement and rotation helpers do no validation; [`crate::Grid`]
//! checks every change against its collision predicates before applying it,
//! which is why the mutators are crate-private.

use arrayvec::ArrayVec;

use crate::shapes::{ShapeMatrix, ShapeRecord, MAX_EXTENT};
use crate::types::{Direction, PieceKind};

/// Occupied cells of a piece, at most a full 4x4 matrix.
pub type CellList = ArrayVec<(i32, i32), { MAX_EXTENT * MAX_EXTENT }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: ShapeMatrix,
    x: i32,
    y: i32,
}

impl Piece {
    pub fn new(record: &ShapeRecord, x: i32, y: i32) -> Self {
        Self {
            kind: record.kind,
            shape: record.matrix,
            x,
            y,
        }
    }

    /// Color identity of the cells this piece settles into.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.shape.width()
    }

    pub fn height(&self) -> i32 {
        self.shape.height()
    }

    pub fn coord_in_grid(&self, local_x: i32, local_y: i32) -> (i32, i32) {
        (self.x + local_x, self.y + local_y)
    }

    /// Whether a grid coordinate lies inside the bounding box.
    ///
    /// Box-based: cells of the box that are 0 in the shape still count.
    pub fn contains_grid_coord(&self, grid_x: i32, grid_y: i32) -> bool {
        grid_x >= self.x
            && grid_x < self.x + self.width()
            && grid_y >= self.y
            && grid_y < self.y + self.height()
    }

    /// An occupied cell with nothing of its own shape beyond it in `dir`.
    pub fn is_edge_cell(&self, dir: Direction, x: i32, y: i32) -> bool {
        if !self.shape.get(x, y) {
            return false;
        }
        match dir {
            Direction::Bottom => y == self.height() - 1 || !self.shape.get(x, y + 1),
            Direction::Left => x == 0 || !self.shape.get(x - 1, y),
            Direction::Right => x == self.width() - 1 || !self.shape.get(x + 1, y),
        }
    }

    /// Occupied cells in local coordinates, row-major.
    pub fn cells(&self) -> CellList {
        let mut out = CellList::new();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.shape.get(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// Occupied cells in grid coordinates.
    pub fn grid_cells(&self) -> CellList {
        self.cells()
            .into_iter()
            .map(|(lx, ly)| self.coord_in_grid(lx, ly))
            .collect()
    }

    pub fn rotated_shape(&self) -> ShapeMatrix {
        self.shape.rotated()
    }

    /// Anchor x after a quarter turn, re-centering over the old box.
    pub fn rotated_anchor_x(&self) -> i32 {
        self.x + half_ties_even(self.width() - self.height())
    }

    pub(crate) fn move_down(&mut self) {
        self.y += 1;
    }

    pub(crate) fn move_left(&mut self) {
        self.x -= 1;
    }

    pub(crate) fn move_right(&mut self) {
        self.x += 1;
    }

    pub(crate) fn rotate(&mut self) {
        let x = self.rotated_anchor_x();
        self.shape = self.rotated_shape();
        self.x = x;
    }
}

/// `d / 2` rounded to nearest, ties to even.
fn half_ties_even(d: i32) -> i32 {
    let q = d.div_euclid(2);
    if d.rem_euclid(2) == 0 || q % 2 == 0 {
        q
    } else {
        q + 1
    }
}
