//! Shapes module - the seven piece matrices and their color identities
//!
//! Each shape is a small binary matrix stored in a fixed 4x4 buffer with an
//! explicit width and height, so rotating a shape never allocates.

use crate::rng::SimpleRng;
use crate::types::PieceKind;

/// Largest side of any catalog shape.
pub const MAX_EXTENT: usize = 4;

/// Rectangular binary matrix, `cells[y][x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_EXTENT]; MAX_EXTENT],
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 values. Only the top-left
    /// `width x height` region of `rows` is read.
    pub const fn new(width: u8, height: u8, rows: [[u8; MAX_EXTENT]; MAX_EXTENT]) -> Self {
        let mut cells = [[false; MAX_EXTENT]; MAX_EXTENT];
        let mut y = 0;
        while y < height as usize {
            let mut x = 0;
            while x < width as usize {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// Whether the local cell is set. Coordinates outside the matrix read as 0.
    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return false;
        }
        self.cells[y as usize][x as usize]
    }

    /// Clockwise quarter turn: `new[x][old_height - 1 - y] = old[y][x]`.
    pub fn rotated(&self) -> Self {
        let mut cells = [[false; MAX_EXTENT]; MAX_EXTENT];
        let old_h = self.height as usize;
        for y in 0..old_h {
            for x in 0..self.width as usize {
                cells[x][old_h - 1 - y] = self.cells[y][x];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells
            .iter()
            .take(self.height as usize)
            .map(|row| row.iter().take(self.width as usize).filter(|c| **c).count())
            .sum()
    }
}

/// A catalog entry: a shape bound to its color identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRecord {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
}

/// The catalog, in [`PieceKind::ALL`] order.
pub const CATALOG: [ShapeRecord; 7] = [
    ShapeRecord {
        kind: PieceKind::I,
        matrix: ShapeMatrix::new(4, 1, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
    },
    ShapeRecord {
        kind: PieceKind::O,
        matrix: ShapeMatrix::new(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    },
    ShapeRecord {
        kind: PieceKind::T,
        matrix: ShapeMatrix::new(3, 2, [[1, 1, 1, 0], [0, 1, 0, 0], [0; 4], [0; 4]]),
    },
    ShapeRecord {
        kind: PieceKind::S,
        matrix: ShapeMatrix::new(3, 2, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    },
    ShapeRecord {
        kind: PieceKind::Z,
        matrix: ShapeMatrix::new(3, 2, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
    },
    ShapeRecord {
        kind: PieceKind::J,
        matrix: ShapeMatrix::new(3, 2, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    },
    ShapeRecord {
        kind: PieceKind::L,
        matrix: ShapeMatrix::new(3, 2, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    },
];

/// Look up the catalog record for a kind.
pub fn shape_of(kind: PieceKind) -> &'static ShapeRecord {
    &CATALOG[kind.index()]
}

/// Uniform pick among the catalog records.
pub fn random_shape(rng: &mut SimpleRng) -> &'static ShapeRecord {
    &CATALOG[rng.next_range(CATALOG.len() as u32) as usize]
}
