use crate::types::{Cell, PieceKind};

/// Visible grid state: settled cells with the active piece drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major, `y * width + x`.
    pub cells: Vec<Cell>,
    pub game_over: bool,
}

impl GridSnapshot {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            game_over: false,
        }
    }

    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width as usize * height as usize, None);
        self.game_over = false;
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Number of cells holding `kind`.
    pub fn count_kind(&self, kind: PieceKind) -> usize {
        self.cells.iter().filter(|c| **c == Some(kind)).count()
    }
}
