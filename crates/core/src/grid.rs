//! Grid module - settled cells, the active piece, and the simulation step
//!
//! Cells are stored in a flat row-major `Vec`, `(x, y)` with y = 0 at the top.
//! The active piece is kept beside the cells rather than written into them:
//! it only becomes cell state when it locks. Renderers read the combined view
//! through [`Grid::visible_cell`] or [`Grid::snapshot`].
//!
//! Every mutation of the active piece goes through a collision predicate
//! first. The predicates only look at the edge cells of the piece in the
//! direction of travel; interior cells are backed by the piece itself.

use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::shapes::{random_shape, shape_of, ShapeRecord};
use crate::snapshot::GridSnapshot;
use crate::types::{Cell, Direction, Intent, PieceKind, MIN_GRID_SIDE};

/// What a single [`Grid::step`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvent {
    /// The active piece fell one row.
    pub moved: bool,
    /// Kind of the piece that locked this step.
    pub locked: Option<PieceKind>,
    /// Kind of the piece spawned this step.
    pub spawned: Option<PieceKind>,
    pub lines_cleared: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    active: Option<Piece>,
    rng: SimpleRng,
    game_over: bool,
}

impl Grid {
    /// Create an empty grid with no active piece.
    ///
    /// # Panics
    ///
    /// Panics if either side is smaller than [`MIN_GRID_SIDE`].
    pub fn new(width: u16, height: u16, seed: u32) -> Self {
        assert!(
            width >= MIN_GRID_SIDE && height >= MIN_GRID_SIDE,
            "grid must be at least {MIN_GRID_SIDE}x{MIN_GRID_SIDE}, got {width}x{height}"
        );
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![None; width as usize * height as usize],
            active: None,
            rng: SimpleRng::new(seed),
            game_over: false,
        }
    }

    pub fn width(&self) -> u16 {
        self.width as u16
    }

    pub fn height(&self) -> u16 {
        self.height as u16
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Settled cell at (x, y), `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set a settled cell. Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and holding a settled cell.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Settled cell with the active piece drawn over it.
    pub fn visible_cell(&self, x: i32, y: i32) -> Option<Cell> {
        let settled = self.get(x, y)?;
        if let Some(piece) = &self.active {
            if piece.contains_grid_coord(x, y) {
                let (lx, ly) = (x - piece.x(), y - piece.y());
                if piece.shape().get(lx, ly) {
                    return Some(Some(piece.kind()));
                }
            }
        }
        Some(settled)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Spawn the first piece if none is active.
    pub fn start(&mut self) {
        if self.active.is_none() && !self.game_over {
            self.spawn_random();
        }
    }

    /// Spawn a specific shape, replacing any active piece.
    ///
    /// Returns false (and ends the game) if the spawn box overlaps settled cells.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        self.spawn_record(shape_of(kind))
    }

    fn spawn_random(&mut self) -> bool {
        let record = random_shape(&mut self.rng);
        self.spawn_record(record)
    }

    fn spawn_record(&mut self, record: &ShapeRecord) -> bool {
        if self.game_over {
            return false;
        }
        let x = self.width / 2 - record.matrix.width() / 2;
        let piece = Piece::new(record, x, 0);

        let blocked = (0..piece.height())
            .flat_map(|ly| (0..piece.width()).map(move |lx| (lx, ly)))
            .any(|(lx, ly)| {
                let (gx, gy) = piece.coord_in_grid(lx, ly);
                self.is_occupied(gx, gy)
            });
        if blocked {
            self.active = None;
            self.game_over = true;
            return false;
        }

        self.active = Some(piece);
        true
    }

    pub fn can_move_down(&self, piece: &Piece) -> bool {
        for (lx, ly) in piece.cells() {
            if !piece.is_edge_cell(Direction::Bottom, lx, ly) {
                continue;
            }
            let (gx, gy) = piece.coord_in_grid(lx, ly);
            if gy + 1 >= self.height {
                return false;
            }
            if self.is_occupied(gx, gy + 1) {
                return false;
            }
        }
        true
    }

    pub fn can_move_left(&self, piece: &Piece) -> bool {
        for (lx, ly) in piece.cells() {
            if !piece.is_edge_cell(Direction::Left, lx, ly) {
                continue;
            }
            let (gx, gy) = piece.coord_in_grid(lx, ly);
            if gx - 1 < 0 {
                return false;
            }
            if self.is_occupied(gx - 1, gy) {
                return false;
            }
        }
        true
    }

    pub fn can_move_right(&self, piece: &Piece) -> bool {
        for (lx, ly) in piece.cells() {
            if !piece.is_edge_cell(Direction::Right, lx, ly) {
                continue;
            }
            let (gx, gy) = piece.coord_in_grid(lx, ly);
            if gx + 1 >= self.width {
                return false;
            }
            if self.is_occupied(gx + 1, gy) {
                return false;
            }
        }
        true
    }

    /// Whether a clockwise quarter turn fits.
    ///
    /// Settled cells inside the piece's current bounding box are ignored, even
    /// where the shape itself is empty. The top edge is not checked.
    pub fn can_rotate(&self, piece: &Piece) -> bool {
        let shape = piece.rotated_shape();
        let x = piece.rotated_anchor_x();
        let y = piece.y();

        if x < 0 || x + shape.width() > self.width || y + shape.height() > self.height {
            return false;
        }

        for ly in 0..shape.height() {
            for lx in 0..shape.width() {
                if !shape.get(lx, ly) {
                    continue;
                }
                let (gx, gy) = (x + lx, y + ly);
                if self.is_occupied(gx, gy) && !piece.contains_grid_coord(gx, gy) {
                    return false;
                }
            }
        }
        true
    }

    /// Apply a player intent if its predicate allows it.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let allowed = match intent {
            Intent::MoveLeft => self.can_move_left(&piece),
            Intent::MoveRight => self.can_move_right(&piece),
            Intent::Rotate => self.can_rotate(&piece),
        };
        if !allowed {
            return false;
        }

        if let Some(active) = self.active.as_mut() {
            match intent {
                Intent::MoveLeft => active.move_left(),
                Intent::MoveRight => active.move_right(),
                Intent::Rotate => active.rotate(),
            }
        }
        true
    }

    /// Advance one tick: fall one row, or lock and spawn; then clear full rows.
    pub fn step(&mut self) -> StepEvent {
        let mut event = StepEvent::default();
        if self.game_over {
            event.game_over = true;
            return event;
        }

        match self.active {
            None => {
                if self.spawn_random() {
                    event.spawned = self.active.map(|p| p.kind());
                }
            }
            Some(piece) if self.can_move_down(&piece) => {
                if let Some(active) = self.active.as_mut() {
                    active.move_down();
                }
                event.moved = true;
            }
            Some(piece) => {
                self.lock(&piece);
                self.active = None;
                event.locked = Some(piece.kind());
                if self.spawn_random() {
                    event.spawned = self.active.map(|p| p.kind());
                }
            }
        }

        event.lines_cleared = self.clear_full_rows();
        event.game_over = self.game_over;
        event
    }

    fn lock(&mut self, piece: &Piece) {
        for (gx, gy) in piece.grid_cells() {
            self.set(gx, gy, Some(piece.kind()));
        }
    }

    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .all(|c| c.is_some())
    }

    /// Empty every cell of row `y`.
    pub fn clear_row(&mut self, y: i32) {
        if y < 0 || y >= self.height {
            return;
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize].fill(None);
    }

    /// Shift every row above `y` down by one, emptying the top row.
    ///
    /// Cells inside the active piece's bounding box are left untouched.
    pub fn compact_above(&mut self, y: i32) {
        if y < 0 || y >= self.height {
            return;
        }
        let active = self.active;
        let in_box = |x: i32, row: i32| active.map_or(false, |p| p.contains_grid_coord(x, row));

        for row in (1..=y).rev() {
            for x in 0..self.width {
                if in_box(x, row) {
                    continue;
                }
                let above = self.cells[(row as usize - 1) * self.width as usize + x as usize];
                self.cells[row as usize * self.width as usize + x as usize] = above;
            }
        }
        for x in 0..self.width {
            if !in_box(x, 0) {
                self.cells[x as usize] = None;
            }
        }
    }

    /// Clear every full row, compacting after each. Returns the number cleared.
    ///
    /// Rows are scanned bottom-up and a row is re-checked after the rows above
    /// it shift into place, so adjacent full rows are each cleared once.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut y = self.height - 1;
        // Bounded by the row count.
        while y >= 0 && cleared < self.height as u32 {
            if self.is_row_full(y) {
                self.clear_row(y);
                self.compact_above(y);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Copy of the visible state for rendering.
    pub fn snapshot(&self) -> GridSnapshot {
        let mut snap = GridSnapshot::new(self.width(), self.height());
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot, reusing its allocation.
    pub fn snapshot_into(&self, snap: &mut GridSnapshot) {
        snap.reset(self.width(), self.height());
        snap.cells.copy_from_slice(&self.cells);
        if let Some(piece) = &self.active {
            for (gx, gy) in piece.grid_cells() {
                snap.set(gx, gy, Some(piece.kind()));
            }
        }
        snap.game_over = self.game_over;
    }
}
