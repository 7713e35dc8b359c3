//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the piece
//! that locked there. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True iff (x, y) is inside the grid and unoccupied.
    pub fn is_cell_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Every cell in `cells` is free.
    pub fn can_place(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().all(|&(x, y)| self.is_cell_free(x, y))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, top to bottom. Does not modify the board.
    pub fn full_rows(&self) -> ArrayVec<usize, HEIGHT> {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove all full rows at once and collapse the rows above them.
    ///
    /// Each surviving row moves down by the number of removed rows beneath it, and the
    /// vacated rows at the top become empty. Returns the removed row indices (top to
    /// bottom, as they were before removal). No full rows means no change.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, HEIGHT> {
        let cleared = self.full_rows();
        if cleared.is_empty() {
            return cleared;
        }

        // Two-pointer compaction from the bottom; overlapping copies go through copy_within.
        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if cleared.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared
    }

    /// Copy a piece's cells into the grid, colored by its kind.
    ///
    /// The caller must have validated the placement. Locking onto an occupied or
    /// out-of-bounds cell is a bug in move validation.
    pub fn lock_piece(&mut self, piece: &Tetromino) {
        let cells = piece.occupied_cells();
        debug_assert!(
            self.can_place(&cells),
            "lock_piece on an invalid placement: {:?}",
            piece
        );

        for (x, y) in cells {
            if self.is_cell_free(x, y) {
                self.set(x, y, Some(piece.kind));
            }
        }
    }

    /// True if any cell of the spawn region is already taken.
    pub fn is_game_over(&self, spawn_region: &[(i8, i8)]) -> bool {
        !self.can_place(spawn_region)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Empty the whole board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Test fixture builder: text rows, top to bottom; `.` is empty, a piece letter is
    /// filled with that kind.
    ///
    /// Missing rows at the top are empty, so a test can describe only the bottom of the
    /// well.
    ///
    /// # Panics
    ///
    /// On any character that is neither `.` nor a piece letter.
    #[cfg(any(test, feature = "test-util"))]
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().take(HEIGHT).enumerate() {
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = crate::types::PieceKind::from_str(&ch.to_string())
                    .unwrap_or_else(|| panic!("unknown board fixture character {ch:?}"));
                board.cells[(offset + i) * WIDTH + x] = Some(kind);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
