//! Pieces module - Tetromino shapes, movement and SRS rotation
//!
//! Shapes and wall kicks follow the Super Rotation System. Every offset here is in
//! board coordinates with y growing downward; the guideline kick tables are written
//! with y growing upward, so their vertical components are negated below.
//! Reference: https://tetris.wiki/SRS

use crate::board::Board;
use crate::types::{PieceKind, RotateDirection, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin, all inside a 4x4 box
pub type PieceShape = [MinoOffset; 4];

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind_index(kind)][rotation.index()]
}

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    }
}

/// [kind][rotation] -> mino offsets. Rotation order is N, E, S, W.
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O (same for all rotations)
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// SRS wall kick data: five (dx, dy) offsets tried in order, the first is always (0, 0).
pub type KickTable = [[(i8, i8); 5]; 8];

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// O piece never kicks
const O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // N->E
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // N->W
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // E->N
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // E->S
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // S->E
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // S->W
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // W->S
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // W->N
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // N->E
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // N->W
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // E->N
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // E->S
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // S->E
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // S->W
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // W->S
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // W->N
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Get the kick row for a rotation transition
fn get_kick_index(from: Rotation, direction: RotateDirection) -> usize {
    use RotateDirection::{Clockwise as Cw, CounterClockwise as Ccw};
    match (from, direction) {
        (Rotation::North, Cw) => 0,
        (Rotation::North, Ccw) => 1,
        (Rotation::East, Ccw) => 2,
        (Rotation::East, Cw) => 3,
        (Rotation::South, Ccw) => 4,
        (Rotation::South, Cw) => 5,
        (Rotation::West, Ccw) => 6,
        (Rotation::West, Cw) => 7,
    }
}

/// Ordered kick offsets for rotating `kind` out of `from` in `direction`.
pub fn kick_offsets(
    kind: PieceKind,
    from: Rotation,
    direction: RotateDirection,
) -> &'static [(i8, i8); 5] {
    &get_kick_table(kind)[get_kick_index(from, direction)]
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// A piece at the fixed spawn position and rotation
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos.
    pub fn occupied_cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if all minos are at free, in-bounds positions
    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(&self.occupied_cells())
    }

    fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// The piece moved by (dx, dy), or None if that placement does not fit.
    pub fn try_move(&self, board: &Board, dx: i8, dy: i8) -> Option<Self> {
        let moved = self.translated(dx, dy);
        moved.fits(board).then_some(moved)
    }

    /// Rotate with wall kicks.
    ///
    /// Tries each kick offset of the transition in order and returns the first
    /// placement that fits. O pieces have no distinct rotation states and are rejected.
    pub fn try_rotate(&self, board: &Board, direction: RotateDirection) -> Option<Self> {
        if self.kind == PieceKind::O {
            return None;
        }

        let rotated = Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        };

        kick_offsets(self.kind, self.rotation, direction)
            .iter()
            .map(|&(dx, dy)| rotated.translated(dx, dy))
            .find(|candidate| candidate.fits(board))
    }

    /// Drop straight down until blocked.
    ///
    /// Returns the resting piece and the number of rows it fell.
    pub fn hard_drop(&self, board: &Board) -> (Self, u32) {
        let mut piece = *self;
        let mut rows = 0;
        while let Some(next) = piece.try_move(board, 0, 1) {
            piece = next;
            rows += 1;
        }
        (piece, rows)
    }

    /// Where the piece would land if hard-dropped.
    pub fn ghost(&self, board: &Board) -> Self {
        self.hard_drop(board).0
    }

    /// Check if the piece is resting on something
    pub fn is_grounded(&self, board: &Board) -> bool {
        self.try_move(board, 0, 1).is_none()
    }
}
