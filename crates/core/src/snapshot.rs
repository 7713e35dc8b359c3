use crate::pieces::Tetromino;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Coarse session phase, without the line-clear payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Spawning,
    Falling,
    Locking,
    LineClear,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: [(i8, i8); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.occupied_cells(),
        }
    }
}

/// Rows being cleared and the time left before they collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineClearSnapshot {
    /// `rows[y]` is true for every row being removed
    pub rows: [bool; HEIGHT],
    pub remaining_ms: u32,
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; WIDTH]; HEIGHT],
    pub active: Option<ActiveSnapshot>,
    /// Landing cells of the active piece; `None` when the ghost is hidden
    pub ghost: Option<[(i8, i8); 4]>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: PhaseKind,
    pub line_clear: Option<LineClearSnapshot>,
    pub paused: bool,
    pub game_over: bool,
    pub ghost_enabled: bool,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && self.phase == PhaseKind::Falling
    }

    /// Is row `y` inside the line-clear window?
    pub fn is_clearing_row(&self, y: usize) -> bool {
        self.line_clear
            .map(|lc| lc.rows.get(y).copied().unwrap_or(false))
            .unwrap_or(false)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; WIDTH]; HEIGHT],
            active: None,
            ghost: None,
            next: PieceKind::I,
            hold: None,
            can_hold: true,
            score: 0,
            level: 1,
            lines: 0,
            phase: PhaseKind::Spawning,
            line_clear: None,
            paused: false,
            game_over: false,
            ghost_enabled: true,
            seed: 0,
        }
    }
}
