//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used by
//! the core state machine, the terminal renderer and the input mapping alike.
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Timing Defaults
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal shell (~60 FPS) |
//! | `INITIAL_FALL_MS` | 1000 | Gravity interval at level 1 |
//! | `LEVEL_SPEED_DECREASE_MS` | 100 | Gravity speed-up per level |
//! | `MIN_FALL_MS` | 100 | Fastest gravity interval |
//! | `LINE_CLEAR_ANIMATION_MS` | 500 | Visual clear window before rows collapse |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame interval of the terminal shell in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const INITIAL_FALL_MS: u32 = 1000;

/// Gravity interval decrease per level gained
pub const LEVEL_SPEED_DECREASE_MS: u32 = 100;

/// Gravity interval floor
pub const MIN_FALL_MS: u32 = 100;

/// Duration of the line-clear window before cleared rows are removed
pub const LINE_CLEAR_ANIMATION_MS: u32 = 500;

/// Lines required per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per row moved by a soft drop
pub const SOFT_DROP_BONUS: u32 = 1;

/// Points per row moved by a hard drop
pub const HARD_DROP_BONUS: u32 = 2;

/// Line clear scoring table
///
/// Base points for clearing N lines at once, multiplied by the current level:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Display color of the kind as RGB.
    ///
    /// Settled cells keep the kind that locked them, so this doubles as the
    /// cell color identifier.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 255, 255),
            PieceKind::O => (255, 255, 0),
            PieceKind::T => (128, 0, 128),
            PieceKind::S => (0, 255, 0),
            PieceKind::Z => (255, 0, 0),
            PieceKind::J => (0, 0, 255),
            PieceKind::L => (255, 165, 0),
        }
    }
}

/// Rotation states
///
/// - **North**: Spawn orientation
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 90° counter-clockwise
///
/// The clockwise cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Apply a rotation direction.
    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Rotation state index (0-3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];
}

/// Direction of a rotation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Direction of a horizontal move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    /// Column delta for this direction.
    pub fn dx(&self) -> i8 {
        match self {
            MoveDirection::Left => -1,
            MoveDirection::Right => 1,
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These are the discrete commands a shell forwards to the session.
/// Quitting is a shell concern and has no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawn)
    Hold,
    /// Show or hide the ghost piece
    ToggleGhost,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

/// Core-side event emitted after a piece locks.
///
/// Taken by the shell to show the last clear; nothing in the core reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Points awarded for the clear (drop points are not included)
    pub line_clear_score: u32,
    pub level_up: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Settled cell colored by the piece kind that locked it
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults_match_classic_rules() {
        assert_eq!(INITIAL_FALL_MS, 1000);
        assert_eq!(LEVEL_SPEED_DECREASE_MS, 100);
        assert_eq!(MIN_FALL_MS, 100);
        assert_eq!(LINE_CLEAR_ANIMATION_MS, 500);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn rotate_by_direction_matches_cw_ccw() {
        for r in Rotation::ALL {
            assert_eq!(r.rotate(RotateDirection::Clockwise), r.rotate_cw());
            assert_eq!(r.rotate(RotateDirection::CounterClockwise), r.rotate_ccw());
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
        }
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
    }
}
