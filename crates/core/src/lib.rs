//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, the session phase machine, and the read-only
//! snapshot the terminal shell renders from. It has no dependencies on terminal I/O.
//!
//! - **Deterministic**: the same seed and the same sequence of commands and ticks produce
//!   the same game
//! - **Allocation-free hot path**: fixed arrays and `ArrayVec` only
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 well with collision checks and line clearing
//! - [`pieces`]: tetromino shapes and SRS rotation with wall kicks
//! - [`rng`]: 7-bag piece generation
//! - [`scoring`]: line, drop and level rules
//! - [`config`]: tunable rules and their validation
//! - [`session`]: [`GameSession`], the phase machine driven by commands and `tick`
//! - [`snapshot`]: fixed-size copy of a session for rendering
//!
//! # Example
//!
//! ```
//! use blocktris_core::GameSession;
//! use blocktris_core::types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Gravity starts at one row per 1000ms and speeds up by 100ms per level, down to 100ms.
//! A line clear holds the full rows on the board for 500ms before they collapse.
//! Call [`GameSession::tick`] every frame with the elapsed time.

pub mod board;
pub mod config;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blocktris_types as types;

pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use pieces::{get_shape, Tetromino};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, DropKind};
pub use session::{GameSession, SessionPhase};
pub use snapshot::{ActiveSnapshot, GameSnapshot, LineClearSnapshot, PhaseKind};
