//! Terminal rendering for blocktris.
//!
//! A small, game-oriented rendering layer: the session snapshot is drawn into a
//! framebuffer of styled glyphs, which is then flushed to the terminal as a diff
//! against the previous frame. No widget or layout library is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{ClearBanner, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
