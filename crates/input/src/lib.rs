//! Terminal input: maps `crossterm` key events to [`types::GameAction`]s.
//!
//! The shell has no key-release tracking; every press or auto-repeat is one command.

pub mod map;

pub use blocktris_types as types;

pub use map::{handle_key_event, map_key, should_quit, KeyCommand};
