//! Scoring module - line clears, drops, levels and gravity
//!
//! Classic rules: a clear of N lines at once is worth `line_scores[N] × level`, soft drops
//! earn a bonus per row, hard drops twice that, and the level is `1 + lines / 10`.
//! All functions are pure so the session can compute the score delta the moment full
//! rows are detected, before the board is touched.

use crate::config::GameConfig;

/// How a piece was moved down by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    Soft,
    Hard,
}

/// Points for clearing `lines` rows at once at `level`.
///
/// 0 lines or more than 4 score nothing.
pub fn calculate_line_score(lines: usize, level: u32, table: &[u32; 5]) -> u32 {
    if lines == 0 || lines >= table.len() {
        return 0;
    }
    table[lines].saturating_mul(level)
}

/// Points for a drop of `rows` rows.
pub fn calculate_drop_score(rows: u32, kind: DropKind, config: &GameConfig) -> u32 {
    let per_row = match kind {
        DropKind::Soft => config.soft_drop_bonus,
        DropKind::Hard => config.hard_drop_bonus,
    };
    rows.saturating_mul(per_row)
}

/// Level for a cumulative line count. Levels start at 1.
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    1 + total_lines / lines_per_level.max(1)
}

/// Gravity interval for a level, in milliseconds.
///
/// Decreases by `level_speed_decrease_ms` per level and never goes below `min_fall_ms`.
pub fn gravity_interval_ms(level: u32, config: &GameConfig) -> u32 {
    let speedup = level
        .saturating_sub(1)
        .saturating_mul(config.level_speed_decrease_ms);
    config
        .initial_fall_ms
        .saturating_sub(speedup)
        .max(config.min_fall_ms)
}
