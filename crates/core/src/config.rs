//! Session configuration.
//!
//! Defaults reproduce the classic rules: one row per second at level 1, 100ms faster per
//! level down to 100ms, a 500ms line-clear window, a level every 10 lines, and the
//! 100/300/500/800 line table.

use thiserror::Error;

use crate::types::{
    HARD_DROP_BONUS, INITIAL_FALL_MS, LEVEL_SPEED_DECREASE_MS, LINES_PER_LEVEL,
    LINE_CLEAR_ANIMATION_MS, LINE_SCORES, MIN_FALL_MS, SOFT_DROP_BONUS,
};

/// Tunable rules for a [`GameSession`](crate::session::GameSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Gravity interval at level 1
    pub initial_fall_ms: u32,
    /// Gravity speed-up per level
    pub level_speed_decrease_ms: u32,
    /// Gravity interval floor
    pub min_fall_ms: u32,
    /// Line-clear window before rows collapse; 0 commits immediately
    pub line_clear_animation_ms: u32,
    pub lines_per_level: u32,
    /// Base points indexed by lines cleared at once (0-4), multiplied by level
    pub line_scores: [u32; 5],
    pub soft_drop_bonus: u32,
    pub hard_drop_bonus: u32,
    /// Award `soft_drop_bonus` per row for player soft drops
    pub soft_drop_scoring: bool,
    /// Ghost piece visibility at session start
    pub ghost_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_fall_ms: INITIAL_FALL_MS,
            level_speed_decrease_ms: LEVEL_SPEED_DECREASE_MS,
            min_fall_ms: MIN_FALL_MS,
            line_clear_animation_ms: LINE_CLEAR_ANIMATION_MS,
            lines_per_level: LINES_PER_LEVEL,
            line_scores: LINE_SCORES,
            soft_drop_bonus: SOFT_DROP_BONUS,
            hard_drop_bonus: HARD_DROP_BONUS,
            soft_drop_scoring: true,
            ghost_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("lines_per_level must be at least 1")]
    ZeroLinesPerLevel,
    #[error("min_fall_ms must be at least 1")]
    ZeroMinFall,
    #[error("initial_fall_ms ({initial}) is below min_fall_ms ({min})")]
    InitialBelowMin { initial: u32, min: u32 },
    #[error("line score for {lines} lines is lower than for {fewer} lines")]
    DecreasingLineScores { lines: usize, fewer: usize },
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.min_fall_ms == 0 {
            return Err(ConfigError::ZeroMinFall);
        }
        if self.initial_fall_ms < self.min_fall_ms {
            return Err(ConfigError::InitialBelowMin {
                initial: self.initial_fall_ms,
                min: self.min_fall_ms,
            });
        }
        if let Some(lines) = (1..self.line_scores.len())
            .find(|&n| self.line_scores[n] < self.line_scores[n - 1])
        {
            return Err(ConfigError::DecreasingLineScores {
                lines,
                fewer: lines - 1,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_lines_per_level() {
        let cfg = GameConfig {
            lines_per_level: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroLinesPerLevel));
    }

    #[test]
    fn rejects_zero_min_fall() {
        let cfg = GameConfig {
            min_fall_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMinFall));
    }

    #[test]
    fn rejects_initial_below_min() {
        let cfg = GameConfig {
            initial_fall_ms: 50,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InitialBelowMin {
                initial: 50,
                min: 100
            })
        );
    }

    #[test]
    fn rejects_decreasing_line_table() {
        let cfg = GameConfig {
            line_scores: [0, 100, 300, 200, 800],
            ..GameConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::DecreasingLineScores { lines: 3, fewer: 2 }
        );
        assert_eq!(
            err.to_string(),
            "line score for 3 lines is lower than for 2 lines"
        );
    }
}
