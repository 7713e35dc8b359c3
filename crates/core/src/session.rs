//! Game session - the phase machine that ties board, pieces, queue and scoring together
//!
//! A session is driven by two kinds of input: discrete player commands and
//! `tick(elapsed_ms)`. `Spawning` and `Locking` are resolved inside the call that entered
//! them, so callers only ever observe `Falling`, `LineClear` or `GameOver`.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, gravity_interval_ms, DropKind,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, LineClearSnapshot, PhaseKind};
use crate::types::{
    GameAction, LockEvent, MoveDirection, PieceKind, RotateDirection, BOARD_HEIGHT,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Next piece is being drawn and placed
    Spawning,
    Falling,
    /// Active piece is being written into the board
    Locking,
    /// Full rows are flashing; they stay on the board until `remaining_ms` runs out
    LineClear {
        rows: ArrayVec<usize, { BOARD_HEIGHT as usize }>,
        remaining_ms: u32,
    },
    GameOver,
}

impl SessionPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            SessionPhase::Spawning => PhaseKind::Spawning,
            SessionPhase::Falling => PhaseKind::Falling,
            SessionPhase::Locking => PhaseKind::Locking,
            SessionPhase::LineClear { .. } => PhaseKind::LineClear,
            SessionPhase::GameOver => PhaseKind::GameOver,
        }
    }
}

/// One game from first spawn to game over, plus restarts.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    can_hold: bool,
    piece_queue: PieceQueue,
    phase: SessionPhase,
    /// Seed the current game started from
    seed: u32,
    /// Last lock event (consumed by the shell).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    gravity_timer_ms: u32,
    paused: bool,
    ghost_enabled: bool,
}

impl GameSession {
    /// Start a session with the default rules. The first piece is already falling.
    pub fn new(seed: u32) -> Self {
        Self::start(seed, GameConfig::default())
    }

    /// Start a session with custom rules.
    pub fn with_config(seed: u32, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(seed, config))
    }

    fn start(seed: u32, config: GameConfig) -> Self {
        let mut session = Self {
            config,
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            piece_queue: PieceQueue::new(seed),
            phase: SessionPhase::Spawning,
            seed,
            last_event: None,
            score: 0,
            level: 1,
            lines: 0,
            gravity_timer_ms: 0,
            paused: false,
            ghost_enabled: config.ghost_enabled,
        };
        session.resolve_transient();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Landing position of the active piece, when the ghost is shown and the piece is falling.
    pub fn ghost(&self) -> Option<Tetromino> {
        if !self.ghost_enabled || self.phase != SessionPhase::Falling {
            return None;
        }
        self.active.map(|piece| piece.ghost(&self.board))
    }

    pub fn next_piece(&self) -> PieceKind {
        self.piece_queue.peek()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn ghost_enabled(&self) -> bool {
        self.ghost_enabled
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level, &self.config)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost().map(|g| g.occupied_cells());
        out.next = self.next_piece();
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.phase = self.phase.kind();
        out.line_clear = match &self.phase {
            SessionPhase::LineClear { rows, remaining_ms } => {
                let mut flags = [false; BOARD_HEIGHT as usize];
                for &y in rows {
                    flags[y] = true;
                }
                Some(LineClearSnapshot {
                    rows: flags,
                    remaining_ms: *remaining_ms,
                })
            }
            _ => None,
        };
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.ghost_enabled = self.ghost_enabled;
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// The active piece, if player commands may touch it right now.
    fn controllable(&self) -> Option<Tetromino> {
        if self.paused || self.phase != SessionPhase::Falling {
            return None;
        }
        self.active
    }

    pub fn move_piece(&mut self, direction: MoveDirection) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        match piece.try_move(&self.board, direction.dx(), 0) {
            Some(moved) => {
                self.active = Some(moved);
                true
            }
            None => false,
        }
    }

    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        match piece.try_rotate(&self.board, direction) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Move down one row. A blocked soft drop does nothing; gravity does the locking.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let Some(moved) = piece.try_move(&self.board, 0, 1) else {
            return false;
        };
        self.active = Some(moved);
        if self.config.soft_drop_scoring {
            let points = calculate_drop_score(1, DropKind::Soft, &self.config);
            self.score = self.score.saturating_add(points);
        }
        true
    }

    /// Drop to the landing row and lock immediately.
    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };
        let (landed, rows) = piece.hard_drop(&self.board);
        self.active = Some(landed);
        let points = calculate_drop_score(rows, DropKind::Hard, &self.config);
        self.score = self.score.saturating_add(points);

        self.phase = SessionPhase::Locking;
        self.resolve_transient();
        true
    }

    /// Swap the active piece with the hold slot. Allowed once per spawned piece.
    ///
    /// A swap whose held piece would not fit at the spawn position is rejected.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(piece) = self.controllable() else {
            return false;
        };

        let swapped = self.hold.map(Tetromino::spawn);
        if swapped.is_some_and(|s| !s.fits(&self.board)) {
            return false;
        }

        self.hold = Some(piece.kind);
        match swapped {
            Some(swapped) => {
                self.active = Some(swapped);
                self.gravity_timer_ms = 0;
            }
            None => {
                self.active = None;
                self.phase = SessionPhase::Spawning;
                self.resolve_transient();
            }
        }

        self.can_hold = false;
        true
    }

    /// Show or hide the landing preview. Works in every phase.
    pub fn toggle_ghost(&mut self) -> bool {
        self.ghost_enabled = !self.ghost_enabled;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Advance time by `elapsed_ms`. Returns true if anything moved, locked or cleared.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused {
            return false;
        }

        match &mut self.phase {
            SessionPhase::LineClear { remaining_ms, .. } => {
                if elapsed_ms < *remaining_ms {
                    *remaining_ms -= elapsed_ms;
                    return false;
                }
                // Time left over after the window is not carried into the next piece.
                self.board.clear_full_rows();
                self.phase = SessionPhase::Spawning;
                self.resolve_transient();
                true
            }
            SessionPhase::Falling => {
                self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
                let mut changed = false;
                while self.phase == SessionPhase::Falling {
                    let interval = self.gravity_interval_ms();
                    if self.gravity_timer_ms < interval {
                        break;
                    }
                    self.gravity_timer_ms -= interval;
                    self.gravity_step();
                    changed = true;
                }
                changed
            }
            _ => false,
        }
    }

    /// Start a new game. Allowed in any phase; config and ghost visibility carry over.
    pub fn reset(&mut self) {
        let seed = self.piece_queue.seed();
        let ghost_enabled = self.ghost_enabled;

        *self = Self::start(seed, self.config);
        self.ghost_enabled = ghost_enabled;
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(MoveDirection::Left),
            GameAction::MoveRight => self.move_piece(MoveDirection::Right),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            GameAction::Hold => self.hold(),
            GameAction::ToggleGhost => self.toggle_ghost(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    fn gravity_step(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        match piece.try_move(&self.board, 0, 1) {
            Some(moved) => self.active = Some(moved),
            None => {
                self.phase = SessionPhase::Locking;
                self.resolve_transient();
            }
        }
    }

    /// Run `Spawning`/`Locking` until the session settles in an observable phase.
    fn resolve_transient(&mut self) {
        loop {
            match self.phase {
                SessionPhase::Spawning => self.spawn_next(),
                SessionPhase::Locking => self.lock_active(),
                _ => return,
            }
        }
    }

    fn spawn_next(&mut self) {
        let kind = self.piece_queue.draw();
        let piece = Tetromino::spawn(kind);
        self.gravity_timer_ms = 0;

        if self.board.is_game_over(&piece.occupied_cells()) {
            self.active = None;
            self.phase = SessionPhase::GameOver;
            return;
        }

        self.active = Some(piece);
        self.can_hold = true;
        self.phase = SessionPhase::Falling;
    }

    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            self.phase = SessionPhase::Spawning;
            return;
        };
        self.board.lock_piece(&piece);

        let rows = self.board.full_rows();
        let cleared = rows.len();
        // Score at the level the clear happened on, before the new lines count.
        let points = calculate_line_score(cleared, self.level, &self.config.line_scores);
        self.score = self.score.saturating_add(points);

        let previous_level = self.level;
        self.lines = self.lines.saturating_add(cleared as u32);
        self.level = calculate_level(self.lines, self.config.lines_per_level);

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            line_clear_score: points,
            level_up: self.level > previous_level,
        });

        self.phase = if rows.is_empty() {
            SessionPhase::Spawning
        } else if self.config.line_clear_animation_ms == 0 {
            self.board.clear_full_rows();
            SessionPhase::Spawning
        } else {
            SessionPhase::LineClear {
                rows,
                remaining_ms: self.config.line_clear_animation_ms,
            }
        };
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
