//! Terminal blocktris runner.
//!
//! Renders the session snapshot through the framebuffer renderer, polls keys until the
//! next frame is due, then advances the session by the real elapsed time.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use blocktris::core::{GameConfig, GameSession};
use blocktris::input::{map_key, KeyCommand};
use blocktris::term::{ClearBanner, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blocktris::types::{GameAction, LINE_CLEAR_ANIMATION_MS, LINES_PER_LEVEL, TICK_MS};

/// How long the last clear stays in the side panel.
const BANNER_MS: u32 = 1500;

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blocktris",
    version,
    about = "Falling-block puzzle in the terminal.",
    long_about = "Falling-block puzzle in the terminal.\n\n\
        CONTROLS:\n  Left/Right h/l a/d  Move        Down j/s     Soft drop\n  \
        Up k/w x            Rotate CW   z/y          Rotate CCW\n  \
        Space               Hard drop   c            Hold\n  \
        g                   Ghost       p            Pause\n  \
        r                   Restart     q / Esc      Quit"
)]
struct Args {
    /// Seed for the piece sequence. Defaults to the current time.
    #[arg(long, value_name = "N")]
    seed: Option<u32>,

    /// Start with the ghost piece hidden.
    #[arg(long)]
    no_ghost: bool,

    /// Do not award points for soft drops.
    #[arg(long)]
    no_soft_drop_score: bool,

    /// How long cleared rows flash before they collapse. 0 clears instantly.
    #[arg(long, default_value_t = LINE_CLEAR_ANIMATION_MS, value_name = "MS")]
    clear_animation_ms: u32,

    /// Lines needed per level.
    #[arg(long, default_value_t = LINES_PER_LEVEL, value_name = "N")]
    lines_per_level: u32,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            line_clear_animation_ms: self.clear_animation_ms,
            lines_per_level: self.lines_per_level,
            soft_drop_scoring: !self.no_soft_drop_score,
            ghost_enabled: !self.no_ghost,
            ..GameConfig::default()
        }
    }

    fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    // Validate before touching the terminal so errors print normally.
    let session =
        GameSession::with_config(args.seed(), args.game_config()).context("invalid game options")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, mut session: GameSession) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(TICK_MS as u64);
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();
    let mut banner: Option<(ClearBanner, u32)> = None;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_banner(
            &session.snapshot(),
            banner.as_ref().map(|(b, _)| b),
            Viewport::new(w, h),
            &mut fb,
        );
        term.draw_swap(&mut fb)?;

        // Drain input until the next frame is due.
        let deadline = last_tick + frame;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => match map_key(key) {
                    Some(KeyCommand::Quit) => return Ok(()),
                    Some(KeyCommand::Action(GameAction::Restart)) => {
                        session.reset();
                        banner = None;
                    }
                    Some(KeyCommand::Action(action)) => {
                        session.apply_action(action);
                    }
                    None => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_tick).as_millis().min(u32::MAX as u128) as u32;
        last_tick = now;
        session.tick(elapsed);

        banner = banner
            .map(|(b, left)| (b, left.saturating_sub(elapsed)))
            .filter(|&(_, left)| left > 0);
        if let Some(event) = session.take_last_event() {
            if event.lines_cleared > 0 {
                let shown = ClearBanner {
                    lines: event.lines_cleared,
                    points: event.line_clear_score,
                    level_up: event.level_up,
                };
                banner = Some((shown, BANNER_MS));
            }
        }
    }
}
