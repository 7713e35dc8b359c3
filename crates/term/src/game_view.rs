//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so every frame can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const FLASH: Rgb = Rgb::new(255, 255, 255);
/// Line-clear flash toggles every this many milliseconds.
const FLASH_PERIOD_MS: u32 = 100;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Last line clear, shown under the panel for a short while.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearBanner {
    pub lines: u32,
    pub points: u32,
    pub level_up: bool,
}

impl ClearBanner {
    fn title(&self) -> &'static str {
        match self.lines {
            1 => "SINGLE",
            2 => "DOUBLE",
            3 => "TRIPLE",
            _ => "TETRIS",
        }
    }
}

/// Top-left corner and outer size of the bordered well.
#[derive(Debug, Clone, Copy)]
struct WellFrame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws the well, the pieces and the side panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_banner(snap, None, viewport, fb);
    }

    pub fn render_into_with_banner(
        &self,
        snap: &GameSnapshot,
        banner: Option<&ClearBanner>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let frame = WellFrame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(fb, frame);
        self.draw_settled(fb, frame, snap);

        if let Some(ghost) = snap.ghost {
            let style = Style::new(Rgb::new(140, 140, 140), WELL_BG).dim();
            for (x, y) in ghost {
                self.fill_board_cell(fb, frame, x, y, '░', style);
            }
        }

        if let Some(active) = snap.active {
            let style = Style::new(active.kind.color().into(), WELL_BG).bold();
            for (x, y) in active.cells {
                self.fill_board_cell(fb, frame, x, y, '█', style);
            }
        }

        self.draw_side_panel(fb, snap, banner, viewport, frame);

        if snap.game_over {
            self.draw_overlay(fb, frame, &["GAME OVER", "", "r: restart"]);
            self.draw_final_score(fb, frame, snap.score);
        } else if snap.paused {
            self.draw_overlay(fb, frame, &["PAUSED", "p: resume"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: WellFrame) {
        let style = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let WellFrame { x, y, w, h } = frame;

        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', Style::new(WELL_BG, WELL_BG));
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_settled(&self, fb: &mut FrameBuffer, frame: WellFrame, snap: &GameSnapshot) {
        // Clearing rows alternate between white and their own colors.
        let flash_on = snap
            .line_clear
            .map(|lc| (lc.remaining_ms / FLASH_PERIOD_MS) % 2 == 0)
            .unwrap_or(false);

        for (y, row) in snap.board.iter().enumerate() {
            let clearing = snap.is_clearing_row(y);
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(_) if clearing && flash_on => ('█', Style::new(FLASH, WELL_BG).bold()),
                    Some(kind) => ('█', Style::new(kind.color().into(), WELL_BG)),
                    None => ('·', Style::new(Rgb::new(90, 90, 100), WELL_BG).dim()),
                };
                self.fill_board_cell(fb, frame, x as i8, y as i8, ch, style);
            }
        }
    }

    /// Fill one board cell; cells outside the well are skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: WellFrame,
        x: i8,
        y: i8,
        ch: char,
        style: Style,
    ) {
        if !(0..BOARD_WIDTH as i8).contains(&x) || !(0..BOARD_HEIGHT as i8).contains(&y) {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        banner: Option<&ClearBanner>,
        viewport: Viewport,
        frame: WellFrame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) < 12 {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "HOLD", label);
        match snap.hold {
            Some(kind) => self.draw_preview(fb, panel_x, y + 1, kind, !snap.can_hold),
            None => fb.put_str(panel_x, y + 1, "-", value),
        }
        y += 4;

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, snap.next, false);
        y += 4;

        fb.put_str(panel_x, y, "GHOST", label);
        let state = if snap.ghost_enabled { "ON" } else { "OFF" };
        fb.put_str(panel_x + 6, y, state, value);

        if let Some(banner) = banner {
            y += 2;
            fb.put_str(panel_x, y, banner.title(), label);
            fb.put_char(panel_x, y + 1, '+', value);
            fb.put_u32(panel_x + 1, y + 1, banner.points, value);
            if banner.level_up {
                fb.put_str(panel_x, y + 2, "LEVEL UP", label);
            }
        }
    }

    /// Two-row miniature of a piece in spawn orientation.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, faded: bool) {
        let color: Rgb = kind.color().into();
        let mut style = Style::new(if faded { color.scaled(1, 2) } else { color }, PANEL_BG);
        if faded {
            style = style.dim();
        }
        // Spawn shapes occupy box rows 0-1, except I which sits on row 1.
        let top = if kind == PieceKind::I { 1 } else { 0 };
        for (dx, dy) in get_shape(kind, Rotation::North) {
            let px = x + dx as u16 * 2;
            let py = y + (dy - top) as u16;
            fb.put_str(px, py, "██", style);
        }
    }

    /// "Final Score: N" on the blank line between the game-over title and hint.
    fn draw_final_score(&self, fb: &mut FrameBuffer, frame: WellFrame, score: u32) {
        const LABEL: &str = "Final Score: ";
        let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let text_w = (LABEL.len() + decimal_width(score)) as u16;
        let x = frame.x + frame.w.saturating_sub(text_w) / 2;
        let y = frame.y + frame.h / 2 + 1;
        fb.put_str(x, y, LABEL, style);
        fb.put_u32(x + LABEL.len() as u16, y, score, style);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: WellFrame, lines: &[&str]) {
        let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = frame.y + frame.h / 2;
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = frame.x + frame.w.saturating_sub(text_w) / 2;
            fb.put_str(x, mid_y + i as u16, text, style);
        }
    }
}

fn decimal_width(mut n: u32) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;

    fn screen_contains(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn renders_panel_labels() {
        let session = GameSession::new(1);
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(60, 24));
        for label in ["SCORE", "LEVEL", "LINES", "HOLD", "NEXT", "GHOST ON"] {
            assert!(screen_contains(&fb, label), "missing {label}");
        }
    }

    #[test]
    fn ghost_follows_toggle() {
        let mut session = GameSession::new(1);
        let view = GameView::default();
        let vp = Viewport::new(60, 24);
        assert!(screen_contains(&view.render(&session.snapshot(), vp), "░"));

        session.toggle_ghost();
        let fb = view.render(&session.snapshot(), vp);
        assert!(!screen_contains(&fb, "░"));
        assert!(screen_contains(&fb, "GHOST OFF"));
    }

    #[test]
    fn paused_overlay() {
        let mut session = GameSession::new(1);
        session.toggle_pause();
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(60, 24));
        assert!(screen_contains(&fb, "PAUSED"));
    }

    #[test]
    fn game_over_overlay_shows_final_score() {
        let session = GameSession::new(1);
        let mut snap = session.snapshot();
        snap.game_over = true;
        snap.active = None;
        snap.score = 1234;
        let fb = GameView::default().render(&snap, Viewport::new(60, 24));
        assert!(screen_contains(&fb, "GAME OVER"));
        assert!(screen_contains(&fb, "Final Score: 1234"));
        assert!(screen_contains(&fb, "r: restart"));
    }

    #[test]
    fn decimal_width_counts_digits() {
        assert_eq!(decimal_width(0), 1);
        assert_eq!(decimal_width(9), 1);
        assert_eq!(decimal_width(10), 2);
        assert_eq!(decimal_width(u32::MAX), 10);
    }

    #[test]
    fn banner_shows_clear_and_level_up() {
        let session = GameSession::new(1);
        let banner = ClearBanner {
            lines: 4,
            points: 800,
            level_up: true,
        };
        let vp = Viewport::new(60, 30);
        let mut fb = FrameBuffer::new(0, 0);
        GameView::default().render_into_with_banner(&session.snapshot(), Some(&banner), vp, &mut fb);
        assert!(screen_contains(&fb, "TETRIS"));
        assert!(screen_contains(&fb, "+800"));
        assert!(screen_contains(&fb, "LEVEL UP"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let session = GameSession::new(1);
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
