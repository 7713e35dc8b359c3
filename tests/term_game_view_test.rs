use blocktris::core::{GameSession, PhaseKind};
use blocktris::term::{GameView, Viewport};
use blocktris::types::PieceKind;

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSession::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the well is 20x20 plus a one-glyph border.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_as_two_glyphs_wide() {
    let mut snap = GameSession::new(1).snapshot();
    snap.board[19][0] = Some(PieceKind::I);
    snap.active = None;
    snap.ghost = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_uses_piece_color() {
    let mut snap = GameSession::new(1).snapshot();
    snap.board[19][0] = Some(PieceKind::L);
    snap.active = None;
    snap.ghost = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let style = fb.get(1, 20).unwrap().style;
    assert_eq!((style.fg.r, style.fg.g, style.fg.b), PieceKind::L.color());
}

#[test]
fn term_view_flashes_clearing_rows() {
    let mut snap = GameSession::new(1).snapshot();
    snap.active = None;
    snap.ghost = None;
    for cell in snap.board[19].iter_mut() {
        *cell = Some(PieceKind::J);
    }
    let mut rows = [false; 20];
    rows[19] = true;
    snap.phase = PhaseKind::LineClear;
    snap.line_clear = Some(blocktris::core::LineClearSnapshot {
        rows,
        remaining_ms: 400,
    });

    let view = GameView::default();
    let vp = Viewport::new(22, 22);
    let lit = view.render(&snap, vp).get(1, 20).unwrap().style.fg;
    assert_eq!((lit.r, lit.g, lit.b), (255, 255, 255));

    if let Some(lc) = snap.line_clear.as_mut() {
        lc.remaining_ms = 350;
    }
    let dark = view.render(&snap, vp).get(1, 20).unwrap().style.fg;
    assert_eq!((dark.r, dark.g, dark.b), PieceKind::J.color());
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = GameSession::new(1).snapshot();
    snap.game_over = true;
    snap.phase = PhaseKind::GameOver;
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.iter().any(|row| row.contains("GAME OVER")));
    assert!(text.iter().any(|row| row.contains("r: restart")));
}

#[test]
fn term_view_render_into_reuses_buffer_across_sizes() {
    let snap = GameSession::new(3).snapshot();
    let view = GameView::default();
    let mut fb = blocktris::term::FrameBuffer::new(0, 0);

    view.render_into(&snap, Viewport::new(80, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 24));
    view.render_into(&snap, Viewport::new(40, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 30));
}
