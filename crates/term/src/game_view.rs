//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Grid};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Cell, Gem, Pos, SessionPhase};

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

/// Transient decorations layered over the snapshot's board.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardOverlay<'a> {
    pub cursor: Option<Pos>,
    /// Replaces the snapshot's cells while a cascade is being replayed
    pub board: Option<&'a Grid>,
    pub highlighted: &'a [Pos],
    pub fresh: &'a [Pos],
    pub rejected: &'a [Pos],
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 95);
const SELECTED_BG: Rgb = Rgb::new(150, 130, 40);
const MATCH_BG: Rgb = Rgb::new(230, 230, 230);
const FRESH_BG: Rgb = Rgb::new(45, 60, 45);
const REJECT_BG: Rgb = Rgb::new(150, 40, 40);

const PROGRESS_W: u16 = 10;
const INSTRUCTIONS: &str = "arrows/hjkl move  space select  esc cancel  q quit";

/// Glyph and color per gem kind; shape differs too, so kinds stay readable
/// without color.
const GEMS: [(char, Rgb); 8] = [
    ('◆', Rgb::new(230, 70, 70)),
    ('●', Rgb::new(80, 200, 90)),
    ('▲', Rgb::new(80, 130, 235)),
    ('■', Rgb::new(240, 210, 70)),
    ('★', Rgb::new(200, 110, 220)),
    ('♥', Rgb::new(255, 150, 60)),
    ('✚', Rgb::new(80, 215, 215)),
    ('♣', Rgb::new(235, 235, 235)),
];

/// Renders the board, side panel and phase overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Board frame placement computed once per frame
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: &BoardOverlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let size = snap.size as u16;
        let frame_w = size * self.cell_w + 2;
        let frame_h = size * self.cell_h + 2;
        let panel_w = 22;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w + panel_w) / 2,
            y: viewport.height.saturating_sub(frame_h + 2) / 2,
            w: frame_w,
            h: frame_h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            Style::default().on(BOARD_BG),
        );
        draw_border(fb, frame, Style::new(Rgb::new(200, 200, 200), PANEL_BG));

        if snap.has_board() || overlay.board.is_some() {
            self.draw_cells(fb, frame, snap, overlay);
        }

        self.draw_side_panel(fb, snap, frame);

        let dim = Style::default().dim();
        let hint_y = frame.y.saturating_add(frame.h).saturating_add(1);
        fb.put_str(frame.x, hint_y, INSTRUCTIONS, dim);

        if overlay.board.is_none() {
            draw_phase_overlay(fb, snap, frame);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        overlay: &BoardOverlay<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_cells(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        overlay: &BoardOverlay<'_>,
    ) {
        for row in 0..snap.size {
            for col in 0..snap.size {
                let pos = Pos::new(row, col);
                let cell: Cell = match overlay.board {
                    Some(grid) if grid.contains(pos) => grid.get(pos),
                    Some(_) => None,
                    None => snap.cell(pos),
                };

                let bg = if overlay.rejected.contains(&pos) {
                    REJECT_BG
                } else if overlay.highlighted.contains(&pos) {
                    MATCH_BG
                } else if snap.selected == Some(pos) {
                    SELECTED_BG
                } else if overlay.cursor == Some(pos) {
                    CURSOR_BG
                } else if overlay.fresh.contains(&pos) {
                    FRESH_BG
                } else {
                    BOARD_BG
                };

                let (ch, style) = match cell {
                    Some(gem) => {
                        let (ch, fg) = gem_glyph(gem);
                        (ch, Style::new(fg, bg).bold())
                    }
                    None => ('·', Style::new(Rgb::new(90, 90, 100), bg).dim()),
                };

                let px = frame.x + 1 + col as u16 * self.cell_w;
                let py = frame.y + 1 + row as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
                fb.put_char(px + (self.cell_w - 1) / 2, py + (self.cell_h - 1) / 2, ch, style);
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x >= fb.width() {
            return;
        }

        let title = Style::new(Rgb::new(240, 210, 70), PANEL_BG).bold();
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(x, y, "GEM RUSH", title);
        y = y.saturating_add(2);

        fb.put_str(x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(x, y, snap.level, value);
        let digits = snap.level.to_string().len() as u16;
        fb.put_char(x + digits, y, '/', value);
        fb.put_u32(x + digits + 1, y, snap.level_count, value);
        y = y.saturating_add(2);

        for (name, n) in [
            ("MOVES", snap.moves_remaining),
            ("SCORE", snap.score),
            ("TARGET", snap.target),
        ] {
            fb.put_str(x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(x, y, n, value);
            y = y.saturating_add(2);
        }

        let pct = snap.progress_percent();
        let filled = (pct as u16 * PROGRESS_W) / 100;
        fb.put_char(x, y, '[', value);
        for i in 0..PROGRESS_W {
            let (ch, style) = if i < filled {
                ('█', Style::new(Rgb::new(80, 200, 90), PANEL_BG))
            } else {
                ('░', value.dim())
            };
            fb.put_char(x + 1 + i, y, ch, style);
        }
        fb.put_char(x + 1 + PROGRESS_W, y, ']', value);
        fb.put_u32(x + 3 + PROGRESS_W, y, pct, value);
        let pct_w = pct.to_string().len() as u16;
        fb.put_char(x + 3 + PROGRESS_W + pct_w, y, '%', value);
    }
}

fn gem_glyph(gem: Gem) -> (char, Rgb) {
    GEMS[gem.index() as usize % GEMS.len()]
}

/// Lines shown over the board for every phase except `Playing`.
pub fn overlay_lines(snap: &GameSnapshot) -> Vec<String> {
    match snap.phase {
        SessionPhase::Playing => Vec::new(),
        SessionPhase::AwaitingStart => vec![
            format!("Level {}", snap.level),
            format!("Target: {} points", snap.target),
            "Match 3 or more gems to score!".to_string(),
            String::new(),
            "[ Start Level ]".to_string(),
        ],
        SessionPhase::LevelWon => vec![
            "Level Complete!".to_string(),
            "Great job! Ready for the next challenge?".to_string(),
            String::new(),
            "[ Next Level ]".to_string(),
        ],
        SessionPhase::OutOfMoves => vec![
            "Out of moves! Try again.".to_string(),
            format!("Score: {} / {}", snap.score, snap.target),
            String::new(),
            "[ Try Again ]".to_string(),
        ],
        SessionPhase::SessionComplete => vec![
            "Victory! All Levels Completed!".to_string(),
            format!("Final Score: {}", snap.score),
            String::new(),
            "[ Play Again ]".to_string(),
        ],
    }
}

fn draw_phase_overlay(fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
    let lines = overlay_lines(snap);
    if lines.is_empty() {
        return;
    }

    let text_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let box_w = text_w + 4;
    let box_h = lines.len() as u16 + 2;
    let bx = (frame.x + frame.w / 2).saturating_sub(box_w / 2);
    let by = (frame.y + frame.h / 2).saturating_sub(box_h / 2);

    let body = Style::new(Rgb::new(255, 255, 255), Rgb::new(20, 20, 30));
    fb.fill_rect(bx, by, box_w, box_h, ' ', body);
    draw_border(
        fb,
        Frame {
            x: bx,
            y: by,
            w: box_w,
            h: box_h,
        },
        body,
    );

    for (i, line) in lines.iter().enumerate() {
        let w = line.chars().count() as u16;
        let lx = bx + (box_w - w) / 2;
        let style = if i == 0 || line.starts_with('[') {
            body.bold()
        } else {
            body
        };
        fb.put_str(lx, by + 1 + i as u16, line, style);
    }
}

fn draw_border(fb: &mut FrameBuffer, f: Frame, style: Style) {
    if f.w < 2 || f.h < 2 {
        return;
    }
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);
    fb.put_char(f.x, f.y, '┌', style);
    fb.put_char(right, f.y, '┐', style);
    fb.put_char(f.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for x in f.x + 1..right {
        fb.put_char(x, f.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_snapshot() -> GameSnapshot {
        let grid = Grid::from_rows(&["ABC", "BCA", "CAB"]);
        GameSnapshot {
            size: 3,
            cells: grid.cells().to_vec(),
            phase: SessionPhase::Playing,
            selected: Some(Pos::new(1, 1)),
            score: 250,
            moves_remaining: 12,
            level: 2,
            level_count: 3,
            target: 1000,
            ..GameSnapshot::default()
        }
    }

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_side_panel_values() {
        let fb = GameView::default().render(
            &playing_snapshot(),
            &BoardOverlay::default(),
            Viewport::new(60, 30),
        );
        let text = screen(&fb);
        assert!(text.contains("GEM RUSH"));
        assert!(text.contains("2/3"));
        assert!(text.contains("1000"));
        assert!(text.contains("25%"));
    }

    #[test]
    fn test_selected_cell_is_marked() {
        let view = GameView::default();
        let snap = playing_snapshot();
        let fb = view.render(&snap, &BoardOverlay::default(), Viewport::new(60, 20));

        let marked = (0..fb.height())
            .flat_map(|y| fb.row(y).to_vec())
            .filter(|g| g.style.bg == SELECTED_BG)
            .count();
        assert_eq!(marked, 2);
    }

    #[test]
    fn test_awaiting_start_overlay_text() {
        let snap = GameSnapshot {
            size: 8,
            level: 1,
            level_count: 3,
            target: 500,
            moves_remaining: 20,
            ..GameSnapshot::default()
        };
        let fb = GameView::default().render(&snap, &BoardOverlay::default(), Viewport::new(80, 24));
        let text = screen(&fb);
        assert!(text.contains("Level 1"));
        assert!(text.contains("Target: 500 points"));
        assert!(text.contains("Match 3 or more gems to score!"));
    }

    #[test]
    fn test_overlay_lines_per_phase() {
        let mut snap = GameSnapshot {
            score: 1520,
            target: 1500,
            ..GameSnapshot::default()
        };
        snap.phase = SessionPhase::Playing;
        assert!(overlay_lines(&snap).is_empty());

        snap.phase = SessionPhase::LevelWon;
        assert_eq!(overlay_lines(&snap)[0], "Level Complete!");

        snap.phase = SessionPhase::OutOfMoves;
        assert_eq!(overlay_lines(&snap)[0], "Out of moves! Try again.");

        snap.phase = SessionPhase::SessionComplete;
        let lines = overlay_lines(&snap);
        assert_eq!(lines[0], "Victory! All Levels Completed!");
        assert_eq!(lines[1], "Final Score: 1520");
        assert_eq!(lines.last().map(String::as_str), Some("[ Play Again ]"));
    }

    #[test]
    fn test_animated_board_replaces_snapshot_cells() {
        let snap = playing_snapshot();
        let replay = Grid::from_rows(&["AAA", "AAA", "AAA"]);
        let overlay = BoardOverlay {
            board: Some(&replay),
            ..BoardOverlay::default()
        };
        let fb = GameView::default().render(&snap, &overlay, Viewport::new(60, 20));
        let text = screen(&fb);
        assert!(!text.contains('●'));
        assert!(text.contains('◆'));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(
            &playing_snapshot(),
            &BoardOverlay::default(),
            Viewport::new(4, 2),
        );
        assert_eq!(fb.width(), 4);
    }
}
