//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::scores::HighScoreRecord;
use crate::types::{Cell, SessionPhase, EMPTY};

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

/// Everything the side panel shows that does not come from the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo<'a> {
    pub player_name: &'a str,
    /// Ranked table, highest first
    pub top_scores: &'a [HighScoreRecord],
    /// Activity lines, oldest first
    pub log_lines: &'a [String],
}

impl<'a> HudInfo<'a> {
    pub fn best(&self) -> Option<&'a HighScoreRecord> {
        self.top_scores.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board + side panel renderer.
pub struct GameView {
    /// Arena cell width in terminal columns.
    cell_w: u16,
    /// Arena cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const PLAY_BG: Rgb = Rgb::new(6, 23, 38);
const PANEL_MIN_W: u16 = 12;
const HIGH_SCORE_ROWS: usize = 5;
/// `YYYY-MM-DD`
const DATE_W: u16 = 10;
/// Panels narrower than this list high scores without dates
const DATED_PANEL_W: u16 = 28;

/// One color per cell value (index 0 unused).
const PALETTE: [Rgb; 8] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 13, 114),
    Rgb::new(13, 194, 255),
    Rgb::new(13, 255, 114),
    Rgb::new(245, 56, 255),
    Rgb::new(255, 142, 13),
    Rgb::new(255, 225, 56),
    Rgb::new(56, 119, 255),
];

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn cell_color(v: Cell) -> Rgb {
    PALETTE
        .get(v as usize)
        .copied()
        .unwrap_or(Rgb::new(153, 153, 153))
}

fn label_style() -> CellStyle {
    CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold()
}

fn value_style() -> CellStyle {
    CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0))
}

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
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized when the
    /// viewport changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudInfo<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = to_u16(snap.width).saturating_mul(self.cell_w);
        let board_h = to_u16(snap.height).saturating_mul(self.cell_h);
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w.saturating_add(2)) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_h.saturating_add(2)) / 2,
                AnchorY::Top => 0,
            },
            w: board_w.saturating_add(2),
            h: board_h.saturating_add(2),
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        fb.fill_rect(frame.x.saturating_add(1), frame.y.saturating_add(1), board_w, board_h, ' ', bg);
        self.draw_border(fb, &frame, CellStyle::default());

        // Placed cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                let v = snap.cell(x, y);
                if v != EMPTY {
                    self.draw_arena_cell(fb, &frame, to_u16(x), to_u16(y), v);
                } else {
                    let dot = CellStyle::new(Rgb::new(40, 70, 95), PLAY_BG).dim();
                    self.fill_cell_rect(fb, &frame, to_u16(x), to_u16(y), '·', dot);
                }
            }
        }

        // Falling piece; rows above the top are not drawn.
        if let Some(active) = &snap.active {
            for (x, y, v) in active.cells() {
                if x >= 0 && y >= 0 && (x as usize) < snap.width && (y as usize) < snap.height {
                    self.draw_arena_cell(fb, &frame, x as u16, y as u16, v);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, &frame);

        match snap.phase {
            SessionPhase::Idle => self.draw_overlay(fb, &frame, "PRESS ENTER", None),
            SessionPhase::Paused => self.draw_overlay(fb, &frame, "PAUSED", None),
            SessionPhase::GameOver => {
                self.draw_overlay(fb, &frame, "GAME OVER", Some("R: RESTART"))
            }
            SessionPhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudInfo<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: &Frame, style: CellStyle) {
        let Frame { x, y, w, h } = *frame;
        if w < 2 || h < 2 {
            return;
        }

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

    fn draw_arena_cell(&self, fb: &mut FrameBuffer, frame: &Frame, x: u16, y: u16, v: Cell) {
        let style = CellStyle::new(cell_color(v), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame
            .x
            .saturating_add(1)
            .saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = frame
            .y
            .saturating_add(1)
            .saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudInfo<'_>,
        viewport: Viewport,
        frame: &Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < PANEL_MIN_W {
            return;
        }

        let label = label_style();
        let value = value_style();
        let dim = value.dim();

        let mut y = frame.y;
        let field = |fb: &mut FrameBuffer, y: &mut u16, name: &str| {
            fb.put_str(panel_x, *y, name, label);
            *y = y.saturating_add(1);
        };

        if !hud.player_name.is_empty() {
            fb.put_str_clipped(panel_x, y, hud.player_name, panel_w, dim);
            y = y.saturating_add(2);
        }

        field(fb, &mut y, "SCORE");
        fb.put_u32(panel_x, y, snap.stats.score, value);
        y = y.saturating_add(2);

        field(fb, &mut y, "LEVEL");
        fb.put_u32(panel_x, y, snap.stats.level, value);
        y = y.saturating_add(2);

        field(fb, &mut y, "LINES");
        fb.put_u32(panel_x, y, snap.stats.lines, value);
        y = y.saturating_add(2);

        field(fb, &mut y, "TIME");
        put_clock(fb, panel_x, y, snap.elapsed_ms, value);
        y = y.saturating_add(2);

        field(fb, &mut y, "STABILITY");
        match snap.stability {
            Some(pct) => {
                let end = fb.put_u32(panel_x, y, pct as u32, value);
                fb.put_char(end, y, '%', value);
            }
            None => {
                fb.put_char(panel_x, y, '-', value);
            }
        }
        y = y.saturating_add(2);

        field(fb, &mut y, "BEST");
        match hud.best() {
            Some(best) => {
                let end = fb.put_u32(panel_x, y, best.score, value);
                let name_x = end.saturating_add(1);
                let room = (panel_x + panel_w).saturating_sub(name_x);
                fb.put_str_clipped(name_x, y, &best.name, room, dim);
            }
            None => {
                fb.put_char(panel_x, y, '-', value);
            }
        }
        y = y.saturating_add(2);

        field(fb, &mut y, "NEXT");
        if let Some(next) = &snap.next {
            for (sx, sy, v) in next.occupied() {
                let style = CellStyle::new(cell_color(v), Rgb::new(0, 0, 0)).bold();
                let px = panel_x + sx as u16 * self.cell_w;
                fb.fill_rect(px, y + sy as u16, self.cell_w, 1, '█', style);
            }
            y = y.saturating_add(next.height() as u16);
        }
        y = y.saturating_add(1);

        if !hud.top_scores.is_empty() && y < viewport.height {
            field(fb, &mut y, "HIGH SCORES");
            for (rank, rec) in hud.top_scores.iter().take(HIGH_SCORE_ROWS).enumerate() {
                if y >= viewport.height {
                    break;
                }
                let end = fb.put_u32(panel_x, y, rank as u32 + 1, dim);
                fb.put_char(end, y, '.', dim);
                let end = fb.put_u32(end.saturating_add(2), y, rec.score, value);
                let mut name_end = panel_x + panel_w;
                if panel_w >= DATED_PANEL_W {
                    if let Some(ymd) = rec.ymd() {
                        name_end = name_end.saturating_sub(DATE_W);
                        put_date(fb, name_end, y, ymd, dim);
                        name_end = name_end.saturating_sub(1);
                    }
                }
                let room = name_end.saturating_sub(end + 1);
                fb.put_str_clipped(end + 1, y, &rec.name, room, dim);
                y = y.saturating_add(1);
            }
            if matches!(snap.phase, SessionPhase::Idle | SessionPhase::GameOver)
                && y < viewport.height
            {
                fb.put_str_clipped(panel_x, y, "C: CLEAR SCORES", panel_w, dim);
                y = y.saturating_add(1);
            }
            y = y.saturating_add(1);
        }

        // Most recent activity that still fits, newest at the bottom.
        if y.saturating_add(1) < viewport.height && !hud.log_lines.is_empty() {
            field(fb, &mut y, "LOG");
            let rows = (viewport.height - y) as usize;
            let skip = hud.log_lines.len().saturating_sub(rows);
            for line in &hud.log_lines[skip..] {
                fb.put_str_clipped(panel_x, y, line, panel_w, dim);
                y = y.saturating_add(1);
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: &Frame, text: &str, hint: Option<&str>) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let center = |s: &str| {
            let w = s.chars().count() as u16;
            frame.x.saturating_add(frame.w.saturating_sub(w) / 2)
        };

        fb.put_str(center(text), mid_y, text, style);
        if let Some(hint) = hint {
            fb.put_str(center(hint), mid_y.saturating_add(1), hint, style.dim());
        }
    }
}

/// `YYYY-MM-DD`
fn put_date(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    (year, month, day): (i32, u32, u32),
    style: CellStyle,
) {
    let mut cx = fb.put_u32(x, y, year.clamp(0, 9999) as u32, style);
    for part in [month, day] {
        fb.put_char(cx, y, '-', style);
        cx = cx.saturating_add(1);
        if part < 10 {
            fb.put_char(cx, y, '0', style);
            cx = cx.saturating_add(1);
        }
        cx = fb.put_u32(cx, y, part, style);
    }
}

/// `mm:ss` of gameplay time
fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, elapsed_ms: u64, style: CellStyle) {
    let secs = elapsed_ms / 1000;
    let minutes = (secs / 60).min(u32::MAX as u64) as u32;
    let seconds = (secs % 60) as u32;

    let mut cx = x;
    if minutes < 10 {
        fb.put_char(cx, y, '0', style);
        cx += 1;
    }
    cx = fb.put_u32(cx, y, minutes, style);
    fb.put_char(cx, y, ':', style);
    cx += 1;
    if seconds < 10 {
        fb.put_char(cx, y, '0', style);
        cx += 1;
    }
    fb.put_u32(cx, y, seconds, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        let mut fb = FrameBuffer::new(8, 1);
        put_clock(&mut fb, 0, 0, 65_400, CellStyle::default());
        assert_eq!(fb.row_text(0), "01:05   ");

        put_clock(&mut fb, 0, 0, 600_000, CellStyle::default());
        assert_eq!(fb.row_text(0), "10:00   ");
    }

    #[test]
    fn palette_covers_every_fill_value() {
        for v in 1..=7u8 {
            assert_ne!(cell_color(v), Rgb::new(0, 0, 0));
        }
        assert_eq!(cell_color(42), Rgb::new(153, 153, 153));
    }
}
