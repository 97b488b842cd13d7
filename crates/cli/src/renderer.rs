use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use phasestack_core::{Figure, Palette};
use phasestack_protocol::{RenderCommand, TextAlign, ThemeToken};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};

fn theme_to_color(token: ThemeToken, palette: &Palette) -> Color {
    if let Some(c) = palette.resolve(token) {
        return Color::Rgb(c.r, c.g, c.b);
    }
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::TextPrimary | ThemeToken::AxisLine => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::LegendBorder => Color::DarkGray,
        ThemeToken::Slot(_) => Color::Gray,
    }
}

/// Maps figure pixels onto terminal cells.
#[derive(Debug, Clone, Copy)]
struct CellMap {
    area: Rect,
    sx: f64,
    sy: f64,
}

impl CellMap {
    fn new(figure: &Figure, area: Rect) -> Self {
        Self {
            area,
            sx: f64::from(area.width) / figure.width,
            sy: f64::from(area.height) / figure.height,
        }
    }

    fn col(&self, x: f64) -> Option<u16> {
        let c = (x * self.sx).floor();
        (c >= 0.0 && c < f64::from(self.area.width)).then(|| self.area.x + c as u16)
    }

    fn row(&self, y: f64) -> Option<u16> {
        let r = (y * self.sy).floor();
        (r >= 0.0 && r < f64::from(self.area.height)).then(|| self.area.y + r as u16)
    }

    /// Cell span `[start, end)` along one axis, at least one cell wide.
    fn span(start: f64, len: f64, scale: f64, origin: u16, limit: u16) -> (u16, u16) {
        let a = (start * scale).round().clamp(0.0, f64::from(limit));
        let b = ((start + len) * scale).round().clamp(0.0, f64::from(limit)).max(a + 1.0);
        (origin + a as u16, origin + (b as u16).min(limit))
    }
}

fn paint(buf: &mut Buffer, map: CellMap, commands: &[RenderCommand], palette: &Palette) {
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                ..
            } => {
                if !rect.is_finite() || rect.w <= 0.0 {
                    continue;
                }
                let (x0, x1) = CellMap::span(rect.x, rect.w, map.sx, map.area.x, map.area.width);
                let (y0, y1) = CellMap::span(rect.y, rect.h, map.sy, map.area.y, map.area.height);
                // Legend frames only get an outline.
                let outline = border_color.is_some();
                let fg = theme_to_color(border_color.unwrap_or(*color), palette);
                for y in y0..y1 {
                    for x in x0..x1 {
                        let edge = x == x0 || x + 1 == x1 || y == y0 || y + 1 == y1;
                        if outline && !edge {
                            continue;
                        }
                        let ch = if outline { '·' } else { '█' };
                        buf[(x, y)].set_char(ch).set_fg(fg);
                    }
                }
            }
            RenderCommand::DrawLine { from, to, color, .. } => {
                let fg = theme_to_color(*color, palette);
                let (Some(c0), Some(r0), Some(c1), Some(r1)) =
                    (map.col(from.x), map.row(from.y), map.col(to.x), map.row(to.y))
                else {
                    continue;
                };
                if c0 == c1 {
                    for y in r0.min(r1)..=r0.max(r1) {
                        buf[(c0, y)].set_char('│').set_fg(fg);
                    }
                } else if r0 == r1 {
                    for x in c0.min(c1)..=c0.max(c1) {
                        buf[(x, r0)].set_char('─').set_fg(fg);
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => {
                let Some(row) = map.row(position.y) else {
                    continue;
                };
                let len = text.chars().count() as f64 / map.sx;
                let left = match align {
                    TextAlign::Left => position.x,
                    TextAlign::Center => position.x - len / 2.0,
                    TextAlign::Right => position.x - len,
                };
                let fg = theme_to_color(*color, palette);
                let Some(start) = map.col(left.max(0.0)) else {
                    continue;
                };
                let end = map.area.x + map.area.width;
                for (x, ch) in (start..end).zip(text.chars()) {
                    buf[(x, row)].set_char(ch).set_fg(fg);
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

/// Show a figure in the terminal until `q` or `Esc` is pressed.
pub fn render_tui(figure: &Figure, palette: &Palette, title: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(" phasestack | {title} | q quit "))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            let block = Block::default().style(Style::default().bg(Color::Black));
            frame.render_widget(block, content_area);

            let map = CellMap::new(figure, content_area);
            paint(frame.buffer_mut(), map, &figure.commands, palette);
        })?;

        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
