//! レンダリング
//!
//! `ViewSnapshot` を ratatui のフレームへ描画する

use crate::error::ErrorLevel;
use crate::ui::view::ViewSnapshot;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Renderer {
    text_style: Style,
    status_style: Style,
    error_style: Style,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            text_style: Style::default().fg(Color::White).bg(Color::Black),
            status_style: Style::default().fg(Color::Black).bg(Color::White),
            error_style: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// 1フレーム描画
    pub fn render(&self, frame: &mut Frame<'_>, snapshot: &ViewSnapshot) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines: Vec<Line<'_>> = snapshot
            .rows
            .iter()
            .map(|row| Line::from(row.as_str()))
            .collect();
        frame.render_widget(Paragraph::new(lines).style(self.text_style), area);

        if let Some((message, level)) = &snapshot.status {
            self.render_status(frame, area, message, *level);
        }

        if let Some((x, y)) = snapshot.cursor {
            if x < area.width && y < area.height {
                frame.set_cursor_position((area.x + x, area.y + y));
            }
        }
    }

    /// 最下行の左端に通知を重ねる
    fn render_status(&self, frame: &mut Frame<'_>, area: Rect, message: &str, level: ErrorLevel) {
        let len = u16::try_from(message.width()).unwrap_or(u16::MAX);
        let rect = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: len.min(area.width),
            height: 1,
        };
        let style = match level {
            ErrorLevel::Info => self.status_style,
            ErrorLevel::Error => self.error_style,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(message).style(style), rect);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
