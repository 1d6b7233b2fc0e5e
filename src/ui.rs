pub mod charting;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

pub(crate) const HORIZONTAL_MARGIN: u16 = 5;
pub(crate) const VERTICAL_MARGIN: u16 = 1;

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub(crate) fn focused() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Keeps the end of `text` visible within `max_width` columns
pub(crate) fn fit_tail(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut tail = Vec::new();
    let mut used = 1; // room for the ellipsis
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        tail.push(c);
    }
    std::iter::once('…').chain(tail.into_iter().rev()).collect()
}

/// Area inside the standard screen margins
pub(crate) fn content_area(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(0)])
        .split(area)[0]
}

/// One-line italic key legend
pub(crate) fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(text, italic())).wrap(Wrap { trim: true })
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

fn render_alert(message: &str, area: Rect, buf: &mut Buffer) {
    let width = u16::try_from(message.width())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .clamp(24, area.width.saturating_sub(4).max(24))
        .min(area.width);
    let inner_width = width.saturating_sub(2).max(1) as usize;
    let text_lines =
        u16::try_from(message.width().div_ceil(inner_width).max(1)).unwrap_or(u16::MAX);
    let height = text_lines.saturating_add(4).min(area.height);
    let popup = popup_area(area, width, height);

    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(Span::styled(message, bold())),
        Line::default(),
        Line::from(Span::styled("(enter) ok", italic())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" alert "),
    )
    .render(popup, buf);
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.screen()).render(self, area, buf);

        if let Some(message) = &self.alert {
            render_alert(message, area, buf);
        }
    }
}
