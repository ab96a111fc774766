//! Shared UI components for the quiz screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_screen_layout`.
pub struct ScreenLayout {
    /// Main content area, inside the outer border
    pub content: Rect,
    /// Status bar area (2 lines) at the bottom, inside the outer border
    pub status_bar: Rect,
}

/// Create a bordered screen with a content area and a 2-line status bar.
///
/// ```text
/// ┌─ Title ─────────────────────────┐
/// │                                 │
/// │   [content area]                │
/// │                                 │
/// │ [status bar - 2 lines]          │
/// └─────────────────────────────────┘
/// ```
pub fn create_screen_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
) -> ScreenLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(inner);

    ScreenLayout {
        content: chunks[0],
        status_bar: chunks[1],
    }
}

/// Render a standardized status bar (2 lines: status message + controls).
///
/// # Arguments
/// * `frame` - The frame to render to
/// * `area` - A 2-line area at the bottom of the screen
/// * `status_text` - The status message to display (line 1)
/// * `status_color` - Color for the status message
/// * `controls` - Slice of (key, action) pairs, e.g., `[("[Enter]", "Submit"), ("[Esc]", "Quit")]`
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Render an achievement toast in the top-right corner of `area`.
pub fn render_toast(frame: &mut Frame, area: Rect, text: &str) {
    let toast_area = toast_rect(area, text);
    if toast_area.is_empty() {
        return;
    }
    frame.render_widget(Clear, toast_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let paragraph = Paragraph::new(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(paragraph, toast_area);
}

/// Top-right box sized to `text`, never extending outside `area`.
fn toast_rect(area: Rect, text: &str) -> Rect {
    let wanted = u16::try_from(text.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let width = wanted.min(area.width);
    Rect {
        x: area.x + area.width.saturating_sub(width.saturating_add(1)),
        y: area.y.saturating_add(1),
        width,
        height: 3,
    }
    .intersection(area)
}

/// Music indicator for the status line.
pub fn music_label(playing: bool) -> &'static str {
    if playing {
        "♪ Music on"
    } else {
        "♪ Music off"
    }
}
