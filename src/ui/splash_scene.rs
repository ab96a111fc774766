use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Where the background catalog load stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready(usize),
    Failed(String),
}

pub struct SplashScreen {
    pub name_input: String,
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl SplashScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            cursor_position: 0,
            validation_error: None,
        }
    }

    /// Keep the name from a previous playthrough.
    pub fn with_name(name: &str) -> Self {
        Self {
            name_input: name.to_string(),
            cursor_position: name.chars().count(),
            validation_error: None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, status: &CatalogStatus) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(4), // Input label + field
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Catalog status
                Constraint::Length(2), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "CodeTrail",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "A timed trail of questions",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let label = Paragraph::new("Your Name:");
        f.render_widget(label, chunks[2]);

        let input_area = input_rect(chunks[2]);
        let input_widget = Paragraph::new(with_cursor(&self.name_input, self.cursor_position))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, input_area);

        let status_line = match status {
            CatalogStatus::Loading => {
                Line::from(Span::styled("Loading levels...", Style::default().fg(Color::Yellow)))
            }
            CatalogStatus::Ready(count) => Line::from(Span::styled(
                format!("{} levels ready", count),
                Style::default().fg(Color::Green),
            )),
            CatalogStatus::Failed(reason) => Line::from(Span::styled(
                format!("Could not load levels: {}", reason),
                Style::default().fg(Color::Red),
            )),
        };
        f.render_widget(Paragraph::new(status_line), chunks[4]);

        if let Some(error) = &self.validation_error {
            let validation = Paragraph::new(Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            )));
            f.render_widget(validation, chunks[5]);
        }

        let controls = Paragraph::new("[Enter] Start Game    [Esc] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[7]);
    }

    pub fn handle_char_input(&mut self, c: char) {
        let byte_index = byte_offset(&self.name_input, self.cursor_position);
        self.name_input.insert(byte_index, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = byte_offset(&self.name_input, self.cursor_position - 1);
            self.name_input.remove(byte_index);
            self.cursor_position -= 1;
            self.validation_error = None;
        }
    }

    pub fn name(&self) -> &str {
        &self.name_input
    }
}

/// Bordered input box below the label line, clamped to `area`.
fn input_rect(area: Rect) -> Rect {
    Rect {
        y: area.y.saturating_add(1),
        height: 3,
        ..area
    }
    .intersection(area)
}

/// Render `text` with an underscore cursor at char position `cursor`.
pub fn with_cursor(text: &str, cursor: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if cursor < chars.len() {
        let before: String = chars[..cursor].iter().collect();
        let after: String = chars[cursor..].iter().collect();
        format!("{}_{}", before, after)
    } else {
        format!("{}_", text)
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}
