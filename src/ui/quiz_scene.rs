//! Level screen: prompt, answer entry, feedback and the countdown gauge.

use super::game_common::{create_screen_layout, music_label, render_status_bar, render_toast};
use super::splash_scene::with_cursor;
use crate::play_state::{Feedback, PlayState};
use codetrail::core::format_time;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

const CONTROLS: [(&str, &str); 5] = [
    ("[Enter]", "Submit"),
    ("[Tab]", "Hint"),
    ("[Ctrl+S]", "Skip"),
    ("[F2]", "Music"),
    ("[Esc]", "Quit"),
];

pub fn draw_quiz(frame: &mut Frame, area: Rect, state: &PlayState, music_on: bool) {
    let layout = create_screen_layout(frame, area, " CodeTrail ", Color::Cyan);

    let Some(view) = &state.view else {
        return;
    };

    let answer_height = if view.choices.is_empty() {
        3
    } else {
        view.choices.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Progress + score
            Constraint::Min(3),                // Prompt
            Constraint::Length(3),             // Feedback
            Constraint::Length(answer_height), // Choices or input
            Constraint::Length(1),             // Hint
            Constraint::Length(1),             // Timer gauge
        ])
        .split(layout.content);

    draw_header(frame, chunks[0], view.index, view.total, state.score);

    let prompt = Paragraph::new(view.prompt.as_str())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Question "));
    frame.render_widget(prompt, chunks[1]);

    draw_feedback(frame, chunks[2], state.feedback.as_ref());

    if view.choices.is_empty() {
        let input = Paragraph::new(with_cursor(
            &state.answer_input,
            state.answer_input.chars().count(),
        ))
        .block(Block::default().borders(Borders::ALL).title(" Your Answer "));
        frame.render_widget(input, chunks[3]);
    } else {
        let items: Vec<ListItem> = view
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                if i == state.selected_choice {
                    ListItem::new(format!("> {}", choice)).style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ListItem::new(format!("  {}", choice))
                }
            })
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Choices "));
        frame.render_widget(list, chunks[3]);
    }

    if let Some(hint) = &state.hint_line {
        let hint = Paragraph::new(Span::styled(hint.as_str(), Style::default().fg(Color::Magenta)));
        frame.render_widget(hint, chunks[4]);
    }

    draw_timer(frame, chunks[5], state.remaining_secs, state.percent);

    render_status_bar(
        frame,
        layout.status_bar,
        music_label(music_on),
        Color::DarkGray,
        &CONTROLS,
    );

    if let Some(toast) = state.toasts.current() {
        render_toast(frame, area, toast);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, index: usize, total: usize, score: u32) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let progress = Paragraph::new(format!("Level {} of {}", index + 1, total))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(progress, halves[0]);

    let score = Paragraph::new(format!("Score: {}", score)).alignment(Alignment::Right);
    frame.render_widget(score, halves[1]);
}

fn draw_feedback(frame: &mut Frame, area: Rect, feedback: Option<&Feedback>) {
    let (text, color) = match feedback {
        Some(Feedback::Success(msg)) => (msg.as_str(), Color::Green),
        Some(Feedback::Error(msg)) => (msg.as_str(), Color::Red),
        None => return,
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_timer(frame: &mut Frame, area: Rect, remaining_secs: u32, percent: f64) {
    let color = if percent > 50.0 {
        Color::Green
    } else if percent > 20.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("Time: {}", format_time(remaining_secs)));
    frame.render_widget(gauge, area);
}
