//! End-of-session summary with achievement cards.

use super::game_common::{create_screen_layout, render_status_bar, render_toast};
use crate::play_state::PlayState;
use codetrail::core::format_time;
use codetrail::{AchievementStatus, SessionSummary};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CONTROLS: [(&str, &str); 3] = [
    ("[S]", "Save score card"),
    ("[P]", "Play again"),
    ("[Q]", "Quit"),
];

pub fn draw_final(frame: &mut Frame, area: Rect, state: &PlayState, notice: Option<&str>) {
    let layout = create_screen_layout(frame, area, " Trail Complete ", Color::Green);

    let Some(summary) = &state.summary else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Congratulations block
            Constraint::Length(1), // Badge line
            Constraint::Length(1), // Spacer
            Constraint::Min(5),    // Achievement cards
        ])
        .split(layout.content);

    draw_congrats(frame, chunks[0], summary);

    let badges = Paragraph::new(badge_line(&summary.achievements)).alignment(Alignment::Center);
    frame.render_widget(badges, chunks[1]);

    draw_cards(frame, chunks[3], &summary.achievements);

    let (status, color) = match notice {
        Some(text) => (text, Color::Cyan),
        None => ("", Color::DarkGray),
    };
    render_status_bar(frame, layout.status_bar, status, color, &CONTROLS);

    if let Some(toast) = state.toasts.current() {
        render_toast(frame, area, toast);
    }
}

fn draw_congrats(frame: &mut Frame, area: Rect, summary: &SessionSummary) {
    let secs = u32::try_from(summary.total_time.as_secs()).unwrap_or(u32::MAX);
    let lines = vec![
        Line::from(Span::styled(
            "🎉 Congratulations 🎉",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            summary.player_name.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        score_line(summary),
        Line::from(format!("Time: {}", format_time(secs))),
        Line::from(""),
        Line::from(Span::styled(
            "Your adventure is complete!",
            Style::default().fg(Color::Green),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn score_line(summary: &SessionSummary) -> Line<'static> {
    let score = format!("{} / {}", summary.score, summary.total_levels);
    if summary.is_perfect() {
        Line::from(vec![
            Span::styled(score, Style::default().fg(Color::Green)),
            Span::styled(
                "  Perfect!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(score)
    }
}

fn badge_line(achievements: &[AchievementStatus]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, status) in achievements.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let (lock, color) = if status.achieved {
            ("🔓", Color::Green)
        } else {
            ("🔒", Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("{} {}", lock, status.name),
            Style::default().fg(color),
        ));
    }
    Line::from(spans)
}

fn draw_cards(frame: &mut Frame, area: Rect, achievements: &[AchievementStatus]) {
    if achievements.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = achievements
        .iter()
        .map(|_| Constraint::Ratio(1, achievements.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (status, column) in achievements.iter().zip(columns.iter()) {
        let (border, label) = if status.achieved {
            (Color::Yellow, "Achieved")
        } else {
            (Color::DarkGray, "Locked")
        };
        let lines = vec![
            Line::from(Span::styled(
                format!("{} {}", status.icon, status.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(status.description),
            Line::from(""),
            Line::from(Span::styled(label, Style::default().fg(border))),
        ];
        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        frame.render_widget(card, *column);
    }
}
