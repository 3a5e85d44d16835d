//! Console layout and drawing

use crate::ui::state::{ConsoleState, LogCategory};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_ui(f: &mut Frame, state: &ConsoleState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(10),
            Constraint::Length(1),
        ])
        .split(f.size());

    // Instruction input
    let (input_title, input_style) = if state.busy {
        (
            " Instruction (waiting for reply) ",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (" Instruction ", Style::default().fg(Color::White))
    };
    let input = Paragraph::new(state.input.as_str())
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(input_title));
    f.render_widget(input, chunks[0]);
    if !state.busy {
        f.set_cursor(cursor_x(chunks[0], &state.input), chunks[0].y + 1);
    }

    // Latest reply
    let reply = Paragraph::new(state.reply_text.as_str())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" AI Reply "));
    f.render_widget(reply, chunks[1]);

    // Transcript, newest at the bottom
    let visible = chunks[2].height.saturating_sub(2) as usize;
    let skip = state.transcript.len().saturating_sub(visible);
    let items: Vec<ListItem> = state
        .transcript
        .iter()
        .skip(skip)
        .map(|entry| {
            let (prefix, color) = category_style(entry.category);
            let first_line = entry.message.lines().next().unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(first_line.to_string()),
            ]))
        })
        .collect();
    let transcript =
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Transcript "));
    f.render_widget(transcript, chunks[2]);

    // Status bar
    let status_color = if state.busy { Color::Yellow } else { Color::Green };
    let last = state
        .last_delivered
        .map(|c| c.as_str())
        .unwrap_or("-");
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", state.status),
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "| pending: {} | last delivered: {} | Enter: send  Esc: quit",
            state.pending, last
        )),
    ]));
    f.render_widget(status, chunks[3]);
}

/// Column of the input cursor, clamped inside the box border
fn cursor_x(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}

fn category_style(category: LogCategory) -> (&'static str, Color) {
    match category {
        LogCategory::User => ("you> ", Color::Cyan),
        LogCategory::Reply => ("ai>  ", Color::White),
        LogCategory::Commands => ("cmd> ", Color::Green),
        LogCategory::Error => ("err> ", Color::Red),
        LogCategory::System => ("---  ", Color::DarkGray),
    }
}
