use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};
use tracker_core::TaskRef;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Header, list, input line, help footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Task list
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("PROJECT TRACKER")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, main_chunks[0]);

    draw_task_list(f, app, main_chunks[1]);
    draw_input(f, app, main_chunks[2]);

    let help = match app.input_mode {
        InputMode::Normal => {
            "j/k: Navigate | Space: Toggle done | x: Mark | d: Remove | a: Add | q: Quit"
        }
        InputMode::Adding => "Enter: Add task | Esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_task_list(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let icon = if task.completed { "✔" } else { "☐" };
            let mark = if app.is_marked(TaskRef(i)) { "*" } else { " " };

            // Strikethrough is purely presentational, derived from the flag.
            let text_style = if task.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(Color::Yellow)),
                Span::raw(format!("{icon} ")),
                Span::styled(task.text.clone(), text_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Tasks ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.state);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.input_mode {
        InputMode::Normal => (
            "Press 'a' to add a new task...",
            Style::default().fg(Color::DarkGray),
        ),
        InputMode::Adding => (app.input.as_str(), Style::default()),
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .title(" New task ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(input, area);

    if let InputMode::Adding = app.input_mode {
        // Cursor x accounts for double-width characters before it.
        let prefix: String = app.input.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + prefix.width() as u16;
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}
