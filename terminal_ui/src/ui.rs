use chrono::Local;
use todo_shared::{Todo, TodoStatus};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::view::TodoView;

const HELP: &str = "Enter add · ↑/↓ select · Tab toggle · Del delete · F5 reload · Esc quit";

pub fn draw<B: Backend>(f: &mut Frame<B>, view: &TodoView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    let stats = Paragraph::new(Spans::from(vec![
        Span::styled(
            format!("{} Pending", view.pending_count()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} Completed", view.completed_count()),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Todo Manager"))
    .alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let input = Paragraph::new(view.input.as_str())
        .block(Block::default().borders(Borders::ALL).title("What needs to be done?"));
    f.render_widget(input, chunks[1]);
    let typed = u16::try_from(view.input.chars().count()).unwrap_or(u16::MAX);
    let cursor_x = (chunks[1].x + 1)
        .saturating_add(typed)
        .min(chunks[1].right().saturating_sub(2));
    f.set_cursor(cursor_x, chunks[1].y + 1);

    if view.todos.is_empty() {
        let empty = Paragraph::new(vec![
            Spans::from(Span::styled(
                "No todos yet!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from("Add your first task above to get started."),
        ])
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(empty, chunks[2]);
    } else {
        let items: Vec<ListItem> = view.todos.iter().map(todo_item).collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Todos"))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(view.selected));
        f.render_stateful_widget(list, chunks[2], &mut state);
    }

    let help = Paragraph::new(Span::styled(HELP, Style::default().fg(Color::DarkGray)));
    f.render_widget(help, chunks[3]);
}

fn todo_item(todo: &Todo) -> ListItem<'static> {
    let (checkbox, description_style, badge) = match todo.status {
        TodoStatus::Completed => (
            "[x] ",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::CROSSED_OUT),
            Span::styled("Done", Style::default().fg(Color::Black).bg(Color::Green)),
        ),
        TodoStatus::Pending => (
            "[ ] ",
            Style::default().fg(Color::White),
            Span::styled("Pending", Style::default().fg(Color::Yellow)),
        ),
    };

    ListItem::new(Spans::from(vec![
        Span::raw(checkbox),
        Span::styled(todo.description.clone(), description_style),
        Span::raw("  "),
        badge,
        Span::styled(
            format!("  Created: {}", created_label(todo)),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn created_label(todo: &Todo) -> String {
    todo.created_at
        .with_timezone(&Local)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}
