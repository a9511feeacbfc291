//! Rendering of the client view model.
//!
//! Layout: creation form on top, list in the middle, status/help line
//! at the bottom, delete confirmation as a centered popup.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::client::state::{AppModel, EntryPhase, Focus, ListPhase};

/// Draws one frame of the client.
pub fn draw(frame: &mut Frame, model: &AppModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_input(frame, model, chunks[0]);
    draw_list(frame, model, chunks[1]);
    draw_status(frame, model, chunks[2]);

    if let Some(pending) = &model.confirm {
        let area = centered_rect(frame.area(), 50, 3);
        let dialog = Paragraph::new(format!("Delete \"{}\"? (y/n)", pending.title))
            .block(Block::default().title("Confirm").borders(Borders::ALL))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(Clear, area);
        frame.render_widget(dialog, area);
    }
}

fn draw_input(frame: &mut Frame, model: &AppModel, area: Rect) {
    let border_style = if model.focus == Focus::Input {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let title = if model.submitting {
        "Add a task (sending...)"
    } else {
        "Add a task"
    };

    let input = Paragraph::new(model.draft.as_str()).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);

    if model.focus == Focus::Input {
        // Cursor after the last typed character.
        let x = area.x + 1 + model.draft.chars().count() as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_list(frame: &mut Frame, model: &AppModel, area: Rect) {
    let border_style = if model.focus == Focus::List {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title("Todos")
        .borders(Borders::ALL)
        .border_style(border_style);

    match model.phase {
        ListPhase::Loading => {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
        }
        ListPhase::Failed => {
            frame.render_widget(
                Paragraph::new("Could not load todos.")
                    .style(Style::default().fg(Color::Red))
                    .block(block),
                area,
            );
        }
        ListPhase::Ready if model.entries.is_empty() => {
            frame.render_widget(
                Paragraph::new("No todos yet. Create your first task!").block(block),
                area,
            );
        }
        ListPhase::Ready => {
            let items: Vec<ListItem> = model
                .entries
                .iter()
                .map(|entry| {
                    let checkbox = if entry.todo.is_complete { "[x] " } else { "[ ] " };
                    let mut title_style = Style::default();
                    if entry.todo.is_complete {
                        title_style = title_style
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT);
                    }
                    let mut line = vec![
                        Span::raw(checkbox),
                        Span::styled(entry.todo.title.clone(), title_style),
                    ];
                    if entry.phase == EntryPhase::Mutating {
                        line.push(Span::styled(
                            " (saving...)",
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    ListItem::new(Line::from(line))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                .highlight_symbol(">> ");

            let mut list_state = ListState::default();
            if model.focus == Focus::List && !model.entries.is_empty() {
                list_state.select(Some(model.selected));
            }
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn draw_status(frame: &mut Frame, model: &AppModel, area: Rect) {
    let status = match &model.error {
        Some(message) => {
            Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red))
        }
        None => Paragraph::new(
            "Tab: switch focus | Enter: add | Space: toggle | d: delete | q: quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(status, area);
}

/// Centers a `width`% x `height`-row rectangle inside `area`.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
