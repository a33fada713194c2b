use crate::application::{App, AppMode};
use crate::domain::{DraftField, Todo};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const ACCENT: Color = Color::Rgb(65, 105, 225);
const CROSS: Color = Color::Rgb(255, 127, 80);
const SEPARATOR: Color = Color::Gray;

/// Terminal lines taken by one todo: title, description and a separator.
pub const ROW_HEIGHT: u16 = 3;
const CROSS_WIDTH: u16 = 3;
const INPUT_WIDTH: u16 = 34;
const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 17;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const EMPTY_PLACEHOLDER: &str = "Add Todo !!";

/// Where the parts of the list screen go for a given terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub plus_button: Rect,
    pub list: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let header = chunks[0];
        let plus_button = Rect {
            x: header.x + header.width.saturating_sub(6),
            y: header.y,
            width: 3.min(header.width),
            height: 1.min(header.height),
        };

        Self {
            header,
            plus_button,
            list: chunks[1],
            status: chunks[2],
        }
    }

    /// Number of todos that fit in the list area.
    pub fn visible_rows(&self) -> usize {
        (self.list.height / ROW_HEIGHT).max(1) as usize
    }

    /// Area of the `n`-th visible row, if it is on screen.
    pub fn row_area(&self, n: usize) -> Option<Rect> {
        let offset = u16::try_from(n).ok()?.checked_mul(ROW_HEIGHT)?;
        if offset + ROW_HEIGHT > self.list.height {
            return None;
        }
        Some(Rect {
            x: self.list.x,
            y: self.list.y + offset,
            width: self.list.width,
            height: ROW_HEIGHT,
        })
    }

    /// The clickable `×` of a row.
    pub fn cross_area(row: Rect) -> Rect {
        Rect {
            x: row.x + row.width.saturating_sub(CROSS_WIDTH + 2),
            y: row.y,
            width: CROSS_WIDTH.min(row.width),
            height: row.height.saturating_sub(1),
        }
    }
}

/// Where the parts of the add form go for a given terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub popup: Rect,
    pub cancel_button: Rect,
    pub heading: Rect,
    pub title_input: Rect,
    pub description_input: Rect,
    pub hint: Rect,
    pub add_button: Rect,
}

impl FormLayout {
    pub fn new(area: Rect) -> Self {
        let popup = centered(area, FORM_WIDTH, FORM_HEIGHT);
        let inner = Block::default().borders(Borders::ALL).inner(popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let cancel_width = 6.min(inner.width);
        let cancel_button = Rect {
            x: inner.x + inner.width.saturating_sub(cancel_width + 1),
            y: chunks[0].y,
            width: cancel_width,
            height: chunks[0].height,
        };

        Self {
            popup,
            cancel_button,
            heading: chunks[2],
            title_input: centered_row(chunks[4], INPUT_WIDTH),
            description_input: centered_row(chunks[5], INPUT_WIDTH),
            hint: chunks[6],
            add_button: centered_row(chunks[7], 9),
        }
    }

    pub fn input(&self, field: DraftField) -> Rect {
        match field {
            DraftField::Title => self.title_input,
            DraftField::Description => self.description_input,
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn centered_row(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let layout = ScreenLayout::new(f.area());

    render_header(f, &layout);
    if app.ready {
        render_list(f, app, &layout);
    } else {
        render_loading(f, app, layout.list);
    }
    render_status_bar(f, app, layout.status);

    if matches!(app.mode, AppMode::Add) {
        render_add_form(f, app, &FormLayout::new(f.area()));
    }
}

fn render_header(f: &mut Frame, layout: &ScreenLayout) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Todo List",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(SEPARATOR)),
    );
    f.render_widget(title, layout.header);

    let plus = Paragraph::new("[+]").style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(plus, layout.plus_button);
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let frame = SPINNER[app.spinner_frame % SPINNER.len()];
    let spinner = Paragraph::new(format!("{} Loading...", frame))
        .alignment(Alignment::Center)
        .style(Style::default().fg(ACCENT));
    let line = Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    };
    f.render_widget(spinner, line);
}

fn render_list(f: &mut Frame, app: &App, layout: &ScreenLayout) {
    if app.todos.is_empty() {
        let empty = Paragraph::new(EMPTY_PLACEHOLDER)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        let line = Rect {
            y: layout.list.y + 1.min(layout.list.height),
            height: 1.min(layout.list.height.saturating_sub(1)),
            ..layout.list
        };
        f.render_widget(empty, line);
        return;
    }

    let visible = app.todos.items().iter().enumerate().skip(app.scroll_offset);
    for (n, (index, todo)) in visible.enumerate() {
        let Some(area) = layout.row_area(n) else {
            break;
        };
        render_todo_row(f, todo, index == app.selected, area);
    }
}

fn render_todo_row(f: &mut Frame, todo: &Todo, selected: bool, area: Rect) {
    let row_style = if selected {
        Style::default().bg(Color::Rgb(40, 44, 60))
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(SEPARATOR))
        .style(row_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let marker = if todo.done { "✓ " } else { "" };
    let text_area = Rect {
        x: inner.x + 2.min(inner.width),
        width: inner.width.saturating_sub(CROSS_WIDTH + 5),
        ..inner
    };
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}{}", marker, todo.title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            todo.description.clone(),
            Style::default().fg(Color::Gray),
        )),
    ]);
    f.render_widget(text, text_area);

    let cross = Paragraph::new(" × ").style(Style::default().fg(CROSS).add_modifier(Modifier::BOLD));
    f.render_widget(cross, ScreenLayout::cross_area(area));
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::List if !app.ready => "Loading todos... | q: quit".to_string(),
        AppMode::List => format!(
            "{} todos | +/a: add | x/Del: delete | ↑↓/jk: select | q: quit",
            app.todos.len()
        ),
        AppMode::Add => "Enter: add | Esc: cancel | Tab: next field | Ctrl+V: paste".to_string(),
    };
    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, area);
}

fn render_add_form(f: &mut Frame, app: &App, layout: &FormLayout) {
    f.render_widget(Clear, layout.popup);
    f.render_widget(Block::default().borders(Borders::ALL), layout.popup);

    let cancel = Paragraph::new("Cancel").style(Style::default().fg(ACCENT));
    f.render_widget(cancel, layout.cancel_button);

    let heading = Paragraph::new(Span::styled(
        "Add Todo",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(heading, layout.heading);

    for field in [DraftField::Title, DraftField::Description] {
        render_input(f, app, field, layout.input(field));
    }

    if let Some(message) = &app.validation_message {
        let hint = Paragraph::new(message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red));
        f.render_widget(hint, layout.hint);
    }

    let add = Paragraph::new("Add")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));
    f.render_widget(add, layout.add_button);
}

fn render_input(f: &mut Frame, app: &App, field: DraftField, area: Rect) {
    let focused = app.focused_field == field;
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let value = app.draft.field(field);
    if value.is_empty() {
        f.render_widget(
            Paragraph::new(field.label()).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    } else {
        let cursor = if focused { app.cursor_position } else { 0 };
        let start = visible_start(cursor, inner.width as usize);
        let shown: String = value.chars().skip(start).take(inner.width as usize).collect();
        f.render_widget(Paragraph::new(shown), inner);
    }

    if focused && inner.width > 0 {
        let start = visible_start(app.cursor_position, inner.width as usize);
        let column = (app.cursor_position - start) as u16;
        f.set_cursor_position((inner.x + column, inner.y));
    }
}

/// First character shown so that the cursor stays inside a box `width` wide.
fn visible_start(cursor: usize, width: usize) -> usize {
    (cursor + 1).saturating_sub(width)
}
