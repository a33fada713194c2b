use crate::application::{Action, App, AppMode};
use crate::domain::DraftField;
use crate::infrastructure::{PasteSource, SystemClipboard};
use crate::presentation::ui::{FormLayout, ScreenLayout};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Translates terminal events into [`Action`]s.
///
/// The handler never mutates the app itself; the caller dispatches what it
/// returns.
pub struct InputHandler<P = SystemClipboard> {
    clipboard: P,
}

impl Default for InputHandler<SystemClipboard> {
    fn default() -> Self {
        Self::new(SystemClipboard::default())
    }
}

impl<P: PasteSource> InputHandler<P> {
    pub fn new(clipboard: P) -> Self {
        Self { clipboard }
    }

    /// Maps any terminal event. `area` is the full terminal area the UI was drawn in.
    pub fn handle_event(&mut self, app: &App, event: &Event, area: Rect) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_event(app, key.code, key.modifiers)
            }
            Event::Mouse(mouse) => Self::handle_mouse_event(app, mouse, area),
            Event::Paste(text) if matches!(app.mode, AppMode::Add) => {
                Some(Action::InsertText(text.clone()))
            }
            _ => None,
        }
    }

    pub fn handle_key_event(&mut self, app: &App, key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match app.mode {
            AppMode::List => Self::handle_list_mode(key),
            AppMode::Add => self.handle_add_mode(key, modifiers),
        }
    }

    fn handle_list_mode(key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Char('+') | KeyCode::Char('a') => Some(Action::OpenAdd),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Char('x') | KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                Some(Action::DeleteSelected)
            }
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn handle_add_mode(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match key {
                KeyCode::Char('v') => self.clipboard.paste().map(Action::InsertText),
                _ => None,
            };
        }

        match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab | KeyCode::Down => Some(Action::FocusNextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPreviousField),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Delete => Some(Action::DeleteForward),
            KeyCode::Left => Some(Action::CursorLeft),
            KeyCode::Right => Some(Action::CursorRight),
            KeyCode::Home => Some(Action::CursorHome),
            KeyCode::End => Some(Action::CursorEnd),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::ALT) => Some(Action::InsertChar(c)),
            _ => None,
        }
    }

    /// Left clicks on the on-screen buttons act like taps.
    pub fn handle_mouse_event(app: &App, mouse: &MouseEvent, area: Rect) -> Option<Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let (column, row) = (mouse.column, mouse.row);

        match app.mode {
            AppMode::List => {
                let layout = ScreenLayout::new(area);
                if hit(layout.plus_button, column, row) {
                    return Some(Action::OpenAdd);
                }
                if !app.ready {
                    return None;
                }
                (0..layout.visible_rows()).find_map(|n| {
                    let row_area = layout.row_area(n)?;
                    if !hit(ScreenLayout::cross_area(row_area), column, row) {
                        return None;
                    }
                    let todo = app.todos.get(app.scroll_offset + n)?;
                    Some(Action::Delete(todo.id))
                })
            }
            AppMode::Add => {
                let layout = FormLayout::new(area);
                if hit(layout.cancel_button, column, row) {
                    Some(Action::Cancel)
                } else if hit(layout.add_button, column, row) {
                    Some(Action::Submit)
                } else if hit(layout.title_input, column, row) {
                    Some(Action::FocusField(DraftField::Title))
                } else if hit(layout.description_input, column, row) {
                    Some(Action::FocusField(DraftField::Description))
                } else {
                    None
                }
            }
        }
    }
}

fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
