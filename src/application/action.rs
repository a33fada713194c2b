//! User gestures and background events expressed as values.
//!
//! Every change to [`App`] in the running program goes through
//! [`App::dispatch`], so the event loop only has to translate input into
//! [`Action`]s and redraw afterwards.

use super::state::{App, AppMode};
use crate::domain::{DraftField, Todo, TodoId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the add form
    OpenAdd,
    /// Close the add form, discarding the draft
    Cancel,
    /// Commit the draft
    Submit,
    Delete(TodoId),
    DeleteSelected,
    SelectNext,
    SelectPrevious,
    FocusField(DraftField),
    FocusNextField,
    FocusPreviousField,
    InsertChar(char),
    InsertText(String),
    Backspace,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Seed data arrived from the loader
    SeedLoaded(Vec<Todo>),
    Tick,
    Quit,
}

impl App {
    /// Applies an action to the state.
    ///
    /// Actions that make no sense in the current mode are ignored, e.g. text
    /// input while the list is showing or deletes while the form is open.
    /// The add form cannot be opened before the seed data has arrived.
    pub fn dispatch(&mut self, action: Action) {
        if !matches!(action, Action::Tick) {
            log::trace!("dispatch {:?} in {:?}", action, self.mode);
        }

        match (self.mode, action) {
            (_, Action::Quit) => self.should_quit = true,
            (_, Action::Tick) => self.tick(),
            (_, Action::SeedLoaded(seed)) => self.initialize(seed),

            (AppMode::List, Action::OpenAdd) if self.ready => self.set_mode(AppMode::Add),
            (AppMode::List, Action::Delete(id)) => {
                self.remove_item(id);
            }
            (AppMode::List, Action::DeleteSelected) => {
                self.remove_selected();
            }
            (AppMode::List, Action::SelectNext) => self.select_next(),
            (AppMode::List, Action::SelectPrevious) => self.select_previous(),

            (AppMode::Add, Action::Cancel) => self.set_mode(AppMode::List),
            (AppMode::Add, Action::Submit) => {
                // Rejection is already reflected in the validation hint.
                let _ = self.submit_draft();
            }
            (AppMode::Add, Action::FocusField(field)) => self.focus_field(field),
            (AppMode::Add, Action::FocusNextField) => self.focus_next_field(),
            (AppMode::Add, Action::FocusPreviousField) => self.focus_previous_field(),
            (AppMode::Add, Action::InsertChar(c)) => self.insert_char(c),
            (AppMode::Add, Action::InsertText(text)) => self.insert_text(&text),
            (AppMode::Add, Action::Backspace) => self.backspace(),
            (AppMode::Add, Action::DeleteForward) => self.delete_forward(),
            (AppMode::Add, Action::CursorLeft) => self.cursor_left(),
            (AppMode::Add, Action::CursorRight) => self.cursor_right(),
            (AppMode::Add, Action::CursorHome) => self.cursor_home(),
            (AppMode::Add, Action::CursorEnd) => self.cursor_end(),

            _ => {}
        }
    }
}
