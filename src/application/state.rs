//! Application state for the terminal todo list.
//!
//! [`App`] owns everything the screen shows: the todo collection, the
//! readiness flag, the view mode and the add-form draft. All mutation goes
//! through the methods here, usually via `App::dispatch`.

use crate::domain::{
    Draft, DraftField, DomainResult, IdAllocator, IdPolicy, Todo, TodoId, TodoList,
};

/// Which view is on screen.
///
/// `List` shows the todo list; `Add` shows the add form on top of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    List,
    Add,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use ttodo::application::{App, AppMode};
/// use ttodo::domain::sample_todos;
///
/// let mut app = App::default();
/// assert!(!app.ready);
/// app.initialize(sample_todos());
/// assert!(app.ready);
/// assert_eq!(app.todos.len(), 3);
/// assert_eq!(app.mode, AppMode::List);
/// ```
#[derive(Debug)]
pub struct App {
    /// The todo items in insertion order
    pub todos: TodoList,
    /// Set once the seed data has arrived
    pub ready: bool,
    /// Current view mode
    pub mode: AppMode,
    /// Uncommitted add-form input
    pub draft: Draft,
    /// Draft input receiving keystrokes
    pub focused_field: DraftField,
    /// Cursor position within the focused field, in characters
    pub cursor_position: usize,
    /// Highlighted row of the list
    pub selected: usize,
    /// First list row visible in the viewport
    pub scroll_offset: usize,
    /// Number of list rows that fit in the viewport
    pub viewport_rows: usize,
    /// Hint shown in the add form after a rejected submission
    pub validation_message: Option<String>,
    /// Animation frame of the loading indicator
    pub spinner_frame: usize,
    /// Set when the user asked to leave
    pub should_quit: bool,
    ids: IdAllocator,
}

impl Default for App {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}

impl App {
    pub fn new(id_policy: IdPolicy) -> Self {
        Self {
            todos: TodoList::new(),
            ready: false,
            mode: AppMode::List,
            draft: Draft::default(),
            focused_field: DraftField::Title,
            cursor_position: 0,
            selected: 0,
            scroll_offset: 0,
            viewport_rows: 10,
            validation_message: None,
            spinner_frame: 0,
            should_quit: false,
            ids: IdAllocator::new(id_policy),
        }
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.ids.policy()
    }

    /// Populates the collection with the seed set and marks the app ready.
    ///
    /// Only the first call has an effect.
    pub fn initialize(&mut self, seed: Vec<Todo>) {
        if self.ready {
            log::warn!("Ignoring repeated initialization with {} items", seed.len());
            return;
        }
        for todo in &seed {
            self.ids.observe(todo.id);
        }
        log::info!("Loaded {} todos", seed.len());
        self.todos.replace(seed);
        self.ready = true;
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Switches the view mode.
    ///
    /// Entering list mode discards the draft.
    pub fn set_mode(&mut self, mode: AppMode) {
        log::debug!("Mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        match mode {
            AppMode::List => {
                self.draft.clear();
                self.validation_message = None;
                self.focused_field = DraftField::Title;
                self.cursor_position = 0;
            }
            AppMode::Add => {
                self.focused_field = DraftField::Title;
                self.cursor_position = self.draft.title.chars().count();
            }
        }
    }

    /// Commits the draft as a new item and returns to list mode.
    ///
    /// A draft with an empty field is rejected and nothing changes except
    /// the validation hint.
    pub fn submit_draft(&mut self) -> DomainResult<TodoId> {
        let id = self.ids.next(&self.todos);
        let todo = match self.draft.to_todo(id) {
            Ok(todo) => todo,
            Err(err) => {
                log::debug!("Rejected draft: {}", err);
                self.validation_message = Some(err.to_string());
                return Err(err);
            }
        };

        log::debug!("Adding todo {} ({:?})", id, todo.title);
        self.ids.observe(id);
        self.todos.push(todo);
        self.set_mode(AppMode::List);
        self.selected = self.todos.len() - 1;
        self.ensure_selection_visible();
        Ok(id)
    }

    /// Removes the item with the given identifier. Absent identifiers are ignored.
    pub fn remove_item(&mut self, id: TodoId) -> Option<Todo> {
        let removed = self.todos.remove(id);
        match &removed {
            Some(todo) => {
                log::debug!("Removed todo {} ({:?})", todo.id, todo.title);
                self.clamp_selection();
            }
            None => log::debug!("No todo with id {} to remove", id),
        }
        removed
    }

    pub fn remove_selected(&mut self) -> Option<Todo> {
        let id = self.selected_todo()?.id;
        self.remove_item(id)
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.todos.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.todos.len() {
            self.selected += 1;
            self.ensure_selection_visible();
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_selection_visible();
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.todos.len().saturating_sub(1));
        self.clamp_scroll();
    }

    /// Keeps the viewport from scrolling past the end of the list.
    fn clamp_scroll(&mut self) {
        let max_offset = self.todos.len().saturating_sub(self.viewport_rows);
        self.scroll_offset = self.scroll_offset.min(max_offset);
        self.ensure_selection_visible();
    }

    /// Updates the number of rows the list can show.
    ///
    /// A taller viewport scrolls back up so that it stays filled.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.clamp_scroll();
    }

    /// Scrolls so that the selected row is inside the viewport.
    pub fn ensure_selection_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.viewport_rows {
            self.scroll_offset = self.selected + 1 - self.viewport_rows;
        }
    }

    /// Moves keyboard focus to a draft input, cursor at its end.
    pub fn focus_field(&mut self, field: DraftField) {
        self.focused_field = field;
        self.cursor_position = self.draft.field(field).chars().count();
    }

    pub fn focus_next_field(&mut self) {
        self.focus_field(self.focused_field.other());
    }

    /// With two inputs the previous field is the other one, as for
    /// [`focus_next_field`](Self::focus_next_field).
    pub fn focus_previous_field(&mut self) {
        self.focus_field(self.focused_field.other());
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.cursor_byte_index();
        self.draft.field_mut(self.focused_field).insert(at, c);
        self.cursor_position += 1;
        self.validation_message = None;
    }

    /// Inserts text at the cursor; line breaks are dropped since inputs are single-line.
    pub fn insert_text(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.cursor_byte_index();
            self.draft.field_mut(self.focused_field).remove(at);
            self.validation_message = None;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor_position < self.focused_len() {
            let at = self.cursor_byte_index();
            self.draft.field_mut(self.focused_field).remove(at);
            self.validation_message = None;
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.focused_len() {
            self.cursor_position += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.focused_len();
    }

    /// Advances the loading indicator while the seed is outstanding.
    pub fn tick(&mut self) {
        if !self.ready {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    fn focused_len(&self) -> usize {
        self.draft.field(self.focused_field).chars().count()
    }

    fn cursor_byte_index(&self) -> usize {
        let text = self.draft.field(self.focused_field);
        text.char_indices()
            .nth(self.cursor_position)
            .map(|(index, _)| index)
            .unwrap_or(text.len())
    }
}
