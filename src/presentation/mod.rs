//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the todo list and the add form using ratatui and
//! translates keyboard and mouse events into application actions.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
