//! Application layer managing state and state transitions.
//!
//! This module sits between the domain types and the terminal front end:
//! it owns the application state and turns [`Action`]s into changes.

pub mod state;
pub mod action;

pub use state::*;
pub use action::*;
