//! Infrastructure layer providing the system-facing pieces.
//!
//! This module contains configuration loading, log setup, the background
//! seed loader and clipboard access.

pub mod config;
pub mod loader;
pub mod logging;
pub mod clipboard;

pub use config::*;
pub use loader::*;
pub use clipboard::*;
