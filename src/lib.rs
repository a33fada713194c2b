//! TTODO - Terminal Todo Library
//!
//! A single-screen terminal todo list with an add form, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
