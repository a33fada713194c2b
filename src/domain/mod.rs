//! Domain layer: todo items, the ordered collection and the add-form draft.

pub mod models;
pub mod errors;

pub use models::*;
pub use errors::*;
