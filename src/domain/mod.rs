//! Domain module: the todo entity and title rules.

pub mod todo;

pub use todo::{Todo, normalize_title};
