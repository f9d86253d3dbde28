//! Project module
//!
//! A Project is a named container of tasks shown as a kanban board.

mod model;
mod store;

pub use model::*;
pub use store::*;
