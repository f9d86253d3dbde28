//! Kanban board interaction
//!
//! This module contains the three-column board geometry and the drag/drop
//! state machine driving it.

mod controller;
mod model;

pub use controller::*;
pub use model::*;
