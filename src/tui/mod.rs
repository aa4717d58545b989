//! Terminal backend for the slab dashboard.
//!
//! Runs a single-threaded loop: refresh when due, draw, then wait a bounded
//! time for one key press.

mod app;
mod event;
mod input;
mod layout;
mod render;
mod state;
mod style;
mod terminal;

pub use app::{App, AppError};
pub use input::KeyAction;
pub use state::AppState;
