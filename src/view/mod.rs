//! UI-agnostic view models.
//!
//! [`pager`] decides which slabs are visible on a draw, [`slabs`] turns the
//! snapshot and that window into a [`common::RenderModel`]. The TUI then maps
//! the model onto screen positions and styles.

pub mod common;
pub mod pager;
pub mod slabs;

pub use common::{Cell, CellStyle, Column, RenderModel};
pub use pager::{PageWindow, Pager, paginate};
pub use slabs::build_slab_view;
