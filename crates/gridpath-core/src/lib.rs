//! **gridpath-core** — the grid model shared by the *gridpath* crates.
//!
//! This crate provides grid coordinates, role-tagged cells, and a square
//! [`Grid`] with barrier/start/end editing and 4-way adjacency. The search
//! algorithms live in `gridpath-search`.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, Role};
pub use error::GridError;
pub use geom::{Point, cell_at_pixel};
pub use grid::Grid;
