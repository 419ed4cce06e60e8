//! Grid system for battle positions.
//!
//! - `GridPos`: integer coordinates with the Manhattan metric
//! - `Grid`: cells, occupancy and role flags
//! - `HazardKind`: tile-based effects recorded on cells

mod board;
mod position;

pub use board::{CellFlags, Grid, GridCell, HazardKind};
pub use position::GridPos;
