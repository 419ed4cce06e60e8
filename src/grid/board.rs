//! Battle grid: cells, occupancy and role flags.
//!
//! The `Grid` is the spatial authority of a battle. It tracks which unit
//! stands on which cell and enforces the one-occupant-per-cell rule:
//! - `occupy` refuses occupied, blocked or out-of-bounds cells
//! - `vacate` clears a cell and returns its previous occupant
//! - `can_place` answers the placement question without mutating
//!
//! Unit positions are stored on the units themselves; `BattleState` keeps the
//! two views consistent.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::core::UnitId;
use crate::error::{DestinationFault, EffectError};

use super::GridPos;

bitflags! {
    /// Role flags for a grid cell.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        /// Neutral ground separating the two halves; units cannot stand here.
        const NEUTRAL = 0b0000_0001;
        /// Impassable terrain.
        const BLOCKED = 0b0000_0010;
    }
}

/// Tile-based persistent effects a hazard manager can create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum HazardKind {
    HealingZone,
    Trap,
    SpeedZone,
    PoisonCloud,
    PoisonTile,
}

/// A single grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Cell coordinates.
    pub pos: GridPos,
    /// Role flags.
    pub flags: CellFlags,
    /// Unit standing on this cell, if any.
    pub occupant: Option<UnitId>,
    /// Most recent hazard placed on this cell, if any.
    pub hazard: Option<HazardKind>,
}

impl GridCell {
    fn new(pos: GridPos) -> Self {
        Self {
            pos,
            flags: CellFlags::empty(),
            occupant: None,
            hazard: None,
        }
    }

    /// True when nothing stands on this cell.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Rectangular battle grid, row-major.
///
/// ## Usage
///
/// ```
/// use relic_engine::core::UnitId;
/// use relic_engine::grid::{Grid, GridPos};
///
/// let mut grid = Grid::new(6, 4);
/// let cell = GridPos::new(2, 1);
///
/// assert!(grid.can_place(cell));
/// grid.occupy(cell, UnitId(1)).unwrap();
/// assert!(!grid.can_place(cell));
/// assert_eq!(grid.vacate(cell), Some(UnitId(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Non-positive dimensions produce a grid with no cells.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| GridCell::new(GridPos::new(x, y))))
            .collect();

        Self {
            width,
            height,
            cells,
        }
    }

    /// Mark a whole column as neutral ground (builder pattern).
    #[must_use]
    pub fn with_neutral_column(mut self, x: i32) -> Self {
        for y in 0..self.height {
            self.set_flags(GridPos::new(x, y), CellFlags::NEUTRAL);
        }
        self
    }

    /// Grid width in cells.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// True when `pos` lies on the grid.
    #[must_use]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    /// Cell at `pos`, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, pos: GridPos) -> Option<&GridCell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&GridCell> {
        self.cell(GridPos::new(x, y))
    }

    fn cell_mut(&mut self, pos: GridPos) -> Option<&mut GridCell> {
        self.index(pos).map(|i| &mut self.cells[i])
    }

    /// Add role flags to a cell. Out-of-bounds positions are ignored.
    pub fn set_flags(&mut self, pos: GridPos, flags: CellFlags) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.flags.insert(flags);
        }
    }

    /// Unit standing on `pos`, if any.
    #[must_use]
    pub fn occupant(&self, pos: GridPos) -> Option<UnitId> {
        self.cell(pos).and_then(|c| c.occupant)
    }

    /// Why a unit could not be placed on `pos`, or `None` if it can.
    #[must_use]
    pub fn placement_fault(&self, pos: GridPos) -> Option<DestinationFault> {
        match self.cell(pos) {
            None => Some(DestinationFault::OutOfBounds),
            Some(cell) if cell.flags.intersects(CellFlags::BLOCKED | CellFlags::NEUTRAL) => {
                Some(DestinationFault::Blocked)
            }
            Some(cell) if !cell.is_vacant() => Some(DestinationFault::Occupied),
            Some(_) => None,
        }
    }

    /// True when a unit may be placed on `pos`.
    #[must_use]
    pub fn can_place(&self, pos: GridPos) -> bool {
        self.placement_fault(pos).is_none()
    }

    /// Put `unit` on `pos`.
    pub fn occupy(&mut self, pos: GridPos, unit: UnitId) -> Result<(), EffectError> {
        if let Some(reason) = self.placement_fault(pos) {
            return Err(EffectError::InvalidDestination { pos, reason });
        }
        if let Some(cell) = self.cell_mut(pos) {
            cell.occupant = Some(unit);
        }
        Ok(())
    }

    /// Clear `pos`, returning the unit that stood there.
    pub fn vacate(&mut self, pos: GridPos) -> Option<UnitId> {
        self.cell_mut(pos).and_then(|c| c.occupant.take())
    }

    /// Record a hazard on `pos`. Out-of-bounds positions are ignored.
    pub fn mark_hazard(&mut self, pos: GridPos, kind: HazardKind) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.hazard = Some(kind);
        }
    }

    /// In-bounds cells within `radius` (Manhattan) of `center`, row-major.
    pub fn cells_within(&self, center: GridPos, radius: i32) -> impl Iterator<Item = &GridCell> {
        self.cells
            .iter()
            .filter(move |c| c.pos.manhattan(center) <= radius)
    }
}
