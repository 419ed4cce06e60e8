//! Player-directed sub-selection.
//!
//! Some relics stop halfway to ask the player for an ally, an empty tile, or
//! both. The dispatcher returns a `SelectionRequest` instead of blocking; the
//! caller later resumes with a `SelectionChoice` or cancels.
//!
//! ## Phases
//!
//! ```text
//! Idle --issue--> Requested --resolve--> Resolved
//!                           \--cancel--> Cancelled
//! ```
//!
//! Resolved and Cancelled are terminal for that effect instance; the next
//! invocation starts again from Idle.

mod pending;

pub use pending::InteractiveSelection;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::UnitId;
use crate::grid::GridPos;
use crate::relics::RelicId;

/// What the player is asked to pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum SelectionKind {
    /// A live ally of the caster (not the caster).
    #[strum(serialize = "ally")]
    Ally,
    /// An empty, placeable tile.
    #[strum(serialize = "empty tile")]
    EmptyTile,
    /// An ally, then an empty tile.
    #[strum(serialize = "ally-then-tile")]
    AllyThenTile,
}

impl SelectionKind {
    /// True if the kind needs an ally.
    #[must_use]
    pub const fn wants_ally(self) -> bool {
        matches!(self, Self::Ally | Self::AllyThenTile)
    }

    /// True if the kind needs a tile.
    #[must_use]
    pub const fn wants_tile(self) -> bool {
        matches!(self, Self::EmptyTile | Self::AllyThenTile)
    }
}

/// A prompt handed to the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectionRequest {
    pub relic: RelicId,
    pub caster: UnitId,
    pub kind: SelectionKind,
    pub prompt: &'static str,
}

/// The player's answer to a `SelectionRequest`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChoice {
    pub ally: Option<UnitId>,
    pub cell: Option<GridPos>,
}

impl SelectionChoice {
    /// Choose an ally.
    #[must_use]
    pub fn ally(ally: UnitId) -> Self {
        Self {
            ally: Some(ally),
            cell: None,
        }
    }

    /// Choose a tile.
    #[must_use]
    pub fn tile(cell: GridPos) -> Self {
        Self {
            ally: None,
            cell: Some(cell),
        }
    }

    /// Choose an ally and a tile.
    #[must_use]
    pub fn ally_and_tile(ally: UnitId, cell: GridPos) -> Self {
        Self {
            ally: Some(ally),
            cell: Some(cell),
        }
    }

    /// True if every part `kind` asks for is present.
    #[must_use]
    pub fn satisfies(&self, kind: SelectionKind) -> bool {
        (!kind.wants_ally() || self.ally.is_some()) && (!kind.wants_tile() || self.cell.is_some())
    }
}

/// Where a selection stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum SelectionPhase {
    #[default]
    Idle,
    Requested,
    Resolved,
    Cancelled,
}

impl SelectionPhase {
    /// Resolved or Cancelled.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(SelectionKind::AllyThenTile.to_string(), "ally-then-tile");
        assert_eq!(SelectionKind::EmptyTile.to_string(), "empty tile");
    }

    #[test]
    fn test_choice_satisfies() {
        let ally = SelectionChoice::ally(UnitId(2));
        let tile = SelectionChoice::tile(GridPos::new(1, 1));
        let both = SelectionChoice::ally_and_tile(UnitId(2), GridPos::new(1, 1));

        assert!(ally.satisfies(SelectionKind::Ally));
        assert!(!ally.satisfies(SelectionKind::EmptyTile));
        assert!(tile.satisfies(SelectionKind::EmptyTile));
        assert!(!tile.satisfies(SelectionKind::AllyThenTile));
        assert!(both.satisfies(SelectionKind::AllyThenTile));
        assert!(!SelectionChoice::default().satisfies(SelectionKind::Ally));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!SelectionPhase::Idle.is_terminal());
        assert!(!SelectionPhase::Requested.is_terminal());
        assert!(SelectionPhase::Resolved.is_terminal());
        assert!(SelectionPhase::Cancelled.is_terminal());
    }
}
