//! Error taxonomy for effect resolution.
//!
//! Nothing here is fatal. Every fallible path in the engine is a
//! presence/validity check guarding a no-op; the dispatcher turns each
//! `EffectError` into a diagnostic and a report entry and carries on.
//!
//! ## Severity
//!
//! - **Skipped**: an input was missing, the step silently did nothing
//! - **Rejected**: the step was attempted and refused without mutating state
//! - **Warning**: something the content or wiring should fix

use serde::{Deserialize, Serialize};

use crate::core::UnitId;
use crate::grid::GridPos;
use crate::relics::RelicId;
use crate::selection::SelectionKind;

/// How loudly an error should be reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Missing input; logged at debug.
    Skipped,
    /// Action refused, state untouched; logged at debug.
    Rejected,
    /// Content or wiring problem; logged at warn.
    Warning,
}

impl ErrorSeverity {
    /// Human-readable name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Rejected => "rejected",
            Self::Warning => "warning",
        }
    }
}

/// Why a destination cell was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestinationFault {
    OutOfBounds,
    Occupied,
    Blocked,
    OutOfRange { distance: i32, range: i32 },
    NoFreeCell,
}

impl std::fmt::Display for DestinationFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("out of bounds"),
            Self::Occupied => f.write_str("occupied"),
            Self::Blocked => f.write_str("blocked"),
            Self::OutOfRange { distance, range } => {
                write!(f, "distance {distance} exceeds range {range}")
            }
            Self::NoFreeCell => f.write_str("no free cell"),
        }
    }
}

/// Error raised while resolving a relic effect.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EffectError {
    /// A caster, definition, target or cell the step needs is absent.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// Unit referenced by the step is not on the battlefield.
    #[error("{0} is not a live unit")]
    UnitNotLive(UnitId),

    /// Destination refused; nothing moved.
    #[error("invalid destination {pos}: {reason}")]
    InvalidDestination { pos: GridPos, reason: DestinationFault },

    /// Push/pull refused by the unit's status.
    #[error("{0} cannot be knocked back")]
    KnockbackImmune(UnitId),

    /// Guarded grog spend failed.
    #[error("not enough grog (needed {needed})")]
    InsufficientGrog { needed: u32 },

    /// Identifier has no behavior registered.
    #[error("unhandled relic identifier `{0}`")]
    UnhandledIdentifier(String),

    /// An optional collaborator is not wired in.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(&'static str),

    /// Placeholder branch with no behavior yet.
    #[error("not yet implemented: {0}")]
    NotImplemented(&'static str),

    /// A selection is outstanding; the battle is in a modal state.
    #[error("selection pending for {0}")]
    SelectionPending(RelicId),
}

impl EffectError {
    /// Severity of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingInput(_) | Self::UnitNotLive(_) => ErrorSeverity::Skipped,
            Self::InvalidDestination { .. }
            | Self::KnockbackImmune(_)
            | Self::InsufficientGrog { .. } => ErrorSeverity::Rejected,
            Self::UnhandledIdentifier(_)
            | Self::CollaboratorUnavailable(_)
            | Self::NotImplemented(_)
            | Self::SelectionPending(_) => ErrorSeverity::Warning,
        }
    }

    /// Stable identifier for the variant.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "missing_input",
            Self::UnitNotLive(_) => "unit_not_live",
            Self::InvalidDestination { .. } => "invalid_destination",
            Self::KnockbackImmune(_) => "knockback_immune",
            Self::InsufficientGrog { .. } => "insufficient_grog",
            Self::UnhandledIdentifier(_) => "unhandled_identifier",
            Self::CollaboratorUnavailable(_) => "collaborator_unavailable",
            Self::NotImplemented(_) => "not_implemented",
            Self::SelectionPending(_) => "selection_pending",
        }
    }
}

/// Error returned when a player's choice cannot resume a pending effect.
///
/// The pending request survives these errors so the UI can prompt again.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no selection is pending")]
    NothingPending,

    #[error("a selection is already pending")]
    AlreadyPending,

    #[error("choice does not satisfy a {0} request")]
    IncompleteChoice(SelectionKind),

    #[error("{0} is not a live ally of the caster")]
    NotAnAlly(UnitId),

    #[error("tile {0} is not an empty placeable cell")]
    TileUnavailable(GridPos),
}
