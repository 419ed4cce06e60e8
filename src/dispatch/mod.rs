//! Relic dispatch.
//!
//! `EffectDispatcher` is the entry point: it looks a relic up, resolves its
//! target, and walks its recipe step by step against a `BattleState`.
//!
//! ## Two-phase results
//!
//! Most relics finish inside one call and return `Complete`. Relics that
//! need the player to pick an ally or a tile return `PendingSelection`; the
//! caller shows the prompt however it likes and later calls
//! `resolve_selection` or `cancel_selection`. Until then the dispatcher
//! refuses new work with `SelectionPending`.
//!
//! ```text
//! execute --> Complete(report)
//!         \-> PendingSelection(request) --resolve_selection--> Complete(report)
//!         |                             \--cancel_selection--> report + Cancelled
//!         \-> Aborted(error)
//! ```

mod dispatcher;
mod executor;

pub use dispatcher::EffectDispatcher;
pub use executor::{Invocation, PendingEffect};

use serde::Serialize;

use crate::effects::EffectReport;
use crate::error::EffectError;
use crate::selection::SelectionRequest;

/// Result of a dispatch call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum DispatchOutcome {
    /// Every step ran (some may have been skipped; see the report).
    Complete(EffectReport),

    /// Waiting for the player. Resume with `resolve_selection`.
    PendingSelection(SelectionRequest),

    /// Nothing ran.
    Aborted(#[serde(serialize_with = "serialize_error")] EffectError),
}

fn serialize_error<S: serde::Serializer>(err: &EffectError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&err.to_string())
}

impl DispatchOutcome {
    /// True for `Complete`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// True for `PendingSelection`.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingSelection(_))
    }

    /// The report of a completed dispatch.
    #[must_use]
    pub fn report(&self) -> Option<&EffectReport> {
        match self {
            Self::Complete(report) => Some(report),
            _ => None,
        }
    }

    /// The request of a suspended dispatch.
    #[must_use]
    pub fn request(&self) -> Option<&SelectionRequest> {
        match self {
            Self::PendingSelection(request) => Some(request),
            _ => None,
        }
    }

    /// The error of an aborted dispatch.
    #[must_use]
    pub fn error(&self) -> Option<&EffectError> {
        match self {
            Self::Aborted(err) => Some(err),
            _ => None,
        }
    }
}
