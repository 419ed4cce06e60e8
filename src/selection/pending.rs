//! The selection state machine.

use crate::error::SelectionError;

use super::{SelectionPhase, SelectionRequest};

/// Holds at most one outstanding request and its continuation `C`.
///
/// The machine is generic over the continuation so it knows nothing about
/// how the suspended effect is represented.
///
/// ```
/// use relic_engine::core::UnitId;
/// use relic_engine::relics::RelicId;
/// use relic_engine::selection::{
///     InteractiveSelection, SelectionKind, SelectionPhase, SelectionRequest,
/// };
///
/// let mut selection: InteractiveSelection<&str> = InteractiveSelection::new();
/// let request = SelectionRequest {
///     relic: RelicId::HatMedic,
///     caster: UnitId(1),
///     kind: SelectionKind::Ally,
///     prompt: "Choose an ally to heal",
/// };
///
/// selection.issue(request, "heal").unwrap();
/// assert_eq!(selection.phase(), SelectionPhase::Requested);
///
/// let (_, continuation) = selection.resolve().unwrap();
/// assert_eq!(continuation, "heal");
/// assert_eq!(selection.phase(), SelectionPhase::Resolved);
/// ```
#[derive(Clone, Debug)]
pub struct InteractiveSelection<C> {
    phase: SelectionPhase,
    pending: Option<(SelectionRequest, C)>,
}

impl<C> Default for InteractiveSelection<C> {
    fn default() -> Self {
        Self {
            phase: SelectionPhase::Idle,
            pending: None,
        }
    }
}

impl<C> InteractiveSelection<C> {
    /// Create an idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// The outstanding request, if any.
    #[must_use]
    pub fn request(&self) -> Option<&SelectionRequest> {
        self.pending.as_ref().map(|(r, _)| r)
    }

    /// True while a request awaits an answer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase == SelectionPhase::Requested
    }

    /// Start a new effect instance: a terminal phase returns to Idle.
    pub fn begin(&mut self) {
        if self.phase.is_terminal() {
            self.phase = SelectionPhase::Idle;
        }
    }

    /// Enter Requested with `request` and the continuation to run later.
    pub fn issue(&mut self, request: SelectionRequest, continuation: C) -> Result<(), SelectionError> {
        if self.is_pending() {
            return Err(SelectionError::AlreadyPending);
        }
        self.pending = Some((request, continuation));
        self.phase = SelectionPhase::Requested;
        Ok(())
    }

    /// Take the continuation and enter Resolved.
    pub fn resolve(&mut self) -> Result<(SelectionRequest, C), SelectionError> {
        let taken = self.take()?;
        self.phase = SelectionPhase::Resolved;
        Ok(taken)
    }

    /// Take the continuation and enter Cancelled.
    pub fn cancel(&mut self) -> Result<(SelectionRequest, C), SelectionError> {
        let taken = self.take()?;
        self.phase = SelectionPhase::Cancelled;
        Ok(taken)
    }

    fn take(&mut self) -> Result<(SelectionRequest, C), SelectionError> {
        if !self.is_pending() {
            return Err(SelectionError::NothingPending);
        }
        self.pending.take().ok_or(SelectionError::NothingPending)
    }
}
