//! What an effect did.
//!
//! Every step the executor runs leaves a `ReportEntry`: either a concrete
//! state change (`Applied`) or the error that made it a no-op. Entries are
//! also emitted as `tracing` events under the `relic_engine::effects`
//! target, at debug for ordinary outcomes and warn for wiring problems.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::core::{Team, UnitId};
use crate::error::{EffectError, ErrorSeverity};
use crate::grid::{GridPos, HazardKind};
use crate::relics::RelicId;
use crate::status::StatusKind;

/// A state change performed by a primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Applied {
    Moved { unit: UnitId, from: GridPos, to: GridPos },
    Swapped { first: UnitId, second: UnitId },
    Damaged { unit: UnitId, amount: i32, defeated: bool },
    Healed { unit: UnitId, amount: i32 },
    MoraleChanged { unit: UnitId, delta: i32, surrendered: bool },
    BuzzChanged { unit: UnitId, delta: i32 },
    StatusApplied { unit: UnitId, kind: StatusKind, duration: u32 },
    StatusesCleared { unit: UnitId, debuffs: bool, count: usize },
    GrogGranted { team: Team, amount: u32 },
    GrogSpent { team: Team, amount: u32 },
    EnergyGranted { team: Team, amount: u32 },
    CardsDrawn { unit: UnitId, count: u32 },
    CardsDiscarded { unit: UnitId, count: u32 },
    HazardCreated { kind: HazardKind, cell: GridPos },
    Revived { unit: UnitId, at: GridPos, hp: i32 },
    /// A pending selection was cancelled; earlier steps stay committed.
    Cancelled,
}

/// One line of an effect report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ReportEntry {
    Applied(Applied),
    Skipped(#[serde(serialize_with = "serialize_error")] EffectError),
}

fn serialize_error<S: serde::Serializer>(err: &EffectError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&err.to_string())
}

/// Emit the diagnostic for `err` at the level its severity calls for.
pub(crate) fn log_error(relic: &str, err: &EffectError) {
    match err.severity() {
        ErrorSeverity::Warning => warn!(
            target: "relic_engine::effects",
            relic,
            code = err.error_code(),
            "{}", err
        ),
        ErrorSeverity::Skipped | ErrorSeverity::Rejected => debug!(
            target: "relic_engine::effects",
            relic,
            code = err.error_code(),
            severity = err.severity().as_str(),
            "{}", err
        ),
    }
}

/// Ordered record of one effect invocation (or one resumed continuation).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectReport {
    pub relic: RelicId,
    pub entries: Vec<ReportEntry>,
}

impl EffectReport {
    /// Empty report for `relic`.
    #[must_use]
    pub fn new(relic: RelicId) -> Self {
        Self {
            relic,
            entries: Vec::new(),
        }
    }

    /// Record a state change.
    pub fn applied(&mut self, change: Applied) {
        trace!(target: "relic_engine::effects", relic = %self.relic, change = ?change, "applied");
        self.entries.push(ReportEntry::Applied(change));
    }

    /// Record a no-op and emit its diagnostic.
    pub fn skipped(&mut self, err: EffectError) {
        log_error(self.relic.name(), &err);
        self.entries.push(ReportEntry::Skipped(err));
    }

    /// Record the outcome of a fallible primitive.
    pub fn record(&mut self, outcome: Result<Applied, EffectError>) {
        match outcome {
            Ok(change) => self.applied(change),
            Err(err) => self.skipped(err),
        }
    }

    /// Append another report's entries.
    pub fn extend(&mut self, other: EffectReport) {
        self.entries.extend(other.entries);
    }

    /// State changes in order.
    pub fn changes(&self) -> impl Iterator<Item = &Applied> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Applied(a) => Some(a),
            ReportEntry::Skipped(_) => None,
        })
    }

    /// Errors in order.
    pub fn errors(&self) -> impl Iterator<Item = &EffectError> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Skipped(err) => Some(err),
            ReportEntry::Applied(_) => None,
        })
    }

    /// True if any step changed state.
    #[must_use]
    pub fn changed_anything(&self) -> bool {
        self.changes().next().is_some()
    }

    /// True if some entry is the error with `code`.
    #[must_use]
    pub fn has_error(&self, code: &str) -> bool {
        self.errors().any(|e| e.error_code() == code)
    }

    /// Total damage dealt to `unit`.
    #[must_use]
    pub fn damage_to(&self, unit: UnitId) -> i32 {
        self.changes()
            .map(|c| match c {
                Applied::Damaged { unit: u, amount, .. } if *u == unit => *amount,
                _ => 0,
            })
            .sum()
    }
}
