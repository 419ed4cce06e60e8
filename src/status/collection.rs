//! Status effect instances and the per-unit collection that owns them.
//!
//! The engine only ever *requests* application. Stacking, expiry and tick
//! effects (poison damage, regeneration) belong to the status-tick system
//! that consumes this collection.

use serde::{Deserialize, Serialize};

use crate::core::UnitId;

use super::kind::{MagnitudeKind, StatusKind};

/// Magnitude of a status instance, shaped by its kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StatusMagnitude {
    None,
    Int(i32),
    Float(f32),
}

impl StatusMagnitude {
    /// Shape a raw parameter for `kind`. Ints round half away from zero.
    #[must_use]
    pub fn for_kind(kind: StatusKind, raw: f32) -> Self {
        match kind.magnitude_kind() {
            MagnitudeKind::None => Self::None,
            MagnitudeKind::Int => Self::Int(raw.round() as i32),
            MagnitudeKind::Float => Self::Float(raw),
        }
    }

    /// Magnitude as a float (`0.0` for `None`).
    #[must_use]
    pub fn as_f32(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Int(v) => v as f32,
            Self::Float(v) => v,
        }
    }
}

/// One applied status effect.
///
/// `source` is the id of the unit that applied it; it is a weak reference
/// and may name a unit that has since left the battlefield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    pub kind: StatusKind,
    pub magnitude: StatusMagnitude,
    /// Turns remaining. Always at least 1 when created.
    pub duration: u32,
    pub source: Option<UnitId>,
}

impl StatusEffectInstance {
    /// Create an instance. A zero duration is raised to 1.
    #[must_use]
    pub fn new(kind: StatusKind, raw_magnitude: f32, duration: u32) -> Self {
        Self {
            kind,
            magnitude: StatusMagnitude::for_kind(kind, raw_magnitude),
            duration: duration.max(1),
            source: None,
        }
    }

    /// Set the applying unit (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: UnitId) -> Self {
        self.source = Some(source);
        self
    }

    /// True for harmful kinds.
    #[must_use]
    pub fn is_debuff(&self) -> bool {
        self.kind.is_debuff()
    }
}

/// Status effects carried by one unit, in application order.
///
/// ```
/// use relic_engine::status::{StatusCollection, StatusEffectInstance, StatusKind};
///
/// let mut statuses = StatusCollection::new();
/// statuses.apply(StatusEffectInstance::new(StatusKind::Stun, 0.0, 1));
/// statuses.apply(StatusEffectInstance::new(StatusKind::Haste, 2.0, 3));
///
/// assert_eq!(statuses.active_debuffs().len(), 1);
/// assert_eq!(statuses.active_buffs().len(), 1);
/// assert!(statuses.can_be_knocked_back());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCollection {
    instances: Vec<StatusEffectInstance>,
}

impl StatusCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instance. No stacking rules are applied here.
    pub fn apply(&mut self, instance: StatusEffectInstance) {
        self.instances.push(instance);
    }

    /// Remove the first instance equal to `instance`. Returns whether one was found.
    pub fn remove(&mut self, instance: &StatusEffectInstance) -> bool {
        match self.instances.iter().position(|i| i == instance) {
            Some(idx) => {
                self.instances.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every instance of `kind`, returning how many were removed.
    pub fn remove_kind(&mut self, kind: StatusKind) -> usize {
        let before = self.instances.len();
        self.instances.retain(|i| i.kind != kind);
        before - self.instances.len()
    }

    /// Buffs in application order.
    #[must_use]
    pub fn active_buffs(&self) -> Vec<&StatusEffectInstance> {
        self.instances.iter().filter(|i| !i.is_debuff()).collect()
    }

    /// Debuffs in application order.
    #[must_use]
    pub fn active_debuffs(&self) -> Vec<&StatusEffectInstance> {
        self.instances.iter().filter(|i| i.is_debuff()).collect()
    }

    /// Remove all debuffs, returning how many were removed.
    pub fn clear_debuffs(&mut self) -> usize {
        let before = self.instances.len();
        self.instances.retain(|i| !i.is_debuff());
        before - self.instances.len()
    }

    /// Remove all buffs, returning how many were removed.
    pub fn clear_buffs(&mut self) -> usize {
        let before = self.instances.len();
        self.instances.retain(StatusEffectInstance::is_debuff);
        before - self.instances.len()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// False while a knockback-immunity instance is active.
    #[must_use]
    pub fn can_be_knocked_back(&self) -> bool {
        !self.has(StatusKind::KnockbackImmunity)
    }

    /// True if any instance of `kind` is active.
    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.instances.iter().any(|i| i.kind == kind)
    }

    /// Number of active instances of `kind`.
    #[must_use]
    pub fn count_of(&self, kind: StatusKind) -> usize {
        self.instances.iter().filter(|i| i.kind == kind).count()
    }

    /// Iterate over all instances in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.instances.iter()
    }

    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True when no status is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
