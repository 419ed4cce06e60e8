//! Effect system for relic abilities.
//!
//! - `Recipe` / `EffectStep`: data describing what a relic does
//! - `TargetResolver`: spatial and team queries over live units
//! - `ActionPrimitives`: the atomic mutations steps are built from
//! - `EffectReport`: what an invocation changed and what it skipped
//!
//! ## Design Philosophy
//!
//! Behavior lives in data. The executor walks a recipe, resolves each
//! selector through `TargetResolver` and performs each change through
//! `ActionPrimitives`; no relic has a code path of its own.

mod effect;
mod primitives;
mod report;
mod targeting;

pub use effect::{
    Anchor, AreaEffect, AttackEffect, CardCategory, CellSource, Condition, DamageBonus,
    Destination, EffectStep, EntityKind, Extreme, InteractiveEffect, Lifetime, Magnitude,
    MovementEffect, Payload, Reach, Recipe, ResourceEffect, Selector, Side, Summon,
    SummonEffect, UnitEffect,
};
pub use primitives::{ActionPrimitives, AttackBonus, HazardSpec};
pub use report::{Applied, EffectReport, ReportEntry};
pub(crate) use report::log_error;
pub use targeting::{random_enemy, TargetResolver, TargetSet};
