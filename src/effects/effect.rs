//! The step language relic recipes are written in.
//!
//! A relic's behavior is a `Recipe`: an ordered list of `EffectStep`s that
//! the executor runs front to back. Steps are plain data, so adding a relic
//! is a table entry rather than a new code path.
//!
//! ## Step families
//!
//! - `Movement`: teleport, bounded step, push, pull, swap
//! - `Attack`: caster attacks selected units with an optional bonus
//! - `Unit` / `Area`: apply a `Payload` to selected units
//! - `Resource`: grog, energy and card flow
//! - `Summon`: hazard or entity creation requests
//! - `Interactive`: suspend for a player choice, then continue
//! - `Conditional`: branch on caster/target state
//! - `Unimplemented`: placeholder that reports `NotImplemented`
//!
//! Numeric parameters are never literals in the step itself unless fixed by
//! the relic's design; they reference the relic's definition through
//! `Magnitude`, `Reach` and `Lifetime` so balancing data can change them.

use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::core::UnitStat;
use crate::relics::RelicDefinition;
use crate::selection::SelectionKind;
use crate::status::StatusKind;

/// A numeric parameter, resolved against the relic definition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Magnitude {
    Value1,
    Value2,
    /// The definition's tile range.
    Range,
    Fixed(f32),
}

impl Magnitude {
    /// Resolve to a float.
    #[must_use]
    pub fn resolve(self, def: &RelicDefinition) -> f32 {
        match self {
            Self::Value1 => def.value1,
            Self::Value2 => def.value2,
            Self::Range => def.tile_range as f32,
            Self::Fixed(v) => v,
        }
    }

    /// Resolve and round half away from zero.
    #[must_use]
    pub fn resolve_i32(self, def: &RelicDefinition) -> i32 {
        self.resolve(def).round() as i32
    }

    /// Resolve as a non-negative count.
    #[must_use]
    pub fn resolve_count(self, def: &RelicDefinition) -> u32 {
        self.resolve_i32(def).max(0) as u32
    }
}

/// How long an applied status lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Lifetime {
    /// The definition's duration.
    Definition,
    Turns(u32),
}

impl Lifetime {
    #[must_use]
    pub fn resolve(self, def: &RelicDefinition) -> u32 {
        match self {
            Self::Definition => def.duration,
            Self::Turns(n) => n,
        }
    }
}

/// Manhattan radius of a spatial query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Reach {
    /// The definition's tile range.
    TileRange,
    Tiles(i32),
}

impl Reach {
    #[must_use]
    pub fn resolve(self, def: &RelicDefinition) -> i32 {
        match self {
            Self::TileRange => def.tile_range,
            Self::Tiles(n) => n,
        }
    }
}

/// Reference point of a spatial query or movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Anchor {
    Caster,
    Target,
    ChosenAlly,
    /// The chosen cell if a selection supplied one, else the input cell.
    Cell,
}

/// Which units a query considers, relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum Side {
    /// Caster's team, excluding the caster.
    Allies,
    /// Caster's team, including the caster.
    AlliesAndCaster,
    Enemies,
    Everyone,
}

/// Highest or lowest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Extreme {
    Highest,
    Lowest,
}

/// Picks the units a step applies to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Selector {
    Caster,
    Target,
    ChosenAlly,
    /// Units of `side` within `reach` of `anchor`, the anchor unit excluded.
    Within { side: Side, anchor: Anchor, reach: Reach },
    /// Every live unit of `side`.
    Team(Side),
    /// Units of `side` sharing the anchor's row.
    Row { side: Side, anchor: Anchor },
    /// Units of `side` sharing the anchor's column.
    Column { side: Side, anchor: Anchor },
    /// The unit of `side` with the highest or lowest `stat`.
    Extremal { side: Side, stat: UnitStat, pick: Extreme },
    EnemyCaptain,
    RandomEnemy,
}

/// What happens to each selected unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Payload {
    Status {
        kind: StatusKind,
        magnitude: Magnitude,
        lifetime: Lifetime,
    },
    Heal(Magnitude),
    /// Damage that bypasses the damage calculator.
    TrueDamage(Magnitude),
    RestoreMorale(Magnitude),
    DrainMorale(Magnitude),
    GainBuzz(Magnitude),
    DrainBuzz(Magnitude),
    CleanseDebuffs,
    PurgeBuffs,
}

/// Where a moved unit ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Destination {
    /// The chosen cell if a selection supplied one, else the input cell.
    Cell,
    /// Free neighbour of the anchor closest to the mover.
    AdjacentTo(Anchor),
    /// The cell directly beyond the target, seen from the caster.
    BehindTarget,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum MovementEffect {
    /// Unbounded relocation.
    Teleport { who: Selector, to: Destination },
    /// Relocation limited to `reach` tiles from the mover.
    Step { who: Selector, to: Destination, reach: Reach },
    /// Move away from `from` by `tiles`.
    Push { who: Selector, from: Anchor, tiles: Magnitude },
    /// Move toward `toward` by `tiles`.
    Pull { who: Selector, toward: Anchor, tiles: Magnitude },
    Swap { first: Selector, second: Selector },
}

/// Bonus added on top of the calculator's base damage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum DamageBonus {
    None,
    Flat(Magnitude),
    /// `0.5` means +50%.
    Percent(Magnitude),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AttackEffect {
    pub victims: Selector,
    pub bonus: DamageBonus,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct UnitEffect {
    pub who: Selector,
    pub payload: Payload,
}

/// Payload applied to `side` within `reach` of `anchor`, anchor included.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AreaEffect {
    pub anchor: Anchor,
    pub reach: Reach,
    pub side: Side,
    pub payload: Payload,
}

/// Card categories a deck can filter draws by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum CardCategory {
    Attack,
    Move,
    Skill,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ResourceEffect {
    GrantGrog(Magnitude),
    GrantEnergy(Magnitude),
    /// Atomic check-and-deduct; `then` runs on success, `otherwise` on failure.
    SpendGrog {
        amount: Magnitude,
        then: Vec<EffectStep>,
        otherwise: Vec<EffectStep>,
    },
    Draw(Magnitude),
    DrawByCategory(CardCategory),
    /// Discard up to `count` cards, granting `grog_per_card` per discarded card.
    ForceDiscard { count: Magnitude, grog_per_card: Magnitude },
}

/// Entities a summon may request. None have behavior yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize)]
pub enum EntityKind {
    WardingIdol,
    WarBanner,
    Decoy,
    Golem,
    Effigy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Summon {
    HealingZone,
    Trap,
    SpeedZone,
    PoisonCloud,
    PoisonTile,
    Entity(EntityKind),
}

/// Where a summon is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CellSource {
    /// The chosen cell if a selection supplied one, else the input cell.
    Cell,
    CasterCell,
    TargetCell,
    /// Nearest placeable cell within `reach` of `anchor`.
    EmptyAround { anchor: Anchor, reach: Reach },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SummonEffect {
    pub what: Summon,
    pub at: CellSource,
}

/// Suspend for a player choice, then run `then`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractiveEffect {
    pub kind: SelectionKind,
    pub prompt: &'static str,
    pub then: Vec<EffectStep>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Condition {
    CasterIsCaptain,
    /// No other ally beats the caster on `stat` (ties count).
    CasterIsExtremal { stat: UnitStat, pick: Extreme },
    /// Caster HP fraction strictly below the magnitude.
    CasterHpBelow(Magnitude),
    /// Target HP fraction strictly below the magnitude.
    TargetHpBelow(Magnitude),
}

/// One step of a recipe.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum EffectStep {
    Movement(MovementEffect),
    Attack(AttackEffect),
    Unit(UnitEffect),
    Area(AreaEffect),
    Resource(ResourceEffect),
    Summon(SummonEffect),
    Interactive(InteractiveEffect),
    Conditional {
        condition: Condition,
        then: Vec<EffectStep>,
        otherwise: Vec<EffectStep>,
    },
    /// Bring back the most recently fallen ally with `fraction` of max HP.
    Revive { fraction: Magnitude },
    Unimplemented(&'static str),
}

impl EffectStep {
    /// Short family name for diagnostics.
    #[must_use]
    pub fn family(&self) -> &'static str {
        match self {
            Self::Movement(_) => "movement",
            Self::Attack(_) => "attack",
            Self::Unit(_) => "unit",
            Self::Area(_) => "area",
            Self::Resource(_) => "resource",
            Self::Summon(_) => "summon",
            Self::Interactive(_) => "interactive",
            Self::Conditional { .. } => "conditional",
            Self::Revive { .. } => "revive",
            Self::Unimplemented(_) => "unimplemented",
        }
    }

    /// Nested step lists (branches and continuations).
    fn children(&self) -> Vec<&[EffectStep]> {
        match self {
            Self::Resource(ResourceEffect::SpendGrog {
                then, otherwise, ..
            })
            | Self::Conditional {
                then, otherwise, ..
            } => vec![then.as_slice(), otherwise.as_slice()],
            Self::Interactive(i) => vec![i.then.as_slice()],
            _ => Vec::new(),
        }
    }

    /// True if this step or any nested step satisfies `pred`.
    pub fn any(&self, pred: &impl Fn(&EffectStep) -> bool) -> bool {
        pred(self) || self.children().iter().any(|c| c.iter().any(|s| s.any(pred)))
    }
}

/// Ordered behavior of one relic.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Recipe {
    /// Abort the whole effect when no target resolves.
    pub requires_target: bool,
    pub steps: Vec<EffectStep>,
}

impl Recipe {
    /// Recipe that runs without a target.
    #[must_use]
    pub fn new(steps: Vec<EffectStep>) -> Self {
        Self {
            requires_target: false,
            steps,
        }
    }

    /// Recipe that aborts without a target.
    #[must_use]
    pub fn targeted(steps: Vec<EffectStep>) -> Self {
        Self {
            requires_target: true,
            steps,
        }
    }

    /// True if any step (at any depth) suspends for a selection.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.steps
            .iter()
            .any(|s| s.any(&|s: &EffectStep| matches!(s, EffectStep::Interactive(_))))
    }

    /// True if any step (at any depth) is a placeholder.
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.steps.iter().any(|s| {
            s.any(&|s: &EffectStep| {
                matches!(
                    s,
                    EffectStep::Unimplemented(_)
                        | EffectStep::Summon(SummonEffect {
                            what: Summon::Entity(_),
                            ..
                        })
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relics::{RelicDefinition, RelicId};

    fn def() -> RelicDefinition {
        RelicDefinition::new(RelicId::GlovesPowerStrike)
            .with_values(0.5, 2.6)
            .with_duration(3)
            .with_tile_range(4)
    }

    #[test]
    fn test_magnitude_resolution() {
        let def = def();
        assert_eq!(Magnitude::Value1.resolve(&def), 0.5);
        assert_eq!(Magnitude::Value2.resolve_i32(&def), 3);
        assert_eq!(Magnitude::Range.resolve(&def), 4.0);
        assert_eq!(Magnitude::Fixed(-2.0).resolve_count(&def), 0);
    }

    #[test]
    fn test_lifetime_and_reach() {
        let def = def();
        assert_eq!(Lifetime::Definition.resolve(&def), 3);
        assert_eq!(Lifetime::Turns(1).resolve(&def), 1);
        assert_eq!(Reach::TileRange.resolve(&def), 4);
        assert_eq!(Reach::Tiles(1).resolve(&def), 1);
    }

    #[test]
    fn test_nested_interactive_detected() {
        let recipe = Recipe::new(vec![EffectStep::Conditional {
            condition: Condition::CasterIsCaptain,
            then: vec![EffectStep::Interactive(InteractiveEffect {
                kind: SelectionKind::Ally,
                prompt: "Pick",
                then: Vec::new(),
            })],
            otherwise: Vec::new(),
        }]);

        assert!(recipe.is_interactive());
        assert!(!recipe.has_placeholder());
        assert!(!recipe.requires_target);
    }

    #[test]
    fn test_entity_summon_is_placeholder() {
        let recipe = Recipe::new(vec![EffectStep::Summon(SummonEffect {
            what: Summon::Entity(EntityKind::Golem),
            at: CellSource::CasterCell,
        })]);
        assert!(recipe.has_placeholder());
        assert_eq!(recipe.steps[0].family(), "summon");
    }
}
