//! Atomic state mutations.
//!
//! `ActionPrimitives` is the only code that changes units, the grid or a
//! collaborator's pools on behalf of an effect. Each primitive validates
//! first and mutates second: an `Err` always means nothing changed.
//!
//! ## Movement
//!
//! - `teleport` has no range limit.
//! - `move_within` refuses destinations farther than its range.
//! - `push` steps along the sign of the delta from the source, so a
//!   diagonal source gives a diagonal shove.
//! - `pull` closes each axis separately and stops short of the source.
//! - Knockback-immune units refuse both.
//!
//! ## Damage
//!
//! `total_damage` combines the calculator's base with the relic bonus:
//! `base + flat` or `round(base * (1 + percent))`, never below zero.

use crate::core::{BattleState, Team, UnitId};
use crate::error::{DestinationFault, EffectError};
use crate::grid::{GridPos, HazardKind};
use crate::services::{DamageCalculator, DeckManager, HazardManager, ResourceManager};
use crate::status::StatusEffectInstance;

use super::effect::CardCategory;
use super::report::Applied;

/// A damage bonus with its numbers already resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttackBonus {
    None,
    Flat(i32),
    /// `0.5` means +50%.
    Percent(f32),
}

/// Hazard parameters handed to the hazard manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HazardSpec {
    pub kind: HazardKind,
    pub cell: GridPos,
    pub amount: i32,
    pub radius: i32,
    pub duration: u32,
}

/// Stateless mutation helpers.
pub struct ActionPrimitives;

impl ActionPrimitives {
    // === Movement ===

    /// Move `unit` to `to` with no range check.
    pub fn teleport(state: &mut BattleState, unit: UnitId, to: GridPos) -> Result<Applied, EffectError> {
        let from = state.relocate(unit, to)?;
        Ok(Applied::Moved { unit, from, to })
    }

    /// Move `unit` to `to` if it is within `range` tiles.
    pub fn move_within(
        state: &mut BattleState,
        unit: UnitId,
        to: GridPos,
        range: i32,
    ) -> Result<Applied, EffectError> {
        let from = state.live_unit(unit)?.pos;
        BattleState::check_range(from, to, range)?;
        Self::teleport(state, unit, to)
    }

    /// Exchange the cells of two units.
    pub fn swap(state: &mut BattleState, first: UnitId, second: UnitId) -> Result<Applied, EffectError> {
        state.swap_units(first, second)?;
        Ok(Applied::Swapped { first, second })
    }

    /// Shove `unit` away from `source` by `tiles`.
    ///
    /// Returns `Ok(None)` when there is nothing to do (zero tiles, or the
    /// source is the unit's own cell).
    pub fn push(
        state: &mut BattleState,
        unit: UnitId,
        source: GridPos,
        tiles: i32,
    ) -> Result<Option<Applied>, EffectError> {
        let target = state.live_unit(unit)?;
        let direction = source.direction_to(target.pos);
        Self::knock(state, unit, direction, tiles)
    }

    /// Drag `unit` toward `source` by `tiles`, stopping short of the source.
    ///
    /// Each axis closes by at most `tiles` and never passes the source's
    /// row or column. A pull that would land on the source backs off one
    /// tile along the longer axis (x on ties).
    pub fn pull(
        state: &mut BattleState,
        unit: UnitId,
        source: GridPos,
        tiles: i32,
    ) -> Result<Option<Applied>, EffectError> {
        let target = state.live_unit(unit)?;
        if !target.statuses.can_be_knocked_back() {
            return Err(EffectError::KnockbackImmune(unit));
        }
        let from = target.pos;
        if tiles <= 0 || from == source {
            return Ok(None);
        }

        let (dx, dy) = (source.x - from.x, source.y - from.y);
        let mut to = GridPos::new(
            from.x + dx.signum() * dx.abs().min(tiles),
            from.y + dy.signum() * dy.abs().min(tiles),
        );
        if to == source {
            if dx.abs() >= dy.abs() {
                to.x -= dx.signum();
            } else {
                to.y -= dy.signum();
            }
        }
        if to == from {
            return Ok(None);
        }
        Self::teleport(state, unit, to).map(Some)
    }

    fn knock(
        state: &mut BattleState,
        unit: UnitId,
        direction: (i32, i32),
        tiles: i32,
    ) -> Result<Option<Applied>, EffectError> {
        let target = state.live_unit(unit)?;
        if !target.statuses.can_be_knocked_back() {
            return Err(EffectError::KnockbackImmune(unit));
        }
        if tiles <= 0 || direction == (0, 0) {
            return Ok(None);
        }
        let to = target.pos.offset(direction, tiles);
        Self::teleport(state, unit, to).map(Some)
    }

    // === Damage and healing ===

    /// Combine base damage with a bonus.
    ///
    /// ```
    /// use relic_engine::effects::{ActionPrimitives, AttackBonus};
    ///
    /// assert_eq!(ActionPrimitives::total_damage(10, AttackBonus::Percent(0.5)), 15);
    /// assert_eq!(ActionPrimitives::total_damage(10, AttackBonus::Flat(3)), 13);
    /// ```
    #[must_use]
    pub fn total_damage(base: i32, bonus: AttackBonus) -> i32 {
        let total = match bonus {
            AttackBonus::None => base,
            AttackBonus::Flat(flat) => base + flat,
            AttackBonus::Percent(pct) => (f64::from(base) * (1.0 + f64::from(pct))).round() as i32,
        };
        total.max(0)
    }

    /// `attacker` hits `victim` for calculator base damage plus `bonus`.
    pub fn attack(
        state: &mut BattleState,
        damage: &dyn DamageCalculator,
        attacker: UnitId,
        victim: UnitId,
        bonus: AttackBonus,
    ) -> Result<Applied, EffectError> {
        let base = damage.base_damage(state.live_unit(attacker)?);
        state.live_unit(victim)?;
        Self::deal_damage(state, victim, Self::total_damage(base, bonus))
    }

    /// Subtract `amount` HP; a unit at zero or below is defeated and removed.
    pub fn deal_damage(state: &mut BattleState, unit: UnitId, amount: i32) -> Result<Applied, EffectError> {
        let amount = amount.max(0);
        let target = state.live_unit_mut(unit)?;
        target.hp -= amount;
        let defeated = target.hp <= 0;
        if defeated {
            state.retire(unit, false);
        }
        Ok(Applied::Damaged {
            unit,
            amount,
            defeated,
        })
    }

    /// Restore up to `amount` HP, capped at max. Reports the HP actually gained.
    pub fn heal(state: &mut BattleState, unit: UnitId, amount: i32) -> Result<Applied, EffectError> {
        let target = state.live_unit_mut(unit)?;
        let before = target.hp;
        target.hp = (target.hp + amount.max(0)).min(target.max_hp);
        Ok(Applied::Healed {
            unit,
            amount: target.hp - before,
        })
    }

    /// Shift morale by `delta` within `0..=max_morale`. Reaching zero surrenders.
    pub fn change_morale(state: &mut BattleState, unit: UnitId, delta: i32) -> Result<Applied, EffectError> {
        let target = state.live_unit_mut(unit)?;
        let before = target.morale;
        target.morale = (target.morale + delta).clamp(0, target.max_morale);
        let applied = target.morale - before;
        let surrendered = target.morale == 0 && delta < 0;
        if surrendered {
            state.retire(unit, true);
        }
        Ok(Applied::MoraleChanged {
            unit,
            delta: applied,
            surrendered,
        })
    }

    /// Shift buzz by `delta` within `0..=max_buzz`.
    pub fn change_buzz(state: &mut BattleState, unit: UnitId, delta: i32) -> Result<Applied, EffectError> {
        let target = state.live_unit_mut(unit)?;
        let before = target.buzz;
        target.buzz = (target.buzz + delta).clamp(0, target.max_buzz);
        Ok(Applied::BuzzChanged {
            unit,
            delta: target.buzz - before,
        })
    }

    // === Statuses ===

    /// Hand `instance` to the unit's status collection.
    pub fn apply_status(
        state: &mut BattleState,
        unit: UnitId,
        instance: StatusEffectInstance,
    ) -> Result<Applied, EffectError> {
        let kind = instance.kind;
        let duration = instance.duration;
        state.live_unit_mut(unit)?.statuses.apply(instance);
        Ok(Applied::StatusApplied {
            unit,
            kind,
            duration,
        })
    }

    /// Remove every debuff.
    pub fn cleanse(state: &mut BattleState, unit: UnitId) -> Result<Applied, EffectError> {
        let count = state.live_unit_mut(unit)?.statuses.clear_debuffs();
        Ok(Applied::StatusesCleared {
            unit,
            debuffs: true,
            count,
        })
    }

    /// Remove every buff.
    pub fn purge(state: &mut BattleState, unit: UnitId) -> Result<Applied, EffectError> {
        let count = state.live_unit_mut(unit)?.statuses.clear_buffs();
        Ok(Applied::StatusesCleared {
            unit,
            debuffs: false,
            count,
        })
    }

    /// Bring back `team`'s most recently fallen unit next to `near`, with
    /// `fraction` of its max HP (at least 1).
    pub fn revive(
        state: &mut BattleState,
        team: Team,
        near: GridPos,
        fraction: f32,
    ) -> Result<Applied, EffectError> {
        let fallen = state
            .roster()
            .fallen_allies(team)
            .last()
            .map(|u| (u.id, u.max_hp))
            .ok_or(EffectError::MissingInput("fallen ally"))?;
        let (unit, max_hp) = fallen;

        let reach = state.grid().width() + state.grid().height();
        let at = state
            .free_cell_near(near, reach)
            .ok_or(EffectError::InvalidDestination {
                pos: near,
                reason: DestinationFault::NoFreeCell,
            })?;
        let hp = ((max_hp as f32) * fraction).round().max(1.0) as i32;

        state.revive(unit, at, hp)?;
        let hp = state.live_unit(unit)?.hp;
        Ok(Applied::Revived { unit, at, hp })
    }

    // === Collaborators ===

    /// Unconditional grog gain.
    pub fn grant_grog(resources: &mut dyn ResourceManager, team: Team, amount: u32) -> Applied {
        resources.add_grog(team, amount);
        Applied::GrogGranted { team, amount }
    }

    /// Guarded grog spend: deducts only if the team can pay.
    pub fn spend_grog(
        resources: &mut dyn ResourceManager,
        team: Team,
        amount: u32,
    ) -> Result<Applied, EffectError> {
        if resources.try_spend_grog(team, amount) {
            Ok(Applied::GrogSpent { team, amount })
        } else {
            Err(EffectError::InsufficientGrog { needed: amount })
        }
    }

    pub fn grant_energy(resources: &mut dyn ResourceManager, team: Team, amount: u32) -> Applied {
        resources.add_energy(team, amount);
        Applied::EnergyGranted { team, amount }
    }

    /// Draw up to `count` cards, stopping at the first failed draw.
    pub fn draw(deck: &mut dyn DeckManager, unit: UnitId, count: u32) -> Applied {
        let drawn = (0..count).take_while(|_| deck.draw_one(unit)).count() as u32;
        Applied::CardsDrawn { unit, count: drawn }
    }

    pub fn draw_by_category(deck: &mut dyn DeckManager, unit: UnitId, category: CardCategory) -> Applied {
        let count = u32::from(deck.draw_by_category(unit, category));
        Applied::CardsDrawn { unit, count }
    }

    /// Discard up to `count` cards. Returns the change and the number discarded.
    pub fn force_discard(deck: &mut dyn DeckManager, unit: UnitId, count: u32) -> (Applied, u32) {
        let discarded = deck.force_discard(unit, count);
        (
            Applied::CardsDiscarded {
                unit,
                count: discarded,
            },
            discarded,
        )
    }

    /// Ask the hazard manager for a hazard and mark its cell.
    pub fn create_hazard(
        state: &mut BattleState,
        hazards: &mut dyn HazardManager,
        spec: HazardSpec,
    ) -> Result<Applied, EffectError> {
        let HazardSpec {
            kind,
            cell,
            amount,
            radius,
            duration,
        } = spec;
        if !state.grid().in_bounds(cell) {
            return Err(EffectError::InvalidDestination {
                pos: cell,
                reason: DestinationFault::OutOfBounds,
            });
        }

        match kind {
            HazardKind::HealingZone => hazards.create_healing_zone(cell, amount, duration),
            HazardKind::Trap => hazards.create_trap(cell, amount, duration),
            HazardKind::SpeedZone => hazards.create_speed_zone(cell, amount, duration),
            HazardKind::PoisonCloud => hazards.create_poison_cloud(cell, amount, radius, duration),
            HazardKind::PoisonTile => hazards.create_poison_tile(cell, amount, duration),
        }
        state.grid_mut().mark_hazard(cell, kind);
        Ok(Applied::HazardCreated { kind, cell })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BattleConfig;
    use crate::services::{FixedDamage, HazardLog, TeamLedger};
    use crate::status::StatusKind;

    fn battle() -> BattleState {
        BattleState::new(BattleConfig::new(8, 8))
    }

    fn spawn(state: &mut BattleState, team: u8, x: i32, y: i32) -> UnitId {
        let unit = state.new_unit(Team::new(team), GridPos::new(x, y));
        state.spawn(unit).unwrap()
    }

    #[test]
    fn test_total_damage() {
        assert_eq!(ActionPrimitives::total_damage(10, AttackBonus::Percent(0.5)), 15);
        assert_eq!(ActionPrimitives::total_damage(10, AttackBonus::Flat(3)), 13);
        assert_eq!(ActionPrimitives::total_damage(10, AttackBonus::None), 10);
        assert_eq!(ActionPrimitives::total_damage(5, AttackBonus::Percent(0.5)), 8);
        assert_eq!(ActionPrimitives::total_damage(2, AttackBonus::Flat(-5)), 0);
    }

    #[test]
    fn test_move_within_rejects_out_of_range() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 0, 0);

        let err = ActionPrimitives::move_within(&mut state, a, GridPos::new(3, 3), 3).unwrap_err();
        assert_eq!(
            err,
            EffectError::InvalidDestination {
                pos: GridPos::new(3, 3),
                reason: DestinationFault::OutOfRange {
                    distance: 6,
                    range: 3
                },
            }
        );
        assert_eq!(state.unit(a).unwrap().pos, GridPos::new(0, 0));

        ActionPrimitives::move_within(&mut state, a, GridPos::new(1, 2), 3).unwrap();
        assert_eq!(state.unit(a).unwrap().pos, GridPos::new(1, 2));
    }

    #[test]
    fn test_push_away_from_source() {
        let mut state = battle();
        spawn(&mut state, 0, 2, 2);
        let b = spawn(&mut state, 1, 3, 2);

        let moved = ActionPrimitives::push(&mut state, b, GridPos::new(2, 2), 2).unwrap();
        assert_eq!(
            moved,
            Some(Applied::Moved {
                unit: b,
                from: GridPos::new(3, 2),
                to: GridPos::new(5, 2)
            })
        );
    }

    #[test]
    fn test_push_immune_unit_stays() {
        let mut state = battle();
        let b = spawn(&mut state, 1, 3, 2);
        state
            .unit_mut(b)
            .unwrap()
            .statuses
            .apply(StatusEffectInstance::new(StatusKind::KnockbackImmunity, 0.0, 2));

        let err = ActionPrimitives::push(&mut state, b, GridPos::new(2, 2), 2).unwrap_err();
        assert_eq!(err, EffectError::KnockbackImmune(b));
        assert_eq!(state.unit(b).unwrap().pos, GridPos::new(3, 2));
        assert_eq!(state.grid().occupant(GridPos::new(3, 2)), Some(b));
    }

    #[test]
    fn test_push_off_grid_is_rejected() {
        let mut state = battle();
        let b = spawn(&mut state, 1, 7, 0);
        let err = ActionPrimitives::push(&mut state, b, GridPos::new(6, 0), 1).unwrap_err();
        assert!(matches!(
            err,
            EffectError::InvalidDestination {
                reason: DestinationFault::OutOfBounds,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_push_and_coincident_source_are_noops() {
        let mut state = battle();
        let b = spawn(&mut state, 1, 3, 3);
        assert_eq!(ActionPrimitives::push(&mut state, b, GridPos::new(2, 3), 0), Ok(None));
        assert_eq!(ActionPrimitives::push(&mut state, b, GridPos::new(3, 3), 2), Ok(None));
    }

    #[test]
    fn test_pull_stops_adjacent() {
        let mut state = battle();
        spawn(&mut state, 0, 0, 0);
        let b = spawn(&mut state, 1, 4, 0);

        ActionPrimitives::pull(&mut state, b, GridPos::new(0, 0), 10).unwrap();
        assert_eq!(state.unit(b).unwrap().pos, GridPos::new(1, 0));
    }

    #[test]
    fn test_pull_off_axis_stays_on_source_side() {
        let mut state = BattleState::new(BattleConfig::new(10, 6));
        let near = spawn(&mut state, 1, 5, 4);
        let far = spawn(&mut state, 1, 7, 5);
        let source = GridPos::new(0, 3);

        ActionPrimitives::pull(&mut state, near, source, 3).unwrap();
        assert_eq!(state.unit(near).unwrap().pos, GridPos::new(2, 3));

        ActionPrimitives::pull(&mut state, far, source, 10).unwrap();
        assert_eq!(state.unit(far).unwrap().pos, GridPos::new(1, 3));
    }

    #[test]
    fn test_pull_backs_off_along_longer_axis() {
        let mut state = battle();
        let b = spawn(&mut state, 1, 2, 6);

        ActionPrimitives::pull(&mut state, b, GridPos::new(1, 1), 8).unwrap();
        assert_eq!(state.unit(b).unwrap().pos, GridPos::new(1, 2));

        let adjacent = ActionPrimitives::pull(&mut state, b, GridPos::new(1, 1), 3).unwrap();
        assert_eq!(adjacent, None);
    }

    #[test]
    fn test_attack_defeats_and_clears_cell() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 0, 0);
        let b = spawn(&mut state, 1, 1, 0);
        state.unit_mut(b).unwrap().hp = 12;

        let calc = FixedDamage::new(10);
        let hit = ActionPrimitives::attack(&mut state, &calc, a, b, AttackBonus::Percent(0.5)).unwrap();
        assert_eq!(
            hit,
            Applied::Damaged {
                unit: b,
                amount: 15,
                defeated: true
            }
        );
        assert!(state.unit(b).is_none());
        assert!(state.grid().can_place(GridPos::new(1, 0)));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 0, 0);
        state.unit_mut(a).unwrap().hp = 17;

        let healed = ActionPrimitives::heal(&mut state, a, 10).unwrap();
        assert_eq!(healed, Applied::Healed { unit: a, amount: 3 });
    }

    #[test]
    fn test_morale_drain_surrenders() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 0, 0);

        let change = ActionPrimitives::change_morale(&mut state, a, -15).unwrap();
        assert_eq!(
            change,
            Applied::MoraleChanged {
                unit: a,
                delta: -10,
                surrendered: true
            }
        );
        assert!(state.unit(a).is_none());
        assert!(state.roster().fallen().any(|u| u.id == a && u.surrendered));
    }

    #[test]
    fn test_buzz_clamped() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 0, 0);
        let change = ActionPrimitives::change_buzz(&mut state, a, 25).unwrap();
        assert_eq!(change, Applied::BuzzChanged { unit: a, delta: 10 });
        assert_eq!(state.unit(a).unwrap().buzz, 10);
    }

    #[test]
    fn test_status_apply_and_removal_with_unit() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 0, 0);
        let dr = StatusEffectInstance::new(StatusKind::DamageReduction, 0.25, 2);

        ActionPrimitives::apply_status(&mut state, a, dr.clone()).unwrap();
        let statuses = &state.unit(a).unwrap().statuses;
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses.iter().next(), Some(&dr));

        let removed = state.retire(a, false).unwrap();
        assert!(removed.statuses.is_empty());
    }

    #[test]
    fn test_cleanse_only_debuffs() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 0, 0);
        for kind in [StatusKind::Stun, StatusKind::Poison, StatusKind::Haste] {
            ActionPrimitives::apply_status(&mut state, a, StatusEffectInstance::new(kind, 1.0, 1)).unwrap();
        }

        let cleared = ActionPrimitives::cleanse(&mut state, a).unwrap();
        assert_eq!(
            cleared,
            Applied::StatusesCleared {
                unit: a,
                debuffs: true,
                count: 2
            }
        );
        assert!(state.unit(a).unwrap().statuses.has(StatusKind::Haste));
    }

    #[test]
    fn test_revive_most_recent_fallen() {
        let mut state = battle();
        let caster = spawn(&mut state, 0, 0, 0);
        let first = spawn(&mut state, 0, 5, 5);
        let second = spawn(&mut state, 0, 6, 6);
        state.retire(first, false);
        state.retire(second, false);

        let revived = ActionPrimitives::revive(&mut state, Team::new(0), GridPos::new(0, 0), 0.5).unwrap();
        assert!(matches!(revived, Applied::Revived { unit, hp: 10, .. } if unit == second));
        let pos = state.unit(second).unwrap().pos;
        assert_eq!(pos.manhattan(state.unit(caster).unwrap().pos), 1);
    }

    #[test]
    fn test_revive_without_fallen() {
        let mut state = battle();
        spawn(&mut state, 0, 0, 0);
        assert_eq!(
            ActionPrimitives::revive(&mut state, Team::new(0), GridPos::new(0, 0), 0.5),
            Err(EffectError::MissingInput("fallen ally"))
        );
    }

    #[test]
    fn test_grog_spend_guarded() {
        let team = Team::new(0);
        let mut ledger = TeamLedger::new(2).with_grog(team, 1);

        assert_eq!(
            ActionPrimitives::spend_grog(&mut ledger, team, 2),
            Err(EffectError::InsufficientGrog { needed: 2 })
        );
        assert_eq!(ledger.grog_tokens(team), 1);

        ActionPrimitives::grant_grog(&mut ledger, team, 1);
        assert!(ActionPrimitives::spend_grog(&mut ledger, team, 2).is_ok());
        assert_eq!(ledger.grog_tokens(team), 0);
    }

    #[test]
    fn test_create_hazard_marks_cell() {
        let mut state = battle();
        let mut log = HazardLog::default();
        let spec = HazardSpec {
            kind: HazardKind::Trap,
            cell: GridPos::new(2, 3),
            amount: 4,
            radius: 0,
            duration: 2,
        };

        ActionPrimitives::create_hazard(&mut state, &mut log, spec).unwrap();
        assert_eq!(log.records.len(), 1);
        assert_eq!(
            state.grid().cell(GridPos::new(2, 3)).and_then(|c| c.hazard),
            Some(HazardKind::Trap)
        );

        let off_grid = HazardSpec {
            cell: GridPos::new(9, 9),
            ..spec
        };
        assert!(ActionPrimitives::create_hazard(&mut state, &mut log, off_grid).is_err());
        assert_eq!(log.records.len(), 1);
    }
}
