//! Spatial and team queries over live units.
//!
//! `TargetResolver` borrows a `BattleState` and answers the questions
//! effects ask: who is the nearest enemy, which allies are in range, who
//! shares a row, who has the lowest HP.
//!
//! ## Rules
//!
//! - Only live units are considered (surrendered and defeated are gone).
//! - Team is the only discriminator: same team and not the caster is an
//!   ally, different team is an enemy.
//! - Distance is Manhattan. Row and column queries compare the orthogonal
//!   coordinate only.
//! - Nearest-enemy ties go to the first unit in roster order.
//! - Extremal-stat ties go to the last unit in roster order (`>=` / `<=`).

use smallvec::SmallVec;

use crate::core::{BattleState, Unit, UnitId, UnitStat};
use crate::grid::GridPos;

use super::effect::{Extreme, Side};

/// A small set of unit ids in roster order.
pub type TargetSet = SmallVec<[UnitId; 8]>;

/// Read-only query view over a battle.
#[derive(Clone, Copy, Debug)]
pub struct TargetResolver<'a> {
    state: &'a BattleState,
}

impl<'a> TargetResolver<'a> {
    /// Create a resolver over `state`.
    #[must_use]
    pub fn new(state: &'a BattleState) -> Self {
        Self { state }
    }

    fn caster(&self, caster: UnitId) -> Option<&'a Unit> {
        self.state.unit(caster)
    }

    /// True if `unit` belongs to `side` as seen from `caster`.
    #[must_use]
    pub fn on_side(caster: &Unit, unit: &Unit, side: Side) -> bool {
        match side {
            Side::Allies => caster.is_ally_of(unit),
            Side::AlliesAndCaster => caster.team == unit.team,
            Side::Enemies => caster.is_enemy_of(unit),
            Side::Everyone => true,
        }
    }

    fn members(&self, caster: UnitId, side: Side) -> impl Iterator<Item = &'a Unit> + 'a {
        let caster = self.caster(caster);
        self.state
            .units()
            .filter(move |u| caster.is_some_and(|c| Self::on_side(c, u, side)))
    }

    /// Every live unit of `side`.
    #[must_use]
    pub fn team(&self, caster: UnitId, side: Side) -> TargetSet {
        self.members(caster, side).map(|u| u.id).collect()
    }

    /// Nearest live enemy by Manhattan distance; first in roster order on ties.
    #[must_use]
    pub fn nearest_enemy(&self, caster: UnitId) -> Option<UnitId> {
        let origin = self.caster(caster)?.pos;
        let mut best: Option<(i32, UnitId)> = None;
        for enemy in self.members(caster, Side::Enemies) {
            let distance = origin.manhattan(enemy.pos);
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, enemy.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Units of `side` within `range` of `center`, excluding `exclude`.
    #[must_use]
    pub fn within(
        &self,
        caster: UnitId,
        side: Side,
        center: GridPos,
        range: i32,
        exclude: Option<UnitId>,
    ) -> TargetSet {
        self.members(caster, side)
            .filter(|u| Some(u.id) != exclude && u.pos.manhattan(center) <= range)
            .map(|u| u.id)
            .collect()
    }

    /// Allies within `range` of the caster, the caster excluded.
    #[must_use]
    pub fn allies_in_range(&self, caster: UnitId, range: i32) -> TargetSet {
        match self.caster(caster) {
            Some(c) => self.within(caster, Side::Allies, c.pos, range, Some(caster)),
            None => TargetSet::new(),
        }
    }

    /// Enemies within `range` of the caster.
    #[must_use]
    pub fn enemies_in_range(&self, caster: UnitId, range: i32) -> TargetSet {
        match self.caster(caster) {
            Some(c) => self.within(caster, Side::Enemies, c.pos, range, None),
            None => TargetSet::new(),
        }
    }

    /// Units of `side` on the row of `of`.
    #[must_use]
    pub fn in_row(&self, caster: UnitId, side: Side, of: GridPos) -> TargetSet {
        self.members(caster, side)
            .filter(|u| u.pos.same_row(of))
            .map(|u| u.id)
            .collect()
    }

    /// Units of `side` on the column of `of`.
    #[must_use]
    pub fn in_column(&self, caster: UnitId, side: Side, of: GridPos) -> TargetSet {
        self.members(caster, side)
            .filter(|u| u.pos.same_column(of))
            .map(|u| u.id)
            .collect()
    }

    /// Unit of `side` with the highest or lowest `stat`; last wins ties.
    #[must_use]
    pub fn extremal(
        &self,
        caster: UnitId,
        side: Side,
        stat: UnitStat,
        pick: Extreme,
    ) -> Option<UnitId> {
        let mut best: Option<(i32, UnitId)> = None;
        for unit in self.members(caster, side) {
            let value = unit.stat(stat);
            let better = match (best, pick) {
                (None, _) => true,
                (Some((b, _)), Extreme::Highest) => value >= b,
                (Some((b, _)), Extreme::Lowest) => value <= b,
            };
            if better {
                best = Some((value, unit.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// True if no other ally strictly beats the caster on `stat`.
    #[must_use]
    pub fn is_extremal(&self, caster: UnitId, stat: UnitStat, pick: Extreme) -> bool {
        let Some(me) = self.caster(caster) else {
            return false;
        };
        let mine = me.stat(stat);
        self.members(caster, Side::Allies).all(|ally| match pick {
            Extreme::Highest => ally.stat(stat) <= mine,
            Extreme::Lowest => ally.stat(stat) >= mine,
        })
    }

    /// True if no other ally has strictly greater HP.
    #[must_use]
    pub fn is_highest_hp(&self, caster: UnitId) -> bool {
        self.is_extremal(caster, UnitStat::Hp, Extreme::Highest)
    }

    /// First live enemy captain in roster order.
    #[must_use]
    pub fn enemy_captain(&self, caster: UnitId) -> Option<UnitId> {
        self.members(caster, Side::Enemies)
            .find(|u| u.captain)
            .map(|u| u.id)
    }

    /// Free neighbour of `of` closest to `mover`; neighbour order breaks ties.
    #[must_use]
    pub fn free_neighbor(&self, of: GridPos, mover: GridPos) -> Option<GridPos> {
        of.neighbors()
            .into_iter()
            .filter(|p| self.state.grid().can_place(*p))
            .min_by_key(|p| p.manhattan(mover))
    }
}

/// A uniformly random live enemy, drawn from the battle RNG.
pub fn random_enemy(state: &mut BattleState, caster: UnitId) -> Option<UnitId> {
    let enemies = TargetResolver::new(state).team(caster, Side::Enemies);
    state.rng_mut().pick(&enemies).copied()
}
