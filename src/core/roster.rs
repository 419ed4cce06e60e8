//! Unit registry for a battle.
//!
//! Live units are kept in insertion order; that order is the iteration order
//! every spatial query uses, so it is also the tie-break order. Units leave
//! the live set on defeat or surrender and move to `fallen`, where revive
//! effects can still find them.
//!
//! Backed by `im::Vector` so cloning a battle for a preview is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::{Team, Unit, UnitId};

/// Live and fallen units.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    live: Vector<Unit>,
    fallen: Vector<Unit>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit to the end of the live set.
    pub fn push(&mut self, unit: Unit) {
        self.live.push_back(unit);
    }

    fn live_index(&self, id: UnitId) -> Option<usize> {
        self.live.iter().position(|u| u.id == id)
    }

    /// Live unit by id.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.live.iter().find(|u| u.id == id)
    }

    /// Mutable live unit by id.
    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        let idx = self.live_index(id)?;
        self.live.get_mut(idx)
    }

    /// True if `id` is on the battlefield.
    #[must_use]
    pub fn is_live(&self, id: UnitId) -> bool {
        self.live_index(id).is_some()
    }

    /// Live units in insertion order.
    pub fn live(&self) -> impl Iterator<Item = &Unit> {
        self.live.iter()
    }

    /// Live units on `team`.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Unit> {
        self.live.iter().filter(move |u| u.team == team)
    }

    /// Units that left the battlefield, oldest first.
    pub fn fallen(&self) -> impl Iterator<Item = &Unit> {
        self.fallen.iter()
    }

    /// Fallen units on `team`.
    pub fn fallen_allies(&self, team: Team) -> impl Iterator<Item = &Unit> {
        self.fallen.iter().filter(move |u| u.team == team)
    }

    /// Move a unit from the live set to `fallen`.
    ///
    /// The unit's status collection is dropped with it.
    pub fn retire(&mut self, id: UnitId, surrendered: bool) -> Option<Unit> {
        let idx = self.live_index(id)?;
        let mut unit = self.live.remove(idx);
        unit.statuses.clear();
        unit.surrendered = surrendered;
        self.fallen.push_back(unit.clone());
        Some(unit)
    }

    /// Take a unit out of `fallen` so it can be placed again.
    pub fn take_fallen(&mut self, id: UnitId) -> Option<Unit> {
        let idx = self.fallen.iter().position(|u| u.id == id)?;
        Some(self.fallen.remove(idx))
    }

    /// Number of live units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// True when no unit is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Next free id, one past the highest id ever registered.
    #[must_use]
    pub fn next_id(&self) -> UnitId {
        let max = self
            .live
            .iter()
            .chain(self.fallen.iter())
            .map(|u| u.id.0)
            .max();
        UnitId(max.map_or(0, |m| m + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridPos;
    use crate::status::{StatusEffectInstance, StatusKind};

    fn unit(id: u32, team: u8) -> Unit {
        Unit::new(UnitId(id), Team::new(team), GridPos::new(id as i32, 0))
    }

    #[test]
    fn test_insertion_order() {
        let mut roster = Roster::new();
        roster.push(unit(5, 0));
        roster.push(unit(2, 1));
        roster.push(unit(9, 0));

        let ids: Vec<_> = roster.live().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![5, 2, 9]);

        let team0: Vec<_> = roster.team(Team::new(0)).map(|u| u.id.0).collect();
        assert_eq!(team0, vec![5, 9]);
    }

    #[test]
    fn test_retire_drops_statuses() {
        let mut roster = Roster::new();
        let mut u = unit(1, 0);
        u.statuses
            .apply(StatusEffectInstance::new(StatusKind::DamageReduction, 0.3, 2));
        roster.push(u);

        let retired = roster.retire(UnitId(1), true).unwrap();
        assert!(retired.statuses.is_empty());
        assert!(retired.surrendered);
        assert!(!roster.is_live(UnitId(1)));
        assert!(roster.get(UnitId(1)).is_none());

        let fallen: Vec<_> = roster.fallen_allies(Team::new(0)).map(|u| u.id).collect();
        assert_eq!(fallen, vec![UnitId(1)]);
    }

    #[test]
    fn test_take_fallen() {
        let mut roster = Roster::new();
        roster.push(unit(1, 0));
        roster.retire(UnitId(1), false);

        assert!(roster.take_fallen(UnitId(1)).is_some());
        assert!(roster.take_fallen(UnitId(1)).is_none());
        assert_eq!(roster.fallen().count(), 0);
    }

    #[test]
    fn test_get_mut_and_next_id() {
        let mut roster = Roster::new();
        assert_eq!(roster.next_id(), UnitId(0));

        roster.push(unit(3, 0));
        roster.push(unit(7, 1));
        roster.retire(UnitId(7), false);

        roster.get_mut(UnitId(3)).unwrap().hp = 4;
        assert_eq!(roster.get(UnitId(3)).unwrap().hp, 4);
        assert_eq!(roster.next_id(), UnitId(8));
        assert_eq!(roster.len(), 1);
    }
}
