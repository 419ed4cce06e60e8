//! Units on the battlefield.
//!
//! ## UnitId
//!
//! Stable identifier for a unit. Ids outlive the unit's presence on the
//! grid: a surrendered unit keeps its id so revive effects can find it.
//!
//! ## Unit
//!
//! Combat stats plus the unit's own `StatusCollection`. Built with a
//! builder so tests and scenario setup only name the stats they care about.
//!
//! ```
//! use relic_engine::core::{Team, Unit, UnitId, WeaponKind};
//! use relic_engine::grid::GridPos;
//!
//! let archer = Unit::new(UnitId(3), Team::new(1), GridPos::new(5, 2))
//!     .with_hp(14)
//!     .with_weapon(WeaponKind::Ranged);
//!
//! assert_eq!(archer.hp, 14);
//! assert_eq!(archer.max_hp, 14);
//! assert!(archer.is_live());
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::Team;
use crate::grid::GridPos;
use crate::status::StatusCollection;

/// Unique identifier for a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Weapon class; selects the damage calculator's melee or ranged branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Melee,
    Ranged,
}

/// Stats that extremal queries can rank units by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum UnitStat {
    Hp,
    Morale,
    Grit,
}

/// A combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub team: Team,
    pub pos: GridPos,

    pub hp: i32,
    pub max_hp: i32,
    pub morale: i32,
    pub max_morale: i32,
    /// Accumulating resource, kept within `0..=max_buzz`.
    pub buzz: i32,
    pub max_buzz: i32,
    pub grit: i32,

    pub weapon: WeaponKind,
    pub captain: bool,
    /// Set when morale ran out. Surrendered units are off the grid.
    pub surrendered: bool,

    pub statuses: StatusCollection,
}

impl Unit {
    /// Create a unit with default stats (20 HP, 10 morale, 10 max buzz, 5 grit).
    #[must_use]
    pub fn new(id: UnitId, team: Team, pos: GridPos) -> Self {
        Self {
            id,
            team,
            pos,
            hp: 20,
            max_hp: 20,
            morale: 10,
            max_morale: 10,
            buzz: 0,
            max_buzz: 10,
            grit: 5,
            weapon: WeaponKind::Melee,
            captain: false,
            surrendered: false,
            statuses: StatusCollection::new(),
        }
    }

    /// Set current and max HP (builder pattern).
    #[must_use]
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self.max_hp = hp;
        self
    }

    /// Set current HP below max (builder pattern).
    #[must_use]
    pub fn with_current_hp(mut self, hp: i32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    /// Set current and max morale (builder pattern).
    #[must_use]
    pub fn with_morale(mut self, morale: i32) -> Self {
        self.morale = morale;
        self.max_morale = morale;
        self
    }

    /// Set current buzz and its cap (builder pattern).
    #[must_use]
    pub fn with_buzz(mut self, buzz: i32, max_buzz: i32) -> Self {
        self.max_buzz = max_buzz.max(0);
        self.buzz = buzz.clamp(0, self.max_buzz);
        self
    }

    /// Set grit (builder pattern).
    #[must_use]
    pub fn with_grit(mut self, grit: i32) -> Self {
        self.grit = grit;
        self
    }

    /// Set weapon class (builder pattern).
    #[must_use]
    pub fn with_weapon(mut self, weapon: WeaponKind) -> Self {
        self.weapon = weapon;
        self
    }

    /// Mark as team captain (builder pattern).
    #[must_use]
    pub fn as_captain(mut self) -> Self {
        self.captain = true;
        self
    }

    /// Alive and not surrendered.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.hp > 0 && !self.surrendered
    }

    /// Value of `stat` for extremal comparisons.
    #[must_use]
    pub fn stat(&self, stat: UnitStat) -> i32 {
        match stat {
            UnitStat::Hp => self.hp,
            UnitStat::Morale => self.morale,
            UnitStat::Grit => self.grit,
        }
    }

    /// Current HP as a fraction of max HP.
    #[must_use]
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }

    /// True if `other` is on the same team and is not this unit.
    #[must_use]
    pub fn is_ally_of(&self, other: &Unit) -> bool {
        self.id != other.id && self.team == other.team
    }

    /// True if `other` is on a different team.
    #[must_use]
    pub fn is_enemy_of(&self, other: &Unit) -> bool {
        self.team != other.team
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: u32, team: u8) -> Unit {
        Unit::new(UnitId(id), Team::new(team), GridPos::new(0, 0))
    }

    #[test]
    fn test_unit_id_display() {
        assert_eq!(UnitId(7).to_string(), "Unit(7)");
        assert_eq!(UnitId::from(3).raw(), 3);
    }

    #[test]
    fn test_defaults() {
        let u = unit(1, 0);
        assert_eq!(u.hp, 20);
        assert_eq!(u.morale, 10);
        assert_eq!(u.buzz, 0);
        assert_eq!(u.weapon, WeaponKind::Melee);
        assert!(!u.captain);
        assert!(u.statuses.is_empty());
    }

    #[test]
    fn test_builder_clamps_buzz() {
        let u = unit(1, 0).with_buzz(15, 8);
        assert_eq!(u.buzz, 8);
        assert_eq!(u.max_buzz, 8);
    }

    #[test]
    fn test_liveness() {
        let mut u = unit(1, 0);
        assert!(u.is_live());

        u.surrendered = true;
        assert!(!u.is_live());

        u.surrendered = false;
        u.hp = 0;
        assert!(!u.is_live());
    }

    #[test]
    fn test_team_relations() {
        let a = unit(1, 0);
        let b = unit(2, 0);
        let c = unit(3, 1);

        assert!(a.is_ally_of(&b));
        assert!(!a.is_ally_of(&a));
        assert!(!a.is_enemy_of(&b));
        assert!(a.is_enemy_of(&c));
    }

    #[test]
    fn test_stat_and_fraction() {
        let u = unit(1, 0).with_hp(40).with_current_hp(10).with_grit(9);
        assert_eq!(u.stat(UnitStat::Hp), 10);
        assert_eq!(u.stat(UnitStat::Grit), 9);
        assert!((u.hp_fraction() - 0.25).abs() < f32::EPSILON);
    }
}
