//! In-memory reference collaborators.
//!
//! Small, deterministic implementations of the service traits. Games with
//! their own economy or deck plug in their own types; these cover scenario
//! setup, tooling and tests.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Team, TeamMap, Unit, UnitId};
use crate::effects::CardCategory;
use crate::grid::{GridPos, HazardKind};
use crate::selection::SelectionRequest;

use super::{DamageCalculator, DeckManager, HazardManager, ResourceManager, SelectionPrompter};

/// Base damage from grit: `melee_base + grit` or `ranged_base + grit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDamage {
    pub melee_base: i32,
    pub ranged_base: i32,
}

impl Default for StatDamage {
    fn default() -> Self {
        Self {
            melee_base: 4,
            ranged_base: 2,
        }
    }
}

impl DamageCalculator for StatDamage {
    fn melee_base_damage(&self, attacker: &Unit) -> i32 {
        (self.melee_base + attacker.grit).max(0)
    }

    fn ranged_base_damage(&self, attacker: &Unit) -> i32 {
        (self.ranged_base + attacker.grit).max(0)
    }
}

/// Constant base damage regardless of stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDamage {
    pub melee: i32,
    pub ranged: i32,
}

impl FixedDamage {
    /// Same base for both weapons.
    #[must_use]
    pub fn new(base: i32) -> Self {
        Self::split(base, base)
    }

    #[must_use]
    pub fn split(melee: i32, ranged: i32) -> Self {
        Self { melee, ranged }
    }
}

impl DamageCalculator for FixedDamage {
    fn melee_base_damage(&self, _attacker: &Unit) -> i32 {
        self.melee
    }

    fn ranged_base_damage(&self, _attacker: &Unit) -> i32 {
        self.ranged
    }
}

/// Grog and energy per team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLedger {
    grog: TeamMap<u32>,
    energy: TeamMap<u32>,
}

impl TeamLedger {
    /// Empty ledger for `team_count` teams.
    #[must_use]
    pub fn new(team_count: usize) -> Self {
        Self {
            grog: TeamMap::with_value(team_count, 0),
            energy: TeamMap::with_value(team_count, 0),
        }
    }

    /// Start `team` with `grog` tokens (builder pattern).
    #[must_use]
    pub fn with_grog(mut self, team: Team, grog: u32) -> Self {
        if let Some(pool) = self.grog.get_mut(team) {
            *pool = grog;
        }
        self
    }

    /// Energy granted to `team` so far.
    #[must_use]
    pub fn energy(&self, team: Team) -> u32 {
        self.energy.get(team).copied().unwrap_or(0)
    }
}

impl ResourceManager for TeamLedger {
    fn add_grog(&mut self, team: Team, amount: u32) {
        if let Some(pool) = self.grog.get_mut(team) {
            *pool = pool.saturating_add(amount);
        }
    }

    fn try_spend_grog(&mut self, team: Team, amount: u32) -> bool {
        match self.grog.get_mut(team) {
            Some(pool) if *pool >= amount => {
                *pool -= amount;
                true
            }
            _ => false,
        }
    }

    fn grog_tokens(&self, team: Team) -> u32 {
        self.grog.get(team).copied().unwrap_or(0)
    }

    fn add_energy(&mut self, team: Team, amount: u32) {
        if let Some(pool) = self.energy.get_mut(team) {
            *pool = pool.saturating_add(amount);
        }
    }
}

/// Deck that only counts cards: a shared library and per-unit hands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckCounter {
    library: u32,
    hands: FxHashMap<UnitId, u32>,
    category_draws: Vec<(UnitId, CardCategory)>,
}

impl DeckCounter {
    /// Deck with `library` undrawn cards.
    #[must_use]
    pub fn new(library: u32) -> Self {
        Self {
            library,
            ..Self::default()
        }
    }

    /// Give `unit` a starting hand (builder pattern).
    #[must_use]
    pub fn with_hand(mut self, unit: UnitId, cards: u32) -> Self {
        self.hands.insert(unit, cards);
        self
    }

    /// Cards left to draw.
    #[must_use]
    pub fn library(&self) -> u32 {
        self.library
    }

    /// Cards in `unit`'s hand.
    #[must_use]
    pub fn hand_size(&self, unit: UnitId) -> u32 {
        self.hands.get(&unit).copied().unwrap_or(0)
    }

    /// Category draws in order.
    #[must_use]
    pub fn category_draws(&self) -> &[(UnitId, CardCategory)] {
        &self.category_draws
    }
}

impl DeckManager for DeckCounter {
    fn draw_one(&mut self, unit: UnitId) -> bool {
        if self.library == 0 {
            return false;
        }
        self.library -= 1;
        *self.hands.entry(unit).or_insert(0) += 1;
        true
    }

    fn draw_by_category(&mut self, unit: UnitId, category: CardCategory) -> bool {
        if !self.draw_one(unit) {
            return false;
        }
        self.category_draws.push((unit, category));
        true
    }

    fn force_discard(&mut self, unit: UnitId, count: u32) -> u32 {
        let hand = self.hands.entry(unit).or_insert(0);
        let discarded = count.min(*hand);
        *hand -= discarded;
        discarded
    }
}

/// One hazard creation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardRecord {
    pub kind: HazardKind,
    pub cell: GridPos,
    /// Heal, damage or speed bonus depending on `kind`.
    pub amount: i32,
    pub radius: i32,
    pub duration: u32,
}

/// Hazard manager that records requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HazardLog {
    pub records: Vec<HazardRecord>,
}

impl HazardLog {
    fn record(&mut self, kind: HazardKind, cell: GridPos, amount: i32, radius: i32, duration: u32) {
        self.records.push(HazardRecord {
            kind,
            cell,
            amount,
            radius,
            duration,
        });
    }
}

impl HazardManager for HazardLog {
    fn create_healing_zone(&mut self, cell: GridPos, amount: i32, duration: u32) {
        self.record(HazardKind::HealingZone, cell, amount, 0, duration);
    }

    fn create_trap(&mut self, cell: GridPos, damage: i32, duration: u32) {
        self.record(HazardKind::Trap, cell, damage, 0, duration);
    }

    fn create_speed_zone(&mut self, cell: GridPos, bonus: i32, duration: u32) {
        self.record(HazardKind::SpeedZone, cell, bonus, 0, duration);
    }

    fn create_poison_cloud(&mut self, cell: GridPos, damage: i32, radius: i32, duration: u32) {
        self.record(HazardKind::PoisonCloud, cell, damage, radius, duration);
    }

    fn create_poison_tile(&mut self, cell: GridPos, damage: i32, duration: u32) {
        self.record(HazardKind::PoisonTile, cell, damage, 0, duration);
    }
}

/// Prompter that records every request it is shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptLog {
    pub shown: Vec<SelectionRequest>,
}

impl SelectionPrompter for PromptLog {
    fn present(&mut self, request: &SelectionRequest) {
        self.shown.push(request.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WeaponKind;

    #[test]
    fn test_stat_damage_uses_grit() {
        let calc = StatDamage::default();
        let unit = Unit::new(UnitId(0), Team::new(0), GridPos::new(0, 0)).with_grit(6);
        assert_eq!(calc.base_damage(&unit), 10);
        assert_eq!(calc.base_damage(&unit.with_weapon(WeaponKind::Ranged)), 8);
    }

    #[test]
    fn test_grog_spend_is_guarded() {
        let team = Team::new(1);
        let mut ledger = TeamLedger::new(2).with_grog(team, 3);

        assert!(!ledger.try_spend_grog(team, 4));
        assert_eq!(ledger.grog_tokens(team), 3);

        assert!(ledger.try_spend_grog(team, 3));
        assert_eq!(ledger.grog_tokens(team), 0);
    }

    #[test]
    fn test_unknown_team_is_ignored() {
        let mut ledger = TeamLedger::new(2);
        ledger.add_grog(Team::new(5), 2);
        ledger.add_energy(Team::new(5), 2);
        assert_eq!(ledger.grog_tokens(Team::new(5)), 0);
        assert!(!ledger.try_spend_grog(Team::new(5), 0));
    }

    #[test]
    fn test_deck_counter_draws_and_discards() {
        let unit = UnitId(3);
        let mut deck = DeckCounter::new(2).with_hand(unit, 1);

        assert!(deck.draw_one(unit));
        assert!(deck.draw_by_category(unit, CardCategory::Skill));
        assert!(!deck.draw_one(unit));
        assert_eq!(deck.hand_size(unit), 3);
        assert_eq!(deck.category_draws(), &[(unit, CardCategory::Skill)]);

        assert_eq!(deck.force_discard(unit, 5), 3);
        assert_eq!(deck.hand_size(unit), 0);
    }

    #[test]
    fn test_hazard_log_records() {
        let mut log = HazardLog::default();
        log.create_poison_cloud(GridPos::new(2, 2), 2, 1, 3);
        assert_eq!(
            log.records,
            vec![HazardRecord {
                kind: HazardKind::PoisonCloud,
                cell: GridPos::new(2, 2),
                amount: 2,
                radius: 1,
                duration: 3,
            }]
        );
    }
}
