//! Collaborators the engine calls but does not implement.
//!
//! The dispatcher holds one `Services` bundle, passed in at construction.
//! Damage and resources are always present; deck, hazards and the selection
//! prompter are optional, and an absent one turns the affected step into a
//! `CollaboratorUnavailable` diagnostic instead of a fault.
//!
//! ## Sharing with the caller
//!
//! Every mutable collaborator trait is implemented for `Rc<RefCell<T>>`, so
//! a caller can keep a handle to the same ledger or deck it gave the engine.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use relic_engine::core::Team;
//! use relic_engine::services::{ResourceManager, Services, StatDamage, TeamLedger};
//!
//! let ledger = Rc::new(RefCell::new(TeamLedger::new(2)));
//! let mut services = Services::new(StatDamage::default(), Rc::clone(&ledger));
//!
//! services.resources.add_grog(Team::new(0), 3);
//! assert_eq!(ledger.borrow().grog_tokens(Team::new(0)), 3);
//! ```

mod memory;

pub use memory::{DeckCounter, FixedDamage, HazardLog, HazardRecord, PromptLog, StatDamage, TeamLedger};

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Team, Unit, UnitId, WeaponKind};
use crate::effects::CardCategory;
use crate::grid::GridPos;
use crate::selection::SelectionRequest;

/// Base damage before relic bonuses. Pure function of the attacker.
pub trait DamageCalculator {
    fn melee_base_damage(&self, attacker: &Unit) -> i32;

    fn ranged_base_damage(&self, attacker: &Unit) -> i32;

    /// Branch on the attacker's weapon.
    fn base_damage(&self, attacker: &Unit) -> i32 {
        match attacker.weapon {
            WeaponKind::Melee => self.melee_base_damage(attacker),
            WeaponKind::Ranged => self.ranged_base_damage(attacker),
        }
    }
}

/// Team economy: grog tokens and energy.
pub trait ResourceManager {
    fn add_grog(&mut self, team: Team, amount: u32);

    /// Deduct `amount` only if the team has it. Returns whether it did.
    fn try_spend_grog(&mut self, team: Team, amount: u32) -> bool;

    fn grog_tokens(&self, team: Team) -> u32;

    fn add_energy(&mut self, team: Team, amount: u32);
}

/// Card flow for the unit's owner.
pub trait DeckManager {
    /// Draw one card. Returns false when nothing could be drawn.
    fn draw_one(&mut self, unit: UnitId) -> bool;

    /// Draw one card of `category`. Returns false when none was found.
    fn draw_by_category(&mut self, unit: UnitId, category: CardCategory) -> bool;

    /// Discard up to `count` cards, returning how many were discarded.
    fn force_discard(&mut self, unit: UnitId, count: u32) -> u32;
}

/// Tile-based persistent effects.
pub trait HazardManager {
    fn create_healing_zone(&mut self, cell: GridPos, amount: i32, duration: u32);

    fn create_trap(&mut self, cell: GridPos, damage: i32, duration: u32);

    fn create_speed_zone(&mut self, cell: GridPos, bonus: i32, duration: u32);

    fn create_poison_cloud(&mut self, cell: GridPos, damage: i32, radius: i32, duration: u32);

    fn create_poison_tile(&mut self, cell: GridPos, damage: i32, duration: u32);
}

/// Shows a selection prompt to the player. Answers come back through
/// `EffectDispatcher::resolve_selection` / `cancel_selection`.
pub trait SelectionPrompter {
    fn present(&mut self, request: &SelectionRequest);
}

/// The collaborator bundle handed to the dispatcher.
pub struct Services {
    pub damage: Box<dyn DamageCalculator>,
    pub resources: Box<dyn ResourceManager>,
    pub deck: Option<Box<dyn DeckManager>>,
    pub hazards: Option<Box<dyn HazardManager>>,
    pub prompter: Option<Box<dyn SelectionPrompter>>,
}

impl Services {
    /// Bundle with the required collaborators only.
    pub fn new(
        damage: impl DamageCalculator + 'static,
        resources: impl ResourceManager + 'static,
    ) -> Self {
        Self {
            damage: Box::new(damage),
            resources: Box::new(resources),
            deck: None,
            hazards: None,
            prompter: None,
        }
    }

    /// Add a deck manager (builder pattern).
    #[must_use]
    pub fn with_deck(mut self, deck: impl DeckManager + 'static) -> Self {
        self.deck = Some(Box::new(deck));
        self
    }

    /// Add a hazard manager (builder pattern).
    #[must_use]
    pub fn with_hazards(mut self, hazards: impl HazardManager + 'static) -> Self {
        self.hazards = Some(Box::new(hazards));
        self
    }

    /// Add a selection prompter (builder pattern).
    #[must_use]
    pub fn with_prompter(mut self, prompter: impl SelectionPrompter + 'static) -> Self {
        self.prompter = Some(Box::new(prompter));
        self
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("deck", &self.deck.is_some())
            .field("hazards", &self.hazards.is_some())
            .field("prompter", &self.prompter.is_some())
            .finish_non_exhaustive()
    }
}

// === Shared handles ===

impl<T: DamageCalculator + ?Sized> DamageCalculator for Rc<T> {
    fn melee_base_damage(&self, attacker: &Unit) -> i32 {
        (**self).melee_base_damage(attacker)
    }

    fn ranged_base_damage(&self, attacker: &Unit) -> i32 {
        (**self).ranged_base_damage(attacker)
    }
}

impl<T: ResourceManager + ?Sized> ResourceManager for Rc<RefCell<T>> {
    fn add_grog(&mut self, team: Team, amount: u32) {
        self.borrow_mut().add_grog(team, amount);
    }

    fn try_spend_grog(&mut self, team: Team, amount: u32) -> bool {
        self.borrow_mut().try_spend_grog(team, amount)
    }

    fn grog_tokens(&self, team: Team) -> u32 {
        self.borrow().grog_tokens(team)
    }

    fn add_energy(&mut self, team: Team, amount: u32) {
        self.borrow_mut().add_energy(team, amount);
    }
}

impl<T: DeckManager + ?Sized> DeckManager for Rc<RefCell<T>> {
    fn draw_one(&mut self, unit: UnitId) -> bool {
        self.borrow_mut().draw_one(unit)
    }

    fn draw_by_category(&mut self, unit: UnitId, category: CardCategory) -> bool {
        self.borrow_mut().draw_by_category(unit, category)
    }

    fn force_discard(&mut self, unit: UnitId, count: u32) -> u32 {
        self.borrow_mut().force_discard(unit, count)
    }
}

impl<T: HazardManager + ?Sized> HazardManager for Rc<RefCell<T>> {
    fn create_healing_zone(&mut self, cell: GridPos, amount: i32, duration: u32) {
        self.borrow_mut().create_healing_zone(cell, amount, duration);
    }

    fn create_trap(&mut self, cell: GridPos, damage: i32, duration: u32) {
        self.borrow_mut().create_trap(cell, damage, duration);
    }

    fn create_speed_zone(&mut self, cell: GridPos, bonus: i32, duration: u32) {
        self.borrow_mut().create_speed_zone(cell, bonus, duration);
    }

    fn create_poison_cloud(&mut self, cell: GridPos, damage: i32, radius: i32, duration: u32) {
        self.borrow_mut()
            .create_poison_cloud(cell, damage, radius, duration);
    }

    fn create_poison_tile(&mut self, cell: GridPos, damage: i32, duration: u32) {
        self.borrow_mut().create_poison_tile(cell, damage, duration);
    }
}

impl<T: SelectionPrompter + ?Sized> SelectionPrompter for Rc<RefCell<T>> {
    fn present(&mut self, request: &SelectionRequest) {
        self.borrow_mut().present(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_damage_branches_on_weapon() {
        let calc = FixedDamage::split(10, 6);
        let melee = Unit::new(UnitId(0), Team::new(0), GridPos::new(0, 0));
        let ranged = melee.clone().with_weapon(WeaponKind::Ranged);

        assert_eq!(calc.base_damage(&melee), 10);
        assert_eq!(calc.base_damage(&ranged), 6);
    }

    #[test]
    fn test_optional_collaborators_default_absent() {
        let services = Services::new(StatDamage::default(), TeamLedger::new(2));
        assert!(services.deck.is_none());
        assert!(services.hazards.is_none());
        assert!(services.prompter.is_none());

        let services = services
            .with_deck(DeckCounter::new(5))
            .with_hazards(HazardLog::default());
        assert!(services.deck.is_some());
        assert!(services.hazards.is_some());
    }

    #[test]
    fn test_shared_deck_handle() {
        let deck = Rc::new(RefCell::new(DeckCounter::new(2)));
        let mut shared = Rc::clone(&deck);

        assert!(shared.draw_one(UnitId(1)));
        assert_eq!(deck.borrow().hand_size(UnitId(1)), 1);
    }
}
