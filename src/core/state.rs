//! Battle state: units, grid and RNG.
//!
//! `BattleState` is the single owner of everything an effect can mutate
//! directly. Its methods keep the roster and the grid consistent: a live
//! unit's `pos` always names the one cell whose occupant is that unit.
//!
//! ## Movement
//!
//! `relocate` clears the origin cell before occupying the destination, so a
//! failed move leaves both untouched and a successful one never passes
//! through a state where the unit occupies two cells.

use serde::{Deserialize, Serialize};

use super::config::BattleConfig;
use super::rng::{GameRng, RngCheckpoint};
use super::roster::Roster;
use super::{Team, Unit, UnitId};
use crate::error::{DestinationFault, EffectError};
use crate::grid::{CellFlags, Grid, GridPos};

/// Complete mutable state of one battle.
#[derive(Clone, Debug)]
pub struct BattleState {
    config: BattleConfig,
    roster: Roster,
    grid: Grid,
    rng: GameRng,
}

impl BattleState {
    /// Build an empty battlefield from `config`.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        let mut grid = Grid::new(config.width, config.height);
        if let Some(x) = config.neutral_column {
            grid = grid.with_neutral_column(x);
        }
        for &pos in &config.blocked {
            grid.set_flags(pos, CellFlags::BLOCKED);
        }

        Self {
            rng: GameRng::new(config.seed),
            config,
            roster: Roster::new(),
            grid,
        }
    }

    /// Battlefield configuration.
    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// The grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for hazard marks and terrain flags.
    ///
    /// Occupancy must go through `spawn`, `relocate` and friends.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The unit registry.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Battle RNG.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// A unit template with the next free id and the configured buzz cap.
    #[must_use]
    pub fn new_unit(&self, team: Team, pos: GridPos) -> Unit {
        let max_buzz = self.config.default_max_buzz;
        Unit::new(self.roster.next_id(), team, pos).with_buzz(0, max_buzz)
    }

    /// Place a unit on its `pos` and register it as live.
    pub fn spawn(&mut self, unit: Unit) -> Result<UnitId, EffectError> {
        let id = unit.id;
        self.grid.occupy(unit.pos, id)?;
        self.roster.push(unit);
        Ok(id)
    }

    /// Live unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id)
    }

    /// Mutable live unit by id.
    ///
    /// Position changes must go through `relocate` or `swap_units`.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.roster.get_mut(id)
    }

    /// Live unit by id, or `UnitNotLive`.
    pub fn live_unit(&self, id: UnitId) -> Result<&Unit, EffectError> {
        self.roster.get(id).ok_or(EffectError::UnitNotLive(id))
    }

    /// Mutable live unit by id, or `UnitNotLive`.
    pub fn live_unit_mut(&mut self, id: UnitId) -> Result<&mut Unit, EffectError> {
        self.roster.get_mut(id).ok_or(EffectError::UnitNotLive(id))
    }

    /// Live units in roster order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.roster.live()
    }

    /// Live unit standing on `pos`.
    #[must_use]
    pub fn unit_at(&self, pos: GridPos) -> Option<&Unit> {
        self.grid.occupant(pos).and_then(|id| self.roster.get(id))
    }

    /// Move a live unit to `to`, returning the cell it left.
    pub fn relocate(&mut self, id: UnitId, to: GridPos) -> Result<GridPos, EffectError> {
        let from = self.live_unit(id)?.pos;
        if let Some(reason) = self.grid.placement_fault(to) {
            return Err(EffectError::InvalidDestination { pos: to, reason });
        }

        self.grid.vacate(from);
        self.grid.occupy(to, id)?;
        self.live_unit_mut(id)?.pos = to;
        Ok(from)
    }

    /// Exchange the cells of two live units.
    pub fn swap_units(&mut self, a: UnitId, b: UnitId) -> Result<(), EffectError> {
        let pos_a = self.live_unit(a)?.pos;
        let pos_b = self.live_unit(b)?.pos;
        if a == b {
            return Ok(());
        }

        self.grid.vacate(pos_a);
        self.grid.vacate(pos_b);
        self.grid.occupy(pos_b, a)?;
        self.grid.occupy(pos_a, b)?;
        self.live_unit_mut(a)?.pos = pos_b;
        self.live_unit_mut(b)?.pos = pos_a;
        Ok(())
    }

    /// Remove a unit from the battlefield (defeat or surrender).
    ///
    /// Its cell is cleared and its statuses are dropped.
    pub fn retire(&mut self, id: UnitId, surrendered: bool) -> Option<Unit> {
        let pos = self.roster.get(id)?.pos;
        self.grid.vacate(pos);
        self.roster.retire(id, surrendered)
    }

    /// Bring a fallen unit back at `pos` with `hp` and full morale.
    pub fn revive(&mut self, id: UnitId, pos: GridPos, hp: i32) -> Result<(), EffectError> {
        if !self.roster.fallen().any(|u| u.id == id) {
            return Err(EffectError::MissingInput("fallen unit"));
        }
        if let Some(reason) = self.grid.placement_fault(pos) {
            return Err(EffectError::InvalidDestination { pos, reason });
        }
        let Some(mut unit) = self.roster.take_fallen(id) else {
            return Err(EffectError::MissingInput("fallen unit"));
        };

        unit.pos = pos;
        unit.hp = hp.clamp(1, unit.max_hp.max(1));
        unit.morale = unit.max_morale;
        unit.surrendered = false;
        self.grid.occupy(pos, id)?;
        self.roster.push(unit);
        Ok(())
    }

    /// First placeable cell within `reach` of `center`, nearest first.
    ///
    /// Ties on distance keep row-major order.
    #[must_use]
    pub fn free_cell_near(&self, center: GridPos, reach: i32) -> Option<GridPos> {
        self.grid
            .cells_within(center, reach)
            .filter(|c| self.grid.can_place(c.pos))
            .min_by_key(|c| c.pos.manhattan(center))
            .map(|c| c.pos)
    }

    /// Validate that `to` is within `range` of `from`.
    pub fn check_range(from: GridPos, to: GridPos, range: i32) -> Result<(), EffectError> {
        let distance = from.manhattan(to);
        if distance > range {
            return Err(EffectError::InvalidDestination {
                pos: to,
                reason: DestinationFault::OutOfRange { distance, range },
            });
        }
        Ok(())
    }
}

/// Serializable snapshot of a battle, RNG position included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub config: BattleConfig,
    pub roster: Roster,
    pub grid: Grid,
    pub rng: RngCheckpoint,
}

impl BattleState {
    /// Capture the battle for save/replay.
    #[must_use]
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            config: self.config.clone(),
            roster: self.roster.clone(),
            grid: self.grid.clone(),
            rng: self.rng.checkpoint(),
        }
    }

    /// Restore a captured battle.
    #[must_use]
    pub fn from_snapshot(snapshot: BattleSnapshot) -> Self {
        Self {
            rng: GameRng::resume(&snapshot.rng),
            config: snapshot.config,
            roster: snapshot.roster,
            grid: snapshot.grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battle() -> BattleState {
        BattleState::new(BattleConfig::new(6, 6))
    }

    fn spawn(state: &mut BattleState, team: u8, x: i32, y: i32) -> UnitId {
        let unit = state.new_unit(Team::new(team), GridPos::new(x, y));
        state.spawn(unit).unwrap()
    }

    #[test]
    fn test_spawn_occupies_cell() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 1, 1);

        assert_eq!(state.grid().occupant(GridPos::new(1, 1)), Some(a));
        assert_eq!(state.unit_at(GridPos::new(1, 1)).map(|u| u.id), Some(a));

        let clash = state.new_unit(Team::new(1), GridPos::new(1, 1));
        assert!(state.spawn(clash).is_err());
        assert_eq!(state.roster().len(), 1);
    }

    #[test]
    fn test_relocate_round_trip() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 1, 1);

        assert_eq!(state.relocate(a, GridPos::new(4, 4)), Ok(GridPos::new(1, 1)));
        assert_eq!(state.grid().occupant(GridPos::new(1, 1)), None);
        assert_eq!(state.grid().occupant(GridPos::new(4, 4)), Some(a));

        state.relocate(a, GridPos::new(1, 1)).unwrap();
        assert_eq!(state.grid().occupant(GridPos::new(1, 1)), Some(a));
        assert_eq!(state.grid().occupant(GridPos::new(4, 4)), None);
        assert_eq!(state.unit(a).unwrap().pos, GridPos::new(1, 1));
    }

    #[test]
    fn test_relocate_rejected_leaves_state() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 1, 1);
        let b = spawn(&mut state, 1, 2, 1);

        let err = state.relocate(a, GridPos::new(2, 1)).unwrap_err();
        assert_eq!(
            err,
            EffectError::InvalidDestination {
                pos: GridPos::new(2, 1),
                reason: DestinationFault::Occupied
            }
        );
        assert_eq!(state.grid().occupant(GridPos::new(1, 1)), Some(a));
        assert_eq!(state.grid().occupant(GridPos::new(2, 1)), Some(b));
    }

    #[test]
    fn test_swap_units() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 0, 0);
        let b = spawn(&mut state, 1, 5, 5);

        state.swap_units(a, b).unwrap();
        assert_eq!(state.unit(a).unwrap().pos, GridPos::new(5, 5));
        assert_eq!(state.unit(b).unwrap().pos, GridPos::new(0, 0));
        assert_eq!(state.grid().occupant(GridPos::new(0, 0)), Some(b));
        assert_eq!(state.grid().occupant(GridPos::new(5, 5)), Some(a));
    }

    #[test]
    fn test_retire_and_revive() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 2, 2);

        state.retire(a, true).unwrap();
        assert!(state.unit(a).is_none());
        assert!(state.grid().can_place(GridPos::new(2, 2)));

        state.revive(a, GridPos::new(3, 3), 5).unwrap();
        let revived = state.unit(a).unwrap();
        assert_eq!(revived.hp, 5);
        assert!(!revived.surrendered);
        assert_eq!(state.grid().occupant(GridPos::new(3, 3)), Some(a));
    }

    #[test]
    fn test_neutral_and_blocked_from_config() {
        let state = BattleState::new(
            BattleConfig::new(7, 3)
                .with_neutral_column(3)
                .with_blocked(GridPos::new(0, 0)),
        );
        assert!(!state.grid().can_place(GridPos::new(3, 1)));
        assert!(!state.grid().can_place(GridPos::new(0, 0)));
        assert!(state.grid().can_place(GridPos::new(1, 0)));
    }

    #[test]
    fn test_free_cell_near() {
        let mut state = battle();
        spawn(&mut state, 0, 0, 0);
        assert_eq!(
            state.free_cell_near(GridPos::new(0, 0), 1),
            Some(GridPos::new(1, 0))
        );
    }

    #[test]
    fn test_snapshot_restores_units() {
        let mut state = battle();
        let a = spawn(&mut state, 0, 2, 3);

        let restored = BattleState::from_snapshot(state.snapshot());
        assert_eq!(restored.unit(a).map(|u| u.pos), Some(GridPos::new(2, 3)));
        assert_eq!(restored.grid().occupant(GridPos::new(2, 3)), Some(a));
    }
}
