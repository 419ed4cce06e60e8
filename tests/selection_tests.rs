//! Interactive selection integration tests.
//!
//! Two-phase relics suspend with a `SelectionRequest`, then resume through
//! `resolve_selection` or stop through `cancel_selection`.

use std::cell::RefCell;
use std::rc::Rc;

mod common;

use common::{dispatcher, spawn, FOE_TEAM, HERO_TEAM};
use relic_engine::core::{BattleConfig, BattleState, UnitId};
use relic_engine::dispatch::{DispatchOutcome, EffectDispatcher};
use relic_engine::effects::{Applied, ReportEntry};
use relic_engine::error::{EffectError, SelectionError};
use relic_engine::grid::GridPos;
use relic_engine::relics::RelicId;
use relic_engine::selection::{SelectionChoice, SelectionKind, SelectionPhase};
use relic_engine::services::{FixedDamage, PromptLog, Services, TeamLedger};

struct Scene {
    battle: BattleState,
    hero: UnitId,
    friend: UnitId,
    foe: UnitId,
}

/// Hero at (1,1), a wounded friend at (1,3), a foe at (2,1).
fn scene() -> Scene {
    let mut battle = BattleState::new(BattleConfig::new(8, 6).with_neutral_column(6));
    let hero = spawn(&mut battle, HERO_TEAM, 1, 1);
    let friend = battle.new_unit(HERO_TEAM, GridPos::new(1, 3)).with_current_hp(8);
    let friend = battle.spawn(friend).unwrap();
    let foe = spawn(&mut battle, FOE_TEAM, 2, 1);
    Scene {
        battle,
        hero,
        friend,
        foe,
    }
}

// =============================================================================
// Resolve
// =============================================================================

#[test]
fn test_skirmish_attacks_then_lands_on_chosen_tile() {
    let Scene {
        mut battle,
        hero,
        foe,
        ..
    } = scene();
    let mut dispatcher = dispatcher();

    let outcome = dispatcher.execute(&mut battle, RelicId::BootsV2Skirmish, hero, None, None);
    let request = outcome.request().cloned().unwrap();
    assert_eq!(request.kind, SelectionKind::EmptyTile);
    assert_eq!(request.caster, hero);
    assert_eq!(dispatcher.selection_phase(), SelectionPhase::Requested);

    // The attack has already landed while the prompt is up.
    assert_eq!(battle.unit(foe).unwrap().hp, 10);

    let landing = GridPos::new(4, 4);
    let outcome = dispatcher
        .resolve_selection(&mut battle, SelectionChoice::tile(landing))
        .unwrap();
    let report = outcome.report().unwrap();

    assert_eq!(report.damage_to(foe), 10);
    assert!(report.changes().any(|c| matches!(
        c,
        Applied::Moved { unit, to, .. } if *unit == hero && *to == landing
    )));
    assert_eq!(battle.unit(hero).unwrap().pos, landing);
    assert_eq!(dispatcher.selection_phase(), SelectionPhase::Resolved);
    assert!(dispatcher.pending_request().is_none());
}

#[test]
fn test_medic_heals_chosen_ally() {
    let Scene {
        mut battle,
        hero,
        friend,
        ..
    } = scene();
    let mut dispatcher = dispatcher();

    assert!(dispatcher.execute(&mut battle, RelicId::HatMedic, hero, None, None).is_pending());
    let outcome = dispatcher
        .resolve_selection(&mut battle, SelectionChoice::ally(friend))
        .unwrap();

    assert!(outcome.is_complete());
    assert_eq!(battle.unit(friend).unwrap().hp, 13);
}

#[test]
fn test_switcheroo_swaps_with_chosen_ally() {
    let Scene {
        mut battle,
        hero,
        friend,
        ..
    } = scene();
    let mut dispatcher = dispatcher();

    dispatcher.execute(&mut battle, RelicId::BootsV2Switcheroo, hero, None, None);
    dispatcher
        .resolve_selection(&mut battle, SelectionChoice::ally(friend))
        .unwrap();

    assert_eq!(battle.unit(hero).unwrap().pos, GridPos::new(1, 3));
    assert_eq!(battle.unit(friend).unwrap().pos, GridPos::new(1, 1));
    assert_eq!(battle.grid().occupant(GridPos::new(1, 1)), Some(friend));
}

#[test]
fn test_mass_teleport_moves_ally_to_tile() {
    let Scene {
        mut battle,
        hero,
        friend,
        ..
    } = scene();
    let mut dispatcher = dispatcher();

    let outcome = dispatcher.execute(&mut battle, RelicId::UltimateV2MassTeleport, hero, None, None);
    assert_eq!(outcome.request().map(|r| r.kind), Some(SelectionKind::AllyThenTile));

    // A tile alone does not answer an ally-then-tile request.
    assert_eq!(
        dispatcher.resolve_selection(&mut battle, SelectionChoice::tile(GridPos::new(5, 5))),
        Err(SelectionError::IncompleteChoice(SelectionKind::AllyThenTile))
    );

    dispatcher
        .resolve_selection(&mut battle, SelectionChoice::ally_and_tile(friend, GridPos::new(5, 5)))
        .unwrap();
    assert_eq!(battle.unit(friend).unwrap().pos, GridPos::new(5, 5));
    assert!(battle.grid().occupant(GridPos::new(1, 3)).is_none());
}

// =============================================================================
// Refused choices
// =============================================================================

#[test]
fn test_enemy_is_not_an_ally() {
    let Scene {
        mut battle,
        hero,
        foe,
        ..
    } = scene();
    let mut dispatcher = dispatcher();
    dispatcher.execute(&mut battle, RelicId::HatMedic, hero, None, None);

    let err = dispatcher.resolve_selection(&mut battle, SelectionChoice::ally(foe));

    assert_eq!(err, Err(SelectionError::NotAnAlly(foe)));
    assert_eq!(dispatcher.selection_phase(), SelectionPhase::Requested);
    assert!(dispatcher.pending_request().is_some());
}

#[test]
fn test_caster_is_not_its_own_ally() {
    let Scene {
        mut battle, hero, ..
    } = scene();
    let mut dispatcher = dispatcher();
    dispatcher.execute(&mut battle, RelicId::HatMedic, hero, None, None);

    let err = dispatcher.resolve_selection(&mut battle, SelectionChoice::ally(hero));

    assert_eq!(err, Err(SelectionError::NotAnAlly(hero)));
}

#[test]
fn test_incomplete_choice_keeps_request() {
    let Scene {
        mut battle,
        hero,
        friend,
        ..
    } = scene();
    let mut dispatcher = dispatcher();
    dispatcher.execute(&mut battle, RelicId::HatMedic, hero, None, None);

    let err = dispatcher.resolve_selection(&mut battle, SelectionChoice::tile(GridPos::new(3, 3)));
    assert_eq!(err, Err(SelectionError::IncompleteChoice(SelectionKind::Ally)));

    // The same request can still be answered.
    let outcome = dispatcher
        .resolve_selection(&mut battle, SelectionChoice::ally(friend))
        .unwrap();
    assert!(outcome.is_complete());
}

#[test]
fn test_occupied_and_neutral_tiles_are_refused() {
    let Scene {
        mut battle,
        hero,
        foe,
        ..
    } = scene();
    let mut dispatcher = dispatcher();
    dispatcher.execute(&mut battle, RelicId::BootsV2Skirmish, hero, Some(foe), None);

    let occupied = GridPos::new(1, 3);
    assert_eq!(
        dispatcher.resolve_selection(&mut battle, SelectionChoice::tile(occupied)),
        Err(SelectionError::TileUnavailable(occupied))
    );
    let neutral = GridPos::new(6, 2);
    assert_eq!(
        dispatcher.resolve_selection(&mut battle, SelectionChoice::tile(neutral)),
        Err(SelectionError::TileUnavailable(neutral))
    );
    let outside = GridPos::new(20, 20);
    assert_eq!(
        dispatcher.resolve_selection(&mut battle, SelectionChoice::tile(outside)),
        Err(SelectionError::TileUnavailable(outside))
    );
    assert_eq!(battle.unit(hero).unwrap().pos, GridPos::new(1, 1));
}

#[test]
fn test_resolve_without_pending() {
    let Scene {
        mut battle, friend, ..
    } = scene();
    let mut dispatcher = dispatcher();

    assert_eq!(
        dispatcher.resolve_selection(&mut battle, SelectionChoice::ally(friend)),
        Err(SelectionError::NothingPending)
    );
    assert_eq!(dispatcher.cancel_selection(), Err(SelectionError::NothingPending));
}

// =============================================================================
// Cancel
// =============================================================================

#[test]
fn test_cancel_keeps_committed_steps() {
    let Scene {
        mut battle,
        hero,
        foe,
        ..
    } = scene();
    let mut dispatcher = dispatcher();
    dispatcher.execute(&mut battle, RelicId::BootsV2Skirmish, hero, Some(foe), None);

    let report = dispatcher.cancel_selection().unwrap();

    assert_eq!(report.damage_to(foe), 10);
    assert_eq!(report.entries.last(), Some(&ReportEntry::Applied(Applied::Cancelled)));
    assert_eq!(battle.unit(foe).unwrap().hp, 10);
    assert_eq!(battle.unit(hero).unwrap().pos, GridPos::new(1, 1));
    assert_eq!(dispatcher.selection_phase(), SelectionPhase::Cancelled);
}

#[test]
fn test_new_execute_allowed_after_cancel() {
    let Scene {
        mut battle,
        hero,
        foe,
        ..
    } = scene();
    let mut dispatcher = dispatcher();
    dispatcher.execute(&mut battle, RelicId::HatMedic, hero, None, None);
    dispatcher.cancel_selection().unwrap();

    let outcome = dispatcher.execute(&mut battle, RelicId::GlovesJab, hero, Some(foe), None);

    assert!(outcome.is_complete());
    assert_eq!(dispatcher.selection_phase(), SelectionPhase::Idle);
}

// =============================================================================
// Caster loss and prompting
// =============================================================================

#[test]
fn test_caster_gone_before_resume() {
    let Scene {
        mut battle,
        hero,
        foe,
        ..
    } = scene();
    let mut dispatcher = dispatcher();
    dispatcher.execute(&mut battle, RelicId::BootsV2Skirmish, hero, Some(foe), None);
    battle.retire(hero, false);

    let outcome = dispatcher
        .resolve_selection(&mut battle, SelectionChoice::tile(GridPos::new(4, 4)))
        .unwrap();

    let DispatchOutcome::Complete(report) = outcome else {
        panic!("expected the continuation to be dropped");
    };
    assert_eq!(report.damage_to(foe), 10);
    assert!(report.errors().any(|e| *e == EffectError::MissingInput("caster")));
    assert!(battle.grid().occupant(GridPos::new(4, 4)).is_none());
    assert!(dispatcher.pending_request().is_none());
}

#[test]
fn test_prompter_sees_request() {
    let Scene {
        mut battle, hero, ..
    } = scene();
    let prompts = Rc::new(RefCell::new(PromptLog::default()));
    let services =
        Services::new(FixedDamage::new(10), TeamLedger::new(2)).with_prompter(Rc::clone(&prompts));
    let mut dispatcher = EffectDispatcher::standard(services);

    let outcome = dispatcher.execute(&mut battle, RelicId::HatMedic, hero, None, None);

    let shown = prompts.borrow().shown.clone();
    assert_eq!(shown.len(), 1);
    assert_eq!(Some(&shown[0]), outcome.request());
    assert_eq!(shown[0].relic, RelicId::HatMedic);
    assert_eq!(shown[0].kind, SelectionKind::Ally);
}
