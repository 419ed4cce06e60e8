//! Shared fixtures for the integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use relic_engine::core::{BattleConfig, BattleState, Team, UnitId};
use relic_engine::dispatch::{DispatchOutcome, EffectDispatcher};
use relic_engine::effects::EffectReport;
use relic_engine::grid::GridPos;
use relic_engine::services::{FixedDamage, Services, TeamLedger};

pub const HERO_TEAM: Team = Team::new(0);
pub const FOE_TEAM: Team = Team::new(1);

/// Empty 8x6 battle.
pub fn battle() -> BattleState {
    BattleState::new(BattleConfig::new(8, 6))
}

/// Spawn a default unit of `team` at `(x, y)`.
pub fn spawn(battle: &mut BattleState, team: Team, x: i32, y: i32) -> UnitId {
    let unit = battle.new_unit(team, GridPos::new(x, y));
    battle.spawn(unit).unwrap()
}

/// Standard catalog and recipes, 10 base damage, two teams of resources.
pub fn dispatcher() -> EffectDispatcher {
    EffectDispatcher::standard(Services::new(FixedDamage::new(10), TeamLedger::new(2)))
}

pub fn complete(outcome: DispatchOutcome) -> EffectReport {
    match outcome {
        DispatchOutcome::Complete(report) => report,
        other => panic!("expected a completed dispatch, got {other:?}"),
    }
}

/// Route engine diagnostics to the test writer. `RUST_LOG` filters.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
