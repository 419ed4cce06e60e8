//! Core battle types: units, teams, roster, state, RNG, configuration.
//!
//! Everything an effect mutates directly lives here. Collaborators that own
//! state outside the battle (grog ledger, deck, hazard simulation) are
//! reached through `crate::services`.

pub mod config;
pub mod rng;
pub mod roster;
pub mod state;
pub mod team;
pub mod unit;

pub use config::{BattleConfig, EngineConfig};
pub use rng::{GameRng, RngCheckpoint};
pub use roster::Roster;
pub use state::{BattleSnapshot, BattleState};
pub use team::{Team, TeamMap};
pub use unit::{Unit, UnitId, UnitStat, WeaponKind};
