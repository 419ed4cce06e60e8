//! # relic-engine
//!
//! Relic effect resolution for grid-based tactical battles.
//!
//! ## Design Principles
//!
//! 1. **Data over code paths**: every relic is a catalog entry (numbers) plus
//!    a recipe (ordered steps). Adding a relic never adds a branch.
//!
//! 2. **Soft failure**: a missing target, a blocked cell or an absent
//!    collaborator is a diagnostic and a report entry, never a panic.
//!
//! 3. **Injected collaborators**: damage, economy, deck, hazards and the
//!    selection prompt are traits handed in at construction.
//!
//! ## Architecture
//!
//! - **Two-phase dispatch**: effects that need the player return a
//!   `PendingSelection` and resume later; the core stays synchronous and
//!   deterministic.
//!
//! - **Persistent Data Structures**: the roster is an `im::Vector`, so a
//!   battle clones in O(1) for previews and snapshots.
//!
//! ## Modules
//!
//! - `core`: units, teams, roster, battle state, RNG, configuration
//! - `grid`: positions, cells, occupancy
//! - `status`: status kinds and per-unit collections
//! - `relics`: identifiers, definitions, catalog, recipes
//! - `effects`: step language, target queries, primitives, reports
//! - `selection`: player sub-selection state machine
//! - `services`: collaborator traits and in-memory implementations
//! - `dispatch`: the effect dispatcher

pub mod core;
pub mod dispatch;
pub mod effects;
pub mod error;
pub mod grid;
pub mod relics;
pub mod selection;
pub mod services;
pub mod status;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, BattleSnapshot, BattleState, EngineConfig, GameRng, Team, TeamMap, Unit,
    UnitId, UnitStat, WeaponKind,
};

pub use crate::grid::{Grid, GridPos, HazardKind};

pub use crate::status::{StatusCollection, StatusEffectInstance, StatusKind};

pub use crate::relics::{
    RecipeBook, RelicCatalog, RelicCategory, RelicDefinition, RelicId, TargetingMode,
};

pub use crate::effects::{
    ActionPrimitives, Applied, EffectReport, EffectStep, Recipe, ReportEntry, TargetResolver,
};

pub use crate::selection::{
    InteractiveSelection, SelectionChoice, SelectionKind, SelectionPhase, SelectionRequest,
};

pub use crate::services::{
    DamageCalculator, DeckManager, HazardManager, ResourceManager, SelectionPrompter, Services,
};

pub use crate::dispatch::{DispatchOutcome, EffectDispatcher};

pub use crate::error::{EffectError, ErrorSeverity, SelectionError};
