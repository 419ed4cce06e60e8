//! The effect dispatcher.

use std::collections::VecDeque;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::core::{BattleState, EngineConfig, UnitId};
use crate::effects::{log_error, Applied, EffectReport, EffectStep, TargetResolver};
use crate::error::{EffectError, SelectionError};
use crate::grid::GridPos;
use crate::relics::{RecipeBook, RelicCatalog, RelicDefinition, RelicId, TargetingMode};
use crate::selection::{InteractiveSelection, SelectionChoice, SelectionPhase, SelectionRequest};
use crate::services::Services;

use super::executor::{Executor, Invocation, PendingEffect, RunResult};
use super::DispatchOutcome;

/// Runs relic effects against a battle.
///
/// Owns the balancing data, the recipes, the collaborators and the one
/// outstanding selection. The battle itself is borrowed per call.
///
/// ```
/// use relic_engine::core::{BattleConfig, BattleState, Team};
/// use relic_engine::dispatch::{DispatchOutcome, EffectDispatcher};
/// use relic_engine::grid::GridPos;
/// use relic_engine::relics::RelicId;
/// use relic_engine::services::{FixedDamage, Services, TeamLedger};
///
/// let mut battle = BattleState::new(BattleConfig::new(8, 6));
/// let hero = battle.new_unit(Team::new(0), GridPos::new(1, 1));
/// let hero = battle.spawn(hero).unwrap();
/// let foe = battle.new_unit(Team::new(1), GridPos::new(2, 1));
/// let foe = battle.spawn(foe).unwrap();
///
/// let services = Services::new(FixedDamage::new(10), TeamLedger::new(2));
/// let mut dispatcher = EffectDispatcher::standard(services);
///
/// // Power Strike finds the nearest enemy on its own and hits for +50%.
/// let outcome = dispatcher.execute(&mut battle, RelicId::GlovesPowerStrike, hero, None, None);
/// let DispatchOutcome::Complete(report) = outcome else { panic!() };
/// assert_eq!(report.damage_to(foe), 15);
/// ```
#[derive(Debug)]
pub struct EffectDispatcher {
    catalog: RelicCatalog,
    recipes: RecipeBook,
    services: Services,
    config: EngineConfig,
    selection: InteractiveSelection<PendingEffect>,
}

impl EffectDispatcher {
    /// Create a dispatcher from its parts.
    pub fn new(
        catalog: RelicCatalog,
        recipes: RecipeBook,
        services: Services,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            recipes,
            services,
            config,
            selection: InteractiveSelection::new(),
        }
    }

    /// Built-in catalog and recipes with default policy.
    pub fn standard(services: Services) -> Self {
        Self::new(
            RelicCatalog::standard(),
            RecipeBook::standard(),
            services,
            EngineConfig::default(),
        )
    }

    #[must_use]
    pub fn catalog(&self) -> &RelicCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The collaborator bundle.
    #[must_use]
    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Where the current (or last) selection stands.
    #[must_use]
    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase()
    }

    /// The outstanding selection request, if any.
    #[must_use]
    pub fn pending_request(&self) -> Option<&SelectionRequest> {
        self.selection.request()
    }

    // === Dispatch ===

    /// Execute `relic` with its catalog definition.
    pub fn execute(
        &mut self,
        battle: &mut BattleState,
        relic: RelicId,
        caster: UnitId,
        target: Option<UnitId>,
        cell: Option<GridPos>,
    ) -> DispatchOutcome {
        let definition = self.catalog.get(relic).copied();
        self.execute_with(battle, relic, definition.as_ref(), Some(caster), target, cell)
    }

    /// Execute a relic by its identifier string.
    ///
    /// Unknown names abort with `UnhandledIdentifier`.
    pub fn execute_named(
        &mut self,
        battle: &mut BattleState,
        name: &str,
        caster: UnitId,
        target: Option<UnitId>,
        cell: Option<GridPos>,
    ) -> DispatchOutcome {
        match RelicId::from_str(name) {
            Ok(relic) => self.execute(battle, relic, caster, target, cell),
            Err(_) => abort(name, EffectError::UnhandledIdentifier(name.to_owned())),
        }
    }

    /// Execute `relic` with an explicit definition.
    ///
    /// A missing definition or caster is a no-op. An omitted target is
    /// resolved to the nearest enemy when the definition asks for it; a
    /// recipe that requires a target aborts entirely without one.
    pub fn execute_with(
        &mut self,
        battle: &mut BattleState,
        relic: RelicId,
        definition: Option<&RelicDefinition>,
        caster: Option<UnitId>,
        target: Option<UnitId>,
        cell: Option<GridPos>,
    ) -> DispatchOutcome {
        let name = relic.name();
        if let Some(pending) = self.selection.request() {
            return abort(name, EffectError::SelectionPending(pending.relic));
        }
        self.selection.begin();

        let Some(recipe) = self.recipes.get(relic) else {
            return abort(name, EffectError::UnhandledIdentifier(name.to_owned()));
        };
        let Some(definition) = definition.copied() else {
            return abort(name, EffectError::MissingInput("definition"));
        };
        let Some(caster) = caster else {
            return abort(name, EffectError::MissingInput("caster"));
        };
        let team = match battle.live_unit(caster) {
            Ok(unit) => unit.team,
            Err(err) => return abort(name, err),
        };

        let auto_target =
            self.config.auto_target && definition.targeting == TargetingMode::NearestEnemy;
        let target = match target {
            None if auto_target => TargetResolver::new(battle).nearest_enemy(caster),
            given => given,
        };
        if recipe.requires_target {
            match target {
                None => return abort(name, EffectError::MissingInput("target")),
                Some(t) if battle.unit(t).is_none() => {
                    return abort(name, EffectError::UnitNotLive(t));
                }
                Some(_) => {}
            }
        }

        debug!(
            target: "relic_engine::dispatch",
            relic = name,
            caster = %caster,
            target_unit = ?target,
            cell = ?cell,
            "executing relic"
        );
        let steps: VecDeque<EffectStep> = recipe.steps.iter().cloned().collect();
        let target_cell = target.and_then(|t| battle.unit(t)).map(|u| u.pos);
        let invocation = Invocation {
            relic,
            definition,
            caster,
            team,
            target,
            target_cell,
            cell,
            chosen_ally: None,
            chosen_cell: None,
        };
        self.run(battle, invocation, steps, EffectReport::new(relic))
    }

    fn run(
        &mut self,
        battle: &mut BattleState,
        invocation: Invocation,
        steps: VecDeque<EffectStep>,
        report: EffectReport,
    ) -> DispatchOutcome {
        let executor = Executor::new(battle, &mut self.services, &self.config, invocation, report);
        match executor.run(steps) {
            RunResult::Finished(report) => DispatchOutcome::Complete(report),
            RunResult::Suspended(request, pending) => self.request(request, pending),
        }
    }

    fn request(&mut self, request: SelectionRequest, pending: PendingEffect) -> DispatchOutcome {
        let name = request.relic.name();
        if let Err(err) = self.selection.issue(request.clone(), pending) {
            warn!(target: "relic_engine::dispatch", relic = name, error = %err, "selection not issued");
            return DispatchOutcome::Aborted(EffectError::SelectionPending(request.relic));
        }

        match self.services.prompter.as_deref_mut() {
            Some(prompter) => prompter.present(&request),
            None => log_error(
                name,
                &EffectError::CollaboratorUnavailable("selection prompter"),
            ),
        }
        debug!(
            target: "relic_engine::dispatch",
            relic = name,
            kind = %request.kind,
            prompt = request.prompt,
            "awaiting selection"
        );
        DispatchOutcome::PendingSelection(request)
    }

    // === Selection ===

    /// Resume the pending effect with the player's choice.
    ///
    /// An invalid choice is refused and the request stays pending. If the
    /// caster has left the field in the meantime, the rest of the effect is
    /// dropped and the report says so.
    pub fn resolve_selection(
        &mut self,
        battle: &mut BattleState,
        choice: SelectionChoice,
    ) -> Result<DispatchOutcome, SelectionError> {
        let request = self
            .selection
            .request()
            .cloned()
            .ok_or(SelectionError::NothingPending)?;

        let Some(caster) = battle.unit(request.caster) else {
            let (_, pending) = self.selection.resolve()?;
            let mut report = pending.report;
            report.skipped(EffectError::MissingInput("caster"));
            return Ok(DispatchOutcome::Complete(report));
        };

        if !choice.satisfies(request.kind) {
            return Err(SelectionError::IncompleteChoice(request.kind));
        }
        if let (true, Some(ally)) = (request.kind.wants_ally(), choice.ally) {
            let is_ally = battle.unit(ally).is_some_and(|u| caster.is_ally_of(u));
            if !is_ally {
                return Err(SelectionError::NotAnAlly(ally));
            }
        }
        if let (true, Some(cell)) = (request.kind.wants_tile(), choice.cell) {
            if !battle.grid().can_place(cell) {
                return Err(SelectionError::TileUnavailable(cell));
            }
        }

        let (_, pending) = self.selection.resolve()?;
        let PendingEffect {
            mut invocation,
            remaining,
            report,
        } = pending;
        if request.kind.wants_ally() {
            invocation.chosen_ally = choice.ally;
        }
        if request.kind.wants_tile() {
            invocation.chosen_cell = choice.cell;
        }

        debug!(
            target: "relic_engine::dispatch",
            relic = request.relic.name(),
            ally = ?invocation.chosen_ally,
            cell = ?invocation.chosen_cell,
            "selection resolved"
        );
        Ok(self.run(battle, invocation, remaining, report))
    }

    /// Abandon the pending effect.
    ///
    /// Steps that ran before the prompt stay applied; the returned report
    /// lists them followed by `Cancelled`.
    pub fn cancel_selection(&mut self) -> Result<EffectReport, SelectionError> {
        let (request, pending) = self.selection.cancel()?;
        debug!(
            target: "relic_engine::dispatch",
            relic = request.relic.name(),
            "selection cancelled"
        );
        let mut report = pending.report;
        report.applied(Applied::Cancelled);
        Ok(report)
    }
}

fn abort(relic: &str, err: EffectError) -> DispatchOutcome {
    log_error(relic, &err);
    DispatchOutcome::Aborted(err)
}
