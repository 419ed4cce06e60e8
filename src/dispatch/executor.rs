//! Recipe execution.
//!
//! The executor walks a queue of `EffectStep`s front to back. Branching
//! steps (conditionals, guarded grog spends) push the chosen branch onto the
//! front of the queue, so nested steps run before anything that followed
//! the branch. An interactive step stops the walk and hands back a
//! `PendingEffect` holding its `then` steps followed by the rest of the
//! queue.

use std::collections::VecDeque;

use tracing::debug;

use crate::core::{BattleState, EngineConfig, Team, UnitId};
use crate::effects::{
    random_enemy, ActionPrimitives, Anchor, Applied, AreaEffect, AttackBonus, AttackEffect, CellSource,
    Condition, DamageBonus, Destination, EffectReport, EffectStep, HazardSpec, InteractiveEffect,
    Magnitude, MovementEffect, Payload, ResourceEffect, Selector, Summon, SummonEffect,
    TargetResolver, TargetSet, UnitEffect,
};
use crate::error::{DestinationFault, EffectError};
use crate::grid::{GridPos, HazardKind};
use crate::relics::{RelicDefinition, RelicId};
use crate::selection::SelectionRequest;
use crate::services::Services;
use crate::status::StatusEffectInstance;

/// Everything a step can read about the current invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Invocation {
    pub relic: RelicId,
    pub definition: RelicDefinition,
    pub caster: UnitId,
    /// Caster's team, captured at dispatch so resource steps survive the
    /// caster leaving the field mid-effect.
    pub team: Team,
    pub target: Option<UnitId>,
    /// Where the target stood at dispatch. Area steps anchored on a target
    /// that has since fallen still land here.
    pub target_cell: Option<GridPos>,
    pub cell: Option<GridPos>,
    pub chosen_ally: Option<UnitId>,
    pub chosen_cell: Option<GridPos>,
}

impl Invocation {
    /// The chosen cell if a selection supplied one, else the input cell.
    #[must_use]
    pub fn effective_cell(&self) -> Option<GridPos> {
        self.chosen_cell.or(self.cell)
    }
}

/// A suspended effect awaiting a player's choice.
#[derive(Clone, Debug)]
pub struct PendingEffect {
    pub invocation: Invocation,
    /// Steps to run once the choice arrives.
    pub remaining: VecDeque<EffectStep>,
    /// Everything applied before the prompt.
    pub report: EffectReport,
}

/// How a walk ended.
#[derive(Debug)]
pub(crate) enum RunResult {
    Finished(EffectReport),
    Suspended(SelectionRequest, PendingEffect),
}

/// One walk over a step queue.
pub(crate) struct Executor<'a> {
    state: &'a mut BattleState,
    services: &'a mut Services,
    config: &'a EngineConfig,
    inv: Invocation,
    report: EffectReport,
}

impl<'a> Executor<'a> {
    pub(crate) fn new(
        state: &'a mut BattleState,
        services: &'a mut Services,
        config: &'a EngineConfig,
        inv: Invocation,
        report: EffectReport,
    ) -> Self {
        Self {
            state,
            services,
            config,
            inv,
            report,
        }
    }

    fn def(&self) -> &RelicDefinition {
        &self.inv.definition
    }

    /// Run until the queue is empty or a step asks for a selection.
    pub(crate) fn run(mut self, mut queue: VecDeque<EffectStep>) -> RunResult {
        while let Some(step) = queue.pop_front() {
            debug!(
                target: "relic_engine::dispatch",
                relic = %self.inv.relic,
                step = step.family(),
                "running step"
            );
            match step {
                EffectStep::Interactive(interactive) => {
                    return self.suspend(interactive, queue);
                }
                EffectStep::Conditional {
                    condition,
                    then,
                    otherwise,
                } => match self.condition(condition) {
                    Ok(true) => prepend(&mut queue, then),
                    Ok(false) => prepend(&mut queue, otherwise),
                    Err(err) => self.report.skipped(err),
                },
                EffectStep::Resource(ResourceEffect::SpendGrog {
                    amount,
                    then,
                    otherwise,
                }) => {
                    let amount = amount.resolve_count(self.def());
                    match ActionPrimitives::spend_grog(self.services.resources.as_mut(), self.inv.team, amount) {
                        Ok(spent) => {
                            self.report.applied(spent);
                            prepend(&mut queue, then);
                        }
                        Err(err) => {
                            self.report.skipped(err);
                            prepend(&mut queue, otherwise);
                        }
                    }
                }
                other => {
                    if let Err(err) = self.step(&other) {
                        self.report.skipped(err);
                    }
                }
            }
        }
        RunResult::Finished(self.report)
    }

    fn suspend(self, interactive: InteractiveEffect, queue: VecDeque<EffectStep>) -> RunResult {
        let InteractiveEffect { kind, prompt, then } = interactive;
        let mut remaining: VecDeque<EffectStep> = then.into();
        remaining.extend(queue);

        let request = SelectionRequest {
            relic: self.inv.relic,
            caster: self.inv.caster,
            kind,
            prompt,
        };
        let pending = PendingEffect {
            invocation: self.inv,
            remaining,
            report: self.report,
        };
        RunResult::Suspended(request, pending)
    }

    fn step(&mut self, step: &EffectStep) -> Result<(), EffectError> {
        match step {
            EffectStep::Movement(movement) => self.movement(*movement),
            EffectStep::Attack(attack) => self.attack(*attack),
            EffectStep::Unit(UnitEffect { who, payload }) => {
                for unit in self.select(*who)? {
                    let outcome = self.payload(unit, *payload);
                    self.report.record(outcome);
                }
                Ok(())
            }
            EffectStep::Area(area) => self.area(*area),
            EffectStep::Resource(resource) => self.resource(resource),
            EffectStep::Summon(summon) => self.summon(*summon),
            EffectStep::Revive { fraction } => {
                let near = self.state.live_unit(self.inv.caster)?.pos;
                let fraction = fraction.resolve(self.def());
                let outcome = ActionPrimitives::revive(self.state, self.inv.team, near, fraction);
                self.report.record(outcome);
                Ok(())
            }
            EffectStep::Unimplemented(note) => Err(EffectError::NotImplemented(*note)),
            EffectStep::Interactive(_)
            | EffectStep::Conditional { .. } => Ok(()),
        }
    }

    // === Resolution of references ===

    fn live_pos(&self, unit: UnitId) -> Result<GridPos, EffectError> {
        Ok(self.state.live_unit(unit)?.pos)
    }

    fn target(&self) -> Result<UnitId, EffectError> {
        self.inv.target.ok_or(EffectError::MissingInput("target"))
    }

    fn chosen_ally(&self) -> Result<UnitId, EffectError> {
        self.inv.chosen_ally.ok_or(EffectError::MissingInput("chosen ally"))
    }

    fn cell(&self) -> Result<GridPos, EffectError> {
        self.inv.effective_cell().ok_or(EffectError::MissingInput("cell"))
    }

    fn anchor_unit(&self, anchor: Anchor) -> Option<UnitId> {
        match anchor {
            Anchor::Caster => Some(self.inv.caster),
            Anchor::Target => self.inv.target,
            Anchor::ChosenAlly => self.inv.chosen_ally,
            Anchor::Cell => None,
        }
    }

    fn anchor_pos(&self, anchor: Anchor) -> Result<GridPos, EffectError> {
        match anchor {
            Anchor::Caster => self.live_pos(self.inv.caster),
            Anchor::Target => {
                let target = self.target()?;
                self.live_pos(target).or_else(|err| self.inv.target_cell.ok_or(err))
            }
            Anchor::ChosenAlly => self.live_pos(self.chosen_ally()?),
            Anchor::Cell => self.cell(),
        }
    }

    fn select(&mut self, selector: Selector) -> Result<TargetSet, EffectError> {
        let caster = self.inv.caster;
        let resolver = TargetResolver::new(self.state);
        let set = match selector {
            Selector::Caster => self.single(caster)?,
            Selector::Target => self.single(self.target()?)?,
            Selector::ChosenAlly => self.single(self.chosen_ally()?)?,
            Selector::Within { side, anchor, reach } => {
                let center = self.anchor_pos(anchor)?;
                let reach = reach.resolve(self.def());
                resolver.within(caster, side, center, reach, self.anchor_unit(anchor))
            }
            Selector::Team(side) => resolver.team(caster, side),
            Selector::Row { side, anchor } => resolver.in_row(caster, side, self.anchor_pos(anchor)?),
            Selector::Column { side, anchor } => {
                resolver.in_column(caster, side, self.anchor_pos(anchor)?)
            }
            Selector::Extremal { side, stat, pick } => {
                resolver.extremal(caster, side, stat, pick).into_iter().collect()
            }
            Selector::EnemyCaptain => resolver.enemy_captain(caster).into_iter().collect(),
            Selector::RandomEnemy => random_enemy(self.state, caster).into_iter().collect(),
        };
        Ok(set)
    }

    fn single(&self, unit: UnitId) -> Result<TargetSet, EffectError> {
        self.state.live_unit(unit)?;
        Ok(TargetSet::from_slice(&[unit]))
    }

    fn first(&mut self, selector: Selector, what: &'static str) -> Result<UnitId, EffectError> {
        self.select(selector)?
            .first()
            .copied()
            .ok_or(EffectError::MissingInput(what))
    }

    fn destination(&self, to: Destination, mover: GridPos) -> Result<GridPos, EffectError> {
        match to {
            Destination::Cell => self.cell(),
            Destination::AdjacentTo(anchor) => {
                let of = self.anchor_pos(anchor)?;
                TargetResolver::new(self.state)
                    .free_neighbor(of, mover)
                    .ok_or(EffectError::InvalidDestination {
                        pos: of,
                        reason: DestinationFault::NoFreeCell,
                    })
            }
            Destination::BehindTarget => {
                let caster = self.live_pos(self.inv.caster)?;
                let target = self.live_pos(self.target()?)?;
                Ok(target.offset(caster.direction_to(target), 1))
            }
        }
    }

    fn condition(&self, condition: Condition) -> Result<bool, EffectError> {
        let caster = self.state.live_unit(self.inv.caster)?;
        match condition {
            Condition::CasterIsCaptain => Ok(caster.captain),
            Condition::CasterIsExtremal { stat, pick } => {
                Ok(TargetResolver::new(self.state).is_extremal(caster.id, stat, pick))
            }
            Condition::CasterHpBelow(fraction) => Ok(caster.hp_fraction() < fraction.resolve(self.def())),
            Condition::TargetHpBelow(fraction) => {
                let target = self.state.live_unit(self.target()?)?;
                Ok(target.hp_fraction() < fraction.resolve(self.def()))
            }
        }
    }

    // === Step families ===

    fn movement(&mut self, movement: MovementEffect) -> Result<(), EffectError> {
        match movement {
            MovementEffect::Teleport { who, to } => {
                for unit in self.select(who)? {
                    let outcome = self
                        .live_pos(unit)
                        .and_then(|from| self.destination(to, from))
                        .and_then(|dest| ActionPrimitives::teleport(self.state, unit, dest));
                    self.report.record(outcome);
                }
            }
            MovementEffect::Step { who, to, reach } => {
                let range = reach.resolve(self.def());
                for unit in self.select(who)? {
                    let outcome = self
                        .live_pos(unit)
                        .and_then(|from| self.destination(to, from))
                        .and_then(|dest| ActionPrimitives::move_within(self.state, unit, dest, range));
                    self.report.record(outcome);
                }
            }
            MovementEffect::Push { who, from, tiles } => {
                let source = self.anchor_pos(from)?;
                let tiles = tiles.resolve_i32(self.def());
                for unit in self.select(who)? {
                    match ActionPrimitives::push(self.state, unit, source, tiles) {
                        Ok(Some(moved)) => self.report.applied(moved),
                        Ok(None) => {}
                        Err(err) => self.report.skipped(err),
                    }
                }
            }
            MovementEffect::Pull { who, toward, tiles } => {
                let source = self.anchor_pos(toward)?;
                let tiles = tiles.resolve_i32(self.def());
                for unit in self.select(who)? {
                    match ActionPrimitives::pull(self.state, unit, source, tiles) {
                        Ok(Some(moved)) => self.report.applied(moved),
                        Ok(None) => {}
                        Err(err) => self.report.skipped(err),
                    }
                }
            }
            MovementEffect::Swap { first, second } => {
                let a = self.first(first, "swap partner")?;
                let b = self.first(second, "swap partner")?;
                let outcome = ActionPrimitives::swap(self.state, a, b);
                self.report.record(outcome);
            }
        }
        Ok(())
    }

    fn attack(&mut self, attack: AttackEffect) -> Result<(), EffectError> {
        let bonus = match attack.bonus {
            DamageBonus::None => AttackBonus::None,
            DamageBonus::Flat(m) => AttackBonus::Flat(m.resolve_i32(self.def())),
            DamageBonus::Percent(m) => AttackBonus::Percent(m.resolve(self.def())),
        };
        for victim in self.select(attack.victims)? {
            let outcome = ActionPrimitives::attack(
                self.state,
                self.services.damage.as_ref(),
                self.inv.caster,
                victim,
                bonus,
            );
            self.report.record(outcome);
        }
        Ok(())
    }

    fn area(&mut self, area: AreaEffect) -> Result<(), EffectError> {
        let center = self.anchor_pos(area.anchor)?;
        let reach = area.reach.resolve(self.def());
        let units =
            TargetResolver::new(self.state).within(self.inv.caster, area.side, center, reach, None);
        for unit in units {
            let outcome = self.payload(unit, area.payload);
            self.report.record(outcome);
        }
        Ok(())
    }

    fn payload(&mut self, unit: UnitId, payload: Payload) -> Result<Applied, EffectError> {
        let def = self.inv.definition;
        let amount = |m: Magnitude| m.resolve_i32(&def);
        match payload {
            Payload::Status {
                kind,
                magnitude,
                lifetime,
            } => {
                let duration = lifetime.resolve(&def).max(self.config.min_status_duration);
                let instance = StatusEffectInstance::new(kind, magnitude.resolve(&def), duration)
                    .with_source(self.inv.caster);
                ActionPrimitives::apply_status(self.state, unit, instance)
            }
            Payload::Heal(m) => ActionPrimitives::heal(self.state, unit, amount(m)),
            Payload::TrueDamage(m) => ActionPrimitives::deal_damage(self.state, unit, amount(m)),
            Payload::RestoreMorale(m) => ActionPrimitives::change_morale(self.state, unit, amount(m)),
            Payload::DrainMorale(m) => ActionPrimitives::change_morale(self.state, unit, -amount(m)),
            Payload::GainBuzz(m) => ActionPrimitives::change_buzz(self.state, unit, amount(m)),
            Payload::DrainBuzz(m) => ActionPrimitives::change_buzz(self.state, unit, -amount(m)),
            Payload::CleanseDebuffs => ActionPrimitives::cleanse(self.state, unit),
            Payload::PurgeBuffs => ActionPrimitives::purge(self.state, unit),
        }
    }

    fn resource(&mut self, resource: &ResourceEffect) -> Result<(), EffectError> {
        let def = self.inv.definition;
        let team = self.inv.team;
        let caster = self.inv.caster;
        match resource {
            ResourceEffect::GrantGrog(m) => {
                let granted =
                    ActionPrimitives::grant_grog(self.services.resources.as_mut(), team, m.resolve_count(&def));
                self.report.applied(granted);
            }
            ResourceEffect::GrantEnergy(m) => {
                let granted =
                    ActionPrimitives::grant_energy(self.services.resources.as_mut(), team, m.resolve_count(&def));
                self.report.applied(granted);
            }
            ResourceEffect::Draw(m) => {
                let deck = self
                    .services
                    .deck
                    .as_deref_mut()
                    .ok_or(EffectError::CollaboratorUnavailable("deck manager"))?;
                let drawn = ActionPrimitives::draw(deck, caster, m.resolve_count(&def));
                self.report.applied(drawn);
            }
            ResourceEffect::DrawByCategory(category) => {
                let deck = self
                    .services
                    .deck
                    .as_deref_mut()
                    .ok_or(EffectError::CollaboratorUnavailable("deck manager"))?;
                let drawn = ActionPrimitives::draw_by_category(deck, caster, *category);
                self.report.applied(drawn);
            }
            ResourceEffect::ForceDiscard {
                count,
                grog_per_card,
            } => {
                let deck = self
                    .services
                    .deck
                    .as_deref_mut()
                    .ok_or(EffectError::CollaboratorUnavailable("deck manager"))?;
                let (discarded, n) = ActionPrimitives::force_discard(deck, caster, count.resolve_count(&def));
                self.report.applied(discarded);

                let grog = n * grog_per_card.resolve_count(&def);
                if grog > 0 {
                    let granted = ActionPrimitives::grant_grog(self.services.resources.as_mut(), team, grog);
                    self.report.applied(granted);
                }
            }
            // Branching spend is handled by the queue walk.
            ResourceEffect::SpendGrog { .. } => {}
        }
        Ok(())
    }

    fn summon(&mut self, summon: SummonEffect) -> Result<(), EffectError> {
        let kind = match summon.what {
            Summon::Entity(entity) => return Err(EffectError::NotImplemented(entity.into())),
            Summon::HealingZone => HazardKind::HealingZone,
            Summon::Trap => HazardKind::Trap,
            Summon::SpeedZone => HazardKind::SpeedZone,
            Summon::PoisonCloud => HazardKind::PoisonCloud,
            Summon::PoisonTile => HazardKind::PoisonTile,
        };

        let cell = match summon.at {
            CellSource::Cell => self.cell()?,
            CellSource::CasterCell => self.live_pos(self.inv.caster)?,
            CellSource::TargetCell => self.live_pos(self.target()?)?,
            CellSource::EmptyAround { anchor, reach } => {
                let center = self.anchor_pos(anchor)?;
                self.state
                    .free_cell_near(center, reach.resolve(self.def()))
                    .ok_or(EffectError::InvalidDestination {
                        pos: center,
                        reason: DestinationFault::NoFreeCell,
                    })?
            }
        };

        let def = self.def();
        let spec = HazardSpec {
            kind,
            cell,
            amount: Magnitude::Value1.resolve_i32(def),
            radius: if kind == HazardKind::PoisonCloud { def.tile_range } else { 0 },
            duration: def.duration,
        };

        let Some(hazards) = self.services.hazards.as_deref_mut() else {
            debug!(
                target: "relic_engine::dispatch",
                relic = %self.inv.relic,
                hazard = %kind,
                cell = %cell,
                "no hazard manager; would have created hazard"
            );
            return Err(EffectError::CollaboratorUnavailable("hazard manager"));
        };
        let outcome = ActionPrimitives::create_hazard(self.state, hazards, spec);
        self.report.record(outcome);
        Ok(())
    }
}

fn prepend(queue: &mut VecDeque<EffectStep>, steps: Vec<EffectStep>) {
    for step in steps.into_iter().rev() {
        queue.push_front(step);
    }
}
