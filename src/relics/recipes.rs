//! Recipe book: the behavior of every relic as effect-step data.
//!
//! `recipe_for` is an exhaustive match, so a new `RelicId` without behavior
//! does not compile. The helpers at the bottom keep entries to one line per
//! step.

use rustc_hash::FxHashMap;
use strum::IntoEnumIterator;

use crate::core::UnitStat;
use crate::effects::{
    Anchor, AreaEffect, AttackEffect, CardCategory, CellSource, Condition, DamageBonus,
    Destination, EffectStep, EntityKind, Extreme, InteractiveEffect, Lifetime, Magnitude,
    MovementEffect, Payload, Reach, Recipe, ResourceEffect, Selector, Side, Summon, SummonEffect,
    UnitEffect,
};
use crate::selection::SelectionKind;
use crate::status::StatusKind;

use super::definition::RelicId;

/// Mapping from identifier to recipe.
#[derive(Clone, Debug, Default)]
pub struct RecipeBook {
    recipes: FxHashMap<RelicId, Recipe>,
}

impl RecipeBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in recipes, one per identifier.
    #[must_use]
    pub fn standard() -> Self {
        let recipes = RelicId::iter().map(|id| (id, recipe_for(id))).collect();
        Self { recipes }
    }

    /// Recipe by identifier.
    #[must_use]
    pub fn get(&self, id: RelicId) -> Option<&Recipe> {
        self.recipes.get(&id)
    }

    /// Add or replace a recipe, returning the previous one.
    pub fn insert(&mut self, id: RelicId, recipe: Recipe) -> Option<Recipe> {
        self.recipes.insert(id, recipe)
    }

    /// Remove a recipe.
    pub fn remove(&mut self, id: RelicId) -> Option<Recipe> {
        self.recipes.remove(&id)
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Identifiers whose recipe contains a placeholder, ordered.
    #[must_use]
    pub fn placeholders(&self) -> Vec<RelicId> {
        let mut ids: Vec<_> = self
            .recipes
            .iter()
            .filter(|(_, r)| r.has_placeholder())
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }
}

/// Built-in behavior of `id`.
#[must_use]
pub fn recipe_for(id: RelicId) -> Recipe {
    use Magnitude::{Fixed, Value1, Value2};
    use RelicId::*;

    match id {
        // === Boots V1 ===
        BootsDash => Recipe::new(vec![step_to(Selector::Caster, Destination::Cell, Reach::TileRange)]),
        BootsBlink => Recipe::new(vec![teleport(Selector::Caster, Destination::Cell)]),
        BootsCharge => Recipe::targeted(vec![
            teleport(Selector::Caster, Destination::AdjacentTo(Anchor::Target)),
            attack(Selector::Target, DamageBonus::None),
        ]),
        BootsSidestep => Recipe::new(vec![
            step_to(Selector::Caster, Destination::Cell, Reach::TileRange),
            status(Selector::Caster, StatusKind::Dodge, Value1),
        ]),
        BootsShoulderBash => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::Flat(Value1)),
            push(Selector::Target, Anchor::Caster, Value2),
        ]),
        BootsGrapple => Recipe::targeted(vec![pull(Selector::Target, Anchor::Caster, Value1)]),
        BootsSwiftness => Recipe::new(vec![status(Selector::Caster, StatusKind::Haste, Value1)]),
        BootsRetreat => Recipe::new(vec![
            step_to(Selector::Caster, Destination::Cell, Reach::TileRange),
            unit(Selector::Caster, Payload::Heal(Value1)),
        ]),

        // === Boots V2 ===
        BootsV2Skirmish => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::None),
            interactive(
                SelectionKind::EmptyTile,
                "Choose a tile to land on",
                vec![teleport(Selector::Caster, Destination::Cell)],
            ),
        ]),
        BootsV2Phase => Recipe::new(vec![
            teleport(Selector::Caster, Destination::Cell),
            status_for(Selector::Caster, StatusKind::Stealth, Fixed(0.0), Lifetime::Definition),
        ]),
        BootsV2Switcheroo => Recipe::new(vec![interactive(
            SelectionKind::Ally,
            "Choose an ally to swap with",
            vec![swap(Selector::Caster, Selector::ChosenAlly)],
        )]),
        BootsV2Vault => Recipe::targeted(vec![
            teleport(Selector::Caster, Destination::BehindTarget),
            attack(Selector::Target, DamageBonus::Percent(Value1)),
        ]),
        BootsV2Slipstream => Recipe::new(vec![
            teleport(Selector::Caster, Destination::Cell),
            area(Anchor::Caster, Reach::TileRange, Side::Allies, haste(Value1)),
        ]),
        BootsV2Tether => Recipe::targeted(vec![swap(Selector::Caster, Selector::Target)]),
        BootsV2Sprint => Recipe::new(vec![
            status(Selector::Caster, StatusKind::Haste, Value1),
            resource(ResourceEffect::GrantEnergy(Value2)),
        ]),
        BootsV2Stampede => {
            let adjacent = within(Side::Enemies, Anchor::Caster, Reach::TileRange);
            Recipe::new(vec![
                attack(adjacent, DamageBonus::None),
                push(adjacent, Anchor::Caster, Value1),
            ])
        }

        // === Gloves V1 ===
        GlovesPowerStrike => {
            Recipe::targeted(vec![attack(Selector::Target, DamageBonus::Percent(Value1))])
        }
        GlovesJab => Recipe::targeted(vec![attack(Selector::Target, DamageBonus::Flat(Value1))]),
        GlovesCleave => Recipe::new(vec![attack(
            within(Side::Enemies, Anchor::Caster, Reach::TileRange),
            DamageBonus::None,
        )]),
        GlovesVampiric => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::None),
            unit(Selector::Caster, Payload::Heal(Value1)),
        ]),
        GlovesStunningBlow => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::None),
            status(Selector::Target, StatusKind::Stun, Fixed(0.0)),
        ]),
        GlovesRendingClaw => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::None),
            status(Selector::Target, StatusKind::Bleed, Value1),
        ]),
        GlovesKnockout => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::Flat(Value1)),
            push(Selector::Target, Anchor::Caster, Value2),
        ]),
        GlovesIronFist => Recipe::new(vec![status(Selector::Caster, StatusKind::AttackUp, Value1)]),

        // === Gloves V2 ===
        GlovesV2GrogPunch => Recipe::targeted(vec![resource(ResourceEffect::SpendGrog {
            amount: Value2,
            then: vec![attack(Selector::Target, DamageBonus::Percent(Value1))],
            otherwise: vec![attack(Selector::Target, DamageBonus::None)],
        })]),
        GlovesV2Chain => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::None),
            attack(
                within(Side::Enemies, Anchor::Target, Reach::TileRange),
                DamageBonus::Percent(Value1),
            ),
        ]),
        GlovesV2Execute => Recipe::targeted(vec![conditional(
            Condition::TargetHpBelow(Value2),
            vec![attack(Selector::Target, DamageBonus::Percent(Value1))],
            vec![attack(Selector::Target, DamageBonus::None)],
        )]),
        GlovesV2Riposte => Recipe::new(vec![status(Selector::Caster, StatusKind::Counter, Value1)]),
        GlovesV2Sunder => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::None),
            unit(Selector::Target, Payload::PurgeBuffs),
        ]),
        GlovesV2Rally => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::None),
            area(Anchor::Caster, Reach::TileRange, Side::Allies, Payload::RestoreMorale(Value1)),
        ]),
        GlovesV2MoraleBreaker => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::None),
            unit(Selector::Target, Payload::DrainMorale(Value1)),
        ]),
        GlovesV2Overdrive => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::Percent(Value1)),
            unit(Selector::Caster, Payload::TrueDamage(Value2)),
        ]),

        // === Hat V1 ===
        HatFocus => Recipe::new(vec![status(Selector::Caster, StatusKind::Focus, Value1)]),
        HatWarCry => Recipe::new(vec![area(
            Anchor::Caster,
            Reach::TileRange,
            Side::AlliesAndCaster,
            apply(StatusKind::AttackUp, Value1),
        )]),
        HatMedic => Recipe::new(vec![interactive(
            SelectionKind::Ally,
            "Choose an ally to heal",
            vec![unit(Selector::ChosenAlly, Payload::Heal(Value1))],
        )]),
        HatInspire => Recipe::new(vec![unit(
            Selector::Team(Side::AlliesAndCaster),
            apply(StatusKind::Inspire, Value1),
        )]),
        HatLookout => Recipe::new(vec![status(Selector::Caster, StatusKind::RangeUp, Value1)]),
        HatBrainstorm => Recipe::new(vec![resource(ResourceEffect::Draw(Value1))]),
        HatCaptainsOrders => Recipe::new(vec![conditional(
            Condition::CasterIsCaptain,
            vec![resource(ResourceEffect::GrantEnergy(Value1))],
            vec![resource(ResourceEffect::GrantGrog(Value2))],
        )]),
        HatCalm => Recipe::new(vec![
            unit(Selector::Caster, Payload::CleanseDebuffs),
            unit(Selector::Caster, Payload::RestoreMorale(Value1)),
        ]),

        // === Hat V2 ===
        HatV2Tactician => Recipe::new(vec![resource(ResourceEffect::DrawByCategory(
            CardCategory::Skill,
        ))]),
        HatV2Mastermind => Recipe::new(vec![unit(
            extremal(Side::AlliesAndCaster, UnitStat::Hp, Extreme::Lowest),
            Payload::Heal(Value1),
        )]),
        HatV2Beacon => Recipe::new(vec![interactive(
            SelectionKind::Ally,
            "Choose an ally to shield",
            vec![
                status(Selector::ChosenAlly, StatusKind::Shield, Value1),
                status(Selector::ChosenAlly, StatusKind::Taunt, Fixed(0.0)),
            ],
        )]),
        HatV2Overseer => Recipe::new(vec![unit(
            Selector::Row {
                side: Side::Enemies,
                anchor: Anchor::Caster,
            },
            apply(StatusKind::Marked, Fixed(0.0)),
        )]),
        HatV2Scout => Recipe::new(vec![unit(
            Selector::Column {
                side: Side::Enemies,
                anchor: Anchor::Caster,
            },
            apply(StatusKind::Exposed, Value1),
        )]),
        HatV2Strategist => Recipe::new(vec![
            resource(ResourceEffect::DrawByCategory(CardCategory::Attack)),
            resource(ResourceEffect::DrawByCategory(CardCategory::Move)),
        ]),
        HatV2Bolster => Recipe::new(vec![unit(
            extremal(Side::AlliesAndCaster, UnitStat::Grit, Extreme::Lowest),
            apply(StatusKind::Fortified, Value1),
        )]),
        HatV2Buzzkill => Recipe::targeted(vec![
            unit(Selector::Target, Payload::DrainBuzz(Value1)),
            unit(Selector::Caster, Payload::GainBuzz(Value1)),
        ]),

        // === Coat V1 ===
        CoatPlated => Recipe::new(vec![status(Selector::Caster, StatusKind::DamageReduction, Value1)]),
        CoatThorned => Recipe::new(vec![status(Selector::Caster, StatusKind::Thorns, Value1)]),
        CoatShielded => Recipe::new(vec![status(Selector::Caster, StatusKind::Shield, Value1)]),
        CoatAnchored => Recipe::new(vec![status(
            Selector::Caster,
            StatusKind::KnockbackImmunity,
            Fixed(0.0),
        )]),
        CoatEvasive => Recipe::new(vec![status(Selector::Caster, StatusKind::Dodge, Value1)]),
        CoatTaunting => Recipe::new(vec![
            status(Selector::Caster, StatusKind::Taunt, Fixed(0.0)),
            status(Selector::Caster, StatusKind::DamageReduction, Value1),
        ]),
        CoatRegenerative => {
            Recipe::new(vec![status(Selector::Caster, StatusKind::Regeneration, Value1)])
        }
        CoatGuardian => Recipe::new(vec![
            area(Anchor::Caster, Reach::TileRange, Side::Allies, apply(StatusKind::Guarded, Fixed(0.0))),
            status(Selector::Caster, StatusKind::DamageReduction, Value1),
        ]),

        // === Coat V2 ===
        CoatV2Bulwark => Recipe::new(vec![area(
            Anchor::Caster,
            Reach::TileRange,
            Side::AlliesAndCaster,
            apply(StatusKind::DamageReduction, Value1),
        )]),
        CoatV2Reflective => Recipe::new(vec![status(Selector::Caster, StatusKind::Reflect, Value1)]),
        CoatV2LastStand => Recipe::new(vec![conditional(
            Condition::CasterHpBelow(Value2),
            vec![status_for(
                Selector::Caster,
                StatusKind::Undying,
                Fixed(0.0),
                Lifetime::Turns(1),
            )],
            vec![status(Selector::Caster, StatusKind::DamageReduction, Value1)],
        )]),
        CoatV2Purifier => Recipe::new(vec![area(
            Anchor::Caster,
            Reach::TileRange,
            Side::AlliesAndCaster,
            Payload::CleanseDebuffs,
        )]),
        CoatV2MoraleWard => {
            Recipe::new(vec![status(Selector::Caster, StatusKind::MoraleShield, Value1)])
        }
        CoatV2Immovable => Recipe::new(vec![
            status(Selector::Caster, StatusKind::KnockbackImmunity, Fixed(0.0)),
            status(Selector::Caster, StatusKind::Fortified, Value1),
        ]),
        CoatV2Provoker => Recipe::new(vec![
            unit(
                within(Side::Enemies, Anchor::Caster, Reach::TileRange),
                apply(StatusKind::Provoked, Fixed(0.0)),
            ),
            status(Selector::Caster, StatusKind::Taunt, Fixed(0.0)),
        ]),
        CoatV2Sanctuary => Recipe::new(vec![summon(Summon::HealingZone, CellSource::CasterCell)]),

        // === Trinket V1 ===
        TrinketGrogFlask => Recipe::new(vec![resource(ResourceEffect::GrantGrog(Value1))]),
        TrinketEnergyCell => Recipe::new(vec![resource(ResourceEffect::GrantEnergy(Value1))]),
        TrinketLuckyCoin => Recipe::new(vec![status(Selector::Caster, StatusKind::CritChance, Value1)]),
        TrinketSmokeBomb => Recipe::new(vec![area(
            Anchor::Caster,
            Reach::TileRange,
            Side::Enemies,
            apply(StatusKind::Blind, Value1),
        )]),
        TrinketCaltrops => Recipe::new(vec![summon(Summon::Trap, CellSource::Cell)]),
        TrinketHourglass => {
            Recipe::new(vec![status(Selector::Caster, StatusKind::ExtraAction, Value1)])
        }
        TrinketPoisonVial => Recipe::targeted(vec![status(Selector::Target, StatusKind::Poison, Value1)]),
        TrinketBuzzCharm => Recipe::new(vec![unit(Selector::Caster, Payload::GainBuzz(Value1))]),

        // === Trinket V2 ===
        TrinketV2Decoy => Recipe::new(vec![summon(
            Summon::Entity(EntityKind::Decoy),
            CellSource::EmptyAround {
                anchor: Anchor::Caster,
                reach: Reach::TileRange,
            },
        )]),
        TrinketV2Alchemist => Recipe::new(vec![resource(ResourceEffect::ForceDiscard {
            count: Value1,
            grog_per_card: Value2,
        })]),
        TrinketV2PoisonCloud => Recipe::new(vec![summon(Summon::PoisonCloud, CellSource::Cell)]),
        TrinketV2SpeedZone => Recipe::new(vec![summon(Summon::SpeedZone, CellSource::Cell)]),
        TrinketV2Snare => Recipe::targeted(vec![
            status(Selector::Target, StatusKind::Root, Fixed(0.0)),
            summon(Summon::Trap, CellSource::TargetCell),
        ]),
        TrinketV2DeckOfFate => Recipe::new(vec![resource(ResourceEffect::Draw(Value1))]),
        TrinketV2Siphon => Recipe::targeted(vec![
            unit(Selector::Target, Payload::DrainBuzz(Value1)),
            resource(ResourceEffect::GrantGrog(Value2)),
        ]),
        TrinketV2Gambit => Recipe::new(vec![resource(ResourceEffect::SpendGrog {
            amount: Value1,
            then: vec![resource(ResourceEffect::Draw(Value2))],
            otherwise: Vec::new(),
        })]),

        // === Totem V1 ===
        TotemHealing => Recipe::new(vec![summon(Summon::HealingZone, CellSource::Cell)]),
        TotemWardingIdol => Recipe::new(vec![summon(
            Summon::Entity(EntityKind::WardingIdol),
            empty_near_caster(),
        )]),
        TotemWarBanner => Recipe::new(vec![summon(
            Summon::Entity(EntityKind::WarBanner),
            empty_near_caster(),
        )]),
        TotemSpikeTrap => Recipe::new(vec![summon(Summon::Trap, CellSource::Cell)]),
        TotemPoisonMarsh => Recipe::new(vec![summon(Summon::PoisonTile, CellSource::Cell)]),
        TotemGust => Recipe::new(vec![push(
            within(Side::Enemies, Anchor::Caster, Reach::TileRange),
            Anchor::Caster,
            Value1,
        )]),
        TotemRallyingDrum => Recipe::new(vec![area(
            Anchor::Caster,
            Reach::TileRange,
            Side::Allies,
            Payload::RestoreMorale(Value1),
        )]),
        TotemSpiritLink => Recipe::new(vec![area(
            Anchor::Caster,
            Reach::TileRange,
            Side::AlliesAndCaster,
            apply(StatusKind::AuraRegeneration, Value1),
        )]),

        // === Totem V2 ===
        TotemV2Golem => Recipe::new(vec![summon(
            Summon::Entity(EntityKind::Golem),
            empty_near_caster(),
        )]),
        TotemV2Effigy => Recipe::new(vec![summon(
            Summon::Entity(EntityKind::Effigy),
            empty_near_caster(),
        )]),
        TotemV2Storm => Recipe::new(vec![area(
            Anchor::Cell,
            Reach::TileRange,
            Side::Enemies,
            Payload::TrueDamage(Value1),
        )]),
        TotemV2Quagmire => Recipe::new(vec![
            summon(Summon::PoisonCloud, CellSource::Cell),
            area(Anchor::Cell, Reach::TileRange, Side::Enemies, apply(StatusKind::Slow, Value1)),
        ]),
        TotemV2Aura => Recipe::new(vec![area(
            Anchor::Caster,
            Reach::TileRange,
            Side::AlliesAndCaster,
            apply(StatusKind::AuraDamageReduction, Value1),
        )]),
        TotemV2Beacon => Recipe::new(vec![
            summon(Summon::SpeedZone, CellSource::CasterCell),
            area(Anchor::Caster, Reach::TileRange, Side::Allies, haste(Value1)),
        ]),
        TotemV2Lodestone => Recipe::new(vec![pull(
            within(Side::Enemies, Anchor::Caster, Reach::TileRange),
            Anchor::Caster,
            Value1,
        )]),
        TotemV2Shrine => Recipe::new(vec![summon(
            Summon::HealingZone,
            CellSource::EmptyAround {
                anchor: Anchor::Caster,
                reach: Reach::TileRange,
            },
        )]),

        // === Ultimate V1 ===
        UltimateEarthquake => Recipe::new(vec![
            area(Anchor::Caster, Reach::TileRange, Side::Enemies, Payload::TrueDamage(Value1)),
            area(Anchor::Caster, Reach::TileRange, Side::Enemies, apply(StatusKind::Stun, Fixed(0.0))),
        ]),
        UltimateRallyingCry => Recipe::new(vec![
            unit(Selector::Team(Side::AlliesAndCaster), Payload::RestoreMorale(Value1)),
            unit(Selector::Team(Side::AlliesAndCaster), apply(StatusKind::AttackUp, Value2)),
        ]),
        UltimateBerserk => Recipe::new(vec![
            status(Selector::Caster, StatusKind::Berserk, Value1),
            status(Selector::Caster, StatusKind::Haste, Value2),
        ]),
        UltimateJudgement => Recipe::targeted(vec![
            attack(Selector::Target, DamageBonus::Percent(Value1)),
            status(Selector::Target, StatusKind::Stun, Fixed(0.0)),
        ]),
        UltimateMassHeal => Recipe::new(vec![unit(
            Selector::Team(Side::AlliesAndCaster),
            Payload::Heal(Value1),
        )]),
        UltimateTerror => Recipe::new(vec![
            unit(Selector::Team(Side::Enemies), apply(StatusKind::Fear, Fixed(0.0))),
            unit(Selector::Team(Side::Enemies), Payload::DrainMorale(Value1)),
        ]),
        UltimateResurrect => Recipe::new(vec![EffectStep::Revive { fraction: Value1 }]),
        UltimateBarrage => Recipe::new(vec![attack(Selector::Team(Side::Enemies), DamageBonus::None)]),
        UltimateDecapitate => Recipe::new(vec![attack(
            Selector::EnemyCaptain,
            DamageBonus::Percent(Value1),
        )]),

        // === Ultimate V2 ===
        UltimateV2MassTeleport => Recipe::new(vec![interactive(
            SelectionKind::AllyThenTile,
            "Choose an ally, then where to send them",
            vec![teleport(Selector::ChosenAlly, Destination::Cell)],
        )]),
        UltimateV2Cataclysm => Recipe::new(vec![area(
            Anchor::Cell,
            Reach::TileRange,
            Side::Everyone,
            Payload::TrueDamage(Value1),
        )]),
        UltimateV2Overclock => Recipe::new(vec![
            resource(ResourceEffect::GrantEnergy(Value1)),
            resource(ResourceEffect::Draw(Value2)),
        ]),
        UltimateV2Bloodlust => Recipe::new(vec![attack(
            extremal(Side::Enemies, UnitStat::Hp, Extreme::Lowest),
            DamageBonus::Percent(Value1),
        )]),
        UltimateV2Requiem => Recipe::new(vec![
            attack(Selector::RandomEnemy, DamageBonus::Flat(Value1)),
            attack(Selector::RandomEnemy, DamageBonus::Flat(Value1)),
            attack(Selector::RandomEnemy, DamageBonus::Flat(Value1)),
        ]),
        UltimateV2Martyr => Recipe::new(vec![
            unit(Selector::Caster, Payload::TrueDamage(Value1)),
            unit(Selector::Team(Side::Allies), Payload::Heal(Value2)),
        ]),
        UltimateV2Fortress => Recipe::new(vec![
            unit(
                Selector::Team(Side::AlliesAndCaster),
                apply(StatusKind::DamageReduction, Value1),
            ),
            unit(
                Selector::Team(Side::AlliesAndCaster),
                apply(StatusKind::KnockbackImmunity, Fixed(0.0)),
            ),
        ]),
        UltimateV2Purge => Recipe::new(vec![
            unit(Selector::Team(Side::Enemies), Payload::PurgeBuffs),
            unit(Selector::Team(Side::AlliesAndCaster), Payload::CleanseDebuffs),
        ]),
        UltimateV2Vortex => Recipe::new(vec![pull(
            Selector::Within {
                side: Side::Enemies,
                anchor: Anchor::Cell,
                reach: Reach::TileRange,
            },
            Anchor::Cell,
            Value1,
        )]),

        // === Passive V1 ===
        PassiveThickSkin => {
            Recipe::new(vec![status(Selector::Caster, StatusKind::DamageReduction, Value1)])
        }
        PassiveBloodthirst => {
            Recipe::new(vec![status(Selector::Caster, StatusKind::Lifesteal, Value1)])
        }
        PassiveGrogBrewer => Recipe::new(vec![resource(ResourceEffect::GrantGrog(Value1))]),
        PassiveLeadership => Recipe::new(vec![conditional(
            Condition::CasterIsCaptain,
            vec![area(Anchor::Caster, Reach::TileRange, Side::Allies, apply(StatusKind::Inspire, Value1))],
            Vec::new(),
        )]),
        PassiveUnbreakable => {
            Recipe::new(vec![status(Selector::Caster, StatusKind::MoraleShield, Value1)])
        }
        PassiveScavenger => Recipe::new(vec![resource(ResourceEffect::Draw(Value1))]),
        PassiveIronWill => Recipe::new(vec![status(
            Selector::Caster,
            StatusKind::DebuffImmunity,
            Fixed(0.0),
        )]),
        PassiveHotBlooded => Recipe::new(vec![status(Selector::Caster, StatusKind::BuzzRegen, Value1)]),

        // === Passive V2 ===
        PassiveV2Tracker => Recipe::new(vec![EffectStep::Unimplemented(
            "needs enemy movement history across turns",
        )]),
        PassiveV2Vengeance => Recipe::new(vec![conditional(
            Condition::CasterHpBelow(Value2),
            vec![status(Selector::Caster, StatusKind::AttackUpPercent, Value1)],
            Vec::new(),
        )]),
        PassiveV2Underdog => Recipe::new(vec![conditional(
            Condition::CasterIsExtremal {
                stat: UnitStat::Hp,
                pick: Extreme::Lowest,
            },
            vec![status(Selector::Caster, StatusKind::AttackUpPercent, Value1)],
            Vec::new(),
        )]),
        PassiveV2Alpha => Recipe::new(vec![conditional(
            Condition::CasterIsExtremal {
                stat: UnitStat::Hp,
                pick: Extreme::Highest,
            },
            vec![area(Anchor::Caster, Reach::TileRange, Side::Allies, apply(StatusKind::AttackUp, Value1))],
            Vec::new(),
        )]),
        PassiveV2Momentum => Recipe::new(vec![EffectStep::Unimplemented(
            "needs a per-turn count of consecutive attacks",
        )]),
        PassiveV2Stoic => Recipe::new(vec![conditional(
            Condition::CasterIsExtremal {
                stat: UnitStat::Grit,
                pick: Extreme::Highest,
            },
            vec![status(Selector::Caster, StatusKind::Fortified, Value1)],
            Vec::new(),
        )]),
        PassiveV2Hoarder => Recipe::new(vec![resource(ResourceEffect::SpendGrog {
            amount: Value1,
            then: vec![resource(ResourceEffect::GrantEnergy(Value2))],
            otherwise: Vec::new(),
        })]),
        PassiveV2Shepherd => Recipe::new(vec![unit(
            extremal(Side::AlliesAndCaster, UnitStat::Morale, Extreme::Lowest),
            Payload::RestoreMorale(Value1),
        )]),
    }
}

// === Step helpers ===

fn teleport(who: Selector, to: Destination) -> EffectStep {
    EffectStep::Movement(MovementEffect::Teleport { who, to })
}

fn step_to(who: Selector, to: Destination, reach: Reach) -> EffectStep {
    EffectStep::Movement(MovementEffect::Step { who, to, reach })
}

fn push(who: Selector, from: Anchor, tiles: Magnitude) -> EffectStep {
    EffectStep::Movement(MovementEffect::Push { who, from, tiles })
}

fn pull(who: Selector, toward: Anchor, tiles: Magnitude) -> EffectStep {
    EffectStep::Movement(MovementEffect::Pull { who, toward, tiles })
}

fn swap(first: Selector, second: Selector) -> EffectStep {
    EffectStep::Movement(MovementEffect::Swap { first, second })
}

fn attack(victims: Selector, bonus: DamageBonus) -> EffectStep {
    EffectStep::Attack(AttackEffect { victims, bonus })
}

fn unit(who: Selector, payload: Payload) -> EffectStep {
    EffectStep::Unit(UnitEffect { who, payload })
}

/// Status payload lasting the definition's duration. Buff or debuff alike.
fn apply(kind: StatusKind, magnitude: Magnitude) -> Payload {
    Payload::Status {
        kind,
        magnitude,
        lifetime: Lifetime::Definition,
    }
}

fn haste(magnitude: Magnitude) -> Payload {
    apply(StatusKind::Haste, magnitude)
}

fn status(who: Selector, kind: StatusKind, magnitude: Magnitude) -> EffectStep {
    unit(who, apply(kind, magnitude))
}

fn status_for(
    who: Selector,
    kind: StatusKind,
    magnitude: Magnitude,
    lifetime: Lifetime,
) -> EffectStep {
    unit(
        who,
        Payload::Status {
            kind,
            magnitude,
            lifetime,
        },
    )
}

fn area(anchor: Anchor, reach: Reach, side: Side, payload: Payload) -> EffectStep {
    EffectStep::Area(AreaEffect {
        anchor,
        reach,
        side,
        payload,
    })
}

fn within(side: Side, anchor: Anchor, reach: Reach) -> Selector {
    Selector::Within {
        side,
        anchor,
        reach,
    }
}

fn extremal(side: Side, stat: UnitStat, pick: Extreme) -> Selector {
    Selector::Extremal { side, stat, pick }
}

fn resource(effect: ResourceEffect) -> EffectStep {
    EffectStep::Resource(effect)
}

fn summon(what: Summon, at: CellSource) -> EffectStep {
    EffectStep::Summon(SummonEffect { what, at })
}

fn empty_near_caster() -> CellSource {
    CellSource::EmptyAround {
        anchor: Anchor::Caster,
        reach: Reach::TileRange,
    }
}

fn interactive(kind: SelectionKind, prompt: &'static str, then: Vec<EffectStep>) -> EffectStep {
    EffectStep::Interactive(InteractiveEffect { kind, prompt, then })
}

fn conditional(condition: Condition, then: Vec<EffectStep>, otherwise: Vec<EffectStep>) -> EffectStep {
    EffectStep::Conditional {
        condition,
        then,
        otherwise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn test_standard_has_every_identifier() {
        let book = RecipeBook::standard();
        assert_eq!(book.len(), RelicId::COUNT);
        for id in RelicId::iter() {
            assert!(book.get(id).is_some(), "{id} has no recipe");
        }
    }

    #[test]
    fn test_placeholders_are_explicit() {
        let book = RecipeBook::standard();
        assert_eq!(
            book.placeholders(),
            vec![
                RelicId::TrinketV2Decoy,
                RelicId::TotemWardingIdol,
                RelicId::TotemWarBanner,
                RelicId::TotemV2Golem,
                RelicId::TotemV2Effigy,
                RelicId::PassiveV2Tracker,
                RelicId::PassiveV2Momentum,
            ]
        );
    }

    #[test]
    fn test_interactive_relics() {
        let book = RecipeBook::standard();
        let interactive: Vec<_> = RelicId::iter()
            .filter(|id| book.get(*id).is_some_and(Recipe::is_interactive))
            .collect();
        assert_eq!(
            interactive,
            vec![
                RelicId::BootsV2Skirmish,
                RelicId::BootsV2Switcheroo,
                RelicId::HatMedic,
                RelicId::HatV2Beacon,
                RelicId::UltimateV2MassTeleport,
            ]
        );
    }

    #[test]
    fn test_targeted_recipes_match_targeting_mode() {
        use crate::relics::{RelicCatalog, TargetingMode};

        let catalog = RelicCatalog::standard();
        for id in RelicId::iter() {
            let recipe = recipe_for(id);
            let mode = catalog.get(id).map(|d| d.targeting);
            if recipe.requires_target {
                assert_ne!(mode, Some(TargetingMode::SelfOnly), "{id}");
            }
        }
    }

    #[test]
    fn test_insert_and_remove() {
        let mut book = RecipeBook::standard();
        let removed = book.remove(RelicId::HatFocus);
        assert!(removed.is_some());
        assert!(book.get(RelicId::HatFocus).is_none());

        book.insert(RelicId::HatFocus, Recipe::new(Vec::new()));
        assert_eq!(book.get(RelicId::HatFocus).map(|r| r.steps.len()), Some(0));
    }
}
