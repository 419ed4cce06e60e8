//! Relic identifiers and their immutable definitions.
//!
//! ## RelicId
//!
//! The stable key of every relic effect. Identifiers are grouped by
//! category; within a category V1 relics come before V2. String forms match
//! the variant names and are what balancing data and `execute_named` use.
//!
//! ## RelicDefinition
//!
//! Numeric parameters of one relic. What `value1` and `value2` mean varies
//! per identifier; the relic's recipe decides how they are used.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Equipment slot a relic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum RelicFamily {
    Boots,
    Gloves,
    Hat,
    Coat,
    Trinket,
    Totem,
    Ultimate,
    PassiveUnique,
}

/// Relic generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Generation {
    V1,
    V2,
}

/// Category of a relic: family plus generation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, Serialize, Deserialize,
)]
pub enum RelicCategory {
    BootsV1,
    BootsV2,
    GlovesV1,
    GlovesV2,
    HatV1,
    HatV2,
    CoatV1,
    CoatV2,
    TrinketV1,
    TrinketV2,
    TotemV1,
    TotemV2,
    UltimateV1,
    UltimateV2,
    PassiveUniqueV1,
    PassiveUniqueV2,
}

impl RelicCategory {
    /// Equipment family.
    #[must_use]
    pub const fn family(self) -> RelicFamily {
        match self {
            Self::BootsV1 | Self::BootsV2 => RelicFamily::Boots,
            Self::GlovesV1 | Self::GlovesV2 => RelicFamily::Gloves,
            Self::HatV1 | Self::HatV2 => RelicFamily::Hat,
            Self::CoatV1 | Self::CoatV2 => RelicFamily::Coat,
            Self::TrinketV1 | Self::TrinketV2 => RelicFamily::Trinket,
            Self::TotemV1 | Self::TotemV2 => RelicFamily::Totem,
            Self::UltimateV1 | Self::UltimateV2 => RelicFamily::Ultimate,
            Self::PassiveUniqueV1 | Self::PassiveUniqueV2 => RelicFamily::PassiveUnique,
        }
    }

    /// Generation.
    #[must_use]
    pub const fn generation(self) -> Generation {
        match self {
            Self::BootsV1
            | Self::GlovesV1
            | Self::HatV1
            | Self::CoatV1
            | Self::TrinketV1
            | Self::TotemV1
            | Self::UltimateV1
            | Self::PassiveUniqueV1 => Generation::V1,
            _ => Generation::V2,
        }
    }
}

/// How a relic's target is found when the caller omits one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum TargetingMode {
    /// No target; steps act on the caster or on selections.
    #[default]
    SelfOnly,
    /// An omitted target resolves to the nearest live enemy.
    NearestEnemy,
    /// The caller must supply the target.
    Explicit,
}

/// Every relic effect identifier.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum RelicId {
    // === BootsV1 ===
    BootsDash,
    BootsBlink,
    BootsCharge,
    BootsSidestep,
    BootsShoulderBash,
    BootsGrapple,
    BootsSwiftness,
    BootsRetreat,

    // === BootsV2 ===
    BootsV2Skirmish,
    BootsV2Phase,
    BootsV2Switcheroo,
    BootsV2Vault,
    BootsV2Slipstream,
    BootsV2Tether,
    BootsV2Sprint,
    BootsV2Stampede,

    // === GlovesV1 ===
    GlovesPowerStrike,
    GlovesJab,
    GlovesCleave,
    GlovesVampiric,
    GlovesStunningBlow,
    GlovesRendingClaw,
    GlovesKnockout,
    GlovesIronFist,

    // === GlovesV2 ===
    GlovesV2GrogPunch,
    GlovesV2Chain,
    GlovesV2Execute,
    GlovesV2Riposte,
    GlovesV2Sunder,
    GlovesV2Rally,
    GlovesV2MoraleBreaker,
    GlovesV2Overdrive,

    // === HatV1 ===
    HatFocus,
    HatWarCry,
    HatMedic,
    HatInspire,
    HatLookout,
    HatBrainstorm,
    HatCaptainsOrders,
    HatCalm,

    // === HatV2 ===
    HatV2Tactician,
    HatV2Mastermind,
    HatV2Beacon,
    HatV2Overseer,
    HatV2Scout,
    HatV2Strategist,
    HatV2Bolster,
    HatV2Buzzkill,

    // === CoatV1 ===
    CoatPlated,
    CoatThorned,
    CoatShielded,
    CoatAnchored,
    CoatEvasive,
    CoatTaunting,
    CoatRegenerative,
    CoatGuardian,

    // === CoatV2 ===
    CoatV2Bulwark,
    CoatV2Reflective,
    CoatV2LastStand,
    CoatV2Purifier,
    CoatV2MoraleWard,
    CoatV2Immovable,
    CoatV2Provoker,
    CoatV2Sanctuary,

    // === TrinketV1 ===
    TrinketGrogFlask,
    TrinketEnergyCell,
    TrinketLuckyCoin,
    TrinketSmokeBomb,
    TrinketCaltrops,
    TrinketHourglass,
    TrinketPoisonVial,
    TrinketBuzzCharm,

    // === TrinketV2 ===
    TrinketV2Decoy,
    TrinketV2Alchemist,
    TrinketV2PoisonCloud,
    TrinketV2SpeedZone,
    TrinketV2Snare,
    TrinketV2DeckOfFate,
    TrinketV2Siphon,
    TrinketV2Gambit,

    // === TotemV1 ===
    TotemHealing,
    TotemWardingIdol,
    TotemWarBanner,
    TotemSpikeTrap,
    TotemPoisonMarsh,
    TotemGust,
    TotemRallyingDrum,
    TotemSpiritLink,

    // === TotemV2 ===
    TotemV2Golem,
    TotemV2Effigy,
    TotemV2Storm,
    TotemV2Quagmire,
    TotemV2Aura,
    TotemV2Beacon,
    TotemV2Lodestone,
    TotemV2Shrine,

    // === UltimateV1 ===
    UltimateEarthquake,
    UltimateRallyingCry,
    UltimateBerserk,
    UltimateJudgement,
    UltimateMassHeal,
    UltimateTerror,
    UltimateResurrect,
    UltimateBarrage,
    UltimateDecapitate,

    // === UltimateV2 ===
    UltimateV2MassTeleport,
    UltimateV2Cataclysm,
    UltimateV2Overclock,
    UltimateV2Bloodlust,
    UltimateV2Requiem,
    UltimateV2Martyr,
    UltimateV2Fortress,
    UltimateV2Purge,
    UltimateV2Vortex,

    // === PassiveUniqueV1 ===
    PassiveThickSkin,
    PassiveBloodthirst,
    PassiveGrogBrewer,
    PassiveLeadership,
    PassiveUnbreakable,
    PassiveScavenger,
    PassiveIronWill,
    PassiveHotBlooded,

    // === PassiveUniqueV2 ===
    PassiveV2Tracker,
    PassiveV2Vengeance,
    PassiveV2Underdog,
    PassiveV2Alpha,
    PassiveV2Momentum,
    PassiveV2Stoic,
    PassiveV2Hoarder,
    PassiveV2Shepherd,
}

impl RelicId {
    /// Category this identifier belongs to.
    #[must_use]
    pub const fn category(self) -> RelicCategory {
        match self {
            Self::BootsDash
            | Self::BootsBlink
            | Self::BootsCharge
            | Self::BootsSidestep
            | Self::BootsShoulderBash
            | Self::BootsGrapple
            | Self::BootsSwiftness
            | Self::BootsRetreat => RelicCategory::BootsV1,
            Self::BootsV2Skirmish
            | Self::BootsV2Phase
            | Self::BootsV2Switcheroo
            | Self::BootsV2Vault
            | Self::BootsV2Slipstream
            | Self::BootsV2Tether
            | Self::BootsV2Sprint
            | Self::BootsV2Stampede => RelicCategory::BootsV2,
            Self::GlovesPowerStrike
            | Self::GlovesJab
            | Self::GlovesCleave
            | Self::GlovesVampiric
            | Self::GlovesStunningBlow
            | Self::GlovesRendingClaw
            | Self::GlovesKnockout
            | Self::GlovesIronFist => RelicCategory::GlovesV1,
            Self::GlovesV2GrogPunch
            | Self::GlovesV2Chain
            | Self::GlovesV2Execute
            | Self::GlovesV2Riposte
            | Self::GlovesV2Sunder
            | Self::GlovesV2Rally
            | Self::GlovesV2MoraleBreaker
            | Self::GlovesV2Overdrive => RelicCategory::GlovesV2,
            Self::HatFocus
            | Self::HatWarCry
            | Self::HatMedic
            | Self::HatInspire
            | Self::HatLookout
            | Self::HatBrainstorm
            | Self::HatCaptainsOrders
            | Self::HatCalm => RelicCategory::HatV1,
            Self::HatV2Tactician
            | Self::HatV2Mastermind
            | Self::HatV2Beacon
            | Self::HatV2Overseer
            | Self::HatV2Scout
            | Self::HatV2Strategist
            | Self::HatV2Bolster
            | Self::HatV2Buzzkill => RelicCategory::HatV2,
            Self::CoatPlated
            | Self::CoatThorned
            | Self::CoatShielded
            | Self::CoatAnchored
            | Self::CoatEvasive
            | Self::CoatTaunting
            | Self::CoatRegenerative
            | Self::CoatGuardian => RelicCategory::CoatV1,
            Self::CoatV2Bulwark
            | Self::CoatV2Reflective
            | Self::CoatV2LastStand
            | Self::CoatV2Purifier
            | Self::CoatV2MoraleWard
            | Self::CoatV2Immovable
            | Self::CoatV2Provoker
            | Self::CoatV2Sanctuary => RelicCategory::CoatV2,
            Self::TrinketGrogFlask
            | Self::TrinketEnergyCell
            | Self::TrinketLuckyCoin
            | Self::TrinketSmokeBomb
            | Self::TrinketCaltrops
            | Self::TrinketHourglass
            | Self::TrinketPoisonVial
            | Self::TrinketBuzzCharm => RelicCategory::TrinketV1,
            Self::TrinketV2Decoy
            | Self::TrinketV2Alchemist
            | Self::TrinketV2PoisonCloud
            | Self::TrinketV2SpeedZone
            | Self::TrinketV2Snare
            | Self::TrinketV2DeckOfFate
            | Self::TrinketV2Siphon
            | Self::TrinketV2Gambit => RelicCategory::TrinketV2,
            Self::TotemHealing
            | Self::TotemWardingIdol
            | Self::TotemWarBanner
            | Self::TotemSpikeTrap
            | Self::TotemPoisonMarsh
            | Self::TotemGust
            | Self::TotemRallyingDrum
            | Self::TotemSpiritLink => RelicCategory::TotemV1,
            Self::TotemV2Golem
            | Self::TotemV2Effigy
            | Self::TotemV2Storm
            | Self::TotemV2Quagmire
            | Self::TotemV2Aura
            | Self::TotemV2Beacon
            | Self::TotemV2Lodestone
            | Self::TotemV2Shrine => RelicCategory::TotemV2,
            Self::UltimateEarthquake
            | Self::UltimateRallyingCry
            | Self::UltimateBerserk
            | Self::UltimateJudgement
            | Self::UltimateMassHeal
            | Self::UltimateTerror
            | Self::UltimateResurrect
            | Self::UltimateBarrage
            | Self::UltimateDecapitate => RelicCategory::UltimateV1,
            Self::UltimateV2MassTeleport
            | Self::UltimateV2Cataclysm
            | Self::UltimateV2Overclock
            | Self::UltimateV2Bloodlust
            | Self::UltimateV2Requiem
            | Self::UltimateV2Martyr
            | Self::UltimateV2Fortress
            | Self::UltimateV2Purge
            | Self::UltimateV2Vortex => RelicCategory::UltimateV2,
            Self::PassiveThickSkin
            | Self::PassiveBloodthirst
            | Self::PassiveGrogBrewer
            | Self::PassiveLeadership
            | Self::PassiveUnbreakable
            | Self::PassiveScavenger
            | Self::PassiveIronWill
            | Self::PassiveHotBlooded => RelicCategory::PassiveUniqueV1,
            Self::PassiveV2Tracker
            | Self::PassiveV2Vengeance
            | Self::PassiveV2Underdog
            | Self::PassiveV2Alpha
            | Self::PassiveV2Momentum
            | Self::PassiveV2Stoic
            | Self::PassiveV2Hoarder
            | Self::PassiveV2Shepherd => RelicCategory::PassiveUniqueV2,
        }
    }

    /// Variant name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Immutable parameters of one relic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelicDefinition {
    pub id: RelicId,
    pub category: RelicCategory,
    pub value1: f32,
    pub value2: f32,
    /// Turns an applied status lasts.
    pub duration: u32,
    /// Manhattan radius.
    pub tile_range: i32,
    pub targeting: TargetingMode,
}

impl RelicDefinition {
    /// Create a definition with zeroed parameters and self targeting.
    #[must_use]
    pub fn new(id: RelicId) -> Self {
        Self {
            id,
            category: id.category(),
            value1: 0.0,
            value2: 0.0,
            duration: 0,
            tile_range: 0,
            targeting: TargetingMode::SelfOnly,
        }
    }

    /// Set `value1` and `value2` (builder pattern).
    #[must_use]
    pub fn with_values(mut self, value1: f32, value2: f32) -> Self {
        self.value1 = value1;
        self.value2 = value2;
        self
    }

    /// Set duration (builder pattern).
    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Set tile range (builder pattern).
    #[must_use]
    pub fn with_tile_range(mut self, tile_range: i32) -> Self {
        self.tile_range = tile_range;
        self
    }

    /// Set targeting mode (builder pattern).
    #[must_use]
    pub fn with_targeting(mut self, targeting: TargetingMode) -> Self {
        self.targeting = targeting;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_category_has_relics() {
        for category in RelicCategory::iter() {
            let count = RelicId::iter().filter(|id| id.category() == category).count();
            assert!(count >= 8, "{category} has only {count} relics");
        }
    }

    #[test]
    fn test_category_family_and_generation() {
        assert_eq!(RelicId::BootsDash.category(), RelicCategory::BootsV1);
        assert_eq!(RelicId::GlovesV2GrogPunch.category(), RelicCategory::GlovesV2);
        assert_eq!(RelicCategory::PassiveUniqueV2.family(), RelicFamily::PassiveUnique);
        assert_eq!(RelicCategory::TotemV2.generation(), Generation::V2);
        assert_eq!(RelicCategory::HatV1.generation(), Generation::V1);
    }

    #[test]
    fn test_names_round_trip() {
        for id in RelicId::iter() {
            assert_eq!(RelicId::from_str(id.name()), Ok(id));
            assert_eq!(id.to_string(), id.name());
        }
        assert!(RelicId::from_str("BootsOfFlight").is_err());
    }

    #[test]
    fn test_v2_names_carry_generation() {
        for id in RelicId::iter() {
            let is_v2 = id.category().generation() == Generation::V2;
            assert_eq!(id.name().contains("V2"), is_v2, "{id}");
        }
    }

    #[test]
    fn test_definition_builder() {
        let def = RelicDefinition::new(RelicId::CoatPlated)
            .with_values(0.25, 0.0)
            .with_duration(2)
            .with_targeting(TargetingMode::SelfOnly);

        assert_eq!(def.category, RelicCategory::CoatV1);
        assert_eq!(def.duration, 2);
        assert_eq!(def.tile_range, 0);
    }
}
