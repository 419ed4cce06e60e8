//! Relic catalog: definition lookup by identifier.
//!
//! `RelicCatalog::standard()` carries the built-in balancing values. Loaded
//! data can either replace the catalog (`from_json`) or re-balance selected
//! relics on top of it (`with_overrides_json`).
//!
//! ## Override format
//!
//! ```json
//! { "GlovesPowerStrike": { "value1": 0.75 }, "CoatPlated": { "duration": 3 } }
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::definition::{RelicCategory, RelicDefinition, RelicId, TargetingMode};

/// Error loading catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("malformed catalog data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown relic identifier `{0}`")]
    UnknownRelic(String),

    #[error("relic {0} defined twice")]
    Duplicate(RelicId),

    #[error("relic {id} declared in {declared}, expected {expected}")]
    CategoryMismatch {
        id: RelicId,
        declared: RelicCategory,
        expected: RelicCategory,
    },
}

/// Partial re-balance of one relic. Absent fields keep their value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelicOverride {
    pub value1: Option<f32>,
    pub value2: Option<f32>,
    pub duration: Option<u32>,
    pub tile_range: Option<i32>,
    pub targeting: Option<TargetingMode>,
}

impl RelicOverride {
    fn apply(self, def: &mut RelicDefinition) {
        if let Some(v) = self.value1 {
            def.value1 = v;
        }
        if let Some(v) = self.value2 {
            def.value2 = v;
        }
        if let Some(d) = self.duration {
            def.duration = d;
        }
        if let Some(r) = self.tile_range {
            def.tile_range = r;
        }
        if let Some(t) = self.targeting {
            def.targeting = t;
        }
    }
}

/// Registry of relic definitions.
///
/// ## Example
///
/// ```
/// use relic_engine::relics::{RelicCatalog, RelicId};
///
/// let catalog = RelicCatalog::standard()
///     .with_overrides_json(r#"{ "GlovesPowerStrike": { "value1": 0.75 } }"#)
///     .unwrap();
///
/// let strike = catalog.get(RelicId::GlovesPowerStrike).unwrap();
/// assert_eq!(strike.value1, 0.75);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RelicCatalog {
    definitions: FxHashMap<RelicId, RelicDefinition>,
}

impl RelicCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog: one definition per identifier.
    #[must_use]
    pub fn standard() -> Self {
        use RelicId::*;
        use TargetingMode::*;

        let entries = [
            // BootsV1
            entry(BootsDash, 0.0, 0.0, 0, 3, SelfOnly),
            entry(BootsBlink, 0.0, 0.0, 0, 0, SelfOnly),
            entry(BootsCharge, 0.0, 0.0, 0, 0, NearestEnemy),
            entry(BootsSidestep, 0.25, 0.0, 1, 1, SelfOnly),
            entry(BootsShoulderBash, 2.0, 1.0, 0, 0, NearestEnemy),
            entry(BootsGrapple, 2.0, 0.0, 0, 0, NearestEnemy),
            entry(BootsSwiftness, 1.0, 0.0, 2, 0, SelfOnly),
            entry(BootsRetreat, 3.0, 0.0, 0, 2, SelfOnly),
            // BootsV2
            entry(BootsV2Skirmish, 0.0, 0.0, 0, 0, NearestEnemy),
            entry(BootsV2Phase, 0.0, 0.0, 1, 0, SelfOnly),
            entry(BootsV2Switcheroo, 0.0, 0.0, 0, 0, SelfOnly),
            entry(BootsV2Vault, 0.25, 0.0, 0, 0, NearestEnemy),
            entry(BootsV2Slipstream, 1.0, 0.0, 2, 1, SelfOnly),
            entry(BootsV2Tether, 0.0, 0.0, 0, 0, Explicit),
            entry(BootsV2Sprint, 2.0, 1.0, 1, 0, SelfOnly),
            entry(BootsV2Stampede, 1.0, 0.0, 0, 1, SelfOnly),
            // GlovesV1
            entry(GlovesPowerStrike, 0.5, 0.0, 0, 0, NearestEnemy),
            entry(GlovesJab, 3.0, 0.0, 0, 0, NearestEnemy),
            entry(GlovesCleave, 0.0, 0.0, 0, 1, SelfOnly),
            entry(GlovesVampiric, 3.0, 0.0, 0, 0, NearestEnemy),
            entry(GlovesStunningBlow, 0.0, 0.0, 1, 0, NearestEnemy),
            entry(GlovesRendingClaw, 2.0, 0.0, 3, 0, NearestEnemy),
            entry(GlovesKnockout, 2.0, 1.0, 0, 0, NearestEnemy),
            entry(GlovesIronFist, 2.0, 0.0, 2, 0, SelfOnly),
            // GlovesV2
            entry(GlovesV2GrogPunch, 1.0, 2.0, 0, 0, NearestEnemy),
            entry(GlovesV2Chain, -0.5, 0.0, 0, 2, NearestEnemy),
            entry(GlovesV2Execute, 1.0, 0.3, 0, 0, NearestEnemy),
            entry(GlovesV2Riposte, 0.5, 0.0, 2, 0, SelfOnly),
            entry(GlovesV2Sunder, 0.0, 0.0, 0, 0, NearestEnemy),
            entry(GlovesV2Rally, 2.0, 0.0, 0, 2, NearestEnemy),
            entry(GlovesV2MoraleBreaker, 3.0, 0.0, 0, 0, NearestEnemy),
            entry(GlovesV2Overdrive, 0.75, 2.0, 0, 0, NearestEnemy),
            // HatV1
            entry(HatFocus, 0.2, 0.0, 2, 0, SelfOnly),
            entry(HatWarCry, 2.0, 0.0, 2, 2, SelfOnly),
            entry(HatMedic, 5.0, 0.0, 0, 0, SelfOnly),
            entry(HatInspire, 1.0, 0.0, 2, 0, SelfOnly),
            entry(HatLookout, 1.0, 0.0, 2, 0, SelfOnly),
            entry(HatBrainstorm, 2.0, 0.0, 0, 0, SelfOnly),
            entry(HatCaptainsOrders, 1.0, 2.0, 0, 0, SelfOnly),
            entry(HatCalm, 3.0, 0.0, 0, 0, SelfOnly),
            // HatV2
            entry(HatV2Tactician, 0.0, 0.0, 0, 0, SelfOnly),
            entry(HatV2Mastermind, 6.0, 0.0, 0, 0, SelfOnly),
            entry(HatV2Beacon, 5.0, 0.0, 2, 0, SelfOnly),
            entry(HatV2Overseer, 0.0, 0.0, 2, 0, SelfOnly),
            entry(HatV2Scout, 0.2, 0.0, 2, 0, SelfOnly),
            entry(HatV2Strategist, 0.0, 0.0, 0, 0, SelfOnly),
            entry(HatV2Bolster, 2.0, 0.0, 2, 0, SelfOnly),
            entry(HatV2Buzzkill, 3.0, 0.0, 0, 0, NearestEnemy),
            // CoatV1
            entry(CoatPlated, 0.25, 0.0, 2, 0, SelfOnly),
            entry(CoatThorned, 2.0, 0.0, 2, 0, SelfOnly),
            entry(CoatShielded, 5.0, 0.0, 2, 0, SelfOnly),
            entry(CoatAnchored, 0.0, 0.0, 2, 0, SelfOnly),
            entry(CoatEvasive, 0.3, 0.0, 1, 0, SelfOnly),
            entry(CoatTaunting, 0.2, 0.0, 1, 0, SelfOnly),
            entry(CoatRegenerative, 2.0, 0.0, 3, 0, SelfOnly),
            entry(CoatGuardian, 0.15, 0.0, 2, 1, SelfOnly),
            // CoatV2
            entry(CoatV2Bulwark, 0.2, 0.0, 2, 1, SelfOnly),
            entry(CoatV2Reflective, 0.3, 0.0, 2, 0, SelfOnly),
            entry(CoatV2LastStand, 0.3, 0.25, 2, 0, SelfOnly),
            entry(CoatV2Purifier, 0.0, 0.0, 0, 2, SelfOnly),
            entry(CoatV2MoraleWard, 3.0, 0.0, 2, 0, SelfOnly),
            entry(CoatV2Immovable, 2.0, 0.0, 2, 0, SelfOnly),
            entry(CoatV2Provoker, 0.0, 0.0, 1, 2, SelfOnly),
            entry(CoatV2Sanctuary, 3.0, 0.0, 2, 1, SelfOnly),
            // TrinketV1
            entry(TrinketGrogFlask, 2.0, 0.0, 0, 0, SelfOnly),
            entry(TrinketEnergyCell, 1.0, 0.0, 0, 0, SelfOnly),
            entry(TrinketLuckyCoin, 0.2, 0.0, 2, 0, SelfOnly),
            entry(TrinketSmokeBomb, 0.3, 0.0, 1, 1, SelfOnly),
            entry(TrinketCaltrops, 3.0, 0.0, 3, 0, SelfOnly),
            entry(TrinketHourglass, 1.0, 0.0, 1, 0, SelfOnly),
            entry(TrinketPoisonVial, 2.0, 0.0, 3, 0, NearestEnemy),
            entry(TrinketBuzzCharm, 3.0, 0.0, 0, 0, SelfOnly),
            // TrinketV2
            entry(TrinketV2Decoy, 0.0, 0.0, 2, 1, SelfOnly),
            entry(TrinketV2Alchemist, 2.0, 1.0, 0, 0, SelfOnly),
            entry(TrinketV2PoisonCloud, 2.0, 0.0, 2, 1, SelfOnly),
            entry(TrinketV2SpeedZone, 1.0, 0.0, 2, 1, SelfOnly),
            entry(TrinketV2Snare, 3.0, 0.0, 1, 0, NearestEnemy),
            entry(TrinketV2DeckOfFate, 2.0, 0.0, 0, 0, SelfOnly),
            entry(TrinketV2Siphon, 3.0, 1.0, 0, 0, NearestEnemy),
            entry(TrinketV2Gambit, 2.0, 2.0, 0, 0, SelfOnly),
            // TotemV1
            entry(TotemHealing, 3.0, 0.0, 3, 1, SelfOnly),
            entry(TotemWardingIdol, 0.0, 0.0, 3, 1, SelfOnly),
            entry(TotemWarBanner, 0.0, 0.0, 3, 1, SelfOnly),
            entry(TotemSpikeTrap, 4.0, 0.0, 3, 0, SelfOnly),
            entry(TotemPoisonMarsh, 2.0, 0.0, 3, 0, SelfOnly),
            entry(TotemGust, 1.0, 0.0, 0, 2, SelfOnly),
            entry(TotemRallyingDrum, 2.0, 0.0, 0, 2, SelfOnly),
            entry(TotemSpiritLink, 1.0, 0.0, 2, 2, SelfOnly),
            // TotemV2
            entry(TotemV2Golem, 0.0, 0.0, 0, 1, SelfOnly),
            entry(TotemV2Effigy, 0.0, 0.0, 0, 1, SelfOnly),
            entry(TotemV2Storm, 3.0, 0.0, 0, 1, SelfOnly),
            entry(TotemV2Quagmire, 1.0, 0.0, 2, 1, SelfOnly),
            entry(TotemV2Aura, 0.15, 0.0, 2, 2, SelfOnly),
            entry(TotemV2Beacon, 1.0, 0.0, 2, 2, SelfOnly),
            entry(TotemV2Lodestone, 1.0, 0.0, 0, 3, SelfOnly),
            entry(TotemV2Shrine, 2.0, 0.0, 2, 1, SelfOnly),
            // UltimateV1
            entry(UltimateEarthquake, 4.0, 0.0, 1, 2, SelfOnly),
            entry(UltimateRallyingCry, 3.0, 2.0, 2, 0, SelfOnly),
            entry(UltimateBerserk, 0.5, 1.0, 2, 0, SelfOnly),
            entry(UltimateJudgement, 1.0, 0.0, 1, 0, NearestEnemy),
            entry(UltimateMassHeal, 6.0, 0.0, 0, 0, SelfOnly),
            entry(UltimateTerror, 4.0, 0.0, 1, 0, SelfOnly),
            entry(UltimateResurrect, 0.5, 0.0, 0, 1, SelfOnly),
            entry(UltimateBarrage, 0.0, 0.0, 0, 0, SelfOnly),
            entry(UltimateDecapitate, 1.0, 0.0, 0, 0, SelfOnly),
            // UltimateV2
            entry(UltimateV2MassTeleport, 0.0, 0.0, 0, 0, SelfOnly),
            entry(UltimateV2Cataclysm, 6.0, 0.0, 0, 2, SelfOnly),
            entry(UltimateV2Overclock, 2.0, 2.0, 0, 0, SelfOnly),
            entry(UltimateV2Bloodlust, 1.0, 0.0, 0, 0, SelfOnly),
            entry(UltimateV2Requiem, 2.0, 0.0, 0, 0, SelfOnly),
            entry(UltimateV2Martyr, 5.0, 4.0, 0, 0, SelfOnly),
            entry(UltimateV2Fortress, 0.3, 0.0, 2, 0, SelfOnly),
            entry(UltimateV2Purge, 0.0, 0.0, 0, 0, SelfOnly),
            entry(UltimateV2Vortex, 2.0, 0.0, 0, 3, SelfOnly),
            // PassiveUniqueV1
            entry(PassiveThickSkin, 0.1, 0.0, 1, 0, SelfOnly),
            entry(PassiveBloodthirst, 0.2, 0.0, 1, 0, SelfOnly),
            entry(PassiveGrogBrewer, 1.0, 0.0, 0, 0, SelfOnly),
            entry(PassiveLeadership, 1.0, 0.0, 1, 2, SelfOnly),
            entry(PassiveUnbreakable, 2.0, 0.0, 1, 0, SelfOnly),
            entry(PassiveScavenger, 1.0, 0.0, 0, 0, SelfOnly),
            entry(PassiveIronWill, 0.0, 0.0, 1, 0, SelfOnly),
            entry(PassiveHotBlooded, 1.0, 0.0, 1, 0, SelfOnly),
            // PassiveUniqueV2
            entry(PassiveV2Tracker, 0.0, 0.0, 0, 0, SelfOnly),
            entry(PassiveV2Vengeance, 0.3, 0.5, 1, 0, SelfOnly),
            entry(PassiveV2Underdog, 0.25, 0.0, 1, 0, SelfOnly),
            entry(PassiveV2Alpha, 1.0, 0.0, 1, 2, SelfOnly),
            entry(PassiveV2Momentum, 0.0, 0.0, 0, 0, SelfOnly),
            entry(PassiveV2Stoic, 2.0, 0.0, 1, 0, SelfOnly),
            entry(PassiveV2Hoarder, 3.0, 1.0, 0, 0, SelfOnly),
            entry(PassiveV2Shepherd, 2.0, 0.0, 0, 0, SelfOnly),
        ];

        let mut catalog = Self::new();
        for def in entries {
            catalog.insert(def);
        }
        catalog
    }

    /// Load a full catalog from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<RelicDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for def in definitions {
            let expected = def.id.category();
            if def.category != expected {
                return Err(CatalogError::CategoryMismatch {
                    id: def.id,
                    declared: def.category,
                    expected,
                });
            }
            if catalog.insert(def).is_some() {
                return Err(CatalogError::Duplicate(def.id));
            }
        }
        debug!(relics = catalog.len(), "loaded relic catalog");
        Ok(catalog)
    }

    /// Re-balance relics from a JSON object keyed by identifier.
    ///
    /// Overrides for identifiers missing from this catalog add a fresh
    /// definition built from the override alone.
    pub fn with_overrides_json(mut self, json: &str) -> Result<Self, CatalogError> {
        let overrides: BTreeMap<String, RelicOverride> = serde_json::from_str(json)?;
        for (name, patch) in overrides {
            let id = RelicId::from_str(&name).map_err(|_| CatalogError::UnknownRelic(name))?;
            let def = self
                .definitions
                .entry(id)
                .or_insert_with(|| RelicDefinition::new(id));
            patch.apply(def);
            debug!(relic = %id, "applied relic override");
        }
        Ok(self)
    }

    /// Serialize all definitions as a JSON array, ordered by identifier.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by_key(|d| d.id);
        Ok(serde_json::to_string_pretty(&defs)?)
    }

    /// Add or replace a definition, returning the previous one.
    pub fn insert(&mut self, def: RelicDefinition) -> Option<RelicDefinition> {
        self.definitions.insert(def.id, def)
    }

    /// Definition by identifier.
    #[must_use]
    pub fn get(&self, id: RelicId) -> Option<&RelicDefinition> {
        self.definitions.get(&id)
    }

    /// Check if an identifier is defined.
    #[must_use]
    pub fn contains(&self, id: RelicId) -> bool {
        self.definitions.contains_key(&id)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &RelicDefinition> {
        self.definitions.values()
    }

    /// Definitions in `category`, ordered by identifier.
    #[must_use]
    pub fn by_category(&self, category: RelicCategory) -> Vec<&RelicDefinition> {
        let mut defs: Vec<_> = self
            .definitions
            .values()
            .filter(|d| d.category == category)
            .collect();
        defs.sort_by_key(|d| d.id);
        defs
    }
}

fn entry(
    id: RelicId,
    value1: f32,
    value2: f32,
    duration: u32,
    tile_range: i32,
    targeting: TargetingMode,
) -> RelicDefinition {
    RelicDefinition::new(id)
        .with_values(value1, value2)
        .with_duration(duration)
        .with_tile_range(tile_range)
        .with_targeting(targeting)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_standard_covers_every_identifier() {
        let catalog = RelicCatalog::standard();
        assert_eq!(catalog.len(), RelicId::COUNT);
        for id in RelicId::iter() {
            let def = catalog.get(id).unwrap();
            assert_eq!(def.category, id.category());
        }
    }

    #[test]
    fn test_by_category_is_ordered() {
        let catalog = RelicCatalog::standard();
        let boots: Vec<_> = catalog
            .by_category(RelicCategory::BootsV1)
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(boots.len(), 8);
        assert_eq!(boots[0], RelicId::BootsDash);
    }

    #[test]
    fn test_override_changes_only_named_fields() {
        let catalog = RelicCatalog::standard()
            .with_overrides_json(r#"{ "CoatPlated": { "duration": 5 } }"#)
            .unwrap();
        let plated = catalog.get(RelicId::CoatPlated).unwrap();
        assert_eq!(plated.duration, 5);
        assert_eq!(plated.value1, 0.25);
    }

    #[test]
    fn test_override_unknown_identifier() {
        let err = RelicCatalog::standard()
            .with_overrides_json(r#"{ "CoatOfMany": { "value1": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownRelic(name) if name == "CoatOfMany"));
    }

    #[test]
    fn test_override_rejects_unknown_field() {
        let err = RelicCatalog::standard()
            .with_overrides_json(r#"{ "CoatPlated": { "armor": 1 } }"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_json_round_trip_of_standard() {
        let standard = RelicCatalog::standard();
        let json = standard.to_json().unwrap();
        let loaded = RelicCatalog::from_json(&json).unwrap();

        assert_eq!(loaded.len(), standard.len());
        assert_eq!(
            loaded.get(RelicId::GlovesV2GrogPunch),
            standard.get(RelicId::GlovesV2GrogPunch)
        );
    }

    #[test]
    fn test_from_json_rejects_duplicates_and_mismatches() {
        let def = RelicDefinition::new(RelicId::HatFocus);
        let dup = serde_json::to_string(&vec![def, def]).unwrap();
        assert!(matches!(
            RelicCatalog::from_json(&dup),
            Err(CatalogError::Duplicate(RelicId::HatFocus))
        ));

        let mut wrong = def;
        wrong.category = RelicCategory::CoatV2;
        let json = serde_json::to_string(&vec![wrong]).unwrap();
        assert!(matches!(
            RelicCatalog::from_json(&json),
            Err(CatalogError::CategoryMismatch { .. })
        ));
    }
}
