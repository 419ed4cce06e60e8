//! Battle and engine configuration.
//!
//! ## BattleConfig
//!
//! Describes the battlefield a `BattleState` is built from: grid
//! dimensions, the neutral column separating the two halves, extra blocked
//! cells, the default buzz cap and the RNG seed.
//!
//! ## EngineConfig
//!
//! Dispatcher policy knobs that are not part of any single relic.
//!
//! Both are plain serde types so scenarios can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::grid::GridPos;

/// Battlefield description.
///
/// ```
/// use relic_engine::core::BattleConfig;
///
/// let config = BattleConfig::new(9, 5)
///     .with_neutral_column(4)
///     .with_seed(99);
///
/// assert_eq!(config.width, 9);
/// assert_eq!(config.neutral_column, Some(4));
/// assert_eq!(config.seed, 99);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    pub width: i32,
    pub height: i32,
    /// Column of neutral ground no unit may stand on.
    #[serde(default)]
    pub neutral_column: Option<i32>,
    /// Impassable cells.
    #[serde(default)]
    pub blocked: Vec<GridPos>,
    /// Buzz cap given to spawned units that don't set their own.
    #[serde(default = "default_max_buzz")]
    pub default_max_buzz: i32,
    #[serde(default)]
    pub seed: u64,
}

fn default_max_buzz() -> i32 {
    10
}

impl BattleConfig {
    /// Create a config for a `width` x `height` grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0, "Grid width must be positive");
        assert!(height > 0, "Grid height must be positive");

        Self {
            width,
            height,
            neutral_column: None,
            blocked: Vec::new(),
            default_max_buzz: default_max_buzz(),
            seed: 0,
        }
    }

    /// Set the neutral column (builder pattern).
    #[must_use]
    pub fn with_neutral_column(mut self, x: i32) -> Self {
        self.neutral_column = Some(x);
        self
    }

    /// Add a blocked cell (builder pattern).
    #[must_use]
    pub fn with_blocked(mut self, pos: GridPos) -> Self {
        self.blocked.push(pos);
        self
    }

    /// Set the default buzz cap (builder pattern).
    #[must_use]
    pub fn with_default_max_buzz(mut self, max_buzz: i32) -> Self {
        self.default_max_buzz = max_buzz.max(0);
        self
    }

    /// Set the RNG seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new(8, 6)
    }
}

/// Dispatcher policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Resolve an omitted target to the nearest enemy for relics that
    /// target enemies automatically.
    #[serde(default = "default_true")]
    pub auto_target: bool,
    /// Floor applied to every status duration the engine creates.
    #[serde(default = "default_min_duration")]
    pub min_status_duration: u32,
}

fn default_true() -> bool {
    true
}

fn default_min_duration() -> u32 {
    1
}

impl EngineConfig {
    /// Disable nearest-enemy auto-targeting (builder pattern).
    #[must_use]
    pub fn without_auto_target(mut self) -> Self {
        self.auto_target = false;
        self
    }

    /// Set the status duration floor; values below 1 are raised to 1.
    #[must_use]
    pub fn with_min_status_duration(mut self, turns: u32) -> Self {
        self.min_status_duration = turns.max(1);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_target: default_true(),
            min_status_duration: default_min_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_config_builder() {
        let config = BattleConfig::new(7, 4)
            .with_neutral_column(3)
            .with_blocked(GridPos::new(0, 0))
            .with_default_max_buzz(6);

        assert_eq!(config.height, 4);
        assert_eq!(config.blocked, vec![GridPos::new(0, 0)]);
        assert_eq!(config.default_max_buzz, 6);
    }

    #[test]
    #[should_panic(expected = "Grid width must be positive")]
    fn test_battle_config_rejects_empty_grid() {
        let _ = BattleConfig::new(0, 3);
    }

    #[test]
    fn test_battle_config_json_defaults() {
        let config: BattleConfig = serde_json::from_str(r#"{"width": 5, "height": 3}"#).unwrap();
        assert_eq!(config.neutral_column, None);
        assert_eq!(config.default_max_buzz, 10);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert!(config.auto_target);
        assert_eq!(config.min_status_duration, 1);

        let parsed: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_min_duration_floor() {
        let config = EngineConfig::default().with_min_status_duration(0);
        assert_eq!(config.min_status_duration, 1);
        assert!(!config.without_auto_target().auto_target);
    }
}
