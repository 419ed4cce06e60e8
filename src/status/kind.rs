//! Status effect kinds.
//!
//! Each kind is classified as a buff or a debuff and declares what its
//! magnitude means: nothing, a whole number, or a fraction.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

/// How a status kind interprets its magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MagnitudeKind {
    /// Presence only.
    None,
    /// Whole-number amount (flat damage, tiles, points).
    Int,
    /// Fraction (0.25 = 25%).
    Float,
}

/// Every status effect the engine can request.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, EnumCount,
    Serialize, Deserialize,
)]
pub enum StatusKind {
    // === Buffs ===
    DamageReduction,
    Dodge,
    Shield,
    Taunt,
    Thorns,
    AttackUp,
    AttackUpPercent,
    Haste,
    Regeneration,
    MoraleShield,
    KnockbackImmunity,
    Stealth,
    Fortified,
    Counter,
    Lifesteal,
    Berserk,
    Inspire,
    ExtraAction,
    RangeUp,
    CritChance,
    CritDamage,
    BuzzRegen,
    Undying,
    Reflect,
    Guarded,
    DebuffImmunity,
    Focus,
    AuraDamageReduction,
    AuraAttackUp,
    AuraRegeneration,

    // === Debuffs ===
    Stun,
    Poison,
    Bleed,
    Burn,
    Slow,
    Root,
    Silence,
    Weakened,
    Exposed,
    Marked,
    GritDown,
    Fear,
    Confused,
    Blind,
    Frozen,
    BuzzLock,
    HealingBlock,
    Provoked,
    MoraleDecay,
    Disarmed,
}

impl StatusKind {
    /// True for harmful kinds.
    #[must_use]
    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            Self::Stun
                | Self::Poison
                | Self::Bleed
                | Self::Burn
                | Self::Slow
                | Self::Root
                | Self::Silence
                | Self::Weakened
                | Self::Exposed
                | Self::Marked
                | Self::GritDown
                | Self::Fear
                | Self::Confused
                | Self::Blind
                | Self::Frozen
                | Self::BuzzLock
                | Self::HealingBlock
                | Self::Provoked
                | Self::MoraleDecay
                | Self::Disarmed
        )
    }

    /// True for beneficial kinds.
    #[must_use]
    pub const fn is_buff(self) -> bool {
        !self.is_debuff()
    }

    /// What the magnitude of this kind means.
    #[must_use]
    pub const fn magnitude_kind(self) -> MagnitudeKind {
        match self {
            Self::DamageReduction
            | Self::Dodge
            | Self::AttackUpPercent
            | Self::Counter
            | Self::Lifesteal
            | Self::Berserk
            | Self::CritChance
            | Self::CritDamage
            | Self::Reflect
            | Self::Focus
            | Self::AuraDamageReduction
            | Self::Exposed
            | Self::Blind => MagnitudeKind::Float,

            Self::Shield
            | Self::Thorns
            | Self::AttackUp
            | Self::Haste
            | Self::Regeneration
            | Self::MoraleShield
            | Self::Fortified
            | Self::Inspire
            | Self::ExtraAction
            | Self::RangeUp
            | Self::BuzzRegen
            | Self::AuraAttackUp
            | Self::AuraRegeneration
            | Self::Poison
            | Self::Bleed
            | Self::Burn
            | Self::Slow
            | Self::Weakened
            | Self::GritDown
            | Self::MoraleDecay => MagnitudeKind::Int,

            Self::Taunt
            | Self::KnockbackImmunity
            | Self::Stealth
            | Self::Undying
            | Self::Guarded
            | Self::DebuffImmunity
            | Self::Stun
            | Self::Root
            | Self::Silence
            | Self::Marked
            | Self::Fear
            | Self::Confused
            | Self::Frozen
            | Self::BuzzLock
            | Self::HealingBlock
            | Self::Provoked
            | Self::Disarmed => MagnitudeKind::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_fifty_kinds() {
        assert_eq!(StatusKind::COUNT, 50);
    }

    #[test]
    fn test_buff_debuff_partition() {
        let debuffs = StatusKind::iter().filter(|k| k.is_debuff()).count();
        let buffs = StatusKind::iter().filter(|k| k.is_buff()).count();
        assert_eq!(debuffs, 20);
        assert_eq!(buffs, 30);
    }

    #[test]
    fn test_magnitude_kinds() {
        assert_eq!(StatusKind::DamageReduction.magnitude_kind(), MagnitudeKind::Float);
        assert_eq!(StatusKind::Poison.magnitude_kind(), MagnitudeKind::Int);
        assert_eq!(StatusKind::Stun.magnitude_kind(), MagnitudeKind::None);
    }

    #[test]
    fn test_parse_by_name() {
        assert_eq!(StatusKind::from_str("Haste"), Ok(StatusKind::Haste));
        assert!(StatusKind::from_str("Sleepy").is_err());
    }
}
