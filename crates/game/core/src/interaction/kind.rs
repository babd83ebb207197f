use strum::EnumCount;

use super::payload::PayloadShape;

/// Every way something can touch a monster.
///
/// The collision pass picks exactly one interaction type per contact and
/// hands it to [`Monster::trigger`](crate::Monster::trigger).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionType {
    // Player melee
    Sword,
    SwordSpin,
    SwordStrafe,
    BiggoronSword,
    Shield,
    Shovel,
    /// Monster-held weapon clashing with a player-held one.
    Parry,

    // Player items and projectiles
    SwitchHook,
    Boomerang,
    Arrow,
    SwordBeam,
    RodFire,
    ThrownObject,
    BombExplosion,
    MineCart,
    Block,

    // Seeds
    EmberSeed,
    ScentSeed,
    PegasusSeed,
    GaleSeed,
    MysterySeed,

    // Environment
    Fire,
    Gale,
    Hole,
    Water,
    Lava,

    /// The player's body touching the monster.
    PlayerContact,
}

/// Coarse grouping of interaction types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum InteractionCategory {
    Melee,
    Item,
    Seed,
    Environment,
    Contact,
}

impl InteractionType {
    pub const COUNT: usize = <Self as EnumCount>::COUNT;

    /// Payload variant the collision pass always supplies for this type.
    pub const fn payload_shape(self) -> PayloadShape {
        match self {
            Self::Sword
            | Self::SwordSpin
            | Self::SwordStrafe
            | Self::BiggoronSword
            | Self::Shield
            | Self::Shovel => PayloadShape::Weapon,
            Self::Parry => PayloadShape::Parry,
            _ => PayloadShape::Plain,
        }
    }

    pub const fn category(self) -> InteractionCategory {
        match self {
            Self::Sword
            | Self::SwordSpin
            | Self::SwordStrafe
            | Self::BiggoronSword
            | Self::Shield
            | Self::Shovel
            | Self::Parry => InteractionCategory::Melee,
            Self::SwitchHook
            | Self::Boomerang
            | Self::Arrow
            | Self::SwordBeam
            | Self::RodFire
            | Self::ThrownObject
            | Self::BombExplosion
            | Self::MineCart
            | Self::Block => InteractionCategory::Item,
            Self::EmberSeed
            | Self::ScentSeed
            | Self::PegasusSeed
            | Self::GaleSeed
            | Self::MysterySeed => InteractionCategory::Seed,
            Self::Fire | Self::Gale | Self::Hole | Self::Water | Self::Lava => {
                InteractionCategory::Environment
            }
            Self::PlayerContact => InteractionCategory::Contact,
        }
    }

    /// Dense index used by the dispatcher table.
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn indices_are_dense() {
        for (position, kind) in InteractionType::iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
        assert_eq!(InteractionType::iter().count(), InteractionType::COUNT);
    }

    #[test]
    fn only_melee_weapons_carry_weapon_payloads() {
        for kind in InteractionType::iter() {
            let shape = kind.payload_shape();
            if shape == PayloadShape::Weapon {
                assert_eq!(kind.category(), InteractionCategory::Melee, "{kind}");
            }
        }
        assert_eq!(InteractionType::Parry.payload_shape(), PayloadShape::Parry);
        assert_eq!(InteractionType::Arrow.payload_shape(), PayloadShape::Plain);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(InteractionType::SwordSpin.to_string(), "sword_spin");
        assert_eq!(
            "ember_seed".parse::<InteractionType>(),
            Ok(InteractionType::EmberSeed)
        );
    }
}
