use crate::entity::EntityId;
use crate::geometry::Vec2;

/// Discriminant of [`Payload`], used to check reactions against the
/// interaction type they are registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayloadShape {
    Plain,
    Weapon,
    Parry,
}

/// Upgrade level of a player weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponLevel {
    L1,
    L2,
    L3,
}

/// Item the player swung.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponItem {
    Sword,
    BiggoronSword,
    Shield,
    Shovel,
}

/// Physical tool entity that made contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolKind {
    Sword,
    BiggoronSword,
    Shield,
    Shovel,
    /// Blade or spear held by a monster.
    MonsterWeapon,
    MonsterShield,
}

/// A tool entity and where it was when contact happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolRef {
    pub owner: EntityId,
    pub kind: ToolKind,
    pub position: Vec2,
}

/// Data accompanying an interaction.
///
/// Which variant arrives is fixed by the interaction type, see
/// [`InteractionType::payload_shape`](super::InteractionType::payload_shape).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Payload {
    Plain {
        contact_point: Vec2,
    },
    Weapon {
        weapon: WeaponItem,
        tool: ToolRef,
        level: WeaponLevel,
    },
    Parry {
        monster_tool: ToolRef,
        sender_tool: ToolRef,
    },
}

impl Payload {
    pub const fn plain(contact_point: Vec2) -> Self {
        Self::Plain { contact_point }
    }

    pub const fn shape(&self) -> PayloadShape {
        match self {
            Self::Plain { .. } => PayloadShape::Plain,
            Self::Weapon { .. } => PayloadShape::Weapon,
            Self::Parry { .. } => PayloadShape::Parry,
        }
    }

    /// Best estimate of where the contact happened.
    pub fn contact_point(&self) -> Vec2 {
        match self {
            Self::Plain { contact_point } => *contact_point,
            Self::Weapon { tool, .. } => tool.position,
            Self::Parry {
                monster_tool,
                sender_tool,
            } => (monster_tool.position + sender_tool.position) * 0.5,
        }
    }

    pub const fn weapon_level(&self) -> Option<WeaponLevel> {
        match self {
            Self::Weapon { level, .. } => Some(*level),
            _ => None,
        }
    }
}
