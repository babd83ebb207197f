//! Reactions as data.
//!
//! Templates describe their reaction tables with [`ReactionSpec`] values that
//! compile into [`Reaction`]s when a monster is built. The default table every
//! monster starts from is expressed the same way.

use crate::env::EffectKind;
use crate::script::Phase;

use super::kind::InteractionType;
use super::reaction::Reaction;
use super::{reactions, sender_reactions};

/// What happens to the monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubjectReaction {
    Kill,
    SoftKill,
    Damage(u32),
    SilentDamage(u32),
    /// Damage picked by weapon level 1, 2 and 3.
    DamageByLevel(u32, u32, u32),
    Bump,
    Parry,
    ParryWithClingEffect,
    Burn(u32),
    Stun,
    Gale,
    SwitchHook,
    Electrocute,
    MysterySeed,
    ContactEffect(EffectKind),
    BeginPhase(Phase),
}

/// What happens to the sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SenderReaction {
    Destroy,
    Intercept,
    Deflect,
    Bump,
    Damage(u32),
    Kill,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionSpec {
    Subject(SubjectReaction),
    Sender(SenderReaction),
    /// Runs `then` while the monster's script is in `phase`, `otherwise`
    /// the rest of the time.
    InPhase {
        phase: Phase,
        then: Vec<ReactionSpec>,
        #[cfg_attr(feature = "serde", serde(default))]
        otherwise: Vec<ReactionSpec>,
    },
}

impl ReactionSpec {
    pub fn compile(&self) -> Reaction {
        match self {
            Self::Subject(subject) => match *subject {
                SubjectReaction::Kill => reactions::kill(),
                SubjectReaction::SoftKill => reactions::soft_kill(),
                SubjectReaction::Damage(amount) => reactions::damage(amount),
                SubjectReaction::SilentDamage(amount) => reactions::silent_damage(amount),
                SubjectReaction::DamageByLevel(l1, l2, l3) => reactions::damage_by_level(l1, l2, l3),
                SubjectReaction::Bump => reactions::bump(),
                SubjectReaction::Parry => reactions::parry(),
                SubjectReaction::ParryWithClingEffect => reactions::parry_with_cling_effect(),
                SubjectReaction::Burn(amount) => reactions::burn(amount),
                SubjectReaction::Stun => reactions::stun(),
                SubjectReaction::Gale => reactions::gale(),
                SubjectReaction::SwitchHook => reactions::switch_hook(),
                SubjectReaction::Electrocute => reactions::electrocute(),
                SubjectReaction::MysterySeed => reactions::mystery_seed(),
                SubjectReaction::ContactEffect(effect) => reactions::contact_effect(effect),
                SubjectReaction::BeginPhase(phase) => reactions::begin_phase(phase),
            },
            Self::Sender(sender) => match *sender {
                SenderReaction::Destroy => sender_reactions::destroy(),
                SenderReaction::Intercept => sender_reactions::intercept(),
                SenderReaction::Deflect => sender_reactions::deflect(),
                SenderReaction::Bump => sender_reactions::bump(),
                SenderReaction::Damage(amount) => sender_reactions::damage(amount),
                SenderReaction::Kill => sender_reactions::kill(),
            },
            Self::InPhase {
                phase,
                then,
                otherwise,
            } => reactions::in_phase(
                *phase,
                then.iter().map(Self::compile).collect(),
                otherwise.iter().map(Self::compile).collect(),
            ),
        }
    }

    /// Every phase this spec refers to, including nested branches.
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = Vec::new();
        self.collect_phases(&mut phases);
        phases
    }

    fn collect_phases(&self, out: &mut Vec<Phase>) {
        match self {
            Self::Subject(SubjectReaction::BeginPhase(phase)) => out.push(*phase),
            Self::InPhase {
                phase,
                then,
                otherwise,
            } => {
                out.push(*phase);
                for spec in then.iter().chain(otherwise) {
                    spec.collect_phases(out);
                }
            }
            _ => {}
        }
    }
}

/// How an override combines with the chain already registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainMode {
    /// Replace the chain.
    #[default]
    Set,
    /// Append to the chain.
    Add,
}

/// A template's change to one interaction type's chain.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionOverride {
    pub interaction: InteractionType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: ChainMode,
    pub reactions: Vec<ReactionSpec>,
}

impl ReactionOverride {
    pub fn set(interaction: InteractionType, reactions: Vec<ReactionSpec>) -> Self {
        Self {
            interaction,
            mode: ChainMode::Set,
            reactions,
        }
    }

    pub fn add(interaction: InteractionType, reactions: Vec<ReactionSpec>) -> Self {
        Self {
            interaction,
            mode: ChainMode::Add,
            reactions,
        }
    }
}

/// The reaction table every monster starts from.
///
/// Types that map to no reactions are omitted and keep an empty chain.
pub fn default_reactions(contact_damage: u32) -> Vec<(InteractionType, Vec<ReactionSpec>)> {
    use InteractionType as I;
    use ReactionSpec::{Sender as Tx, Subject as Rx};
    use SenderReaction as S;
    use SubjectReaction as M;

    let mut table = vec![
        (I::Sword, vec![Rx(M::DamageByLevel(1, 2, 3))]),
        (I::SwordSpin, vec![Rx(M::Damage(2))]),
        (I::SwordStrafe, vec![Rx(M::Damage(1))]),
        (I::BiggoronSword, vec![Rx(M::Damage(3))]),
        (I::Shield, vec![Rx(M::Bump)]),
        (I::Shovel, vec![Rx(M::Bump)]),
        (I::Parry, vec![Rx(M::ParryWithClingEffect)]),
        (I::SwitchHook, vec![Rx(M::SwitchHook)]),
        (I::Boomerang, vec![Tx(S::Intercept), Rx(M::Stun)]),
        (I::Arrow, vec![Tx(S::Destroy), Rx(M::Damage(1))]),
        (I::SwordBeam, vec![Tx(S::Destroy), Rx(M::Damage(1))]),
        (I::RodFire, vec![Rx(M::Burn(1))]),
        (I::ThrownObject, vec![Tx(S::Destroy), Rx(M::Damage(1))]),
        (I::BombExplosion, vec![Rx(M::Damage(2))]),
        (I::MineCart, vec![Rx(M::SoftKill)]),
        (I::Block, vec![Rx(M::Kill)]),
        (I::EmberSeed, vec![Rx(M::Burn(1))]),
        (I::ScentSeed, vec![Tx(S::Destroy), Rx(M::Damage(1))]),
        (I::PegasusSeed, vec![Tx(S::Destroy), Rx(M::Stun)]),
        (I::GaleSeed, vec![Tx(S::Destroy), Rx(M::Gale)]),
        (I::MysterySeed, vec![Rx(M::MysterySeed)]),
        (I::Fire, vec![Rx(M::Burn(1))]),
        (I::Gale, vec![Rx(M::Gale)]),
        (I::Hole, vec![Rx(M::Kill)]),
        (I::Water, vec![Rx(M::Kill)]),
        (I::Lava, vec![Rx(M::Kill)]),
    ];
    if contact_damage > 0 {
        table.push((I::PlayerContact, vec![Tx(S::Damage(contact_damage))]));
    }
    table
}
