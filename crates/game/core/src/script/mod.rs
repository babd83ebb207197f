//! Multi-phase monster behaviors built on the generic state machine.
//!
//! Each script registers its phases on the monster's [`PhaseMachine`] once,
//! when the monster is created, and names the phase the machine starts in
//! when the monster is initialized.

mod charge;
mod electrocute;
mod flip_over;
mod submerge;

pub use charge::{ChargeSpec, ChargeStop};
pub use electrocute::ElectrocuteSpec;
pub use flip_over::FlipOverSpec;
pub use submerge::SubmergeSpec;

use crate::monster::{PhaseMachine, TemplateError};

/// Every phase used by the built-in scripts.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Wandering,
    Charging,
    Cooldown,
    Submerged,
    Resurfacing,
    Surfaced,
    Submerging,
    Moving,
    Electrocuting,
    FlippedOver,
    Recovering,
}

/// Which script a monster runs and its tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptSpec {
    /// Wander until the player lines up, then charge and cool down.
    Charge(ChargeSpec),
    /// Hide underwater, surface to shoot, dive again.
    Submerge(SubmergeSpec),
    /// Wander, periodically becoming electrified.
    Electrocute(ElectrocuteSpec),
    /// Wander until flipped by a shield or shovel, then recover.
    FlipOver(FlipOverSpec),
}

impl ScriptSpec {
    /// Phase the machine enters when the monster is initialized.
    pub const fn initial_phase(&self) -> Phase {
        match self {
            Self::Charge(_) | Self::FlipOver(_) => Phase::Wandering,
            Self::Submerge(_) => Phase::Submerged,
            Self::Electrocute(_) => Phase::Moving,
        }
    }

    /// Registers every phase of this script on `machine`.
    pub fn build(&self, machine: &mut PhaseMachine) {
        match self {
            Self::Charge(spec) => charge::build(spec, machine),
            Self::Submerge(spec) => submerge::build(spec, machine),
            Self::Electrocute(spec) => electrocute::build(spec, machine),
            Self::FlipOver(spec) => flip_over::build(spec, machine),
        }
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), TemplateError> {
        match self {
            Self::Charge(spec) => spec.validate(name),
            Self::Submerge(spec) => spec.validate(name),
            Self::Electrocute(spec) => spec.validate(name),
            Self::FlipOver(spec) => spec.validate(name),
        }
    }
}
