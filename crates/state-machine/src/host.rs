//! Traits connecting a machine to its owner and world.

use crate::StateMachine;

/// An entity that owns a [`StateMachine`] whose hooks operate on the entity.
///
/// The machine is stored inside the owner, so transitions are driven through
/// associated functions that take the owner mutably and reach the machine
/// through this accessor. Hooks receive the same owner reference and may call
/// [`StateMachine::begin_state`] on it.
pub trait MachineHost<S, W: ?Sized>: Sized {
    /// Returns the machine stored in this owner.
    fn state_machine(&mut self) -> &mut StateMachine<S, Self, W>;
}

/// Source of randomness for ranged state durations.
///
/// The machine never owns a generator. Ranged durations are sampled from the
/// world at activation time so a seeded world reproduces the same timings.
pub trait DurationRng {
    /// Returns a tick count in `[min, max]` inclusive.
    fn roll_duration(&mut self, min: u32, max: u32) -> u32;
}
