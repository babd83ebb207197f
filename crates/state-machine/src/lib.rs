//! Generic tick-driven state machine for scripting multi-phase behavior.
//!
//! This library provides a small, deterministic state machine designed for
//! fixed-timestep simulations where every entity advances exactly one tick
//! per update.
//!
//! - **Integer time**: elapsed time is a tick counter, never wall-clock
//! - **Timed states**: optional fixed or ranged duration with auto-transition
//! - **Scheduled events**: callbacks at tick offsets from state entry
//! - **Owner access**: hooks receive the owning entity and its world, so they
//!   can mutate state and request transitions themselves
//!
//! # Architecture
//!
//! - [`StateMachine`]: state table plus the single active state
//! - [`StateBuilder`]: fluent registration returned by [`StateMachine::add_state`]
//! - [`MachineHost`]: implemented by the owner that stores the machine
//! - [`DurationRng`]: implemented by the world to sample ranged durations

pub mod host;
pub mod machine;
pub mod schedule;
pub mod state;

// Re-export core types for ergonomic API
pub use host::{DurationRng, MachineHost};
pub use machine::StateMachine;
pub use schedule::{EventSchedule, ScheduledEvent};
pub use state::{Hook, StateBuilder, StateDefinition, StateDuration};
