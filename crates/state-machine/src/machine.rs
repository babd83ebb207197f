//! The state machine runtime.
//!
//! # Tick semantics
//!
//! - [`StateMachine::begin_state`] ends a different active state, resets the
//!   elapsed counter to 0, samples the duration and fires `on_begin`. No
//!   scheduled event fires here.
//! - [`StateMachine::update`] increments the elapsed counter, fires
//!   `on_update`, then every event scheduled at the new elapsed value, then
//!   checks the duration. Events at offset 0 fire on the first update, ahead
//!   of those at offset 1.
//! - A hook that begins another state ends the current tick for the original
//!   state: its remaining events and duration check are skipped.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use tracing::trace;

use crate::host::{DurationRng, MachineHost};
use crate::schedule::ScheduledEvent;
use crate::state::{StateBuilder, StateDefinition, StateDuration};

#[derive(Clone, Debug)]
struct ActiveState<S> {
    id: S,
    elapsed: u32,
    duration: Option<u32>,
}

/// A table of named, timed states with at most one active at a time.
///
/// The machine has no implicit initial state: the owner calls
/// [`StateMachine::begin_state`] (or [`StateMachine::initialize_on_state`])
/// before the first update. Updates on an idle machine do nothing.
pub struct StateMachine<S, C, W: ?Sized> {
    states: Arc<HashMap<S, StateDefinition<S, C, W>>>,
    active: Option<ActiveState<S>>,
    /// Incremented on every activation so hooks that transition can be
    /// detected by the update loop.
    activations: u64,
}

impl<S, C, W> StateMachine<S, C, W>
where
    S: Clone + Eq + Hash + Debug,
    W: ?Sized,
{
    pub fn new() -> Self {
        Self {
            states: Arc::new(HashMap::new()),
            active: None,
            activations: 0,
        }
    }

    /// Registers `id`, replacing any previous definition, and returns a
    /// builder for its hooks, duration and events.
    pub fn add_state(&mut self, id: S) -> StateBuilder<'_, S, C, W> {
        let states = Arc::make_mut(&mut self.states);
        let definition = states.entry(id).or_insert_with(StateDefinition::new);
        *definition = StateDefinition::new();
        StateBuilder::new(definition)
    }

    pub fn contains(&self, id: &S) -> bool {
        self.states.contains_key(id)
    }

    pub fn definition(&self, id: &S) -> Option<&StateDefinition<S, C, W>> {
        self.states.get(id)
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Currently active state, if any.
    pub fn current(&self) -> Option<&S> {
        self.active.as_ref().map(|active| &active.id)
    }

    pub fn is_in(&self, id: &S) -> bool {
        self.current() == Some(id)
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Ticks elapsed since the active state was entered (0 when idle).
    pub fn elapsed(&self) -> u32 {
        self.active.as_ref().map_or(0, |active| active.elapsed)
    }

    /// Duration sampled for the current activation.
    pub fn active_duration(&self) -> Option<u32> {
        self.active.as_ref().and_then(|active| active.duration)
    }
}

impl<S, C, W> StateMachine<S, C, W>
where
    S: Clone + Eq + Hash + Debug,
    C: MachineHost<S, W>,
    W: DurationRng + ?Sized,
{
    /// Enters `id`.
    ///
    /// Ends the active state first when it differs from `id`. Entering the
    /// state that is already active restarts it: elapsed time resets,
    /// `on_begin` fires again and every event is due again.
    ///
    /// # Panics
    ///
    /// Panics if `id` was never registered. This is a configuration error.
    pub fn begin_state(host: &mut C, world: &mut W, id: S) {
        let states = Arc::clone(&host.state_machine().states);
        let definition = match states.get(&id) {
            Some(definition) => definition,
            None => panic!("state {id:?} is not registered in this state machine"),
        };

        let previous = host.state_machine().current().cloned();
        if let Some(previous) = previous.as_ref().filter(|previous| **previous != id) {
            if let Some(on_end) = states.get(previous).and_then(|def| def.on_end.as_ref()) {
                on_end(host, world);
            }
        }

        let duration = definition.duration.map(|duration| match duration {
            StateDuration::Fixed(ticks) => ticks,
            StateDuration::Range { min, max } => world.roll_duration(min, max),
        });

        trace!(
            target: "state_machine",
            from = ?previous,
            to = ?id,
            duration = ?duration,
            "begin state"
        );

        {
            let machine = host.state_machine();
            machine.activations = machine.activations.wrapping_add(1);
            machine.active = Some(ActiveState {
                id,
                elapsed: 0,
                duration,
            });
        }

        if let Some(on_begin) = definition.on_begin.as_ref() {
            on_begin(host, world);
        }
    }

    /// Enters `id` as the first state of a fresh run, discarding whatever was
    /// active without calling its `on_end`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was never registered.
    pub fn initialize_on_state(host: &mut C, world: &mut W, id: S) {
        host.state_machine().active = None;
        Self::begin_state(host, world, id);
    }

    /// Advances the active state by one tick.
    pub fn update(host: &mut C, world: &mut W) {
        let (id, elapsed, activation) = {
            let machine = host.state_machine();
            let activation = machine.activations;
            let Some(active) = machine.active.as_mut() else {
                return;
            };
            active.elapsed = active.elapsed.saturating_add(1);
            (active.id.clone(), active.elapsed, activation)
        };

        let states = Arc::clone(&host.state_machine().states);
        let Some(definition) = states.get(&id) else {
            return;
        };

        if let Some(on_update) = definition.on_update.as_ref() {
            on_update(host, world);
            if host.state_machine().activations != activation {
                return;
            }
        }

        let at_entry: &[ScheduledEvent<C, W>] = match elapsed {
            1 => definition.events.due_at(0),
            _ => &[],
        };
        for event in at_entry.iter().chain(definition.events.due_at(elapsed)) {
            (event.callback())(host, world);
            if host.state_machine().activations != activation {
                return;
            }
        }

        let expired = host
            .state_machine()
            .active_duration()
            .is_some_and(|duration| elapsed >= duration);
        if !expired {
            return;
        }

        match definition.next.clone() {
            Some(next) => Self::begin_state(host, world, next),
            None => Self::stop(host, world),
        }
    }

    /// Ends the active state, leaving the machine idle until the next
    /// [`StateMachine::begin_state`].
    pub fn stop(host: &mut C, world: &mut W) {
        let Some(current) = host.state_machine().current().cloned() else {
            return;
        };
        let states = Arc::clone(&host.state_machine().states);

        trace!(target: "state_machine", state = ?current, "stop");

        {
            let machine = host.state_machine();
            machine.activations = machine.activations.wrapping_add(1);
            machine.active = None;
        }

        if let Some(on_end) = states.get(&current).and_then(|def| def.on_end.as_ref()) {
            on_end(host, world);
        }
    }
}

impl<S, C, W> Default for StateMachine<S, C, W>
where
    S: Clone + Eq + Hash + Debug,
    W: ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Debug, C, W: ?Sized> Debug for StateMachine<S, C, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states.len())
            .field("active", &self.active)
            .finish()
    }
}
