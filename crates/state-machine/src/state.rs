//! State definitions and the fluent builder used to register them.

use std::sync::Arc;

use crate::schedule::EventSchedule;

/// Callback invoked with the owning entity and its world.
pub type Hook<C, W> = Arc<dyn Fn(&mut C, &mut W) + Send + Sync>;

/// How long a state stays active before auto-transitioning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateDuration {
    /// Exactly this many ticks.
    Fixed(u32),
    /// Sampled once per activation from `[min, max]` inclusive.
    Range { min: u32, max: u32 },
}

impl StateDuration {
    /// Creates a ranged duration, collapsing to `Fixed` when both ends match.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn range(min: u32, max: u32) -> Self {
        assert!(min <= max, "duration range {min}..={max} is inverted");
        if min == max {
            Self::Fixed(min)
        } else {
            Self::Range { min, max }
        }
    }
}

/// Registered behavior of a single state.
pub struct StateDefinition<S, C, W: ?Sized> {
    pub(crate) on_begin: Option<Hook<C, W>>,
    pub(crate) on_update: Option<Hook<C, W>>,
    pub(crate) on_end: Option<Hook<C, W>>,
    pub(crate) duration: Option<StateDuration>,
    pub(crate) next: Option<S>,
    pub(crate) events: EventSchedule<C, W>,
}

impl<S, C, W: ?Sized> StateDefinition<S, C, W> {
    pub(crate) fn new() -> Self {
        Self {
            on_begin: None,
            on_update: None,
            on_end: None,
            duration: None,
            next: None,
            events: EventSchedule::new(),
        }
    }

    pub fn duration(&self) -> Option<StateDuration> {
        self.duration
    }

    /// State entered when the duration elapses, if any.
    pub fn next(&self) -> Option<&S> {
        self.next.as_ref()
    }

    pub fn events(&self) -> &EventSchedule<C, W> {
        &self.events
    }
}

impl<S: Clone, C, W: ?Sized> Clone for StateDefinition<S, C, W> {
    fn clone(&self) -> Self {
        Self {
            on_begin: self.on_begin.clone(),
            on_update: self.on_update.clone(),
            on_end: self.on_end.clone(),
            duration: self.duration,
            next: self.next.clone(),
            events: self.events.clone(),
        }
    }
}

/// Fluent builder over a freshly registered state.
pub struct StateBuilder<'a, S, C, W: ?Sized> {
    definition: &'a mut StateDefinition<S, C, W>,
}

impl<'a, S, C, W: ?Sized> StateBuilder<'a, S, C, W> {
    pub(crate) fn new(definition: &'a mut StateDefinition<S, C, W>) -> Self {
        Self { definition }
    }

    /// Called each time the state is entered, including re-entry.
    pub fn on_begin<F>(self, hook: F) -> Self
    where
        F: Fn(&mut C, &mut W) + Send + Sync + 'static,
    {
        self.definition.on_begin = Some(Arc::new(hook));
        self
    }

    /// Called on every update while the state is active.
    pub fn on_update<F>(self, hook: F) -> Self
    where
        F: Fn(&mut C, &mut W) + Send + Sync + 'static,
    {
        self.definition.on_update = Some(Arc::new(hook));
        self
    }

    /// Called when the machine leaves this state for a different one.
    pub fn on_end<F>(self, hook: F) -> Self
    where
        F: Fn(&mut C, &mut W) + Send + Sync + 'static,
    {
        self.definition.on_end = Some(Arc::new(hook));
        self
    }

    /// Auto-transition after exactly `ticks` updates.
    pub fn set_duration(self, ticks: u32) -> Self {
        self.definition.duration = Some(StateDuration::Fixed(ticks));
        self
    }

    /// Auto-transition after a tick count sampled from `[min, max]` on entry.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn set_duration_range(self, min: u32, max: u32) -> Self {
        self.definition.duration = Some(StateDuration::range(min, max));
        self
    }

    /// State to enter when the duration elapses. May name the state itself
    /// to loop.
    pub fn set_next(self, next: S) -> Self {
        self.definition.next = Some(next);
        self
    }

    /// Schedules `hook` `delay` ticks after the previously appended event
    /// (or after state entry for the first one).
    pub fn append_event<F>(self, delay: u32, hook: F) -> Self
    where
        F: Fn(&mut C, &mut W) + Send + Sync + 'static,
    {
        self.definition.events.append(delay, Arc::new(hook));
        self
    }
}
