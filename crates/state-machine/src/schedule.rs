//! Per-state scheduled callbacks.
//!
//! Events are appended with an offset relative to the previously appended
//! event, which accumulates into an absolute tick offset from state entry.
//! Because relative offsets are never negative, appending keeps the list
//! sorted by absolute offset with ties in declaration order.

use crate::state::Hook;

/// A callback fired once when a state has been active for `offset` ticks.
pub struct ScheduledEvent<C, W: ?Sized> {
    offset: u32,
    callback: Hook<C, W>,
}

impl<C, W: ?Sized> ScheduledEvent<C, W> {
    /// Absolute tick offset from state entry.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn callback(&self) -> &Hook<C, W> {
        &self.callback
    }
}

impl<C, W: ?Sized> Clone for ScheduledEvent<C, W> {
    fn clone(&self) -> Self {
        Self {
            offset: self.offset,
            callback: self.callback.clone(),
        }
    }
}

/// Ordered list of scheduled events for one state.
pub struct EventSchedule<C, W: ?Sized> {
    events: Vec<ScheduledEvent<C, W>>,
}

impl<C, W: ?Sized> EventSchedule<C, W> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event `delay` ticks after the previously appended one.
    ///
    /// The first event is offset from state entry.
    pub fn append(&mut self, delay: u32, callback: Hook<C, W>) {
        let offset = self.last_offset().saturating_add(delay);
        self.events.push(ScheduledEvent { offset, callback });
    }

    /// Absolute offset of the last appended event, or 0 when empty.
    pub fn last_offset(&self) -> u32 {
        self.events.last().map_or(0, ScheduledEvent::offset)
    }

    /// Events whose absolute offset equals `elapsed`, in declaration order.
    pub fn due_at(&self, elapsed: u32) -> &[ScheduledEvent<C, W>] {
        let start = self.events.partition_point(|event| event.offset < elapsed);
        let end = self.events.partition_point(|event| event.offset <= elapsed);
        &self.events[start..end]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent<C, W>> {
        self.events.iter()
    }
}

impl<C, W: ?Sized> Default for EventSchedule<C, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, W: ?Sized> Clone for EventSchedule<C, W> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn noop() -> Hook<(), ()> {
        Arc::new(|_: &mut (), _: &mut ()| {})
    }

    #[test]
    fn relative_offsets_accumulate() {
        let mut schedule = EventSchedule::<(), ()>::new();
        schedule.append(3, noop());
        schedule.append(0, noop());
        schedule.append(4, noop());

        let offsets: Vec<u32> = schedule.iter().map(ScheduledEvent::offset).collect();
        assert_eq!(offsets, vec![3, 3, 7]);
        assert_eq!(schedule.last_offset(), 7);
    }

    #[test]
    fn due_at_returns_only_matching_offsets() {
        let mut schedule = EventSchedule::<(), ()>::new();
        schedule.append(2, noop());
        schedule.append(0, noop());
        schedule.append(1, noop());

        assert!(schedule.due_at(1).is_empty());
        assert_eq!(schedule.due_at(2).len(), 2);
        assert_eq!(schedule.due_at(3).len(), 1);
        assert!(schedule.due_at(4).is_empty());
    }
}
