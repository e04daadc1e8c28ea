//! `EventQueue`: sparse (tick, priority) → FIFO bucket map.
//!
//! `BTreeMap` gives O(log K) push and pop where K is the number of distinct
//! (tick, priority) keys currently pending.  In a port with a few dozen
//! barges in flight K stays small, and each bucket is a `VecDeque` so
//! same-key events come back out in the order they went in.
//!
//! Events are never cancelled.  A handler that finds its event stale simply
//! ignores it.

use std::collections::{BTreeMap, VecDeque};

use bp_core::Tick;

use crate::Priority;

/// One dispatched event with its scheduling key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduled<E> {
    pub tick:     Tick,
    pub priority: Priority,
    pub event:    E,
}

/// A priority queue keyed by `(Tick, Priority)`, FIFO within a key.
pub struct EventQueue<E> {
    inner: BTreeMap<(Tick, Priority), VecDeque<E>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
    /// Tick of the most recently popped event.
    now:   Tick,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), total: 0, now: Tick::ZERO }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at `tick`.
    ///
    /// # Panics
    /// Panics in debug mode if `tick` is earlier than [`now`](Self::now):
    /// the timeline never runs backwards.
    pub fn push(&mut self, tick: Tick, priority: Priority, event: E) {
        debug_assert!(tick >= self.now, "event scheduled in the past: {tick} < {}", self.now);
        self.inner.entry((tick, priority)).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the earliest event, advancing [`now`](Self::now).
    pub fn pop(&mut self) -> Option<Scheduled<E>> {
        let mut entry = self.inner.first_entry()?;
        let (tick, priority) = *entry.key();
        let bucket = entry.get_mut();
        let event = bucket.pop_front()?;
        if bucket.is_empty() {
            entry.remove();
        }
        self.total -= 1;
        self.now = tick;
        Some(Scheduled { tick, priority, event })
    }

    /// The tick of the earliest pending event, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().map(|&(tick, _)| tick)
    }

    /// Tick of the last dispatched event (starts at `Tick::ZERO`).
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Total number of pending events.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct (tick, priority) keys with pending events.
    pub fn key_count(&self) -> usize {
        self.inner.len()
    }

    /// Iterate pending events in dispatch order without removing them.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, Priority, &E)> {
        self.inner
            .iter()
            .flat_map(|(&(tick, priority), bucket)| bucket.iter().map(move |e| (tick, priority, e)))
    }
}
