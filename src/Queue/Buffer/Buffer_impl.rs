use std::fmt;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release, SeqCst};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize};
use std::time::{Duration, Instant};

use crossbeam_utils::CachePadded;

use super::Buffer::{EventQueue, Slot};
use crate::Core::error::QueueError;
use crate::Core::futex::{futex_wait, futex_wake};
use crate::Events::{Event, Handler};

impl Slot {
    /// Whether this slot holds the published event for `position`.
    #[inline]
    fn is_published(&self, position: usize) -> bool {
        self.stamp.load(SeqCst) == position.wrapping_add(1)
    }

    #[inline]
    fn publish(&self, position: usize) {
        self.stamp.store(position.wrapping_add(1), SeqCst);
    }
}

impl<const N: usize> EventQueue<N> {
    const MASK: usize = N - 1;

    const CAPACITY_OK: () = assert!(
        N > 0 && N.is_power_of_two(),
        "event queue capacity must be a non-zero power of two"
    );

    /// Create an empty queue.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_OK;
        Self {
            slots: [Slot::EMPTY; N],
            tail: CachePadded::new(AtomicUsize::new(0)),
            committed: CachePadded::new(AtomicUsize::new(0)),
            head: CachePadded::new(AtomicUsize::new(0)),
            consuming: AtomicBool::new(false),
            dropped: AtomicUsize::new(0),
            signal: AtomicU32::new(0),
            sleepers: AtomicU32::new(0),
        }
    }

    /// Number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn slot(&self, position: usize) -> &Slot {
        &self.slots[position & Self::MASK]
    }

    /// Copy `event` into the next free slot.
    /// Returns `false` if the queue is full; existing entries are untouched.
    #[inline]
    pub fn enqueue(&self, event: &Event) -> bool {
        self.try_enqueue(*event).is_ok()
    }

    /// Enqueue, returning the slot index on success.
    pub fn try_enqueue(&self, event: Event) -> Result<usize, QueueError> {
        let position = self.claim()?;
        self.publish(position, event);
        Ok(position & Self::MASK)
    }

    /// Reserve the next position for writing.
    ///
    /// Fails when `N` positions are already claimed and not yet read, which
    /// is exactly when [`is_full`](Self::is_full) reports `true`.
    fn claim(&self) -> Result<usize, QueueError> {
        loop {
            // head first: tail read afterwards can only be ahead of it
            let head = self.head.load(Acquire);
            let tail = self.tail.load(Relaxed);

            if tail.wrapping_sub(head) >= N {
                // full
                self.dropped.fetch_add(1, Relaxed);
                return Err(QueueError::Full { capacity: N });
            }
            if self
                .tail
                .compare_exchange_weak(tail, tail.wrapping_add(1), SeqCst, Relaxed)
                .is_ok()
            {
                return Ok(tail);
            }
            // lost the position to another producer, which made progress
        }
    }

    /// Write a claimed position and make it visible to the consumer.
    fn publish(&self, position: usize, event: Event) {
        let slot = self.slot(position);

        // We own this slot now: `head` has passed its previous occupant.
        unsafe { slot.event.get().write(event) };
        slot.publish(position);

        self.commit();
        self.notify();
    }

    /// Move `committed` over every published slot, in position order.
    ///
    /// Stops at the first claimed-but-unwritten slot. The producer that owns
    /// that slot runs this again once it publishes, so nothing is stranded.
    fn commit(&self) {
        let mut committed = self.committed.load(SeqCst);
        while self.slot(committed).is_published(committed) {
            match self.committed.compare_exchange(
                committed,
                committed.wrapping_add(1),
                SeqCst,
                SeqCst,
            ) {
                Ok(_) => committed = committed.wrapping_add(1),
                Err(current) => committed = current,
            }
        }
    }

    /// Copy the oldest event into `out`.
    /// Returns `false` and leaves `out` untouched if nothing is pending.
    #[inline]
    pub fn dequeue(&self, out: &mut Event) -> bool {
        match self.pop() {
            Some(event) => {
                *out = event;
                true
            }
            None => false,
        }
    }

    /// Take the oldest pending event.
    pub fn pop(&self) -> Option<Event> {
        if self.consuming.swap(true, Acquire) {
            // another context is mid-dequeue
            return None;
        }
        let event = self.read_oldest().map(|(head, event)| {
            self.release(head);
            event
        });
        self.consuming.store(false, Release);
        event
    }

    /// Copy out the event at `head` without freeing its slot.
    fn read_oldest(&self) -> Option<(usize, Event)> {
        let head = self.head.load(Relaxed);
        if head == self.committed.load(Acquire) {
            // empty, or the oldest position is claimed but not yet written
            return None;
        }
        let event = unsafe { self.slot(head).event.get().read() };
        Some((head, event))
    }

    /// Free the slot at `head` for the producer one lap ahead.
    #[inline]
    fn release(&self, head: usize) {
        self.head.store(head.wrapping_add(1), Release);
    }

    /// [`pop`](Self::pop) with an error instead of `None`.
    #[inline]
    pub fn try_dequeue(&self) -> Result<Event, QueueError> {
        self.pop().ok_or(QueueError::Empty)
    }

    /// Build an event and enqueue it. Returns `false` if the queue was full.
    #[inline]
    pub fn push(&self, kind: u8, target: Option<&'static dyn Handler>, value: u16) -> bool {
        self.enqueue(&Event::new(kind, target, value))
    }

    /// Build an event carrying an environment address and enqueue it.
    #[inline]
    pub fn push_env<T>(
        &self,
        kind: u8,
        target: Option<&'static dyn Handler>,
        env: *const T,
    ) -> bool {
        self.enqueue(&Event::with_env(kind, target, env))
    }

    /// Number of events ready to dequeue, always within `0..=capacity`.
    ///
    /// A slot a producer has claimed but not finished writing is not counted
    /// here, though it does count towards [`is_full`](Self::is_full).
    #[inline]
    pub fn available(&self) -> usize {
        // head first: committed read afterwards can only be ahead of it
        let head = self.head.load(Acquire);
        let committed = self.committed.load(Acquire);
        committed.wrapping_sub(head).min(N)
    }

    /// `true` exactly when [`dequeue`](Self::dequeue) would fail.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// `true` exactly when [`enqueue`](Self::enqueue) would fail.
    #[inline]
    pub fn is_full(&self) -> bool {
        let head = self.head.load(Acquire);
        let tail = self.tail.load(Acquire);
        tail.wrapping_sub(head) >= N
    }

    /// Total number of events refused because the queue was full.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped.load(Relaxed)
    }

    /// Wake a parked consumer, if there is one.
    pub(crate) fn notify(&self) {
        self.signal.fetch_add(1, SeqCst);
        if self.sleepers.load(SeqCst) > 0 {
            futex_wake(&self.signal);
        }
    }

    /// Park the consumer until a producer publishes or `timeout` elapses.
    ///
    /// Returns without sleeping if something is already pending. May return
    /// early; callers poll again.
    pub fn park(&self, timeout: Option<Duration>) {
        self.sleepers.fetch_add(1, SeqCst);
        let seen = self.signal.load(SeqCst);
        if self.is_empty() {
            futex_wait(&self.signal, seen, timeout);
        }
        self.sleepers.fetch_sub(1, SeqCst);
    }

    /// Take the oldest event, sleeping until one arrives.
    ///
    /// Consumer context only. Never call this from a producer: it blocks.
    pub fn wait(&self) -> Event {
        loop {
            if let Some(event) = self.pop() {
                return event;
            }
            self.park(None);
        }
    }

    /// Take the oldest event, sleeping at most `timeout` for one to arrive.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Event> {
        let start = Instant::now();

        loop {
            if let Some(event) = self.pop() {
                return Some(event);
            }
            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return None;
            }
            self.park(Some(remaining));
        }
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for EventQueue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_event_queue(self, f)
    }
}
