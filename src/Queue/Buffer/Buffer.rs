// This is the bounded event ring shared by the producer and consumer contexts

use crate::Events::Event;
use crossbeam_utils::CachePadded;

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize};

/// Capacity of the process-wide event queue.
pub const QUEUE_MAX: usize = 16;

/// The process-wide event queue used by [`Event::push`].
///
/// Built at compile time, so it is usable from the first instruction of the
/// program and from any context, with no initialisation step.
pub static EVENT_QUEUE: EventQueue<QUEUE_MAX> = EventQueue::new();

/// A single slot in the ring.
///
/// `stamp` holds one past the last position published into this slot. The
/// slot holds a readable event for position `p` exactly when `stamp == p + 1`;
/// a fresh slot (stamp 0) or a stamp from an earlier lap never matches.
#[repr(C)]
pub(crate) struct Slot {
    pub(crate) stamp: AtomicUsize,
    pub(crate) event: UnsafeCell<Event>,
}

impl Slot {
    pub(crate) const EMPTY: Slot = Slot {
        stamp: AtomicUsize::new(0),
        event: UnsafeCell::new(Event::NULL),
    };
}

/// A bounded, lock-free FIFO of [`Event`] records.
///
/// `N` is fixed at compile time and must be a non-zero power of two. The
/// queue never allocates and never blocks inside `enqueue` or `dequeue`, so
/// both can run in asynchronous (signal or interrupt) context.
///
/// ### Concurrency Design:
/// - **Producers (Enqueue)**: claim a position by compare-and-swap on `tail`
///   while fewer than `N` positions lie between `head` and `tail`, copy the
///   event into the slot, stamp it, then move `committed` forward over every
///   stamped slot. A producer preempted by another producer (a nested
///   interrupt) is safe: each claims its own position, and whichever finishes
///   last commits both.
/// - **Consumer (Dequeue)**: reads the slot at `head` while `head` is behind
///   `committed`, and only then stores `head + 1`. The slot stays reserved
///   until the read is complete.
/// - Occupancy queries read the same cursors the operations test:
///   `is_full` agrees with `enqueue` (`tail - head`), `is_empty` and
///   `available` agree with `dequeue` (`committed - head`), as seen from a
///   context that interrupts the other side at any point.
///
/// There is a single consumer. A second context entering `dequeue` while
/// another is inside it gets nothing back rather than a shared event.
pub struct EventQueue<const N: usize> {
    pub(crate) slots: [Slot; N],

    /// Next position to claim for writing.
    pub(crate) tail: CachePadded<AtomicUsize>,

    /// Every position below this one is published and readable.
    pub(crate) committed: CachePadded<AtomicUsize>,

    /// Next position to read. Positions below it are free for producers.
    pub(crate) head: CachePadded<AtomicUsize>,

    /// Held by the consumer while it is inside `dequeue`.
    pub(crate) consuming: AtomicBool,

    /// Events refused because the queue was full.
    pub(crate) dropped: AtomicUsize,

    /// Bumped after every publish; a parked consumer sleeps on it.
    pub(crate) signal: AtomicU32,

    /// Number of consumers currently parked on `signal`.
    pub(crate) sleepers: AtomicU32,
}

// A slot is written only between its claim and its commit, and read only
// between its commit and the consumer moving `head` past it.
unsafe impl<const N: usize> Sync for EventQueue<N> {}
