// In src/Queue/dispatcher.rs
use crate::Events::types::type_name;
use crate::Queue::Buffer::EventQueue;
use log::{debug, trace, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What the dispatcher does when a pass finds the queue empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdleStrategy {
    /// Busy-poll with a spin hint.
    Spin,
    /// Give the rest of the time slice away.
    Yield,
    /// Sleep until a producer publishes, at most for the given time.
    Park(Duration),
    /// Sleep for a fixed time.
    Sleep(Duration),
}

impl Default for IdleStrategy {
    fn default() -> Self {
        IdleStrategy::Park(Duration::from_millis(10))
    }
}

/// The consumer side of an [`EventQueue`]: dequeue, then dispatch.
///
/// A dispatcher is the main loop's handle on the queue. It delivers events in
/// arrival order, one at a time, on the thread that drives it. Producers keep
/// using the queue directly.
pub struct Dispatcher<'q, const N: usize> {
    queue: &'q EventQueue<N>,
    batch_limit: usize,
    idle: IdleStrategy,
    running: Arc<AtomicBool>,
    dispatched: AtomicU64,
    dropped_seen: AtomicUsize,
}

impl<'q, const N: usize> Dispatcher<'q, N> {
    pub(crate) fn new(queue: &'q EventQueue<N>, batch_limit: usize, idle: IdleStrategy) -> Self {
        Self {
            queue,
            batch_limit,
            idle,
            running: Arc::new(AtomicBool::new(true)),
            dispatched: AtomicU64::new(0),
            dropped_seen: AtomicUsize::new(queue.dropped()),
        }
    }

    /// Dispatch the oldest pending event, if any.
    pub fn dispatch_one(&self) -> bool {
        match self.queue.pop() {
            Some(event) => {
                trace!(
                    "dispatch kind={} ({}) value=0x{:x} target={}",
                    event.kind(),
                    type_name(event.kind()).unwrap_or("unnamed"),
                    event.payload().raw(),
                    event.target().is_some()
                );
                event.dispatch();
                self.dispatched.fetch_add(1, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Dispatch pending events, at most the configured batch limit.
    ///
    /// # Returns
    /// The number of events delivered in this pass.
    pub fn dispatch_pending(&self) -> usize {
        self.report_dropped();

        let mut count = 0;
        while count < self.batch_limit && self.dispatch_one() {
            count += 1;
        }
        count
    }

    /// Run the main loop until [`stop`](Self::stop) is called.
    ///
    /// Each call re-arms the running flag, so a stopped dispatcher can be run
    /// again. A stop requested before `run` starts is discarded.
    ///
    /// # Returns
    /// The number of events delivered while running.
    pub fn run(&self) -> u64 {
        self.running.store(true, Ordering::Release);
        let start = self.dispatched();
        debug!(
            "dispatcher started (capacity={}, batch_limit={}, idle={:?})",
            N, self.batch_limit, self.idle
        );

        while self.running.load(Ordering::Acquire) {
            if self.dispatch_pending() == 0 {
                self.idle();
            }
        }

        let delivered = self.dispatched() - start;
        debug!("dispatcher stopped after {} events", delivered);
        delivered
    }

    /// Ask a running loop to return after its current pass.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
        self.queue.notify();
    }

    /// Returns a reference to the running flag
    ///
    /// Storing `false` stops [`run`](Self::run); a parked loop notices within
    /// its park timeout.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Total events delivered by this dispatcher.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    pub fn queue(&self) -> &'q EventQueue<N> {
        self.queue
    }

    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    pub fn idle_strategy(&self) -> IdleStrategy {
        self.idle
    }

    fn idle(&self) {
        match self.idle {
            IdleStrategy::Spin => std::hint::spin_loop(),
            IdleStrategy::Yield => std::thread::yield_now(),
            IdleStrategy::Park(timeout) => self.queue.park(Some(timeout)),
            IdleStrategy::Sleep(period) => std::thread::sleep(period),
        }
    }

    fn report_dropped(&self) {
        let total = self.queue.dropped();
        let seen = self.dropped_seen.swap(total, Ordering::Relaxed);
        if total != seen {
            warn!(
                "{} event(s) dropped, queue full ({} slots)",
                total.wrapping_sub(seen),
                N
            );
        }
    }
}
