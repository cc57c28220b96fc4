use super::event::Value;

/// The receiving end of an [`Event`](super::Event).
///
/// An event does not know what it means; dispatch forwards its type and
/// value to whatever handler it targets. Handlers are referenced from the
/// queue for the whole program run, so they must be `'static` and are shared
/// between the producer and consumer contexts. A handler with mutable state
/// synchronizes it internally; the queue takes no lock on its behalf.
pub trait Handler: Sync {
    /// Called by [`Event::dispatch`](super::Event::dispatch).
    ///
    /// The default implementation ignores the event.
    fn on_event(&self, _kind: u8, _value: Value) {}
}

impl<F> Handler for F
where
    F: Fn(u8, Value) + Sync,
{
    #[inline]
    fn on_event(&self, kind: u8, value: Value) {
        self(kind, value)
    }
}
