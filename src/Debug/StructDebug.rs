use std::fmt;

use crate::Events::types::type_name;
use crate::Events::Event;
use crate::Queue::Buffer::EventQueue;

/// Debug function for Event
///
/// Shows:
/// - Type code, with its name when the framework reserves it
/// - Target handler address (never dereferenced)
/// - Raw value word
pub fn debug_event(event: &Event, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut s = f.debug_struct("Event");
    match type_name(event.kind()) {
        Some(name) => s.field("kind", &format_args!("{} ({})", event.kind(), name)),
        None => s.field("kind", &event.kind()),
    };
    match event.target() {
        Some(target) => s.field(
            "target",
            &format_args!("{:p}", target as *const dyn crate::Events::Handler as *const ()),
        ),
        None => s.field("target", &"<none>"),
    };
    s.field("value", &format_args!("0x{:x}", event.payload().raw()))
        .finish()
}

/// Debug function for EventQueue
///
/// Reports occupancy only; slot contents belong to whichever context owns them.
pub fn debug_event_queue<const N: usize>(
    queue: &EventQueue<N>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.debug_struct("EventQueue")
        .field("capacity", &queue.capacity())
        .field("available", &queue.available())
        .field("dropped", &queue.dropped())
        .finish_non_exhaustive()
}
