// Event record: type code, target handler and a pointer-width value.

use std::fmt;
use std::ptr;

use super::handler::Handler;
use super::types::NULL_TYPE;
use crate::Queue::Buffer::{EventQueue, EVENT_QUEUE, QUEUE_MAX};

/// The value carried by an event.
///
/// Producers put either a 16-bit scalar or an environment address in here.
/// The field is pointer-width so an address survives the trip through the
/// queue on every target. Nothing records which of the two was stored: reading
/// an address back as a scalar (or the reverse) is a caller bug and is not
/// detected.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Value(usize);

impl Value {
    pub const ZERO: Value = Value(0);

    /// Zero-extend a scalar.
    #[inline]
    pub const fn new(value: u16) -> Self {
        Value(value as usize)
    }

    /// Store the address of an environment object.
    #[inline]
    pub fn from_env<T>(env: *const T) -> Self {
        Value(env as usize)
    }

    /// The scalar payload. Truncates if an address was stored.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0 as u16
    }

    /// The full pointer-width word.
    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }

    /// Reinterpret the value as an environment pointer.
    ///
    /// Only meaningful if the producer stored an address with
    /// [`Value::from_env`]. Dereferencing the result is up to the caller.
    #[inline]
    pub fn env<T>(self) -> *const T {
        self.0 as *const T
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::new(value)
    }
}

/// A fixed-size event record.
///
/// Events are plain values: they are copied into the queue by the producer
/// and copied out again by the consumer. Once built an event never changes.
#[derive(Copy, Clone)]
pub struct Event {
    kind: u8,
    target: Option<&'static dyn Handler>,
    value: Value,
}

impl Event {
    /// The null event: no type, no target, zero value. Dispatching it does nothing.
    pub const NULL: Event = Event::new(NULL_TYPE, None, 0);

    /// Construct an event with a scalar value.
    #[inline]
    pub const fn new(kind: u8, target: Option<&'static dyn Handler>, value: u16) -> Self {
        Self::with_value(kind, target, Value::new(value))
    }

    /// Construct an event from an already built [`Value`].
    #[inline]
    pub const fn with_value(kind: u8, target: Option<&'static dyn Handler>, value: Value) -> Self {
        Self { kind, target, value }
    }

    /// Construct an event carrying an environment address.
    #[inline]
    pub fn with_env<T>(kind: u8, target: Option<&'static dyn Handler>, env: *const T) -> Self {
        Self::with_value(kind, target, Value::from_env(env))
    }

    #[inline]
    pub fn kind(&self) -> u8 {
        self.kind
    }

    #[inline]
    pub fn target(&self) -> Option<&'static dyn Handler> {
        self.target
    }

    /// The scalar value. See [`Value::get`].
    #[inline]
    pub fn value(&self) -> u16 {
        self.value.get()
    }

    /// The value as stored, without interpretation.
    #[inline]
    pub fn payload(&self) -> Value {
        self.value
    }

    /// The value reinterpreted as an environment pointer. See [`Value::env`].
    #[inline]
    pub fn env<T>(&self) -> *const T {
        self.value.env()
    }

    /// Deliver the event to its target, if it has one.
    pub fn dispatch(&self) {
        if let Some(target) = self.target {
            target.on_event(self.kind, self.value);
        }
    }

    /// Push an event on the process-wide queue.
    ///
    /// Returns `false` if the queue was full; the event is dropped.
    #[inline]
    pub fn push(kind: u8, target: Option<&'static dyn Handler>, value: u16) -> bool {
        EVENT_QUEUE.push(kind, target, value)
    }

    /// Push an event carrying an environment address on the process-wide queue.
    #[inline]
    pub fn push_env<T>(kind: u8, target: Option<&'static dyn Handler>, env: *const T) -> bool {
        EVENT_QUEUE.push_env(kind, target, env)
    }

    /// The process-wide queue used by [`Event::push`].
    #[inline]
    pub fn queue() -> &'static EventQueue<QUEUE_MAX> {
        &EVENT_QUEUE
    }

    /// Whether both events target the same handler object (or both have none).
    pub fn same_target(&self, other: &Event) -> bool {
        match (self.target, other.target) {
            (Some(a), Some(b)) => ptr::addr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Event::NULL
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value && self.same_target(other)
    }
}

impl Eq for Event {}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_event(self, f)
    }
}
