// Module naming follows project convention (Events = records and handlers, Queue = delivery)
#[allow(non_snake_case)]
pub mod Events {
    pub mod event;
    pub mod handler;
    pub mod types;
    pub use event::{Event, Value}; // re-export for stable path
    pub use handler::Handler;
}
#[allow(non_snake_case)]
pub mod Queue {
    pub mod Buffer {
        pub mod Buffer;
        pub mod Buffer_impl;
        pub use Buffer::{EventQueue, EVENT_QUEUE, QUEUE_MAX}; // re-export for stable path
    }
    pub mod builder;
    pub mod dispatcher;
    pub use builder::DispatcherBuilder;
    pub use dispatcher::{Dispatcher, IdleStrategy};
}
#[allow(non_snake_case)]
pub mod Core {
    pub mod error;
    pub mod futex;
    pub use error::{ConfigError, QueueError};
}
#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub use Events::{Event, Handler, Value};
pub use Queue::Buffer::{EventQueue, EVENT_QUEUE, QUEUE_MAX};
