use super::{Dispatcher, IdleStrategy};
use crate::Core::error::ConfigError;
use crate::Queue::Buffer::EventQueue;

pub struct DispatcherBuilder {
    batch_limit: usize,
    idle: IdleStrategy,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self {
            batch_limit: crate::QUEUE_MAX, // one full queue per pass
            idle: IdleStrategy::default(),
        }
    }
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = limit;
        self
    }

    pub fn with_idle(mut self, idle: IdleStrategy) -> Self {
        self.idle = idle;
        self
    }

    pub fn build<const N: usize>(
        self,
        queue: &EventQueue<N>,
    ) -> Result<Dispatcher<'_, N>, ConfigError> {
        if self.batch_limit == 0 {
            return Err(ConfigError::ZeroBatchLimit);
        }
        Ok(Dispatcher::new(queue, self.batch_limit, self.idle))
    }
}
