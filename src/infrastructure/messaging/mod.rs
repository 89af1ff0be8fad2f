pub mod queue;
pub mod queue_consumer;
