//! Eventline Broker — durable publish/consume over an AMQP topic exchange.
//!
//! One durable topic exchange, one durable catch-all queue. Every published
//! envelope, regardless of name, reaches the single log queue; future
//! consumers bind additional queues with narrower patterns.

pub mod consumer;
pub mod error;
pub mod publisher;
pub mod topology;

pub use consumer::AckPolicy;
pub use error::BrokerError;
pub use publisher::TopicPublisher;
