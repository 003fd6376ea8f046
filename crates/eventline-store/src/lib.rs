//! Eventline Store — PostgreSQL implementation of the event log.

pub mod pg_event_store;
pub mod schema;

pub use pg_event_store::PgEventStore;
