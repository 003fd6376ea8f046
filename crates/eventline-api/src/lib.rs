//! Eventline API — HTTP ingress and query surface for the event pipeline.

pub mod error;
pub mod routes;
pub mod state;
