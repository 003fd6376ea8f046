//! Eventline Core — the canonical event envelope and its seams.
//!
//! This crate defines the `Envelope` that every other crate moves around,
//! the validation rules that produce it from raw inbound JSON, and the
//! store/publisher traits the infrastructure crates implement. It contains
//! no infrastructure code.

pub mod clock;
pub mod envelope;
pub mod error;
pub mod publish;
pub mod store;
pub mod validate;
