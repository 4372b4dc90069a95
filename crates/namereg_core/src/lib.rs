//! Core library for the namereg entity registry.
//!
//! The [`registry`] module holds the domain: the admin API boundary, the
//! generic entity state machine, slug derivation, and the document store
//! with its per-scope unique index. The [`transport`] module exposes the
//! admin API over gRPC, and [`logging`] wires up the tracing subscriber.

pub mod logging;
pub mod registry;
pub mod transport;

#[cfg(test)]
mod tests;
