//! Application layer: the wallet `Service` and its dump-file persistence.
//!
//! The service owns all ledger state and exposes synchronous operations; export and
//! import are implemented on top of its public surface.

pub mod persistence;
pub mod service;
