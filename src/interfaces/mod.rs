//! Text formats the ledger reads and writes.

pub mod csv;
pub mod dump;
