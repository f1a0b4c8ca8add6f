//! Domain model: accounts, payments, favorites and the ports the service depends on.

pub mod account;
pub mod favorite;
pub mod payment;
pub mod ports;
