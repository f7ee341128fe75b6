//! cpamm client library
//!
//! Address derivation, instruction builders, offline quotes and pool
//! inspection shared by the `cpamm` binary and the integration tests.

pub mod config;
pub mod error;
pub mod pda;
pub mod pool;
pub mod quote;
pub mod tx_builder;
