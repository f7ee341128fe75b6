//! Pure constant-product pool model
//!
//! No Solana dependencies, no unwrap/panic, all arithmetic checked.
//! The on-chain program and the client both drive pools through this crate;
//! token movements go through the [`ledger::TokenCustody`] capability.

#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod math;
pub mod state;
pub mod transitions;
pub mod helpers;
pub mod ledger;

pub use error::*;
pub use state::*;
pub use transitions::*;
pub use helpers::*;
