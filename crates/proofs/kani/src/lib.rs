//! Kani proofs for the constant-product pool model
//!
//! Run with `cargo kani -p proofs-kani`.

#![cfg_attr(kani, feature(register_tool), register_tool(kanitool))]

pub mod generators;
pub mod sanitizer;

#[cfg(kani)]
pub mod minimal;

#[cfg(kani)]
pub mod safety;
