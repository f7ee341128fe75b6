//! Constant-product AMM program (x·y=k)
//!
//! ## Instructions
//!
//! - **Initialize** (0): Create pool config, LP mint and both vaults
//! - **Deposit** (1): Add liquidity for a requested number of LP shares
//! - **Withdraw** (2): Burn LP shares for a pro-rata cut of both reserves
//! - **Swap** (3): Trade one asset for the other along the curve
//! - **Lock** (4) / **Unlock** (5): Pause toggle, pool authority only
//!
//! Reserves are the live vault balances; the config account stores no
//! amounts. All pricing is done by `pool_model`.

#![cfg_attr(target_os = "solana", no_std)]

pub mod custody;
pub mod entrypoint;
pub mod instructions;
pub mod pda;
pub mod state;

// Panic handler for no_std builds (only for Solana BPF)
#[cfg(all(target_os = "solana", not(test)))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

pub use state::*;

pinocchio_pubkey::declare_id!("CPAMMd1cN6qZKpTrVwX8Hy4bGfE3sJ2uRkLm9nWoQz7a");
