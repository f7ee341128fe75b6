//! Generators for arbitrary pools (for Kani)

#[cfg(kani)]
use kani::any;
use pool_model::*;

#[cfg(kani)]
use crate::sanitizer::{Sanitize, MAX_AMOUNT};

/// Fixed permissionless pool with the given fee
pub fn pool_with_fee(fee_bps: u16) -> PoolConfig {
    PoolConfig {
        seed: 0,
        authority: Authority::Permissionless,
        mint_x: [1; 32],
        mint_y: [2; 32],
        mint_lp: [3; 32],
        fee_bps,
        locked: false,
        bumps: PoolBumps::default(),
    }
}

/// User holding more than any bounded operation needs
pub fn funded_user() -> UserBalances {
    UserBalances {
        x: u64::MAX / 2,
        y: u64::MAX / 2,
        lp: u64::MAX / 2,
    }
}

#[cfg(kani)]
pub fn any_fee() -> u16 {
    let raw: u16 = any();
    raw % 10_000
}

#[cfg(kani)]
pub fn any_amount() -> u64 {
    let raw: u64 = any();
    raw % MAX_AMOUNT
}

#[cfg(kani)]
pub fn any_direction() -> SwapDirection {
    SwapDirection::from_flag(any())
}

/// Non-empty pool with bounded reserves and supply
#[cfg(kani)]
pub fn any_live_snapshot() -> PoolSnapshot {
    let snapshot = PoolSnapshot {
        reserves: Reserves::new(any(), any()),
        lp_supply: any(),
    }
    .sanitize();
    kani::assume(snapshot.reserves.x > 0 && snapshot.reserves.y > 0);
    snapshot
}
