//! Invariant checking helpers

use crate::error::AmmError;
use crate::state::*;

/// Reserve product never decreases across a swap
pub fn product_non_decreasing(before: &Reserves, after: &Reserves) -> bool {
    after.product() >= before.product()
}

/// Post-swap check. A failure here is a rounding defect, never bad input.
pub fn ensure_product_non_decreasing(before: &Reserves, after: &Reserves) -> Result<(), AmmError> {
    if product_non_decreasing(before, after) {
        Ok(())
    } else {
        Err(AmmError::MathInvariantViolation)
    }
}

/// supply == 0 <=> both reserves empty
pub fn supply_matches_reserves(snapshot: &PoolSnapshot) -> bool {
    (snapshot.lp_supply == 0) == snapshot.reserves.is_empty()
}

/// Configuration fields that must never change after initialize
pub fn immutable_fields_unchanged(before: &PoolConfig, after: &PoolConfig) -> bool {
    before.seed == after.seed
        && before.fee_bps == after.fee_bps
        && before.mint_x == after.mint_x
        && before.mint_y == after.mint_y
        && before.mint_lp == after.mint_lp
        && before.authority == after.authority
        && before.bumps == after.bumps
}
