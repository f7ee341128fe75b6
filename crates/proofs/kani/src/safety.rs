//! Kani proofs for the pool invariants

use crate::generators::*;
use kani::{any, assume};
use pool_model::math::{self, Rounding};
use pool_model::*;

/// Every successful swap leaves x·y no smaller
#[kani::proof]
fn swap_never_decreases_product() {
    let snapshot = any_live_snapshot();
    let fee_bps = any_fee();
    let amount_in = any_amount();
    let min_out: u64 = any();

    if let Ok(quote) = plan_swap(
        &pool_with_fee(fee_bps),
        &snapshot,
        &funded_user(),
        any_direction(),
        amount_in,
        min_out,
    ) {
        kani::assert(
            product_non_decreasing(&snapshot.reserves, &quote.reserves_after),
            "swap must not decrease the reserve product",
        );
        kani::assert(quote.amount_out >= min_out, "swap must honour min_amount_out");
        kani::assert(quote.amount_out > 0, "swap must pay something");
    }
}

/// Swap output never drains a vault
#[kani::proof]
fn swap_never_drains_vault() {
    let snapshot = any_live_snapshot();
    let direction = any_direction();

    if let Ok(quote) = plan_swap(
        &pool_with_fee(any_fee()),
        &snapshot,
        &funded_user(),
        direction,
        any_amount(),
        0,
    ) {
        let (_, reserve_out) = snapshot.reserves.oriented(direction);
        kani::assert(quote.amount_out < reserve_out, "output must leave liquidity behind");
    }
}

/// Deposit then withdraw of the same shares never returns more than paid
#[kani::proof]
fn deposit_withdraw_round_trip_never_profits() {
    let snapshot = any_live_snapshot();
    let lp_amount = any_amount();
    assume(lp_amount > 0);

    let config = pool_with_fee(30);
    let user = funded_user();

    let Ok(deposit) = plan_deposit(&config, &snapshot, &user, lp_amount, u64::MAX, u64::MAX) else {
        return;
    };

    let after = PoolSnapshot {
        reserves: Reserves::new(
            snapshot.reserves.x + deposit.amount_x,
            snapshot.reserves.y + deposit.amount_y,
        ),
        lp_supply: snapshot.lp_supply + deposit.lp_minted,
    };

    if let Ok(withdraw) = plan_withdraw(&config, &after, &user, lp_amount, 0, 0) {
        kani::assert(withdraw.amount_x <= deposit.amount_x, "X round trip must not profit");
        kani::assert(withdraw.amount_y <= deposit.amount_y, "Y round trip must not profit");
    }
}

/// Rounding direction: up never below exact, down never above
#[kani::proof]
fn mul_div_rounding_brackets_exact() {
    let a = any_amount();
    let b = any_amount();
    let d = any_amount();
    assume(d > 0);

    if let (Ok(up), Ok(down)) = (
        math::mul_div(a, b, d, Rounding::Up),
        math::mul_div(a, b, d, Rounding::Down),
    ) {
        let exact = u128::from(a) * u128::from(b);
        kani::assert(u128::from(up) * u128::from(d) >= exact, "ceil below exact");
        kani::assert(u128::from(down) * u128::from(d) <= exact, "floor above exact");
        kani::assert(up - down <= 1, "ceil and floor differ by at most one");
    }
}

/// A higher fee never yields more output
#[kani::proof]
fn fee_monotonicity() {
    let snapshot = any_live_snapshot();
    let amount_in = any_amount();
    let fee_lo = any_fee();
    let fee_hi = any_fee();
    assume(fee_lo <= fee_hi);

    if let (Ok(lo), Ok(hi)) = (
        quote_swap(fee_lo, &snapshot.reserves, SwapDirection::XToY, amount_in),
        quote_swap(fee_hi, &snapshot.reserves, SwapDirection::XToY, amount_in),
    ) {
        kani::assert(hi.amount_out <= lo.amount_out, "higher fee must not pay more");
    }
}

/// A locked pool rejects every trading operation
#[kani::proof]
fn locked_pool_rejects_everything() {
    let snapshot = any_live_snapshot();
    let mut config = pool_with_fee(any_fee());
    config.locked = true;
    let user = funded_user();
    let amount = any_amount();

    kani::assert(
        plan_deposit(&config, &snapshot, &user, amount, any(), any()) == Err(AmmError::PoolLocked),
        "deposit must fail on a locked pool",
    );
    kani::assert(
        plan_withdraw(&config, &snapshot, &user, amount, any(), any()) == Err(AmmError::PoolLocked),
        "withdraw must fail on a locked pool",
    );
    kani::assert(
        plan_swap(&config, &snapshot, &user, any_direction(), amount, any()) == Err(AmmError::PoolLocked),
        "swap must fail on a locked pool",
    );
}
