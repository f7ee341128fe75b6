//! Offline previews and slippage bounds
//!
//! Uses the same pool model as the program, so a preview taken against a
//! fresh snapshot matches what the program will compute.

use crate::error::ClientError;
use pool_model::math::{self, Rounding, BPS_DENOMINATOR};
use pool_model::{quote_swap, PoolSnapshot, SwapDirection, SwapQuote};

/// Shrink an amount the caller receives by `slippage_bps`
pub fn min_with_slippage(amount: u64, slippage_bps: u16) -> Result<u64, ClientError> {
    let keep = BPS_DENOMINATOR.saturating_sub(u64::from(slippage_bps));
    Ok(math::mul_div(amount, keep, BPS_DENOMINATOR, Rounding::Down)?)
}

/// Grow an amount the caller pays by `slippage_bps`
pub fn max_with_slippage(amount: u64, slippage_bps: u16) -> Result<u64, ClientError> {
    let allow = BPS_DENOMINATOR + u64::from(slippage_bps);
    Ok(math::mul_div(amount, allow, BPS_DENOMINATOR, Rounding::Up)?)
}

/// Swap preview with a derived output floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPreview {
    pub quote: SwapQuote,
    pub min_amount_out: u64,
}

pub fn preview_swap(
    snapshot: &PoolSnapshot,
    fee_bps: u16,
    direction: SwapDirection,
    amount_in: u64,
    slippage_bps: u16,
) -> Result<SwapPreview, ClientError> {
    let quote = quote_swap(fee_bps, &snapshot.reserves, direction, amount_in)?;
    let min_amount_out = min_with_slippage(quote.amount_out, slippage_bps)?.max(1);
    Ok(SwapPreview { quote, min_amount_out })
}

/// Token bounds for a deposit of `lp_amount` shares into a live pool
pub fn deposit_bounds(
    snapshot: &PoolSnapshot,
    lp_amount: u64,
    slippage_bps: u16,
) -> Result<(u64, u64), ClientError> {
    if snapshot.lp_supply == 0 {
        return Err(ClientError::FirstDepositAmounts);
    }
    let (x, y) = math::deposit_amounts(
        lp_amount,
        snapshot.reserves.x,
        snapshot.reserves.y,
        snapshot.lp_supply,
    )?;
    Ok((max_with_slippage(x, slippage_bps)?, max_with_slippage(y, slippage_bps)?))
}

/// Output floors for redeeming `lp_amount` shares
pub fn withdraw_bounds(
    snapshot: &PoolSnapshot,
    lp_amount: u64,
    slippage_bps: u16,
) -> Result<(u64, u64), ClientError> {
    let (x, y) = math::withdraw_amounts(
        lp_amount,
        snapshot.reserves.x,
        snapshot.reserves.y,
        snapshot.lp_supply,
    )?;
    Ok((min_with_slippage(x, slippage_bps)?, min_with_slippage(y, slippage_bps)?))
}
