//! Constant product pool math (x·y=k)
//!
//! Every ratio in the pool goes through [`mul_div`] with an explicit rounding
//! direction: up for what the pool receives, down for what it pays out.
//! Intermediates are u128, so `u64 * u64` never overflows; only a result that
//! does not fit back into u64 (or a zero divisor) is an error.

use crate::error::AmmError;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Rounding direction for a ratio computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Floor - amounts the pool pays out
    Down,
    /// Ceiling - amounts the pool takes in
    Up,
}

/// `a * b / denominator` with a u128 intermediate and explicit rounding
pub fn mul_div(a: u64, b: u64, denominator: u64, rounding: Rounding) -> Result<u64, AmmError> {
    if denominator == 0 {
        return Err(AmmError::MathOverflow);
    }

    let numerator = u128::from(a)
        .checked_mul(u128::from(b))
        .ok_or(AmmError::MathOverflow)?;
    let denominator = u128::from(denominator);

    let quotient = numerator / denominator;
    let quotient = match rounding {
        Rounding::Up if numerator % denominator != 0 => {
            quotient.checked_add(1).ok_or(AmmError::MathOverflow)?
        }
        _ => quotient,
    };

    u64::try_from(quotient).map_err(|_| AmmError::MathOverflow)
}

/// Input left after the fee is withheld: `floor(amount_in * (10000 - fee_bps) / 10000)`
pub fn fee_adjusted_input(amount_in: u64, fee_bps: u16) -> Result<u64, AmmError> {
    let fee_bps = u64::from(fee_bps);
    if fee_bps >= BPS_DENOMINATOR {
        return Err(AmmError::InvalidFee);
    }
    mul_div(amount_in, BPS_DENOMINATOR - fee_bps, BPS_DENOMINATOR, Rounding::Down)
}

/// Output of the constant-product curve for a fee-adjusted input
///
/// - x1 = x0 + Δx_net
/// - Invariant: x0·y0 = x1·y1
/// - Δy_out = y0 - y1 = y0·Δx_net / (x0 + Δx_net), floored
pub fn constant_product_out(
    reserve_in: u64,
    reserve_out: u64,
    amount_in_after_fee: u64,
) -> Result<u64, AmmError> {
    let numerator = u128::from(reserve_out)
        .checked_mul(u128::from(amount_in_after_fee))
        .ok_or(AmmError::MathOverflow)?;
    let denominator = u128::from(reserve_in)
        .checked_add(u128::from(amount_in_after_fee))
        .ok_or(AmmError::MathOverflow)?;

    if denominator == 0 {
        return Err(AmmError::MathOverflow);
    }

    u64::try_from(numerator / denominator).map_err(|_| AmmError::MathOverflow)
}

/// k = x·y, exact in u128
pub fn pool_product(x: u64, y: u64) -> u128 {
    u128::from(x) * u128::from(y)
}

/// Token amounts a depositor owes for `lp_amount` new shares (rounded up)
pub fn deposit_amounts(
    lp_amount: u64,
    reserve_x: u64,
    reserve_y: u64,
    supply: u64,
) -> Result<(u64, u64), AmmError> {
    let x = mul_div(lp_amount, reserve_x, supply, Rounding::Up)?;
    let y = mul_div(lp_amount, reserve_y, supply, Rounding::Up)?;
    Ok((x, y))
}

/// Token amounts paid out for redeeming `lp_amount` shares (rounded down)
pub fn withdraw_amounts(
    lp_amount: u64,
    reserve_x: u64,
    reserve_y: u64,
    supply: u64,
) -> Result<(u64, u64), AmmError> {
    let x = mul_div(lp_amount, reserve_x, supply, Rounding::Down)?;
    let y = mul_div(lp_amount, reserve_y, supply, Rounding::Down)?;
    Ok((x, y))
}
