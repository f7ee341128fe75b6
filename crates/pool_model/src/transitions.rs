//! State transition functions - all total, no panics
//!
//! Each `plan_*` function is a pure function of (config, snapshot, user
//! balances, args). It validates everything and returns the exact token
//! movements the operation will perform; nothing is moved here. Check order
//! is fixed: lock, argument sanity, arithmetic, slippage, liquidity, balances.

use crate::error::AmmError;
use crate::helpers::ensure_product_non_decreasing;
use crate::math::{self, BPS_DENOMINATOR};
use crate::state::*;

/// Arguments to create a pool
#[derive(Debug, Clone, Copy)]
pub struct InitializeParams {
    pub seed: u64,
    pub fee_bps: u16,
    pub authority: Authority,
    pub mint_x: Address,
    pub mint_y: Address,
    pub mint_lp: Address,
    pub bumps: PoolBumps,
}

/// Validate initialize arguments and build the unlocked config
pub fn initialize(params: InitializeParams) -> Result<PoolConfig, AmmError> {
    if u64::from(params.fee_bps) >= BPS_DENOMINATOR {
        return Err(AmmError::InvalidFee);
    }
    if params.mint_x == params.mint_y {
        return Err(AmmError::DuplicateMint);
    }

    Ok(PoolConfig {
        seed: params.seed,
        authority: params.authority,
        mint_x: params.mint_x,
        mint_y: params.mint_y,
        mint_lp: params.mint_lp,
        fee_bps: params.fee_bps,
        locked: false,
        bumps: params.bumps,
    })
}

/// Pause gate shared by deposit, withdraw and swap
pub fn ensure_unlocked(config: &PoolConfig) -> Result<(), AmmError> {
    if config.locked {
        return Err(AmmError::PoolLocked);
    }
    Ok(())
}

/// Token movements of a deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositPlan {
    /// X moved user -> vault
    pub amount_x: u64,
    /// Y moved user -> vault
    pub amount_y: u64,
    /// LP minted to the user
    pub lp_minted: u64,
    /// True when this deposit set the pool's price
    pub first_deposit: bool,
}

/// Plan a deposit of `lp_amount` shares bounded by `max_x`/`max_y`
///
/// First deposit (supply == 0): the caller's stated amounts `max_x`/`max_y`
/// are taken in full and set the price; `lp_amount` shares are minted.
/// Otherwise each side is `ceil(lp_amount * reserve / supply)`.
pub fn plan_deposit(
    config: &PoolConfig,
    snapshot: &PoolSnapshot,
    user: &UserBalances,
    lp_amount: u64,
    max_x: u64,
    max_y: u64,
) -> Result<DepositPlan, AmmError> {
    ensure_unlocked(config)?;

    if lp_amount == 0 {
        return Err(AmmError::InvalidAmount);
    }

    let first_deposit = snapshot.lp_supply == 0;

    let (amount_x, amount_y) = if first_deposit {
        // A one-sided seed would leave supply > 0 with an empty reserve
        if max_x == 0 || max_y == 0 {
            return Err(AmmError::InvalidAmount);
        }
        (max_x, max_y)
    } else {
        math::deposit_amounts(
            lp_amount,
            snapshot.reserves.x,
            snapshot.reserves.y,
            snapshot.lp_supply,
        )?
    };

    if amount_x > max_x || amount_y > max_y {
        return Err(AmmError::SlippageExceeded);
    }

    snapshot
        .lp_supply
        .checked_add(lp_amount)
        .ok_or(AmmError::MathOverflow)?;
    snapshot
        .reserves
        .x
        .checked_add(amount_x)
        .ok_or(AmmError::MathOverflow)?;
    snapshot
        .reserves
        .y
        .checked_add(amount_y)
        .ok_or(AmmError::MathOverflow)?;

    if user.x < amount_x || user.y < amount_y {
        return Err(AmmError::InsufficientBalance);
    }

    Ok(DepositPlan {
        amount_x,
        amount_y,
        lp_minted: lp_amount,
        first_deposit,
    })
}

/// Token movements of a withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawPlan {
    /// X moved vault -> user
    pub amount_x: u64,
    /// Y moved vault -> user
    pub amount_y: u64,
    /// LP burned from the user
    pub lp_burned: u64,
}

/// Plan redeeming `lp_amount` shares with floors `min_x`/`min_y`
pub fn plan_withdraw(
    config: &PoolConfig,
    snapshot: &PoolSnapshot,
    user: &UserBalances,
    lp_amount: u64,
    min_x: u64,
    min_y: u64,
) -> Result<WithdrawPlan, AmmError> {
    ensure_unlocked(config)?;

    if lp_amount == 0 || lp_amount > snapshot.lp_supply {
        return Err(AmmError::InvalidAmount);
    }
    if lp_amount > user.lp {
        return Err(AmmError::InsufficientBalance);
    }

    let (amount_x, amount_y) = math::withdraw_amounts(
        lp_amount,
        snapshot.reserves.x,
        snapshot.reserves.y,
        snapshot.lp_supply,
    )?;

    if amount_x < min_x || amount_y < min_y {
        return Err(AmmError::SlippageExceeded);
    }

    // Burning shares for nothing only destroys the caller's claim
    if amount_x == 0 && amount_y == 0 {
        return Err(AmmError::InvalidAmount);
    }

    Ok(WithdrawPlan {
        amount_x,
        amount_y,
        lp_burned: lp_amount,
    })
}

/// Swap pricing result (also the swap plan)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    /// Full input moved user -> vault_in (fee included)
    pub amount_in: u64,
    /// Input that moves along the curve
    pub amount_in_after_fee: u64,
    /// Portion of the input withheld as fee; stays in vault_in
    pub fee: u64,
    /// Output moved vault_out -> user
    pub amount_out: u64,
    /// Reserves once the swap settles
    pub reserves_after: Reserves,
}

/// Price a swap against `reserves` without any slippage, lock, or balance checks
pub fn quote_swap(
    fee_bps: u16,
    reserves: &Reserves,
    direction: SwapDirection,
    amount_in: u64,
) -> Result<SwapQuote, AmmError> {
    if amount_in == 0 {
        return Err(AmmError::InvalidAmount);
    }

    let (reserve_in, reserve_out) = reserves.oriented(direction);
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }

    let amount_in_after_fee = math::fee_adjusted_input(amount_in, fee_bps)?;
    let amount_out = math::constant_product_out(reserve_in, reserve_out, amount_in_after_fee)?;

    let new_in = reserve_in
        .checked_add(amount_in)
        .ok_or(AmmError::MathOverflow)?;
    // amount_out > reserve_out is rejected by the caller; saturate so the
    // quote itself stays total
    let new_out = reserve_out.saturating_sub(amount_out);

    let reserves_after = match direction {
        SwapDirection::XToY => Reserves::new(new_in, new_out),
        SwapDirection::YToX => Reserves::new(new_out, new_in),
    };

    Ok(SwapQuote {
        direction,
        amount_in,
        amount_in_after_fee,
        fee: amount_in - amount_in_after_fee,
        amount_out,
        reserves_after,
    })
}

/// Plan a swap of `amount_in` with output floor `min_amount_out`
pub fn plan_swap(
    config: &PoolConfig,
    snapshot: &PoolSnapshot,
    user: &UserBalances,
    direction: SwapDirection,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<SwapQuote, AmmError> {
    ensure_unlocked(config)?;

    let quote = quote_swap(config.fee_bps, &snapshot.reserves, direction, amount_in)?;
    let (_, reserve_out) = snapshot.reserves.oriented(direction);

    if quote.amount_out < min_amount_out {
        return Err(AmmError::SlippageExceeded);
    }
    if quote.amount_out == 0 || quote.amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }

    ensure_product_non_decreasing(&snapshot.reserves, &quote.reserves_after)?;

    if user.get(direction.input_side()) < amount_in {
        return Err(AmmError::InsufficientBalance);
    }

    Ok(quote)
}

/// Lock or unlock the pool. Only a WithAuthority pool's authority may do it.
pub fn set_locked(config: &mut PoolConfig, signer: &Address, locked: bool) -> Result<(), AmmError> {
    if !config.authority.permits(signer) {
        return Err(AmmError::Unauthorized);
    }

    match (config.locked, locked) {
        (true, true) => Err(AmmError::PoolLocked),
        (false, false) => Err(AmmError::PoolUnlocked),
        _ => {
            config.locked = locked;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: Address = [9; 32];

    fn params(fee_bps: u16, authority: Authority) -> InitializeParams {
        InitializeParams {
            seed: 42,
            fee_bps,
            authority,
            mint_x: [1; 32],
            mint_y: [2; 32],
            mint_lp: [3; 32],
            bumps: PoolBumps { config: 255, lp_mint: 254, vault_x: 253, vault_y: 252 },
        }
    }

    fn pool(fee_bps: u16) -> PoolConfig {
        initialize(params(fee_bps, Authority::Permissionless)).unwrap()
    }

    fn snapshot(x: u64, y: u64, supply: u64) -> PoolSnapshot {
        PoolSnapshot { reserves: Reserves::new(x, y), lp_supply: supply }
    }

    fn rich_user() -> UserBalances {
        UserBalances { x: 10_000_000, y: 10_000_000, lp: 10_000_000 }
    }

    #[test]
    fn test_initialize_starts_unlocked() {
        let config = initialize(params(30, Authority::WithAuthority(ADMIN))).unwrap();

        assert!(!config.locked);
        assert_eq!(config.fee_bps, 30);
        assert_eq!(config.seed, 42);
        assert_eq!(config.bumps.config, 255);
    }

    #[test]
    fn test_initialize_rejects_bad_fee() {
        assert!(initialize(params(9_999, Authority::Permissionless)).is_ok());
        assert_eq!(
            initialize(params(10_000, Authority::Permissionless)),
            Err(AmmError::InvalidFee)
        );
    }

    #[test]
    fn test_initialize_rejects_duplicate_mint() {
        let mut p = params(30, Authority::Permissionless);
        p.mint_y = p.mint_x;
        assert_eq!(initialize(p), Err(AmmError::DuplicateMint));
    }

    #[test]
    fn test_first_deposit_takes_stated_amounts() {
        let plan = plan_deposit(&pool(30), &snapshot(0, 0, 0), &rich_user(), 500_000, 600_000, 600_000)
            .unwrap();

        assert!(plan.first_deposit);
        assert_eq!(plan.amount_x, 600_000);
        assert_eq!(plan.amount_y, 600_000);
        assert_eq!(plan.lp_minted, 500_000);
    }

    #[test]
    fn test_first_deposit_rejects_one_sided_seed() {
        let result = plan_deposit(&pool(30), &snapshot(0, 0, 0), &rich_user(), 100, 100, 0);
        assert_eq!(result, Err(AmmError::InvalidAmount));
    }

    #[test]
    fn test_proportional_deposit_rounds_up() {
        // 10/10 backing 3 shares: one more share costs ceil(10/3) = 4 each
        let plan = plan_deposit(&pool(30), &snapshot(10, 10, 3), &rich_user(), 1, 4, 4).unwrap();

        assert!(!plan.first_deposit);
        assert_eq!((plan.amount_x, plan.amount_y), (4, 4));
    }

    #[test]
    fn test_deposit_slippage() {
        let result = plan_deposit(&pool(30), &snapshot(10, 10, 3), &rich_user(), 1, 3, 4);
        assert_eq!(result, Err(AmmError::SlippageExceeded));
    }

    #[test]
    fn test_deposit_zero_shares() {
        let result = plan_deposit(&pool(30), &snapshot(10, 10, 3), &rich_user(), 0, 100, 100);
        assert_eq!(result, Err(AmmError::InvalidAmount));
    }

    #[test]
    fn test_deposit_supply_overflow() {
        let result = plan_deposit(
            &pool(30),
            &snapshot(1, 1, u64::MAX),
            &rich_user(),
            1,
            u64::MAX,
            u64::MAX,
        );
        assert_eq!(result, Err(AmmError::MathOverflow));
    }

    #[test]
    fn test_deposit_requires_balance() {
        let poor = UserBalances { x: 3, y: 100, lp: 0 };
        let result = plan_deposit(&pool(30), &snapshot(10, 10, 3), &poor, 1, 4, 4);
        assert_eq!(result, Err(AmmError::InsufficientBalance));
    }

    #[test]
    fn test_withdraw_rounds_down() {
        let plan = plan_withdraw(&pool(30), &snapshot(10, 10, 3), &rich_user(), 1, 0, 0).unwrap();
        assert_eq!((plan.amount_x, plan.amount_y), (3, 3));
        assert_eq!(plan.lp_burned, 1);
    }

    #[test]
    fn test_withdraw_full_supply() {
        let user = UserBalances { x: 0, y: 0, lp: 400_000 };
        let plan = plan_withdraw(&pool(30), &snapshot(480_000, 480_000, 400_000), &user, 400_000, 1, 1)
            .unwrap();
        assert_eq!((plan.amount_x, plan.amount_y), (480_000, 480_000));
    }

    #[test]
    fn test_withdraw_bounds() {
        let config = pool(30);
        let snap = snapshot(600_000, 600_000, 500_000);
        let user = UserBalances { x: 0, y: 0, lp: 100 };

        assert_eq!(
            plan_withdraw(&config, &snap, &user, 0, 0, 0),
            Err(AmmError::InvalidAmount)
        );
        assert_eq!(
            plan_withdraw(&config, &snap, &user, 101, 0, 0),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(
            plan_withdraw(&config, &snap, &rich_user(), 500_001, 0, 0),
            Err(AmmError::InvalidAmount)
        );
        assert_eq!(
            plan_withdraw(&config, &snap, &user, 100, 121, 0),
            Err(AmmError::SlippageExceeded)
        );
    }

    #[test]
    fn test_withdraw_dust_rejected() {
        // 1 share of a 1000-share pool holding 10/10 is worth nothing
        let result = plan_withdraw(&pool(30), &snapshot(10, 10, 1_000), &rich_user(), 1, 0, 0);
        assert_eq!(result, Err(AmmError::InvalidAmount));
    }

    #[test]
    fn test_reference_swap() {
        let quote = plan_swap(
            &pool(30),
            &snapshot(480_000, 480_000, 400_000),
            &rich_user(),
            SwapDirection::XToY,
            50_000,
            1,
        )
        .unwrap();

        assert_eq!(quote.amount_in_after_fee, 49_850);
        assert_eq!(quote.fee, 150);
        assert_eq!(quote.amount_out, 45_159);
        assert_eq!(quote.reserves_after, Reserves::new(530_000, 434_841));
    }

    #[test]
    fn test_swap_y_to_x_orientation() {
        let quote = plan_swap(
            &pool(0),
            &snapshot(1_000, 4_000, 2_000),
            &rich_user(),
            SwapDirection::YToX,
            400,
            1,
        )
        .unwrap();

        // 1000·400/4400 = 90.9 -> 90
        assert_eq!(quote.amount_out, 90);
        assert_eq!(quote.reserves_after, Reserves::new(910, 4_400));
    }

    #[test]
    fn test_swap_slippage_checked_before_liquidity() {
        // 1 unit in with a fee yields zero out; a floor above it is slippage
        let result = plan_swap(
            &pool(30),
            &snapshot(1_000, 1_000, 1_000),
            &rich_user(),
            SwapDirection::XToY,
            1,
            1,
        );
        assert_eq!(result, Err(AmmError::SlippageExceeded));

        // With no floor the same swap is a liquidity failure
        let result = plan_swap(
            &pool(30),
            &snapshot(1_000, 1_000, 1_000),
            &rich_user(),
            SwapDirection::XToY,
            1,
            0,
        );
        assert_eq!(result, Err(AmmError::InsufficientLiquidity));
    }

    #[test]
    fn test_swap_empty_pool() {
        let result = plan_swap(&pool(30), &snapshot(0, 0, 0), &rich_user(), SwapDirection::XToY, 100, 0);
        assert_eq!(result, Err(AmmError::InsufficientLiquidity));
    }

    #[test]
    fn test_swap_zero_input() {
        let result = plan_swap(&pool(30), &snapshot(10, 10, 10), &rich_user(), SwapDirection::XToY, 0, 0);
        assert_eq!(result, Err(AmmError::InvalidAmount));
    }

    #[test]
    fn test_swap_requires_balance() {
        let poor = UserBalances { x: 49_999, y: 0, lp: 0 };
        let result = plan_swap(
            &pool(30),
            &snapshot(480_000, 480_000, 400_000),
            &poor,
            SwapDirection::XToY,
            50_000,
            1,
        );
        assert_eq!(result, Err(AmmError::InsufficientBalance));
    }

    #[test]
    fn test_swap_input_overflow() {
        let result = plan_swap(
            &pool(0),
            &snapshot(u64::MAX, 1_000, 1),
            &rich_user(),
            SwapDirection::XToY,
            u64::MAX,
            0,
        );
        assert_eq!(result, Err(AmmError::MathOverflow));
    }

    #[test]
    fn test_locked_pool_rejects_before_arithmetic() {
        let mut config = initialize(params(30, Authority::WithAuthority(ADMIN))).unwrap();
        set_locked(&mut config, &ADMIN, true).unwrap();

        // Arguments that would otherwise fail differently still report the lock
        let snap = snapshot(0, 0, 0);
        assert_eq!(
            plan_deposit(&config, &snap, &rich_user(), 0, 0, 0),
            Err(AmmError::PoolLocked)
        );
        assert_eq!(
            plan_withdraw(&config, &snap, &rich_user(), 0, 0, 0),
            Err(AmmError::PoolLocked)
        );
        assert_eq!(
            plan_swap(&config, &snap, &rich_user(), SwapDirection::XToY, 0, 0),
            Err(AmmError::PoolLocked)
        );
    }

    #[test]
    fn test_lock_unlock_cycle() {
        let mut config = initialize(params(30, Authority::WithAuthority(ADMIN))).unwrap();

        assert_eq!(set_locked(&mut config, &ADMIN, false), Err(AmmError::PoolUnlocked));
        set_locked(&mut config, &ADMIN, true).unwrap();
        assert!(config.locked);
        assert_eq!(set_locked(&mut config, &ADMIN, true), Err(AmmError::PoolLocked));
        set_locked(&mut config, &ADMIN, false).unwrap();
        assert!(!config.locked);
    }

    #[test]
    fn test_lock_requires_authority() {
        let mut gated = initialize(params(30, Authority::WithAuthority(ADMIN))).unwrap();
        assert_eq!(set_locked(&mut gated, &[1; 32], true), Err(AmmError::Unauthorized));

        let mut open = pool(30);
        assert_eq!(set_locked(&mut open, &ADMIN, true), Err(AmmError::Unauthorized));
        assert!(!open.locked);
    }
}
