//! Operation drivers over a token custody capability
//!
//! The drivers read a snapshot, plan with [`crate::transitions`], then move
//! tokens in a fixed order. Any failure aborts the whole operation; callers
//! must provide all-or-nothing semantics (the runtime does this on-chain,
//! [`MemoryPool::transact`] does it in memory).

use crate::error::AmmError;
use crate::helpers::ensure_product_non_decreasing;
use crate::state::*;
use crate::transitions::*;

/// Balance reads and token movements for one pool and one user
pub trait TokenCustody {
    type Error: From<AmmError>;

    /// Current vault balances and LP supply
    fn snapshot(&self) -> Result<PoolSnapshot, Self::Error>;

    /// Calling user's balances of X, Y and LP
    fn user_balances(&self) -> Result<UserBalances, Self::Error>;

    /// user -> vault
    fn deposit_to_vault(&mut self, side: Side, amount: u64) -> Result<(), Self::Error>;

    /// vault -> user, signed by the pool
    fn pay_from_vault(&mut self, side: Side, amount: u64) -> Result<(), Self::Error>;

    fn mint_lp(&mut self, amount: u64) -> Result<(), Self::Error>;

    fn burn_lp(&mut self, amount: u64) -> Result<(), Self::Error>;
}

/// Deposit `lp_amount` shares worth of X and Y
pub fn deposit<C: TokenCustody>(
    config: &PoolConfig,
    custody: &mut C,
    lp_amount: u64,
    max_x: u64,
    max_y: u64,
) -> Result<DepositPlan, C::Error> {
    let snapshot = custody.snapshot()?;
    let user = custody.user_balances()?;
    let plan = plan_deposit(config, &snapshot, &user, lp_amount, max_x, max_y)?;

    if plan.amount_x > 0 {
        custody.deposit_to_vault(Side::X, plan.amount_x)?;
    }
    if plan.amount_y > 0 {
        custody.deposit_to_vault(Side::Y, plan.amount_y)?;
    }
    custody.mint_lp(plan.lp_minted)?;

    Ok(plan)
}

/// Burn `lp_amount` shares and pay out the pro-rata reserves
pub fn withdraw<C: TokenCustody>(
    config: &PoolConfig,
    custody: &mut C,
    lp_amount: u64,
    min_x: u64,
    min_y: u64,
) -> Result<WithdrawPlan, C::Error> {
    let snapshot = custody.snapshot()?;
    let user = custody.user_balances()?;
    let plan = plan_withdraw(config, &snapshot, &user, lp_amount, min_x, min_y)?;

    custody.burn_lp(plan.lp_burned)?;
    if plan.amount_x > 0 {
        custody.pay_from_vault(Side::X, plan.amount_x)?;
    }
    if plan.amount_y > 0 {
        custody.pay_from_vault(Side::Y, plan.amount_y)?;
    }

    Ok(plan)
}

/// Swap `amount_in` of the input side for at least `min_amount_out`
///
/// Re-reads the vaults after settling and rejects the swap if the reserve
/// product went down.
pub fn swap<C: TokenCustody>(
    config: &PoolConfig,
    custody: &mut C,
    direction: SwapDirection,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<SwapQuote, C::Error> {
    let before = custody.snapshot()?;
    let user = custody.user_balances()?;
    let quote = plan_swap(config, &before, &user, direction, amount_in, min_amount_out)?;

    custody.deposit_to_vault(direction.input_side(), quote.amount_in)?;
    custody.pay_from_vault(direction.output_side(), quote.amount_out)?;

    let after = custody.snapshot()?;
    ensure_product_non_decreasing(&before.reserves, &after.reserves)?;

    Ok(quote)
}

/// In-memory pool ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryPool {
    pub vault_x: u64,
    pub vault_y: u64,
    pub lp_supply: u64,
}

impl MemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            reserves: Reserves::new(self.vault_x, self.vault_y),
            lp_supply: self.lp_supply,
        }
    }

    /// Tokens sent straight to a vault, outside any pool operation
    pub fn donate(&mut self, side: Side, amount: u64) -> Result<(), AmmError> {
        let vault = self.vault_mut(side);
        *vault = vault.checked_add(amount).ok_or(AmmError::MathOverflow)?;
        Ok(())
    }

    /// Run `f` against staged copies of the pool and `user`
    ///
    /// Both are written back only if `f` succeeds.
    pub fn transact<R>(
        &mut self,
        user: &mut UserBalances,
        f: impl FnOnce(&mut Session<'_>) -> Result<R, AmmError>,
    ) -> Result<R, AmmError> {
        let mut staged_pool = *self;
        let mut staged_user = *user;

        let result = f(&mut Session {
            pool: &mut staged_pool,
            user: &mut staged_user,
        })?;

        *self = staged_pool;
        *user = staged_user;
        Ok(result)
    }

    fn vault_mut(&mut self, side: Side) -> &mut u64 {
        match side {
            Side::X => &mut self.vault_x,
            Side::Y => &mut self.vault_y,
        }
    }
}

/// One user's view of a [`MemoryPool`] inside a transaction
pub struct Session<'a> {
    pool: &'a mut MemoryPool,
    user: &'a mut UserBalances,
}

impl Session<'_> {
    fn user_side_mut(&mut self, side: Side) -> &mut u64 {
        match side {
            Side::X => &mut self.user.x,
            Side::Y => &mut self.user.y,
        }
    }
}

impl TokenCustody for Session<'_> {
    type Error = AmmError;

    fn snapshot(&self) -> Result<PoolSnapshot, AmmError> {
        Ok(self.pool.snapshot())
    }

    fn user_balances(&self) -> Result<UserBalances, AmmError> {
        Ok(*self.user)
    }

    fn deposit_to_vault(&mut self, side: Side, amount: u64) -> Result<(), AmmError> {
        let from = self.user_side_mut(side);
        *from = from.checked_sub(amount).ok_or(AmmError::InsufficientBalance)?;
        self.pool.donate(side, amount)
    }

    fn pay_from_vault(&mut self, side: Side, amount: u64) -> Result<(), AmmError> {
        let vault = self.pool.vault_mut(side);
        *vault = vault.checked_sub(amount).ok_or(AmmError::InsufficientLiquidity)?;
        let to = self.user_side_mut(side);
        *to = to.checked_add(amount).ok_or(AmmError::MathOverflow)?;
        Ok(())
    }

    fn mint_lp(&mut self, amount: u64) -> Result<(), AmmError> {
        self.pool.lp_supply = self
            .pool
            .lp_supply
            .checked_add(amount)
            .ok_or(AmmError::MathOverflow)?;
        self.user.lp = self.user.lp.checked_add(amount).ok_or(AmmError::MathOverflow)?;
        Ok(())
    }

    fn burn_lp(&mut self, amount: u64) -> Result<(), AmmError> {
        self.user.lp = self
            .user
            .lp
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance)?;
        self.pool.lp_supply = self
            .pool
            .lp_supply
            .checked_sub(amount)
            .ok_or(AmmError::InvalidAmount)?;
        Ok(())
    }
}
