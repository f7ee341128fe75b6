//! Withdraw instruction - remove liquidity

use super::{load_pool, validate_pool_accounts, validate_programs};
use crate::custody::{CpiCustody, PoolAccounts};
use cpamm_common::*;
use pinocchio::{account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult};
use pinocchio_log::log;
use pool_model::ledger;

/// Burn `lp_amount` LP shares for a pro-rata share of both reserves
///
/// Accounts: same order as Deposit.
pub fn process_withdraw(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    lp_amount: u64,
    min_x: u64,
    min_y: u64,
) -> ProgramResult {
    let [user, mint_x, mint_y, config, mint_lp, vault_x, vault_y, user_x, user_y, user_lp, token_program, ata_program, system_program, ..] =
        accounts
    else {
        msg!("Error: Withdraw requires 13 accounts");
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    validate_signer(user)?;
    validate_programs(token_program, ata_program, system_program)?;

    let pool = load_pool(program_id, config)?;
    validate_pool_accounts(&pool, config, mint_x, mint_y, mint_lp, vault_x, vault_y)?;

    let mut custody = CpiCustody::new(
        PoolAccounts {
            user,
            config,
            mint_lp,
            vault_x,
            vault_y,
            user_x,
            user_y,
            user_lp: Some(user_lp),
        },
        pool.seed,
        pool.bumps.config,
    );

    let plan = ledger::withdraw(&pool, &mut custody, lp_amount, min_x, min_y)?;

    log!(
        "Withdraw: lp={} x={} y={}",
        plan.lp_burned,
        plan.amount_x,
        plan.amount_y
    );
    Ok(())
}
