//! Deposit instruction - add liquidity

use super::{create_associated_token_account, load_pool, validate_pool_accounts, validate_programs};
use crate::custody::{CpiCustody, PoolAccounts};
use cpamm_common::*;
use pinocchio::{account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult};
use pinocchio_log::log;
use pool_model::ledger;

/// Deposit X and Y for `lp_amount` new LP shares
///
/// Accounts:
/// 0. `[signer, writable]` User
/// 1. `[]` Mint X
/// 2. `[]` Mint Y
/// 3. `[]` Config
/// 4. `[writable]` LP mint
/// 5. `[writable]` Vault X
/// 6. `[writable]` Vault Y
/// 7. `[writable]` User X token account
/// 8. `[writable]` User Y token account
/// 9. `[writable]` User LP token account (created if missing)
/// 10. `[]` Token program
/// 11. `[]` Associated token program
/// 12. `[]` System program
pub fn process_deposit(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    lp_amount: u64,
    max_x: u64,
    max_y: u64,
) -> ProgramResult {
    let [user, mint_x, mint_y, config, mint_lp, vault_x, vault_y, user_x, user_y, user_lp, token_program, ata_program, system_program, ..] =
        accounts
    else {
        msg!("Error: Deposit requires 13 accounts");
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    validate_signer(user)?;
    validate_programs(token_program, ata_program, system_program)?;

    let pool = load_pool(program_id, config)?;
    validate_pool_accounts(&pool, config, mint_x, mint_y, mint_lp, vault_x, vault_y)?;

    if user_lp.data_len() == 0 {
        create_associated_token_account(user, user_lp, user, mint_lp, system_program, token_program)?;
    }

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

    let plan = ledger::deposit(&pool, &mut custody, lp_amount, max_x, max_y)?;

    log!(
        "Deposit: lp={} x={} y={}",
        plan.lp_minted,
        plan.amount_x,
        plan.amount_y
    );
    Ok(())
}
