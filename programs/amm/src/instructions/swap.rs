//! Swap instruction - trade along the curve

use super::{load_pool, validate_pool_accounts, validate_programs};
use crate::custody::{CpiCustody, PoolAccounts};
use cpamm_common::*;
use pinocchio::{account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult};
use pinocchio_log::log;
use pool_model::{ledger, SwapDirection};

/// Swap `amount_in` of one asset for at least `min_amount_out` of the other
///
/// Accounts:
/// 0. `[signer, writable]` User
/// 1. `[]` Mint X
/// 2. `[]` Mint Y
/// 3. `[]` Config
/// 4. `[]` LP mint
/// 5. `[writable]` Vault X
/// 6. `[writable]` Vault Y
/// 7. `[writable]` User X token account
/// 8. `[writable]` User Y token account
/// 9. `[]` Token program
/// 10. `[]` Associated token program
/// 11. `[]` System program
pub fn process_swap(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    x_to_y: bool,
    amount_in: u64,
    min_amount_out: u64,
) -> ProgramResult {
    let [user, mint_x, mint_y, config, mint_lp, vault_x, vault_y, user_x, user_y, token_program, ata_program, system_program, ..] =
        accounts
    else {
        msg!("Error: Swap requires 12 accounts");
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
            user_lp: None,
        },
        pool.seed,
        pool.bumps.config,
    );

    let direction = SwapDirection::from_flag(x_to_y);
    let quote = ledger::swap(&pool, &mut custody, direction, amount_in, min_amount_out)?;

    log!(
        "Swap: in={} fee={} out={}",
        quote.amount_in,
        quote.fee,
        quote.amount_out
    );
    Ok(())
}
