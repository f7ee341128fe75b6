//! Lock / Unlock instructions - pause toggle

use super::load_pool;
use crate::state::PoolConfigAccount;
use cpamm_common::*;
use pinocchio::{account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey, ProgramResult};
use pool_model::set_locked;

/// Set the pool's `locked` flag
///
/// Accounts:
/// 0. `[signer]` Pool authority
/// 1. `[writable]` Config
pub fn process_set_locked(program_id: &Pubkey, accounts: &[AccountInfo], locked: bool) -> ProgramResult {
    let [authority, config, ..] = accounts else {
        msg!("Error: Lock/Unlock requires 2 accounts");
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    validate_signer(authority)?;
    validate_writable(config)?;

    let mut pool = load_pool(program_id, config)?;
    set_locked(&mut pool, authority.key(), locked)?;

    let mut data = borrow_account_data_mut(config, PoolConfigAccount::LEN)?;
    PoolConfigAccount::from_model(&pool).store(&mut data)?;

    if locked {
        msg!("Pool locked");
    } else {
        msg!("Pool unlocked");
    }
    Ok(())
}
