//! PDA derivation helpers
//!
//! `find_*` search for the canonical bump and run at initialize only. Later
//! instructions re-derive from the bumps stored in the config account.

use cpamm_common::{ASSOCIATED_TOKEN_PROGRAM_ID, CONFIG_SEED, LP_SEED, TOKEN_PROGRAM_ID};
use pinocchio::{
    program_error::ProgramError,
    pubkey::{create_program_address, find_program_address, Pubkey},
};
use pool_model::AmmError;

/// Pool config PDA: `["config", seed_le]`
pub fn find_config_address(seed: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    find_program_address(&[CONFIG_SEED, &seed.to_le_bytes()], program_id)
}

/// LP mint PDA: `["lp", config]`
pub fn find_lp_mint_address(config: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    find_program_address(&[LP_SEED, config.as_ref()], program_id)
}

/// Vault = associated token account of the config for `mint`
pub fn find_vault_address(config: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    find_program_address(
        &[config.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
}

/// Re-derive a vault address from its stored bump
pub fn vault_address(config: &Pubkey, mint: &Pubkey, bump: u8) -> Result<Pubkey, ProgramError> {
    create_program_address(
        &[config.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref(), &[bump]],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
}

/// Fail with InvalidAccount unless `actual == expected`
#[inline]
pub fn expect_address(actual: &Pubkey, expected: &Pubkey) -> Result<(), ProgramError> {
    if actual != expected {
        return Err(AmmError::InvalidAccount.into());
    }
    Ok(())
}
