//! Initialize instruction - create a pool

use super::{create_associated_token_account, create_pda_account, validate_programs};
use crate::{
    pda::{expect_address, find_config_address, find_lp_mint_address, find_vault_address},
    state::PoolConfigAccount,
};
use cpamm_common::*;
use pinocchio::{
    account_info::AccountInfo,
    instruction::Seed,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};
use pinocchio_log::log;
use pinocchio_token::{instructions::InitializeMint2, state::Mint};
use pool_model::{initialize, AmmError, Authority, InitializeParams, PoolBumps};

/// Create pool config, LP mint and both vaults
///
/// Accounts:
/// 0. `[signer, writable]` Initializer (pays rent)
/// 1. `[]` Mint X
/// 2. `[]` Mint Y
/// 3. `[writable]` LP mint (PDA `["lp", config]`)
/// 4. `[writable]` Vault X (config's ATA for mint X)
/// 5. `[writable]` Vault Y (config's ATA for mint Y)
/// 6. `[writable]` Config (PDA `["config", seed_le]`)
/// 7. `[]` Token program
/// 8. `[]` Associated token program
/// 9. `[]` System program
pub fn process_initialize(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    seed: u64,
    fee_bps: u16,
    authority: Option<Pubkey>,
) -> ProgramResult {
    let [initializer, mint_x, mint_y, mint_lp, vault_x, vault_y, config, token_program, ata_program, system_program, ..] =
        accounts
    else {
        msg!("Error: Initialize requires 10 accounts");
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    validate_signer(initializer)?;
    validate_writable(config)?;
    validate_writable(mint_lp)?;
    validate_writable(vault_x)?;
    validate_writable(vault_y)?;
    validate_programs(token_program, ata_program, system_program)?;

    let (config_key, config_bump) = find_config_address(seed, program_id);
    let (lp_key, lp_bump) = find_lp_mint_address(&config_key, program_id);
    let (vault_x_key, vault_x_bump) = find_vault_address(&config_key, mint_x.key());
    let (vault_y_key, vault_y_bump) = find_vault_address(&config_key, mint_y.key());

    // Argument checks come before any address or account state checks
    let pool = initialize(InitializeParams {
        seed,
        fee_bps,
        authority: Authority::from_option(authority),
        mint_x: *mint_x.key(),
        mint_y: *mint_y.key(),
        mint_lp: lp_key,
        bumps: PoolBumps {
            config: config_bump,
            lp_mint: lp_bump,
            vault_x: vault_x_bump,
            vault_y: vault_y_bump,
        },
    })?;

    expect_address(config.key(), &config_key)?;
    expect_address(mint_lp.key(), &lp_key)?;
    expect_address(vault_x.key(), &vault_x_key)?;
    expect_address(vault_y.key(), &vault_y_key)?;

    if pool_exists(program_id, config)? {
        msg!("Error: Pool already initialized");
        return Err(AmmError::AlreadyInitialized.into());
    }

    // Config account
    let seed_bytes = seed.to_le_bytes();
    let config_bump_bytes = [config_bump];
    let config_seeds = [
        Seed::from(CONFIG_SEED),
        Seed::from(&seed_bytes[..]),
        Seed::from(&config_bump_bytes[..]),
    ];
    create_pda_account(initializer, config, PoolConfigAccount::LEN, program_id, &config_seeds)?;

    // LP mint, authority = config, no freeze authority
    let lp_bump_bytes = [lp_bump];
    let lp_seeds = [
        Seed::from(LP_SEED),
        Seed::from(&config.key()[..]),
        Seed::from(&lp_bump_bytes[..]),
    ];
    create_pda_account(initializer, mint_lp, Mint::LEN, &TOKEN_PROGRAM_ID, &lp_seeds)?;

    InitializeMint2 {
        mint: mint_lp,
        decimals: LP_DECIMALS,
        mint_authority: config.key(),
        freeze_authority: None,
    }
    .invoke()?;

    // Vaults
    create_associated_token_account(initializer, vault_x, config, mint_x, system_program, token_program)?;
    create_associated_token_account(initializer, vault_y, config, mint_y, system_program, token_program)?;

    let mut data = borrow_account_data_mut(config, PoolConfigAccount::LEN)?;
    PoolConfigAccount::from_model(&pool).store(&mut data)?;

    log!("Pool initialized: seed={} fee_bps={}", seed, fee_bps);
    Ok(())
}

/// A pool exists once the config is ours and carries a valid header.
/// Lamports alone mean nothing: anyone can fund a predictable PDA.
fn pool_exists(program_id: &Pubkey, config: &AccountInfo) -> Result<bool, ProgramError> {
    if !config.is_owned_by(program_id) {
        return Ok(false);
    }
    let data = config.try_borrow_data()?;
    Ok(PoolConfigAccount::load(&data).is_ok())
}
