//! AMM instruction handlers

pub mod deposit;
pub mod initialize;
pub mod swap;
pub mod update;
pub mod withdraw;

pub use deposit::*;
pub use initialize::*;
pub use swap::*;
pub use update::*;
pub use withdraw::*;

use crate::{
    pda::{expect_address, vault_address},
    state::PoolConfigAccount,
};
use cpamm_common::*;
use pinocchio::{
    account_info::AccountInfo,
    cpi::invoke,
    instruction::{AccountMeta, Instruction, Seed, Signer},
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer};
use pool_model::PoolConfig;

/// Associated Token Account program: CreateIdempotent
const ATA_CREATE_IDEMPOTENT: u8 = 1;

/// Read the pool config from an account owned by this program
pub(crate) fn load_pool(program_id: &Pubkey, config: &AccountInfo) -> Result<PoolConfig, ProgramError> {
    validate_owner(config, program_id)?;
    let data = config.try_borrow_data()?;
    let account = PoolConfigAccount::load(&data)?;
    Ok(account.to_model())
}

/// Check mints, LP mint and vaults against what the config recorded
pub(crate) fn validate_pool_accounts(
    pool: &PoolConfig,
    config: &AccountInfo,
    mint_x: &AccountInfo,
    mint_y: &AccountInfo,
    mint_lp: &AccountInfo,
    vault_x: &AccountInfo,
    vault_y: &AccountInfo,
) -> Result<(), ProgramError> {
    expect_address(mint_x.key(), &pool.mint_x)?;
    expect_address(mint_y.key(), &pool.mint_y)?;
    expect_address(mint_lp.key(), &pool.mint_lp)?;

    let expected_x = vault_address(config.key(), &pool.mint_x, pool.bumps.vault_x)?;
    let expected_y = vault_address(config.key(), &pool.mint_y, pool.bumps.vault_y)?;
    if vault_x.key() != &expected_x || vault_y.key() != &expected_y {
        msg!("Error: Vault does not belong to this pool");
        return Err(pool_model::AmmError::InvalidAccount.into());
    }
    Ok(())
}

/// Token, associated-token and system program accounts, in that order
pub(crate) fn validate_programs(
    token_program: &AccountInfo,
    ata_program: &AccountInfo,
    system_program: &AccountInfo,
) -> Result<(), ProgramError> {
    validate_program(token_program, &TOKEN_PROGRAM_ID)?;
    validate_program(ata_program, &ASSOCIATED_TOKEN_PROGRAM_ID)?;
    validate_program(system_program, &SYSTEM_PROGRAM_ID)
}

/// Create `owner`'s associated token account for `mint` if it does not exist yet
pub(crate) fn create_associated_token_account(
    payer: &AccountInfo,
    account: &AccountInfo,
    owner: &AccountInfo,
    mint: &AccountInfo,
    system_program: &AccountInfo,
    token_program: &AccountInfo,
) -> Result<(), ProgramError> {
    let metas = [
        AccountMeta::writable_signer(payer.key()),
        AccountMeta::writable(account.key()),
        AccountMeta::readonly(owner.key()),
        AccountMeta::readonly(mint.key()),
        AccountMeta::readonly(system_program.key()),
        AccountMeta::readonly(token_program.key()),
    ];
    let ix = Instruction {
        program_id: &ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: &metas,
        data: &[ATA_CREATE_IDEMPOTENT],
    };

    invoke::<6>(&ix, &[payer, account, owner, mint, system_program, token_program])
}

/// How a PDA gets allocated, given the lamports already sitting at its address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Provision {
    /// Empty address: one CreateAccount
    Create,
    /// Pre-funded address: top up, then Allocate and Assign
    Adopt { top_up: u64 },
}

impl Provision {
    pub(crate) fn for_balance(current: u64, rent_exempt: u64) -> Self {
        if current == 0 {
            Self::Create
        } else {
            Self::Adopt {
                top_up: rent_exempt.saturating_sub(current),
            }
        }
    }
}

/// Allocate `space` bytes at a PDA owned by `owner`, signing with `seeds`
pub(crate) fn create_pda_account(
    payer: &AccountInfo,
    account: &AccountInfo,
    space: usize,
    owner: &Pubkey,
    seeds: &[Seed],
) -> ProgramResult {
    let rent_exempt = Rent::get()?.minimum_balance(space);
    let signer = [Signer::from(seeds)];

    match Provision::for_balance(account.lamports(), rent_exempt) {
        Provision::Create => CreateAccount {
            from: payer,
            to: account,
            lamports: rent_exempt,
            space: space as u64,
            owner,
        }
        .invoke_signed(&signer),
        Provision::Adopt { top_up } => {
            if top_up > 0 {
                Transfer {
                    from: payer,
                    to: account,
                    lamports: top_up,
                }
                .invoke()?;
            }
            Allocate {
                account,
                space: space as u64,
            }
            .invoke_signed(&signer)?;
            Assign { account, owner }.invoke_signed(&signer)
        }
    }
}
