//! SPL Token backed custody for pool operations
//!
//! Balances are read from the live token accounts; moves are token program
//! CPIs. Payouts and mints are signed by the config PDA.

use cpamm_common::CONFIG_SEED;
use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    program_error::ProgramError,
};
use pinocchio_token::{
    instructions::{Burn, MintTo, Transfer},
    state::{Mint, TokenAccount},
};
use pool_model::{ledger::TokenCustody, PoolSnapshot, Side, UserBalances};

/// Token accounts touched by deposit, withdraw and swap
pub struct PoolAccounts<'a> {
    pub user: &'a AccountInfo,
    pub config: &'a AccountInfo,
    pub mint_lp: &'a AccountInfo,
    pub vault_x: &'a AccountInfo,
    pub vault_y: &'a AccountInfo,
    pub user_x: &'a AccountInfo,
    pub user_y: &'a AccountInfo,
    /// Absent for swaps
    pub user_lp: Option<&'a AccountInfo>,
}

/// CPI custody signing as the config PDA
pub struct CpiCustody<'a> {
    accounts: PoolAccounts<'a>,
    seed: [u8; 8],
    bump: [u8; 1],
}

impl<'a> CpiCustody<'a> {
    pub fn new(accounts: PoolAccounts<'a>, seed: u64, config_bump: u8) -> Self {
        Self {
            accounts,
            seed: seed.to_le_bytes(),
            bump: [config_bump],
        }
    }

    fn vault(&self, side: Side) -> &'a AccountInfo {
        match side {
            Side::X => self.accounts.vault_x,
            Side::Y => self.accounts.vault_y,
        }
    }

    fn user_account(&self, side: Side) -> &'a AccountInfo {
        match side {
            Side::X => self.accounts.user_x,
            Side::Y => self.accounts.user_y,
        }
    }

    fn user_lp(&self) -> Result<&'a AccountInfo, ProgramError> {
        self.accounts.user_lp.ok_or(ProgramError::NotEnoughAccountKeys)
    }

    fn signer_seeds(&self) -> [Seed<'_>; 3] {
        [
            Seed::from(CONFIG_SEED),
            Seed::from(&self.seed[..]),
            Seed::from(&self.bump[..]),
        ]
    }
}

fn token_amount(account: &AccountInfo) -> Result<u64, ProgramError> {
    Ok(TokenAccount::from_account_info(account)?.amount())
}

impl TokenCustody for CpiCustody<'_> {
    type Error = ProgramError;

    fn snapshot(&self) -> Result<PoolSnapshot, ProgramError> {
        let lp_supply = Mint::from_account_info(self.accounts.mint_lp)?.supply();

        Ok(PoolSnapshot {
            reserves: pool_model::Reserves::new(
                token_amount(self.accounts.vault_x)?,
                token_amount(self.accounts.vault_y)?,
            ),
            lp_supply,
        })
    }

    fn user_balances(&self) -> Result<UserBalances, ProgramError> {
        let lp = match self.accounts.user_lp {
            Some(account) => token_amount(account)?,
            None => 0,
        };

        Ok(UserBalances {
            x: token_amount(self.accounts.user_x)?,
            y: token_amount(self.accounts.user_y)?,
            lp,
        })
    }

    fn deposit_to_vault(&mut self, side: Side, amount: u64) -> Result<(), ProgramError> {
        Transfer {
            from: self.user_account(side),
            to: self.vault(side),
            authority: self.accounts.user,
            amount,
        }
        .invoke()
    }

    fn pay_from_vault(&mut self, side: Side, amount: u64) -> Result<(), ProgramError> {
        let seeds = self.signer_seeds();
        Transfer {
            from: self.vault(side),
            to: self.user_account(side),
            authority: self.accounts.config,
            amount,
        }
        .invoke_signed(&[Signer::from(&seeds)])
    }

    fn mint_lp(&mut self, amount: u64) -> Result<(), ProgramError> {
        let seeds = self.signer_seeds();
        MintTo {
            mint: self.accounts.mint_lp,
            account: self.user_lp()?,
            mint_authority: self.accounts.config,
            amount,
        }
        .invoke_signed(&[Signer::from(&seeds)])
    }

    fn burn_lp(&mut self, amount: u64) -> Result<(), ProgramError> {
        Burn {
            account: self.user_lp()?,
            mint: self.accounts.mint_lp,
            authority: self.accounts.user,
            amount,
        }
        .invoke()
    }
}
