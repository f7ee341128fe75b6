//! Off-chain address derivation
//!
//! Mirrors the program's PDAs so the client can build account lists without
//! asking the cluster.

use cpamm_common::{ASSOCIATED_TOKEN_PROGRAM_ID, CONFIG_SEED, LP_SEED, TOKEN_PROGRAM_ID};
use solana_sdk::pubkey::Pubkey;

pub fn token_program_id() -> Pubkey {
    Pubkey::new_from_array(TOKEN_PROGRAM_ID)
}

pub fn associated_token_program_id() -> Pubkey {
    Pubkey::new_from_array(ASSOCIATED_TOKEN_PROGRAM_ID)
}

/// Pool config PDA: `["config", seed_le]`
pub fn config_address(program_id: &Pubkey, seed: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED, &seed.to_le_bytes()], program_id)
}

/// LP mint PDA: `["lp", config]`
pub fn lp_mint_address(program_id: &Pubkey, config: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_SEED, config.as_ref()], program_id)
}

/// Associated token account of `owner` for `mint`
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[owner.as_ref(), token_program_id().as_ref(), mint.as_ref()],
        &associated_token_program_id(),
    )
    .0
}

/// Every address a pool owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAddresses {
    pub config: Pubkey,
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub mint_lp: Pubkey,
    pub vault_x: Pubkey,
    pub vault_y: Pubkey,
}

impl PoolAddresses {
    pub fn derive(program_id: &Pubkey, seed: u64, mint_x: &Pubkey, mint_y: &Pubkey) -> Self {
        let (config, _) = config_address(program_id, seed);
        let (mint_lp, _) = lp_mint_address(program_id, &config);

        Self {
            config,
            mint_x: *mint_x,
            mint_y: *mint_y,
            mint_lp,
            vault_x: associated_token_address(&config, mint_x),
            vault_y: associated_token_address(&config, mint_y),
        }
    }

    /// The user's X, Y and LP token accounts
    pub fn user_accounts(&self, user: &Pubkey) -> UserAccounts {
        UserAccounts {
            x: associated_token_address(user, &self.mint_x),
            y: associated_token_address(user, &self.mint_y),
            lp: associated_token_address(user, &self.mint_lp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAccounts {
    pub x: Pubkey,
    pub y: Pubkey,
    pub lp: Pubkey,
}
