//! Wire format and account helpers shared by the program and its clients

#![cfg_attr(not(test), no_std)]

pub mod account;
pub mod instruction;

pub use account::*;
pub use instruction::*;

use pinocchio::pubkey::Pubkey;

/// PDA seed prefix of a pool's config account: `["config", seed_le]`
pub const CONFIG_SEED: &[u8] = b"config";

/// PDA seed prefix of a pool's LP mint: `["lp", config]`
pub const LP_SEED: &[u8] = b"lp";

/// Decimals of every pool's LP mint
pub const LP_DECIMALS: u8 = 6;

/// SPL Token program
pub const TOKEN_PROGRAM_ID: Pubkey =
    pinocchio_pubkey::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// SPL Associated Token Account program
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pinocchio_pubkey::pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// System program
pub const SYSTEM_PROGRAM_ID: Pubkey = [0u8; 32];
