//! Client error types

use pool_model::AmmError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("account {account} is not a valid {kind}")]
    InvalidAccountData { account: Pubkey, kind: &'static str },

    #[error("pool is empty; the first deposit needs explicit --max-x and --max-y")]
    FirstDepositAmounts,

    #[error("pool rejected the operation: {0}")]
    Pool(#[from] AmmError),
}
