//! Pool inspection over RPC

use crate::error::ClientError;
use crate::pda::{token_program_id, PoolAddresses};
use anyhow::{Context, Result};
use cpamm_program::PoolConfigAccount;
use pinocchio_token::state::{Mint, TokenAccount};
use pool_model::{PoolConfig, PoolSnapshot, Reserves};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{account::Account, pubkey::Pubkey};

/// Config plus live balances of one pool
#[derive(Debug, Clone, Copy)]
pub struct PoolState {
    pub addresses: PoolAddresses,
    pub config: PoolConfig,
    pub snapshot: PoolSnapshot,
}

pub fn decode_pool_config(account: &Pubkey, data: &[u8]) -> Result<PoolConfig, ClientError> {
    PoolConfigAccount::load(data)
        .map(|config| config.to_model())
        .map_err(|_| ClientError::InvalidAccountData { account: *account, kind: "pool config" })
}

/// Token program owned and exactly `len` bytes long
fn token_program_data<'a>(
    key: &Pubkey,
    account: &'a Account,
    len: usize,
    kind: &'static str,
) -> Result<&'a [u8], ClientError> {
    if account.owner != token_program_id() || account.data.len() != len {
        return Err(ClientError::InvalidAccountData { account: *key, kind });
    }
    Ok(&account.data)
}

pub fn decode_token_amount(key: &Pubkey, account: &Account) -> Result<u64, ClientError> {
    let data = token_program_data(key, account, TokenAccount::LEN, "token account")?;
    // SAFETY: length checked above; the layout is plain bytes with alignment 1
    Ok(unsafe { TokenAccount::from_bytes_unchecked(data) }.amount())
}

pub fn decode_mint_supply(key: &Pubkey, account: &Account) -> Result<u64, ClientError> {
    let data = token_program_data(key, account, Mint::LEN, "mint")?;
    // SAFETY: as above
    Ok(unsafe { Mint::from_bytes_unchecked(data) }.supply())
}

async fn fetch_account(client: &RpcClient, key: &Pubkey) -> Result<Account> {
    let account = client
        .get_account(key)
        .await
        .map_err(|_| ClientError::AccountNotFound(*key))?;
    Ok(account)
}

/// Token balance of `key`, zero if the account does not exist yet
pub async fn fetch_token_balance(client: &RpcClient, key: &Pubkey) -> Result<u64> {
    match client.get_account(key).await {
        Ok(account) => Ok(decode_token_amount(key, &account)?),
        Err(_) => Ok(0),
    }
}

/// Fetch the pool config for `seed` and the live reserves and LP supply
pub async fn fetch_pool(client: &RpcClient, program_id: &Pubkey, seed: u64) -> Result<PoolState> {
    let (config_key, _) = crate::pda::config_address(program_id, seed);
    let account = fetch_account(client, &config_key)
        .await
        .context(format!("Pool with seed {} does not exist", seed))?;
    if account.owner != *program_id {
        return Err(ClientError::InvalidAccountData { account: config_key, kind: "pool config" }.into());
    }
    let config = decode_pool_config(&config_key, &account.data)?;

    let addresses = PoolAddresses::derive(
        program_id,
        seed,
        &Pubkey::new_from_array(config.mint_x),
        &Pubkey::new_from_array(config.mint_y),
    );

    let reserve_x = decode_token_amount(&addresses.vault_x, &fetch_account(client, &addresses.vault_x).await?)?;
    let reserve_y = decode_token_amount(&addresses.vault_y, &fetch_account(client, &addresses.vault_y).await?)?;
    let lp_supply = decode_mint_supply(&addresses.mint_lp, &fetch_account(client, &addresses.mint_lp).await?)?;

    Ok(PoolState {
        addresses,
        config,
        snapshot: PoolSnapshot {
            reserves: Reserves::new(reserve_x, reserve_y),
            lp_supply,
        },
    })
}
