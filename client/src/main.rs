//! cpamm operator CLI
//!
//! Builds, previews and submits constant-product AMM instructions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cpamm_client::{
    config::{self, Config},
    error::ClientError,
    pda, pool, quote, tx_builder,
};
use pool_model::{AmmError, SwapDirection};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::TransactionError,
};
use std::str::FromStr;

/// Constant-product AMM client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "cpamm")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CPAMM_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config file
    InitConfig {
        #[arg(default_value = config::DEFAULT_CONFIG_PATH)]
        path: String,
    },

    /// Create a pool
    Init {
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        mint_x: String,
        #[arg(long)]
        mint_y: String,
        #[arg(long, default_value_t = 30)]
        fee_bps: u16,
        /// Pause authority; omit for a permissionless pool
        #[arg(long)]
        authority: Option<String>,
    },

    /// Add liquidity for a number of LP shares
    Deposit {
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        lp_amount: u64,
        /// Required for the first deposit; otherwise derived from the quote
        #[arg(long, requires = "max_y")]
        max_x: Option<u64>,
        #[arg(long, requires = "max_x")]
        max_y: Option<u64>,
    },

    /// Redeem LP shares
    Withdraw {
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        lp_amount: u64,
        /// Output floors; quoted with slippage when both are omitted
        #[arg(long, requires = "min_y")]
        min_x: Option<u64>,
        #[arg(long, requires = "min_x")]
        min_y: Option<u64>,
    },

    /// Swap one asset for the other
    Swap {
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        amount_in: u64,
        /// Pay Y, receive X (default pays X)
        #[arg(long)]
        y_to_x: bool,
        #[arg(long)]
        min_amount_out: Option<u64>,
    },

    /// Preview a swap without sending anything
    Quote {
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        amount_in: u64,
        #[arg(long)]
        y_to_x: bool,
    },

    /// Pause trading (pool authority only)
    Lock {
        #[arg(long)]
        seed: u64,
    },

    /// Resume trading (pool authority only)
    Unlock {
        #[arg(long)]
        seed: u64,
    },

    /// Print pool config and reserves
    Show {
        #[arg(long)]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Command::InitConfig { path } = &cli.command {
        return Config::write_default(path);
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        log::warn!("Failed to load config ({}), using default localnet config", e);
        Config::default_localnet()
    });
    let program_id = config.program_id()?;

    log::info!("RPC: {}", config.rpc_url);
    log::debug!("Program: {}", program_id);

    let client = RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    match cli.command {
        Command::InitConfig { .. } => Ok(()),
        Command::Init { seed, mint_x, mint_y, fee_bps, authority } => {
            let payer = config.load_keypair()?;
            let mint_x = parse_pubkey("mint_x", &mint_x)?;
            let mint_y = parse_pubkey("mint_y", &mint_y)?;
            let authority = authority.map(|key| parse_pubkey("authority", &key)).transpose()?;

            let addresses = pda::PoolAddresses::derive(&program_id, seed, &mint_x, &mint_y);
            let ix = tx_builder::build_initialize_instruction(
                &program_id,
                &addresses,
                &payer.pubkey(),
                seed,
                fee_bps,
                authority,
            );

            submit(&client, ix, &payer).await?;
            log::info!("Pool {} created (config {})", seed, addresses.config);
            Ok(())
        }
        Command::Deposit { seed, lp_amount, max_x, max_y } => {
            let payer = config.load_keypair()?;
            let state = pool::fetch_pool(&client, &program_id, seed).await?;

            let (max_x, max_y) = match max_x.zip(max_y) {
                Some(bounds) => bounds,
                None => quote::deposit_bounds(&state.snapshot, lp_amount, config.slippage_bps)?,
            };
            log::info!("Depositing for {} LP, paying at most {} X / {} Y", lp_amount, max_x, max_y);

            let ix = tx_builder::build_deposit_instruction(
                &program_id,
                &state.addresses,
                &payer.pubkey(),
                lp_amount,
                max_x,
                max_y,
            );
            submit(&client, ix, &payer).await
        }
        Command::Withdraw { seed, lp_amount, min_x, min_y } => {
            let payer = config.load_keypair()?;
            let state = pool::fetch_pool(&client, &program_id, seed).await?;

            let (min_x, min_y) = match min_x.zip(min_y) {
                Some(bounds) => bounds,
                None => quote::withdraw_bounds(&state.snapshot, lp_amount, config.slippage_bps)?,
            };
            log::info!("Withdrawing {} LP, expecting at least {} X / {} Y", lp_amount, min_x, min_y);

            let ix = tx_builder::build_withdraw_instruction(
                &program_id,
                &state.addresses,
                &payer.pubkey(),
                lp_amount,
                min_x,
                min_y,
            );
            submit(&client, ix, &payer).await
        }
        Command::Swap { seed, amount_in, y_to_x, min_amount_out } => {
            let payer = config.load_keypair()?;
            let state = pool::fetch_pool(&client, &program_id, seed).await?;
            let direction = SwapDirection::from_flag(!y_to_x);

            let min_amount_out = match min_amount_out {
                Some(min) => min,
                None => {
                    quote::preview_swap(&state.snapshot, state.config.fee_bps, direction, amount_in, config.slippage_bps)?
                        .min_amount_out
                }
            };
            log::info!("Swapping {} in, expecting at least {} out", amount_in, min_amount_out);

            let user_accounts = state.addresses.user_accounts(&payer.pubkey());
            let out_account = if y_to_x { user_accounts.x } else { user_accounts.y };
            let before = pool::fetch_token_balance(&client, &out_account).await?;

            let ix = tx_builder::build_swap_instruction(
                &program_id,
                &state.addresses,
                &payer.pubkey(),
                !y_to_x,
                amount_in,
                min_amount_out,
            );
            submit(&client, ix, &payer).await?;

            let after = pool::fetch_token_balance(&client, &out_account).await?;
            log::info!("Received {}", after.saturating_sub(before));
            Ok(())
        }
        Command::Quote { seed, amount_in, y_to_x } => {
            let state = pool::fetch_pool(&client, &program_id, seed).await?;
            let direction = SwapDirection::from_flag(!y_to_x);
            let preview = quote::preview_swap(
                &state.snapshot,
                state.config.fee_bps,
                direction,
                amount_in,
                config.slippage_bps,
            )?;

            println!("amount_in:        {}", preview.quote.amount_in);
            println!("fee:              {}", preview.quote.fee);
            println!("amount_out:       {}", preview.quote.amount_out);
            println!("min_amount_out:   {} ({} bps slippage)", preview.min_amount_out, config.slippage_bps);
            Ok(())
        }
        Command::Lock { seed } => set_locked(&client, &config, &program_id, seed, true).await,
        Command::Unlock { seed } => set_locked(&client, &config, &program_id, seed, false).await,
        Command::Show { seed } => {
            let state = pool::fetch_pool(&client, &program_id, seed).await?;
            let authority = match state.config.authority.as_option() {
                Some(key) => Pubkey::new_from_array(*key).to_string(),
                None => "none (permissionless)".to_string(),
            };

            println!("config:     {}", state.addresses.config);
            println!("mint_x:     {}", state.addresses.mint_x);
            println!("mint_y:     {}", state.addresses.mint_y);
            println!("mint_lp:    {}", state.addresses.mint_lp);
            println!("fee_bps:    {}", state.config.fee_bps);
            println!("authority:  {}", authority);
            println!("locked:     {}", state.config.locked);
            println!("reserve_x:  {}", state.snapshot.reserves.x);
            println!("reserve_y:  {}", state.snapshot.reserves.y);
            println!("lp_supply:  {}", state.snapshot.lp_supply);
            Ok(())
        }
    }
}

async fn set_locked(
    client: &RpcClient,
    config: &Config,
    program_id: &Pubkey,
    seed: u64,
    locked: bool,
) -> Result<()> {
    let authority = config.load_keypair()?;
    let (config_key, _) = pda::config_address(program_id, seed);
    let ix = tx_builder::build_set_locked_instruction(program_id, &config_key, &authority.pubkey(), locked);

    submit(client, ix, &authority).await?;
    log::info!("Pool {} {}", seed, if locked { "locked" } else { "unlocked" });
    Ok(())
}

fn parse_pubkey(field: &'static str, value: &str) -> Result<Pubkey, ClientError> {
    Pubkey::from_str(value).map_err(|e| ClientError::InvalidConfig {
        field,
        reason: e.to_string(),
    })
}

/// Send one instruction and wait for confirmation
async fn submit(client: &RpcClient, ix: Instruction, payer: &Keypair) -> Result<()> {
    let blockhash = client
        .get_latest_blockhash()
        .await
        .context("Failed to fetch recent blockhash")?;
    let tx = tx_builder::build_transaction(ix, payer, blockhash);

    match client.send_and_confirm_transaction(&tx).await {
        Ok(signature) => {
            log::info!("Confirmed: {}", signature);
            Ok(())
        }
        Err(e) => {
            if let Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) =
                e.get_transaction_error()
            {
                if let Some(pool_err) = AmmError::from_code(code) {
                    log::error!("Transaction rejected: {}", pool_err);
                    return Err(ClientError::Pool(pool_err).into());
                }
            }
            Err(e).context("Transaction failed")
        }
    }
}
