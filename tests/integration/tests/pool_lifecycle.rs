//! End-to-end pool lifecycle against the compiled program
//!
//! Every test starts a fresh bank, so pools never leak between tests.

use cpamm_client::{
    pda::{self, PoolAddresses, UserAccounts},
    pool::decode_pool_config,
    tx_builder,
};
use cpamm_integration_tests::{custom_code, start_or_skip, Harness};
use pool_model::{AmmError, Authority};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

const SEED: u64 = 7;
const FEE_BPS: u16 = 30;
const USER_FUNDS: u64 = 2_000_000;

/// Two fresh mints, the user's funded token accounts, and the derived pool addresses
async fn setup(h: &mut Harness) -> (PoolAddresses, UserAccounts) {
    let mint_x = h.create_mint(6).await;
    let mint_y = h.create_mint(6).await;
    let user = h.payer.pubkey();

    let user_x = h.create_token_account(&user, &mint_x).await;
    let user_y = h.create_token_account(&user, &mint_y).await;
    h.mint_to(&mint_x, &user_x, USER_FUNDS).await;
    h.mint_to(&mint_y, &user_y, USER_FUNDS).await;

    let pool = PoolAddresses::derive(&h.program_id, SEED, &mint_x, &mint_y);
    let accounts = pool.user_accounts(&user);
    (pool, accounts)
}

async fn initialize(h: &mut Harness, pool: &PoolAddresses, fee_bps: u16) -> Result<(), Option<u32>> {
    let payer = h.payer.pubkey();
    let ix = tx_builder::build_initialize_instruction(
        &h.program_id,
        pool,
        &payer,
        SEED,
        fee_bps,
        Some(payer),
    );
    h.send(ix, &[]).await.map_err(|e| custom_code(&e))
}

async fn deposit(h: &mut Harness, pool: &PoolAddresses, lp: u64, max_x: u64, max_y: u64) -> Result<(), Option<u32>> {
    let user = h.payer.pubkey();
    let ix = tx_builder::build_deposit_instruction(&h.program_id, pool, &user, lp, max_x, max_y);
    h.send(ix, &[]).await.map_err(|e| custom_code(&e))
}

async fn swap(h: &mut Harness, pool: &PoolAddresses, amount_in: u64, min_out: u64) -> Result<(), Option<u32>> {
    let user = h.payer.pubkey();
    let ix = tx_builder::build_swap_instruction(&h.program_id, pool, &user, true, amount_in, min_out);
    h.send(ix, &[]).await.map_err(|e| custom_code(&e))
}

async fn reserves(h: &mut Harness, pool: &PoolAddresses) -> (u64, u64) {
    (h.token_balance(&pool.vault_x).await, h.token_balance(&pool.vault_y).await)
}

#[tokio::test]
async fn test_reference_scenario() {
    let mut h = start_or_skip!();
    let (pool, user) = setup(&mut h).await;

    initialize(&mut h, &pool, FEE_BPS).await.unwrap();
    assert_eq!(reserves(&mut h, &pool).await, (0, 0));
    assert_eq!(h.mint_supply(&pool.mint_lp).await, 0);

    let config = h.banks.get_account(pool.config).await.unwrap().unwrap();
    assert_eq!(config.owner, h.program_id);
    let stored = decode_pool_config(&pool.config, &config.data).unwrap();
    assert_eq!(stored.fee_bps, FEE_BPS);
    assert_eq!(stored.authority, Authority::WithAuthority(h.payer.pubkey().to_bytes()));
    assert!(!stored.locked);

    // First deposit; the LP account does not exist until the program creates it
    assert_eq!(h.token_balance(&user.lp).await, 0);
    deposit(&mut h, &pool, 500_000, 600_000, 600_000).await.unwrap();
    assert_eq!(h.token_balance(&user.lp).await, 500_000);
    assert_eq!(h.token_balance(&user.x).await, USER_FUNDS - 600_000);
    assert_eq!(reserves(&mut h, &pool).await, (600_000, 600_000));

    // Withdraw burns first, then pays out pro rata
    let ix = tx_builder::build_withdraw_instruction(&h.program_id, &pool, &h.payer.pubkey(), 100_000, 1, 1);
    h.send(ix, &[]).await.unwrap();
    assert_eq!(h.token_balance(&user.lp).await, 400_000);
    assert_eq!(h.mint_supply(&pool.mint_lp).await, 400_000);
    assert_eq!(h.token_balance(&user.x).await, USER_FUNDS - 480_000);
    assert_eq!(h.token_balance(&user.y).await, USER_FUNDS - 480_000);

    let (x0, y0) = reserves(&mut h, &pool).await;
    swap(&mut h, &pool, 50_000, 1).await.unwrap();
    let (x1, y1) = reserves(&mut h, &pool).await;

    assert_eq!((x1, y1), (530_000, 434_841));
    assert_eq!(h.token_balance(&user.y).await, USER_FUNDS - 480_000 + 45_159);
    assert!(u128::from(x1) * u128::from(y1) >= u128::from(x0) * u128::from(y0));
}

#[tokio::test]
async fn test_second_initialize_is_rejected() {
    let mut h = start_or_skip!();
    let (pool, _) = setup(&mut h).await;

    initialize(&mut h, &pool, FEE_BPS).await.unwrap();
    // Different fee so the transaction is not deduplicated
    assert_eq!(
        initialize(&mut h, &pool, FEE_BPS + 1).await,
        Err(Some(AmmError::AlreadyInitialized.code()))
    );
}

#[tokio::test]
async fn test_prefunded_addresses_do_not_block_initialize() {
    let mut h = start_or_skip!();
    let (pool, _) = setup(&mut h).await;

    // Anyone can send lamports to the predictable PDAs ahead of time
    h.fund(&pool.config, 1_000_000).await;
    h.fund(&pool.mint_lp, 1_000_000).await;

    initialize(&mut h, &pool, FEE_BPS).await.unwrap();

    let config = h.banks.get_account(pool.config).await.unwrap().unwrap();
    assert_eq!(config.owner, h.program_id);
    assert_eq!(decode_pool_config(&pool.config, &config.data).unwrap().fee_bps, FEE_BPS);

    let rent = h.banks.get_rent().await.unwrap();
    assert!(rent.is_exempt(config.lamports, config.data.len()));

    // The adopted LP mint is a working mint
    deposit(&mut h, &pool, 1_000, 1_000, 1_000).await.unwrap();
    assert_eq!(h.mint_supply(&pool.mint_lp).await, 1_000);
}

#[tokio::test]
async fn test_foreign_vault_is_rejected() {
    let mut h = start_or_skip!();
    let (pool, user) = setup(&mut h).await;
    initialize(&mut h, &pool, FEE_BPS).await.unwrap();

    let mut ix = tx_builder::build_deposit_instruction(&h.program_id, &pool, &h.payer.pubkey(), 1_000, 1_000, 1_000);
    ix.accounts[5].pubkey = Pubkey::new_unique();
    let err = h.send(ix, &[]).await.unwrap_err();
    assert_eq!(custom_code(&err), Some(AmmError::InvalidAccount.code()));

    // Nothing moved
    assert_eq!(h.token_balance(&user.x).await, USER_FUNDS);
    assert_eq!(h.mint_supply(&pool.mint_lp).await, 0);
}

#[tokio::test]
async fn test_swap_slippage_leaves_balances_untouched() {
    let mut h = start_or_skip!();
    let (pool, user) = setup(&mut h).await;
    initialize(&mut h, &pool, FEE_BPS).await.unwrap();
    deposit(&mut h, &pool, 400_000, 480_000, 480_000).await.unwrap();

    let before = (reserves(&mut h, &pool).await, h.token_balance(&user.y).await);
    assert_eq!(
        swap(&mut h, &pool, 50_000, 45_160).await,
        Err(Some(AmmError::SlippageExceeded.code()))
    );
    let after = (reserves(&mut h, &pool).await, h.token_balance(&user.y).await);
    assert_eq!(before, after);

    swap(&mut h, &pool, 50_000, 45_159).await.unwrap();
    assert_eq!(reserves(&mut h, &pool).await, (530_000, 434_841));
}

#[tokio::test]
async fn test_lock_gates_trading() {
    let mut h = start_or_skip!();
    let (pool, _) = setup(&mut h).await;
    initialize(&mut h, &pool, FEE_BPS).await.unwrap();
    deposit(&mut h, &pool, 400_000, 480_000, 480_000).await.unwrap();

    // Only the stored authority may lock
    let stranger = Keypair::new();
    let ix = tx_builder::build_set_locked_instruction(&h.program_id, &pool.config, &stranger.pubkey(), true);
    let err = h.send(ix, &[&stranger]).await.unwrap_err();
    assert_eq!(custom_code(&err), Some(AmmError::Unauthorized.code()));

    let authority = h.payer.pubkey();
    let lock = tx_builder::build_set_locked_instruction(&h.program_id, &pool.config, &authority, true);
    h.send(lock, &[]).await.unwrap();

    assert_eq!(swap(&mut h, &pool, 10_000, 1).await, Err(Some(AmmError::PoolLocked.code())));
    assert_eq!(
        deposit(&mut h, &pool, 1_000, 2_000, 2_000).await,
        Err(Some(AmmError::PoolLocked.code()))
    );

    let unlock = tx_builder::build_set_locked_instruction(&h.program_id, &pool.config, &authority, false);
    h.send(unlock, &[]).await.unwrap();
    swap(&mut h, &pool, 10_000, 2).await.unwrap();

    let config = h.banks.get_account(pool.config).await.unwrap().unwrap();
    assert!(!decode_pool_config(&pool.config, &config.data).unwrap().locked);
}

#[tokio::test]
async fn test_client_addresses_match_program() {
    let mut h = start_or_skip!();
    let (pool, _) = setup(&mut h).await;
    initialize(&mut h, &pool, FEE_BPS).await.unwrap();

    // The LP mint sits where the client derives it and is owned by the token program
    let mint = h.banks.get_account(pool.mint_lp).await.unwrap().unwrap();
    assert_eq!(mint.owner, pda::token_program_id());
    assert_eq!(pool.mint_lp, pda::lp_mint_address(&h.program_id, &pool.config).0);
}
