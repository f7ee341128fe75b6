//! Instruction builders for the AMM program

use crate::pda::{associated_token_program_id, token_program_id, PoolAddresses};
use cpamm_common::AmmInstruction;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    system_program,
    transaction::Transaction,
};

fn encode(ix: &AmmInstruction) -> Vec<u8> {
    let mut buf = [0u8; AmmInstruction::MAX_LEN];
    let len = ix.pack(&mut buf);
    buf[..len].to_vec()
}

/// Build initialize instruction
pub fn build_initialize_instruction(
    program_id: &Pubkey,
    pool: &PoolAddresses,
    initializer: &Pubkey,
    seed: u64,
    fee_bps: u16,
    authority: Option<Pubkey>,
) -> Instruction {
    let data = encode(&AmmInstruction::Initialize {
        seed,
        fee_bps,
        authority: authority.map(|key| key.to_bytes()),
    });

    let accounts = vec![
        AccountMeta::new(*initializer, true),
        AccountMeta::new_readonly(pool.mint_x, false),
        AccountMeta::new_readonly(pool.mint_y, false),
        AccountMeta::new(pool.mint_lp, false),
        AccountMeta::new(pool.vault_x, false),
        AccountMeta::new(pool.vault_y, false),
        AccountMeta::new(pool.config, false),
        AccountMeta::new_readonly(token_program_id(), false),
        AccountMeta::new_readonly(associated_token_program_id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

/// Shared account list of deposit and withdraw
fn liquidity_accounts(pool: &PoolAddresses, user: &Pubkey) -> Vec<AccountMeta> {
    let user_accounts = pool.user_accounts(user);
    vec![
        AccountMeta::new(*user, true),
        AccountMeta::new_readonly(pool.mint_x, false),
        AccountMeta::new_readonly(pool.mint_y, false),
        AccountMeta::new_readonly(pool.config, false),
        AccountMeta::new(pool.mint_lp, false),
        AccountMeta::new(pool.vault_x, false),
        AccountMeta::new(pool.vault_y, false),
        AccountMeta::new(user_accounts.x, false),
        AccountMeta::new(user_accounts.y, false),
        AccountMeta::new(user_accounts.lp, false),
        AccountMeta::new_readonly(token_program_id(), false),
        AccountMeta::new_readonly(associated_token_program_id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ]
}

/// Build deposit instruction
pub fn build_deposit_instruction(
    program_id: &Pubkey,
    pool: &PoolAddresses,
    user: &Pubkey,
    lp_amount: u64,
    max_x: u64,
    max_y: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: liquidity_accounts(pool, user),
        data: encode(&AmmInstruction::Deposit { lp_amount, max_x, max_y }),
    }
}

/// Build withdraw instruction
pub fn build_withdraw_instruction(
    program_id: &Pubkey,
    pool: &PoolAddresses,
    user: &Pubkey,
    lp_amount: u64,
    min_x: u64,
    min_y: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: liquidity_accounts(pool, user),
        data: encode(&AmmInstruction::Withdraw { lp_amount, min_x, min_y }),
    }
}

/// Build swap instruction
pub fn build_swap_instruction(
    program_id: &Pubkey,
    pool: &PoolAddresses,
    user: &Pubkey,
    x_to_y: bool,
    amount_in: u64,
    min_amount_out: u64,
) -> Instruction {
    let user_accounts = pool.user_accounts(user);
    let accounts = vec![
        AccountMeta::new(*user, true),
        AccountMeta::new_readonly(pool.mint_x, false),
        AccountMeta::new_readonly(pool.mint_y, false),
        AccountMeta::new_readonly(pool.config, false),
        AccountMeta::new_readonly(pool.mint_lp, false),
        AccountMeta::new(pool.vault_x, false),
        AccountMeta::new(pool.vault_y, false),
        AccountMeta::new(user_accounts.x, false),
        AccountMeta::new(user_accounts.y, false),
        AccountMeta::new_readonly(token_program_id(), false),
        AccountMeta::new_readonly(associated_token_program_id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: encode(&AmmInstruction::Swap { x_to_y, amount_in, min_amount_out }),
    }
}

/// Build lock or unlock instruction
pub fn build_set_locked_instruction(
    program_id: &Pubkey,
    config: &Pubkey,
    authority: &Pubkey,
    locked: bool,
) -> Instruction {
    let ix = if locked { AmmInstruction::Lock } else { AmmInstruction::Unlock };

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(*config, false),
        ],
        data: encode(&ix),
    }
}

/// Wrap one instruction in a transaction paid and signed by `payer`
pub fn build_transaction(
    instruction: Instruction,
    payer: &Keypair,
    recent_blockhash: solana_sdk::hash::Hash,
) -> Transaction {
    Transaction::new_signed_with_payer(
        &[instruction],
        Some(&payer.pubkey()),
        &[payer],
        recent_blockhash,
    )
}
