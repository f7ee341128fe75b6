//! Program-test harness for the AMM program
//!
//! Loads the compiled `cpamm_program.so` next to the SPL token and associated
//! token programs that `ProgramTest` ships with. Build it first with
//! `cargo build-sbf --manifest-path programs/amm/Cargo.toml`; without the
//! shared object every test reports a skip instead of failing.

use cpamm_client::{config::cpamm_program_id, pda, pool};
use solana_program_test::{BanksClient, BanksClientError, ProgramTest};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program,
    transaction::{Transaction, TransactionError},
};
use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "cpamm_program";

/// Headroom for initialize, which runs five CPIs
const COMPUTE_UNIT_LIMIT: u32 = 400_000;

/// SPL mint account size
const MINT_LEN: usize = 82;

// SPL token instruction tags
const TOKEN_MINT_TO: u8 = 7;
const TOKEN_INITIALIZE_MINT2: u8 = 20;

/// Directory holding the built program, if any
fn program_dir() -> Option<PathBuf> {
    let file = format!("{}.so", PROGRAM_NAME);
    ["SBF_OUT_DIR", "BPF_OUT_DIR"]
        .iter()
        .filter_map(|var| std::env::var_os(var).map(PathBuf::from))
        .chain(std::iter::once(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/deploy"),
        ))
        .find(|dir| dir.join(&file).exists())
}

/// Error code of a failed `Custom` instruction error
pub fn custom_code(err: &BanksClientError) -> Option<u32> {
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}

/// Start the harness or return from the test with a skip notice
#[macro_export]
macro_rules! start_or_skip {
    () => {
        match $crate::Harness::start().await {
            Some(harness) => harness,
            None => {
                eprintln!(
                    "skipping: {}.so not built (cargo build-sbf --manifest-path programs/amm/Cargo.toml)",
                    $crate::PROGRAM_NAME
                );
                return;
            }
        }
    };
}

pub struct Harness {
    pub banks: BanksClient,
    pub payer: Keypair,
    pub program_id: Pubkey,
}

impl Harness {
    pub async fn start() -> Option<Self> {
        let dir = program_dir()?;
        std::env::set_var("SBF_OUT_DIR", dir);

        let program_id = cpamm_program_id();
        let mut program_test = ProgramTest::new(PROGRAM_NAME, program_id, None);
        program_test.prefer_bpf(true);

        let (banks, payer, _) = program_test.start().await;
        Some(Self {
            banks,
            payer,
            program_id,
        })
    }

    /// Send one instruction paid by the harness payer
    pub async fn send(&mut self, ix: Instruction, signers: &[&Keypair]) -> Result<(), BanksClientError> {
        let blockhash = self.banks.get_latest_blockhash().await?;
        let mut all_signers = vec![&self.payer];
        all_signers.extend_from_slice(signers);

        let tx = Transaction::new_signed_with_payer(
            &[ComputeBudgetInstruction::set_compute_unit_limit(COMPUTE_UNIT_LIMIT), ix],
            Some(&self.payer.pubkey()),
            &all_signers,
            blockhash,
        );
        self.banks.process_transaction(tx).await
    }

    /// Move lamports from the payer, creating `to` if needed
    pub async fn fund(&mut self, to: &Pubkey, lamports: u64) {
        let ix = system_instruction::transfer(&self.payer.pubkey(), to, lamports);
        self.send(ix, &[]).await.unwrap();
    }

    /// New mint with the payer as mint authority
    pub async fn create_mint(&mut self, decimals: u8) -> Pubkey {
        let mint = Keypair::new();
        let rent = self.banks.get_rent().await.unwrap();

        let create = system_instruction::create_account(
            &self.payer.pubkey(),
            &mint.pubkey(),
            rent.minimum_balance(MINT_LEN),
            MINT_LEN as u64,
            &pda::token_program_id(),
        );
        self.send(create, &[&mint]).await.unwrap();

        let mut data = vec![TOKEN_INITIALIZE_MINT2, decimals];
        data.extend_from_slice(self.payer.pubkey().as_ref());
        data.push(0); // no freeze authority
        let init = Instruction {
            program_id: pda::token_program_id(),
            accounts: vec![AccountMeta::new(mint.pubkey(), false)],
            data,
        };
        self.send(init, &[]).await.unwrap();

        mint.pubkey()
    }

    /// `owner`'s associated token account for `mint`, created idempotently
    pub async fn create_token_account(&mut self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        let account = pda::associated_token_address(owner, mint);
        let ix = Instruction {
            program_id: pda::associated_token_program_id(),
            accounts: vec![
                AccountMeta::new(self.payer.pubkey(), true),
                AccountMeta::new(account, false),
                AccountMeta::new_readonly(*owner, false),
                AccountMeta::new_readonly(*mint, false),
                AccountMeta::new_readonly(system_program::id(), false),
                AccountMeta::new_readonly(pda::token_program_id(), false),
            ],
            data: vec![1], // CreateIdempotent
        };
        self.send(ix, &[]).await.unwrap();
        account
    }

    pub async fn mint_to(&mut self, mint: &Pubkey, account: &Pubkey, amount: u64) {
        let mut data = vec![TOKEN_MINT_TO];
        data.extend_from_slice(&amount.to_le_bytes());
        let ix = Instruction {
            program_id: pda::token_program_id(),
            accounts: vec![
                AccountMeta::new(*mint, false),
                AccountMeta::new(*account, false),
                AccountMeta::new_readonly(self.payer.pubkey(), true),
            ],
            data,
        };
        self.send(ix, &[]).await.unwrap();
    }

    /// Token balance, zero for an account that does not exist
    pub async fn token_balance(&mut self, account: &Pubkey) -> u64 {
        match self.banks.get_account(*account).await.unwrap() {
            Some(data) => pool::decode_token_amount(account, &data).unwrap(),
            None => 0,
        }
    }

    pub async fn mint_supply(&mut self, mint: &Pubkey) -> u64 {
        let account = self.banks.get_account(*mint).await.unwrap().unwrap();
        pool::decode_mint_supply(mint, &account).unwrap()
    }
}
