//! Program entrypoint

use crate::instructions::*;
use cpamm_common::AmmInstruction;
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instruction);

/// Main entrypoint
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = AmmInstruction::unpack(instruction_data).inspect_err(|_| {
        msg!("Error: Invalid instruction data");
    })?;

    match instruction {
        AmmInstruction::Initialize { seed, fee_bps, authority } => {
            msg!("Instruction: Initialize");
            process_initialize(program_id, accounts, seed, fee_bps, authority)
        }
        AmmInstruction::Deposit { lp_amount, max_x, max_y } => {
            msg!("Instruction: Deposit");
            process_deposit(program_id, accounts, lp_amount, max_x, max_y)
        }
        AmmInstruction::Withdraw { lp_amount, min_x, min_y } => {
            msg!("Instruction: Withdraw");
            process_withdraw(program_id, accounts, lp_amount, min_x, min_y)
        }
        AmmInstruction::Swap { x_to_y, amount_in, min_amount_out } => {
            msg!("Instruction: Swap");
            process_swap(program_id, accounts, x_to_y, amount_in, min_amount_out)
        }
        AmmInstruction::Lock => {
            msg!("Instruction: Lock");
            process_set_locked(program_id, accounts, true)
        }
        AmmInstruction::Unlock => {
            msg!("Instruction: Unlock");
            process_set_locked(program_id, accounts, false)
        }
    }
}
