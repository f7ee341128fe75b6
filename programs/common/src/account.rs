//! Account validation helpers
//!
//! Every check logs a short reason before failing so a rejected transaction
//! explains itself in the program log.

use pinocchio::{
    account_info::{AccountInfo, RefMut},
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

/// Account must have signed the transaction
#[inline]
pub fn validate_signer(account: &AccountInfo) -> Result<(), ProgramError> {
    if !account.is_signer() {
        msg!("Error: Missing required signature");
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

/// Account must be passed as writable
#[inline]
pub fn validate_writable(account: &AccountInfo) -> Result<(), ProgramError> {
    if !account.is_writable() {
        msg!("Error: Account must be writable");
        return Err(ProgramError::InvalidAccountData);
    }
    Ok(())
}

/// Account must be owned by `owner`
#[inline]
pub fn validate_owner(account: &AccountInfo, owner: &Pubkey) -> Result<(), ProgramError> {
    if !account.is_owned_by(owner) {
        msg!("Error: Account has wrong owner");
        return Err(ProgramError::IllegalOwner);
    }
    Ok(())
}

/// Account must be the given program
#[inline]
pub fn validate_program(account: &AccountInfo, program_id: &Pubkey) -> Result<(), ProgramError> {
    if account.key() != program_id {
        msg!("Error: Unexpected program account");
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Mutably borrow account data, requiring at least `len` bytes
#[inline]
pub fn borrow_account_data_mut(account: &AccountInfo, len: usize) -> Result<RefMut<'_, [u8]>, ProgramError> {
    let data = account.try_borrow_mut_data()?;
    if data.len() < len {
        msg!("Error: Account data too small");
        return Err(ProgramError::AccountDataTooSmall);
    }
    Ok(data)
}
