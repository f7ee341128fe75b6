//! Pool error taxonomy

use core::fmt;

/// Every way a pool operation can be rejected.
///
/// Discriminants are stable: they are the custom error codes the on-chain
/// program returns.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmError {
    /// Zero amount, or an amount the pool cannot honour (e.g. above supply)
    InvalidAmount = 0,
    /// fee_bps >= 10_000
    InvalidFee = 1,
    /// mint_x == mint_y
    DuplicateMint = 2,
    /// Pool config already exists for this seed
    AlreadyInitialized = 3,
    /// Computed amounts fall outside the caller's bounds
    SlippageExceeded = 4,
    /// Empty reserves, zero output, or output that would drain a vault
    InsufficientLiquidity = 5,
    /// Pool is paused
    PoolLocked = 6,
    /// An arithmetic step exceeded its working width
    MathOverflow = 7,
    /// Post-condition failed despite valid inputs (rounding defect)
    MathInvariantViolation = 8,
    /// Caller's token or LP balance does not cover the operation
    InsufficientBalance = 9,
    /// Signer is not the pool authority, or the pool has none
    Unauthorized = 10,
    /// Unlock requested on a pool that is not locked
    PoolUnlocked = 11,
    /// Account does not match its derived address or expected owner
    InvalidAccount = 12,
}

impl AmmError {
    /// Custom error code reported by the program
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Reverse of [`AmmError::code`], for clients decoding a failed transaction
    pub const fn from_code(code: u32) -> Option<Self> {
        let err = match code {
            0 => Self::InvalidAmount,
            1 => Self::InvalidFee,
            2 => Self::DuplicateMint,
            3 => Self::AlreadyInitialized,
            4 => Self::SlippageExceeded,
            5 => Self::InsufficientLiquidity,
            6 => Self::PoolLocked,
            7 => Self::MathOverflow,
            8 => Self::MathInvariantViolation,
            9 => Self::InsufficientBalance,
            10 => Self::Unauthorized,
            11 => Self::PoolUnlocked,
            12 => Self::InvalidAccount,
            _ => return None,
        };
        Some(err)
    }

    /// Short static description, usable from `msg!` without formatting
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidAmount => "invalid amount",
            Self::InvalidFee => "fee must be below 10000 bps",
            Self::DuplicateMint => "mint_x and mint_y must differ",
            Self::AlreadyInitialized => "pool already initialized",
            Self::SlippageExceeded => "slippage tolerance exceeded",
            Self::InsufficientLiquidity => "insufficient liquidity",
            Self::PoolLocked => "pool is locked",
            Self::MathOverflow => "arithmetic overflow",
            Self::MathInvariantViolation => "constant-product invariant violated",
            Self::InsufficientBalance => "insufficient balance",
            Self::Unauthorized => "signer is not the pool authority",
            Self::PoolUnlocked => "pool is not locked",
            Self::InvalidAccount => "invalid account",
        }
    }
}

impl fmt::Display for AmmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for AmmError {}

#[cfg(feature = "program")]
impl From<AmmError> for pinocchio::program_error::ProgramError {
    fn from(e: AmmError) -> Self {
        pinocchio::program_error::ProgramError::Custom(e.code())
    }
}
