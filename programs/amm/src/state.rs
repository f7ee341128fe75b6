//! Pool config account layout

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};
use pool_model::{AmmError, Authority, PoolBumps, PoolConfig};

/// Size of PoolConfigAccount: 192 bytes
pub const POOL_CONFIG_SIZE: usize = 192;

/// Pool config account state
///
/// Holds everything about a pool except balances. Reserves live in the two
/// vaults and LP supply in the LP mint.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfigAccount {
    /// Magic bytes: "CPAMMCFG"
    pub magic: u64,

    /// Version (currently 0)
    pub version: u8,

    /// 1 while the pool is paused
    pub locked: u8,

    /// 0 = Permissionless, 1 = `authority` holds pause rights
    pub has_authority: u8,

    pub config_bump: u8,
    pub lp_bump: u8,
    pub vault_x_bump: u8,
    pub vault_y_bump: u8,

    pub _padding: [u8; 1],

    /// Caller-chosen PDA disambiguator
    pub seed: u64,

    /// Swap fee in basis points, < 10_000
    pub fee_bps: u16,

    pub _padding2: [u8; 6],

    /// Zero when Permissionless
    pub authority: Pubkey,

    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub mint_lp: Pubkey,

    /// Reserved for future use (32 bytes to reach 192 total)
    pub _reserved: [u8; 32],
}

impl PoolConfigAccount {
    /// Magic bytes for validation
    pub const MAGIC: &'static [u8; 8] = b"CPAMMCFG";

    /// Current version
    pub const VERSION: u8 = 0;

    pub const LEN: usize = POOL_CONFIG_SIZE;

    pub fn from_model(config: &PoolConfig) -> Self {
        let (has_authority, authority) = match config.authority {
            Authority::WithAuthority(key) => (1, key),
            Authority::Permissionless => (0, [0u8; 32]),
        };

        Self {
            magic: u64::from_le_bytes(*Self::MAGIC),
            version: Self::VERSION,
            locked: config.locked as u8,
            has_authority,
            config_bump: config.bumps.config,
            lp_bump: config.bumps.lp_mint,
            vault_x_bump: config.bumps.vault_x,
            vault_y_bump: config.bumps.vault_y,
            _padding: [0; 1],
            seed: config.seed,
            fee_bps: config.fee_bps,
            _padding2: [0; 6],
            authority,
            mint_x: config.mint_x,
            mint_y: config.mint_y,
            mint_lp: config.mint_lp,
            _reserved: [0; 32],
        }
    }

    pub fn to_model(&self) -> PoolConfig {
        let authority = if self.has_authority == 1 {
            Authority::WithAuthority(self.authority)
        } else {
            Authority::Permissionless
        };

        PoolConfig {
            seed: self.seed,
            authority,
            mint_x: self.mint_x,
            mint_y: self.mint_y,
            mint_lp: self.mint_lp,
            fee_bps: self.fee_bps,
            locked: self.locked != 0,
            bumps: PoolBumps {
                config: self.config_bump,
                lp_mint: self.lp_bump,
                vault_x: self.vault_x_bump,
                vault_y: self.vault_y_bump,
            },
        }
    }

    /// Validate magic and version
    pub fn validate(&self) -> bool {
        self.magic == u64::from_le_bytes(*Self::MAGIC) && self.version == Self::VERSION
    }

    /// Copy a validated config out of account data
    pub fn load(data: &[u8]) -> Result<Self, ProgramError> {
        if data.len() < Self::LEN {
            return Err(ProgramError::AccountDataTooSmall);
        }

        // SAFETY: length checked above; read_unaligned tolerates any alignment
        // and every bit pattern is a valid PoolConfigAccount
        let account = unsafe { core::ptr::read_unaligned(data.as_ptr() as *const Self) };
        if !account.validate() {
            return Err(AmmError::InvalidAccount.into());
        }
        Ok(account)
    }

    /// Write this config into account data
    pub fn store(&self, data: &mut [u8]) -> Result<(), ProgramError> {
        if data.len() < Self::LEN {
            return Err(ProgramError::AccountDataTooSmall);
        }

        // SAFETY: length checked above; write_unaligned tolerates any alignment
        unsafe { core::ptr::write_unaligned(data.as_mut_ptr() as *mut Self, *self) };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{offset_of, size_of};

    fn model() -> PoolConfig {
        PoolConfig {
            seed: 0xDEAD_BEEF,
            authority: Authority::WithAuthority([7; 32]),
            mint_x: [1; 32],
            mint_y: [2; 32],
            mint_lp: [3; 32],
            fee_bps: 30,
            locked: false,
            bumps: PoolBumps { config: 255, lp_mint: 254, vault_x: 253, vault_y: 252 },
        }
    }

    #[test]
    fn test_pool_config_size() {
        assert_eq!(size_of::<PoolConfigAccount>(), POOL_CONFIG_SIZE);
    }

    #[test]
    fn test_pool_config_offsets() {
        assert_eq!(offset_of!(PoolConfigAccount, locked), 9);
        assert_eq!(offset_of!(PoolConfigAccount, seed), 16);
        assert_eq!(offset_of!(PoolConfigAccount, fee_bps), 24);
        assert_eq!(offset_of!(PoolConfigAccount, authority), 32);
        assert_eq!(offset_of!(PoolConfigAccount, mint_x), 64);
        assert_eq!(offset_of!(PoolConfigAccount, mint_y), 96);
        assert_eq!(offset_of!(PoolConfigAccount, mint_lp), 128);
    }

    #[test]
    fn test_store_then_load() {
        let mut data = [0u8; POOL_CONFIG_SIZE];
        assert!(PoolConfigAccount::load(&data).is_err());

        let account = PoolConfigAccount::from_model(&model());
        account.store(&mut data).unwrap();

        assert_eq!(&data[..8], b"CPAMMCFG");
        assert_eq!(&data[16..24], &0xDEAD_BEEFu64.to_le_bytes());

        let loaded = PoolConfigAccount::load(&data).unwrap();
        assert_eq!(loaded.to_model(), model());
    }

    #[test]
    fn test_permissionless_stores_zero_authority() {
        let mut config = model();
        config.authority = Authority::Permissionless;
        config.locked = true;

        let account = PoolConfigAccount::from_model(&config);
        assert_eq!(account.has_authority, 0);
        assert_eq!(account.authority, [0; 32]);
        assert_eq!(account.locked, 1);
        assert_eq!(account.to_model(), config);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let data = [0xFFu8; POOL_CONFIG_SIZE];
        assert_eq!(
            PoolConfigAccount::load(&data),
            Err(ProgramError::Custom(AmmError::InvalidAccount.code()))
        );
        assert_eq!(
            PoolConfigAccount::load(&data[..100]),
            Err(ProgramError::AccountDataTooSmall)
        );
    }
}
