//! Pure state model for a two-asset pool

/// 32-byte account address (same representation as `pinocchio::pubkey::Pubkey`)
pub type Address = [u8; 32];

/// Who may pause the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    WithAuthority(Address),
    Permissionless,
}

impl Authority {
    pub fn from_option(authority: Option<Address>) -> Self {
        match authority {
            Some(key) => Self::WithAuthority(key),
            None => Self::Permissionless,
        }
    }

    pub fn as_option(&self) -> Option<&Address> {
        match self {
            Self::WithAuthority(key) => Some(key),
            Self::Permissionless => None,
        }
    }

    /// True if `signer` holds pause rights
    pub fn permits(&self, signer: &Address) -> bool {
        matches!(self, Self::WithAuthority(key) if key == signer)
    }
}

/// Persisted derivation bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolBumps {
    pub config: u8,
    pub lp_mint: u8,
    pub vault_x: u8,
    pub vault_y: u8,
}

/// Pool configuration - everything except balances
///
/// `fee_bps`, `mint_x` and `mint_y` are fixed at initialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub seed: u64,
    pub authority: Authority,
    pub mint_x: Address,
    pub mint_y: Address,
    pub mint_lp: Address,
    pub fee_bps: u16,
    pub locked: bool,
    pub bumps: PoolBumps,
}

/// One side of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    X,
    Y,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::X => Side::Y,
            Side::Y => Side::X,
        }
    }
}

/// Swap direction, from the `x_to_y` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    XToY,
    YToX,
}

impl SwapDirection {
    pub fn from_flag(x_to_y: bool) -> Self {
        if x_to_y {
            Self::XToY
        } else {
            Self::YToX
        }
    }

    /// Side the caller pays into
    pub fn input_side(self) -> Side {
        match self {
            Self::XToY => Side::X,
            Self::YToX => Side::Y,
        }
    }

    /// Side the caller is paid from
    pub fn output_side(self) -> Side {
        self.input_side().opposite()
    }
}

/// Live vault balances - these ARE the reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reserves {
    pub x: u64,
    pub y: u64,
}

impl Reserves {
    pub fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }

    pub fn get(&self, side: Side) -> u64 {
        match side {
            Side::X => self.x,
            Side::Y => self.y,
        }
    }

    /// (reserve_in, reserve_out) for a direction
    pub fn oriented(&self, direction: SwapDirection) -> (u64, u64) {
        (
            self.get(direction.input_side()),
            self.get(direction.output_side()),
        )
    }

    pub fn product(&self) -> u128 {
        crate::math::pool_product(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Everything an operation reads at the start of its transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolSnapshot {
    pub reserves: Reserves,
    pub lp_supply: u64,
}

/// The calling user's balances in the three pool assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserBalances {
    pub x: u64,
    pub y: u64,
    pub lp: u64,
}

impl UserBalances {
    pub fn get(&self, side: Side) -> u64 {
        match side {
            Side::X => self.x,
            Side::Y => self.y,
        }
    }
}
