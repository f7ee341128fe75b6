//! State space sanitizer - bounds values for Kani exploration

use pool_model::*;

/// Reserve and supply bound; keeps u128 products small for the solver
pub const MAX_RESERVE: u64 = 1_000_000;

/// Input bound for swaps and share requests
pub const MAX_AMOUNT: u64 = 100_000;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for Reserves {
    fn sanitize(self) -> Reserves {
        Reserves::new(self.x % MAX_RESERVE, self.y % MAX_RESERVE)
    }
}

impl Sanitize for PoolSnapshot {
    /// Clamp values and restore `supply == 0 <=> reserves empty`
    fn sanitize(self) -> PoolSnapshot {
        let reserves = self.reserves.sanitize();
        let lp_supply = if reserves.is_empty() {
            0
        } else {
            (self.lp_supply % MAX_RESERVE).max(1)
        };
        PoolSnapshot { reserves, lp_supply }
    }
}
