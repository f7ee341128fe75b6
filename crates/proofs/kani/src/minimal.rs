//! Concrete Kani proofs on the reference pool

use crate::generators::*;
use pool_model::*;

/// Reference swap: 480k/480k pool, 50k in at 30 bps
#[kani::proof]
fn reference_swap_concrete() {
    let snapshot = PoolSnapshot {
        reserves: Reserves::new(480_000, 480_000),
        lp_supply: 400_000,
    };

    let quote = plan_swap(&pool_with_fee(30), &snapshot, &funded_user(), SwapDirection::XToY, 50_000, 1);

    match quote {
        Ok(q) => {
            assert_eq!(q.amount_out, 45_159);
            assert!(q.reserves_after.product() >= snapshot.reserves.product());
        }
        Err(_) => panic!("reference swap must succeed"),
    }
}

/// Redeeming the whole supply empties the pool
#[kani::proof]
fn full_withdraw_concrete() {
    let snapshot = PoolSnapshot {
        reserves: Reserves::new(480_000, 434_841),
        lp_supply: 400_000,
    };

    let plan = plan_withdraw(&pool_with_fee(30), &snapshot, &funded_user(), 400_000, 0, 0);

    match plan {
        Ok(p) => {
            assert_eq!(p.amount_x, 480_000);
            assert_eq!(p.amount_y, 434_841);
        }
        Err(_) => panic!("full withdraw must succeed"),
    }
}
