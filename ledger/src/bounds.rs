//! Plausibility bounds between consecutive records.
//!
//! Pure functions: given the previous accepted record, a candidate and the
//! configured limits, either admit the candidate or report the first check
//! it fails together with the observed value and the crossed bound.
//!
//! Checks run in a fixed order:
//! 1. period length against the configured minimum
//! 2. withdrawable validators must not decrease
//! 3. total validators must not decrease
//! 4. processed deposits must not decrease
//! 5. new deposits must match new validators within per-validator limits
//! 6. consensus-layer balance change must lie in an asymmetric window:
//!    `baseline - loss + min_gain <= observed <= baseline + max_gain`, where
//!    loss is a flat fraction and both gains scale with the period length.

use oracle_types::{BoundCheck, BoundViolation, BoundsParams, Record, PPM_DENOMINATOR, PPT_DENOMINATOR};

/// Run every check of `candidate` against `prev`; first failure wins.
pub fn sanity_check(
    prev: &Record,
    candidate: &Record,
    params: &BoundsParams,
) -> Result<(), BoundViolation> {
    let report_size = candidate.period_len();
    if report_size < params.min_report_size_blocks {
        return Err(BoundViolation::new(
            BoundCheck::ReportTooSmall,
            report_size as u128,
            params.min_report_size_blocks as u128,
        ));
    }

    if candidate.total_validators_withdrawable < prev.total_validators_withdrawable {
        return Err(BoundViolation::new(
            BoundCheck::WithdrawableValidatorsDecreased,
            candidate.total_validators_withdrawable as u128,
            prev.total_validators_withdrawable as u128,
        ));
    }

    let prev_validators = prev.total_validators();
    let new_validators = candidate.total_validators();
    if new_validators < prev_validators {
        return Err(BoundViolation::new(
            BoundCheck::TotalValidatorsDecreased,
            new_validators,
            prev_validators,
        ));
    }

    if candidate.total_processed_deposit < prev.total_processed_deposit {
        return Err(BoundViolation::new(
            BoundCheck::ProcessedDepositDecreased,
            candidate.total_processed_deposit,
            prev.total_processed_deposit,
        ));
    }

    let deposit_added = candidate.total_processed_deposit - prev.total_processed_deposit;
    let validators_added = new_validators - prev_validators;
    check_deposits(deposit_added, validators_added, params)?;

    check_balance(prev, candidate, deposit_added, report_size, params)
}

fn check_deposits(
    deposit_added: u128,
    validators_added: u128,
    params: &BoundsParams,
) -> Result<(), BoundViolation> {
    let min = validators_added.saturating_mul(params.min_deposit_per_validator);
    if deposit_added < min {
        return Err(BoundViolation::new(
            BoundCheck::DepositBelowMinimum,
            deposit_added,
            min,
        ));
    }

    let max = validators_added.saturating_mul(params.max_deposit_per_validator);
    if deposit_added > max {
        return Err(BoundViolation::new(
            BoundCheck::DepositAboveMaximum,
            deposit_added,
            max,
        ));
    }
    Ok(())
}

fn check_balance(
    prev: &Record,
    candidate: &Record,
    deposit_added: u128,
    report_size: u64,
    params: &BoundsParams,
) -> Result<(), BoundViolation> {
    // What the pool would hold with neither rewards nor penalties.
    let baseline = prev.total_validator_balance.saturating_add(deposit_added);
    // Everything accounted for, including what left custody this period.
    let observed = candidate
        .total_validator_balance
        .saturating_add(candidate.window_withdrawn_principal_amount)
        .saturating_add(candidate.window_withdrawn_reward_amount);

    let max_loss = mul_div(params.max_loss_ppm as u128, baseline, PPM_DENOMINATOR);
    let min_gain = mul_div(
        params.min_gain_per_block_ppt as u128 * report_size as u128,
        baseline,
        PPT_DENOMINATOR,
    );
    let lower = baseline.saturating_sub(max_loss).saturating_add(min_gain);
    if observed < lower {
        return Err(BoundViolation::new(
            BoundCheck::BalanceBelowMinGainOrMaxLoss,
            observed,
            lower,
        ));
    }

    let max_gain = mul_div(
        params.max_gain_per_block_ppt as u128 * report_size as u128,
        baseline,
        PPT_DENOMINATOR,
    );
    let upper = baseline.saturating_add(max_gain);
    if observed > upper {
        return Err(BoundViolation::new(
            BoundCheck::BalanceAboveMaxGain,
            observed,
            upper,
        ));
    }
    Ok(())
}

/// `a * b / denom` with a 256-bit intermediate, rounding down and
/// saturating at `u128::MAX`.
pub(crate) fn mul_div(a: u128, b: u128, denom: u64) -> u128 {
    const LOW: u128 = u64::MAX as u128;

    let d = denom.max(1) as u128;
    if let Some(product) = a.checked_mul(b) {
        return product / d;
    }

    let (a_hi, a_lo) = (a >> 64, a & LOW);
    let (b_hi, b_lo) = (b >> 64, b & LOW);
    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    // little-endian 64-bit limbs of the full product
    let mid = (ll >> 64) + (lh & LOW) + (hl & LOW);
    let upper = (mid >> 64) + (lh >> 64) + (hl >> 64) + (hh & LOW);
    let top = (upper >> 64) + (hh >> 64);
    let limbs = [ll as u64, mid as u64, upper as u64, top as u64];

    let mut quotient = [0u64; 4];
    let mut rem: u128 = 0;
    for i in (0..4).rev() {
        let cur = (rem << 64) | limbs[i] as u128;
        quotient[i] = (cur / d) as u64;
        rem = cur % d;
    }

    if quotient[2] != 0 || quotient[3] != 0 {
        return u128::MAX;
    }
    ((quotient[1] as u128) << 64) | quotient[0] as u128
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_types::WEI_PER_ETH;

    const ETH: u128 = WEI_PER_ETH;

    fn params() -> BoundsParams {
        BoundsParams {
            min_report_size_blocks: 10,
            ..BoundsParams::default()
        }
    }

    fn genesis() -> Record {
        Record {
            update_start_block: 1,
            update_end_block: 100,
            total_validators_not_withdrawable: 32,
            total_validators_withdrawable: 0,
            window_withdrawn_principal_amount: 0,
            window_withdrawn_reward_amount: 0,
            total_validator_balance: 1024 * ETH,
            total_processed_deposit: 1024 * ETH,
        }
    }

    /// 101..=150 with a small consensus-layer gain and no new validators.
    fn next() -> Record {
        Record {
            update_start_block: 101,
            update_end_block: 150,
            total_validator_balance: 1024 * ETH + 1_000_000_000_000_000,
            ..genesis()
        }
    }

    fn violation(candidate: &Record) -> BoundViolation {
        sanity_check(&genesis(), candidate, &params()).unwrap_err()
    }

    #[test]
    fn ordinary_growth_is_admitted() {
        assert_eq!(sanity_check(&genesis(), &next(), &params()), Ok(()));
    }

    #[test]
    fn short_period_is_rejected() {
        let r = Record {
            update_end_block: 105,
            ..next()
        };
        let v = violation(&r);
        assert_eq!(v.check, BoundCheck::ReportTooSmall);
        assert_eq!((v.observed, v.bound), (5, 10));
    }

    #[test]
    fn withdrawable_count_must_not_shrink() {
        let prev = Record {
            total_validators_withdrawable: 2,
            total_validators_not_withdrawable: 30,
            ..genesis()
        };
        let r = Record {
            total_validators_withdrawable: 1,
            total_validators_not_withdrawable: 31,
            ..next()
        };
        let v = sanity_check(&prev, &r, &params()).unwrap_err();
        assert_eq!(v.check, BoundCheck::WithdrawableValidatorsDecreased);
        assert_eq!((v.observed, v.bound), (1, 2));
    }

    #[test]
    fn total_validators_must_not_shrink() {
        let r = Record {
            total_validators_not_withdrawable: 31,
            ..next()
        };
        let v = violation(&r);
        assert_eq!(v.check, BoundCheck::TotalValidatorsDecreased);
        assert_eq!((v.observed, v.bound), (31, 32));
    }

    #[test]
    fn processed_deposit_must_not_shrink() {
        let r = Record {
            total_processed_deposit: 1024 * ETH - 1,
            ..next()
        };
        let v = violation(&r);
        assert_eq!(v.check, BoundCheck::ProcessedDepositDecreased);
        assert_eq!(v.bound, 1024 * ETH);
    }

    #[test]
    fn new_validator_with_full_deposit_is_admitted() {
        let r = Record {
            total_validators_not_withdrawable: 33,
            total_processed_deposit: 1056 * ETH,
            total_validator_balance: 1056 * ETH + 1_000_000_000_000_000,
            ..next()
        };
        assert_eq!(sanity_check(&genesis(), &r, &params()), Ok(()));
    }

    #[test]
    fn underfunded_validator_is_rejected() {
        let r = Record {
            total_validators_not_withdrawable: 33,
            total_processed_deposit: 1055 * ETH,
            total_validator_balance: 1055 * ETH + 1_000_000_000_000_000,
            ..next()
        };
        let v = violation(&r);
        assert_eq!(v.check, BoundCheck::DepositBelowMinimum);
        assert_eq!((v.observed, v.bound), (31 * ETH, 32 * ETH));
    }

    #[test]
    fn deposit_without_validators_is_rejected() {
        let r = Record {
            total_processed_deposit: 1024 * ETH + 1,
            ..next()
        };
        let v = violation(&r);
        assert_eq!(v.check, BoundCheck::DepositAboveMaximum);
        assert_eq!((v.observed, v.bound), (1, 0));
    }

    #[test]
    fn large_loss_is_rejected() {
        let r = Record {
            total_validator_balance: 1022 * ETH,
            ..next()
        };
        let v = violation(&r);
        assert_eq!(v.check, BoundCheck::BalanceBelowMinGainOrMaxLoss);
        // baseline - 0.1% loss + 50 blocks of min gain
        let expected_lower = 1024 * ETH - 1_024_000_000_000_000_000 + 97_433_600_000_000;
        assert_eq!(v.bound, expected_lower);
        assert_eq!(v.observed, 1022 * ETH);
    }

    #[test]
    fn withdrawals_count_towards_observed_balance() {
        let r = Record {
            total_validator_balance: 992 * ETH,
            window_withdrawn_principal_amount: 32 * ETH,
            window_withdrawn_reward_amount: 1_000_000_000_000_000,
            total_validators_withdrawable: 1,
            total_validators_not_withdrawable: 31,
            ..next()
        };
        assert_eq!(sanity_check(&genesis(), &r, &params()), Ok(()));
    }

    #[test]
    fn implausible_gain_is_rejected() {
        let r = Record {
            total_validator_balance: 1024 * ETH + 10_000_000_000_000_000,
            ..next()
        };
        let v = violation(&r);
        assert_eq!(v.check, BoundCheck::BalanceAboveMaxGain);
        assert_eq!(v.bound, 1024 * ETH + 9_740_800_000_000_000);
    }

    #[test]
    fn flat_balance_fails_min_gain_without_loss_tolerance() {
        let strict = BoundsParams {
            max_loss_ppm: 0,
            ..params()
        };
        let flat = Record {
            total_validator_balance: 1024 * ETH,
            ..next()
        };
        let v = sanity_check(&genesis(), &flat, &strict).unwrap_err();
        assert_eq!(v.check, BoundCheck::BalanceBelowMinGainOrMaxLoss);
    }

    #[test]
    fn first_failing_check_wins() {
        let r = Record {
            update_end_block: 102,
            total_processed_deposit: 0,
            ..next()
        };
        assert_eq!(violation(&r).check, BoundCheck::ReportTooSmall);
    }

    #[test]
    fn mul_div_matches_naive_when_small() {
        assert_eq!(mul_div(6, 7, 4), 10);
        assert_eq!(mul_div(0, u128::MAX, 9), 0);
        assert_eq!(mul_div(1_000, 1_024 * ETH, 1_000_000), 1_024_000_000_000_000_000);
    }

    #[test]
    fn mul_div_uses_wide_intermediate() {
        assert_eq!(mul_div(u128::MAX, 1_000, 1_000), u128::MAX);
        assert_eq!(mul_div(u128::MAX, 2, 4), u128::MAX / 2);
        let big = 1u128 << 100;
        assert_eq!(mul_div(big, 1u128 << 60, 1 << 40), 1u128 << 120);
    }

    #[test]
    fn mul_div_saturates() {
        assert_eq!(mul_div(u128::MAX, u128::MAX, 1), u128::MAX);
    }
}
