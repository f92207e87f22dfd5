//! Checked fixed-point helpers for period and price arithmetic.
//!
//! - whole_periods = floor((now - since) / period), inclusive at boundaries
//! - scale_bps = floor(value * bps / 10_000) computed in u128

use crate::constants::BPS_DENOMINATOR;
use crate::error::VestingError;

/// Number of whole periods of length `period` contained in `[since, now]`.
/// A clock that reads earlier than `since` yields zero periods.
pub fn whole_periods(now: i64, since: i64, period: i64) -> Result<u64, VestingError> {
    if period <= 0 {
        return Err(VestingError::InvalidParams);
    }
    if now <= since {
        return Ok(0);
    }
    let elapsed = now.checked_sub(since).ok_or(VestingError::MathOverflow)?;
    Ok((elapsed / period) as u64)
}

/// Seconds covered by `periods` whole periods of length `period`.
pub fn periods_to_seconds(periods: u64, period: i64) -> Result<i64, VestingError> {
    let secs = (periods as i128)
        .checked_mul(period as i128)
        .ok_or(VestingError::MathOverflow)?;
    i64::try_from(secs).map_err(|_| VestingError::MathOverflow)
}

/// `value * bps / 10_000`, rounded down.
pub fn scale_bps(value: u64, bps: u128) -> Result<u64, VestingError> {
    let v = (value as u128)
        .checked_mul(bps)
        .ok_or(VestingError::MathOverflow)?
        / BPS_DENOMINATOR;
    u64::try_from(v).map_err(|_| VestingError::MathOverflow)
}

/// Period variant of [`scale_bps`]; durations are signed seconds.
pub fn scale_period(period: i64, bps: u128) -> Result<i64, VestingError> {
    if period < 0 {
        return Err(VestingError::InvalidParams);
    }
    let v = (period as u128)
        .checked_mul(bps)
        .ok_or(VestingError::MathOverflow)?
        / BPS_DENOMINATOR;
    i64::try_from(v).map_err(|_| VestingError::MathOverflow)
}

/// True when `price >= baseline * bps / 10_000`, evaluated without rounding.
pub fn at_or_above_bps(price: u64, baseline: u64, bps: u128) -> bool {
    (price as u128) * BPS_DENOMINATOR >= (baseline as u128) * bps
}

/// True when `price <= baseline * bps / 10_000`, evaluated without rounding.
pub fn at_or_below_bps(price: u64, baseline: u64, bps: u128) -> bool {
    (price as u128) * BPS_DENOMINATOR <= (baseline as u128) * bps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;

    #[test]
    fn period_boundary_inclusive() {
        let start = 1_700_000_000;
        assert_eq!(whole_periods(start, start, SECONDS_PER_DAY).unwrap(), 0);
        // one second before the first boundary => still zero
        assert_eq!(
            whole_periods(start + SECONDS_PER_DAY - 1, start, SECONDS_PER_DAY).unwrap(),
            0
        );
        assert_eq!(
            whole_periods(start + SECONDS_PER_DAY, start, SECONDS_PER_DAY).unwrap(),
            1
        );
        assert_eq!(
            whole_periods(start + 3 * SECONDS_PER_DAY + 7, start, SECONDS_PER_DAY).unwrap(),
            3
        );
    }

    #[test]
    fn clock_behind_baseline_is_zero_periods() {
        assert_eq!(whole_periods(10, 20, 5).unwrap(), 0);
    }

    #[test]
    fn non_positive_period_rejected() {
        assert!(matches!(
            whole_periods(100, 0, 0),
            Err(VestingError::InvalidParams)
        ));
        assert!(matches!(
            whole_periods(100, 0, -1),
            Err(VestingError::InvalidParams)
        ));
    }

    #[test]
    fn scaling_rounds_down() {
        assert_eq!(scale_period(86_400, 8_000).unwrap(), 69_120);
        assert_eq!(scale_period(86_400, 12_000).unwrap(), 103_680);
        assert_eq!(scale_bps(3, 5_000).unwrap(), 1);
        assert_eq!(scale_bps(u64::MAX, 10_000).unwrap(), u64::MAX);
        assert!(matches!(
            scale_bps(u64::MAX, 20_000),
            Err(VestingError::MathOverflow)
        ));
    }

    #[test]
    fn ratio_comparisons_are_exact() {
        // 110 is exactly 110% of 100
        assert!(at_or_above_bps(110, 100, 11_000));
        assert!(!at_or_above_bps(109, 100, 11_000));
        assert!(at_or_below_bps(90, 100, 9_000));
        assert!(!at_or_below_bps(91, 100, 9_000));
        // 1.1 * 7 = 7.7; 7 does not reach it, 8 does
        assert!(!at_or_above_bps(7, 7, 11_000));
        assert!(at_or_above_bps(8, 7, 11_000));
    }
}
