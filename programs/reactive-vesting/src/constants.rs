//! Program-wide constants.

/// PDA seed for the service directory.
pub const DIRECTORY_SEED: &[u8] = b"directory";

/// PDA seed for the vesting core (custody authority + share ledger caller).
pub const VESTING_CORE_SEED: &[u8] = b"vesting_core";

/// PDA seed for the principal vault, combined with the vesting core key.
pub const VAULT_SEED: &[u8] = b"vault";

/// PDA seed for a beneficiary's schedule, combined with the beneficiary key.
pub const SCHEDULE_SEED: &[u8] = b"schedule";

/// PDA seed for the share ledger.
pub const SHARE_LEDGER_SEED: &[u8] = b"share_ledger";

/// PDA seed for a beneficiary's share balance, combined with the beneficiary key.
pub const SHARE_BALANCE_SEED: &[u8] = b"shares";

/// PDA seed for the policy controller state.
pub const POLICY_SEED: &[u8] = b"policy";

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Shortest release period the ledger will ever compute against.
pub const MIN_PERIOD_FLOOR: i64 = 3_600;

pub const BPS_DENOMINATOR: u128 = 10_000;

/// Accelerate shrinks the period by 20%.
pub const ACCELERATE_PERIOD_BPS: u128 = 8_000;

/// Decelerate grows the period by 20%.
pub const DECELERATE_PERIOD_BPS: u128 = 12_000;

/// Price at or above 110% of the baseline triggers an acceleration.
pub const ACCELERATE_TRIGGER_BPS: u128 = 11_000;

/// Price at or below 90% of the baseline triggers a deceleration.
pub const DECELERATE_TRIGGER_BPS: u128 = 9_000;

/// Critical-low price as a share of the initial price (50%).
pub const CRITICAL_LOW_BPS: u128 = 5_000;

/// Recovery price as a share of the critical-low price (110%).
pub const RECOVERY_BPS: u128 = 11_000;

/// Observations retained by a price feed.
pub const MAX_OBSERVATIONS: usize = 32;
