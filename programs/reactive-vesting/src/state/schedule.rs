use anchor_lang::prelude::*;

use crate::constants::MIN_PERIOD_FLOOR;
use crate::error::{VestingError, VestingResult};
use crate::state::policy::ReleaseParams;
use crate::utils::math;

/// One vesting schedule per beneficiary PDA. Never closed: a fully claimed
/// schedule stays at `remaining() == 0` and accepts further top-ups.
#[account]
pub struct VestingSchedule {
    pub beneficiary: Pubkey,
    /// Principal deposited so far (top-ups only ever add).
    pub total_amount: u64,
    /// Principal released so far (<= total_amount).
    pub claimed_amount: u64,
    /// Start of the next unreleased period; moves forward by whole periods.
    pub last_release_time: i64,
    pub created_at: i64,
    pub bump: u8,
}

/// How a deposit landed on the schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deposit {
    Opened,
    ToppedUp,
}

/// Entitlement computed for a claim at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    pub periods_elapsed: u64,
    pub releasable: u64,
    /// Seconds `last_release_time` moves on commit (whole periods only).
    pub advance: i64,
}

impl VestingSchedule {
    pub const SIZE: usize =
        32 + // beneficiary
        8 +  // total_amount
        8 +  // claimed_amount
        8 +  // last_release_time
        8 +  // created_at
        1;   // bump

    pub fn is_open(&self) -> bool {
        self.beneficiary != Pubkey::default()
    }

    pub fn remaining(&self) -> u64 {
        self.total_amount.saturating_sub(self.claimed_amount)
    }

    /// Only the beneficiary of an opened schedule may claim from it.
    pub fn authorize_claim(&self, caller: &Pubkey) -> VestingResult<()> {
        if !self.is_open() {
            return Err(VestingError::InvalidSchedule);
        }
        if self.beneficiary != *caller {
            return Err(VestingError::NotBeneficiary);
        }
        Ok(())
    }

    /// Opens the schedule on first deposit, tops it up afterwards. A top-up
    /// keeps both `claimed_amount` and `last_release_time`.
    pub fn deposit(
        &mut self,
        beneficiary: Pubkey,
        amount: u64,
        now: i64,
        bump: u8,
    ) -> VestingResult<Deposit> {
        if beneficiary == Pubkey::default() {
            return Err(VestingError::ZeroAddress);
        }
        if amount == 0 {
            return Err(VestingError::ZeroAmount);
        }
        if self.is_open() {
            if self.beneficiary != beneficiary {
                return Err(VestingError::InvalidSchedule);
            }
            self.total_amount = self
                .total_amount
                .checked_add(amount)
                .ok_or(VestingError::MathOverflow)?;
            return Ok(Deposit::ToppedUp);
        }
        *self = Self {
            beneficiary,
            total_amount: amount,
            claimed_amount: 0,
            last_release_time: now,
            created_at: now,
            bump,
        };
        Ok(Deposit::Opened)
    }

    /// Whole-period entitlement at `now`, clamped to what is left.
    pub fn compute_release(
        &self,
        now: i64,
        params: &ReleaseParams,
    ) -> VestingResult<Release> {
        if !self.is_open() {
            return Err(VestingError::InvalidSchedule);
        }
        if params.period_duration < MIN_PERIOD_FLOOR || params.tokens_per_period == 0 {
            return Err(VestingError::InvalidParams);
        }
        let periods_elapsed =
            math::whole_periods(now, self.last_release_time, params.period_duration)?;
        if periods_elapsed == 0 {
            return Err(VestingError::NothingToClaim);
        }

        let gross = (periods_elapsed as u128)
            .checked_mul(params.tokens_per_period as u128)
            .ok_or(VestingError::MathOverflow)?;
        let releasable = gross.min(self.remaining() as u128) as u64;
        if releasable == 0 {
            return Err(VestingError::NothingToClaim);
        }

        Ok(Release {
            periods_elapsed,
            releasable,
            advance: math::periods_to_seconds(periods_elapsed, params.period_duration)?,
        })
    }

    /// Records a claim of `min(requested, releasable)` and returns the amount
    /// released. The baseline advances by every period consumed even when
    /// the claim is partial.
    pub fn commit_release(
        &mut self,
        release: &Release,
        requested: Option<u64>,
    ) -> VestingResult<u64> {
        let amount = match requested {
            Some(0) => return Err(VestingError::ZeroAmount),
            Some(r) => r.min(release.releasable),
            None => release.releasable,
        };
        let claimed = self
            .claimed_amount
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        if claimed > self.total_amount {
            return Err(VestingError::MathOverflow);
        }
        let last_release_time = self
            .last_release_time
            .checked_add(release.advance)
            .ok_or(VestingError::MathOverflow)?;

        self.claimed_amount = claimed;
        self.last_release_time = last_release_time;
        Ok(amount)
    }
}
