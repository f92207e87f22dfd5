//! Price-reactive release policy (relative baseline with hysteresis).
//!
//! - paused: Unpause once price >= recovery_price, otherwise Hold
//! - active: Pause at price <= critical_low_price; else Accelerate at
//!   price >= 110% of last_price; else Decelerate at price <= 90% of
//!   last_price; else Hold
//! - critical_low_price = 50% of the initial price, recovery_price = 110% of
//!   critical_low_price, both fixed at construction

use anchor_lang::prelude::*;

use crate::constants::{
    ACCELERATE_PERIOD_BPS, ACCELERATE_TRIGGER_BPS, CRITICAL_LOW_BPS, DECELERATE_PERIOD_BPS,
    DECELERATE_TRIGGER_BPS, MIN_PERIOD_FLOOR, RECOVERY_BPS,
};
use crate::error::{VestingError, VestingResult};
use crate::state::price_feed::PriceSource;
use crate::utils::math;

/// Discrete outcome of one policy evaluation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyAction {
    Hold,
    Accelerate,
    Decelerate,
    Pause,
    Unpause,
}

/// Construction parameters for the policy controller.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicyParams {
    pub min_period_duration: i64,
    pub max_period_duration: i64,
    pub initial_period_duration: i64,
    pub tokens_per_period: u64,
}

/// Release parameters a claim computes against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseParams {
    pub period_duration: i64,
    pub tokens_per_period: u64,
}

/// Result of a read-only policy check.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub action: PolicyAction,
    pub price: u64,
    pub period_duration: i64,
    pub tokens_per_period: u64,
    pub paused: bool,
}

/// Global release policy shared by every schedule.
#[account]
pub struct PolicyState {
    pub min_period_duration: i64,
    pub max_period_duration: i64,
    /// Seconds per release period, always within [min, max].
    pub period_duration: i64,
    pub tokens_per_period: u64,
    pub paused: bool,
    /// Price observed at the last applied transition.
    pub last_price: u64,
    pub initial_price: u64,
    pub critical_low_price: u64,
    pub recovery_price: u64,
    pub last_evaluated_at: i64,
    pub bump: u8,
}

impl PolicyState {
    pub const SIZE: usize =
        8 + // min_period_duration
        8 + // max_period_duration
        8 + // period_duration
        8 + // tokens_per_period
        1 + // paused
        8 + // last_price
        8 + // initial_price
        8 + // critical_low_price
        8 + // recovery_price
        8 + // last_evaluated_at
        1;  // bump

    pub fn new(
        params: &PolicyParams,
        initial_price: u64,
        now: i64,
        bump: u8,
    ) -> VestingResult<Self> {
        if params.min_period_duration < MIN_PERIOD_FLOOR
            || params.min_period_duration >= params.max_period_duration
        {
            return Err(VestingError::InvalidParams);
        }
        if params.initial_period_duration < params.min_period_duration
            || params.initial_period_duration > params.max_period_duration
        {
            return Err(VestingError::InvalidParams);
        }
        if params.tokens_per_period == 0 {
            return Err(VestingError::InvalidParams);
        }
        if initial_price == 0 {
            return Err(VestingError::OracleError);
        }

        let critical_low_price = math::scale_bps(initial_price, CRITICAL_LOW_BPS)?;
        let recovery_price = math::scale_bps(critical_low_price, RECOVERY_BPS)?;
        if critical_low_price == 0 || recovery_price <= critical_low_price {
            return Err(VestingError::InvalidParams);
        }

        Ok(Self {
            min_period_duration: params.min_period_duration,
            max_period_duration: params.max_period_duration,
            period_duration: params.initial_period_duration,
            tokens_per_period: params.tokens_per_period,
            paused: false,
            last_price: initial_price,
            initial_price,
            critical_low_price,
            recovery_price,
            last_evaluated_at: now,
            bump,
        })
    }

    /// Parameters for a claim; fails while the policy is paused.
    pub fn release_params(&self) -> VestingResult<ReleaseParams> {
        if self.paused {
            return Err(VestingError::VestingPaused);
        }
        Ok(self.current_params())
    }

    /// Parameters regardless of pause state (quotes only).
    pub fn current_params(&self) -> ReleaseParams {
        ReleaseParams {
            period_duration: self.period_duration,
            tokens_per_period: self.tokens_per_period,
        }
    }

    /// Action warranted at `price`. Pause and unpause take priority and a
    /// paused policy never adjusts its rate.
    pub fn evaluate(&self, price: u64) -> VestingResult<PolicyAction> {
        if price == 0 {
            return Err(VestingError::OracleError);
        }
        if self.paused {
            return Ok(if price >= self.recovery_price {
                PolicyAction::Unpause
            } else {
                PolicyAction::Hold
            });
        }
        if price <= self.critical_low_price {
            return Ok(PolicyAction::Pause);
        }
        if math::at_or_above_bps(price, self.last_price, ACCELERATE_TRIGGER_BPS) {
            return Ok(PolicyAction::Accelerate);
        }
        if math::at_or_below_bps(price, self.last_price, DECELERATE_TRIGGER_BPS) {
            return Ok(PolicyAction::Decelerate);
        }
        Ok(PolicyAction::Hold)
    }

    /// Read-only check against a live source. Safe to call any number of times.
    pub fn check<S: PriceSource + ?Sized>(
        &self,
        source: &S,
        now: i64,
    ) -> VestingResult<UpkeepCheck> {
        let price = source.current_price(now)?;
        let action = self.evaluate(price)?;
        Ok(UpkeepCheck {
            action,
            price,
            period_duration: self.period_duration,
            tokens_per_period: self.tokens_per_period,
            paused: self.paused,
        })
    }

    /// Applies `submitted` after re-deriving the warranted action from a
    /// fresh reading. Nothing is written unless both agree.
    pub fn apply<S: PriceSource + ?Sized>(
        &mut self,
        submitted: PolicyAction,
        source: &S,
        now: i64,
    ) -> VestingResult<UpkeepCheck> {
        let price = source.current_price(now)?;
        let warranted = self.evaluate(price)?;
        if warranted != submitted {
            return Err(VestingError::StaleAction);
        }

        match warranted {
            PolicyAction::Hold => return Err(VestingError::NoActionRequired),
            PolicyAction::Pause => self.paused = true,
            PolicyAction::Unpause => self.paused = false,
            // multiply first, then clamp, so a period already at a bound stays pinned
            PolicyAction::Accelerate => {
                self.period_duration =
                    math::scale_period(self.period_duration, ACCELERATE_PERIOD_BPS)?
                        .max(self.min_period_duration);
            }
            PolicyAction::Decelerate => {
                self.period_duration =
                    math::scale_period(self.period_duration, DECELERATE_PERIOD_BPS)?
                        .min(self.max_period_duration);
            }
        }
        self.last_price = price;
        self.last_evaluated_at = now;

        Ok(UpkeepCheck {
            action: warranted,
            price,
            period_duration: self.period_duration,
            tokens_per_period: self.tokens_per_period,
            paused: self.paused,
        })
    }
}
