use anchor_lang::prelude::*;

use crate::constants::{DIRECTORY_SEED, SCHEDULE_SEED};
use crate::error::{VestingError, VestingResult};
use crate::state::{PolicyState, Role, ServiceDirectory, VestingSchedule};
use crate::utils::math;

/// What a claim would release right now, ignoring the pause flag.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseQuote {
    pub beneficiary: Pubkey,
    pub periods_elapsed: u64,
    pub releasable: u64,
    pub remaining: u64,
    pub next_release_at: i64,
    pub paused: bool,
}

pub fn quote_release(ctx: Context<QuoteRelease>) -> Result<ReleaseQuote> {
    ctx.accounts
        .directory
        .require_service(Role::PolicyController, &ctx.accounts.policy.key())?;

    let now = Clock::get()?.unix_timestamp;
    let policy = &ctx.accounts.policy;
    let quote = build_quote(&ctx.accounts.schedule, policy, now)?;

    emit!(VestingQuote {
        beneficiary: quote.beneficiary,
        periods_elapsed: quote.periods_elapsed,
        releasable: quote.releasable,
        remaining: quote.remaining,
        next_release_at: quote.next_release_at,
        paused: quote.paused,
    });
    Ok(quote)
}

pub(crate) fn build_quote(
    schedule: &VestingSchedule,
    policy: &PolicyState,
    now: i64,
) -> VestingResult<ReleaseQuote> {
    let params = policy.current_params();
    let (periods_elapsed, releasable) = match schedule.compute_release(now, &params) {
        Ok(r) => (r.periods_elapsed, r.releasable),
        // a drained schedule keeps counting periods so the next boundary is ahead of `now`
        Err(VestingError::NothingToClaim) => (
            math::whole_periods(now, schedule.last_release_time, params.period_duration)?,
            0,
        ),
        Err(e) => return Err(e),
    };
    let next_release_at = (periods_elapsed as i64)
        .checked_add(1)
        .and_then(|n| n.checked_mul(params.period_duration))
        .and_then(|secs| schedule.last_release_time.checked_add(secs))
        .ok_or(VestingError::MathOverflow)?;

    Ok(ReleaseQuote {
        beneficiary: schedule.beneficiary,
        periods_elapsed,
        releasable,
        remaining: schedule.remaining(),
        next_release_at,
        paused: policy.paused,
    })
}

#[derive(Accounts)]
pub struct QuoteRelease<'info> {
    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    pub policy: Account<'info, PolicyState>,

    #[account(
        seeds = [SCHEDULE_SEED, schedule.beneficiary.as_ref()],
        bump = schedule.bump
    )]
    pub schedule: Account<'info, VestingSchedule>,
}

#[event]
pub struct VestingQuote {
    pub beneficiary: Pubkey,
    pub periods_elapsed: u64,
    pub releasable: u64,
    pub remaining: u64,
    pub next_release_at: i64,
    pub paused: bool,
}
