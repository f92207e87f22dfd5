use anchor_lang::prelude::*;

use crate::constants::DIRECTORY_SEED;
use crate::state::{PolicyAction, PolicyState, PriceFeed, Role, ServiceDirectory};

/// Applies a policy action submitted by any caller. The action is only a
/// claim: the price is read again and the transition must still be warranted.
pub fn perform_upkeep(ctx: Context<PerformUpkeep>, action: PolicyAction) -> Result<()> {
    let directory = &ctx.accounts.directory;
    directory.require_service(Role::PolicyController, &ctx.accounts.policy.key())?;
    directory.require_service(Role::PriceFeed, &ctx.accounts.price_feed.key())?;

    let now = Clock::get()?.unix_timestamp;
    let feed = ctx.accounts.price_feed.load()?;
    let policy = &mut ctx.accounts.policy;
    let applied = policy.apply(action, &*feed, now)?;

    emit!(PolicyAdjusted {
        caller: ctx.accounts.caller.key(),
        action: applied.action,
        price: applied.price,
        period_duration: applied.period_duration,
        tokens_per_period: applied.tokens_per_period,
        paused: applied.paused,
    });
    match applied.action {
        PolicyAction::Pause => emit!(VestingPaused {
            price: applied.price,
            critical_low_price: policy.critical_low_price,
        }),
        PolicyAction::Unpause => emit!(VestingResumed {
            price: applied.price,
            recovery_price: policy.recovery_price,
        }),
        _ => {}
    }
    Ok(())
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    #[account(mut)]
    pub policy: Account<'info, PolicyState>,

    pub price_feed: AccountLoader<'info, PriceFeed>,

    pub caller: Signer<'info>,
}

#[event]
pub struct PolicyAdjusted {
    pub caller: Pubkey,
    pub action: PolicyAction,
    pub price: u64,
    pub period_duration: i64,
    pub tokens_per_period: u64,
    pub paused: bool,
}

#[event]
pub struct VestingPaused {
    pub price: u64,
    pub critical_low_price: u64,
}

#[event]
pub struct VestingResumed {
    pub price: u64,
    pub recovery_price: u64,
}
