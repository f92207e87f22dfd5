use anchor_lang::prelude::*;

use crate::constants::{DIRECTORY_SEED, POLICY_SEED};
use crate::state::{PolicyParams, PolicyState, PriceFeed, PriceSource, Role, ServiceDirectory};

pub fn initialize_policy(ctx: Context<InitializePolicy>, params: PolicyParams) -> Result<()> {
    let directory = &ctx.accounts.directory;
    directory.require_admin(&ctx.accounts.admin.key())?;
    directory.require_service(Role::PriceFeed, &ctx.accounts.price_feed.key())?;

    let now = Clock::get()?.unix_timestamp;
    let initial_price = ctx.accounts.price_feed.load()?.current_price(now)?;
    let policy = PolicyState::new(&params, initial_price, now, ctx.bumps.policy)?;

    emit!(PolicyInitialized {
        min_period_duration: policy.min_period_duration,
        max_period_duration: policy.max_period_duration,
        period_duration: policy.period_duration,
        tokens_per_period: policy.tokens_per_period,
        initial_price,
        critical_low_price: policy.critical_low_price,
        recovery_price: policy.recovery_price,
    });
    ctx.accounts.policy.set_inner(policy);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePolicy<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + PolicyState::SIZE,
        seeds = [POLICY_SEED],
        bump
    )]
    pub policy: Account<'info, PolicyState>,

    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    pub price_feed: AccountLoader<'info, PriceFeed>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct PolicyInitialized {
    pub min_period_duration: i64,
    pub max_period_duration: i64,
    pub period_duration: i64,
    pub tokens_per_period: u64,
    pub initial_price: u64,
    pub critical_low_price: u64,
    pub recovery_price: u64,
}
