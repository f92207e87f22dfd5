use anchor_lang::prelude::*;

use crate::constants::DIRECTORY_SEED;
use crate::state::{PolicyState, PriceFeed, Role, ServiceDirectory, UpkeepCheck};

/// Read-only policy evaluation for external schedulers. Reports which action,
/// if any, the current price warrants; writes nothing.
pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepCheck> {
    let directory = &ctx.accounts.directory;
    directory.require_service(Role::PolicyController, &ctx.accounts.policy.key())?;
    directory.require_service(Role::PriceFeed, &ctx.accounts.price_feed.key())?;

    let now = Clock::get()?.unix_timestamp;
    let feed = ctx.accounts.price_feed.load()?;
    Ok(ctx.accounts.policy.check(&*feed, now)?)
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    pub policy: Account<'info, PolicyState>,

    pub price_feed: AccountLoader<'info, PriceFeed>,
}
