use anchor_lang::prelude::*;

use crate::constants::DIRECTORY_SEED;
use crate::state::{PriceFeed, PriceSource, Role, ServiceDirectory};

/// Read-only price of the vested asset from the registered feed.
pub fn get_price(ctx: Context<GetPrice>) -> Result<u64> {
    ctx.accounts
        .directory
        .require_service(Role::PriceFeed, &ctx.accounts.price_feed.key())?;

    let now = Clock::get()?.unix_timestamp;
    let feed = ctx.accounts.price_feed.load()?;
    Ok(feed.current_price(now)?)
}

#[derive(Accounts)]
pub struct GetPrice<'info> {
    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    pub price_feed: AccountLoader<'info, PriceFeed>,
}
