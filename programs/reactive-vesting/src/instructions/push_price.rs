use anchor_lang::prelude::*;

use crate::state::PriceFeed;

pub fn push_price(ctx: Context<PushPrice>, price: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut feed = ctx.accounts.price_feed.load_mut()?;
    feed.record(&ctx.accounts.authority.key(), price, now)?;

    emit!(PricePushed {
        feed: ctx.accounts.price_feed.key(),
        price,
        average: feed.twap(now),
        timestamp: now,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct PushPrice<'info> {
    #[account(mut)]
    pub price_feed: AccountLoader<'info, PriceFeed>,

    pub authority: Signer<'info>,
}

#[event]
pub struct PricePushed {
    pub feed: Pubkey,
    pub price: u64,
    pub average: u64,
    pub timestamp: i64,
}
