use anchor_lang::prelude::*;

use crate::state::PriceFeed;

pub fn initialize_price_feed(ctx: Context<InitializePriceFeed>, window_seconds: i64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut feed = ctx.accounts.price_feed.load_init()?;
    feed.init(authority, window_seconds)?;

    emit!(PriceFeedInitialized {
        feed: ctx.accounts.price_feed.key(),
        authority,
        window_seconds,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePriceFeed<'info> {
    #[account(init, payer = authority, space = PriceFeed::space())]
    pub price_feed: AccountLoader<'info, PriceFeed>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct PriceFeedInitialized {
    pub feed: Pubkey,
    pub authority: Pubkey,
    pub window_seconds: i64,
}
