use anchor_lang::prelude::*;

use crate::constants::{DIRECTORY_SEED, SHARE_LEDGER_SEED};
use crate::state::{ServiceDirectory, ShareLedger, VestingCore};

/// Creates the share ledger. Its one authorized caller is the vesting core
/// PDA, fixed here with no setter.
pub fn initialize_share_ledger(ctx: Context<InitializeShareLedger>) -> Result<()> {
    ctx.accounts
        .directory
        .require_admin(&ctx.accounts.admin.key())?;

    let authority = VestingCore::address();
    let ledger = ShareLedger::new(authority, ctx.bumps.share_ledger)?;
    ctx.accounts.share_ledger.set_inner(ledger);

    emit!(ShareLedgerInitialized { authority });
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeShareLedger<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + ShareLedger::SIZE,
        seeds = [SHARE_LEDGER_SEED],
        bump
    )]
    pub share_ledger: Account<'info, ShareLedger>,

    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ShareLedgerInitialized {
    pub authority: Pubkey,
}
