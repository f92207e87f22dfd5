use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{DIRECTORY_SEED, VAULT_SEED, VESTING_CORE_SEED};
use crate::state::{ServiceDirectory, VestingCore};

pub fn initialize_vesting(ctx: Context<InitializeVesting>) -> Result<()> {
    ctx.accounts
        .directory
        .require_admin(&ctx.accounts.admin.key())?;

    let vault = ctx.accounts.vault.key();
    let core = &mut ctx.accounts.vesting_core;
    core.admin = ctx.accounts.admin.key();
    core.principal_mint = ctx.accounts.principal_mint.key();
    core.vault = vault;
    core.total_deposited = 0;
    core.total_claimed = 0;
    core.schedule_count = 0;
    core.bump = ctx.bumps.vesting_core;

    msg!("vesting core {} custody vault {}", core.key(), vault);
    emit!(VestingInitialized {
        admin: core.admin,
        principal_mint: core.principal_mint,
        vault,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVesting<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + VestingCore::SIZE,
        seeds = [VESTING_CORE_SEED],
        bump
    )]
    pub vesting_core: Account<'info, VestingCore>,

    #[account(
        init,
        payer = admin,
        token::mint = principal_mint,
        token::authority = vesting_core,
        seeds = [VAULT_SEED, vesting_core.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub principal_mint: Account<'info, Mint>,

    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingInitialized {
    pub admin: Pubkey,
    pub principal_mint: Pubkey,
    pub vault: Pubkey,
}
