use anchor_lang::prelude::*;

use crate::constants::DIRECTORY_SEED;
use crate::state::ServiceDirectory;

pub fn initialize_directory(ctx: Context<InitializeDirectory>) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    ctx.accounts
        .directory
        .set_inner(ServiceDirectory::new(admin, ctx.bumps.directory));

    msg!("service directory initialized, admin {}", admin);
    emit!(DirectoryInitialized { admin });
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeDirectory<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + ServiceDirectory::SIZE,
        seeds = [DIRECTORY_SEED],
        bump
    )]
    pub directory: Account<'info, ServiceDirectory>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct DirectoryInitialized {
    pub admin: Pubkey,
}
