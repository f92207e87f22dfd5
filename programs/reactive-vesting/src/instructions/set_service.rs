use anchor_lang::prelude::*;

use crate::constants::DIRECTORY_SEED;
use crate::state::{Role, ServiceDirectory};

pub fn set_service(ctx: Context<SetService>, role: Role, address: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let previous = ctx.accounts.directory.register(&admin, role, address)?;

    emit!(ServiceUpdated {
        role,
        previous,
        current: address,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetService<'info> {
    #[account(mut, seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    pub admin: Signer<'info>,
}

#[event]
pub struct ServiceUpdated {
    pub role: Role,
    pub previous: Pubkey,
    pub current: Pubkey,
}
