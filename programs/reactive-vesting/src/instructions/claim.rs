use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::constants::{DIRECTORY_SEED, SCHEDULE_SEED, SHARE_BALANCE_SEED, VESTING_CORE_SEED};
use crate::error::VestingError;
use crate::state::{
    PolicyState, Role, ServiceDirectory, ShareBalance, ShareLedger, VestingCore, VestingSchedule,
};
use crate::utils::accounts::{read_owned, write_owned};

pub fn claim(
    ctx: Context<Claim>,
    beneficiary: Pubkey,
    requested_amount: Option<u64>,
) -> Result<()> {
    // Avoid borrow checker conflicts: capture AccountInfos/keys before taking mutable borrows.
    let core_ai = ctx.accounts.vesting_core.to_account_info();
    let core_key = ctx.accounts.vesting_core.key();
    let core_bump = ctx.accounts.vesting_core.bump;
    let schedule_ai = ctx.accounts.schedule.to_account_info();
    let balance_ai = ctx.accounts.share_balance.to_account_info();

    let mut schedule: VestingSchedule = read_owned(
        schedule_ai.owner,
        &schedule_ai.try_borrow_data()?,
        VestingError::InvalidSchedule,
    )?;
    schedule.authorize_claim(&ctx.accounts.claimant.key())?;
    let mut share_balance: ShareBalance = read_owned(
        balance_ai.owner,
        &balance_ai.try_borrow_data()?,
        VestingError::InvalidSchedule,
    )?;

    ctx.accounts.directory.require_services(&[
        (Role::VestingCore, core_key),
        (Role::PolicyController, ctx.accounts.policy.key()),
        (Role::ShareLedger, ctx.accounts.share_ledger.key()),
    ])?;
    ctx.accounts.vesting_core.require_principal_account(
        &ctx.accounts.principal_mint.key(),
        &ctx.accounts.beneficiary_token_account.mint,
        &ctx.accounts.beneficiary_token_account.owner,
        &beneficiary,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let params = ctx.accounts.policy.release_params()?;
    let release = schedule.compute_release(now, &params)?;
    let amount = schedule.commit_release(&release, requested_amount)?;

    ctx.accounts
        .share_ledger
        .burn(&core_key, &mut share_balance, amount)?;
    ctx.accounts.vesting_core.record_claim(amount)?;
    write_owned(&schedule_ai, &schedule)?;
    write_owned(&balance_ai, &share_balance)?;

    VestingCore::require_balance(ctx.accounts.vault.amount, amount)?;
    let signer_seeds: &[&[&[u8]]] = &[&[VESTING_CORE_SEED, &[core_bump]]];
    token::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                mint: ctx.accounts.principal_mint.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: core_ai,
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.principal_mint.decimals,
    )
    .map_err(|_| error!(VestingError::TransferFailed))?;

    emit!(TokensClaimed {
        beneficiary,
        amount,
        periods_elapsed: release.periods_elapsed,
        releasable: release.releasable,
        claimed_total: schedule.claimed_amount,
        remaining: schedule.remaining(),
        last_release_time: schedule.last_release_time,
        outstanding: ctx.accounts.vesting_core.outstanding(),
    });
    emit!(SharesBurned {
        beneficiary,
        amount,
        balance: share_balance.amount,
        total_supply: ctx.accounts.share_ledger.total_supply,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct Claim<'info> {
    #[account(mut, seeds = [VESTING_CORE_SEED], bump = vesting_core.bump)]
    pub vesting_core: Account<'info, VestingCore>,

    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    pub policy: Account<'info, PolicyState>,

    #[account(mut)]
    pub share_ledger: Account<'info, ShareLedger>,

    /// CHECK: schedule PDA for `beneficiary`; may never have been opened.
    /// Read through `read_owned`, which fails with `InvalidSchedule` unless
    /// this program owns it and it holds a `VestingSchedule`.
    #[account(mut, seeds = [SCHEDULE_SEED, beneficiary.as_ref()], bump)]
    pub schedule: UncheckedAccount<'info>,

    /// CHECK: share balance PDA for `beneficiary`, read like `schedule`.
    #[account(mut, seeds = [SHARE_BALANCE_SEED, beneficiary.as_ref()], bump)]
    pub share_balance: UncheckedAccount<'info>,

    #[account(
        mut,
        address = vesting_core.vault @ VestingError::InvalidTokenAccount,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub principal_mint: Account<'info, Mint>,

    pub claimant: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensClaimed {
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub periods_elapsed: u64,
    pub releasable: u64,
    pub claimed_total: u64,
    pub remaining: u64,
    pub last_release_time: i64,
    /// Principal still locked across all schedules after this claim.
    pub outstanding: u64,
}

#[event]
pub struct SharesBurned {
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub total_supply: u64,
}
