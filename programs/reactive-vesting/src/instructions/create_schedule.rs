use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::constants::{
    DIRECTORY_SEED, SCHEDULE_SEED, SHARE_BALANCE_SEED, SHARE_LEDGER_SEED, VESTING_CORE_SEED,
};
use crate::error::VestingError;
use crate::state::{
    Deposit, Role, ServiceDirectory, ShareBalance, ShareLedger, VestingCore, VestingSchedule,
};

/// Locks `amount` of principal for `beneficiary` and mints the matching
/// shares. Opens the beneficiary's schedule on first deposit, tops it up after.
pub fn create_schedule(
    ctx: Context<CreateSchedule>,
    beneficiary: Pubkey,
    amount: u64,
) -> Result<()> {
    require!(beneficiary != Pubkey::default(), VestingError::ZeroAddress);
    require!(amount > 0, VestingError::ZeroAmount);

    let core_key = ctx.accounts.vesting_core.key();
    ctx.accounts.directory.require_services(&[
        (Role::VestingCore, core_key),
        (Role::ShareLedger, ctx.accounts.share_ledger.key()),
    ])?;
    ctx.accounts.vesting_core.require_principal_account(
        &ctx.accounts.principal_mint.key(),
        &ctx.accounts.depositor_token_account.mint,
        &ctx.accounts.depositor_token_account.owner,
        &ctx.accounts.depositor.key(),
    )?;
    VestingCore::require_balance(ctx.accounts.depositor_token_account.amount, amount)?;

    // Pull principal first; a failed pull aborts before any ledger write.
    token::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                mint: ctx.accounts.principal_mint.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.principal_mint.decimals,
    )
    .map_err(|_| error!(VestingError::TransferFailed))?;

    let now = Clock::get()?.unix_timestamp;
    let kind = ctx
        .accounts
        .schedule
        .deposit(beneficiary, amount, now, ctx.bumps.schedule)?;

    if !ctx.accounts.share_balance.is_open() {
        ctx.accounts
            .share_balance
            .open(beneficiary, ctx.bumps.share_balance);
    }
    ctx.accounts
        .share_ledger
        .mint(&core_key, &mut ctx.accounts.share_balance, amount)?;
    ctx.accounts
        .vesting_core
        .record_deposit(amount, kind == Deposit::Opened)?;

    let schedule = &ctx.accounts.schedule;
    match kind {
        Deposit::Opened => emit!(ScheduleCreated {
            beneficiary,
            depositor: ctx.accounts.depositor.key(),
            amount,
            start_time: schedule.last_release_time,
        }),
        Deposit::ToppedUp => emit!(ScheduleToppedUp {
            beneficiary,
            depositor: ctx.accounts.depositor.key(),
            amount,
            total_amount: schedule.total_amount,
            remaining: schedule.remaining(),
        }),
    }
    emit!(SharesMinted {
        beneficiary,
        amount,
        balance: ctx.accounts.share_balance.amount,
        total_supply: ctx.accounts.share_ledger.total_supply,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct CreateSchedule<'info> {
    #[account(mut, seeds = [VESTING_CORE_SEED], bump = vesting_core.bump)]
    pub vesting_core: Account<'info, VestingCore>,

    #[account(seeds = [DIRECTORY_SEED], bump = directory.bump)]
    pub directory: Account<'info, ServiceDirectory>,

    #[account(mut, seeds = [SHARE_LEDGER_SEED], bump = share_ledger.bump)]
    pub share_ledger: Account<'info, ShareLedger>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + VestingSchedule::SIZE,
        seeds = [SCHEDULE_SEED, beneficiary.as_ref()],
        bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + ShareBalance::SIZE,
        seeds = [SHARE_BALANCE_SEED, beneficiary.as_ref()],
        bump
    )]
    pub share_balance: Account<'info, ShareBalance>,

    #[account(
        mut,
        address = vesting_core.vault @ VestingError::InvalidTokenAccount,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor_token_account: Account<'info, TokenAccount>,

    pub principal_mint: Account<'info, Mint>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct ScheduleCreated {
    pub beneficiary: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub start_time: i64,
}

#[event]
pub struct ScheduleToppedUp {
    pub beneficiary: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub total_amount: u64,
    pub remaining: u64,
}

#[event]
pub struct SharesMinted {
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub total_supply: u64,
}
