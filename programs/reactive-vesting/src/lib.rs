use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;

pub use instructions::*;
pub use state::{PolicyAction, PolicyParams, Role, UpkeepCheck};

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod reactive_vesting {
    use super::*;

    pub fn initialize_directory(ctx: Context<InitializeDirectory>) -> Result<()> {
        instructions::initialize_directory(ctx)
    }

    pub fn set_service(ctx: Context<SetService>, role: Role, address: Pubkey) -> Result<()> {
        instructions::set_service(ctx, role, address)
    }

    pub fn initialize_vesting(ctx: Context<InitializeVesting>) -> Result<()> {
        instructions::initialize_vesting(ctx)
    }

    pub fn initialize_share_ledger(ctx: Context<InitializeShareLedger>) -> Result<()> {
        instructions::initialize_share_ledger(ctx)
    }

    pub fn initialize_price_feed(
        ctx: Context<InitializePriceFeed>,
        window_seconds: i64,
    ) -> Result<()> {
        instructions::initialize_price_feed(ctx, window_seconds)
    }

    pub fn push_price(ctx: Context<PushPrice>, price: u64) -> Result<()> {
        instructions::push_price(ctx, price)
    }

    pub fn get_price(ctx: Context<GetPrice>) -> Result<u64> {
        instructions::get_price(ctx)
    }

    pub fn initialize_policy(ctx: Context<InitializePolicy>, params: PolicyParams) -> Result<()> {
        instructions::initialize_policy(ctx, params)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepCheck> {
        instructions::check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, action: PolicyAction) -> Result<()> {
        instructions::perform_upkeep(ctx, action)
    }

    pub fn create_schedule(
        ctx: Context<CreateSchedule>,
        beneficiary: Pubkey,
        amount: u64,
    ) -> Result<()> {
        instructions::create_schedule(ctx, beneficiary, amount)
    }

    pub fn claim(
        ctx: Context<Claim>,
        beneficiary: Pubkey,
        requested_amount: Option<u64>,
    ) -> Result<()> {
        instructions::claim(ctx, beneficiary, requested_amount)
    }

    pub fn quote_release(ctx: Context<QuoteRelease>) -> Result<ReleaseQuote> {
        instructions::quote_release(ctx)
    }
}
