use anchor_lang::prelude::*;

use crate::constants::VESTING_CORE_SEED;
use crate::error::{VestingError, VestingResult};

/// Singleton vesting core PDA. Owns the principal vault and is the only
/// identity the share ledger accepts mint/burn calls from.
#[account]
pub struct VestingCore {
    pub admin: Pubkey,
    /// Principal asset mint.
    pub principal_mint: Pubkey,
    /// Vault token account PDA holding locked principal.
    pub vault: Pubkey,
    /// Sum of every schedule's total_amount.
    pub total_deposited: u64,
    /// Sum of every schedule's claimed_amount (<= total_deposited).
    pub total_claimed: u64,
    pub schedule_count: u64,
    pub bump: u8,
}

impl VestingCore {
    pub const SIZE: usize =
        32 + // admin
        32 + // principal_mint
        32 + // vault
        8 +  // total_deposited
        8 +  // total_claimed
        8 +  // schedule_count
        1;   // bump

    /// The singleton core PDA; also the share ledger's fixed authority.
    pub fn address() -> Pubkey {
        Pubkey::find_program_address(&[VESTING_CORE_SEED], &crate::ID).0
    }

    /// Principal still locked in the vault.
    pub fn outstanding(&self) -> u64 {
        self.total_deposited.saturating_sub(self.total_claimed)
    }

    /// Checks a token leg of a transfer: the mint handed in, the token
    /// account's mint and the token account's owner.
    pub fn require_principal_account(
        &self,
        mint: &Pubkey,
        account_mint: &Pubkey,
        account_owner: &Pubkey,
        expected_owner: &Pubkey,
    ) -> VestingResult<()> {
        if *mint != self.principal_mint || *account_mint != self.principal_mint {
            return Err(VestingError::InvalidTokenMint);
        }
        if account_owner != expected_owner {
            return Err(VestingError::InvalidTokenAccount);
        }
        Ok(())
    }

    pub fn require_balance(available: u64, amount: u64) -> VestingResult<()> {
        if available < amount {
            return Err(VestingError::TransferFailed);
        }
        Ok(())
    }

    pub fn record_deposit(&mut self, amount: u64, opened: bool) -> VestingResult<()> {
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        if opened {
            self.schedule_count = self
                .schedule_count
                .checked_add(1)
                .ok_or(VestingError::MathOverflow)?;
        }
        Ok(())
    }

    pub fn record_claim(&mut self, amount: u64) -> VestingResult<()> {
        let claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        if claimed > self.total_deposited {
            return Err(VestingError::MathOverflow);
        }
        self.total_claimed = claimed;
        Ok(())
    }
}
