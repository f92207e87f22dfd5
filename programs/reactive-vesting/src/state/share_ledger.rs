use anchor_lang::prelude::*;

use crate::error::{VestingError, VestingResult};

/// Bookkeeping ledger for claim shares. Shares cannot be transferred; they
/// only move through `mint` and `burn`, and only the authority fixed at
/// construction may call either.
#[account]
pub struct ShareLedger {
    /// The single caller allowed to mint and burn (the vesting core PDA).
    pub authority: Pubkey,
    /// Shares outstanding across all beneficiaries.
    pub total_supply: u64,
    pub bump: u8,
}

/// Per-beneficiary share balance PDA.
#[account]
pub struct ShareBalance {
    pub owner: Pubkey,
    pub amount: u64,
    pub bump: u8,
}

impl ShareLedger {
    pub const SIZE: usize =
        32 + // authority
        8 +  // total_supply
        1;   // bump

    pub fn new(authority: Pubkey, bump: u8) -> VestingResult<Self> {
        if authority == Pubkey::default() {
            return Err(VestingError::ZeroAddress);
        }
        Ok(Self {
            authority,
            total_supply: 0,
            bump,
        })
    }

    fn require_authority(&self, caller: &Pubkey) -> VestingResult<()> {
        if *caller != self.authority {
            return Err(VestingError::NotAuthorized);
        }
        Ok(())
    }

    pub fn mint(
        &mut self,
        caller: &Pubkey,
        to: &mut ShareBalance,
        amount: u64,
    ) -> VestingResult<()> {
        self.require_authority(caller)?;
        if amount == 0 {
            return Err(VestingError::ZeroAmount);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        let balance = to
            .amount
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        self.total_supply = supply;
        to.amount = balance;
        Ok(())
    }

    pub fn burn(
        &mut self,
        caller: &Pubkey,
        from: &mut ShareBalance,
        amount: u64,
    ) -> VestingResult<()> {
        self.require_authority(caller)?;
        if amount == 0 {
            return Err(VestingError::ZeroAmount);
        }
        let balance = from
            .amount
            .checked_sub(amount)
            .ok_or(VestingError::InsufficientShares)?;
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(VestingError::MathOverflow)?;
        self.total_supply = supply;
        from.amount = balance;
        Ok(())
    }
}

impl ShareBalance {
    pub const SIZE: usize =
        32 + // owner
        8 +  // amount
        1;   // bump

    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn open(&mut self, owner: Pubkey, bump: u8) {
        self.owner = owner;
        self.amount = 0;
        self.bump = bump;
    }
}
