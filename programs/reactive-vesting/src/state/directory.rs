use anchor_lang::prelude::*;

use crate::error::{VestingError, VestingResult};

/// Named collaborator roles resolvable through the directory.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    VestingCore,
    PolicyController,
    PriceFeed,
    ShareLedger,
    Treasury,
    LiquidityManager,
}

/// Address registry for every component the program talks to.
///
/// Instructions never cache these addresses: each one checks the accounts it
/// was handed against the directory as it stands in that transaction, so an
/// update through `set_service` takes effect on the very next call.
#[account]
pub struct ServiceDirectory {
    /// Only signer allowed to register services.
    pub admin: Pubkey,
    pub vesting_core: Pubkey,
    pub policy_controller: Pubkey,
    pub price_feed: Pubkey,
    pub share_ledger: Pubkey,
    pub treasury: Pubkey,
    pub liquidity_manager: Pubkey,
    pub bump: u8,
}

impl ServiceDirectory {
    pub const SIZE: usize =
        32 + // admin
        32 + // vesting_core
        32 + // policy_controller
        32 + // price_feed
        32 + // share_ledger
        32 + // treasury
        32 + // liquidity_manager
        1;   // bump

    pub fn new(admin: Pubkey, bump: u8) -> Self {
        Self {
            admin,
            vesting_core: Pubkey::default(),
            policy_controller: Pubkey::default(),
            price_feed: Pubkey::default(),
            share_ledger: Pubkey::default(),
            treasury: Pubkey::default(),
            liquidity_manager: Pubkey::default(),
            bump,
        }
    }

    fn slot(&self, role: Role) -> &Pubkey {
        match role {
            Role::VestingCore => &self.vesting_core,
            Role::PolicyController => &self.policy_controller,
            Role::PriceFeed => &self.price_feed,
            Role::ShareLedger => &self.share_ledger,
            Role::Treasury => &self.treasury,
            Role::LiquidityManager => &self.liquidity_manager,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Pubkey {
        match role {
            Role::VestingCore => &mut self.vesting_core,
            Role::PolicyController => &mut self.policy_controller,
            Role::PriceFeed => &mut self.price_feed,
            Role::ShareLedger => &mut self.share_ledger,
            Role::Treasury => &mut self.treasury,
            Role::LiquidityManager => &mut self.liquidity_manager,
        }
    }

    /// Current address for `role`; fails loudly when the role is unset.
    pub fn resolve(&self, role: Role) -> VestingResult<Pubkey> {
        let key = *self.slot(role);
        if key == Pubkey::default() {
            return Err(VestingError::RoleNotSet);
        }
        Ok(key)
    }

    /// Checks that `candidate` is the service currently registered for `role`.
    pub fn require_service(&self, role: Role, candidate: &Pubkey) -> VestingResult<()> {
        let registered = self.resolve(role)?;
        if registered != *candidate {
            return Err(match role {
                Role::PolicyController => VestingError::NotPolicyController,
                _ => VestingError::ServiceMismatch,
            });
        }
        Ok(())
    }

    /// Checks every `(role, candidate)` pair in order; the first mismatch wins.
    pub fn require_services(&self, expected: &[(Role, Pubkey)]) -> VestingResult<()> {
        expected
            .iter()
            .try_for_each(|(role, candidate)| self.require_service(*role, candidate))
    }

    pub fn require_admin(&self, caller: &Pubkey) -> VestingResult<()> {
        if *caller != self.admin {
            return Err(VestingError::NotAuthorized);
        }
        Ok(())
    }

    /// Registers `address` for `role`, returning the address it replaces.
    pub fn register(
        &mut self,
        caller: &Pubkey,
        role: Role,
        address: Pubkey,
    ) -> VestingResult<Pubkey> {
        self.require_admin(caller)?;
        if address == Pubkey::default() {
            return Err(VestingError::ZeroAddress);
        }
        let slot = self.slot_mut(role);
        let previous = *slot;
        *slot = address;
        Ok(previous)
    }
}
