use anchor_lang::prelude::*;

/// Error codes for the reactive vesting program.
#[error_code]
pub enum VestingError {
    // Authorization
    #[msg("Caller is not the schedule beneficiary")]
    NotBeneficiary,

    #[msg("Caller is not authorized for this operation")]
    NotAuthorized,

    #[msg("Account is not the registered policy controller")]
    NotPolicyController,

    // Validation
    #[msg("Address must not be the default public key")]
    ZeroAddress,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Vesting schedule does not exist")]
    InvalidSchedule,

    #[msg("Invalid parameters")]
    InvalidParams,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Service role is not registered in the directory")]
    RoleNotSet,

    #[msg("Account does not match the registered service")]
    ServiceMismatch,

    // State conflict
    #[msg("Vesting is paused")]
    VestingPaused,

    #[msg("Nothing to claim yet")]
    NothingToClaim,

    #[msg("Submitted policy action no longer matches the current price")]
    StaleAction,

    #[msg("No policy action is required at the current price")]
    NoActionRequired,

    #[msg("Share balance too low")]
    InsufficientShares,

    // External
    #[msg("Price feed reported no valid price")]
    OracleError,

    #[msg("Principal transfer failed")]
    TransferFailed,

    #[msg("Math overflow")]
    MathOverflow,
}

/// Result of the program's pure state transitions.
pub type VestingResult<T> = core::result::Result<T, VestingError>;
