use anchor_lang::prelude::*;

#[error_code]
pub enum VestingError {
    #[msg("Signer is not allowed to perform this action.")]
    Unauthorized,
    #[msg("Grant not found.")]
    NotFound,
    #[msg("A grant already exists for this beneficiary and nonce.")]
    AlreadyExists,
    #[msg("Program is already initialized.")]
    AlreadyInitialized,
    #[msg("Grant has already been revoked.")]
    AlreadyRevoked,
    #[msg("Grant is closed.")]
    GrantClosed,
    #[msg("Nothing to claim.")]
    NothingToClaim,
    #[msg("Schedule must satisfy start <= cliff <= end.")]
    InvalidSchedule,
    #[msg("Arithmetic overflow.")]
    ArithmeticOverflow,
    #[msg("Grant amount must be positive.")]
    InvalidAmount,
    #[msg("Token account does not belong to the expected owner.")]
    InvalidTokenAccount,
    #[msg("Grant is still active.")]
    GrantStillActive,
    #[msg("Vault balance does not match the amount held for the grant.")]
    EscrowMismatch,
}
