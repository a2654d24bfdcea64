//! Signer checks for every state transition. Each function runs before the
//! grant is touched, so a rejected call never leaves partial state behind.

use anchor_lang::prelude::*;

use crate::schedule;
use crate::{Grant, GrantStatus, ProgramConfig, VestingError};

pub fn authorize_create(config: &ProgramConfig, signer: &Pubkey) -> Result<()> {
    // Not reached through `CreateGrant`: its `Account<ProgramConfig>` makes
    // Anchor fail with `AccountNotInitialized` before `initialize` has run.
    require!(config.initialized, VestingError::Unauthorized);
    require_keys_eq!(*signer, config.authority, VestingError::Unauthorized);
    Ok(())
}

/// Returns the amount the beneficiary may take right now.
pub fn authorize_claim(grant: &Grant, signer: &Pubkey, now: i64) -> Result<u64> {
    require_keys_eq!(*signer, grant.beneficiary, VestingError::Unauthorized);
    require!(!grant.is_closed(), VestingError::GrantClosed);

    let claimable = schedule::claimable_amount(grant, now)?;
    require!(claimable > 0, VestingError::NothingToClaim);
    Ok(claimable)
}

pub fn authorize_revoke(grant: &Grant, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(*signer, grant.authority, VestingError::Unauthorized);
    require!(!grant.revoked, VestingError::AlreadyRevoked);
    require!(
        grant.status() != GrantStatus::Completed,
        VestingError::GrantClosed
    );
    Ok(())
}

pub fn authorize_close(grant: &Grant, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(*signer, grant.authority, VestingError::Unauthorized);
    require!(grant.is_closed(), VestingError::GrantStillActive);
    Ok(())
}
