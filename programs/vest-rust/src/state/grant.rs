use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::schedule;

/// One beneficiary's vesting grant. Lives at the PDA derived from
/// `[GRANT_SEED, beneficiary, nonce]` and is the token authority of its vault.
#[account]
#[derive(InitSpace, Debug)]
pub struct Grant {
    pub authority: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub nonce: u64,
    pub total_amount: u64,
    pub claimed_amount: u64,
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
    pub revoked: bool,
    pub revoked_at: i64,
    /// Vested amount frozen at revocation.
    pub vested_at_revoke: u64,
    /// Unvested remainder handed back to the authority on revocation.
    pub returned_amount: u64,
    pub last_claimed_at: i64,
    pub bump: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantStatus {
    Active,
    Revoked,
    Completed,
}

/// Where the escrow goes when a grant is revoked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevokeSplit {
    pub to_beneficiary: u64,
    pub to_authority: u64,
}

impl Grant {
    pub fn status(&self) -> GrantStatus {
        if self.revoked {
            GrantStatus::Revoked
        } else if self.claimed_amount == self.total_amount {
            GrantStatus::Completed
        } else {
            GrantStatus::Active
        }
    }

    /// Revoked and completed grants no longer accrue or pay out.
    pub fn is_closed(&self) -> bool {
        self.status() != GrantStatus::Active
    }

    /// Tokens still held by the vault on behalf of this grant.
    pub fn escrowed(&self) -> Result<u64> {
        self.total_amount
            .checked_sub(self.claimed_amount)
            .and_then(|left| left.checked_sub(self.returned_amount))
            .ok_or(VestingError::ArithmeticOverflow.into())
    }

    /// Fails unless the vault holds exactly what the grant still owes. Catches
    /// mints whose transfers deliver less than the amount sent.
    pub fn check_escrow(&self, vault_amount: u64) -> Result<()> {
        require!(
            vault_amount == self.escrowed()?,
            VestingError::EscrowMismatch
        );
        Ok(())
    }

    pub fn record_claim(&mut self, amount: u64, now: i64) -> Result<()> {
        let claimed = self
            .claimed_amount
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        require!(
            claimed <= self.total_amount,
            VestingError::ArithmeticOverflow
        );

        self.claimed_amount = claimed;
        self.last_claimed_at = now;
        Ok(())
    }

    /// Freezes vesting at `now`. The vested but unclaimed part is released to
    /// the beneficiary, the rest goes back to the authority, leaving the vault
    /// empty.
    pub fn record_revoke(&mut self, now: i64) -> Result<RevokeSplit> {
        let vested = schedule::vested_amount(self, now)?;
        let released = vested.max(self.claimed_amount);

        let split = RevokeSplit {
            to_beneficiary: released
                .checked_sub(self.claimed_amount)
                .ok_or(VestingError::ArithmeticOverflow)?,
            to_authority: self
                .total_amount
                .checked_sub(released)
                .ok_or(VestingError::ArithmeticOverflow)?,
        };

        self.revoked = true;
        self.revoked_at = now;
        self.vested_at_revoke = released;
        self.claimed_amount = released;
        self.returned_amount = split.to_authority;
        if split.to_beneficiary > 0 {
            self.last_claimed_at = now;
        }

        Ok(split)
    }
}

#[cfg(test)]
impl Grant {
    pub(crate) fn address(beneficiary: &Pubkey, nonce: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[crate::constants::GRANT_SEED, beneficiary.as_ref(), &nonce.to_le_bytes()],
            &crate::ID,
        )
    }

    pub(crate) fn for_test(
        total_amount: u64,
        start_time: i64,
        cliff_time: i64,
        end_time: i64,
    ) -> Self {
        Self {
            authority: Pubkey::new_from_array([1; 32]),
            beneficiary: Pubkey::new_from_array([2; 32]),
            mint: Pubkey::new_from_array([3; 32]),
            nonce: 0,
            total_amount,
            claimed_amount: 0,
            start_time,
            cliff_time,
            end_time,
            revoked: false,
            revoked_at: 0,
            vested_at_revoke: 0,
            returned_amount: 0,
            last_claimed_at: 0,
            bump: 255,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        let mut grant = Grant::for_test(1000, 0, 100, 1000);
        assert_eq!(grant.status(), GrantStatus::Active);

        grant.record_claim(1000, 1000).unwrap();
        assert_eq!(grant.status(), GrantStatus::Completed);
        assert!(grant.is_closed());

        let mut grant = Grant::for_test(1000, 0, 100, 1000);
        grant.record_revoke(500).unwrap();
        assert_eq!(grant.status(), GrantStatus::Revoked);
    }

    #[test]
    fn test_claims_accumulate() {
        let mut grant = Grant::for_test(1000, 0, 100, 1000);
        grant.record_claim(200, 200).unwrap();
        grant.record_claim(300, 500).unwrap();
        assert_eq!(grant.claimed_amount, 500);
        assert_eq!(grant.last_claimed_at, 500);
        assert_eq!(grant.escrowed().unwrap(), 500);
    }

    #[test]
    fn test_claim_cannot_exceed_total() {
        let mut grant = Grant::for_test(1000, 0, 100, 1000);
        grant.record_claim(900, 900).unwrap();
        let err = grant.record_claim(101, 950).unwrap_err();
        assert_eq!(err, VestingError::ArithmeticOverflow.into());
        assert_eq!(grant.claimed_amount, 900);
    }

    #[test]
    fn test_revoke_mid_schedule_splits_escrow() {
        let mut grant = Grant::for_test(1000, 0, 100, 1000);
        grant.record_claim(200, 200).unwrap();

        let split = grant.record_revoke(550).unwrap();
        // 550 vested, 200 already paid
        assert_eq!(
            split,
            RevokeSplit {
                to_beneficiary: 350,
                to_authority: 450,
            }
        );
        assert_eq!(grant.vested_at_revoke, 550);
        assert_eq!(grant.claimed_amount, 550);
        assert_eq!(grant.returned_amount, 450);
        assert_eq!(grant.escrowed().unwrap(), 0);
    }

    #[test]
    fn test_revoke_before_cliff_returns_everything() {
        let mut grant = Grant::for_test(1000, 0, 100, 1000);
        let split = grant.record_revoke(50).unwrap();
        assert_eq!(split.to_beneficiary, 0);
        assert_eq!(split.to_authority, 1000);
        assert_eq!(grant.last_claimed_at, 0);
    }

    #[test]
    fn test_revoke_freezes_accrual() {
        let mut grant = Grant::for_test(1000, 0, 100, 1000);
        grant.record_revoke(300).unwrap();

        for now in [300, 600, 1000, 5000] {
            assert_eq!(schedule::vested_amount(&grant, now).unwrap(), 300);
            assert_eq!(schedule::claimable_amount(&grant, now).unwrap(), 0);
        }
    }

    #[test]
    fn test_address_is_unique_per_nonce() {
        let beneficiary = Pubkey::new_unique();
        let (first, _) = Grant::address(&beneficiary, 0);
        let (again, _) = Grant::address(&beneficiary, 0);
        let (second, _) = Grant::address(&beneficiary, 1);
        let (other, _) = Grant::address(&Pubkey::new_unique(), 0);

        assert_eq!(first, again);
        assert_ne!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_escrow_check_on_funding() {
        let grant = Grant::for_test(1000, 0, 100, 1000);
        assert!(grant.check_escrow(1000).is_ok());

        // 1% transfer fee leaves the vault short.
        let err = grant.check_escrow(990).unwrap_err();
        assert_eq!(err, VestingError::EscrowMismatch.into());

        let err = grant.check_escrow(1001).unwrap_err();
        assert_eq!(err, VestingError::EscrowMismatch.into());
    }

    #[test]
    fn test_escrow_after_claim_and_revoke() {
        let mut grant = Grant::for_test(1000, 0, 100, 1000);
        grant.record_claim(400, 400).unwrap();
        assert!(grant.check_escrow(600).is_ok());

        grant.record_revoke(500).unwrap();
        assert!(grant.check_escrow(0).is_ok());
    }
}
