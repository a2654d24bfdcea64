//! Grant records at their PDA. Handlers go through these functions instead of
//! `Account<Grant>` so a missing grant surfaces as `NotFound` and an occupied
//! address as `AlreadyExists`.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::constants::DISCRIMINATOR_SIZE;
use crate::{Grant, VestingError};

pub const GRANT_SPACE: usize = DISCRIMINATOR_SIZE + Grant::INIT_SPACE;

/// Allocates the grant PDA, paid by `payer`, and writes `grant` into it.
pub fn create<'info>(
    grant_info: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program_info: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    grant: &Grant,
) -> Result<()> {
    require!(grant_info.data_is_empty(), VestingError::AlreadyExists);

    let rent = Rent::get()?.minimum_balance(GRANT_SPACE);
    let current = grant_info.lamports();

    if current == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system_program_info.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: grant_info.clone(),
                },
                signer_seeds,
            ),
            rent,
            GRANT_SPACE as u64,
            &crate::ID,
        )?;
    } else {
        // Someone already sent lamports to the address: top up, then allocate
        // and assign instead of create_account, which would refuse.
        let top_up = rent.saturating_sub(current);
        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    system_program_info.clone(),
                    Transfer {
                        from: payer.clone(),
                        to: grant_info.clone(),
                    },
                ),
                top_up,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                system_program_info.clone(),
                Allocate {
                    account_to_allocate: grant_info.clone(),
                },
                signer_seeds,
            ),
            GRANT_SPACE as u64,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                system_program_info.clone(),
                Assign {
                    account_to_assign: grant_info.clone(),
                },
                signer_seeds,
            ),
            &crate::ID,
        )?;
    }

    write(grant_info, grant)
}

pub fn read(grant_info: &AccountInfo) -> Result<Grant> {
    if grant_info.data_is_empty() || grant_info.owner != &crate::ID {
        return err!(VestingError::NotFound);
    }
    let data = grant_info.try_borrow_data()?;
    Grant::try_deserialize(&mut &data[..])
}

pub fn write(grant_info: &AccountInfo, grant: &Grant) -> Result<()> {
    let mut data = grant_info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    grant.try_serialize(&mut writer)
}

/// Read-modify-write of a grant. Nothing is written back when `mutation`
/// fails, and the runtime rolls back the whole instruction anyway.
pub fn update<T>(
    grant_info: &AccountInfo,
    mutation: impl FnOnce(&mut Grant) -> Result<T>,
) -> Result<(Grant, T)> {
    let mut grant = read(grant_info)?;
    let output = mutation(&mut grant)?;
    write(grant_info, &grant)?;
    Ok((grant, output))
}

/// Deletes the grant record, sending its rent to `destination`. The zeroed,
/// lamport-less account goes back to the system program and is purged when the
/// transaction ends.
pub fn close<'info>(
    grant_info: &AccountInfo<'info>,
    destination: &AccountInfo<'info>,
) -> Result<()> {
    read(grant_info)?;

    let refunded = destination
        .lamports()
        .checked_add(grant_info.lamports())
        .ok_or(VestingError::ArithmeticOverflow)?;
    **destination.try_borrow_mut_lamports()? = refunded;
    **grant_info.try_borrow_mut_lamports()? = 0;

    grant_info.try_borrow_mut_data()?.fill(0);
    grant_info.assign(&system_program::ID);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl TestAccount {
        fn new(owner: Pubkey, len: usize) -> Self {
            Self {
                key: Pubkey::new_unique(),
                owner,
                lamports: 1_000_000,
                data: vec![0; len],
            }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    #[test]
    fn test_read_missing_grant() {
        let mut account = TestAccount::new(Pubkey::default(), 0);
        let err = read(&account.info()).unwrap_err();
        assert_eq!(err, VestingError::NotFound.into());
    }

    #[test]
    fn test_read_foreign_account() {
        let mut account = TestAccount::new(Pubkey::new_unique(), GRANT_SPACE);
        let err = read(&account.info()).unwrap_err();
        assert_eq!(err, VestingError::NotFound.into());
    }

    #[test]
    fn test_write_then_read() {
        let mut account = TestAccount::new(crate::ID, GRANT_SPACE);
        let grant = Grant::for_test(1000, 0, 100, 1000);
        let info = account.info();

        write(&info, &grant).unwrap();
        let stored = read(&info).unwrap();
        assert_eq!(stored.total_amount, 1000);
        assert_eq!(stored.beneficiary, grant.beneficiary);
        assert_eq!(stored.cliff_time, 100);
    }

    #[test]
    fn test_update_persists_mutation() {
        let mut account = TestAccount::new(crate::ID, GRANT_SPACE);
        let info = account.info();
        write(&info, &Grant::for_test(1000, 0, 100, 1000)).unwrap();

        let (grant, claimed) = update(&info, |grant| {
            grant.record_claim(250, 250)?;
            Ok(grant.claimed_amount)
        })
        .unwrap();

        assert_eq!(claimed, 250);
        assert_eq!(grant.claimed_amount, 250);
        assert_eq!(read(&info).unwrap().claimed_amount, 250);
    }

    #[test]
    fn test_failed_update_leaves_record_untouched() {
        let mut account = TestAccount::new(crate::ID, GRANT_SPACE);
        let info = account.info();
        write(&info, &Grant::for_test(1000, 0, 100, 1000)).unwrap();

        let result: Result<(Grant, ())> = update(&info, |grant| {
            grant.claimed_amount = 999;
            err!(VestingError::NothingToClaim)
        });

        assert_eq!(result.unwrap_err(), VestingError::NothingToClaim.into());
        assert_eq!(read(&info).unwrap().claimed_amount, 0);
    }

    #[test]
    fn test_create_refuses_occupied_address() {
        let mut account = TestAccount::new(crate::ID, GRANT_SPACE);
        let mut payer = TestAccount::new(system_program::ID, 0);
        let mut system = TestAccount::new(Pubkey::default(), 0);
        let grant_info = account.info();
        write(&grant_info, &Grant::for_test(1000, 0, 100, 1000)).unwrap();

        let err = create(
            &grant_info,
            &payer.info(),
            &system.info(),
            &[],
            &Grant::for_test(500, 0, 0, 10),
        )
        .unwrap_err();

        assert_eq!(err, VestingError::AlreadyExists.into());
        assert_eq!(read(&grant_info).unwrap().total_amount, 1000);
    }

    #[test]
    fn test_close_refunds_and_clears_record() {
        let mut account = TestAccount::new(crate::ID, GRANT_SPACE);
        let mut destination = TestAccount::new(system_program::ID, 0);
        let grant_info = account.info();
        let destination_info = destination.info();
        write(&grant_info, &Grant::for_test(1000, 0, 100, 1000)).unwrap();

        close(&grant_info, &destination_info).unwrap();

        assert_eq!(grant_info.lamports(), 0);
        assert_eq!(destination_info.lamports(), 2_000_000);
        assert_eq!(grant_info.owner, &system_program::ID);
        assert!(grant_info.try_borrow_data().unwrap().iter().all(|b| *b == 0));
        assert_eq!(read(&grant_info).unwrap_err(), VestingError::NotFound.into());
    }

    #[test]
    fn test_close_missing_grant() {
        let mut account = TestAccount::new(Pubkey::default(), 0);
        let mut destination = TestAccount::new(system_program::ID, 0);
        let destination_info = destination.info();

        let err = close(&account.info(), &destination_info).unwrap_err();
        assert_eq!(err, VestingError::NotFound.into());
        assert_eq!(destination_info.lamports(), 1_000_000);
    }
}
