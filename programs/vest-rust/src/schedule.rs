use anchor_lang::prelude::*;

use crate::{Grant, VestingError};

pub fn validate_schedule(
    total_amount: u64,
    start_time: i64,
    cliff_time: i64,
    end_time: i64,
) -> Result<()> {
    require!(total_amount > 0, VestingError::InvalidAmount);
    require!(
        start_time <= cliff_time && cliff_time <= end_time,
        VestingError::InvalidSchedule
    );
    // The duration must fit in i64, or accrual can never be computed.
    require!(
        end_time.checked_sub(start_time).is_some(),
        VestingError::InvalidSchedule
    );
    Ok(())
}

/// Amount vested at `now`: nothing before the cliff, everything from
/// `end_time`, floor-rounded linear accrual from `start_time` in between.
pub fn vested_amount(grant: &Grant, now: i64) -> Result<u64> {
    if grant.revoked {
        return Ok(grant.vested_at_revoke);
    }
    if now < grant.cliff_time {
        return Ok(0);
    }
    if now >= grant.end_time {
        return Ok(grant.total_amount);
    }

    let elapsed = now
        .checked_sub(grant.start_time)
        .ok_or(VestingError::ArithmeticOverflow)?;
    let duration = grant
        .end_time
        .checked_sub(grant.start_time)
        .ok_or(VestingError::ArithmeticOverflow)?;

    let vested = (grant.total_amount as u128)
        .checked_mul(elapsed as u128)
        .ok_or(VestingError::ArithmeticOverflow)?
        .checked_div(duration as u128)
        .ok_or(VestingError::ArithmeticOverflow)?;
    let vested = u64::try_from(vested).map_err(|_| VestingError::ArithmeticOverflow)?;

    Ok(vested.min(grant.total_amount))
}

pub fn claimable_amount(grant: &Grant, now: i64) -> Result<u64> {
    let vested = vested_amount(grant, now)?;
    Ok(vested.saturating_sub(grant.claimed_amount))
}
