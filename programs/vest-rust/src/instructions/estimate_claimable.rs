use anchor_lang::prelude::*;

use crate::constants::*;
use crate::{schedule, store};

#[derive(Accounts)]
#[instruction(nonce: u64)]
pub struct EstimateClaimable<'info> {
    /// CHECK: loaded through `store`, which checks owner and discriminator
    #[account(seeds = [GRANT_SEED, beneficiary.key().as_ref(), &nonce.to_le_bytes()], bump)]
    pub grant: UncheckedAccount<'info>,
    /// CHECK: Only used as a key
    pub beneficiary: UncheckedAccount<'info>,
}

pub fn estimate_claimable_handler(ctx: Context<EstimateClaimable>, _nonce: u64) -> Result<u64> {
    let grant = store::read(&ctx.accounts.grant)?;
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let claimable_amount = schedule::claimable_amount(&grant, now)?;
    Ok(claimable_amount)
}
