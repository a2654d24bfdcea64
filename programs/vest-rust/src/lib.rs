#![allow(unexpected_cfgs)]

pub mod constants;
pub mod error;
pub mod events;
pub mod gate;
pub mod instructions;
pub mod schedule;
pub mod state;
pub mod store;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use instructions::*;
use solana_security_txt::security_txt;
pub use state::*;

declare_id!("Cni9tndj9ApM86C69SugKKFmMFSHQLASCqrfWxn5umg1");

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "vest-rust",
    project_url: "https://github.com/vest-rust/vest-rust",
    contacts: "link:https://github.com/vest-rust/vest-rust/security/advisories/new",
    policy: "https://github.com/vest-rust/vest-rust/blob/main/SECURITY.md",
    preferred_languages: "en",
    source_code: "https://github.com/vest-rust/vest-rust"
}

#[program]
pub mod vest_rust {
    use super::*;

    /// One-time setup: records the signer as the authority allowed to create grants.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize::initialize_handler(ctx)
    }

    /// Creates the grant for `(beneficiary, nonce)` and escrows `total_amount`.
    pub fn create_grant(
        ctx: Context<CreateGrant>,
        nonce: u64,
        total_amount: u64,
        start_time: i64,
        cliff_time: i64,
        end_time: i64,
    ) -> Result<()> {
        create_grant::create_grant_handler(
            ctx,
            nonce,
            total_amount,
            start_time,
            cliff_time,
            end_time,
        )
    }

    pub fn claim(ctx: Context<Claim>, nonce: u64) -> Result<()> {
        claim::claim_handler(ctx, nonce)
    }

    pub fn revoke(ctx: Context<Revoke>, nonce: u64) -> Result<()> {
        revoke::revoke_handler(ctx, nonce)
    }

    pub fn estimate_claimable(ctx: Context<EstimateClaimable>, nonce: u64) -> Result<u64> {
        estimate_claimable::estimate_claimable_handler(ctx, nonce)
    }

    pub fn close_grant(ctx: Context<CloseGrant>, nonce: u64) -> Result<()> {
        close_grant::close_grant_handler(ctx, nonce)
    }
}
