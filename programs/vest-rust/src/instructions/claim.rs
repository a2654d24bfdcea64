use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::TransferChecked,
    token_interface::{self, Mint, TokenAccount, TokenInterface},
};

use crate::constants::*;
use crate::{error::*, events::TokensClaimed, gate, store};

#[derive(Accounts)]
#[instruction(nonce: u64)]
pub struct Claim<'info> {
    /// CHECK: loaded through `store`, which checks owner and discriminator
    #[account(
        mut,
        seeds = [GRANT_SEED, beneficiary.key().as_ref(), &nonce.to_le_bytes()],
        bump,
    )]
    pub grant: UncheckedAccount<'info>,

    /// CHECK: PDA of the grant; the token program checks mint and authority on transfer
    #[account(mut, seeds = [VAULT_SEED, grant.key().as_ref()], bump)]
    pub vault: UncheckedAccount<'info>,

    #[account(mut,
        token::mint = mint,
        token::token_program = token_program,
        constraint = beneficiary_token_account.owner == beneficiary.key() @ VestingError::InvalidTokenAccount,
    )]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Only used as a key; the signer is matched against the grant
    pub beneficiary: UncheckedAccount<'info>,

    pub signer: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,
    pub token_program: Interface<'info, TokenInterface>,
}

impl Claim<'_> {
    fn claim_tokens(&self, amount: u64, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            to: self.beneficiary_token_account.to_account_info(),
            mint: self.mint.to_account_info(),
            authority: self.grant.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        token_interface::transfer_checked(cpi_ctx, amount, self.mint.decimals)
    }
}

pub fn claim_handler(ctx: Context<Claim>, _nonce: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let signer = ctx.accounts.signer.key();
    let mint = ctx.accounts.mint.key();

    let (grant, amount) = store::update(&ctx.accounts.grant, |grant| {
        require_keys_eq!(mint, grant.mint, VestingError::InvalidTokenAccount);
        let claimable = gate::authorize_claim(grant, &signer, now)?;
        grant.record_claim(claimable, now)?;
        Ok(claimable)
    })?;

    let nonce = grant.nonce.to_le_bytes();
    let seeds: &[&[u8]] = &[
        GRANT_SEED,
        grant.beneficiary.as_ref(),
        &nonce,
        &[grant.bump],
    ];
    ctx.accounts.claim_tokens(amount, &[seeds])?;

    emit!(TokensClaimed {
        grant: ctx.accounts.grant.key(),
        amount,
        claimed_amount: grant.claimed_amount,
        time: now,
    });

    Ok(())
}
