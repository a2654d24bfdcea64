use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::TransferChecked,
    token_interface::{self, Mint, TokenAccount, TokenInterface},
};

use crate::constants::*;
use crate::error::*;
use crate::{events::GrantRevoked, gate, store};

#[derive(Accounts)]
#[instruction(nonce: u64)]
pub struct Revoke<'info> {
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

    /// Receives whatever had vested but was not claimed yet
    #[account(mut,
        token::mint = mint,
        token::token_program = token_program,
        constraint = beneficiary_token_account.owner == beneficiary.key() @ VestingError::InvalidTokenAccount,
    )]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Where unvested tokens go back to
    #[account(mut,
        token::mint = mint,
        token::token_program = token_program,
        constraint = authority_token_account.owner == authority.key() @ VestingError::InvalidTokenAccount,
    )]
    pub authority_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Only used as a key
    pub beneficiary: UncheckedAccount<'info>,

    /// Must be the authority recorded on the grant
    pub authority: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Revoke<'info> {
    fn pay_out(
        &self,
        to: &InterfaceAccount<'info, TokenAccount>,
        amount: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            to: to.to_account_info(),
            mint: self.mint.to_account_info(),
            authority: self.grant.to_account_info(),
        };
        let cpi_context = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );

        token_interface::transfer_checked(cpi_context, amount, self.mint.decimals)
    }
}

pub fn revoke_handler(ctx: Context<Revoke>, _nonce: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let signer = ctx.accounts.authority.key();
    let mint = ctx.accounts.mint.key();

    let (grant, split) = store::update(&ctx.accounts.grant, |grant| {
        require_keys_eq!(mint, grant.mint, VestingError::InvalidTokenAccount);
        gate::authorize_revoke(grant, &signer)?;
        grant.record_revoke(now)
    })?;

    let nonce = grant.nonce.to_le_bytes();
    let seeds: &[&[u8]] = &[
        GRANT_SEED,
        grant.beneficiary.as_ref(),
        &nonce,
        &[grant.bump],
    ];
    let signer_seeds = &[seeds];
    ctx.accounts.pay_out(
        &ctx.accounts.beneficiary_token_account,
        split.to_beneficiary,
        signer_seeds,
    )?;
    ctx.accounts.pay_out(
        &ctx.accounts.authority_token_account,
        split.to_authority,
        signer_seeds,
    )?;

    msg!(
        "Grant revoked: {} released, {} returned",
        split.to_beneficiary,
        split.to_authority
    );
    emit!(GrantRevoked {
        grant: ctx.accounts.grant.key(),
        released: split.to_beneficiary,
        unvested: split.to_authority,
        timestamp: now,
    });

    Ok(())
}
