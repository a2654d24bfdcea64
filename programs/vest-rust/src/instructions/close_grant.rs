use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::TransferChecked,
    token_interface::{self, CloseAccount, Mint, TokenAccount, TokenInterface},
};

use crate::constants::*;
use crate::error::*;
use crate::{events::GrantClosed, gate, store};

#[derive(Accounts)]
#[instruction(nonce: u64)]
pub struct CloseGrant<'info> {
    /// CHECK: loaded through `store`, which checks owner and discriminator
    #[account(
        mut,
        seeds = [GRANT_SEED, beneficiary.key().as_ref(), &nonce.to_le_bytes()],
        bump,
    )]
    pub grant: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, grant.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = grant,
        token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Receives any balance left in the vault
    #[account(mut,
        token::mint = mint,
        token::token_program = token_program,
        constraint = authority_token_account.owner == authority.key() @ VestingError::InvalidTokenAccount,
    )]
    pub authority_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Only used as a key
    pub beneficiary: UncheckedAccount<'info>,

    /// Gets the rent of both closed accounts
    #[account(mut)]
    pub authority: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,
    pub token_program: Interface<'info, TokenInterface>,
}

impl CloseGrant<'_> {
    fn sweep(&self, amount: u64, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            to: self.authority_token_account.to_account_info(),
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

    fn close_vault(&self, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        let cpi_accounts = CloseAccount {
            account: self.vault.to_account_info(),
            destination: self.authority.to_account_info(),
            authority: self.grant.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        token_interface::close_account(cpi_ctx)
    }
}

pub fn close_grant_handler(ctx: Context<CloseGrant>, _nonce: u64) -> Result<()> {
    let grant = store::read(&ctx.accounts.grant)?;
    gate::authorize_close(&grant, &ctx.accounts.authority.key())?;

    let nonce = grant.nonce.to_le_bytes();
    let seeds: &[&[u8]] = &[
        GRANT_SEED,
        grant.beneficiary.as_ref(),
        &nonce,
        &[grant.bump],
    ];
    let signer_seeds = &[seeds];

    // Terminal grants hold nothing back, so whatever remains was sent to the
    // vault directly.
    let swept = ctx
        .accounts
        .vault
        .amount
        .checked_sub(grant.escrowed()?)
        .ok_or(VestingError::EscrowMismatch)?;
    if swept > 0 {
        ctx.accounts.sweep(swept, signer_seeds)?;
    }
    ctx.accounts.close_vault(signer_seeds)?;

    let grant_key = ctx.accounts.grant.key();
    store::close(&ctx.accounts.grant, &ctx.accounts.authority)?;

    emit!(GrantClosed {
        grant: grant_key,
        swept,
    });

    Ok(())
}
