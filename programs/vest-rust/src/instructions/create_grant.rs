use crate::constants::*;
use crate::error::*;
use crate::events::*;
use crate::state::*;
use crate::{gate, schedule, store};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface, TransferChecked};

#[derive(Accounts)]
#[instruction(nonce: u64)]
pub struct CreateGrant<'info> {
    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, ProgramConfig>,

    /// CHECK: allocated and written by `store::create`, which refuses an occupied address
    #[account(
        mut,
        seeds = [GRANT_SEED, beneficiary.key().as_ref(), &nonce.to_le_bytes()],
        bump,
    )]
    pub grant: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        seeds = [VAULT_SEED, grant.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = grant,
        token::token_program = token_program,

        payer = authority,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(mut, token::mint = mint, token::authority = authority, token::token_program = token_program,)]
    pub source_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Only used as a key
    pub beneficiary: UncheckedAccount<'info>,
    pub mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl CreateGrant<'_> {
    fn escrow_tokens(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.source_token_account.to_account_info(),
            to: self.vault.to_account_info(),
            mint: self.mint.to_account_info(),
            authority: self.authority.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);
        anchor_spl::token_interface::transfer_checked(cpi_ctx, amount, self.mint.decimals)
    }
}

pub fn create_grant_handler(
    ctx: Context<CreateGrant>,
    nonce: u64,
    total_amount: u64,
    start_time: i64,
    cliff_time: i64,
    end_time: i64,
) -> Result<()> {
    schedule::validate_schedule(total_amount, start_time, cliff_time, end_time)?;
    gate::authorize_create(&ctx.accounts.config, &ctx.accounts.authority.key())?;

    let grant_key = ctx.accounts.grant.key();
    let beneficiary = ctx.accounts.beneficiary.key();
    let grant = Grant {
        authority: ctx.accounts.authority.key(),
        beneficiary,
        mint: ctx.accounts.mint.key(),
        nonce,
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
        bump: ctx.bumps.grant,
    };

    let nonce_bytes = nonce.to_le_bytes();
    let seeds: &[&[u8]] = &[
        GRANT_SEED,
        beneficiary.as_ref(),
        &nonce_bytes,
        &[grant.bump],
    ];
    store::create(
        &ctx.accounts.grant,
        &ctx.accounts.authority,
        &ctx.accounts.system_program,
        &[seeds],
        &grant,
    )?;

    ctx.accounts.escrow_tokens(total_amount)?;
    ctx.accounts.vault.reload()?;
    grant.check_escrow(ctx.accounts.vault.amount)?;

    let config = &mut ctx.accounts.config;
    config.grant_count = config
        .grant_count
        .checked_add(1)
        .ok_or(VestingError::ArithmeticOverflow)?;

    emit!(GrantCreated {
        grant: grant_key,
        beneficiary,
        authority: grant.authority,
        nonce,
        total_amount,
        start_time,
        cliff_time,
        end_time,
    });

    Ok(())
}
