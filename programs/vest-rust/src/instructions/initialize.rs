use crate::constants::*;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init_if_needed,
        seeds = [CONFIG_SEED],
        bump,
        payer = authority,
        space = DISCRIMINATOR_SIZE + ProgramConfig::INIT_SPACE,
    )]
    pub config: Account<'info, ProgramConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(ctx: Context<Initialize>) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let config = &mut ctx.accounts.config;

    config.initialize(ctx.accounts.authority.key(), ctx.bumps.config)?;

    msg!("Vesting program initialized with authority: {}", config.authority);
    emit!(ProgramInitialized {
        config: config_key,
        authority: config.authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
