use anchor_lang::prelude::*;

#[event]
pub struct ProgramInitialized {
    pub config: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}
