use anchor_lang::prelude::*;

#[event]
pub struct GrantCreated {
    pub grant: Pubkey,
    pub beneficiary: Pubkey,
    pub authority: Pubkey,
    pub nonce: u64,
    pub total_amount: u64,
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
}
