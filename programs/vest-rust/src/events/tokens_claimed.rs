use anchor_lang::prelude::*;

#[event]
pub struct TokensClaimed {
    pub grant: Pubkey,
    pub amount: u64,
    /// Cumulative amount released after this claim
    pub claimed_amount: u64,
    pub time: i64,
}
