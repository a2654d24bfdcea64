use anchor_lang::prelude::*;

#[event]
pub struct GrantClosed {
    pub grant: Pubkey,
    /// Stray vault balance swept to the authority before closing
    pub swept: u64,
}
