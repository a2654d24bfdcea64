use anchor_lang::prelude::*;

#[event]
pub struct GrantRevoked {
    /// The grant that was revoked
    pub grant: Pubkey,
    /// Vested tokens released to the beneficiary at revocation
    pub released: u64,
    /// Unvested tokens returned to the authority
    pub unvested: u64,
    /// When the revocation occurred
    pub timestamp: i64,
}
