use anchor_lang::prelude::*;

use crate::error::VestingError;

/// Program-wide settings, written once by `initialize`.
#[account]
#[derive(InitSpace)]
pub struct ProgramConfig {
    /// Only signer allowed to create grants.
    pub authority: Pubkey,
    pub initialized: bool,
    pub grant_count: u64,
    pub bump: u8,
}

impl ProgramConfig {
    /// The config account may already exist from an earlier call, so the flag
    /// decides.
    pub fn initialize(&mut self, authority: Pubkey, bump: u8) -> Result<()> {
        require!(!self.initialized, VestingError::AlreadyInitialized);

        self.authority = authority;
        self.initialized = true;
        self.grant_count = 0;
        self.bump = bump;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> ProgramConfig {
        ProgramConfig {
            authority: Pubkey::default(),
            initialized: false,
            grant_count: 0,
            bump: 0,
        }
    }

    #[test]
    fn test_first_initialize_records_authority() {
        let authority = Pubkey::new_unique();
        let mut config = blank();

        config.initialize(authority, 253).unwrap();
        assert!(config.initialized);
        assert_eq!(config.authority, authority);
        assert_eq!(config.bump, 253);
    }

    #[test]
    fn test_second_initialize_rejected() {
        let authority = Pubkey::new_unique();
        let mut config = blank();
        config.initialize(authority, 253).unwrap();
        config.grant_count = 4;

        let err = config.initialize(Pubkey::new_unique(), 253).unwrap_err();
        assert_eq!(err, VestingError::AlreadyInitialized.into());
        assert_eq!(config.authority, authority);
        assert_eq!(config.grant_count, 4);
    }
}
