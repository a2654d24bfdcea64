pub const CONFIG_SEED: &[u8] = b"config";
pub const GRANT_SEED: &[u8] = b"grant";
pub const VAULT_SEED: &[u8] = b"vault";

/// Anchor account discriminator length.
pub const DISCRIMINATOR_SIZE: usize = 8;
