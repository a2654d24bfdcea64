pub mod claim;
pub mod close_grant;
pub mod create_grant;
pub mod estimate_claimable;
pub mod initialize;
pub mod revoke;

pub use claim::*;
pub use close_grant::*;
pub use create_grant::*;
pub use estimate_claimable::*;
pub use initialize::*;
pub use revoke::*;
