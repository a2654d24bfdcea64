pub mod grant_closed;
pub mod grant_created;
pub mod grant_revoked;
pub mod program_initialized;
pub mod tokens_claimed;

pub use grant_closed::*;
pub use grant_created::*;
pub use grant_revoked::*;
pub use program_initialized::*;
pub use tokens_claimed::*;
