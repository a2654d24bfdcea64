pub mod config;
pub mod grant;

pub use config::*;
pub use grant::*;
