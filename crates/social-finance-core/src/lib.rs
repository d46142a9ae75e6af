pub mod contract;
pub mod error;
pub mod grid;
pub mod types;

pub use contract::{ContractModel, Regime, ZoneParams};
pub use error::SocialFinanceError;
pub use types::*;

/// Standard result type for all social-finance operations
pub type SocialFinanceResult<T> = Result<T, SocialFinanceError>;
