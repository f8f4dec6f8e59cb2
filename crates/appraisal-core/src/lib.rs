pub mod appraise;
pub mod error;
pub mod metrics;
pub mod params;
pub mod projection;
pub mod types;
pub mod upstream;

pub use error::AppraisalError;
pub use types::*;

/// Standard result type for all appraisal operations
pub type AppraisalResult<T> = Result<T, AppraisalError>;
