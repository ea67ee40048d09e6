pub mod calendar;
pub mod contributions;
pub mod error;
pub mod params;
pub mod report;
pub mod simulation;
pub mod tax_forms;
pub mod types;

pub use error::TaxEngineError;
pub use params::TaxYearParameters;
pub use types::*;

/// Standard result type for all tax engine operations
pub type TaxEngineResult<T> = Result<T, TaxEngineError>;
