pub mod config;
pub mod error;
pub mod loans;
pub mod types;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "metrics")]
pub mod detail;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use config::DashboardConfig;
pub use error::KompassError;
pub use loans::{Loan, LoanCategory, LoanRepository, StaticLoanRepository};
pub use types::*;

/// Standard result type for all loan-metrics operations
pub type KompassResult<T> = Result<T, KompassError>;
