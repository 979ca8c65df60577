pub mod dashboard;
pub mod loans;
pub mod portfolio;
pub mod scenario;
