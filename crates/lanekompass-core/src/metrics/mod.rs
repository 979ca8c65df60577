pub mod breakdown;
pub mod filter;
pub mod health;
pub mod income;
pub mod scenario;
pub mod summary;
pub mod totals;

pub use breakdown::{compute_category_breakdown, CategoryBreakdown};
pub use filter::{filter_and_sort, LoanQuery, SortDirection, SortKey};
pub use health::compute_health_score;
pub use income::compute_debt_to_income_ratio;
pub use scenario::{project_scenario, run_scenarios, Scenario, ScenarioStatus};
pub use summary::{summarize_portfolio, PortfolioInput, PortfolioSummary};
pub use totals::{compute_totals, AggregateTotals};
