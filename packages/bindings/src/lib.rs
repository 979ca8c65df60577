use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use lanekompass_core::config::{LoanPredicate, RatePolicy};
use lanekompass_core::dashboard::{self, DashboardEvent, DashboardState};
use lanekompass_core::loans::validate_loans;
use lanekompass_core::metrics::{self, LoanQuery, PortfolioInput};
use lanekompass_core::{detail, DashboardConfig, Loan, LoanRepository, StaticLoanRepository};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Optional config JSON; empty or missing means defaults.
fn parse_config(config_json: Option<String>) -> NapiResult<DashboardConfig> {
    let config = match config_json.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => serde_json::from_str(s).map_err(to_napi_error)?,
        _ => DashboardConfig::default(),
    };
    config.validate().map_err(to_napi_error)?;
    Ok(config)
}

fn parse_repository(loans_json: &str) -> NapiResult<StaticLoanRepository> {
    let loans: Vec<Loan> = serde_json::from_str(loans_json).map_err(to_napi_error)?;
    StaticLoanRepository::new(loans).map_err(to_napi_error)
}

/// The demo portfolio as JSON.
#[napi]
pub fn demo_loans() -> NapiResult<String> {
    serde_json::to_string(StaticLoanRepository::demo().loans()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[napi]
pub fn portfolio_summary(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let config = parse_config(config_json)?;
    let input: PortfolioInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = metrics::summarize_portfolio(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn filter_loans(loans_json: String, query_json: String) -> NapiResult<String> {
    let repo = parse_repository(&loans_json)?;
    let query: LoanQuery = serde_json::from_str(&query_json).map_err(to_napi_error)?;
    serde_json::to_string(&metrics::filter_and_sort(repo.loans(), &query)).map_err(to_napi_error)
}

#[napi]
pub fn loan_detail(loan_json: String, config_json: Option<String>) -> NapiResult<String> {
    let config = parse_config(config_json)?;
    let loan: Loan = serde_json::from_str(&loan_json).map_err(to_napi_error)?;
    validate_loans(std::slice::from_ref(&loan)).map_err(to_napi_error)?;
    serde_json::to_string(&detail::loan_detail(&loan, &config)).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct ScenarioRequest {
    #[serde(default = "default_scenario_name")]
    name: String,
    loans: Vec<Loan>,
    predicate: LoanPredicate,
    policy: RatePolicy,
}

fn default_scenario_name() -> String {
    "custom".to_string()
}

#[napi]
pub fn project_scenario(request_json: String) -> NapiResult<String> {
    let req: ScenarioRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    validate_loans(&req.loans).map_err(to_napi_error)?;
    req.policy.validate().map_err(to_napi_error)?;
    let output = metrics::project_scenario(&req.name, &req.loans, &req.predicate, &req.policy);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn debt_to_income(loans_json: String, monthly_income: String) -> NapiResult<String> {
    let repo = parse_repository(&loans_json)?;
    let income: Decimal = monthly_income.trim().parse().map_err(to_napi_error)?;
    let ratio =
        metrics::compute_debt_to_income_ratio(repo.loans(), income).map_err(to_napi_error)?;
    Ok(ratio.to_string())
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[napi]
pub fn apply_dashboard_event(
    state_json: String,
    event_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let config = parse_config(config_json)?;
    let state: DashboardState = serde_json::from_str(&state_json).map_err(to_napi_error)?;
    let event: DashboardEvent = serde_json::from_str(&event_json).map_err(to_napi_error)?;
    serde_json::to_string(&state.apply(event, &config)).map_err(to_napi_error)
}

#[napi]
pub fn render_dashboard(
    loans_json: String,
    state_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let config = parse_config(config_json)?;
    let repo = parse_repository(&loans_json)?;
    let state: DashboardState = serde_json::from_str(&state_json).map_err(to_napi_error)?;
    let view = dashboard::render_dashboard(&repo, &state, &config).map_err(to_napi_error)?;
    serde_json::to_string(&view).map_err(to_napi_error)
}
