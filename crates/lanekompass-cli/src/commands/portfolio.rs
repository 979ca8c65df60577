use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lanekompass_core::metrics::{summarize_portfolio, PortfolioInput};
use lanekompass_core::{DashboardConfig, LoanRepository};

use crate::input;

/// Arguments for the portfolio summary
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to JSON loan file (array of loans or {loans, monthly_income})
    #[arg(long)]
    pub input: Option<String>,

    /// Net monthly income used for the debt-to-income ratio
    #[arg(long, alias = "income")]
    pub monthly_income: Option<Decimal>,
}

pub fn run_summary(
    args: SummaryArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (repo, file_income) = input::load_portfolio(args.input.as_deref())?;
    let portfolio = PortfolioInput {
        loans: repo.loans().to_vec(),
        monthly_income: args.monthly_income.or(file_income),
    };
    let result = summarize_portfolio(&portfolio, config)?;
    Ok(serde_json::to_value(result)?)
}
