use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use lanekompass_core::detail::loan_detail;
use lanekompass_core::metrics::{filter_and_sort, LoanQuery, SortDirection, SortKey};
use lanekompass_core::{DashboardConfig, KompassError, LoanCategory, LoanRepository};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Principal,
    Rate,
    Monthly,
    Months,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Principal => SortKey::Principal,
            SortArg::Rate => SortKey::InterestRate,
            SortArg::Monthly => SortKey::MonthlyPayment,
            SortArg::Months => SortKey::MonthsRemaining,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => SortDirection::Ascending,
            DirectionArg::Desc => SortDirection::Descending,
        }
    }
}

/// Parse a category flag; `all` means no filter.
pub fn parse_category_filter(s: &str) -> Result<Option<LoanCategory>, KompassError> {
    if s.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Arguments for listing loans
#[derive(Args)]
pub struct LoansArgs {
    /// Path to JSON loan file
    #[arg(long)]
    pub input: Option<String>,

    /// Category filter (mortgage, personal-loan, auto-loan, credit-card or all)
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Keep loans with a rate at or above this percentage
    #[arg(long)]
    pub min_rate: Option<Decimal>,

    /// Keep only loans at or above the configured high-interest threshold
    #[arg(long)]
    pub high_interest_only: bool,

    /// Sort key
    #[arg(long, value_enum, default_value = "principal")]
    pub sort: SortArg,

    /// Sort direction
    #[arg(long, value_enum, default_value = "desc")]
    pub direction: DirectionArg,
}

/// Arguments for a single loan's detail breakdown
#[derive(Args)]
pub struct DetailArgs {
    /// Path to JSON loan file
    #[arg(long)]
    pub input: Option<String>,

    /// Loan identifier
    #[arg(long)]
    pub id: String,
}

pub fn run_loans(args: LoansArgs, config: &DashboardConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let (repo, _) = input::load_portfolio(args.input.as_deref())?;

    let min_rate = match (args.min_rate, args.high_interest_only) {
        (Some(r), true) => Some(r.max(config.high_interest_threshold)),
        (Some(r), false) => Some(r),
        (None, true) => Some(config.high_interest_threshold),
        (None, false) => None,
    };
    let query = LoanQuery {
        category: parse_category_filter(&args.category)?,
        min_rate,
        sort_key: args.sort.into(),
        sort_direction: args.direction.into(),
    };

    let loans = filter_and_sort(repo.loans(), &query);
    Ok(serde_json::to_value(loans)?)
}

pub fn run_detail(args: DetailArgs, config: &DashboardConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let (repo, _) = input::load_portfolio(args.input.as_deref())?;
    let loan = repo
        .find(&args.id)
        .ok_or_else(|| KompassError::NotFound(format!("loan '{}'", args.id)))?;
    Ok(serde_json::to_value(loan_detail(loan, config))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!(parse_category_filter("all").unwrap(), None);
        assert_eq!(parse_category_filter("ALL").unwrap(), None);
        assert_eq!(
            parse_category_filter("credit-card").unwrap(),
            Some(LoanCategory::CreditCard)
        );
        assert!(parse_category_filter("yacht").is_err());
    }

    #[test]
    fn test_sort_arg_mapping() {
        assert_eq!(SortKey::from(SortArg::Rate), SortKey::InterestRate);
        assert_eq!(SortDirection::from(DirectionArg::Asc), SortDirection::Ascending);
    }
}
