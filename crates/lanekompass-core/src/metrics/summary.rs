use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::loans::validate_loans;
use crate::{types::*, DashboardConfig, KompassResult, Loan, LoanCategory};

use super::breakdown::{compute_category_breakdown, CategoryBreakdown};
use super::health::compute_health_score;
use super::income::compute_debt_to_income_ratio;
use super::totals::{compute_totals, AggregateTotals};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub loans: Vec<Loan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub totals: AggregateTotals,
    pub categories: BTreeMap<LoanCategory, CategoryBreakdown>,
    pub health_score: u32,
    pub high_interest_loan_count: usize,
    pub debt_to_income: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Totals, category breakdown, health score and (when income is known) the
/// debt-to-income ratio for a loan portfolio.
pub fn summarize_portfolio(
    input: &PortfolioInput,
    config: &DashboardConfig,
) -> KompassResult<ComputationOutput<PortfolioSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loans(&input.loans)?;
    config.validate()?;

    let totals = compute_totals(&input.loans);
    if input.loans.is_empty() {
        warnings.push("Portfolio is empty; all figures are zero.".into());
    } else if totals.total_principal.is_zero() {
        warnings.push("Total principal is zero; average rate reported as 0.".into());
    }

    let debt_to_income = match input.monthly_income {
        Some(income) => Some(compute_debt_to_income_ratio(&input.loans, income)?),
        None => None,
    };

    let high_interest_loan_count = input
        .loans
        .iter()
        .filter(|l| l.interest_rate >= config.high_interest_threshold)
        .count();

    let output = PortfolioSummary {
        categories: compute_category_breakdown(&input.loans),
        health_score: compute_health_score(&input.loans, &config.health),
        high_interest_loan_count,
        debt_to_income,
        totals,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "avg_rate": "principal-weighted, 0 when total principal is 0",
        "health_score_bounds": [config.health.min_score, config.health.max_score],
        "high_interest_threshold": config.high_interest_threshold.to_string(),
        "monthly_income_provided": input.monthly_income.is_some(),
    });

    Ok(with_metadata(
        "Loan portfolio summary (weighted-average rate, health heuristic)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::demo_loans;
    use crate::KompassError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn demo_input() -> PortfolioInput {
        PortfolioInput {
            loans: demo_loans(),
            monthly_income: Some(dec!(42_000)),
        }
    }

    #[test]
    fn test_demo_summary() {
        let out = summarize_portfolio(&demo_input(), &DashboardConfig::default()).unwrap();
        let s = &out.result;
        assert_eq!(s.totals.total_principal, dec!(2_512_500));
        assert_eq!(s.categories.len(), 4);
        assert_eq!(s.health_score, 74);
        assert_eq!(s.high_interest_loan_count, 1);
        assert_eq!(s.debt_to_income.map(|r| r.round_dp(4)), Some(dec!(0.3726)));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_without_income() {
        let input = PortfolioInput {
            monthly_income: None,
            ..demo_input()
        };
        let out = summarize_portfolio(&input, &DashboardConfig::default()).unwrap();
        assert_eq!(out.result.debt_to_income, None);
        assert_eq!(out.assumptions["monthly_income_provided"], false);
    }

    #[test]
    fn test_zero_income_is_error() {
        let input = PortfolioInput {
            monthly_income: Some(Decimal::ZERO),
            ..demo_input()
        };
        let err = summarize_portfolio(&input, &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, KompassError::InvalidInput { .. }));
    }

    #[test]
    fn test_empty_portfolio_warns() {
        let input = PortfolioInput {
            loans: vec![],
            monthly_income: None,
        };
        let out = summarize_portfolio(&input, &DashboardConfig::default()).unwrap();
        assert_eq!(out.result.totals.avg_rate, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("empty")));
    }

    #[test]
    fn test_metadata_populated() {
        let out = summarize_portfolio(&demo_input(), &DashboardConfig::default()).unwrap();
        assert!(!out.methodology.is_empty());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
