use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{types::*, Loan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub loan_count: usize,
    pub total_principal: Money,
    pub total_monthly: Money,
    /// Principal-weighted average rate in percent.
    pub avg_rate: Percent,
}

/// Sum principal and monthly payments and compute the principal-weighted
/// average rate. The average is zero when there is no outstanding principal.
pub fn compute_totals(loans: &[Loan]) -> AggregateTotals {
    let mut total_principal = Decimal::ZERO;
    let mut total_monthly = Decimal::ZERO;
    let mut rate_weighted = Decimal::ZERO;

    for loan in loans {
        total_principal += loan.principal_remaining;
        total_monthly += loan.monthly_payment;
        rate_weighted += loan.interest_rate * loan.principal_remaining;
    }

    let avg_rate = if total_principal > Decimal::ZERO {
        rate_weighted / total_principal
    } else {
        Decimal::ZERO
    };

    AggregateTotals {
        loan_count: loans.len(),
        total_principal,
        total_monthly,
        avg_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::demo_loans;
    use rust_decimal_macros::dec;

    #[test]
    fn test_demo_totals() {
        let totals = compute_totals(&demo_loans());
        assert_eq!(totals.loan_count, 4);
        assert_eq!(totals.total_principal, dec!(2_512_500));
        assert_eq!(totals.total_monthly, dec!(15_650));
        // (2_150_000*3.79 + 185_000*7.95 + 145_000*4.95 + 32_500*19.9) / 2_512_500
        //   = 10_983_750 / 2_512_500
        assert_eq!(totals.avg_rate, dec!(10_983_750) / dec!(2_512_500));
        assert_eq!(totals.avg_rate.round_dp(4), dec!(4.3716));
    }

    #[test]
    fn test_empty_totals() {
        let totals = compute_totals(&[]);
        assert_eq!(totals.total_principal, Decimal::ZERO);
        assert_eq!(totals.total_monthly, Decimal::ZERO);
        assert_eq!(totals.avg_rate, Decimal::ZERO);
    }

    #[test]
    fn test_zero_principal_avg_rate_is_zero() {
        let mut loans = demo_loans();
        for loan in &mut loans {
            loan.principal_remaining = Decimal::ZERO;
        }
        let totals = compute_totals(&loans);
        assert_eq!(totals.avg_rate, Decimal::ZERO);
        assert_eq!(totals.total_monthly, dec!(15_650));
    }

    #[test]
    fn test_avg_rate_within_min_max() {
        let loans = demo_loans();
        let totals = compute_totals(&loans);
        let min = loans.iter().map(|l| l.interest_rate).min().unwrap();
        let max = loans.iter().map(|l| l.interest_rate).max().unwrap();
        assert!(totals.avg_rate >= min && totals.avg_rate <= max);

        let single = &loans[3..];
        assert_eq!(compute_totals(single).avg_rate, dec!(19.9));
    }
}
