use rust_decimal::Decimal;

use crate::{types::*, KompassError, KompassResult, Loan};

/// Fraction of monthly income consumed by loan payments.
///
/// Fails for a non-positive income instead of returning an unbounded ratio.
pub fn compute_debt_to_income_ratio(loans: &[Loan], monthly_income: Money) -> KompassResult<Rate> {
    if monthly_income <= Decimal::ZERO {
        return Err(KompassError::InvalidInput {
            field: "monthly_income".into(),
            reason: format!("Monthly income must be positive (got {monthly_income})."),
        });
    }
    let total_monthly: Money = loans.iter().map(|l| l.monthly_payment).sum();
    total_monthly
        .checked_div(monthly_income)
        .ok_or_else(|| KompassError::InvalidInput {
            field: "monthly_income".into(),
            reason: format!("Monthly income {monthly_income} is too small for a ratio."),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::demo_loans;
    use rust_decimal_macros::dec;

    #[test]
    fn test_demo_dti() {
        let ratio = compute_debt_to_income_ratio(&demo_loans(), dec!(42_000)).unwrap();
        // 15_650 / 42_000
        assert_eq!(ratio.round_dp(4), dec!(0.3726));
    }

    #[test]
    fn test_zero_income_rejected() {
        let err = compute_debt_to_income_ratio(&demo_loans(), Decimal::ZERO).unwrap_err();
        match err {
            KompassError::InvalidInput { field, .. } => assert_eq!(field, "monthly_income"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert!(compute_debt_to_income_ratio(&demo_loans(), dec!(-5)).is_err());
    }

    #[test]
    fn test_tiny_income_errors_instead_of_overflowing() {
        let err = compute_debt_to_income_ratio(
            &demo_loans(),
            dec!(0.0000000000000000000000000001),
        )
        .unwrap_err();
        match err {
            KompassError::InvalidInput { field, .. } => assert_eq!(field, "monthly_income"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_loans_zero_ratio() {
        assert_eq!(compute_debt_to_income_ratio(&[], dec!(30_000)).unwrap(), Decimal::ZERO);
    }
}
