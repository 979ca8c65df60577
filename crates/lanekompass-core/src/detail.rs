use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{types::*, DashboardConfig, Loan};

/// Per-loan breakdown shown in the details panel.
///
/// The interest/amortization split is an approximation from the current
/// balance and rate only. It is not an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetail {
    pub loan_id: String,
    /// `principal * rate / 100 / 12`
    pub interest_approx: Money,
    /// `max(0, monthly_payment - interest_approx)`
    pub amortization_approx: Money,
    /// `monthly_payment * months_remaining`
    pub total_remaining_cost: Money,
    /// `max(0, total_remaining_cost - principal)`
    pub approx_interest_cost_remaining: Money,
    /// Saving over the remaining term if the rate fell by `rate_cut` points.
    pub rate_cut: Percent,
    pub rate_cut_saving: Money,
    pub risk_label: String,
}

pub fn loan_detail(loan: &Loan, config: &DashboardConfig) -> LoanDetail {
    let interest_approx = monthly_interest(loan.principal_remaining, loan.interest_rate);
    let amortization_approx = (loan.monthly_payment - interest_approx).max(Decimal::ZERO);

    let months = Decimal::from(loan.months_remaining);
    let total_remaining_cost = loan.monthly_payment * months;
    let approx_interest_cost_remaining =
        (total_remaining_cost - loan.principal_remaining).max(Decimal::ZERO);

    let rate_cut_saving = loan.principal_remaining * config.advice_rate_cut / Decimal::ONE_HUNDRED
        * months
        / MONTHS_PER_YEAR;

    LoanDetail {
        loan_id: loan.id.clone(),
        interest_approx,
        amortization_approx,
        total_remaining_cost,
        approx_interest_cost_remaining,
        rate_cut: config.advice_rate_cut,
        rate_cut_saving,
        risk_label: config.risk_tiers.classify(loan.interest_rate).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::demo_loans;
    use rust_decimal::RoundingStrategy;
    use rust_decimal_macros::dec;

    fn kronor(v: Decimal) -> Decimal {
        v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    #[test]
    fn test_credit_card_detail() {
        let card = &demo_loans()[3];
        let d = loan_detail(card, &DashboardConfig::default());
        // 32_500 * 0.199 / 12 = 538.958...
        assert_eq!(kronor(d.interest_approx), dec!(539));
        assert_eq!(kronor(d.amortization_approx), dec!(661));
        assert_eq!(d.risk_label, "Severe");
        assert_eq!(d.total_remaining_cost, dec!(43_200));
        assert_eq!(d.approx_interest_cost_remaining, dec!(10_700));
        // 32_500 * 1% * 36 / 12
        assert_eq!(d.rate_cut_saving, dec!(975));
    }

    #[test]
    fn test_risk_labels_for_demo() {
        let config = DashboardConfig::default();
        let labels: Vec<String> = demo_loans()
            .iter()
            .map(|l| loan_detail(l, &config).risk_label)
            .collect();
        assert_eq!(labels, vec!["Low", "Low", "Low", "Severe"]);
    }

    #[test]
    fn test_amortization_floors_at_zero() {
        let mut loan = demo_loans()[3].clone();
        loan.monthly_payment = dec!(100);
        let d = loan_detail(&loan, &DashboardConfig::default());
        assert_eq!(d.amortization_approx, Decimal::ZERO);
    }

    #[test]
    fn test_zero_months_remaining() {
        let mut loan = demo_loans()[1].clone();
        loan.months_remaining = 0;
        let d = loan_detail(&loan, &DashboardConfig::default());
        assert_eq!(d.total_remaining_cost, Decimal::ZERO);
        assert_eq!(d.approx_interest_cost_remaining, Decimal::ZERO);
        assert_eq!(d.rate_cut_saving, Decimal::ZERO);
    }

    #[test]
    fn test_custom_tiers() {
        let mut config = DashboardConfig::default();
        config.risk_tiers.0[1].min_rate = dec!(4);
        let d = loan_detail(&demo_loans()[2], &config);
        assert_eq!(d.risk_label, "High");
    }
}
