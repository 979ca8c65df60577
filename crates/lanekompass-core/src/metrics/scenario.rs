use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{LoanPredicate, RatePolicy, ScenarioPreset};
use crate::{types::*, Loan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Applicable,
    NoApplicableLoans,
}

/// Projected effect of a hypothetical rate change on a subset of loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub status: ScenarioStatus,
    pub loan_ids: Vec<String>,
    /// Sum of current monthly payments of the matched loans.
    pub affected_monthly_payment: Money,
    pub current_monthly_interest: Money,
    pub projected_monthly_interest: Money,
    pub monthly_saving: Money,
    pub yearly_saving: Money,
}

impl LoanPredicate {
    pub fn matches(&self, loan: &Loan) -> bool {
        match self {
            Self::All => true,
            Self::RateAtLeast(r) => loan.interest_rate >= *r,
            Self::RateAbove(r) => loan.interest_rate > *r,
            Self::Categories(cats) => cats.contains(&loan.category),
        }
    }
}

impl RatePolicy {
    pub fn apply(&self, rate: Percent) -> Percent {
        match self {
            Self::FlatRate(r) => (*r).max(Decimal::ZERO),
            Self::Delta(d) => (rate + *d).max(Decimal::ZERO),
        }
    }
}

/// Compare current and hypothetical monthly interest for loans matching
/// `predicate`. The source loans are not modified.
pub fn project_scenario(
    name: &str,
    loans: &[Loan],
    predicate: &LoanPredicate,
    policy: &RatePolicy,
) -> Scenario {
    let matched: Vec<&Loan> = loans.iter().filter(|l| predicate.matches(l)).collect();

    if matched.is_empty() {
        return Scenario {
            name: name.to_string(),
            status: ScenarioStatus::NoApplicableLoans,
            loan_ids: Vec::new(),
            affected_monthly_payment: Decimal::ZERO,
            current_monthly_interest: Decimal::ZERO,
            projected_monthly_interest: Decimal::ZERO,
            monthly_saving: Decimal::ZERO,
            yearly_saving: Decimal::ZERO,
        };
    }

    let mut current = Decimal::ZERO;
    let mut projected = Decimal::ZERO;
    let mut affected_monthly_payment = Decimal::ZERO;
    for loan in &matched {
        current += monthly_interest(loan.principal_remaining, loan.interest_rate);
        projected += monthly_interest(loan.principal_remaining, policy.apply(loan.interest_rate));
        affected_monthly_payment += loan.monthly_payment;
    }
    let monthly_saving = current - projected;

    Scenario {
        name: name.to_string(),
        status: ScenarioStatus::Applicable,
        loan_ids: matched.iter().map(|l| l.id.clone()).collect(),
        affected_monthly_payment,
        current_monthly_interest: current,
        projected_monthly_interest: projected,
        monthly_saving,
        yearly_saving: monthly_saving * MONTHS_PER_YEAR,
    }
}

/// Project every preset in order.
pub fn run_scenarios(loans: &[Loan], presets: &[ScenarioPreset]) -> Vec<Scenario> {
    presets
        .iter()
        .map(|p| project_scenario(&p.name, loans, &p.predicate, &p.policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::loans::demo_loans;
    use crate::LoanCategory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_consolidation_of_expensive_loans() {
        let loans = demo_loans();
        let s = project_scenario(
            "consolidate",
            &loans,
            &LoanPredicate::RateAbove(dec!(8)),
            &RatePolicy::FlatRate(dec!(8)),
        );
        assert_eq!(s.status, ScenarioStatus::Applicable);
        assert_eq!(s.loan_ids, vec!["4".to_string()]);
        assert_eq!(s.affected_monthly_payment, dec!(1_200));
        // 32_500 * (19.9 - 8) / 1200 = 322.2916...
        assert_eq!(s.monthly_saving.round_dp(2), dec!(322.29));
        assert_eq!(s.yearly_saving.round_dp(2), dec!(3867.50));
        assert_eq!(loans, demo_loans());
    }

    #[test]
    fn test_rate_cut_delta() {
        let s = project_scenario(
            "cut",
            &demo_loans(),
            &LoanPredicate::All,
            &RatePolicy::Delta(dec!(-2)),
        );
        // 2pp on 2_512_500 => 50_250 / year => 4_187.5 / month
        assert_eq!(s.monthly_saving.round_dp(6), dec!(4_187.5));
        assert_eq!(s.yearly_saving.round_dp(6), dec!(50_250));
    }

    #[test]
    fn test_delta_floors_at_zero() {
        let loans = demo_loans();
        let s = project_scenario(
            "cut-everything",
            &loans[..1],
            &LoanPredicate::All,
            &RatePolicy::Delta(dec!(-50)),
        );
        assert_eq!(s.projected_monthly_interest, Decimal::ZERO);
        assert_eq!(s.monthly_saving, s.current_monthly_interest);
    }

    #[test]
    fn test_rate_at_least_is_inclusive() {
        let s = project_scenario(
            "edge",
            &demo_loans(),
            &LoanPredicate::RateAtLeast(dec!(7.95)),
            &RatePolicy::FlatRate(dec!(5)),
        );
        assert_eq!(s.loan_ids, vec!["2".to_string(), "4".to_string()]);
    }

    #[test]
    fn test_category_predicate() {
        let s = project_scenario(
            "cars",
            &demo_loans(),
            &LoanPredicate::Categories(vec![LoanCategory::AutoLoan]),
            &RatePolicy::Delta(dec!(-1)),
        );
        assert_eq!(s.loan_ids, vec!["3".to_string()]);
        // 145_000 * 1% / 12
        assert_eq!(s.monthly_saving.round_dp(4), dec!(120.8333));
    }

    #[test]
    fn test_empty_subset_is_not_an_error() {
        let s = project_scenario(
            "none",
            &demo_loans(),
            &LoanPredicate::RateAbove(dec!(50)),
            &RatePolicy::FlatRate(dec!(1)),
        );
        assert_eq!(s.status, ScenarioStatus::NoApplicableLoans);
        assert_eq!(s.monthly_saving, Decimal::ZERO);
        assert_eq!(s.yearly_saving, Decimal::ZERO);
        assert!(s.loan_ids.is_empty());
    }

    #[test]
    fn test_run_default_presets() {
        let config = DashboardConfig::default();
        let results = run_scenarios(&demo_loans(), &config.scenarios);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "rate-cut-2pp");
        assert_eq!(results[1].loan_ids, vec!["4".to_string()]);
    }
}
