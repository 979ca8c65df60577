use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{types::*, Loan, LoanCategory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Principal,
    InterestRate,
    MonthlyPayment,
    MonthsRemaining,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Filter and ordering parameters for the loan table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanQuery {
    /// `None` means all categories.
    pub category: Option<LoanCategory>,
    /// Keep loans with `interest_rate >= min_rate`.
    pub min_rate: Option<Percent>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

fn compare(a: &Loan, b: &Loan, key: SortKey) -> Ordering {
    match key {
        SortKey::Principal => a.principal_remaining.cmp(&b.principal_remaining),
        SortKey::InterestRate => a.interest_rate.cmp(&b.interest_rate),
        SortKey::MonthlyPayment => a.monthly_payment.cmp(&b.monthly_payment),
        SortKey::MonthsRemaining => a.months_remaining.cmp(&b.months_remaining),
    }
}

/// Apply the query's filters, then stable-sort on its key.
///
/// Equal keys keep their input order in both directions.
pub fn filter_and_sort(loans: &[Loan], query: &LoanQuery) -> Vec<Loan> {
    let mut out: Vec<Loan> = loans
        .iter()
        .filter(|l| query.category.map_or(true, |c| l.category == c))
        .filter(|l| query.min_rate.map_or(true, |r| l.interest_rate >= r))
        .cloned()
        .collect();

    match query.sort_direction {
        SortDirection::Ascending => out.sort_by(|a, b| compare(a, b, query.sort_key)),
        SortDirection::Descending => out.sort_by(|a, b| compare(b, a, query.sort_key)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::demo_loans;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn ids(loans: &[Loan]) -> Vec<&str> {
        loans.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_rate_ascending() {
        let query = LoanQuery {
            sort_key: SortKey::InterestRate,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let sorted = filter_and_sort(&demo_loans(), &query);
        assert_eq!(ids(&sorted), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_sort_by_principal_descending() {
        let sorted = filter_and_sort(&demo_loans(), &LoanQuery::default());
        assert_eq!(ids(&sorted), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let query = LoanQuery {
            sort_key: SortKey::MonthlyPayment,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let once = filter_and_sort(&demo_loans(), &query);
        let twice = filter_and_sort(&once, &query);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_op_filter_returns_all() {
        let query = LoanQuery {
            category: None,
            min_rate: None,
            ..Default::default()
        };
        let sorted = filter_and_sort(&demo_loans(), &query);
        // principal descending: 2_150_000, 185_000, 145_000, 32_500
        assert_eq!(ids(&sorted), vec!["1", "2", "3", "4"]);
        assert_eq!(query.sort_key, SortKey::Principal);
        assert_eq!(query.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let mut loans = demo_loans();
        for loan in &mut loans {
            loan.months_remaining = 12;
        }
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let query = LoanQuery {
                sort_key: SortKey::MonthsRemaining,
                sort_direction: direction,
                ..Default::default()
            };
            assert_eq!(ids(&filter_and_sort(&loans, &query)), vec!["1", "2", "3", "4"]);
        }
    }

    #[test]
    fn test_category_and_min_rate_filters() {
        let query = LoanQuery {
            category: Some(LoanCategory::CreditCard),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&demo_loans(), &query)), vec!["4"]);

        let query = LoanQuery {
            min_rate: Some(dec!(7.95)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&demo_loans(), &query)), vec!["2", "4"]);

        let query = LoanQuery {
            category: Some(LoanCategory::Mortgage),
            min_rate: Some(dec!(5)),
            ..Default::default()
        };
        assert!(filter_and_sort(&demo_loans(), &query).is_empty());
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
    }
}
