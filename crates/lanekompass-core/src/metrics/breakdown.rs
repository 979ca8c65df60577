use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{types::*, Loan, LoanCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub principal: Money,
    pub monthly: Money,
    pub loan_count: usize,
    /// Fraction of total portfolio principal held in this category.
    pub share_of_principal: Rate,
}

/// Group loans by category. Categories with no loans are absent.
pub fn compute_category_breakdown(loans: &[Loan]) -> BTreeMap<LoanCategory, CategoryBreakdown> {
    let total_principal: Money = loans.iter().map(|l| l.principal_remaining).sum();

    let mut out: BTreeMap<LoanCategory, CategoryBreakdown> = BTreeMap::new();
    for loan in loans {
        let entry = out.entry(loan.category).or_insert(CategoryBreakdown {
            principal: Decimal::ZERO,
            monthly: Decimal::ZERO,
            loan_count: 0,
            share_of_principal: Decimal::ZERO,
        });
        entry.principal += loan.principal_remaining;
        entry.monthly += loan.monthly_payment;
        entry.loan_count += 1;
    }

    if total_principal > Decimal::ZERO {
        for entry in out.values_mut() {
            entry.share_of_principal = entry.principal / total_principal;
        }
    }

    out
}
