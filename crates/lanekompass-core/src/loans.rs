use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use crate::{types::*, KompassError, KompassResult};

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// Closed set of loan categories. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoanCategory {
    #[serde(alias = "Bolån", alias = "mortgage")]
    Mortgage,
    #[serde(alias = "Privatlån", alias = "personal_loan")]
    PersonalLoan,
    #[serde(alias = "Billån", alias = "auto_loan")]
    AutoLoan,
    #[serde(alias = "Kreditkort", alias = "credit_card")]
    CreditCard,
}

impl LoanCategory {
    pub const ALL: [LoanCategory; 4] = [
        LoanCategory::Mortgage,
        LoanCategory::PersonalLoan,
        LoanCategory::AutoLoan,
        LoanCategory::CreditCard,
    ];
}

impl std::fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Mortgage => "Mortgage",
            Self::PersonalLoan => "PersonalLoan",
            Self::AutoLoan => "AutoLoan",
            Self::CreditCard => "CreditCard",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LoanCategory {
    type Err = KompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalised.as_str() {
            "mortgage" | "bolån" => Ok(Self::Mortgage),
            "personalloan" | "personal" | "privatlån" => Ok(Self::PersonalLoan),
            "autoloan" | "auto" | "billån" => Ok(Self::AutoLoan),
            "creditcard" | "card" | "kreditkort" => Ok(Self::CreditCard),
            _ => Err(KompassError::InvalidInput {
                field: "category".into(),
                reason: format!("Unknown loan category '{s}'"),
            }),
        }
    }
}

/// A single loan as reported by the creditor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub lender: String,
    pub category: LoanCategory,
    pub product_name: String,
    pub principal_remaining: Money,
    /// Annual nominal rate in percent.
    pub interest_rate: Percent,
    pub monthly_payment: Money,
    pub months_remaining: u32,
    /// Display only.
    pub account_number_masked: String,
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Read-only source of loans.
pub trait LoanRepository {
    fn loans(&self) -> &[Loan];

    fn find(&self, id: &str) -> Option<&Loan> {
        self.loans().iter().find(|l| l.id == id)
    }
}

/// In-memory repository over a fixed, validated loan list.
#[derive(Debug, Clone, Default)]
pub struct StaticLoanRepository {
    loans: Vec<Loan>,
}

impl StaticLoanRepository {
    pub fn new(loans: Vec<Loan>) -> KompassResult<Self> {
        validate_loans(&loans)?;
        Ok(Self { loans })
    }

    /// The four demo loans shown by the LåneKompassen dashboard.
    pub fn demo() -> Self {
        Self { loans: demo_loans() }
    }
}

impl LoanRepository for StaticLoanRepository {
    fn loans(&self) -> &[Loan] {
        &self.loans
    }
}

/// Reject duplicate ids, negative values and amounts or rates beyond
/// [`MAX_AMOUNT`] / [`MAX_RATE`].
pub fn validate_loans(loans: &[Loan]) -> KompassResult<()> {
    let mut seen = HashSet::with_capacity(loans.len());
    for loan in loans {
        if !seen.insert(loan.id.as_str()) {
            return Err(KompassError::InvalidInput {
                field: "id".into(),
                reason: format!("Duplicate loan id '{}'", loan.id),
            });
        }
        let checks = [
            ("principal_remaining", loan.principal_remaining, MAX_AMOUNT),
            ("interest_rate", loan.interest_rate, MAX_RATE),
            ("monthly_payment", loan.monthly_payment, MAX_AMOUNT),
        ];
        for (field, value, max) in checks {
            if value < Decimal::ZERO {
                return Err(KompassError::InvalidInput {
                    field: field.into(),
                    reason: format!("Loan '{}' has negative {field} ({value}).", loan.id),
                });
            }
            if value > max {
                return Err(KompassError::InvalidInput {
                    field: field.into(),
                    reason: format!("Loan '{}' has {field} {value} above {max}.", loan.id),
                });
            }
        }
    }
    Ok(())
}

pub fn demo_loans() -> Vec<Loan> {
    vec![
        Loan {
            id: "1".into(),
            lender: "Handelsbanken".into(),
            category: LoanCategory::Mortgage,
            product_name: "Bolån villa".into(),
            principal_remaining: dec!(2_150_000),
            interest_rate: dec!(3.79),
            monthly_payment: dec!(9_850),
            months_remaining: 300,
            account_number_masked: "**** 1234".into(),
        },
        Loan {
            id: "2".into(),
            lender: "SBAB".into(),
            category: LoanCategory::PersonalLoan,
            product_name: "Privatlån renovering".into(),
            principal_remaining: dec!(185_000),
            interest_rate: dec!(7.95),
            monthly_payment: dec!(2_450),
            months_remaining: 72,
            account_number_masked: "**** 9912".into(),
        },
        Loan {
            id: "3".into(),
            lender: "Volvofinans".into(),
            category: LoanCategory::AutoLoan,
            product_name: "Billån XC60".into(),
            principal_remaining: dec!(145_000),
            interest_rate: dec!(4.95),
            monthly_payment: dec!(2_150),
            months_remaining: 48,
            account_number_masked: "**** 4410".into(),
        },
        Loan {
            id: "4".into(),
            lender: "Collector Bank".into(),
            category: LoanCategory::CreditCard,
            product_name: "Kreditkort Flex".into(),
            principal_remaining: dec!(32_500),
            interest_rate: dec!(19.9),
            monthly_payment: dec!(1_200),
            months_remaining: 36,
            account_number_masked: "**** 8765".into(),
        },
    ]
}
